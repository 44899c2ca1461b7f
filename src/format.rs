use chrono::{Datelike, NaiveDate};

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Formats an integer with comma thousands separators.
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn to_percent(ratio: f64, digits: usize) -> String {
    if !ratio.is_finite() || ratio <= 0.0 {
        return format!("{:.*}%", digits, 0.0);
    }
    format!("{:.*}%", digits, ratio * 100.0)
}

/// Char-safe truncation with a trailing ellipsis.
pub fn truncate_chars(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        return input.to_string();
    }

    let kept: String = input.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Greedy word wrap into at most `max_lines` lines of `max_chars` characters.
/// Overlong words are split hard; dropped overflow ellipsizes the last line.
pub fn wrap_lines(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    if max_chars == 0 || max_lines == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    let mut truncated = false;

    'words: for word in text.split_whitespace() {
        let mut word = word.to_string();

        loop {
            let word_len = word.chars().count();
            let needed = if current_len == 0 { word_len } else { current_len + 1 + word_len };

            if needed <= max_chars {
                if current_len > 0 {
                    current.push(' ');
                }
                current.push_str(&word);
                current_len = needed;
                continue 'words;
            }

            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
                if lines.len() == max_lines {
                    truncated = true;
                    break 'words;
                }
                continue;
            }

            // A single word longer than the line: split it hard.
            let head: String = word.chars().take(max_chars).collect();
            let tail: String = word.chars().skip(max_chars).collect();
            lines.push(head);
            if lines.len() == max_lines {
                truncated = true;
                break 'words;
            }
            word = tail;
        }
    }

    if !current.is_empty() && lines.len() < max_lines {
        lines.push(current);
    } else if !current.is_empty() {
        truncated = true;
    }

    if truncated {
        if let Some(last) = lines.last_mut() {
            *last = truncate_chars(last, max_chars.saturating_sub(1));
            if !last.ends_with('…') {
                last.push('…');
            }
        }
    }

    lines
}

/// Rough text width for positioning in the SVG, tuned for numerals.
pub fn estimate_text_width(text: &str, font_size: u32) -> u32 {
    let units: u32 = text
        .chars()
        .map(|ch| match ch {
            ',' | '.' | ' ' => 35,
            _ if ch.is_ascii() => 60,
            _ => 100,
        })
        .sum();

    units * font_size / 100
}

/// Three-letter month label for chart axes and the heatmap.
pub fn month_short(month: u32) -> &'static str {
    let name = month_name(month);
    name.get(..3).unwrap_or(name)
}

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("--")
}

/// Month name from a "YYYY-MM" key, as produced by the statistics engine.
pub fn month_name_from_key(key: &str) -> Option<&'static str> {
    let month: u32 = key.get(5..7)?.parse().ok()?;
    if (1..=12).contains(&month) {
        Some(month_name(month))
    } else {
        None
    }
}

pub fn format_date(date: NaiveDate) -> String {
    format!("{} {}", month_short(date.month()), date.day())
}

pub fn format_date_opt(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| "--".to_string())
}

pub fn format_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    match (start, end) {
        (Some(start), Some(end)) => format!("{} - {}", format_date(start), format_date(end)),
        _ => "--".to_string(),
    }
}

pub fn initial_from_login(login: &str) -> String {
    login
        .chars()
        .next()
        .map(|ch| ch.to_uppercase().to_string())
        .unwrap_or_else(|| "?".to_string())
}
