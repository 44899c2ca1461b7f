use crate::format::{
    escape_xml, estimate_text_width, format_date_opt, format_date_range, format_number,
    initial_from_login, month_short, to_percent, truncate_chars, wrap_lines, WEEKDAY_LABELS,
};
use crate::models::{
    AiMode, AiSummary, ContributionWeek, ReportModel, TopLanguage, TopRepository,
    YearlyStatistics,
};
use crate::render::level_color;
use crate::render::layout::{
    build_report_layout, chart_geometry, SectionRect, CARD_RADIUS, REPORT_HEIGHT, REPORT_WIDTH,
};

const HEATMAP_CELL: i32 = 10;
const HEATMAP_GAP: i32 = 3;

/// Index of the first heatmap week containing a day of the given month.
fn find_month_first_week_index(weeks: &[ContributionWeek], year: i32, month: u32) -> Option<usize> {
    use chrono::Datelike;

    weeks.iter().position(|week| {
        week.days
            .iter()
            .any(|day| day.date.year() == year && day.date.month() == month)
    })
}

fn card_rect(rect: SectionRect, radius: i32) -> String {
    format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" class="card"/>"#,
        rect.x, rect.y, rect.w, rect.h, radius
    )
}

fn heatmap_block(stats: &YearlyStatistics, card: SectionRect, year: i32) -> String {
    let month_y = card.y + 196;
    let heatmap_x = card.x + 36;
    let heatmap_y = card.y + 212;
    let week_step = HEATMAP_CELL + HEATMAP_GAP;

    let mut out = format!(
        r##"<rect x="{}" y="{}" width="{}" height="166" rx="12" fill="#F8FAFD" stroke="#E3EAF4"/>"##,
        card.x + 34,
        card.y + 168,
        card.w - 68
    );

    for month in 1..=12 {
        let Some(week_index) = find_month_first_week_index(&stats.heatmap_weeks, year, month)
        else {
            continue;
        };

        let x = heatmap_x + week_index as i32 * week_step;
        if x > card.right() - 40 {
            continue;
        }

        out.push_str(&format!(
            r#"<text x="{}" y="{}" class="small">{}</text>"#,
            x,
            month_y,
            month_short(month)
        ));
    }

    for (week_index, week) in stats.heatmap_weeks.iter().enumerate() {
        let x = heatmap_x + week_index as i32 * week_step;
        if x > card.right() - 36 {
            continue;
        }

        for (day_index, day) in week.days.iter().enumerate() {
            let y = heatmap_y + day_index as i32 * week_step;
            out.push_str(&format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" rx="2" fill="{}"/>"#,
                x,
                y,
                HEATMAP_CELL,
                HEATMAP_CELL,
                level_color(day.level)
            ));
        }
    }

    out
}

fn ai_card_text(ai_summary: &AiSummary, card: SectionRect) -> String {
    let content_x = card.x + 20;
    let line_height = 28;
    let max_y = card.bottom() - 24;

    let mut out = format!(
        r#"<text x="{}" y="{}" class="h2">AI year in review</text>"#,
        content_x,
        card.y + 62
    );

    let mut cursor_y = card.y + 100;

    for line in wrap_lines(&ai_summary.intro, 52, 2) {
        out.push_str(&format!(
            r#"<text x="{}" y="{}" class="p">{}</text>"#,
            content_x,
            cursor_y,
            escape_xml(&line)
        ));
        cursor_y += line_height;
    }

    let mode_label = match ai_summary.mode {
        AiMode::Ai => "AI generated",
        AiMode::Fallback => "rule-based fallback",
    };
    out.push_str(&format!(
        r#"<text x="{}" y="{}" class="small">Mode: {}</text>"#,
        content_x,
        cursor_y + 2,
        mode_label
    ));
    cursor_y += 32;

    for section in ai_summary.sections.iter().take(3) {
        let body_lines = wrap_lines(&section.content, 56, 2);
        let required = line_height + body_lines.len() as i32 * line_height + 14;

        if cursor_y + required > max_y {
            break;
        }

        out.push_str(&format!(
            r#"<text x="{}" y="{}" class="h3">{}</text>"#,
            content_x,
            cursor_y + 12,
            escape_xml(&section.heading)
        ));
        cursor_y += line_height;

        for line in body_lines {
            out.push_str(&format!(
                r#"<text x="{}" y="{}" class="small">{}</text>"#,
                content_x,
                cursor_y + 6,
                escape_xml(&line)
            ));
            cursor_y += line_height;
        }

        cursor_y += 10;
    }

    out
}

fn repo_rows(top_repos: &[TopRepository], card: SectionRect) -> String {
    let row_top = card.y + 96;
    let row_gap = 86;

    top_repos
        .iter()
        .take(3)
        .enumerate()
        .map(|(idx, repo)| {
            let y = row_top + idx as i32 * row_gap;
            let description = repo
                .description
                .as_deref()
                .unwrap_or("No description provided.");

            format!(
                concat!(
                    r#"<text x="{x}" y="{y0}" class="h3">{name}</text>"#,
                    r#"<text x="{x}" y="{y1}" class="small">Stars {stars} · Forks {forks} · Commits {commits}</text>"#,
                    r#"<text x="{x}" y="{y2}" class="p">{desc}</text>"#,
                ),
                x = card.x + 20,
                y0 = y,
                y1 = y + 28,
                y2 = y + 56,
                name = escape_xml(&repo.name_with_owner),
                stars = format_number(u64::from(repo.stars)),
                forks = format_number(u64::from(repo.forks)),
                commits = format_number(u64::from(repo.commits)),
                desc = escape_xml(&truncate_chars(description, 52)),
            )
        })
        .collect()
}

fn language_rows(top_languages: &[TopLanguage], card: SectionRect) -> String {
    let base_y = card.y + 96;
    let row_gap = 44;
    let bar_x = card.x + 190;
    let bar_width = card.w - 230;

    top_languages
        .iter()
        .take(5)
        .enumerate()
        .map(|(idx, item)| {
            let y = base_y + idx as i32 * row_gap;
            let fill_width = ((bar_width as f64 * item.ratio).round() as i32).max(8);

            format!(
                concat!(
                    r#"<text x="{label_x}" y="{y}" class="h3">#{rank} {language}</text>"#,
                    r##"<rect x="{bar_x}" y="{bar_y}" width="{bar_w}" height="10" rx="5" fill="#E6EDF5"/>"##,
                    r##"<rect x="{bar_x}" y="{bar_y}" width="{fill_w}" height="10" rx="5" fill="#1F2937"/>"##,
                    r#"<text x="{pct_x}" y="{y}" class="small" text-anchor="end">{pct}</text>"#,
                ),
                label_x = card.x + 20,
                y = y,
                rank = idx + 1,
                language = escape_xml(&item.language),
                bar_x = bar_x,
                bar_y = y - 18,
                bar_w = bar_width,
                fill_w = fill_width,
                pct_x = card.right() - 20,
                pct = to_percent(item.ratio, 1),
            )
        })
        .collect()
}

fn large_number_with_unit(x: i32, y: i32, value: u64, unit: &str) -> String {
    let number = format_number(value);
    let unit_x = x + estimate_text_width(&number, 44) as i32 + 18;

    format!(
        concat!(
            r#"<text x="{x}" y="{y}" class="num">{number}</text>"#,
            r#"<text x="{unit_x}" y="{y}" class="p">{unit}</text>"#,
        ),
        x = x,
        y = y,
        number = number,
        unit_x = unit_x,
        unit = escape_xml(unit),
    )
}

struct ChartBlock {
    clip_def: String,
    content: String,
    summary: String,
}

fn bar_chart(
    card: SectionRect,
    values: &[u64],
    labels: &[String],
    clip_id: &str,
    bar_w: i32,
    summary: String,
) -> ChartBlock {
    let g = chart_geometry(card);
    let max_value = values.iter().copied().max().unwrap_or(0).max(1);
    let slots = values.len() as i32;
    let gap = (g.plot_w - bar_w * slots) as f64 / (slots - 1).max(1) as f64;

    let mut bars = String::new();
    let mut axis = String::new();

    for (idx, value) in values.iter().enumerate() {
        let height = if *value > 0 {
            (((*value as f64 / max_value as f64) * g.plot_h as f64).round() as i32).max(6)
        } else {
            0
        };
        let x = g.plot_x as f64 + idx as f64 * (bar_w as f64 + gap);
        let y = g.plot_bottom - height;
        let fill = if *value == max_value { "url(#bar)" } else { "#6EE7B7" };

        bars.push_str(&format!(
            r#"<rect x="{:.2}" y="{}" width="{}" height="{}" rx="6" fill="{}"/>"#,
            x, y, bar_w, height, fill
        ));
        axis.push_str(&format!(
            r#"<text x="{:.2}" y="{}" class="small" text-anchor="middle">{}</text>"#,
            x + bar_w as f64 / 2.0,
            g.axis_y,
            escape_xml(&labels[idx])
        ));
    }

    let grids: String = [0.25, 0.5, 0.75]
        .iter()
        .map(|ratio| {
            let y = g.plot_bottom - (g.plot_h as f64 * ratio).round() as i32;
            format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" class="line"/>"#,
                g.plot_x,
                y,
                g.plot_x + g.plot_w,
                y
            )
        })
        .collect();

    ChartBlock {
        clip_def: format!(
            r#"<clipPath id="{}"><rect x="{}" y="{}" width="{}" height="{}" rx="6"/></clipPath>"#,
            clip_id, g.plot_x, g.plot_top, g.plot_w, g.plot_h
        ),
        content: format!(
            r#"{grids}<g clip-path="url(#{clip_id})">{bars}</g>{axis}"#,
        ),
        summary,
    }
}

fn monthly_chart(card: SectionRect, stats: &YearlyStatistics) -> ChartBlock {
    let labels: Vec<String> = (1..=12).map(|m| month_short(m).to_string()).collect();
    let summary = format!(
        r#"<text x="{}" y="{}" class="small" text-anchor="end">Total {}</text>"#,
        card.right() - 20,
        card.y + 34,
        format_number(stats.total_contributions)
    );

    bar_chart(card, &stats.monthly_contributions, &labels, "monthlyPlotClip", 36, summary)
}

fn weekday_chart(card: SectionRect, stats: &YearlyStatistics) -> ChartBlock {
    let labels: Vec<String> = WEEKDAY_LABELS.iter().map(|s| s.to_string()).collect();
    let peak_label = WEEKDAY_LABELS
        .get(stats.busiest_weekday)
        .copied()
        .unwrap_or("--");
    let peak_value = stats
        .weekday_contributions
        .get(stats.busiest_weekday)
        .copied()
        .unwrap_or(0);
    let summary = format!(
        r#"<text x="{}" y="{}" class="small" text-anchor="end">Busiest: {} ({} contributions)</text>"#,
        card.right() - 20,
        card.y + 34,
        peak_label,
        format_number(peak_value)
    );

    bar_chart(card, &stats.weekday_contributions, &labels, "weeklyPlotClip", 70, summary)
}

/// Renders the full fixed-layout annual report as a standalone SVG document.
pub fn render_yearly_report_svg(model: &ReportModel) -> String {
    let layout = build_report_layout();
    let stats = &model.stats;
    let profile = &model.profile;
    let year = model.year;

    let max_month_text = stats
        .max_contributions_month
        .clone()
        .unwrap_or_else(|| "--".to_string());
    let busiest_day_text = format_date_opt(stats.max_contributions_date);
    let streak_range = format_date_range(
        stats.longest_streak_start_date,
        stats.longest_streak_end_date,
    );
    let gap_range = format_date_range(stats.longest_gap_start_date, stats.longest_gap_end_date);

    let heatmap = heatmap_block(stats, layout.top_left, year);
    let ai_text = ai_card_text(&model.ai_summary, layout.top_right);
    let repos = repo_rows(&model.top_repos, layout.mid_left);
    let languages = language_rows(&model.top_languages, layout.mid_right);
    let monthly = monthly_chart(layout.chart_left, stats);
    let weekly = weekday_chart(layout.chart_right, stats);

    let mut cards = String::new();
    cards.push_str(&format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="18" class="card"/>"#,
        layout.top_left.x, layout.top_left.y, layout.top_left.w, layout.top_left.h
    ));
    cards.push_str(&format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="18" class="card"/>"#,
        layout.top_right.x, layout.top_right.y, layout.top_right.w, layout.top_right.h
    ));
    for rect in layout
        .stat_cards
        .iter()
        .chain(layout.kpi_cards.iter())
        .chain([
            &layout.mid_left,
            &layout.mid_right,
            &layout.chart_left,
            &layout.chart_right,
        ])
    {
        cards.push_str(&card_rect(*rect, CARD_RADIUS));
    }

    let bio = profile
        .bio
        .as_deref()
        .unwrap_or("Building useful software at a steady cadence.");

    format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" fill="none" xmlns="http://www.w3.org/2000/svg">
  <defs>
    <linearGradient id="bg" x1="0" y1="0" x2="{width}" y2="{height}" gradientUnits="userSpaceOnUse">
      <stop stop-color="#F6F7FB"/>
      <stop offset="1" stop-color="#EEF1F6"/>
    </linearGradient>
    <linearGradient id="bar" x1="0" y1="0" x2="1" y2="1">
      <stop stop-color="#34D399"/>
      <stop offset="1" stop-color="#10B981"/>
    </linearGradient>
    {monthly_clip}
    {weekly_clip}
    <style>
      .title {{ font: 700 38px 'Segoe UI', sans-serif; fill: #1F2937; }}
      .h2 {{ font: 700 24px 'Segoe UI', sans-serif; fill: #243244; }}
      .h3 {{ font: 700 18px 'Segoe UI', sans-serif; fill: #344256; }}
      .p {{ font: 500 16px 'Segoe UI', sans-serif; fill: #4B5563; }}
      .small {{ font: 500 14px 'Segoe UI', sans-serif; fill: #6B7280; }}
      .num {{ font: 700 44px 'Segoe UI', sans-serif; fill: #111827; }}
      .card {{ fill: #FFFFFF; stroke: #D9E1EB; stroke-width: 2; }}
      .badge {{ fill: #F7FAFC; stroke: #DFE7F2; stroke-width: 1.5; }}
      .line {{ stroke: #E5ECF4; stroke-width: 1; stroke-dasharray: 5 5; }}
    </style>
  </defs>

  <rect width="{width}" height="{height}" fill="url(#bg)"/>
  {cards}

  <circle cx="{avatar_cx}" cy="{avatar_cy}" r="36" fill="#D1FAE5" stroke="#10B981"/>
  <text x="{avatar_cx}" y="{avatar_ty}" text-anchor="middle" class="h2">{initial}</text>

  <text x="{name_x}" y="{name_y}" class="title">{name}</text>
  <text x="{name_x}" y="{handle_y}" class="p">@{login} · {followers} followers · {following} following</text>
  <text x="{name_x}" y="{bio_y}" class="small">{bio}</text>

  <text x="{total_x}" y="{total_y}" class="h3" text-anchor="end">{total} contributions</text>
  <text x="{total_x}" y="{total_sub_y}" class="small" text-anchor="end">in {year} alone</text>

  {heatmap}
  {ai_text}

  <text x="{stat0_x}" y="{stat_y}" class="h3">Peak month of the year</text>
  <text x="{stat0_xe}" y="{stat_y}" class="h3" text-anchor="end">{max_month}</text>

  <text x="{stat1_x}" y="{stat_y}" class="h3">Daily average</text>
  <text x="{stat1_xe}" y="{stat_y}" class="h3" text-anchor="end">{average}</text>

  <text x="{stat2_x}" y="{stat_y}" class="h3">Issues touched in {year}</text>
  <text x="{stat2_xe}" y="{stat_y}" class="h3" text-anchor="end">{issues}</text>

  <text x="{kpi0_x}" y="{kpi_title_y}" class="h3">Your busiest day</text>
  {kpi0_number}
  <text x="{kpi0_x}" y="{kpi_sub_y}" class="p">{busiest_day}</text>

  <text x="{kpi1_x}" y="{kpi_title_y}" class="h3">Longest streak</text>
  {kpi1_number}
  <text x="{kpi1_x}" y="{kpi_sub_y}" class="p">{streak_range}</text>

  <text x="{kpi2_x}" y="{kpi_title_y}" class="h3">Longest break</text>
  {kpi2_number}
  <text x="{kpi2_x}" y="{kpi_sub_y}" class="p">{gap_range}</text>

  <text x="{mid_left_x}" y="{mid_title_y}" class="h2">Repositories you hammered on in {year}</text>
  <rect x="{badge_x}" y="{badge_y}" width="70" height="34" rx="10" class="badge"/>
  <text x="{badge_tx}" y="{badge_ty}" class="small" text-anchor="middle">Top 3</text>
  {repos}

  <text x="{mid_right_x}" y="{mid_title_y}" class="h2">Languages you reached for most</text>
  {languages}

  <text x="{chart_left_x}" y="{chart_title_y}" class="h2">The shape of your {year}</text>
  {monthly_summary}
  {monthly_content}

  <text x="{chart_right_x}" y="{chart_title_y}" class="h2">Your weekly rhythm</text>
  {weekly_summary}
  {weekly_content}
</svg>"##,
        width = REPORT_WIDTH,
        height = REPORT_HEIGHT,
        monthly_clip = monthly.clip_def,
        weekly_clip = weekly.clip_def,
        cards = cards,
        avatar_cx = layout.top_left.x + 72,
        avatar_cy = layout.top_left.y + 88,
        avatar_ty = layout.top_left.y + 96,
        initial = escape_xml(&initial_from_login(&profile.login)),
        name_x = layout.top_left.x + 128,
        name_y = layout.top_left.y + 94,
        name = escape_xml(profile.display_name()),
        handle_y = layout.top_left.y + 128,
        login = escape_xml(&profile.login),
        followers = format_number(u64::from(profile.followers)),
        following = format_number(u64::from(profile.following)),
        bio_y = layout.top_left.y + 164,
        bio = escape_xml(&truncate_chars(bio, 58)),
        total_x = layout.top_left.right() - 24,
        total_y = layout.top_left.y + 206,
        total = format_number(stats.total_contributions),
        total_sub_y = layout.top_left.y + 234,
        year = year,
        heatmap = heatmap,
        ai_text = ai_text,
        stat0_x = layout.stat_cards[0].x + 20,
        stat0_xe = layout.stat_cards[0].right() - 20,
        stat1_x = layout.stat_cards[1].x + 20,
        stat1_xe = layout.stat_cards[1].right() - 20,
        stat2_x = layout.stat_cards[2].x + 20,
        stat2_xe = layout.stat_cards[2].right() - 20,
        stat_y = layout.stat_cards[0].y + 38,
        max_month = escape_xml(&max_month_text),
        average = stats.average_contributions_per_day,
        issues = format_number(u64::from(model.issues_count)),
        kpi0_x = layout.kpi_cards[0].x + 20,
        kpi1_x = layout.kpi_cards[1].x + 20,
        kpi2_x = layout.kpi_cards[2].x + 20,
        kpi_title_y = layout.kpi_cards[0].y + 42,
        kpi_sub_y = layout.kpi_cards[0].y + 130,
        kpi0_number = large_number_with_unit(
            layout.kpi_cards[0].x + 20,
            layout.kpi_cards[0].y + 98,
            u64::from(stats.max_contributions_in_a_day),
            "contributions",
        ),
        kpi1_number = large_number_with_unit(
            layout.kpi_cards[1].x + 20,
            layout.kpi_cards[1].y + 98,
            u64::from(stats.longest_streak),
            "days",
        ),
        kpi2_number = large_number_with_unit(
            layout.kpi_cards[2].x + 20,
            layout.kpi_cards[2].y + 98,
            u64::from(stats.longest_gap),
            "days",
        ),
        busiest_day = escape_xml(&busiest_day_text),
        streak_range = escape_xml(&streak_range),
        gap_range = escape_xml(&gap_range),
        mid_left_x = layout.mid_left.x + 20,
        mid_title_y = layout.mid_left.y + 46,
        badge_x = layout.mid_left.right() - 94,
        badge_y = layout.mid_left.y + 16,
        badge_tx = layout.mid_left.right() - 59,
        badge_ty = layout.mid_left.y + 39,
        repos = repos,
        mid_right_x = layout.mid_right.x + 20,
        languages = languages,
        chart_left_x = layout.chart_left.x + 20,
        chart_title_y = layout.chart_left.y + 34,
        monthly_summary = monthly.summary,
        monthly_content = monthly.content,
        chart_right_x = layout.chart_right.x + 20,
        weekly_summary = weekly.summary,
        weekly_content = weekly.content,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AiSummarySection, UserSummary};

    fn model() -> ReportModel {
        ReportModel {
            profile: UserSummary {
                login: "octocat".to_string(),
                name: Some("The Octocat".to_string()),
                bio: None,
                avatar_url: "https://example.com/a.png".to_string(),
                followers: 1200,
                following: 4,
            },
            year: 2024,
            stats: YearlyStatistics {
                total_contributions: 1234,
                average_contributions_per_day: 3.38,
                monthly_contributions: [10, 20, 300, 40, 5, 6, 7, 8, 9, 10, 11, 12],
                weekday_contributions: [5, 100, 90, 80, 70, 60, 33],
                busiest_weekday: 1,
                max_contributions_in_a_day: 41,
                max_contributions_date: chrono::NaiveDate::from_ymd_opt(2024, 3, 5),
                max_contributions_month: Some("2024-03".to_string()),
                longest_streak: 17,
                longest_streak_start_date: chrono::NaiveDate::from_ymd_opt(2024, 2, 1),
                longest_streak_end_date: chrono::NaiveDate::from_ymd_opt(2024, 2, 17),
                longest_gap: 9,
                longest_gap_start_date: chrono::NaiveDate::from_ymd_opt(2024, 7, 1),
                longest_gap_end_date: chrono::NaiveDate::from_ymd_opt(2024, 7, 9),
                heatmap_weeks: vec![],
            },
            issues_count: 12,
            top_repos: vec![TopRepository {
                name_with_owner: "octocat/<hello>".to_string(),
                url: "https://github.com/octocat/hello".to_string(),
                description: Some("Says \"hello\"".to_string()),
                stars: 10,
                forks: 2,
                commits: 50,
            }],
            top_languages: vec![TopLanguage {
                language: "Rust".to_string(),
                bytes: 300,
                ratio: 0.75,
            }],
            ai_summary: AiSummary {
                mode: AiMode::Fallback,
                intro: "A steady year.".to_string(),
                sections: vec![AiSummarySection {
                    heading: "Rhythm".to_string(),
                    content: "Consistent commits.".to_string(),
                }],
                reason: Some("disabled".to_string()),
            },
        }
    }

    #[test]
    fn test_svg_has_document_frame() {
        let svg = render_yearly_report_svg(&model());

        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<svg width=\"1400\" height=\"1220\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_svg_escapes_user_text() {
        let svg = render_yearly_report_svg(&model());

        assert!(svg.contains("octocat/&lt;hello&gt;"));
        assert!(!svg.contains("octocat/<hello>"));
    }

    #[test]
    fn test_svg_shows_headline_numbers() {
        let svg = render_yearly_report_svg(&model());

        assert!(svg.contains("1,234 contributions"));
        assert!(svg.contains("2024-03"));
        assert!(svg.contains("75.0%"));
        assert!(svg.contains("Busiest: Mon (100 contributions)"));
    }

    #[test]
    fn test_svg_renders_without_activity() {
        let mut empty = model();
        empty.stats.max_contributions_date = None;
        empty.stats.max_contributions_month = None;
        empty.stats.monthly_contributions = [0; 12];
        empty.stats.weekday_contributions = [0; 7];
        empty.top_repos.clear();
        empty.top_languages.clear();

        let svg = render_yearly_report_svg(&empty);
        assert!(svg.contains("--"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
