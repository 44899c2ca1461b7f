use crate::format::{
    escape_xml, format_date_opt, format_date_range, format_number, initial_from_login,
    month_short, to_percent, truncate_chars, WEEKDAY_LABELS,
};
use crate::models::{AiMode, ReportModel, YearlyStatistics};
use crate::render::level_color;

const STYLE: &str = r#"
  :root { color-scheme: light; }
  * { box-sizing: border-box; margin: 0; }
  body { font-family: 'Segoe UI', sans-serif; background: #F6F7FB; color: #1F2937; padding: 24px; }
  .report { max-width: 1400px; margin: 0 auto; display: grid; gap: 16px; }
  .card { background: #FFFFFF; border: 2px solid #D9E1EB; border-radius: 14px; padding: 20px; }
  .row { display: grid; gap: 16px; }
  .row.top { grid-template-columns: 3fr 2fr; }
  .row.thirds { grid-template-columns: repeat(3, 1fr); }
  .row.mid { grid-template-columns: 4fr 5fr; }
  .row.halves { grid-template-columns: 1fr 1fr; }
  h1 { font-size: 34px; }
  h2 { font-size: 22px; color: #243244; }
  h3 { font-size: 17px; color: #344256; }
  .small { font-size: 13px; color: #6B7280; }
  .num { font-size: 40px; font-weight: 700; color: #111827; }
  .avatar { width: 72px; height: 72px; border-radius: 50%; background: #D1FAE5;
    border: 2px solid #10B981; display: inline-flex; align-items: center;
    justify-content: center; font-size: 28px; font-weight: 700; }
  .profile { display: flex; gap: 20px; align-items: center; }
  .heatmap { display: grid; grid-auto-flow: column; gap: 3px; margin-top: 16px; overflow: hidden; }
  .heat-week { display: grid; grid-template-rows: repeat(7, 10px); gap: 3px; }
  .heat-cell { width: 10px; height: 10px; border-radius: 2px; }
  .lang-row { display: flex; align-items: center; gap: 12px; margin-top: 14px; }
  .lang-bar { flex: 1; height: 10px; border-radius: 5px; background: #E6EDF5; overflow: hidden; }
  .lang-fill { height: 100%; border-radius: 5px; background: #1F2937; }
  .repo { margin-top: 18px; }
  .bars { display: flex; align-items: flex-end; gap: 10px; height: 150px; margin-top: 18px; }
  .bar-slot { flex: 1; display: flex; flex-direction: column; justify-content: flex-end;
    align-items: center; gap: 6px; height: 100%; }
  .bar { width: 100%; border-radius: 6px 6px 0 0; background: #6EE7B7; }
  .bar.peak { background: linear-gradient(#34D399, #10B981); }
  .ai-section { margin-top: 14px; }
"#;

fn heatmap(stats: &YearlyStatistics) -> String {
    let weeks: String = stats
        .heatmap_weeks
        .iter()
        .take(53)
        .map(|week| {
            let cells: String = week
                .days
                .iter()
                .take(7)
                .map(|day| {
                    format!(
                        r#"<span class="heat-cell" style="background:{}"></span>"#,
                        level_color(day.level)
                    )
                })
                .collect();
            format!(r#"<span class="heat-week">{cells}</span>"#)
        })
        .collect();

    format!(r#"<div class="heatmap">{weeks}</div>"#)
}

fn bar_row(values: &[u64], labels: &[String]) -> String {
    let max_value = values.iter().copied().max().unwrap_or(0).max(1);

    let slots: String = values
        .iter()
        .zip(labels)
        .map(|(value, label)| {
            let height = ((*value as f64 / max_value as f64) * 140.0).round() as i32;
            let height = if *value > 0 { height.max(6) } else { 0 };
            let class = if *value == max_value { "bar peak" } else { "bar" };

            format!(
                concat!(
                    r#"<div class="bar-slot">"#,
                    r#"<div class="{class}" style="height:{height}px"></div>"#,
                    r#"<span class="small">{label}</span>"#,
                    r#"</div>"#,
                ),
                class = class,
                height = height,
                label = escape_xml(label),
            )
        })
        .collect();

    format!(r#"<div class="bars">{slots}</div>"#)
}

/// Renders the annual report as a standalone HTML page mirroring the SVG
/// layout: profile + heatmap, AI summary, stat and KPI rows, repositories,
/// languages, monthly and weekday charts.
pub fn render_report_html(model: &ReportModel) -> String {
    let stats = &model.stats;
    let profile = &model.profile;
    let year = model.year;

    let mode_label = match model.ai_summary.mode {
        AiMode::Ai => "AI generated",
        AiMode::Fallback => "rule-based fallback",
    };

    let ai_sections: String = model
        .ai_summary
        .sections
        .iter()
        .take(3)
        .map(|section| {
            format!(
                r#"<div class="ai-section"><h3>{}</h3><p class="small">{}</p></div>"#,
                escape_xml(&section.heading),
                escape_xml(&section.content)
            )
        })
        .collect();

    let repos: String = model
        .top_repos
        .iter()
        .take(3)
        .map(|repo| {
            let description = repo
                .description
                .as_deref()
                .unwrap_or("No description provided.");
            format!(
                concat!(
                    r#"<div class="repo"><h3>{name}</h3>"#,
                    r#"<p class="small">Stars {stars} · Forks {forks} · Commits {commits}</p>"#,
                    r#"<p>{desc}</p></div>"#,
                ),
                name = escape_xml(&repo.name_with_owner),
                stars = format_number(u64::from(repo.stars)),
                forks = format_number(u64::from(repo.forks)),
                commits = format_number(u64::from(repo.commits)),
                desc = escape_xml(&truncate_chars(description, 80)),
            )
        })
        .collect();

    let languages: String = model
        .top_languages
        .iter()
        .take(5)
        .enumerate()
        .map(|(idx, item)| {
            let width = (item.ratio * 100.0).clamp(0.0, 100.0);
            format!(
                concat!(
                    r#"<div class="lang-row"><h3>#{rank} {language}</h3>"#,
                    r#"<div class="lang-bar"><div class="lang-fill" style="width:{width:.1}%"></div></div>"#,
                    r#"<span class="small">{pct}</span></div>"#,
                ),
                rank = idx + 1,
                language = escape_xml(&item.language),
                width = width,
                pct = to_percent(item.ratio, 1),
            )
        })
        .collect();

    let month_labels: Vec<String> = (1..=12).map(|m| month_short(m).to_string()).collect();
    let weekday_labels: Vec<String> = WEEKDAY_LABELS.iter().map(|s| s.to_string()).collect();

    let peak_weekday = WEEKDAY_LABELS
        .get(stats.busiest_weekday)
        .copied()
        .unwrap_or("--");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{login} · {year} GitHub year in review</title>
<style>{style}</style>
</head>
<body>
<div class="report">
  <div class="row top">
    <div class="card">
      <div class="profile">
        <span class="avatar">{initial}</span>
        <div>
          <h1>{name}</h1>
          <p>@{login} · {followers} followers · {following} following</p>
          <p class="small">{bio}</p>
        </div>
      </div>
      <p class="small" style="margin-top:18px">{total} contributions in {year} alone</p>
      {heatmap}
    </div>
    <div class="card">
      <h2>AI year in review</h2>
      <p style="margin-top:12px">{intro}</p>
      <p class="small">Mode: {mode}</p>
      {ai_sections}
    </div>
  </div>

  <div class="row thirds">
    <div class="card"><h3>Peak month of the year</h3><p>{max_month}</p></div>
    <div class="card"><h3>Daily average</h3><p>{average}</p></div>
    <div class="card"><h3>Issues touched in {year}</h3><p>{issues}</p></div>
  </div>

  <div class="row thirds">
    <div class="card"><h3>Your busiest day</h3><p class="num">{max_day}</p><p>{max_day_date}</p></div>
    <div class="card"><h3>Longest streak</h3><p class="num">{streak} days</p><p>{streak_range}</p></div>
    <div class="card"><h3>Longest break</h3><p class="num">{gap} days</p><p>{gap_range}</p></div>
  </div>

  <div class="row mid">
    <div class="card"><h2>Repositories you hammered on in {year}</h2>{repos}</div>
    <div class="card"><h2>Languages you reached for most</h2>{languages}</div>
  </div>

  <div class="row halves">
    <div class="card">
      <h2>The shape of your {year}</h2>
      <p class="small">Total {total}</p>
      {monthly_bars}
    </div>
    <div class="card">
      <h2>Your weekly rhythm</h2>
      <p class="small">Busiest: {peak_weekday} ({peak_value} contributions)</p>
      {weekday_bars}
    </div>
  </div>
</div>
</body>
</html>
"#,
        login = escape_xml(&profile.login),
        year = year,
        style = STYLE,
        initial = escape_xml(&initial_from_login(&profile.login)),
        name = escape_xml(profile.display_name()),
        followers = format_number(u64::from(profile.followers)),
        following = format_number(u64::from(profile.following)),
        bio = escape_xml(&truncate_chars(
            profile
                .bio
                .as_deref()
                .unwrap_or("Building useful software at a steady cadence."),
            80
        )),
        total = format_number(stats.total_contributions),
        heatmap = heatmap(stats),
        intro = escape_xml(&model.ai_summary.intro),
        mode = mode_label,
        ai_sections = ai_sections,
        max_month = escape_xml(
            model
                .stats
                .max_contributions_month
                .as_deref()
                .unwrap_or("--")
        ),
        average = stats.average_contributions_per_day,
        issues = format_number(u64::from(model.issues_count)),
        max_day = format_number(u64::from(stats.max_contributions_in_a_day)),
        max_day_date = escape_xml(&format_date_opt(stats.max_contributions_date)),
        streak = stats.longest_streak,
        streak_range = escape_xml(&format_date_range(
            stats.longest_streak_start_date,
            stats.longest_streak_end_date
        )),
        gap = stats.longest_gap,
        gap_range = escape_xml(&format_date_range(
            stats.longest_gap_start_date,
            stats.longest_gap_end_date
        )),
        repos = repos,
        languages = languages,
        monthly_bars = bar_row(&stats.monthly_contributions, &month_labels),
        weekday_bars = bar_row(&stats.weekday_contributions, &weekday_labels),
        peak_weekday = peak_weekday,
        peak_value = format_number(
            stats
                .weekday_contributions
                .get(stats.busiest_weekday)
                .copied()
                .unwrap_or(0)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AiSummary, AiSummarySection, TopLanguage, UserSummary};

    fn model() -> ReportModel {
        ReportModel {
            profile: UserSummary {
                login: "octocat".to_string(),
                name: None,
                bio: Some("Ship <fast>".to_string()),
                avatar_url: String::new(),
                followers: 2,
                following: 3,
            },
            year: 2024,
            stats: YearlyStatistics {
                total_contributions: 99,
                average_contributions_per_day: 0.27,
                monthly_contributions: [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 33],
                weekday_contributions: [1, 2, 3, 4, 5, 6, 78],
                busiest_weekday: 6,
                max_contributions_in_a_day: 9,
                max_contributions_date: chrono::NaiveDate::from_ymd_opt(2024, 12, 1),
                max_contributions_month: Some("2024-12".to_string()),
                longest_streak: 3,
                longest_streak_start_date: None,
                longest_streak_end_date: None,
                longest_gap: 40,
                longest_gap_start_date: None,
                longest_gap_end_date: None,
                heatmap_weeks: vec![],
            },
            issues_count: 1,
            top_repos: vec![],
            top_languages: vec![TopLanguage {
                language: "Rust".to_string(),
                bytes: 1,
                ratio: 1.0,
            }],
            ai_summary: AiSummary {
                mode: AiMode::Ai,
                intro: "Intro".to_string(),
                sections: vec![AiSummarySection {
                    heading: "H".to_string(),
                    content: "C".to_string(),
                }],
                reason: None,
            },
        }
    }

    #[test]
    fn test_html_document_shape() {
        let html = render_report_html(&model());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("2024 GitHub year in review"));
        assert!(html.contains("Busiest: Sat (78 contributions)"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_html_escapes_bio() {
        let html = render_report_html(&model());

        assert!(html.contains("Ship &lt;fast&gt;"));
        assert!(!html.contains("Ship <fast>"));
    }
}
