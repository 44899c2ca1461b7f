use crate::ai::provider::{SummaryRequest, SummaryText};
use crate::format::{format_date_opt, format_date_range, format_number, month_name_from_key};
use crate::models::AiSummarySection;

/// Deterministic rule-based summary used whenever the AI call is disabled or
/// fails. Built purely from the statistics record, so a fallback report is
/// still fully populated.
pub fn build_fallback_summary(request: &SummaryRequest<'_>) -> SummaryText {
    let stats = request.stats;

    let peak_month = stats
        .max_contributions_month
        .as_deref()
        .and_then(month_name_from_key)
        .unwrap_or("no single month");

    let highlight = match stats.max_contributions_date {
        Some(date) => format!(
            "{} was your busiest day, peaking at {} contributions.",
            format_date_opt(Some(date)),
            format_number(u64::from(stats.max_contributions_in_a_day)),
        ),
        None => "No contribution activity stood out this year.".to_string(),
    };

    let intro = format!(
        "You kept a steady GitHub rhythm through {}: {} contributions in total, averaging {} per day.",
        request.year,
        format_number(stats.total_contributions),
        stats.average_contributions_per_day,
    );

    let sections = vec![
        AiSummarySection {
            heading: "Active rhythm".to_string(),
            content: format!(
                "Contributions peaked in {}, and your longest daily streak ran {} days.",
                peak_month, stats.longest_streak,
            ),
        },
        AiSummarySection {
            heading: "Highlight".to_string(),
            content: highlight,
        },
        AiSummarySection {
            heading: "Collaboration".to_string(),
            content: format!(
                "You touched {} issues in {}, and your longest break lasted {} days ({}).",
                format_number(u64::from(request.issues_count)),
                request.year,
                stats.longest_gap,
                format_date_range(stats.longest_gap_start_date, stats.longest_gap_end_date),
            ),
        },
    ];

    SummaryText { intro, sections }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::YearlyStatistics;
    use chrono::NaiveDate;

    fn stats() -> YearlyStatistics {
        YearlyStatistics {
            total_contributions: 1234,
            average_contributions_per_day: 3.38,
            monthly_contributions: [0; 12],
            weekday_contributions: [0; 7],
            busiest_weekday: 0,
            max_contributions_in_a_day: 41,
            max_contributions_date: NaiveDate::from_ymd_opt(2024, 3, 5),
            max_contributions_month: Some("2024-03".to_string()),
            longest_streak: 17,
            longest_streak_start_date: None,
            longest_streak_end_date: None,
            longest_gap: 9,
            longest_gap_start_date: NaiveDate::from_ymd_opt(2024, 7, 1),
            longest_gap_end_date: NaiveDate::from_ymd_opt(2024, 7, 9),
            heatmap_weeks: vec![],
        }
    }

    #[test]
    fn test_fallback_has_three_sections() {
        let stats = stats();
        let request = SummaryRequest {
            username: "octocat",
            year: 2024,
            stats: &stats,
            issues_count: 12,
            top_languages: &[],
            top_repos: &[],
        };

        let summary = build_fallback_summary(&request);
        assert_eq!(summary.sections.len(), 3);
        assert!(summary.intro.contains("1,234"));
        assert!(summary.sections[0].content.contains("March"));
        assert!(summary.sections[1].content.contains("41"));
        assert!(summary.sections[2].content.contains("Jul 1 - Jul 9"));
    }

    #[test]
    fn test_fallback_without_activity() {
        let mut stats = stats();
        stats.max_contributions_date = None;
        stats.max_contributions_month = None;
        let request = SummaryRequest {
            username: "octocat",
            year: 2024,
            stats: &stats,
            issues_count: 0,
            top_languages: &[],
            top_repos: &[],
        };

        let summary = build_fallback_summary(&request);
        assert!(summary.sections[0].content.contains("no single month"));
        assert!(summary.sections[1].content.contains("No contribution activity"));
    }
}
