use chrono::{DateTime, Utc};

use crate::models::{
    RateLimitInfo, ReportModel, Snapshot, TopLanguage, TopRepository,
};

pub const TOP_REPO_SLOTS: usize = 3;
pub const TOP_LANGUAGE_SLOTS: usize = 5;

/// Pads the repository leaderboard to a fixed card count so the layout never
/// collapses for quiet years. The ranking derivation itself never pads.
pub fn with_repo_placeholders(mut repos: Vec<TopRepository>) -> Vec<TopRepository> {
    repos.truncate(TOP_REPO_SLOTS);

    while repos.len() < TOP_REPO_SLOTS {
        repos.push(TopRepository {
            name_with_owner: "No repository yet".to_string(),
            url: String::new(),
            description: Some("No repositories with commits to show this year.".to_string()),
            stars: 0,
            forks: 0,
            commits: 0,
        });
    }

    repos
}

pub fn with_language_placeholders(mut languages: Vec<TopLanguage>) -> Vec<TopLanguage> {
    languages.truncate(TOP_LANGUAGE_SLOTS);

    while languages.len() < TOP_LANGUAGE_SLOTS {
        languages.push(TopLanguage {
            language: "N/A".to_string(),
            bytes: 0,
            ratio: 0.0,
        });
    }

    languages
}

/// Assembles the write-once snapshot mirroring the report model plus run
/// metadata. Field names feed downstream consumers verbatim.
pub fn build_snapshot(
    model: &ReportModel,
    timezone: &str,
    rate_limit: Option<RateLimitInfo>,
    generated_at: DateTime<Utc>,
) -> Snapshot {
    Snapshot {
        generated_at: generated_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        year: model.year,
        timezone: timezone.to_string(),
        username: model.profile.login.clone(),
        ai_mode: model.ai_summary.mode,
        ai_reason: model.ai_summary.reason.clone(),
        rate_limit,
        stats: model.stats.clone(),
        issues_count: model.issues_count,
        top_repos: model.top_repos.clone(),
        top_languages: model.top_languages.clone(),
        ai_summary: model.ai_summary.clone(),
    }
}

/// Profile README that embeds the generated SVG.
pub fn build_readme(username: &str) -> String {
    format!(
        r#"# {username}

<p align="center">
  <img src="./assets/github-annual-report.svg" alt="{username} GitHub year in review" width="100%" />
</p>

## Auto Update

- Generated by: `ghrecap --username {username}`
- Data source: GitHub GraphQL API (private contributions included when the token allows)
- AI summary: OpenAI-compatible endpoint, falling back to rule-based text on failure

## Links

- GitHub: https://github.com/{username}

## Live Stats

<p>
  <img height="170" src="https://github-readme-stats.vercel.app/api?username={username}&show_icons=true&theme=default&hide_border=true" alt="GitHub stats" />
  <img height="170" src="https://github-readme-stats.vercel.app/api/top-langs/?username={username}&layout=compact&theme=default&hide_border=true" alt="Top languages" />
</p>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AiMode, AiSummary, UserSummary, YearlyStatistics};

    fn empty_stats() -> YearlyStatistics {
        YearlyStatistics {
            total_contributions: 0,
            average_contributions_per_day: 0.0,
            monthly_contributions: [0; 12],
            weekday_contributions: [0; 7],
            busiest_weekday: 0,
            max_contributions_in_a_day: 0,
            max_contributions_date: None,
            max_contributions_month: None,
            longest_streak: 0,
            longest_streak_start_date: None,
            longest_streak_end_date: None,
            longest_gap: 0,
            longest_gap_start_date: None,
            longest_gap_end_date: None,
            heatmap_weeks: vec![],
        }
    }

    #[test]
    fn test_repo_placeholders_pad_to_three() {
        let repos = with_repo_placeholders(vec![]);
        assert_eq!(repos.len(), 3);
        assert_eq!(repos[0].commits, 0);
    }

    #[test]
    fn test_repo_placeholders_keep_real_entries_first() {
        let real = TopRepository {
            name_with_owner: "a/b".to_string(),
            url: "https://github.com/a/b".to_string(),
            description: None,
            stars: 1,
            forks: 0,
            commits: 7,
        };
        let repos = with_repo_placeholders(vec![real]);

        assert_eq!(repos.len(), 3);
        assert_eq!(repos[0].name_with_owner, "a/b");
        assert_eq!(repos[1].name_with_owner, "No repository yet");
    }

    #[test]
    fn test_language_placeholders_pad_to_five() {
        let languages = with_language_placeholders(vec![TopLanguage {
            language: "Rust".to_string(),
            bytes: 10,
            ratio: 1.0,
        }]);

        assert_eq!(languages.len(), 5);
        assert_eq!(languages[0].language, "Rust");
        assert_eq!(languages[4].language, "N/A");
    }

    #[test]
    fn test_snapshot_serializes_with_camel_case_names() {
        let model = ReportModel {
            profile: UserSummary {
                login: "octocat".to_string(),
                name: None,
                bio: None,
                avatar_url: String::new(),
                followers: 0,
                following: 0,
            },
            year: 2024,
            stats: empty_stats(),
            issues_count: 0,
            top_repos: vec![],
            top_languages: vec![],
            ai_summary: AiSummary {
                mode: AiMode::Fallback,
                intro: "i".to_string(),
                sections: vec![],
                reason: Some("r".to_string()),
            },
        };

        let generated_at = DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let snapshot = build_snapshot(&model, "Asia/Shanghai", None, generated_at);
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["generatedAt"], "2025-01-01T00:00:00Z");
        assert_eq!(json["aiMode"], "fallback");
        assert_eq!(json["stats"]["totalContributions"], 0);
        assert_eq!(json["stats"]["averageContributionsPerDay"], 0.0);
        assert!(json["stats"]["maxContributionsDate"].is_null());
        assert!(json.get("topRepos").is_some());
        assert!(json.get("issuesCount").is_some());
    }

    #[test]
    fn test_readme_embeds_svg() {
        let readme = build_readme("octocat");
        assert!(readme.contains("# octocat"));
        assert!(readme.contains("./assets/github-annual-report.svg"));
    }
}
