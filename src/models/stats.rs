use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar::ContributionWeek;
use super::repo::RepositoryContribution;

/// Derived metrics for one report year.
///
/// Serialized field names feed the snapshot file and the presentation layer
/// verbatim, so they stay camelCase and must not be renamed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyStatistics {
    pub total_contributions: u64,
    pub average_contributions_per_day: f64,
    /// Index 0 = January, bucketed by the report timezone.
    pub monthly_contributions: [u64; 12],
    /// Index 0 = Sunday .. 6 = Saturday, bucketed by the report timezone.
    pub weekday_contributions: [u64; 7],
    pub busiest_weekday: usize,
    pub max_contributions_in_a_day: u32,
    pub max_contributions_date: Option<NaiveDate>,
    /// "YYYY-MM" of the strongest month, None when the year had no activity.
    pub max_contributions_month: Option<String>,
    pub longest_streak: u32,
    pub longest_streak_start_date: Option<NaiveDate>,
    pub longest_streak_end_date: Option<NaiveDate>,
    pub longest_gap: u32,
    pub longest_gap_start_date: Option<NaiveDate>,
    pub longest_gap_end_date: Option<NaiveDate>,
    pub heatmap_weeks: Vec<ContributionWeek>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopRepository {
    pub name_with_owner: String,
    pub url: String,
    pub description: Option<String>,
    pub stars: u32,
    pub forks: u32,
    pub commits: u32,
}

impl From<&RepositoryContribution> for TopRepository {
    fn from(repo: &RepositoryContribution) -> Self {
        Self {
            name_with_owner: repo.name_with_owner.clone(),
            url: repo.url.clone(),
            description: repo.description.clone(),
            stars: repo.stars,
            forks: repo.forks,
            commits: repo.commits,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopLanguage {
    pub language: String,
    pub bytes: u64,
    /// Share of the grand total bytes across all aggregated languages.
    pub ratio: f64,
}
