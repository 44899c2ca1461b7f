use serde::{Deserialize, Serialize};

use super::stats::{TopLanguage, TopRepository, YearlyStatistics};
use super::user::UserSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiMode {
    Ai,
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSummarySection {
    pub heading: String,
    pub content: String,
}

/// AI-written (or rule-based fallback) narrative for the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSummary {
    pub mode: AiMode,
    pub intro: String,
    pub sections: Vec<AiSummarySection>,
    /// Why the fallback text was used; None in "ai" mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// GraphQL rateLimit object, captured into the snapshot for budget auditing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitInfo {
    pub limit: u32,
    pub cost: u32,
    pub remaining: u32,
    pub reset_at: String,
}

/// Everything the renderers need, assembled once per run.
#[derive(Debug, Clone)]
pub struct ReportModel {
    pub profile: UserSummary,
    pub year: i32,
    pub stats: YearlyStatistics,
    pub issues_count: u32,
    pub top_repos: Vec<TopRepository>,
    pub top_languages: Vec<TopLanguage>,
    pub ai_summary: AiSummary,
}

/// Write-once JSON snapshot of a report run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub generated_at: String,
    pub year: i32,
    pub timezone: String,
    pub username: String,
    pub ai_mode: AiMode,
    pub ai_reason: Option<String>,
    pub rate_limit: Option<RateLimitInfo>,
    pub stats: YearlyStatistics,
    pub issues_count: u32,
    pub top_repos: Vec<TopRepository>,
    pub top_languages: Vec<TopLanguage>,
    pub ai_summary: AiSummary,
}
