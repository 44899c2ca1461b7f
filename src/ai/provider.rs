use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AiSummarySection, TopLanguage, TopRepository, YearlyStatistics};

/// Inputs a provider may draw on when writing the summary.
#[derive(Debug, Clone, Copy)]
pub struct SummaryRequest<'a> {
    pub username: &'a str,
    pub year: i32,
    pub stats: &'a YearlyStatistics,
    pub issues_count: u32,
    pub top_languages: &'a [TopLanguage],
    pub top_repos: &'a [TopRepository],
}

/// Narrative text before fallback handling wraps it into an `AiSummary`.
#[derive(Debug, Clone)]
pub struct SummaryText {
    pub intro: String,
    pub sections: Vec<AiSummarySection>,
}

#[async_trait]
pub trait SummaryProvider: Send + Sync {
    async fn summarize(&self, request: &SummaryRequest<'_>) -> Result<SummaryText>;
    fn name(&self) -> &str;
}
