use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::{Error, Result};
use crate::github::queries::{
    GraphQlResponse, ProfileData, SearchData, ISSUE_COUNT_QUERY, YEARLY_PROFILE_QUERY,
};
use crate::models::{ContributionCalendar, RateLimitInfo, RepositoryContribution, UserSummary};

const GRAPHQL_URL: &str = "https://api.github.com/graphql";

pub struct GitHubClient {
    client: Client,
    graphql_url: String,
}

/// Everything the profile query returns for one user/year.
#[derive(Debug)]
pub struct YearlyProfileData {
    pub user: UserSummary,
    pub calendar: ContributionCalendar,
    pub repo_contributions: Vec<RepositoryContribution>,
    pub rate_limit: Option<RateLimitInfo>,
}

impl GitHubClient {
    pub fn new(token: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("ghrecap/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            graphql_url: GRAPHQL_URL.to_string(),
        })
    }

    pub async fn fetch_yearly_profile_data(
        &self,
        username: &str,
        year: i32,
    ) -> Result<YearlyProfileData> {
        tracing::info!("Fetching contribution data for {} ({})", username, year);

        let variables = json!({
            "login": username,
            "from": format!("{year}-01-01T00:00:00Z"),
            "to": format!("{year}-12-31T23:59:59Z"),
        });

        let data: ProfileData = self.post_graphql(YEARLY_PROFILE_QUERY, variables).await?;
        let user = data
            .user
            .ok_or_else(|| Error::UserNotFound(username.to_string()))?;

        let profile = user.profile();
        let collection = user.contributions_collection;

        Ok(YearlyProfileData {
            user: profile,
            calendar: collection.contribution_calendar.into(),
            repo_contributions: collection
                .commit_contributions_by_repository
                .into_iter()
                .map(Into::into)
                .collect(),
            rate_limit: data.rate_limit,
        })
    }

    pub async fn fetch_issue_count(&self, username: &str, year: i32) -> Result<u32> {
        let search = format!("author:{username} is:issue created:{year}-01-01..{year}-12-31");
        tracing::debug!("Counting issues: {}", search);

        let data: SearchData = self
            .post_graphql(ISSUE_COUNT_QUERY, json!({ "query": search }))
            .await?;

        Ok(data.search.issue_count)
    }

    async fn post_graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let response = self
            .client
            .post(&self.graphql_url)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "GraphQL request failed ({}): {}",
                status, body
            )));
        }

        let envelope: GraphQlResponse<T> = response.json().await?;

        if let Some(error) = envelope.errors.first() {
            return Err(Error::GitHubApi(error.message.clone()));
        }

        envelope
            .data
            .ok_or_else(|| Error::GitHubApi("GraphQL response carried no data".to_string()))
    }
}
