use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{
    ContributionCalendar, ContributionDay, ContributionLevel, ContributionWeek, RateLimitInfo,
    RepositoryContribution, UserSummary,
};

/// Profile, contribution calendar, per-repository commit contributions and
/// rate-limit budget for one user/year, in a single round trip.
pub const YEARLY_PROFILE_QUERY: &str = r#"
query($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    login
    name
    bio
    avatarUrl
    followers { totalCount }
    following { totalCount }
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
            contributionLevel
          }
        }
      }
      commitContributionsByRepository(maxRepositories: 100) {
        repository {
          nameWithOwner
          url
          description
          stargazerCount
          forkCount
          languages(first: 10, orderBy: { field: SIZE, direction: DESC }) {
            edges {
              size
              node { name }
            }
          }
        }
        contributions { totalCount }
      }
    }
  }
  rateLimit {
    limit
    cost
    remaining
    resetAt
  }
}
"#;

pub const ISSUE_COUNT_QUERY: &str = r#"
query($query: String!) {
  search(query: $query, type: ISSUE, first: 1) {
    issueCount
  }
}
"#;

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub user: Option<RawUser>,
    pub rate_limit: Option<RateLimitInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: String,
    pub followers: CountNode,
    pub following: CountNode,
    pub contributions_collection: RawContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountNode {
    pub total_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContributionsCollection {
    pub contribution_calendar: RawCalendar,
    #[serde(default)]
    pub commit_contributions_by_repository: Vec<RawRepositoryContribution>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCalendar {
    pub total_contributions: u32,
    pub weeks: Vec<RawWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWeek {
    pub contribution_days: Vec<RawDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDay {
    pub date: NaiveDate,
    pub contribution_count: u32,
    pub contribution_level: ContributionLevel,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRepositoryContribution {
    pub repository: RawRepository,
    pub contributions: CountNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRepository {
    pub name_with_owner: String,
    pub url: String,
    pub description: Option<String>,
    pub stargazer_count: u32,
    pub fork_count: u32,
    pub languages: Option<RawLanguages>,
}

#[derive(Debug, Deserialize)]
pub struct RawLanguages {
    #[serde(default)]
    pub edges: Vec<RawLanguageEdge>,
}

#[derive(Debug, Deserialize)]
pub struct RawLanguageEdge {
    pub size: u64,
    pub node: RawLanguageNode,
}

#[derive(Debug, Deserialize)]
pub struct RawLanguageNode {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchData {
    pub search: SearchResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub issue_count: u32,
}

impl From<RawCalendar> for ContributionCalendar {
    fn from(raw: RawCalendar) -> Self {
        Self {
            total_contributions: raw.total_contributions,
            weeks: raw
                .weeks
                .into_iter()
                .map(|week| ContributionWeek {
                    days: week
                        .contribution_days
                        .into_iter()
                        .map(|day| ContributionDay {
                            date: day.date,
                            count: day.contribution_count,
                            level: day.contribution_level,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl From<RawRepositoryContribution> for RepositoryContribution {
    fn from(raw: RawRepositoryContribution) -> Self {
        Self {
            name_with_owner: raw.repository.name_with_owner,
            url: raw.repository.url,
            description: raw.repository.description,
            stars: raw.repository.stargazer_count,
            forks: raw.repository.fork_count,
            commits: raw.contributions.total_count,
            languages: raw
                .repository
                .languages
                .map(|languages| {
                    languages
                        .edges
                        .into_iter()
                        .map(|edge| (edge.node.name, edge.size))
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

impl RawUser {
    pub fn profile(&self) -> UserSummary {
        UserSummary {
            login: self.login.clone(),
            name: self.name.clone(),
            bio: self.bio.clone(),
            avatar_url: self.avatar_url.clone(),
            followers: self.followers.total_count,
            following: self.following.total_count,
        }
    }
}
