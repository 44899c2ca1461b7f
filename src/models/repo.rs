use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A repository the user committed to during the report year, with the
/// language byte sizes GitHub attributes to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryContribution {
    pub name_with_owner: String,
    pub url: String,
    pub description: Option<String>,
    pub stars: u32,
    pub forks: u32,
    pub commits: u32,
    pub languages: BTreeMap<String, u64>,
}
