use crate::error::{Error, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: String,
    pub username: Option<String>,
    pub time_zone: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let github_token = env::var("GH_STATS_TOKEN")
            .map_err(|_| Error::Config("GH_STATS_TOKEN environment variable not set".to_string()))?;

        let username = env::var("GH_USERNAME").ok().filter(|v| !v.is_empty());

        let time_zone = env::var("REPORT_TZ").unwrap_or_else(|_| "Asia/Shanghai".to_string());

        let openai_api_key = env::var("OPENAI_API_KEY").ok().filter(|v| !v.is_empty());

        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let openai_model = env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        Ok(Self {
            github_token,
            username,
            time_zone,
            openai_api_key,
            openai_base_url,
            openai_model,
        })
    }
}
