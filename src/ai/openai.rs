use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::ai::provider::{SummaryProvider, SummaryRequest, SummaryText};
use crate::error::{Error, Result};
use crate::models::AiSummarySection;

const SYSTEM_PROMPT: &str = "You are a GitHub annual report analyst. Using the \
provided data, write a restrained, professional and concise English summary. \
Respond with JSON shaped exactly as \
{\"intro\": string, \"sections\": [{\"heading\": string, \"content\": string}]} \
with exactly 3 sections.";

/// Summary provider for any OpenAI-compatible chat completions endpoint.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ParsedSummary {
    intro: String,
    sections: Vec<AiSummarySection>,
}

impl OpenAiProvider {
    pub fn new(api_key: String, base_url: &str, model: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(20))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    fn prompt_data(request: &SummaryRequest<'_>) -> serde_json::Value {
        let stats = request.stats;

        let top_languages = request
            .top_languages
            .iter()
            .take(3)
            .enumerate()
            .map(|(idx, item)| format!("#{} {}", idx + 1, item.language))
            .collect::<Vec<_>>()
            .join(", ");

        let top_repos = request
            .top_repos
            .iter()
            .take(3)
            .map(|repo| format!("{}({})", repo.name_with_owner, repo.commits))
            .collect::<Vec<_>>()
            .join(", ");

        json!({
            "username": request.username,
            "year": request.year,
            "totalContributions": stats.total_contributions,
            "averagePerDay": stats.average_contributions_per_day,
            "longestStreak": stats.longest_streak,
            "longestGap": stats.longest_gap,
            "mostActiveMonth": stats.max_contributions_month,
            "maxContributionsDay": stats.max_contributions_in_a_day,
            "maxContributionsDate": stats.max_contributions_date,
            "issuesCount": request.issues_count,
            "topLanguages": top_languages,
            "topRepos": top_repos,
        })
    }
}

#[async_trait]
impl SummaryProvider for OpenAiProvider {
    async fn summarize(&self, request: &SummaryRequest<'_>) -> Result<SummaryText> {
        let endpoint = format!("{}/chat/completions", self.base_url);
        let prompt_data = Self::prompt_data(request);

        let body = json!({
            "model": self.model,
            "temperature": 0.3,
            "response_format": { "type": "json_object" },
            "messages": [
                ChatMessage { role: "system", content: SYSTEM_PROMPT.to_string() },
                ChatMessage {
                    role: "user",
                    content: format!("Analyze this data and respond with JSON: {prompt_data}"),
                },
            ],
        });

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::AiApi(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::AiApi(format!(
                "Chat completion failed ({}): {}",
                status, body
            )));
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::AiApi(format!("Failed to parse response: {}", e)))?;

        let content = payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| Error::AiApi("Empty completion content".to_string()))?;

        let parsed: ParsedSummary = serde_json::from_str(&content)
            .map_err(|e| Error::ParseError(format!("Summary JSON invalid: {}", e)))?;

        if parsed.intro.is_empty() || parsed.sections.is_empty() {
            return Err(Error::ParseError(
                "Summary is missing intro or sections".to_string(),
            ));
        }

        let mut sections = parsed.sections;
        sections.truncate(3);

        Ok(SummaryText {
            intro: parsed.intro,
            sections,
        })
    }

    fn name(&self) -> &str {
        "OpenAI"
    }
}
