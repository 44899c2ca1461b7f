pub mod fallback;
pub mod openai;
pub mod provider;

pub use openai::OpenAiProvider;
pub use provider::{SummaryProvider, SummaryRequest, SummaryText};

use crate::models::{AiMode, AiSummary};

/// Runs the provider and falls back to the rule-based summary on any error,
/// so a report is always produced. `provider` is None when the AI call is
/// disabled or no API key is configured.
pub async fn generate_summary(
    provider: Option<&dyn SummaryProvider>,
    request: &SummaryRequest<'_>,
) -> AiSummary {
    let Some(provider) = provider else {
        return fallback_summary(
            request,
            "AI is disabled or OPENAI_API_KEY is missing".to_string(),
        );
    };

    match provider.summarize(request).await {
        Ok(text) => {
            tracing::info!("AI summary generated by {}", provider.name());
            AiSummary {
                mode: AiMode::Ai,
                intro: text.intro,
                sections: text.sections,
                reason: None,
            }
        }
        Err(error) => {
            tracing::warn!("AI summary failed, using fallback: {}", error);
            fallback_summary(request, error.to_string())
        }
    }
}

fn fallback_summary(request: &SummaryRequest<'_>, reason: String) -> AiSummary {
    let text = fallback::build_fallback_summary(request);

    AiSummary {
        mode: AiMode::Fallback,
        intro: text.intro,
        sections: text.sections,
        reason: Some(reason),
    }
}
