//! All summarization backends

pub mod client;
pub mod lead;
pub mod prompt_builder;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::core::config::{AppConfig, SummarizerBackend};
use crate::errors::SummarizeError;

// Re-export main types for convenience
pub use client::{LlmClient, estimate_tokens};
pub use lead::LeadSummarizer;

/// A capability that reduces text to a shorter representative string.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// # Errors
    ///
    /// Returns an error when the backend cannot produce a summary.
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError>;

    /// Short backend name used in logs.
    fn name(&self) -> &'static str;
}

/// Builds the summarizer selected by `config.backend`.
///
/// # Errors
///
/// Returns [`SummarizeError::ConfigError`] when the OpenAI backend is selected
/// without an API key, or when its HTTP client cannot be constructed.
pub fn from_config(config: &AppConfig) -> Result<Arc<dyn Summarizer>, SummarizeError> {
    match config.backend {
        SummarizerBackend::OpenAi => {
            let api_key = config.openai_api_key.clone().ok_or_else(|| {
                SummarizeError::ConfigError("OPENAI_API_KEY is not set".to_string())
            })?;
            let client = LlmClient::new(
                api_key,
                config.openai_org_id.clone(),
                config.openai_model.clone(),
            )?
            .with_base_url(&config.openai_base_url)
            .with_max_retries(config.openai_max_retries);
            info!(model = %config.openai_model, "Using OpenAI summarizer");
            Ok(Arc::new(client))
        }
        SummarizerBackend::Lead => {
            info!(
                sentences = config.summary_sentences,
                "Using lead-sentence summarizer"
            );
            Ok(Arc::new(LeadSummarizer::new(config.summary_sentences)))
        }
    }
}
