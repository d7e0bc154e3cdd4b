//! LLM (`OpenAI`) API client module
//!
//! Encapsulates the `OpenAI` Responses API call used to generate summaries.

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Value, json};
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{info, warn};

use super::Summarizer;
use super::prompt_builder::build_prompt;
use crate::core::config::{DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MAX_RETRIES};
use crate::errors::SummarizeError;

const MAX_CONTEXT_TOKENS: usize = 400_000;
const MAX_OUTPUT_TOKENS: usize = 100_000;
const TOKEN_BUFFER: usize = 250;
const MIN_OUTPUT_TOKENS: usize = 500;
const HTTP_TIMEOUT: Duration = Duration::from_secs(300);

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// Output token budget left for a prompt, capped at the model maximum.
#[must_use]
pub fn max_output_tokens_for(prompt: &[ChatCompletionMessage]) -> usize {
    let estimated_input_tokens = prompt
        .iter()
        .map(|msg| match &msg.content {
            Content::Text(text) => estimate_tokens(text),
            _ => 0,
        })
        .sum::<usize>();

    info!("Estimated input tokens: {}", estimated_input_tokens);

    // Use saturating math to avoid underflow when input exceeds context
    MAX_CONTEXT_TOKENS
        .saturating_sub(estimated_input_tokens)
        .saturating_sub(TOKEN_BUFFER)
        .min(MAX_OUTPUT_TOKENS)
}

/// LLM API client for generating summaries
pub struct LlmClient {
    api_key: String,
    org_id: Option<String>,
    model_name: String,
    base_url: String,
    max_retries: usize,
    http: Client,
}

impl LlmClient {
    /// # Errors
    ///
    /// Returns [`SummarizeError::ConfigError`] if the HTTP client cannot be built.
    pub fn new(
        api_key: String,
        org_id: Option<String>,
        model_name: String,
    ) -> Result<Self, SummarizeError> {
        let http = Client::builder().timeout(HTTP_TIMEOUT).build().map_err(|e| {
            SummarizeError::ConfigError(format!("Failed to build OpenAI HTTP client: {e}"))
        })?;

        Ok(Self {
            api_key,
            org_id,
            model_name,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            max_retries: DEFAULT_OPENAI_MAX_RETRIES,
            http,
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn headers(&self) -> Result<HeaderMap, SummarizeError> {
        let mut headers = HeaderMap::new();
        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|e| SummarizeError::ConfigError(format!("Invalid Authorization header: {e}")))?;
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(org) = &self.org_id {
            let org_value = HeaderValue::from_str(org).map_err(|e| {
                SummarizeError::ConfigError(format!("Invalid OpenAI-Organization header: {e}"))
            })?;
            headers.insert("openai-organization", org_value);
        }

        Ok(headers)
    }

    /// # Errors
    ///
    /// Returns [`SummarizeError::TextTooLong`] when the prompt leaves too little
    /// room for output, or an upstream error if the request fails after retries
    /// or the response has no text.
    pub async fn generate_summary(
        &self,
        prompt: Vec<ChatCompletionMessage>,
    ) -> Result<String, SummarizeError> {
        #[cfg(feature = "debug-logs")]
        info!("Using summarization prompt:\n{:?}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            "Generating summary with {} messages in prompt",
            prompt.len()
        );

        let max_output_tokens = max_output_tokens_for(&prompt);
        info!("Calculated max output tokens: {}", max_output_tokens);

        if max_output_tokens < MIN_OUTPUT_TOKENS {
            warn!("Input too large for the model context window");
            return Err(SummarizeError::TextTooLong);
        }

        let request_body = json!({
            "model": self.model_name,
            "input": build_responses_input_from_prompt(&prompt),
            "max_output_tokens": max_output_tokens
        });
        let headers = self.headers()?;
        let url = format!("{}/responses", self.base_url);

        let strategy = ExponentialBackoff::from_millis(2)
            .factor(100)
            .max_delay(Duration::from_secs(5))
            .map(jitter)
            .take(self.max_retries);

        RetryIf::start(
            strategy,
            || self.send_once(&url, &headers, &request_body),
            |e: &SummarizeError| {
                let retry = e.is_transient();
                if retry {
                    warn!(error = %e, "Transient OpenAI failure, retrying");
                }
                retry
            },
        )
        .await
    }

    async fn send_once(
        &self,
        url: &str,
        headers: &HeaderMap,
        request_body: &Value,
    ) -> Result<String, SummarizeError> {
        let response = self
            .http
            .post(url)
            .headers(headers.clone())
            .json(request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response body: {e}"));
            return Err(SummarizeError::UpstreamStatus {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let response_json: Value = response.json().await.map_err(|e| {
            SummarizeError::OpenAIError(format!("Failed to parse OpenAI response: {e}"))
        })?;

        extract_output_text(&response_json)
            .ok_or_else(|| SummarizeError::OpenAIError("No text in response".to_string()))
    }
}

#[async_trait]
impl Summarizer for LlmClient {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        self.generate_summary(build_prompt(text)).await
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

/// Converts chat messages into the Responses API `input` array.
///
/// Assistant turns are dropped; every other role is sent as `system` or `user`
/// with typed `input_text` parts.
pub(crate) fn build_responses_input_from_prompt(prompt: &[ChatCompletionMessage]) -> Vec<Value> {
    prompt
        .iter()
        .filter(|m| !matches!(m.role, MessageRole::assistant))
        .map(|m| {
            let role_str = match m.role {
                MessageRole::system => "system",
                MessageRole::user | MessageRole::function | MessageRole::tool => "user",
                MessageRole::assistant => "assistant",
            };

            let mut parts: Vec<Value> = Vec::new();
            if let Content::Text(t) = &m.content {
                parts.push(json!({
                    "type": "input_text",
                    "text": t
                }));
            }

            json!({
                "role": role_str,
                "content": parts
            })
        })
        .collect()
}

/// Pulls the generated text out of a Responses API payload.
///
/// Prefers the top-level `output_text`; otherwise joins every `output_text`
/// part found under `output[].content[]`.
pub(crate) fn extract_output_text(response_json: &Value) -> Option<String> {
    if let Some(text) = response_json.get("output_text").and_then(Value::as_str) {
        return Some(text.to_string());
    }

    let collected: Vec<String> = response_json
        .get("output")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter(|p| {
            p.get("type")
                .and_then(Value::as_str)
                .is_some_and(|t| t == "output_text")
        })
        .filter_map(|p| {
            let text = p.get("text")?;
            text.as_str()
                .or_else(|| text.get("value").and_then(Value::as_str))
                .map(str::to_string)
        })
        .collect();

    if collected.is_empty() {
        None
    } else {
        Some(collected.join("\n"))
    }
}
