use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Canonical failure message shown to callers when summarization fails server-side.
pub const CANONICAL_FAILURE_MESSAGE: &str =
    "Sorry, I couldn't generate a summary at this time. Please try again later.";

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("Text too short to summarize")]
    TextTooShort,

    #[error("Text too long to summarize")]
    TextTooLong,

    #[error("Invalid request: {message}")]
    InvalidRequest { status: StatusCode, message: String },

    #[error("OpenAI API returned status {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    #[error("Failed to access OpenAI API: {0}")]
    OpenAIError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Summarizer did not respond within {0:?}")]
    Timeout(Duration),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl SummarizeError {
    /// HTTP status reported to the caller for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            SummarizeError::TextTooShort => StatusCode::BAD_REQUEST,
            SummarizeError::TextTooLong => StatusCode::PAYLOAD_TOO_LARGE,
            SummarizeError::InvalidRequest { status, .. } => *status,
            SummarizeError::UpstreamStatus { .. }
            | SummarizeError::OpenAIError(_)
            | SummarizeError::HttpError(_) => StatusCode::BAD_GATEWAY,
            SummarizeError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            SummarizeError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `detail` field of the error body.
    ///
    /// Client errors echo their own message. Server-side failures return a fixed
    /// message so upstream details never leak to callers.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            SummarizeError::TextTooShort | SummarizeError::TextTooLong => self.to_string(),
            SummarizeError::InvalidRequest { message, .. } => message.clone(),
            SummarizeError::Timeout(_) => "Summarization timed out".to_string(),
            SummarizeError::UpstreamStatus { .. }
            | SummarizeError::OpenAIError(_)
            | SummarizeError::HttpError(_)
            | SummarizeError::ConfigError(_) => CANONICAL_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Whether a retry of the same upstream call could succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            SummarizeError::UpstreamStatus { status, .. } => *status == 429 || *status >= 500,
            SummarizeError::HttpError(_) => true,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for SummarizeError {
    fn from(error: reqwest::Error) -> Self {
        SummarizeError::HttpError(error.to_string())
    }
}

impl From<BytesRejection> for SummarizeError {
    fn from(rejection: BytesRejection) -> Self {
        SummarizeError::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<serde_json::Error> for SummarizeError {
    fn from(error: serde_json::Error) -> Self {
        let message = if error.is_data() {
            format!("Failed to deserialize the JSON body into the target type: {error}")
        } else {
            format!("Failed to parse the request body as JSON: {error}")
        };
        SummarizeError::InvalidRequest {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message,
        }
    }
}
