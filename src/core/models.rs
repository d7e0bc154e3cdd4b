use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::errors::SummarizeError;

/// Shortest text, in characters, that will be forwarded to a summarizer.
pub const MIN_TEXT_CHARS: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
}

impl SummarizeRequest {
    /// Decodes a request body.
    ///
    /// A missing or empty `Content-Type` is read as JSON. Any other media type must be
    /// `application/json` or `application/*+json`. Every decode or schema failure
    /// is reported as 422.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizeError::InvalidRequest`] when the body is not a JSON
    /// object with a string `text` field.
    pub fn from_body(content_type: Option<&str>, body: &[u8]) -> Result<Self, SummarizeError> {
        if let Some(content_type) = content_type.filter(|c| !c.trim().is_empty())
            && !is_json_content_type(content_type)
        {
            return Err(SummarizeError::InvalidRequest {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: format!("Expected a JSON object body, got content type '{content_type}'"),
            });
        }
        Ok(serde_json::from_slice(body)?)
    }

    /// Number of characters (Unicode scalar values) in `text`.
    #[must_use]
    pub fn text_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// # Errors
    ///
    /// Returns [`SummarizeError::TextTooShort`] when `text` has fewer than
    /// [`MIN_TEXT_CHARS`] characters. The text is not trimmed first.
    pub fn validate(&self) -> Result<(), SummarizeError> {
        if self.text_chars() < MIN_TEXT_CHARS {
            return Err(SummarizeError::TextTooShort);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    match essence.split_once('/') {
        Some(("application", subtype)) => subtype == "json" || subtype.ends_with("+json"),
        _ => false,
    }
}
