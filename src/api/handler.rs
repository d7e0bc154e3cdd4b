//! `POST /summarize` handler.
//!
//! Validates the request body and the minimum text length, then delegates to
//! the configured [`Summarizer`](crate::ai::Summarizer). The summarizer is never
//! called for a rejected request.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderMap, header};
use tracing::info;
use uuid::Uuid;

use super::state::AppState;
use crate::core::models::{SummarizeRequest, SummarizeResponse};
use crate::errors::SummarizeError;

/// # Errors
///
/// Returns a client error for a malformed body or a text shorter than
/// [`MIN_TEXT_CHARS`](crate::core::models::MIN_TEXT_CHARS), and a server error
/// when the summarizer fails or exceeds the configured timeout.
#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn summarize(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SummarizeResponse>, SummarizeError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap_or("invalid"));
    let request = SummarizeRequest::from_body(content_type, &body?)?;

    let text_chars = request.text_chars();
    info!(text_chars, "Summarize request received");

    #[cfg(feature = "debug-logs")]
    info!("Request text:\n{}", request.text);

    request.validate()?;

    let summarizer = state.summarizer.as_ref();
    let summary = tokio::time::timeout(
        state.summarize_timeout,
        summarizer.summarize(&request.text),
    )
    .await
    .map_err(|_| SummarizeError::Timeout(state.summarize_timeout))??;

    info!(
        backend = summarizer.name(),
        summary_chars = summary.chars().count(),
        "Summary generated"
    );

    Ok(Json(SummarizeResponse { summary }))
}
