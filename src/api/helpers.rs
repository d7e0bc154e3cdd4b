//! Common response builders for API handlers.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use crate::core::models::ErrorBody;
use crate::errors::SummarizeError;

/// Returns an error response with the given status code and `detail` message.
#[must_use]
pub fn err_response(status: StatusCode, detail: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            detail: detail.to_string(),
        }),
    )
        .into_response()
}

impl IntoResponse for SummarizeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Summarization failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Rejected summarize request");
        }
        err_response(status, &self.detail())
    }
}
