//! Summarize Service - an HTTP endpoint that turns a block of text into a short summary.
//!
//! The crate exposes a single route, `POST /summarize`, which accepts
//! `{ "text": "..." }` and answers `{ "summary": "..." }`. Texts shorter than
//! 50 characters are rejected with a 400 before any summarizer is called.
//!
//! # Architecture
//!
//! The system uses:
//! - axum for the HTTP surface
//! - a pluggable [`Summarizer`] trait for the summarization capability
//! - the `OpenAI` Responses API (via reqwest) or a local lead-sentence extractor
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use summarize_service::{LeadSummarizer, api::{AppState, create_router}};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Set up structured logging
//!     summarize_service::setup_logging();
//!
//!     let state = AppState::new(Arc::new(LeadSummarizer::new(3)));
//!     let app = create_router(state);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod errors;

pub use ai::{LeadSummarizer, LlmClient, Summarizer, estimate_tokens};
pub use errors::SummarizeError;

/// Configure structured logging with JSON output.
///
/// Uses `RUST_LOG` for filtering and falls back to `info`. Calling it more
/// than once is harmless; only the first call installs the subscriber.
///
/// # Example
///
/// ```
/// summarize_service::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
