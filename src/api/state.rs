use std::sync::Arc;
use std::time::Duration;

use crate::ai::Summarizer;
use crate::core::config::{AppConfig, DEFAULT_SUMMARIZE_TIMEOUT_SECS};

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub summarizer: Arc<dyn Summarizer>,
    pub summarize_timeout: Duration,
}

impl AppState {
    pub fn new(summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            summarizer,
            summarize_timeout: Duration::from_secs(DEFAULT_SUMMARIZE_TIMEOUT_SECS),
        }
    }

    pub fn from_config(config: &AppConfig, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            summarizer,
            summarize_timeout: config.summarize_timeout,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.summarize_timeout = timeout;
        self
    }
}
