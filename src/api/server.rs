//! Router assembly and the listening loop.

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::state::AppState;
use super::{handler, health};
use crate::ai::Summarizer;
use crate::core::config::{AppConfig, DEFAULT_MAX_BODY_BYTES};

/// Builds the router with the default body limit.
pub fn create_router(state: AppState) -> Router {
    create_router_with_limit(state, DEFAULT_MAX_BODY_BYTES)
}

pub fn create_router_with_limit(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/summarize", post(handler::summarize))
        .route("/health", get(health::health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the API on `config.bind_addr` until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(config: &AppConfig, summarizer: Arc<dyn Summarizer>) -> Result<()> {
    let backend = summarizer.name();
    let state = AppState::from_config(config, summarizer);
    let app = create_router_with_limit(state, config.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %listener.local_addr()?, backend, "Summarize API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Summarize API stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
