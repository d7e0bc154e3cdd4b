use summarize_service::{ai, api, core::config::AppConfig};
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    summarize_service::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        anyhow::anyhow!(e)
    })?;

    let summarizer = ai::from_config(&config)?;
    api::serve(&config, summarizer).await
}
