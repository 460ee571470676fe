use std::sync::Arc;

use playcall::{config::ServerConfig, router, AppState, WorkersAiClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = ServerConfig::resolve()?;
    let client = WorkersAiClient::new(
        &cfg.ai_base_url,
        &cfg.account_id,
        &cfg.api_token,
        cfg.request_timeout(),
    )?;
    tracing::info!("inference via {} (timeout {}s)", cfg.ai_base_url, cfg.request_timeout_s);

    let app = router(AppState::new(Arc::new(client)));

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
