use std::sync::Arc;

use anyhow::Context;
use craneiq_backend::{config::RelayConfig, routes, state::AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = RelayConfig::from_env();
    let state = Arc::new(AppState::new(config.upstream.clone()));

    let app = routes::create_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!("🚀 MAXIM AI with Groq Started!");
    info!("💬 Ready for questions on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
