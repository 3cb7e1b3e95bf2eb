use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use tiktok_oauth_service::{
    server, telemetry, AppConfig, AppState, OAuthFlow, SingleSlotStore, TikTokClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = AppConfig::from_env().context("loading configuration")?;
    let client = TikTokClient::from_config(&config).context("building provider client")?;
    let flow = OAuthFlow::new(
        Arc::new(client),
        Arc::new(SingleSlotStore::new()),
        config.scope.clone(),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = server::router(Arc::new(AppState::new(flow, config)));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}
