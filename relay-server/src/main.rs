//! Threat Relay server binary

use std::net::SocketAddr;

use anyhow::Context;
use threat_relay::{config::Config, create_router, init_tracing, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing_subscriber::fmt().init();
            tracing::error!("Invalid configuration: {}", err);
            return Err(err).context("refusing to start");
        }
    };

    init_tracing(&config);

    tracing::info!("Threat Relay starting...");
    tracing::info!("Alerting API: {}", config.alerts_url());
    tracing::debug!(?config, "Loaded configuration");

    let state = AppState::new(config.clone())
        .context("failed to build HTTP client")?;

    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Threat Relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
