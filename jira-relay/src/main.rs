//! Jira relay web server.
//!
//! This binary:
//! - Receives Jira webhooks on `POST /api/jira`
//! - Forwards issue status transitions to a Feishu bot as cards
//! - Answers Jira once the card has been delivered (or failed to be)

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jira_relay::web::JIRA_WEBHOOK_PATH;
use jira_relay::{router, AppState, Config, FeishuNotifier};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("relay_starting");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        port = config.port,
        port_defaulted = config.port_defaulted,
        feishu_host = config.feishu_webhook_url.host_str().unwrap_or_default(),
        "config_loaded"
    );

    let notifier = FeishuNotifier::new(config.feishu_webhook_url.clone())?;
    let state = AppState::new(notifier);
    let app = router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, path = JIRA_WEBHOOK_PATH, "relay_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("relay_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("relay_shutting_down");
}
