//! steer HTTP server
//!
//! Issues per-user URLs, stores each user's string conditions and validates
//! candidate strings against them.
//!
//! Usage:
//!   steer-server --port 8001 --store redis
//!
//! All options can also be set through the environment; see `--help`.

use std::sync::Arc;
use anyhow::{Context, Result};
use clap::Parser;
use steer_server::{build_router, cors_layer, AppState, ConditionService, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    let default_level = if config.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    info!("steer server starting...");
    let store = config
        .open_store()
        .await
        .context("failed to open condition store (is Redis running?)")?;
    let reporter = config.reporter().context("failed to build diagnostic reporter")?;
    let base_url = config.base_url()?;

    let service = Arc::new(ConditionService::new(store, reporter, base_url.clone()));
    let state = AppState::new(Arc::clone(&service), config.manifest.clone());
    let app = build_router(state, cors_layer(&config.cors_origins()));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        %addr,
        base_url = %base_url,
        store = service.store_backend(),
        reporter = service.reporter_name(),
        "HTTP API listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("steer server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
