//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter when enabled
//! - Build the server, which starts extension discovery in the background
//! - Bind the listener
//! - Serve until a termination signal arrives
//!
//! # Design Decisions
//! - Fail fast: bind errors are returned to the caller
//! - A bad metrics address is logged, not fatal

use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Run the server with OS signal handling until it shuts down.
pub async fn run(config: ServerConfig) -> Result<(), StartupError> {
    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());
    run_until(config, shutdown).await
}

/// Run the server until `shutdown` is triggered.
pub async fn run_until(config: ServerConfig, shutdown: Shutdown) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    tracing::info!(
        extensions_root = %config.paths.extensions_root().display(),
        app_root = %config.paths.app_root.display(),
        "Configuration loaded"
    );

    let address = config.bind_address();
    let server = HttpServer::new(config);
    let listener = bind(address).await?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn bind(address: String) -> Result<TcpListener, StartupError> {
    TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })
}
