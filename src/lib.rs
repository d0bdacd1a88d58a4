//! # Barcode Worker
//!
//! An EAN-13 barcode service for inventory and retail systems:
//!
//! - **Generation**: fresh 13-digit codes built from a 3-digit prefix, the
//!   current clock and a random draw, closed by the EAN-13 check digit
//! - **Validation**: length, digit and check digit checks, with a reason for
//!   every rejected code
//!
//! The codec in [`service::ean13`] is pure and usable on its own; the rest of
//! the crate wraps it in an HTTP worker.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Worker Service                       │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌─────────────┐  ┌──────────────────┐  │
//! │  │  API Layer  │  │   Service   │  │   EAN-13 codec   │  │
//! │  │   (Axum)    │→ │    Layer    │→ │  (pure, no I/O)  │  │
//! │  └─────────────┘  └─────────────┘  └──────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use barcode_worker::service::ean13;
//!
//! let code = ean13::generate("789").unwrap();
//! assert_eq!(code.len(), 13);
//! assert!(ean13::validate(&code));
//! assert!(ean13::validate("4006381333931"));
//! assert!(!ean13::validate("4006381333930"));
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::api::create_router;
use crate::api::state::AppState;
use crate::config::AppConfig;

/// Run the barcode worker service.
///
/// This function:
/// 1. Loads configuration from files and environment
/// 2. Initializes logging
/// 3. Builds the Tokio runtime with the configured worker count
/// 4. Serves HTTP until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded
/// - The runtime or metrics recorder cannot be created
/// - HTTP server fails to bind
pub fn run() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    init_logging(&config);

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    if config.server.workers > 0 {
        builder.worker_threads(config.server.workers);
    }
    let runtime = builder.enable_all().build()?;

    runtime.block_on(serve(config))
}

/// Serve the HTTP API with an already loaded configuration.
///
/// # Errors
///
/// Returns an error if the metrics recorder cannot be installed or the
/// server fails to bind.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        prefix = %config.barcode.default_prefix,
        policy = %config.barcode.prefix_policy,
        "Starting Barcode Worker"
    );

    let addr = SocketAddr::new(config.server.host, config.server.port);
    let metrics_enabled = config.observability.metrics_enabled;

    let mut state = AppState::new(Arc::new(config));
    if metrics_enabled {
        let handle = PrometheusBuilder::new().install_recorder()?;
        state = state.with_metrics(handle);
        info!("Prometheus recorder installed");
    }

    let app = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize logging based on configuration.
fn init_logging(config: &AppConfig) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.observability.log_format == "json" {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber.with(fmt::layer()).init();
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
