//! riskgate-server — risk scoring over HTTP.
//!
//! Serves `POST /api/risk/assess`, scoring a login or transaction attempt
//! against the caller's trusted location, mouse heuristic, device flag and
//! network address, and `GET /api/status` describing the active policy.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use riskgate_engine::RiskAggregator;
use tracing::{info, warn};

mod config;
mod routes;

use config::Args;

/// Shared application state passed to every Axum handler.
#[derive(Clone)]
pub struct AppState {
    /// Scoring engine with its profile store and reputation source.
    pub aggregator: Arc<RiskAggregator>,
    /// Whether X-Forwarded-For / X-Real-IP override the TCP peer address.
    pub trust_forwarded_for: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Args::parse()
        .into_config()
        .context("Failed to load server configuration")?;

    init_logging(&config.log_level, &config.log_format);

    let aggregator = config.build_aggregator();
    let policy = aggregator.policy();

    info!(
        bind = %config.bind_addr,
        scheme = %policy.scheme,
        allow_below = policy.thresholds.allow_below,
        deny_at_or_above = policy.thresholds.deny_at_or_above,
        profiles = aggregator.profiles().len(),
        denylist = aggregator.reputation().entry_count().unwrap_or(0),
        "Starting riskgate-server v{}",
        env!("CARGO_PKG_VERSION")
    );
    if config.trust_forwarded_for {
        warn!("Trusting X-Forwarded-For; run only behind a proxy that overwrites it");
    }

    let state = AppState {
        aggregator: Arc::new(aggregator),
        trust_forwarded_for: config.trust_forwarded_for,
    };
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!("Listening on http://{}", config.bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("HTTP server error")?;

    info!("riskgate-server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, shutting down..."),
        Err(e) => {
            warn!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    }
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Pass `format = "json"` for structured JSON output. Any other value
/// defaults to human-readable text. `RUST_LOG` takes precedence over `level_str`.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true))
            .init();
    }
}
