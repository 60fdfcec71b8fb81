//! BetStats Odds Service - Entry Point
//!
//! Initializes configuration, logging and the odds board, then serves
//! the odds API and pages until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml (optional) + ODDS_API_KEY / ODDS_API_BASE
//! 2. Init tracing (JSON structured logging)
//! 3. Create Prometheus registry
//! 4. Create OddsApiClient (implements OddsProvider port)
//! 5. Create OddsBoard use case
//! 6. Spawn metrics server on :9090
//! 7. Spawn HTTP server (/api/odds, /, /history, /live, /ready)
//! 8. Wait for SIGINT → graceful shutdown

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use betstats_odds::adapters::api::OddsApiClient;
use betstats_odds::adapters::http::{AppState, HttpServer};
use betstats_odds::adapters::metrics::{HealthState, MetricsRegistry};
use betstats_odds::config;
use betstats_odds::usecases::OddsBoard;

/// Environment variable naming the config file.
const ENV_CONFIG_PATH: &str = "BETSTATS_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let config_path =
        std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| "config.toml".to_string());
    let config = config::loader::load_or_default(&config_path)
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.server.log_level)
                }),
        )
        .json()
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        bind = %config.server.bind_address,
        provider = %config.provider.base_url,
        sport = %config.provider.sport,
        "Starting BetStats odds service"
    );

    if config.provider.api_key().is_none() {
        warn!("ODDS_API_KEY not set, every odds request will fail until it is");
    }

    // ── 3. Shutdown channel + metrics ───────────────────────
    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);
    let metrics = Arc::new(MetricsRegistry::new().context("Failed to create metrics")?);

    // ── 4. Odds provider client ─────────────────────────────
    let client = OddsApiClient::new(config.provider.clone())
        .context("Failed to create odds provider client")?
        .with_metrics(Arc::clone(&metrics));

    // ── 5. Odds board use case ──────────────────────────────
    let board = Arc::new(
        OddsBoard::new(Arc::new(client), &config.provider).with_metrics(Arc::clone(&metrics)),
    );

    // ── 6. Metrics server ───────────────────────────────────
    let metrics_handle = if config.metrics.enabled {
        let metrics_shutdown = shutdown_tx.subscribe();
        let bind = config.metrics.bind_address.clone();
        let registry = Arc::clone(&metrics);
        Some(tokio::spawn(async move {
            if let Err(e) = registry.serve(bind, metrics_shutdown).await {
                error!(error = %e, "Metrics server failed");
            }
        }))
    } else {
        None
    };

    // ── 7. HTTP server ──────────────────────────────────────
    let state = AppState {
        board,
        health: Arc::new(HealthState::new()),
    };
    let server = HttpServer::new(state, config.server.bind_address.clone());
    let server_shutdown = shutdown_tx.subscribe();
    let mut server_handle = tokio::spawn(async move { server.run(server_shutdown).await });

    // ── 8. Wait for SIGINT or server exit ───────────────────
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("SIGINT received, initiating graceful shutdown");
        }
        result = &mut server_handle => {
            // Server stopped on its own (bind failure etc.); tear down the rest.
            let _ = shutdown_tx.send(());
            if let Some(handle) = &metrics_handle {
                handle.abort();
            }
            return match result {
                Ok(inner) => inner.context("Odds server failed"),
                Err(e) => Err(e).context("Odds server task panicked"),
            };
        }
    }

    let _ = shutdown_tx.send(());
    info!("Shutdown signal broadcast to all tasks");

    // Let in-flight requests finish (up to 10s).
    match tokio::time::timeout(std::time::Duration::from_secs(10), server_handle).await {
        Ok(Ok(Err(e))) => warn!(error = %e, "Odds server exited with error"),
        Ok(Err(e)) => warn!(error = %e, "Odds server task failed"),
        Err(_) => warn!("Odds server did not drain within 10s"),
        Ok(Ok(Ok(()))) => {}
    }

    if let Some(handle) = metrics_handle {
        let _ = tokio::time::timeout(std::time::Duration::from_secs(2), handle).await;
    }

    info!("Shutdown complete");
    Ok(())
}
