//! Prometheus Metrics Registry - Odds Service Observability
//!
//! Registers and exposes Prometheus metrics on :9090. Covers odds
//! board requests by outcome, provider latency, ranked game counts
//! and the provider's remaining request quota.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use prometheus::{
    Encoder, Gauge, Histogram, HistogramOpts, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};
use tokio::sync::broadcast;
use tracing::{info, instrument, warn};

/// Centralized Prometheus metrics for the odds service.
///
/// All metrics follow the naming convention `betstats_*`.
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
    /// Odds board requests by outcome (`ok` or an error kind).
    pub odds_requests: IntCounterVec,
    /// Provider round-trip latency in seconds.
    pub provider_latency_seconds: Histogram,
    /// Games returned by the last successful ranking.
    pub games_ranked: IntGauge,
    /// Provider quota left, from `x-requests-remaining`.
    pub provider_requests_remaining: Gauge,
    /// Provider quota used, from `x-requests-used`.
    pub provider_requests_used: Gauge,
}

impl MetricsRegistry {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let odds_requests = IntCounterVec::new(
            Opts::new(
                "betstats_odds_requests_total",
                "Odds board requests by outcome",
            ),
            &["outcome"],
        )?;

        let provider_latency_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "betstats_provider_latency_seconds",
                "Odds provider round-trip latency in seconds",
            )
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        )?;

        let games_ranked = IntGauge::new(
            "betstats_games_ranked",
            "Games returned by the last successful ranking",
        )?;

        let provider_requests_remaining = Gauge::new(
            "betstats_provider_requests_remaining",
            "Odds provider request quota remaining",
        )?;

        let provider_requests_used = Gauge::new(
            "betstats_provider_requests_used",
            "Odds provider request quota used",
        )?;

        // Register all metrics
        registry.register(Box::new(odds_requests.clone()))?;
        registry.register(Box::new(provider_latency_seconds.clone()))?;
        registry.register(Box::new(games_ranked.clone()))?;
        registry.register(Box::new(provider_requests_remaining.clone()))?;
        registry.register(Box::new(provider_requests_used.clone()))?;

        Ok(Self {
            registry,
            odds_requests,
            provider_latency_seconds,
            games_ranked,
            provider_requests_remaining,
            provider_requests_used,
        })
    }

    /// Encode every registered metric in the Prometheus text format.
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Serve Prometheus metrics on the configured bind address.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn serve(
        self: Arc<Self>,
        bind_address: String,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> anyhow::Result<()> {
        let metrics_self = Arc::clone(&self);

        let app = Router::new().route(
            "/metrics",
            get(move || {
                let metrics = Arc::clone(&metrics_self);
                async move {
                    match metrics.render() {
                        Ok(body) => (StatusCode::OK, body),
                        Err(e) => {
                            warn!(error = %e, "Failed to encode metrics");
                            (StatusCode::INTERNAL_SERVER_ERROR, String::new())
                        }
                    }
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind(&bind_address).await?;
        info!(address = %bind_address, "Prometheus metrics server started");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        Ok(())
    }
}
