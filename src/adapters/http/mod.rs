//! HTTP Surface - Odds API, Pages and Probes
//!
//! One axum router serves the JSON odds endpoint, the rendered pages
//! and the health probes. Handlers are stateless apart from the
//! shared, read-only `AppState`.
//!
//! Sub-modules:
//! - `api`: `GET /api/odds`
//! - `pages`: `GET /` and `GET /history`

pub mod api;
pub mod pages;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::sync::broadcast;
use tracing::{info, instrument};

use crate::adapters::metrics::health::{self, HealthState};
use crate::usecases::OddsBoard;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
  /// Odds board use case.
  pub board: Arc<OddsBoard>,
  /// Readiness flag.
  pub health: Arc<HealthState>,
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/api/odds", get(api::get_odds))
    .route("/", get(pages::home))
    .route("/history", get(pages::history))
    .merge(health::routes(Arc::clone(&state.health)))
    .with_state(state)
}

/// Axum server for the odds service.
pub struct HttpServer {
  state: AppState,
  bind_address: String,
}

impl HttpServer {
  /// Create a new server.
  pub fn new(state: AppState, bind_address: impl Into<String>) -> Self {
    Self {
      state,
      bind_address: bind_address.into(),
    }
  }

  /// Serve until the shutdown signal fires.
  ///
  /// Readiness flips to 503 when shutdown starts; in-flight requests
  /// are allowed to finish.
  #[instrument(skip(self, shutdown_rx), fields(address = %self.bind_address))]
  pub async fn run(self, mut shutdown_rx: broadcast::Receiver<()>) -> anyhow::Result<()> {
    let health = Arc::clone(&self.state.health);
    let app = router(self.state);

    let listener = tokio::net::TcpListener::bind(&self.bind_address).await?;
    info!(address = %self.bind_address, "Odds server started");

    axum::serve(listener, app)
      .with_graceful_shutdown(async move {
        let _ = shutdown_rx.recv().await;
        health.begin_shutdown();
        info!("Odds server draining");
      })
      .await?;

    Ok(())
  }
}
