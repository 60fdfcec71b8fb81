//! Health Checks - Liveness and Readiness Probes
//!
//! Exposes /live and /ready for Docker health checks and monitoring.
//! Readiness drops to 503 as soon as graceful shutdown begins so load
//! balancers stop routing new odds requests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

/// Shared health state polled by readiness probes.
#[derive(Debug)]
pub struct HealthState {
    /// Whether the server is accepting traffic.
    serving: AtomicBool,
}

impl HealthState {
    /// Create a new health state (serving by default).
    pub fn new() -> Self {
        Self {
            serving: AtomicBool::new(true),
        }
    }

    /// Mark the server as draining.
    pub fn begin_shutdown(&self) {
        self.serving.store(false, Ordering::Relaxed);
    }

    /// Check if the server is ready to serve traffic.
    pub fn is_ready(&self) -> bool {
        self.serving.load(Ordering::Relaxed)
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

/// `/live` and `/ready` routes over the given health state.
pub fn routes<S>(state: Arc<HealthState>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
        .with_state(state)
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Readiness probe: returns 200 until shutdown begins.
async fn readiness(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    if state.is_ready() {
        (StatusCode::OK, "READY")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
    }
}
