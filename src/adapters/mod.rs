//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (HTTP client, HTTP server, metrics export).
//!
//! Adapter categories:
//! - `api`: The Odds API REST client and wire types
//! - `http`: axum router for the odds endpoint, pages and probes
//! - `metrics`: Prometheus metrics export and health checks

pub mod api;
pub mod http;
pub mod metrics;
