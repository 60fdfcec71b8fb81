//! Odds API HTTP Client - The Odds API v4 REST Client
//!
//! Wraps reqwest for the single odds endpoint the service needs.
//! No retries and no backoff: provider failures are handed back to
//! the caller as-is. The only timeout is the client's own.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, info, instrument};

use super::types::decode_events;
use crate::adapters::metrics::MetricsRegistry;
use crate::config::ProviderConfig;
use crate::domain::game::Game;
use crate::error::OddsError;
use crate::ports::odds_provider::{OddsProvider, OddsQuery};

/// Header carrying the API key on every provider request.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// HTTP client for The Odds API.
pub struct OddsApiClient {
  /// Underlying HTTP client (shared connection pool).
  http: Client,
  /// Provider endpoint, key and timeout.
  config: ProviderConfig,
  /// Optional metrics sink for latency and quota.
  metrics: Option<Arc<MetricsRegistry>>,
}

impl OddsApiClient {
  /// Create a new odds client.
  ///
  /// Does not check the API key; that happens per fetch.
  pub fn new(config: ProviderConfig) -> Result<Self, OddsError> {
    let http = Client::builder()
      .timeout(Duration::from_secs(config.timeout_seconds))
      .pool_max_idle_per_host(5)
      .build()
      .map_err(OddsError::ClientBuild)?;

    Ok(Self {
      http,
      config,
      metrics: None,
    })
  }

  /// Attach a metrics registry.
  #[must_use]
  pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
    self.metrics = Some(metrics);
    self
  }

  /// `{base}/sports/{sport}/odds`, without the query string.
  pub fn odds_url(&self, sport: &str) -> String {
    format!(
      "{}/sports/{}/odds",
      self.config.base_url.trim_end_matches('/'),
      sport
    )
  }

  /// Record provider quota headers, when the provider sends them.
  fn record_quota(&self, response: &Response) {
    let header = |name: &str| {
      response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<f64>().ok())
    };

    let remaining = header("x-requests-remaining");
    let used = header("x-requests-used");
    debug!(?remaining, ?used, "Odds provider quota");

    if let Some(metrics) = &self.metrics {
      if let Some(r) = remaining {
        metrics.provider_requests_remaining.set(r);
      }
      if let Some(u) = used {
        metrics.provider_requests_used.set(u);
      }
    }
  }
}

/// Wrap a reqwest failure, stripping the request URL: its query string
/// carries the API key.
fn transport(e: reqwest::Error) -> OddsError {
  OddsError::Transport(e.without_url())
}

#[async_trait]
impl OddsProvider for OddsApiClient {
  #[instrument(skip(self), fields(sport = %query.sport, region = %query.region))]
  async fn fetch_odds(&self, query: &OddsQuery) -> Result<Vec<Game>, OddsError> {
    let api_key = self.config.api_key().ok_or(OddsError::MissingApiKey)?;

    let url = self.odds_url(&query.sport);
    let markets = query.markets_param();
    debug!(%url, %markets, "GET odds");

    let started = Instant::now();
    let response = self
      .http
      .get(&url)
      .header(API_KEY_HEADER, api_key)
      .query(&[
        ("apiKey", api_key),
        ("regions", query.region.as_str()),
        ("markets", markets.as_str()),
        ("oddsFormat", "decimal"),
        ("dateFormat", "iso"),
      ])
      .send()
      .await
      .map_err(transport)?;

    if let Some(metrics) = &self.metrics {
      metrics
        .provider_latency_seconds
        .observe(started.elapsed().as_secs_f64());
    }
    self.record_quota(&response);

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(OddsError::Upstream {
        status: status.as_u16(),
        body,
      });
    }

    let body = response.text().await.map_err(transport)?;
    let games = decode_events(&body).map_err(OddsError::Decode)?;

    info!(
      games = games.len(),
      elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
      "Odds fetched"
    );
    Ok(games)
  }
}
