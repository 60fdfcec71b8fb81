//! Odds Board - Fetch, Summarize and Rank
//!
//! The single use case of the service: for one request, ask the odds
//! provider for every game in the configured sport and markets, then
//! hand back the games ranked by confidence. Nothing is cached; each
//! call is an independent provider round-trip.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::adapters::metrics::MetricsRegistry;
use crate::config::ProviderConfig;
use crate::domain::game::SummarizedGame;
use crate::domain::summary::rank_games;
use crate::error::OddsError;
use crate::ports::odds_provider::{OddsProvider, OddsQuery};

/// Ranks provider games by confidence.
pub struct OddsBoard {
  /// Odds source.
  provider: Arc<dyn OddsProvider>,
  /// Sport queried on every request.
  sport: String,
  /// Market keys queried on every request.
  markets: Vec<String>,
  /// Regions used when the caller names none.
  default_region: String,
  /// Optional metrics sink.
  metrics: Option<Arc<MetricsRegistry>>,
}

impl OddsBoard {
  /// Create an odds board querying the sport and markets in `config`.
  pub fn new(provider: Arc<dyn OddsProvider>, config: &ProviderConfig) -> Self {
    Self {
      provider,
      sport: config.sport.clone(),
      markets: config.markets.clone(),
      default_region: config.default_region.clone(),
      metrics: None,
    }
  }

  /// Attach a metrics registry.
  #[must_use]
  pub fn with_metrics(mut self, metrics: Arc<MetricsRegistry>) -> Self {
    self.metrics = Some(metrics);
    self
  }

  /// Build the provider query for `region`, falling back to the default
  /// region when it is absent or blank.
  pub fn query_for(&self, region: Option<&str>) -> OddsQuery {
    let region = region
      .map(str::trim)
      .filter(|r| !r.is_empty())
      .unwrap_or(self.default_region.as_str());

    OddsQuery {
      region: region.to_string(),
      sport: self.sport.clone(),
      markets: self.markets.clone(),
    }
  }

  /// Fetch and rank games, highest confidence first.
  ///
  /// # Errors
  /// Propagates the provider error unchanged.
  #[instrument(skip(self))]
  pub async fn ranked_games(
    &self,
    region: Option<&str>,
  ) -> Result<Vec<SummarizedGame>, OddsError> {
    let query = self.query_for(region);

    let games = match self.provider.fetch_odds(&query).await {
      Ok(games) => games,
      Err(e) => {
        if e.is_configuration() {
          error!(error = %e, "Odds provider not configured");
        } else {
          warn!(error = %e, region = %query.region, "Odds provider request failed");
        }
        self.count(e.kind());
        return Err(e);
      }
    };

    let ranked = rank_games(&games);

    info!(
      region = %query.region,
      games = ranked.len(),
      with_confidence = ranked.iter().filter(|g| g.confidence.is_some()).count(),
      "Odds board ranked"
    );
    self.count("ok");
    if let Some(metrics) = &self.metrics {
      metrics
        .games_ranked
        .set(i64::try_from(ranked.len()).unwrap_or(i64::MAX));
    }

    Ok(ranked)
  }

  fn count(&self, outcome: &str) {
    if let Some(metrics) = &self.metrics {
      metrics.odds_requests.with_label_values(&[outcome]).inc();
    }
  }
}
