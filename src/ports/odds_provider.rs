//! Odds Provider Port - External Odds Source Interface
//!
//! Defines the trait the odds board uses to pull games with nested
//! bookmaker odds. The HTTP adapter implements it; tests mock it.

use async_trait::async_trait;

use crate::domain::game::Game;
use crate::error::OddsError;

/// What to ask the provider for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OddsQuery {
  /// Comma-separated provider regions (e.g. `eu,sa`).
  pub region: String,
  /// Provider sport key (e.g. `soccer`).
  pub sport: String,
  /// Market keys (e.g. `h2h`, `spreads`, `totals`).
  pub markets: Vec<String>,
}

impl OddsQuery {
  /// Market keys joined the way the provider expects them.
  pub fn markets_param(&self) -> String {
    self.markets.join(",")
  }
}

/// Trait for odds sources.
///
/// One call per incoming request; implementors do not cache, batch
/// or retry.
#[async_trait]
pub trait OddsProvider: Send + Sync + 'static {
  /// Fetch every game for the query with its bookmaker odds.
  ///
  /// # Errors
  /// `OddsError::MissingApiKey` when unconfigured, otherwise the
  /// provider or transport failure as-is.
  async fn fetch_odds(&self, query: &OddsQuery) -> Result<Vec<Game>, OddsError>;
}
