//! Odds API Response Types
//!
//! Wire shapes of The Odds API v4 `/sports/{sport}/odds` response.
//! This is the one place where malformed provider data is tolerated:
//! every nested collection defaults to empty and every scalar that
//! the domain treats as optional is an `Option`. Conversion into the
//! domain model happens via `From`.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::domain::game::{Bookmaker, Game, Market, Outcome};

/// One event (game) with its bookmaker odds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiEvent {
  pub id: Option<String>,
  pub sport_key: Option<String>,
  /// ISO-8601 kickoff (`dateFormat=iso`).
  pub commence_time: Option<String>,
  pub home_team: Option<String>,
  pub away_team: Option<String>,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub bookmakers: Vec<ApiBookmaker>,
}

/// Bookmaker entry of an event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiBookmaker {
  pub key: Option<String>,
  pub title: Option<String>,
  pub last_update: Option<String>,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub markets: Vec<ApiMarket>,
}

/// Market entry of a bookmaker.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiMarket {
  pub key: Option<String>,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub outcomes: Vec<ApiOutcome>,
}

/// Outcome entry of a market.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiOutcome {
  pub name: Option<String>,
  /// Decimal price (`oddsFormat=decimal`); missing counts as 0.
  pub price: Option<f64>,
  pub point: Option<f64>,
}

/// Treat an explicit `null` collection like a missing one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
  D: serde::Deserializer<'de>,
  T: Deserialize<'de>,
{
  Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn parse_time(raw: Option<&str>) -> Option<DateTime<Utc>> {
  let raw = raw?;
  match DateTime::parse_from_rfc3339(raw) {
    Ok(t) => Some(t.with_timezone(&Utc)),
    Err(e) => {
      debug!(value = raw, error = %e, "Unparseable provider timestamp");
      None
    }
  }
}

impl From<ApiOutcome> for Outcome {
  fn from(o: ApiOutcome) -> Self {
    Self {
      name: o.name.unwrap_or_default(),
      price: o.price.unwrap_or(0.0),
      point: o.point,
    }
  }
}

impl From<ApiMarket> for Market {
  fn from(m: ApiMarket) -> Self {
    Self {
      key: m.key.unwrap_or_default(),
      outcomes: m.outcomes.into_iter().map(Outcome::from).collect(),
    }
  }
}

impl From<ApiBookmaker> for Bookmaker {
  fn from(b: ApiBookmaker) -> Self {
    Self {
      last_update: parse_time(b.last_update.as_deref()),
      key: b.key,
      title: b.title,
      markets: b.markets.into_iter().map(Market::from).collect(),
    }
  }
}

impl From<ApiEvent> for Game {
  fn from(e: ApiEvent) -> Self {
    Self {
      commence_time: parse_time(e.commence_time.as_deref()),
      commence_raw: e.commence_time,
      id: e.id.filter(|id| !id.is_empty()),
      sport_key: e.sport_key,
      home_team: e.home_team,
      away_team: e.away_team,
      bookmakers: e.bookmakers.into_iter().map(Bookmaker::from).collect(),
    }
  }
}

/// Decode a provider response body into domain games.
///
/// A `null` body decodes as no games.
pub fn decode_events(body: &str) -> Result<Vec<Game>, serde_json::Error> {
  let events: Option<Vec<ApiEvent>> = serde_json::from_str(body)?;
  Ok(events
    .unwrap_or_default()
    .into_iter()
    .map(Game::from)
    .collect())
}
