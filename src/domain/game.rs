//! Core odds domain types.
//!
//! Defines the typed game model: outcomes, markets, bookmakers, games
//! as delivered by the odds provider, and the summarized game that the
//! service hands to its callers.
//!
//! Optional provider fields are explicit `Option`s. Missing nested
//! collections are empty `Vec`s, filled in once when the provider
//! payload is decoded (see `adapters::api::types`).

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Lightweight game identifier used at the ports boundary.
pub type GameId = String;

/// One possible bet result offered by one bookmaker's market.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    /// Outcome label (team name, "Draw", "Over", ...).
    pub name: String,
    /// Decimal odds (payout = stake × price).
    pub price: f64,
    /// Handicap or total line for spreads/totals markets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<f64>,
}

impl Outcome {
    /// Create an outcome without a line.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            point: None,
        }
    }
}

/// A betting market (h2h, spreads, totals) offered by a bookmaker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Market {
    /// Provider market key.
    pub key: String,
    /// Outcomes in provider order.
    pub outcomes: Vec<Outcome>,
}

impl Market {
    pub fn new(key: impl Into<String>, outcomes: Vec<Outcome>) -> Self {
        Self {
            key: key.into(),
            outcomes,
        }
    }
}

/// A bookmaker and the markets it prices for one game.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Bookmaker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,
    pub markets: Vec<Market>,
}

impl Bookmaker {
    /// Anonymous bookmaker carrying only markets.
    pub fn with_markets(markets: Vec<Market>) -> Self {
        Self {
            markets,
            ..Self::default()
        }
    }
}

/// A game as received from the odds provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    /// Provider event id, when present.
    pub id: Option<GameId>,
    /// Provider sport key (e.g. `soccer_epl`).
    pub sport_key: Option<String>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    /// Kickoff time.
    pub commence_time: Option<DateTime<Utc>>,
    /// Kickoff exactly as the provider wrote it, kept for id synthesis.
    pub commence_raw: Option<String>,
    /// Bookmakers in provider order.
    pub bookmakers: Vec<Bookmaker>,
}

impl Game {
    /// Iterate every outcome in (bookmaker, market, outcome) order.
    pub fn outcomes(&self) -> impl Iterator<Item = &Outcome> {
        self.bookmakers
            .iter()
            .flat_map(|b| b.markets.iter())
            .flat_map(|m| m.outcomes.iter())
    }
}

/// A game reduced to what the odds board displays.
///
/// `confidence` is the implied probability of `best_outcome`, as a
/// percentage rounded to one decimal place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarizedGame {
    pub id: GameId,
    pub home: String,
    pub away: String,
    pub commence_time: Option<DateTime<Utc>>,
    pub best_outcome: Option<Outcome>,
    pub confidence: Option<f64>,
    pub bookmakers: Vec<Bookmaker>,
    pub league: String,
}

impl SummarizedGame {
    /// Confidence used for ranking: absent counts as zero.
    pub fn rank_key(&self) -> f64 {
        self.confidence.unwrap_or(0.0)
    }
}
