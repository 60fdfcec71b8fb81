//! Decimal odds arithmetic.
//!
//! Converts bookmaker prices to implied probabilities, picks the best
//! price offered for a game, and expresses the result as a confidence
//! percentage.
//!
//! Rounding goes through `rust_decimal` so that 47.619... becomes
//! exactly 47.6 rather than a binary-float neighbour.

use rust_decimal::prelude::*;

use super::game::{Game, Outcome};

/// Implied probability of decimal odds: `1 / odds`.
///
/// Zero, negative and NaN odds carry no probability and return `0.0`.
pub fn implied_prob(decimal_odds: f64) -> f64 {
    if decimal_odds > 0.0 {
        1.0 / decimal_odds
    } else {
        0.0
    }
}

/// Highest-priced outcome across every bookmaker and market of `game`.
///
/// Scans in (bookmaker, market, outcome) order. Only a strictly greater
/// price replaces the running best, so the first maximal outcome wins.
/// Returns `None` when the game has no outcomes at all.
pub fn best_outcome(game: &Game) -> Option<&Outcome> {
    let mut best: Option<&Outcome> = None;
    for outcome in game.outcomes() {
        best = match best {
            None => Some(outcome),
            Some(current) if outcome.price > current.price => Some(outcome),
            keep => keep,
        };
    }
    best
}

/// Confidence percentage for a best price, rounded to one decimal place.
///
/// `None` when the price implies no probability (price <= 0).
pub fn confidence_pct(price: f64) -> Option<f64> {
    let prob = implied_prob(price);
    if prob <= 0.0 {
        return None;
    }
    let pct = prob * 100.0;
    let rounded = Decimal::from_f64(pct)
        .map(|d| {
            let d = d.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            // One division of two exact values: nearest f64 to the decimal.
            #[allow(clippy::cast_precision_loss)]
            let mantissa = d.mantissa() as f64;
            mantissa / 10_f64.powi(i32::try_from(d.scale()).unwrap_or(1))
        })
        // Beyond Decimal range (prices near zero); fall back to float rounding.
        .unwrap_or_else(|| (pct * 10.0).round() / 10.0);
    Some(rounded)
}
