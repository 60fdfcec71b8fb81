//! Domain layer - Core odds logic and models.
//!
//! Pure odds arithmetic and the typed game model. No I/O here
//! (hexagonal architecture inner ring); everything is testable in
//! isolation.

pub mod game;
pub mod odds;
pub mod summary;

// Re-export core types for convenience
pub use game::{Bookmaker, Game, GameId, Market, Outcome, SummarizedGame};
pub use odds::{best_outcome, confidence_pct, implied_prob};
pub use summary::{rank_games, summarize_game};
