//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces.
//!
//! Use cases:
//! - `OddsBoard`: Fetch provider odds and rank games by confidence

pub mod odds_board;

pub use odds_board::OddsBoard;
