//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `OddsProvider`: Bookmaker odds for upcoming games

pub mod odds_provider;

pub use odds_provider::{OddsProvider, OddsQuery};
