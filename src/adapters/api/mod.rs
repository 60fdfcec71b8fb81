//! Odds Provider API Adapter
//!
//! Implements the `OddsProvider` port against The Odds API v4.
//!
//! Sub-modules:
//! - `client`: HTTP client for the odds endpoint
//! - `types`: Wire types and conversion into the domain model

pub mod client;
pub mod types;

pub use client::OddsApiClient;
