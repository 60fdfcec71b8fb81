//! Configuration Module - TOML-based Service Configuration
//!
//! Loads and validates configuration from `config.toml` with
//! environment variable overrides (`ODDS_API_KEY`, `ODDS_API_BASE`).
//! Every section has defaults, so the file itself is optional.
//! Components receive their section explicitly; nothing below this
//! module reads the process environment.

pub mod loader;

use serde::Deserialize;

/// Provider base URL used when neither file nor env sets one.
pub const DEFAULT_ODDS_API_BASE: &str = "https://api.the-odds-api.com/v4";

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// HTTP server settings.
  #[serde(default)]
  pub server: ServerConfig,
  /// Odds provider endpoint and query defaults.
  #[serde(default)]
  pub provider: ProviderConfig,
  /// Metrics export.
  #[serde(default)]
  pub metrics: MetricsConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  /// Address the odds API and pages are served on.
  #[serde(default = "default_bind_address")]
  pub bind_address: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      bind_address: default_bind_address(),
      log_level: default_log_level(),
    }
  }
}

/// Odds provider configuration.
///
/// The API key never comes from the file; it is filled from
/// `ODDS_API_KEY` by the loader.
#[derive(Clone, Deserialize)]
pub struct ProviderConfig {
  /// Provider REST base URL.
  #[serde(default = "default_base_url")]
  pub base_url: String,
  /// Provider API key.
  #[serde(skip)]
  pub api_key: Option<String>,
  /// Sport key queried by the odds board.
  #[serde(default = "default_sport")]
  pub sport: String,
  /// Market keys queried by the odds board.
  #[serde(default = "default_markets")]
  pub markets: Vec<String>,
  /// Regions used when a request does not name any.
  #[serde(default = "default_region")]
  pub default_region: String,
  /// HTTP client timeout in seconds.
  #[serde(default = "default_timeout")]
  pub timeout_seconds: u64,
}

impl ProviderConfig {
  /// The API key, if set to something non-blank.
  pub fn api_key(&self) -> Option<&str> {
    self
      .api_key
      .as_deref()
      .map(str::trim)
      .filter(|k| !k.is_empty())
  }
}

impl Default for ProviderConfig {
  fn default() -> Self {
    Self {
      base_url: default_base_url(),
      api_key: None,
      sport: default_sport(),
      markets: default_markets(),
      default_region: default_region(),
      timeout_seconds: default_timeout(),
    }
  }
}

impl std::fmt::Debug for ProviderConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ProviderConfig")
      .field("base_url", &self.base_url)
      .field("api_key", &self.api_key().map(|_| "<redacted>"))
      .field("sport", &self.sport)
      .field("markets", &self.markets)
      .field("default_region", &self.default_region)
      .field("timeout_seconds", &self.timeout_seconds)
      .finish()
  }
}

/// Metrics and monitoring configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
  /// Enable Prometheus metrics export.
  #[serde(default = "default_true")]
  pub enabled: bool,
  /// Metrics server bind address.
  #[serde(default = "default_metrics_addr")]
  pub bind_address: String,
}

impl Default for MetricsConfig {
  fn default() -> Self {
    Self {
      enabled: default_true(),
      bind_address: default_metrics_addr(),
    }
  }
}

// Default value functions for serde

fn default_bind_address() -> String {
  "0.0.0.0:3000".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_base_url() -> String {
  DEFAULT_ODDS_API_BASE.to_string()
}

fn default_sport() -> String {
  "soccer".to_string()
}

fn default_markets() -> Vec<String> {
  vec!["h2h".to_string(), "spreads".to_string(), "totals".to_string()]
}

fn default_region() -> String {
  "eu,sa".to_string()
}

fn default_timeout() -> u64 {
  30
}

fn default_true() -> bool {
  true
}

fn default_metrics_addr() -> String {
  "0.0.0.0:9090".to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_toml_uses_defaults() {
    let config: AppConfig = toml::from_str("").unwrap();
    assert_eq!(config.server.bind_address, "0.0.0.0:3000");
    assert_eq!(config.provider.base_url, DEFAULT_ODDS_API_BASE);
    assert_eq!(config.provider.markets, vec!["h2h", "spreads", "totals"]);
    assert_eq!(config.provider.default_region, "eu,sa");
    assert!(config.provider.api_key.is_none());
    assert!(config.metrics.enabled);
  }

  #[test]
  fn test_api_key_is_ignored_in_file_and_redacted_in_debug() {
    let mut config: AppConfig =
      toml::from_str("[provider]\napi_key = \"from-file\"\nsport = \"soccer_epl\"\n").unwrap();
    assert!(config.provider.api_key.is_none());
    assert_eq!(config.provider.sport, "soccer_epl");

    config.provider.api_key = Some("secret".to_string());
    let debug = format!("{:?}", config.provider);
    assert!(!debug.contains("secret"));
    assert!(debug.contains("<redacted>"));
  }

  #[test]
  fn test_blank_api_key_counts_as_missing() {
    let provider = ProviderConfig {
      api_key: Some("   ".to_string()),
      ..ProviderConfig::default()
    };
    assert!(provider.api_key().is_none());
  }
}
