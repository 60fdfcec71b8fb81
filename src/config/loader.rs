//! Configuration Loader - File Loading, Env Overrides and Validation
//!
//! Handles loading `config.toml`, layering the provider environment
//! variables on top, validating all parameters, and providing clear
//! error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::AppConfig;

/// Environment variable holding the provider API key.
pub const ENV_API_KEY: &str = "ODDS_API_KEY";
/// Environment variable overriding the provider base URL.
pub const ENV_API_BASE: &str = "ODDS_API_BASE";

/// Load and validate configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let mut config: AppConfig = toml::from_str(&content)
    .with_context(|| format!("Failed to parse {}", path.display()))?;

  apply_env_overrides(&mut config, |name| std::env::var(name).ok());
  validate_config(&config)?;

  info!(
    path = %path.display(),
    sport = %config.provider.sport,
    markets = config.provider.markets.len(),
    api_key_set = config.provider.api_key().is_some(),
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Load `path` if it exists, otherwise start from defaults.
///
/// Env overrides and validation apply either way.
pub fn load_or_default(path: &str) -> Result<AppConfig> {
  if Path::new(path).exists() {
    return load_config(path);
  }

  warn!(path, "Config file not found, using defaults");
  let mut config = AppConfig::default();
  apply_env_overrides(&mut config, |name| std::env::var(name).ok());
  validate_config(&config)?;
  Ok(config)
}

/// Layer `ODDS_API_KEY` / `ODDS_API_BASE` onto the config.
///
/// Takes the lookup as a closure so tests never touch the process
/// environment.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
  F: Fn(&str) -> Option<String>,
{
  if let Some(key) = lookup(ENV_API_KEY) {
    config.provider.api_key = Some(key);
  }

  if let Some(base) = lookup(ENV_API_BASE).filter(|b| !b.trim().is_empty()) {
    config.provider.base_url = base.trim().to_string();
  }
}

/// Validate all configuration parameters.
///
/// A missing API key is NOT a load error: it surfaces per request,
/// before any provider call is made.
pub fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.provider.base_url.trim().is_empty(),
    "Provider base_url must not be empty"
  );
  anyhow::ensure!(
    config.provider.base_url.starts_with("http://")
      || config.provider.base_url.starts_with("https://"),
    "Provider base_url must be an http(s) URL, got {}",
    config.provider.base_url
  );
  anyhow::ensure!(
    !config.provider.sport.trim().is_empty(),
    "Provider sport must not be empty"
  );
  anyhow::ensure!(
    !config.provider.markets.is_empty(),
    "At least one provider market must be configured"
  );
  anyhow::ensure!(
    config.provider.markets.iter().all(|m| !m.trim().is_empty()),
    "Provider markets must not contain empty keys"
  );
  anyhow::ensure!(
    !config.provider.default_region.trim().is_empty(),
    "Provider default_region must not be empty"
  );
  anyhow::ensure!(
    config.provider.timeout_seconds > 0,
    "Provider timeout_seconds must be positive"
  );

  anyhow::ensure!(
    !config.server.bind_address.is_empty(),
    "Server bind_address must not be empty"
  );
  if config.metrics.enabled {
    anyhow::ensure!(
      !config.metrics.bind_address.is_empty(),
      "Metrics bind_address must not be empty when metrics are enabled"
    );
  }

  Ok(())
}
