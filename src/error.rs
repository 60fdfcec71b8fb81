//! Odds Service Errors
//!
//! Two families: configuration errors raised before any I/O, and
//! upstream errors from the odds provider. Neither is retried.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OddsError {
    /// No API key configured; raised before a request is built.
    #[error("ODDS_API_KEY missing - set it in the environment")]
    MissingApiKey,

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("Odds provider returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Odds provider request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to decode odds provider response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl OddsError {
    /// True for errors caused by local configuration rather than the provider.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingApiKey | Self::ClientBuild(_))
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingApiKey | Self::ClientBuild(_) => "config",
            Self::Upstream { .. } => "upstream",
            Self::Transport(_) => "transport",
            Self::Decode(_) => "decode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_configuration_error() {
        let err = OddsError::MissingApiKey;
        assert!(err.is_configuration());
        assert_eq!(err.kind(), "config");
        assert!(err.to_string().contains("ODDS_API_KEY"));
    }

    #[test]
    fn test_upstream_message_echoes_status_and_body() {
        let err = OddsError::Upstream {
            status: 401,
            body: "invalid key".to_string(),
        };
        assert!(!err.is_configuration());
        assert_eq!(err.to_string(), "Odds provider returned HTTP 401: invalid key");
    }
}
