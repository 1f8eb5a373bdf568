//! Error handling for the songscreen service
//!
//! The lyrics extractor itself is total and never fails. Everything around it
//! (provider clients, configuration, the CLI) reports failures through the
//! typed hierarchy below.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SongscreenError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API rate limit exceeded")]
    RateLimit,

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("API response invalid: {reason}")]
    InvalidResponse { reason: String },

    #[error("Service unavailable")]
    ServiceUnavailable,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Failed to determine project directories")]
    NoProjectDirs,
}

pub type Result<T> = std::result::Result<T, SongscreenError>;

impl From<reqwest::Error> for SongscreenError {
    fn from(err: reqwest::Error) -> Self {
        SongscreenError::Network(NetworkError::Http(err))
    }
}

impl From<toml::de::Error> for SongscreenError {
    fn from(err: toml::de::Error) -> Self {
        SongscreenError::Config(ConfigError::InvalidFormat(err))
    }
}

impl From<toml::ser::Error> for SongscreenError {
    fn from(err: toml::ser::Error) -> Self {
        SongscreenError::Config(ConfigError::Serialize(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_display() {
        let err: SongscreenError = NetworkError::Status {
            status: 503,
            url: "https://genius.com/api/search/multi".to_string(),
        }
        .into();

        assert_eq!(
            err.to_string(),
            "Network error: Unexpected status 503 from https://genius.com/api/search/multi"
        );
    }

    #[test]
    fn test_toml_error_converts_to_config_error() {
        let parse_err = toml::from_str::<toml::Value>("port = ").unwrap_err();
        let err: SongscreenError = parse_err.into();
        assert!(matches!(err, SongscreenError::Config(ConfigError::InvalidFormat(_))));
    }
}
