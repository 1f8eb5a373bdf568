use std::env;
use crate::error::{Result, SongscreenError};

/// Environment variable configuration constants
pub struct EnvVars;

impl EnvVars {
    pub const BIND_ADDRESS: &'static str = "SONGSCREEN_BIND_ADDRESS";
    pub const PORT: &'static str = "SONGSCREEN_PORT";
    pub const WORKERS: &'static str = "SONGSCREEN_WORKERS";
    pub const GENIUS_BASE_URL: &'static str = "SONGSCREEN_GENIUS_BASE_URL";
    pub const TMDB_BASE_URL: &'static str = "SONGSCREEN_TMDB_BASE_URL";
    pub const TMDB_IMAGE_BASE_URL: &'static str = "SONGSCREEN_TMDB_IMAGE_BASE_URL";
    pub const TMDB_API_KEY: &'static str = "SONGSCREEN_TMDB_API_KEY";
    pub const REQUEST_TIMEOUT_SECONDS: &'static str = "SONGSCREEN_REQUEST_TIMEOUT_SECONDS";
    pub const CACHE_MAX_ENTRIES: &'static str = "SONGSCREEN_CACHE_MAX_ENTRIES";
    pub const CACHE_TTL_SECONDS: &'static str = "SONGSCREEN_CACHE_TTL_SECONDS";
}

/// Environment variable parsing utilities with validation
pub struct EnvParser;

impl EnvParser {
    /// Parse environment variable as string with validation
    pub fn parse_string(var_name: &str, validator: Option<fn(&str) -> Result<()>>) -> Result<Option<String>> {
        match env::var(var_name) {
            Ok(value) => {
                let trimmed = value.trim().to_string();
                if trimmed.is_empty() {
                    return Ok(None);
                }

                if let Some(validate_fn) = validator {
                    validate_fn(&trimmed)?;
                }

                Ok(Some(trimmed))
            }
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => {
                Err(SongscreenError::Validation(format!(
                    "Environment variable {} contains invalid UTF-8",
                    var_name
                )))
            }
        }
    }

    /// Parse environment variable as u64 with range validation
    pub fn parse_u64(var_name: &str, min: u64, max: u64) -> Result<Option<u64>> {
        if let Some(value_str) = Self::parse_string(var_name, None)? {
            let value = value_str.parse::<u64>().map_err(|_| {
                SongscreenError::Validation(format!(
                    "Invalid number in {}: '{}'. Must be a non-negative integer",
                    var_name, value_str
                ))
            })?;

            if value < min || value > max {
                return Err(SongscreenError::Validation(format!(
                    "Value in {} must be between {} and {}, got {}",
                    var_name, min, max, value
                )));
            }

            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    /// Parse environment variable as usize with range validation
    pub fn parse_usize(var_name: &str, min: usize, max: usize) -> Result<Option<usize>> {
        Ok(Self::parse_u64(var_name, min as u64, max as u64)?.map(|value| value as usize))
    }

    /// Parse environment variable as a TCP port
    pub fn parse_port(var_name: &str) -> Result<Option<u16>> {
        Ok(Self::parse_u64(var_name, 1, u16::MAX as u64)?.map(|value| value as u16))
    }

    /// Get all SONGSCREEN environment variables for debugging, secrets masked
    pub fn get_all_songscreen_vars() -> Vec<(String, String)> {
        env::vars()
            .filter(|(key, _)| key.starts_with("SONGSCREEN_"))
            .map(|(key, value)| {
                if key == EnvVars::TMDB_API_KEY {
                    (key, "***".to_string())
                } else {
                    (key, value)
                }
            })
            .collect()
    }
}
