use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use directories::ProjectDirs;
use tracing::{debug, info};

use crate::error::{ConfigError, Result};

pub mod env;
pub mod validation;

use env::{EnvParser, EnvVars};
use validation::ConfigValidator;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_genius_base_url() -> String {
    "https://genius.com".to_string()
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_request_timeout_seconds() -> u64 {
    10
}

fn default_cache_max_entries() -> usize {
    1000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port the HTTP server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of HTTP worker threads (actix default when unset)
    #[serde(default)]
    pub workers: Option<usize>,

    /// Genius instance URL
    #[serde(default = "default_genius_base_url")]
    pub genius_base_url: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_base_url")]
    pub tmdb_base_url: String,

    /// Prefix for TMDB poster and backdrop paths
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// TMDB API key; movie endpoints are disabled without it
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// Timeout for each outgoing provider request (seconds)
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// Maximum number of memoized lyrics lookups
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,

    /// Max age of memoized lookups in seconds, 0 keeps them until evicted
    #[serde(default)]
    pub cache_ttl_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            workers: None,
            genius_base_url: default_genius_base_url(),
            tmdb_base_url: default_tmdb_base_url(),
            tmdb_image_base_url: default_tmdb_image_base_url(),
            tmdb_api_key: None,
            request_timeout_seconds: default_request_timeout_seconds(),
            cache_max_entries: default_cache_max_entries(),
            cache_ttl_seconds: 0,
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Try to load .env file if it exists (for Docker and development)
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        let config_file = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                if !path.exists() {
                    return Err(ConfigError::FileNotFound { path }.into());
                }
                Some(path)
            }
            None => Self::default_config_path().ok().filter(|path| path.exists()),
        };

        if let Some(path) = config_file {
            debug!("Loading configuration from {}", path.display());
            let content = fs::read_to_string(&path)?;
            config = Self::from_toml_str(&content)?;
        }

        // Environment variables have the highest priority
        config.load_from_env()?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from environment variables
    fn load_from_env(&mut self) -> Result<()> {
        if let Some(address) = EnvParser::parse_string(EnvVars::BIND_ADDRESS, None)? {
            self.bind_address = address;
        }

        if let Some(port) = EnvParser::parse_port(EnvVars::PORT)? {
            self.port = port;
        }

        if let Some(workers) = EnvParser::parse_usize(EnvVars::WORKERS, 1, 256)? {
            self.workers = Some(workers);
        }

        let url_validator: fn(&str) -> Result<()> =
            |url| ConfigValidator::validate_url(url, "provider");

        if let Some(url) = EnvParser::parse_string(EnvVars::GENIUS_BASE_URL, Some(url_validator))? {
            self.genius_base_url = url;
        }

        if let Some(url) = EnvParser::parse_string(EnvVars::TMDB_BASE_URL, Some(url_validator))? {
            self.tmdb_base_url = url;
        }

        if let Some(url) = EnvParser::parse_string(EnvVars::TMDB_IMAGE_BASE_URL, Some(url_validator))? {
            self.tmdb_image_base_url = url;
        }

        if let Some(key) = EnvParser::parse_string(EnvVars::TMDB_API_KEY, None)? {
            self.tmdb_api_key = Some(key);
        }

        if let Some(timeout) = EnvParser::parse_u64(EnvVars::REQUEST_TIMEOUT_SECONDS, 1, 300)? {
            self.request_timeout_seconds = timeout;
        }

        if let Some(max_entries) = EnvParser::parse_usize(EnvVars::CACHE_MAX_ENTRIES, 1, 1_000_000)? {
            self.cache_max_entries = max_entries;
        }

        if let Some(ttl) = EnvParser::parse_u64(EnvVars::CACHE_TTL_SECONDS, 0, 2_592_000)? {
            self.cache_ttl_seconds = ttl;
        }

        Ok(())
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate_not_blank(&self.bind_address, "bind address")?;
        ConfigValidator::validate_range(self.port, 1, u16::MAX, "port")?;
        if let Some(workers) = self.workers {
            ConfigValidator::validate_range(workers, 1, 256, "workers")?;
        }

        ConfigValidator::validate_url(&self.genius_base_url, "Genius")?;
        ConfigValidator::validate_url(&self.tmdb_base_url, "TMDB")?;
        ConfigValidator::validate_url(&self.tmdb_image_base_url, "TMDB image")?;

        ConfigValidator::validate_range(self.request_timeout_seconds, 1, 300, "request timeout seconds")?;
        ConfigValidator::validate_range(self.cache_max_entries, 1, 1_000_000, "cache max entries")?;
        ConfigValidator::validate_range(self.cache_ttl_seconds, 0, 2_592_000, "cache TTL seconds")?;

        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Configuration written to {}", path.display());
        Ok(())
    }

    fn default_config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("net", "songscreen", "songscreen")
            .ok_or(ConfigError::NoProjectDirs)?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Self::default_config_path()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        if self.cache_ttl_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.cache_ttl_seconds))
        }
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.bind_address.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SongscreenError;
    use std::env;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_addr(), ("127.0.0.1".to_string(), 8080));
        assert_eq!(config.cache_ttl(), None);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
            port = 9090
            tmdb_api_key = "abc123"
            cache_ttl_seconds = 3600
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.tmdb_api_key.as_deref(), Some("abc123"));
        assert_eq!(config.cache_ttl(), Some(Duration::from_secs(3600)));
        assert_eq!(config.genius_base_url, "https://genius.com");
        assert_eq!(config.cache_max_entries, 1000);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml_str("port = \"eighty\"").unwrap_err();
        assert!(matches!(err, SongscreenError::Config(ConfigError::InvalidFormat(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.genius_base_url = "genius".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.request_timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.workers = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        env::set_var("SONGSCREEN_PORT", "9191");
        env::set_var("SONGSCREEN_TMDB_API_KEY", "from-env");
        env::set_var("SONGSCREEN_CACHE_MAX_ENTRIES", "25");

        let mut config = Config::default();
        config.load_from_env().unwrap();

        assert_eq!(config.port, 9191);
        assert_eq!(config.tmdb_api_key.as_deref(), Some("from-env"));
        assert_eq!(config.cache_max_entries, 25);

        env::remove_var("SONGSCREEN_PORT");
        env::remove_var("SONGSCREEN_TMDB_API_KEY");
        env::remove_var("SONGSCREEN_CACHE_MAX_ENTRIES");
    }

    #[test]
    fn test_save_and_reload() {
        let path = env::temp_dir()
            .join(format!("songscreen-config-test-{}", std::process::id()))
            .join("config.toml");

        let mut config = Config::default();
        config.port = 7070;
        config.save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let reloaded = Config::from_toml_str(&content).unwrap();
        assert_eq!(reloaded.port, 7070);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
