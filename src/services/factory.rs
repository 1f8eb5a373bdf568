use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::core::infrastructure::cache::{LyricsCacheInterface, MemoryCache};
use crate::core::services::{GeniusClient, LyricsProvider, MovieProvider, TmdbClient};
use crate::error::Result;

/// Centralized factory for creating all core services
pub struct ServiceFactory {
    config: Arc<Config>,
}

impl ServiceFactory {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Create the Genius client with the configured instance and timeout
    pub fn create_lyrics_provider(&self) -> Result<Arc<dyn LyricsProvider>> {
        let client = GeniusClient::new(&self.config.genius_base_url, self.config.request_timeout())?;
        let provider: Arc<dyn LyricsProvider> = Arc::new(client);
        Ok(provider)
    }

    /// Create the TMDB client, `None` when no API key is configured
    pub fn create_movie_provider(&self) -> Result<Option<Arc<dyn MovieProvider>>> {
        let Some(api_key) = self.config.tmdb_api_key.as_deref() else {
            warn!("No TMDB API key configured; movie endpoints are disabled");
            return Ok(None);
        };

        let client = TmdbClient::new(
            &self.config.tmdb_base_url,
            &self.config.tmdb_image_base_url,
            api_key,
            self.config.request_timeout(),
        )?;
        let provider: Arc<dyn MovieProvider> = Arc::new(client);
        Ok(Some(provider))
    }

    /// Create the lyrics result cache sized from configuration
    pub fn create_cache(&self) -> Arc<dyn LyricsCacheInterface> {
        info!(
            "Lyrics cache: up to {} entries, ttl {}",
            self.config.cache_max_entries,
            match self.config.cache_ttl() {
                Some(ttl) => format!("{}s", ttl.as_secs()),
                None => "none".to_string(),
            }
        );
        Arc::new(MemoryCache::new(self.config.cache_max_entries, self.config.cache_ttl()))
    }

    /// Get configuration reference
    pub fn config(&self) -> Arc<Config> {
        self.config.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_provider_requires_api_key() {
        let factory = ServiceFactory::new(Arc::new(Config::default()));
        assert!(factory.create_movie_provider().unwrap().is_none());

        let mut config = Config::default();
        config.tmdb_api_key = Some("key".to_string());
        let factory = ServiceFactory::new(Arc::new(config));
        assert!(factory.create_movie_provider().unwrap().is_some());
    }

    #[test]
    fn test_cache_uses_configured_capacity() {
        let mut config = Config::default();
        config.cache_max_entries = 3;
        let factory = ServiceFactory::new(Arc::new(config));

        assert_eq!(factory.create_cache().get_stats().max_entries, 3);
    }
}
