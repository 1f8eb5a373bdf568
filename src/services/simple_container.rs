use std::sync::Arc;

use crate::config::Config;
use crate::core::services::MovieProvider;
use crate::error::Result;
use crate::services::{LyricsService, ServiceFactory};

/// Everything a request handler or CLI command needs, built once at startup.
#[derive(Clone)]
pub struct AppServices {
    config: Arc<Config>,
    lyrics: Arc<LyricsService>,
    movies: Option<Arc<dyn MovieProvider>>,
}

impl AppServices {
    pub fn new(config: Config) -> Result<Self> {
        let factory = ServiceFactory::new(Arc::new(config));
        let lyrics = LyricsService::new(factory.create_lyrics_provider()?, factory.create_cache());

        Ok(Self {
            config: factory.config(),
            lyrics: Arc::new(lyrics),
            movies: factory.create_movie_provider()?,
        })
    }

    /// Assemble from pre-built parts, used by tests to inject providers.
    #[cfg(test)]
    pub fn from_parts(
        config: Config,
        lyrics: LyricsService,
        movies: Option<Arc<dyn MovieProvider>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            lyrics: Arc::new(lyrics),
            movies,
        }
    }

    pub fn config(&self) -> Arc<Config> {
        self.config.clone()
    }

    pub fn lyrics(&self) -> &LyricsService {
        &self.lyrics
    }

    pub fn movies(&self) -> Option<&Arc<dyn MovieProvider>> {
        self.movies.as_ref()
    }
}
