use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::infrastructure::cache::{CacheStats, LyricsCacheInterface, LyricsResult};
use crate::core::lyrics::{extract, normalize};
use crate::core::services::{LyricsProvider, ProviderOutcome};

/// Lyrics lookup: normalize, consult the cache, search the provider, fetch the
/// best match, extract, memoize.
pub struct LyricsService {
    provider: Arc<dyn LyricsProvider>,
    cache: Arc<dyn LyricsCacheInterface>,
}

impl LyricsService {
    pub fn new(provider: Arc<dyn LyricsProvider>, cache: Arc<dyn LyricsCacheInterface>) -> Self {
        Self { provider, cache }
    }

    /// Build a search query from either a free-text `q` or an artist/title pair.
    ///
    /// A `q` with any letter or digit wins. Otherwise the non-blank parts of
    /// artist and title are joined with a space. `None` when nothing usable was given.
    pub fn compose_query(q: Option<&str>, artist: Option<&str>, title: Option<&str>) -> Option<String> {
        if let Some(q) = q.map(str::trim).filter(|q| !normalize(q).is_empty()) {
            return Some(q.to_string());
        }

        let parts: Vec<&str> = [artist, title]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    pub async fn lookup(&self, query: &str) -> ProviderOutcome<LyricsResult> {
        let key = normalize(query);
        if key.is_empty() {
            debug!("Query '{}' normalizes to nothing", query);
            return ProviderOutcome::NotFound;
        }

        if let Some(cached) = self.cache.get(&key) {
            return ProviderOutcome::Found(cached);
        }

        let matches = match self.provider.search(&key).await {
            Ok(matches) => matches,
            Err(e) => {
                warn!("Lyrics search failed for '{}': {}", key, e);
                return ProviderOutcome::ProviderError(e.to_string());
            }
        };

        let Some(song) = matches.into_iter().next() else {
            info!("No lyrics matches for '{}'", key);
            return ProviderOutcome::NotFound;
        };

        let raw = match self.provider.fetch_lyrics(&song).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("No lyrics on page for {} - {}", song.artist, song.title);
                return ProviderOutcome::NotFound;
            }
            // A page that cannot be fetched counts as no result
            Err(e) => {
                warn!("Lyrics fetch failed for {} - {}: {}", song.artist, song.title, e);
                return ProviderOutcome::NotFound;
            }
        };

        let result = LyricsResult {
            source: self.provider.name().to_string(),
            title: song.title,
            artist: song.artist,
            lyrics: extract(&raw),
        };

        self.cache.put(&key, result.clone());
        info!("Resolved lyrics for '{}': {} - {}", key, result.artist, result.title);
        ProviderOutcome::Found(result)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.get_stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
