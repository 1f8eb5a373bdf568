use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// A finished lyrics lookup, memoized per normalized query.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LyricsResult {
    pub source: String,
    pub title: String,
    pub artist: String,
    pub lyrics: String,
}

// Generic trait for cache implementations
pub trait LyricsCacheInterface: Send + Sync {
    fn get(&self, key: &str) -> Option<LyricsResult>;
    fn put(&self, key: &str, result: LyricsResult);
    fn clear(&self);
    fn get_stats(&self) -> CacheStats;
}

struct CacheEntry {
    result: LyricsResult,
    cached_at: Instant,
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub max_entries: usize,
    pub total_requests: u64,
    pub cache_hits: u64,
    pub evictions: u64,
    pub hit_rate_percent: f64,
}

/// In-process bounded cache.
///
/// Size-bounded with least-recently-used eviction, plus an optional max age
/// checked on read. Concurrent writers for the same key are last-write-wins.
pub struct MemoryCache {
    entries: Mutex<LruCache<String, CacheEntry>>,
    max_entries: usize,
    max_age: Option<Duration>,
    total_requests: AtomicU64,
    cache_hits: AtomicU64,
    evictions: AtomicU64,
}

impl MemoryCache {
    /// `max_age` of `None` keeps entries until they are evicted for space.
    pub fn new(max_entries: usize, max_age: Option<Duration>) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            max_entries: capacity.get(),
            max_age,
            total_requests: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, CacheEntry>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn is_expired(&self, entry: &CacheEntry, now: Instant) -> bool {
        match self.max_age {
            Some(max_age) => now.duration_since(entry.cached_at) > max_age,
            None => false,
        }
    }
}

impl LyricsCacheInterface for MemoryCache {
    fn get(&self, key: &str) -> Option<LyricsResult> {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        let mut entries = self.lock();

        let expired = match entries.peek(key) {
            Some(entry) => self.is_expired(entry, Instant::now()),
            None => {
                debug!("Cache miss for: {}", key);
                return None;
            }
        };

        if expired {
            debug!("Cache entry expired for: {}", key);
            entries.pop(key);
            self.evictions.fetch_add(1, Ordering::Relaxed);
            return None;
        }

        let entry = entries.get(key)?;
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
        debug!("Cache hit for: {}", key);
        Some(entry.result.clone())
    }

    fn put(&self, key: &str, result: LyricsResult) {
        let entry = CacheEntry {
            result,
            cached_at: Instant::now(),
        };

        let mut entries = self.lock();
        if let Some((evicted, _)) = entries.push(key.to_string(), entry) {
            if evicted != key {
                self.evictions.fetch_add(1, Ordering::Relaxed);
                debug!("Evicted least recently used entry: {}", evicted);
            }
        }

        debug!("Cached lyrics for: {}", key);
    }

    fn clear(&self) {
        self.lock().clear();
        self.total_requests.store(0, Ordering::Relaxed);
        self.cache_hits.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
        info!("Lyrics cache cleared");
    }

    fn get_stats(&self) -> CacheStats {
        let total_requests = self.total_requests.load(Ordering::Relaxed);
        let cache_hits = self.cache_hits.load(Ordering::Relaxed);
        let hit_rate = if total_requests > 0 {
            (cache_hits as f64 / total_requests as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            total_entries: self.len(),
            max_entries: self.max_entries,
            total_requests,
            cache_hits,
            evictions: self.evictions.load(Ordering::Relaxed),
            hit_rate_percent: hit_rate,
        }
    }
}
