//! In-memory TTL cache for transcript responses.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use tubelinks_core::types::{CacheKey, ResponseData};

use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;

/// Cache entry with its write time.
#[derive(Clone)]
struct CachedEntry {
    response: Arc<ResponseData>,
    stored_at: Instant,
}

impl CachedEntry {
    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.stored_at) > ttl
    }
}

/// In-memory cache of transcript responses.
///
/// Thread-safe. Expiry is enforced on every [`lookup`](Self::lookup), so
/// whether or not [`maybe_cleanup`](Self::maybe_cleanup) has run never
/// changes what a caller sees; cleanup only reclaims memory.
pub struct TranscriptCache {
    entries: RwLock<HashMap<CacheKey, CachedEntry>>,
    config: CacheConfig,
    clock: Arc<dyn Clock>,
}

impl TranscriptCache {
    /// Creates a new cache with default configuration.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a cache reading time from `clock`.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            config,
            clock,
        }
    }

    /// Returns the configuration this cache was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns the cached response for `key` if it has not expired.
    ///
    /// Expired entries still in the map are treated as misses.
    pub fn lookup(&self, key: &CacheKey) -> Option<Arc<ResponseData>> {
        let now = self.clock.now();
        let ttl = self.config.ttl();
        let entries = self.entries.read();
        entries.get(key).and_then(|e| {
            if e.is_expired(now, ttl) {
                None
            } else {
                Some(Arc::clone(&e.response))
            }
        })
    }

    /// Inserts or overwrites the entry for `key`, stamped with the current time.
    pub fn store(&self, key: CacheKey, response: Arc<ResponseData>) {
        let stored_at = self.clock.now();
        self.entries.write().insert(key, CachedEntry {
            response,
            stored_at,
        });
    }

    /// Runs [`cleanup_expired`](Self::cleanup_expired) with the configured
    /// probability, using the thread-local RNG.
    ///
    /// Returns the number of entries removed (0 when the pass was skipped).
    pub fn maybe_cleanup(&self) -> usize {
        self.maybe_cleanup_with(&mut rand::thread_rng())
    }

    /// Same as [`maybe_cleanup`](Self::maybe_cleanup) with a caller-supplied RNG.
    ///
    /// An empty cache returns immediately without drawing from `rng`.
    pub fn maybe_cleanup_with<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        if self.is_empty() {
            return 0;
        }
        if rng.gen::<f64>() >= self.config.cleanup_probability {
            return 0;
        }
        self.cleanup_expired()
    }

    /// Removes all expired entries, returning how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        let now = self.clock.now();
        let ttl = self.config.ttl();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired(now, ttl));
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, remaining = entries.len(), "Cache cleanup pass");
        }
        removed
    }

    /// Clears all cached entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Returns the number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now();
        let ttl = self.config.ttl();
        let entries = self.entries.read();
        let expired = entries.values().filter(|e| e.is_expired(now, ttl)).count();
        CacheStats {
            total_entries: entries.len(),
            expired_entries: expired,
            valid_entries: entries.len().saturating_sub(expired),
        }
    }
}

impl Default for TranscriptCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries in the map, expired ones included
    pub total_entries: usize,
    /// Entries past their TTL awaiting cleanup
    pub expired_entries: usize,
    /// Entries a lookup would return
    pub valid_entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeSet;

    const TTL: u64 = 3600;

    fn make_response(text: &str) -> Arc<ResponseData> {
        Arc::new(ResponseData::new(text, BTreeSet::new()))
    }

    fn manual_cache(cleanup_probability: f64) -> (TranscriptCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let config = CacheConfig {
            ttl_seconds: TTL,
            cleanup_probability,
        };
        (TranscriptCache::with_clock(config, clock.clone()), clock)
    }

    #[test]
    fn test_cache_store_lookup() {
        let cache = TranscriptCache::new();
        let key = CacheKey::new("v1", "en");
        cache.store(key.clone(), make_response("hello"));
        assert_eq!(cache.lookup(&key).unwrap().transcript, "hello");
    }

    #[test]
    fn test_cache_miss() {
        let cache = TranscriptCache::new();
        assert!(cache.lookup(&CacheKey::new("nope", "en")).is_none());
    }

    #[test]
    fn test_cache_lookup_is_idempotent() {
        let cache = TranscriptCache::new();
        let key = CacheKey::new("v1", "en");
        cache.store(key.clone(), make_response("hello"));
        let first = cache.lookup(&key).unwrap();
        let second = cache.lookup(&key).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_cache_keys_are_not_normalized() {
        let cache = TranscriptCache::new();
        cache.store(CacheKey::new("v1", "en"), make_response("hello"));
        assert!(cache.lookup(&CacheKey::new("v1", "EN")).is_none());
        assert!(cache.lookup(&CacheKey::new("V1", "en")).is_none());
        assert!(cache.lookup(&CacheKey::new("v1 ", "en")).is_none());
    }

    #[test]
    fn test_cache_store_overwrites() {
        let (cache, clock) = manual_cache(0.0);
        let key = CacheKey::new("v1", "en");
        cache.store(key.clone(), make_response("old"));
        clock.advance(Duration::from_secs(TTL - 10));
        cache.store(key.clone(), make_response("new"));
        assert_eq!(cache.len(), 1);

        // The overwrite restarts the entry's age.
        clock.advance(Duration::from_secs(20));
        assert_eq!(cache.lookup(&key).unwrap().transcript, "new");
    }

    #[test]
    fn test_cache_ttl_boundary() {
        let (cache, clock) = manual_cache(0.0);
        let key = CacheKey::new("v1", "en");
        cache.store(key.clone(), make_response("hello"));

        clock.advance(Duration::from_secs(TTL) - Duration::from_millis(1));
        assert!(cache.lookup(&key).is_some());

        clock.advance(Duration::from_millis(1));
        assert!(cache.lookup(&key).is_some(), "age equal to TTL is still fresh");

        clock.advance(Duration::from_millis(1));
        assert!(cache.lookup(&key).is_none());
    }

    #[test]
    fn test_cache_expired_entry_is_miss_without_cleanup() {
        let (cache, clock) = manual_cache(0.0);
        let key = CacheKey::new("v1", "en");
        cache.store(key.clone(), make_response("hello"));
        clock.advance(Duration::from_secs(TTL + 1));

        // Probability zero: cleanup never runs, the stale entry stays put.
        assert_eq!(cache.maybe_cleanup(), 0);
        assert_eq!(cache.len(), 1);
        assert!(cache.lookup(&key).is_none());
    }

    #[test]
    fn test_cache_cleanup_expired() {
        let (cache, clock) = manual_cache(0.0);
        cache.store(CacheKey::new("old", "en"), make_response("old"));
        clock.advance(Duration::from_secs(TTL / 2));
        cache.store(CacheKey::new("new", "en"), make_response("new"));
        clock.advance(Duration::from_secs(TTL / 2 + 1));

        assert_eq!(cache.cleanup_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.lookup(&CacheKey::new("new", "en")).is_some());
    }

    #[test]
    fn test_cache_maybe_cleanup_always_runs_at_probability_one() {
        let (cache, clock) = manual_cache(1.0);
        cache.store(CacheKey::new("v1", "en"), make_response("a"));
        cache.store(CacheKey::new("v2", "en"), make_response("b"));
        clock.advance(Duration::from_secs(TTL + 1));

        assert_eq!(cache.maybe_cleanup(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_maybe_cleanup_keeps_fresh_entries() {
        let (cache, _clock) = manual_cache(1.0);
        cache.store(CacheKey::new("v1", "en"), make_response("a"));
        assert_eq!(cache.maybe_cleanup(), 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_cleanup_noop_on_empty() {
        let (cache, _clock) = manual_cache(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut untouched = rng.clone();

        assert_eq!(cache.maybe_cleanup_with(&mut rng), 0);
        assert!(cache.is_empty());
        // No random number was drawn.
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn test_cache_cleanup_gate_frequency() {
        let (cache, clock) = manual_cache(0.10);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut runs = 0;

        for i in 0..2000 {
            cache.store(CacheKey::new(format!("v{i}"), "en"), make_response("x"));
            clock.advance(Duration::from_secs(TTL + 1));
            if cache.maybe_cleanup_with(&mut rng) > 0 {
                runs += 1;
            }
        }

        // Roughly one pass in ten.
        assert!((120..=280).contains(&runs), "cleanup ran {runs} times");
    }

    #[test]
    fn test_cache_stats() {
        let (cache, clock) = manual_cache(0.0);
        cache.store(CacheKey::new("old", "en"), make_response("old"));
        clock.advance(Duration::from_secs(TTL + 1));
        cache.store(CacheKey::new("new", "en"), make_response("new"));

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.expired_entries, 1);
        assert_eq!(stats.valid_entries, 1);
    }

    #[test]
    fn test_cache_clear() {
        let cache = TranscriptCache::new();
        cache.store(CacheKey::new("v1", "en"), make_response("a"));
        cache.store(CacheKey::new("v2", "en"), make_response("b"));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_concurrent_access() {
        let cache = Arc::new(TranscriptCache::with_config(CacheConfig {
            ttl_seconds: TTL,
            cleanup_probability: 1.0,
        }));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..200 {
                        let key = CacheKey::new(format!("v{}", i % 16), "en");
                        cache.store(key.clone(), make_response(&format!("{t}-{i}")));
                        cache.maybe_cleanup();
                        assert!(cache.lookup(&key).is_some());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 16);
    }
}
