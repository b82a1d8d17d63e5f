//! Cache Store Module
//!
//! In-memory TTL cache with lazy, expire-on-read expiration.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats, DEFAULT_TTL_SECONDS};

// == TTL Cache ==
/// In-memory cache mapping opaque string keys to values of type `V`.
///
/// One TTL, fixed at construction, applies to every entry. Expiration is
/// lazy: a stale entry is detected and removed by the `get` that observes
/// it. There is no background sweeper and no capacity bound, so the mapping
/// only shrinks through expired reads, `del`, or `clear`.
///
/// The cache does no I/O and never suspends; callers that share it across
/// tasks wrap it in a lock and must not hold that lock across await points
/// that perform upstream work.
#[derive(Debug)]
pub struct TtlCache<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Time-to-live shared by all entries
    ttl: Duration,
    /// Hit/miss statistics
    stats: CacheStats,
}

impl<V: Clone> TtlCache<V> {
    // == Constructor ==
    /// Creates an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            stats: CacheStats::new(),
        }
    }

    // == Get ==
    /// Returns the value stored under `key`, if present and fresh.
    ///
    /// A stale entry is removed as a side effect of the read and reported
    /// as a miss. The returned value is a clone; feed values are stored as
    /// `Arc`s so the clone is a reference-count bump, and callers treat the
    /// shared payload as read-only.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(self.ttl),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.stats.set_entries(self.entries.len());
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Set ==
    /// Inserts or overwrites the entry for `key`, stamping it with the
    /// current instant. Re-setting an existing key resets its expiry clock.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        self.entries.insert(key.into(), CacheEntry::new(value));
        self.stats.set_entries(self.entries.len());
    }

    // == Delete ==
    /// Removes the entry for `key` if present; no-op otherwise.
    pub fn del(&mut self, key: &str) {
        self.entries.remove(key);
        self.stats.set_entries(self.entries.len());
    }

    // == Keys ==
    /// Snapshot of all stored keys, in no particular order.
    ///
    /// Deliberately includes keys whose entries have already outlived the
    /// TTL: enumeration does not trigger expiry, only `get` does. Callers
    /// using this for diagnostics may therefore see keys that the next
    /// `get` would report as absent.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    // == Clear ==
    /// Removes all entries unconditionally.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.set_entries(0);
    }

    // == Stats ==
    /// Returns current hit/miss statistics with an up-to-date entry count.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_entries(self.entries.len());
        stats
    }

    // == TTL ==
    /// The TTL applied to every entry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Length ==
    /// Number of entries currently stored, stale entries included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for TtlCache<V> {
    /// An empty cache with the stock 300-second TTL.
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TTL_SECONDS))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn cache_with_ttl_ms(ms: u64) -> TtlCache<String> {
        TtlCache::new(Duration::from_millis(ms))
    }

    #[test]
    fn test_get_on_empty_cache() {
        let mut cache: TtlCache<String> = TtlCache::default();

        assert_eq!(cache.get("anything"), None);
        assert_eq!(cache.get(""), None);
        assert_eq!(cache.get("general|en|us"), None);
    }

    #[test]
    fn test_set_then_get_returns_value() {
        let mut cache = cache_with_ttl_ms(60_000);

        cache.set("key1", "value1".to_string());

        assert_eq!(cache.get("key1"), Some("value1".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_expired_entry_removes_it() {
        let mut cache = cache_with_ttl_ms(50);

        cache.set("key1", "value1".to_string());
        sleep(Duration::from_millis(80));

        assert_eq!(cache.get("key1"), None);
        assert!(cache.is_empty(), "expired read must remove the entry");
    }

    #[test]
    fn test_get_just_before_ttl_still_fresh() {
        let mut cache = cache_with_ttl_ms(200);

        cache.set("key1", "value1".to_string());
        sleep(Duration::from_millis(50));

        assert_eq!(cache.get("key1"), Some("value1".to_string()));
    }

    #[test]
    fn test_overwrite_returns_latest_value() {
        let mut cache = cache_with_ttl_ms(60_000);

        cache.set("key1", "old".to_string());
        cache.set("key1", "new".to_string());

        assert_eq!(cache.get("key1"), Some("new".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_reset_extends_expiry_clock() {
        let mut cache = cache_with_ttl_ms(100);

        cache.set("key1", "value1".to_string());
        sleep(Duration::from_millis(60));

        // Re-set discards the old stored_at.
        cache.set("key1", "value2".to_string());
        sleep(Duration::from_millis(60));

        // 120ms after the first set, 60ms after the second: still fresh.
        assert_eq!(cache.get("key1"), Some("value2".to_string()));
    }

    #[test]
    fn test_del_removes_before_ttl() {
        let mut cache = cache_with_ttl_ms(60_000);

        cache.set("key1", "value1".to_string());
        cache.del("key1");

        assert_eq!(cache.get("key1"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_del_missing_key_is_noop() {
        let mut cache = cache_with_ttl_ms(60_000);

        cache.set("key1", "value1".to_string());
        cache.del("no_such_key");

        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_keys_snapshot() {
        let mut cache = cache_with_ttl_ms(60_000);

        cache.set("a", "1".to_string());
        cache.set("b", "2".to_string());

        let mut keys = cache.keys();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_keys_lists_expired_key_until_read_observes_it() {
        // Enumeration does not expire; only get does. The stale key stays
        // visible via keys() until a get for it runs.
        let mut cache = cache_with_ttl_ms(50);

        cache.set("stale", "value".to_string());
        sleep(Duration::from_millis(80));

        assert_eq!(cache.keys(), vec!["stale".to_string()]);
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.get("stale"), None);

        assert!(cache.keys().is_empty());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut cache = cache_with_ttl_ms(60_000);

        cache.set("a", "1".to_string());
        cache.set("b", "2".to_string());
        cache.clear();

        assert!(cache.keys().is_empty());
        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
    }

    #[test]
    fn test_stats_track_hits_and_misses() {
        let mut cache = cache_with_ttl_ms(60_000);

        cache.set("key1", "value1".to_string());
        cache.get("key1"); // hit
        cache.get("missing"); // miss

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_expired_read_counts_as_miss() {
        let mut cache = cache_with_ttl_ms(50);

        cache.set("key1", "value1".to_string());
        sleep(Duration::from_millis(80));
        cache.get("key1");

        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 0);
    }

    #[test]
    fn test_default_ttl_is_300_seconds() {
        let cache: TtlCache<String> = TtlCache::default();
        assert_eq!(cache.ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_shared_value_is_not_copied() {
        use std::sync::Arc;

        let mut cache: TtlCache<Arc<Vec<u32>>> = TtlCache::new(Duration::from_secs(60));
        let stored = Arc::new(vec![1, 2, 3]);
        cache.set("k", Arc::clone(&stored));

        let fetched = cache.get("k").unwrap();
        assert!(Arc::ptr_eq(&stored, &fetched));
    }
}
