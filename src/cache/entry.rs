//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cache entry: the stored value plus the instant it was stored.
///
/// The time-to-live is a property of the cache as a whole, not of the entry,
/// so freshness checks take the cache TTL as an argument.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant captured at insertion
    pub stored_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: V) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
        }
    }

    // == Age ==
    /// Time elapsed since the entry was stored.
    pub fn age(&self) -> Duration {
        self.stored_at.elapsed()
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived the given TTL.
    ///
    /// Boundary condition: an entry is expired only when strictly more than
    /// `ttl` has elapsed since insertion. At exactly `ttl` elapsed the entry
    /// is still fresh.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() > ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_starts_fresh() {
        let entry = CacheEntry::new("test_value");

        assert_eq!(entry.value, "test_value");
        assert!(!entry.is_expired(Duration::from_secs(60)));
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let entry = CacheEntry::new("test_value");

        sleep(Duration::from_millis(60));

        assert!(entry.is_expired(Duration::from_millis(40)));
    }

    #[test]
    fn test_entry_fresh_within_ttl() {
        let entry = CacheEntry::new("test_value");

        sleep(Duration::from_millis(20));

        assert!(!entry.is_expired(Duration::from_secs(10)));
    }

    #[test]
    fn test_zero_ttl_expires_once_time_has_passed() {
        let entry = CacheEntry::new("test_value");
        sleep(Duration::from_millis(5));
        assert!(entry.is_expired(Duration::ZERO));
    }

    #[test]
    fn test_age_grows() {
        let entry = CacheEntry::new(1u32);
        let first = entry.age();
        sleep(Duration::from_millis(10));
        assert!(entry.age() > first);
    }
}
