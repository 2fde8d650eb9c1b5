//! In-memory TTL cache.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use spotmark_core::error::{Result, SpotmarkError};

/// Cache entry carrying its own expiry instant.
#[derive(Clone, Debug)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    /// An entry is present to callers iff `now < expires_at`.
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory cache whose entries expire a fixed duration after being written.
///
/// Thread-safe; one instance per value type. Expiry is evaluated lazily at
/// read time, so no background sweeper or timer is needed. A `set` for an
/// existing key fully replaces the prior entry, value and expiry both.
#[derive(Debug)]
pub struct TtlCache<V> {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    /// Creates an empty cache whose every future entry expires `ttl` after
    /// it was written.
    ///
    /// # Errors
    ///
    /// Rejects a zero TTL: such a cache could never serve a hit.
    pub fn new(ttl: Duration) -> Result<Self> {
        if ttl.is_zero() {
            return Err(SpotmarkError::ConfigError(
                "cache TTL must be positive".into(),
            ));
        }

        Ok(Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        })
    }

    /// Creates a cache from a TTL in milliseconds.
    pub fn from_millis(ttl_ms: u64) -> Result<Self> {
        Self::new(Duration::from_millis(ttl_ms))
    }

    /// Gets the cached value for `key`.
    ///
    /// Returns `None` if the key was never written or its entry has expired.
    /// An expired entry is removed as a side effect of the read, so a later
    /// `get` behaves identically to "key never inserted".
    pub fn get(&self, key: &str) -> Option<V> {
        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired() => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        // Lazy cleanup: drop the stale entry. Re-check under the write lock;
        // another writer may have replaced it since the read lock was released.
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(CacheEntry::is_expired) {
            entries.remove(key);
        }
        None
    }

    /// Stores `value` under `key`, expiring `ttl` from now.
    ///
    /// Unconditionally replaces any prior entry for the key, expired or not.
    pub fn set(&self, key: impl Into<String>, value: V) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.write().insert(key.into(), entry);
    }

    /// The fixed TTL this cache applies to every write.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, counting expired ones not yet read.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::thread::sleep;

    use spotmark_core::types::{SpotPrice, SpotPriceMap};

    #[test]
    fn test_set_get_roundtrip() {
        let cache = TtlCache::from_millis(30_000).unwrap();
        cache.set("bitcoin:7", vec![(1_i64, 50_000.0_f64), (2, 51_000.0)]);

        let series = cache.get("bitcoin:7").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[1], (2, 51_000.0));
    }

    #[test]
    fn test_miss_on_unknown_key() {
        let cache: TtlCache<u64> = TtlCache::from_millis(30_000).unwrap();
        assert!(cache.get("never-written").is_none());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let err = TtlCache::<u64>::new(Duration::ZERO).unwrap_err();
        assert!(matches!(err, SpotmarkError::ConfigError(_)));
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let cache = TtlCache::from_millis(30_000).unwrap();
        cache.set("k", 1_u64);
        cache.set("k", 2_u64);
        assert_eq!(cache.get("k"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_entry_expires() {
        let cache = TtlCache::from_millis(100).unwrap();
        cache.set("k", 7_u64);

        sleep(Duration::from_millis(30));
        assert_eq!(cache.get("k"), Some(7));

        sleep(Duration::from_millis(120));
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_overwrite_resets_expiry() {
        let cache = TtlCache::from_millis(400).unwrap();
        cache.set("k", "v1");

        sleep(Duration::from_millis(200));
        assert_eq!(cache.get("k"), Some("v1"));
        cache.set("k", "v2");

        // Past the first write's window, inside the second's.
        sleep(Duration::from_millis(250));
        assert_eq!(cache.get("k"), Some("v2"));

        sleep(Duration::from_millis(450));
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_expired_reads_are_idempotent() {
        let cache = TtlCache::from_millis(50).unwrap();
        cache.set("k", 1_u64);
        sleep(Duration::from_millis(80));

        assert!(cache.get("k").is_none());
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_expired_entry_is_lazily_removed() {
        let cache = TtlCache::from_millis(50).unwrap();
        cache.set("k", 1_u64);
        sleep(Duration::from_millis(80));

        // Still physically present until a read touches it.
        assert_eq!(cache.len(), 1);
        assert!(cache.get("k").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_keys_are_independent() {
        let cache = TtlCache::from_millis(30_000).unwrap();
        cache.set("a", 1_u64);
        cache.set("b", 2_u64);
        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("b"), Some(2));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_spot_price_map_payload() {
        // The shape the price service stores: sorted coin ids → quote map.
        let cache: TtlCache<SpotPriceMap> = TtlCache::from_millis(100).unwrap();
        let mut prices = HashMap::new();
        prices.insert("bitcoin".to_string(), SpotPrice { usd: 50_000.0 });
        prices.insert("ethereum".to_string(), SpotPrice { usd: 3_000.0 });
        cache.set("bitcoin,ethereum", prices);

        let hit = cache.get("bitcoin,ethereum").unwrap();
        assert_eq!(hit["bitcoin"].usd, 50_000.0);
        assert_eq!(hit["ethereum"].usd, 3_000.0);

        sleep(Duration::from_millis(130));
        assert!(cache.get("bitcoin,ethereum").is_none());
    }

    #[test]
    fn test_ttl_accessor() {
        let cache: TtlCache<u64> = TtlCache::from_millis(30_000).unwrap();
        assert_eq!(cache.ttl(), Duration::from_secs(30));
    }
}
