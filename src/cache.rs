//! In-process TTL cache with last-write-wins semantics per key.
//!
//! Expiry is visible lazily on every read path; `cleanup_expired` is the
//! explicit sweep that actually deletes rows. The `*_at` variants take the
//! clock as an argument so tests can simulate elapsed time.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
}

#[derive(Debug, Default)]
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Store a value, overwriting any prior entry for the key.
    pub fn put(&self, key: &str, value: V, ttl: Duration) {
        self.put_at(key, value, ttl, Utc::now());
    }

    pub fn put_at(&self, key: &str, value: V, ttl: Duration, now: DateTime<Utc>) {
        let entry = CacheEntry {
            value,
            updated_at: now,
            expires_at: now + ttl,
        };
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), entry);
    }

    /// Fetch a value if it has not expired. An expired entry reads the same as
    /// a missing one; it is not deleted here.
    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Utc::now())
    }

    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<V> {
        let entries = self.entries.lock().unwrap();
        entries
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value.clone())
    }

    /// Every non-expired entry, for bulk reads without per-key calls.
    pub fn all_valid(&self) -> HashMap<String, V> {
        self.all_valid_at(Utc::now())
    }

    pub fn all_valid_at(&self, now: DateTime<Utc>) -> HashMap<String, V> {
        let entries = self.entries.lock().unwrap();
        entries
            .iter()
            .filter(|(_, entry)| entry.expires_at > now)
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats_at(Utc::now())
    }

    pub fn stats_at(&self, now: DateTime<Utc>) -> CacheStats {
        let entries = self.entries.lock().unwrap();
        let total_entries = entries.len();
        let valid_entries = entries
            .values()
            .filter(|entry| entry.expires_at > now)
            .count();
        CacheStats {
            total_entries,
            valid_entries,
            expired_entries: total_entries - valid_entries,
        }
    }

    /// Delete entries past expiry, returning how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        self.cleanup_expired_at(Utc::now())
    }

    pub fn cleanup_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_roundtrip() {
        let cache = TtlCache::new();
        cache.put("SOL", 42_u32, Duration::hours(1));
        assert_eq!(cache.get("SOL"), Some(42));
        assert_eq!(cache.get("BONK"), None);
    }

    #[test]
    fn overwrite_is_last_write_wins() {
        let cache = TtlCache::new();
        let now = Utc::now();
        cache.put_at("SOL", 1_u32, Duration::hours(1), now);
        cache.put_at("SOL", 2_u32, Duration::hours(1), now);
        assert_eq!(cache.get_at("SOL", now), Some(2));
        assert_eq!(cache.stats_at(now).total_entries, 1);
    }

    #[test]
    fn expired_entry_reads_as_absent_but_stays_until_sweep() {
        let cache = TtlCache::new();
        let now = Utc::now();
        cache.put_at("SOL", 7_u32, Duration::hours(24), now);

        let later = now + Duration::hours(24);
        assert_eq!(cache.get_at("SOL", later), None);

        let stats = cache.stats_at(later);
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.valid_entries, 0);
        assert_eq!(stats.expired_entries, 1);

        assert_eq!(cache.cleanup_expired_at(later), 1);
        assert_eq!(cache.stats_at(later).total_entries, 0);
    }
}
