//! Cache Store Module
//!
//! Single-threaded cache engine combining HashMap storage with LRU tracking
//! and TTL expiration. Every time-dependent operation takes `now` explicitly;
//! [`crate::cache::TypedCache`] supplies the clock and the lock.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use crate::cache::{CacheConfig, CacheEntry, CacheStats, LruTracker};

// == Cache Store ==
/// Bounded key/value storage with LRU eviction and absolute TTL.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Diagnostic counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Age after which an entry is dropped
    time_to_live: Duration,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new store from the given parameters.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            capacity: config.capacity.max(1),
            time_to_live: config.time_to_live,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn time_to_live(&self) -> Duration {
        self.time_to_live
    }

    // == Put ==
    /// Stores a value under `key`, stamped with `now`.
    ///
    /// An existing entry is replaced by a fresh one, which counts as unread.
    /// If a new key pushes the store past capacity, the least recently used
    /// key is evicted and returned.
    pub fn put(&mut self, key: K, value: V, now: Instant) -> Option<K> {
        let mut evicted = None;

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            if let Some(oldest) = self.lru.evict_oldest() {
                self.entries.remove(&oldest);
                self.stats.record_eviction();
                evicted = Some(oldest);
            }
        }

        self.entries.insert(key.clone(), CacheEntry::new(value, now));
        self.lru.insert(&key);
        self.stats.set_total_entries(self.entries.len());

        evicted
    }

    /// Stores a value under `key` only if no entry is resident for it.
    ///
    /// Returns whether the value was stored. A resident entry keeps its value,
    /// insertion time and recency.
    pub fn put_if_absent(&mut self, key: K, value: V, now: Instant) -> (bool, Option<K>) {
        if self.entries.contains_key(&key) {
            return (false, None);
        }
        (true, self.put(key, value, now))
    }

    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// A hit marks the key as most recently read without touching its
    /// insertion time. An entry found past its TTL is dropped on the spot and
    /// reported as a miss.
    pub fn get(&mut self, key: &K, now: Instant) -> Option<V> {
        let expired = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired_at(now, self.time_to_live),
        };

        if expired {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            self.stats.set_total_entries(self.entries.len());
            return None;
        }

        self.stats.record_hit();
        self.lru.touch(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Returns whether `key` is resident, without affecting LRU order or stats.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    // == Remove ==
    /// Drops the entry for `key`; returns whether one was present.
    pub fn remove(&mut self, key: &K) -> bool {
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
            self.stats.set_total_entries(self.entries.len());
            true
        } else {
            false
        }
    }

    // == Clear ==
    /// Drops every entry; returns how many were resident.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        self.stats.set_total_entries(0);
        count
    }

    // == Sweep ==
    /// Removes all entries whose age as of `now` has reached the TTL.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&mut self, now: Instant) -> usize {
        let ttl = self.time_to_live;
        let expired_keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now, ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        self.stats.record_expirations(expired_keys.len());
        self.stats.set_total_entries(self.entries.len());
        expired_keys.len()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
