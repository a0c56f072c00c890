//! Typed cache handle shared between request paths and the sweeper.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{CacheConfig, CacheStats, CacheStore};

/// A cheaply cloneable handle to the cache of one entity type.
///
/// Every clone shares the same store behind a single mutex, so `get`, `put`,
/// `remove`, `clear` and `sweep` are mutually exclusive. No method performs
/// I/O while holding the lock.
///
/// Storage grows on demand up to the configured capacity. LRU bookkeeping
/// scans a queue of resident keys, so `get`, `put` and `remove` are linear in
/// the number of entries; per-type caches are expected to hold tens of them.
pub struct TypedCache<K, V> {
    inner: Arc<Mutex<CacheStore<K, V>>>,
    name: Arc<str>,
}

// Manual Clone implementation that doesn't require K: Clone, V: Clone
impl<K, V> Clone for TypedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            name: Arc::clone(&self.name),
        }
    }
}

impl<K, V> TypedCache<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: Clone,
{
    /// Create a new typed cache with the given name and config.
    pub fn new(name: impl Into<Arc<str>>, config: CacheConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheStore::new(config))),
            name: name.into(),
        }
    }

    /// Get the name of this cache.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a value from the cache.
    ///
    /// Returns `Some(value)` on a hit. A miss is an ordinary outcome; loading
    /// from the backing store is up to the caller.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key, Instant::now())
    }

    /// Like [`TypedCache::get`], for callers holding an optional key.
    ///
    /// `None` yields `None` without taking the lock.
    pub fn get_opt(&self, key: Option<&K>) -> Option<V> {
        key.and_then(|key| self.get(key))
    }

    /// Insert a key-value pair, replacing any previous entry.
    pub fn put(&self, key: K, value: V) {
        let evicted = self.inner.lock().put(key, value, Instant::now());
        if let Some(evicted) = evicted {
            debug!(cache = %self.name, key = ?evicted, "Evicted least recently used entry");
        }
    }

    /// Insert a value unless the key is already resident.
    ///
    /// Used to fill the cache after a backend read, so a value written in the
    /// meantime is not overwritten with the older copy. Returns whether the
    /// value was stored.
    pub fn put_if_absent(&self, key: K, value: V) -> bool {
        let (stored, evicted) = self.inner.lock().put_if_absent(key, value, Instant::now());
        if let Some(evicted) = evicted {
            debug!(cache = %self.name, key = ?evicted, "Evicted least recently used entry");
        }
        stored
    }

    /// Remove a key. Absent keys are a no-op.
    pub fn remove(&self, key: &K) {
        self.inner.lock().remove(key);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let dropped = self.inner.lock().clear();
        debug!(cache = %self.name, dropped, "Cache cleared");
    }

    /// Remove every entry whose age as of `now` has reached the TTL.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&self, now: Instant) -> usize {
        self.inner.lock().sweep(now)
    }

    /// Check if a key is resident, without counting as a read.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    /// Snapshot of the diagnostic counters.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn time_to_live(&self) -> Duration {
        self.inner.lock().time_to_live()
    }

    /// Returns true if both handles share the same underlying store.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<K, V> fmt::Debug for TypedCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedCache")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
