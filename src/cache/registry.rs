//! Cache registry - one typed cache per entity type.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::info;

use super::{CacheConfig, CacheStats, TypedCache};
use crate::persistence::DomainObject;

/// Type-erased view of a registered cache, used by the sweeper and the admin API.
pub trait ErasedCache: Send + Sync {
    fn name(&self) -> &str;
    fn sweep(&self, now: Instant) -> usize;
    fn clear(&self);
    fn stats(&self) -> CacheStats;
    fn capacity(&self) -> usize;
    fn time_to_live(&self) -> Duration;
}

impl<K, V> ErasedCache for TypedCache<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        TypedCache::name(self)
    }

    fn sweep(&self, now: Instant) -> usize {
        TypedCache::sweep(self, now)
    }

    fn clear(&self) {
        TypedCache::clear(self)
    }

    fn stats(&self) -> CacheStats {
        TypedCache::stats(self)
    }

    fn capacity(&self) -> usize {
        TypedCache::capacity(self)
    }

    fn time_to_live(&self) -> Duration {
        TypedCache::time_to_live(self)
    }
}

/// Registry slot: the typed handle for downcasting plus an erased view of it.
struct Registered {
    typed: Box<dyn Any + Send + Sync>,
    erased: Arc<dyn ErasedCache>,
}

/// Process-wide map from entity type to its cache.
///
/// Constructed once by the composition root and shared by `Arc` or clone.
/// The map has its own lock, independent of every cache's lock, so
/// registering a type never blocks reads and writes on other caches.
///
/// ## Example
///
/// ```ignore
/// let registry = CacheRegistry::new();
/// let patients = registry.register_or_get::<Patient>(CacheConfig::default());
/// assert!(registry.get_if_present::<Patient>().unwrap().ptr_eq(&patients));
/// ```
#[derive(Clone)]
pub struct CacheRegistry {
    caches: Arc<RwLock<HashMap<TypeId, Registered>>>,
}

impl CacheRegistry {
    /// Create a new empty cache registry.
    pub fn new() -> Self {
        info!("Cache registry initialized");
        Self {
            caches: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Return the cache for `E`, creating it with `config` on first use.
    ///
    /// The first registration wins; `config` is ignored on later calls.
    /// Concurrent first calls still produce a single cache.
    pub fn register_or_get<E: DomainObject>(&self, config: CacheConfig) -> TypedCache<E::Id, E> {
        if let Some(cache) = self.get_if_present::<E>() {
            return cache;
        }

        let mut caches = self.caches.write();
        let slot = caches.entry(TypeId::of::<E>()).or_insert_with(|| {
            info!(
                cache = E::TYPE_NAME,
                capacity = config.capacity,
                ttl_secs = config.time_to_live.as_secs(),
                "Registering cache"
            );
            let cache: TypedCache<E::Id, E> = TypedCache::new(E::TYPE_NAME, config);
            Registered {
                erased: Arc::new(cache.clone()),
                typed: Box::new(cache),
            }
        });

        downcast::<E>(slot)
    }

    /// Get the cache for `E` without creating one.
    pub fn get_if_present<E: DomainObject>(&self) -> Option<TypedCache<E::Id, E>> {
        self.caches.read().get(&TypeId::of::<E>()).map(downcast::<E>)
    }

    /// Find a cache by its entity type name.
    pub fn find_by_name(&self, name: &str) -> Option<Arc<dyn ErasedCache>> {
        self.caches
            .read()
            .values()
            .find(|slot| slot.erased.name() == name)
            .map(|slot| Arc::clone(&slot.erased))
    }

    /// Current set of caches. Caches registered afterwards are not included.
    pub fn snapshot(&self) -> Vec<Arc<dyn ErasedCache>> {
        self.caches
            .read()
            .values()
            .map(|slot| Arc::clone(&slot.erased))
            .collect()
    }

    /// Names of all registered caches, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .caches
            .read()
            .values()
            .map(|slot| slot.erased.name().to_string())
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.caches.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.caches.read().is_empty()
    }
}

// Slots are keyed by TypeId::of::<E>() and only ever hold TypedCache<E::Id, E>.
fn downcast<E: DomainObject>(slot: &Registered) -> TypedCache<E::Id, E> {
    match slot.typed.downcast_ref::<TypedCache<E::Id, E>>() {
        Some(cache) => cache.clone(),
        None => unreachable!("cache slot for {} holds a foreign type", E::TYPE_NAME),
    }
}

impl Default for CacheRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CacheRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheRegistry")
            .field("cache_names", &self.names())
            .finish()
    }
}
