//! Cache-aside repository for one entity type.

use tracing::debug;

use super::{Backend, DomainObject, Result};
use crate::cache::{CacheConfig, CacheRegistry, TypedCache};

/// Facade over a backend that keeps the entity type's cache in lockstep.
///
/// Reads by id consult the cache first and fill it on a miss. Writes reach
/// the backend first and only then update or invalidate the cache, so a
/// failed write never leaves the cache ahead of the store. Backend calls are
/// made without holding the cache lock.
pub struct Repository<E: DomainObject, B: Backend<E>> {
    cache: TypedCache<E::Id, E>,
    backend: B,
}

impl<E: DomainObject, B: Backend<E>> Repository<E, B> {
    /// Creates a repository using the registry's cache for `E`, registering
    /// it with `config` if this is the first use of the type.
    pub fn new(registry: &CacheRegistry, config: CacheConfig, backend: B) -> Self {
        Self {
            cache: registry.register_or_get::<E>(config),
            backend,
        }
    }

    pub fn cache(&self) -> &TypedCache<E::Id, E> {
        &self.cache
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load by identity, cache first.
    ///
    /// The backend copy only fills the cache if no entry appeared while it
    /// was being read, so a concurrent `save` is not overwritten. A concurrent
    /// `delete` landing between the read and the fill can still leave the
    /// removed entity cached until its TTL runs out.
    pub fn get_by_id(&self, id: &E::Id) -> Result<Option<E>> {
        if let Some(entity) = self.cache.get(id) {
            debug!(entity = E::TYPE_NAME, %id, "Cache hit");
            return Ok(Some(entity));
        }

        debug!(entity = E::TYPE_NAME, %id, "Cache miss, loading from backend");
        let loaded = self.backend.load(id)?;
        if let Some(entity) = &loaded {
            self.cache.put_if_absent(entity.id(), entity.clone());
        }
        Ok(loaded)
    }

    /// Load by an optional identity; `None` touches neither cache nor backend.
    pub fn get_by_id_opt(&self, id: Option<&E::Id>) -> Result<Option<E>> {
        match id {
            Some(id) => self.get_by_id(id),
            None => Ok(None),
        }
    }

    /// First entity whose `field` equals `value`; the match is cached by id.
    ///
    /// Unknown field names never match.
    pub fn get_by(&self, field: &str, value: &str) -> Result<Option<E>> {
        let found = self
            .backend
            .all()?
            .into_iter()
            .find(|entity| entity.field(field).as_deref() == Some(value));

        if let Some(entity) = &found {
            self.cache.put_if_absent(entity.id(), entity.clone());
        }
        Ok(found)
    }

    /// Every entity, straight from the backend.
    pub fn get_all(&self) -> Result<Vec<E>> {
        self.backend.all()
    }

    /// Every entity matching `predicate`, straight from the backend.
    pub fn get_where<P>(&self, predicate: P) -> Result<Vec<E>>
    where
        P: Fn(&E) -> bool,
    {
        Ok(self
            .backend
            .all()?
            .into_iter()
            .filter(|entity| predicate(entity))
            .collect())
    }

    /// Create or update, then refresh the cached copy.
    pub fn save(&self, entity: E) -> Result<()> {
        self.backend.save(&entity)?;
        self.cache.put(entity.id(), entity);
        Ok(())
    }

    /// Delete, then invalidate the cached copy.
    pub fn delete(&self, id: &E::Id) -> Result<()> {
        self.backend.delete(id)?;
        self.cache.remove(id);
        Ok(())
    }

    /// Delete every record of the type, then clear its cache.
    pub fn delete_all(&self) -> Result<usize> {
        let removed = self.backend.delete_all()?;
        self.cache.clear();
        debug!(entity = E::TYPE_NAME, removed, "Deleted all records");
        Ok(removed)
    }
}
