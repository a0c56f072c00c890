//! Backend trait and the in-memory store used by the binary and tests.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::{DomainObject, PersistenceError, Result};

/// Storage operations for one entity type.
pub trait Backend<E: DomainObject>: Send + Sync {
    /// Load by identity. `Ok(None)` means no such record.
    fn load(&self, id: &E::Id) -> Result<Option<E>>;

    /// Create or update the record with `entity.id()`.
    fn save(&self, entity: &E) -> Result<()>;

    /// Delete by identity; a missing record is `PersistenceError::NotFound`.
    fn delete(&self, id: &E::Id) -> Result<()>;

    /// Every record, ordered by identity.
    fn all(&self) -> Result<Vec<E>>;

    /// Delete every record; returns how many were removed.
    fn delete_all(&self) -> Result<usize>;
}

/// Thread-safe in-memory backend, ordered by identity.
#[derive(Debug)]
pub struct MemoryBackend<E: DomainObject> {
    records: RwLock<BTreeMap<E::Id, E>>,
}

impl<E: DomainObject> MemoryBackend<E> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }

    /// Builds a backend pre-populated with `entities`.
    pub fn with_records(entities: impl IntoIterator<Item = E>) -> Self {
        let records = entities.into_iter().map(|e| (e.id(), e)).collect();
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl<E: DomainObject> Default for MemoryBackend<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DomainObject> Backend<E> for MemoryBackend<E> {
    fn load(&self, id: &E::Id) -> Result<Option<E>> {
        Ok(self.records.read().get(id).cloned())
    }

    fn save(&self, entity: &E) -> Result<()> {
        self.records.write().insert(entity.id(), entity.clone());
        Ok(())
    }

    fn delete(&self, id: &E::Id) -> Result<()> {
        match self.records.write().remove(id) {
            Some(_) => Ok(()),
            None => Err(PersistenceError::NotFound {
                entity: E::TYPE_NAME,
                id: id.to_string(),
            }),
        }
    }

    fn all(&self) -> Result<Vec<E>> {
        Ok(self.records.read().values().cloned().collect())
    }

    fn delete_all(&self) -> Result<usize> {
        let mut records = self.records.write();
        let count = records.len();
        records.clear();
        Ok(count)
    }
}
