//! Persistence Facade
//!
//! The entity-store abstraction the caches sit in front of. The backend is
//! always the source of truth; the cache only saves round trips.
//!
//! - `DomainObject` - what every persisted entity type provides
//! - `Backend` - load/save/delete/scan against some store
//! - `Repository` - cache-aside facade keeping one `TypedCache` in lockstep with writes

mod backend;
mod repository;

use std::fmt;
use std::hash::Hash;

use thiserror::Error;

pub use backend::{Backend, MemoryBackend};
pub use repository::Repository;

/// A persisted domain type with a single identity field.
pub trait DomainObject: Clone + Send + Sync + 'static {
    /// Identity value: a username, a numeric id, ...
    type Id: Hash + Eq + Ord + Clone + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Name of the entity type; doubles as the cache name.
    const TYPE_NAME: &'static str;

    fn id(&self) -> Self::Id;

    /// Returns the textual value of the named field, or `None` if the type
    /// has no such field.
    fn field(&self, name: &str) -> Option<String>;
}

/// Failures raised by a backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
