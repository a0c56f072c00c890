//! Domain Cache - per-entity-type caches in front of a persistence facade
//!
//! Provides bounded, TTL-expiring LRU caches keyed by entity type, a shared
//! background sweeper, a cache-aside repository and an admin HTTP API.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod persistence;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheConfig, CacheRegistry, TypedCache};
pub use config::Config;
pub use persistence::{DomainObject, Repository};
pub use tasks::{EvictionSweeper, SweeperHandle};
