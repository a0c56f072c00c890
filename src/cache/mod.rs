//! Cache Module
//!
//! In-memory caches of persisted domain objects, one per entity type, with
//! absolute TTL expiration and LRU capacity eviction.
//!
//! ## Architecture
//!
//! - `CacheStore` - single-threaded engine (storage, LRU order, TTL, stats)
//! - `TypedCache` - shared handle putting one mutex around a `CacheStore`
//! - `CacheRegistry` - one `TypedCache` per entity type, created on demand

mod config;
mod entry;
mod lru;
mod registry;
mod stats;
mod store;
mod typed;


// Re-export public types
pub use config::{CacheConfig, DEFAULT_CAPACITY, DEFAULT_TIME_TO_LIVE};
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use registry::{CacheRegistry, ErasedCache};
pub use stats::CacheStats;
pub use store::CacheStore;
pub use typed::TypedCache;
