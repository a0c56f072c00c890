//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::ErasedCache;

/// Statistics for one registered cache (GET /caches, GET /caches/:name)
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    /// Entity type name
    pub name: String,
    /// Maximum resident entries
    pub capacity: usize,
    /// Entry lifetime in seconds
    pub time_to_live_secs: u64,
    /// Current number of entries
    pub total_entries: usize,
    pub hits: u64,
    pub misses: u64,
    /// Capacity evictions
    pub evictions: u64,
    /// TTL expirations
    pub expirations: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl CacheStatsResponse {
    /// Captures the current state of a cache.
    pub fn from_cache(cache: &dyn ErasedCache) -> Self {
        let stats = cache.stats();
        Self {
            name: cache.name().to_string(),
            capacity: cache.capacity(),
            time_to_live_secs: cache.time_to_live().as_secs(),
            total_entries: stats.total_entries,
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for DELETE /caches/:name
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// The cache that was cleared
    pub name: String,
}

impl ClearResponse {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            message: format!("Cache '{}' cleared", name),
            name,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Number of registered caches
    pub caches: usize,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(caches: usize) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            caches,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
