//! Per-type cache parameters.

use std::time::Duration;

/// Default number of resident entries per entity type.
pub const DEFAULT_CAPACITY: usize = 50;

/// Default time-to-live: one hour.
pub const DEFAULT_TIME_TO_LIVE: Duration = Duration::from_secs(60 * 60);

/// Capacity and time-to-live for one typed cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum resident entries, never below 1
    pub capacity: usize,
    /// Age after which an entry is swept
    pub time_to_live: Duration,
}

impl CacheConfig {
    /// Builds a config, clamping a zero capacity to 1.
    pub fn new(capacity: usize, time_to_live: Duration) -> Self {
        Self {
            capacity: capacity.max(1),
            time_to_live,
        }
    }

    /// Same as [`CacheConfig::new`] with the TTL in whole seconds.
    pub fn from_secs(capacity: usize, ttl_secs: u64) -> Self {
        Self::new(capacity, Duration::from_secs(ttl_secs))
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    pub fn time_to_live(mut self, ttl: Duration) -> Self {
        self.time_to_live = ttl;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TIME_TO_LIVE)
    }
}
