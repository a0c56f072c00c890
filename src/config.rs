//! Configuration Module
//!
//! Handles loading process configuration from environment variables.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use tracing::warn;

use crate::cache::{CacheConfig, DEFAULT_CAPACITY};

/// Process configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default capacity of each entity type's cache
    pub cache_capacity: usize,
    /// Default TTL in seconds of each entity type's cache
    pub cache_ttl: u64,
    /// Sweeper interval in seconds
    pub sweep_interval: u64,
    /// Admin HTTP server port
    pub server_port: u16,
    /// Per-type overrides keyed by entity type name
    pub overrides: HashMap<String, CacheConfig>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Entries per entity type (default: 50)
    /// - `CACHE_TTL` - Entry lifetime in seconds (default: 3600)
    /// - `SWEEP_INTERVAL` - Sweeper frequency in seconds (default: 2)
    /// - `SERVER_PORT` - Admin HTTP port (default: 3000)
    /// - `CACHE_OVERRIDES` - `Name=capacity:ttl` pairs, comma separated
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.cache_capacity),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            sweep_interval: parse_var("SWEEP_INTERVAL").unwrap_or(defaults.sweep_interval),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            overrides: env::var("CACHE_OVERRIDES")
                .map(|raw| parse_overrides(&raw))
                .unwrap_or_default(),
        }
    }

    /// Cache parameters for an entity type, honoring overrides.
    pub fn cache_config_for(&self, type_name: &str) -> CacheConfig {
        self.overrides
            .get(type_name)
            .copied()
            .unwrap_or_else(|| CacheConfig::from_secs(self.cache_capacity, self.cache_ttl))
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CAPACITY,
            cache_ttl: 3600,
            sweep_interval: 2,
            server_port: 3000,
            overrides: HashMap::new(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Parses `Patient=100:600,User=20:60`. Malformed items are skipped.
fn parse_overrides(raw: &str) -> HashMap<String, CacheConfig> {
    let mut overrides = HashMap::new();

    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let parsed = item.split_once('=').and_then(|(name, params)| {
            let (capacity, ttl) = params.split_once(':')?;
            let capacity = capacity.trim().parse().ok()?;
            let ttl = ttl.trim().parse().ok()?;
            Some((name.trim().to_string(), CacheConfig::from_secs(capacity, ttl)))
        });

        match parsed {
            Some((name, config)) if !name.is_empty() => {
                overrides.insert(name, config);
            }
            _ => warn!("Ignoring malformed cache override: {}", item),
        }
    }

    overrides
}
