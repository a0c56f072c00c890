//! Cache Entry Module
//!
//! Defines a single cached domain object together with its insertion time.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cached value and the instant it was inserted.
///
/// `created_at` is fixed for the lifetime of the entry. Refreshing a value
/// means inserting a new entry, never rewriting the timestamp.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion instant
    created_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with `now`.
    pub fn new(value: V, now: Instant) -> Self {
        Self {
            value,
            created_at: now,
        }
    }

    /// Returns the insertion instant.
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    // == Age ==
    /// Returns how long the entry has been resident as of `now`.
    ///
    /// Saturates to zero if `now` precedes the insertion instant.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `ttl` as of `now`.
    ///
    /// Boundary condition: an entry whose age equals the TTL is expired.
    pub fn is_expired_at(&self, now: Instant, ttl: Duration) -> bool {
        self.age_at(now) >= ttl
    }

    /// Returns the time left before the entry becomes eligible for sweeping.
    pub fn ttl_remaining_at(&self, now: Instant, ttl: Duration) -> Duration {
        ttl.saturating_sub(self.age_at(now))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let now = Instant::now();
        let entry = CacheEntry::new("alice", now);

        assert_eq!(entry.value, "alice");
        assert_eq!(entry.created_at(), now);
        assert_eq!(entry.age_at(now), Duration::ZERO);
    }

    #[test]
    fn test_entry_not_expired_before_ttl() {
        let t0 = Instant::now();
        let entry = CacheEntry::new(1u32, t0);
        let ttl = Duration::from_secs(10);

        assert!(!entry.is_expired_at(t0 + Duration::from_millis(9_999), ttl));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let t0 = Instant::now();
        let entry = CacheEntry::new(1u32, t0);
        let ttl = Duration::from_secs(10);

        assert!(entry.is_expired_at(t0 + ttl, ttl), "Entry should be expired at boundary");
        assert!(entry.is_expired_at(t0 + ttl + Duration::from_millis(1), ttl));
    }

    #[test]
    fn test_age_saturates_for_earlier_instant() {
        let t0 = Instant::now();
        let entry = CacheEntry::new((), t0 + Duration::from_secs(5));

        assert_eq!(entry.age_at(t0), Duration::ZERO);
        assert!(!entry.is_expired_at(t0, Duration::from_secs(1)));
    }

    #[test]
    fn test_ttl_remaining() {
        let t0 = Instant::now();
        let entry = CacheEntry::new((), t0);
        let ttl = Duration::from_secs(10);

        assert_eq!(
            entry.ttl_remaining_at(t0 + Duration::from_secs(4), ttl),
            Duration::from_secs(6)
        );
        assert_eq!(
            entry.ttl_remaining_at(t0 + Duration::from_secs(40), ttl),
            Duration::ZERO
        );
    }
}
