//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for capacity eviction.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Recency is measured by reads, not by insertion. Keys live in one of two
/// queues, each ordered front = newest, back = oldest:
/// - `unread`: inserted (or re-inserted) and not read since, by insertion order
/// - `read`: read at least once since insertion, by last read
///
/// A key that has never been read has no access time, so all unread keys tie
/// as the least recently used and the oldest insertion goes first. Only when
/// every resident key has been read does eviction fall back to the `read` queue.
///
/// Capacities are small (tens of entries per entity type), so the linear
/// scans in `touch`/`remove` stay cheap.
#[derive(Debug)]
pub struct LruTracker<K> {
    /// Keys not read since insertion
    unread: VecDeque<K>,
    /// Keys by last read
    read: VecDeque<K>,
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self {
            unread: VecDeque::new(),
            read: VecDeque::new(),
        }
    }
}

impl<K: PartialEq + Clone> LruTracker<K> {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Records a fresh insertion of `key`, discarding any earlier read history.
    pub fn insert(&mut self, key: &K) {
        self.remove(key);
        self.unread.push_front(key.clone());
    }

    // == Touch ==
    /// Marks a key as recently read (moves to front of the read queue).
    pub fn touch(&mut self, key: &K) {
        self.remove(key);
        self.read.push_front(key.clone());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &K) {
        if let Some(pos) = self.unread.iter().position(|k| k == key) {
            self.unread.remove(pos);
        } else if let Some(pos) = self.read.iter().position(|k| k == key) {
            self.read.remove(pos);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        self.unread.pop_back().or_else(|| self.read.pop_back())
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.unread.back().or_else(|| self.read.back())
    }

    /// Forgets every tracked key.
    pub fn clear(&mut self) {
        self.unread.clear();
        self.read.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.unread.len() + self.read.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unread.is_empty() && self.read.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.unread.iter().chain(self.read.iter()).any(|k| k == key)
    }
}
