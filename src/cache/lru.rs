//! Access Order Module
//!
//! Recency tracking for the bounded local page store.

use std::collections::VecDeque;

// == Access Order ==
/// Tracks key recency for LRU eviction.
///
/// Keys live in a VecDeque where the front is the most recently used
/// and the back is the least recently used.
#[derive(Debug, Default)]
pub struct AccessOrder {
    order: VecDeque<String>,
}

impl AccessOrder {
    // == Constructor ==
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Mark Used ==
    /// Moves a key to the front (most recent), inserting it if new.
    pub fn mark_used(&mut self, key: &str) {
        self.drop_key(key);
        self.order.push_front(key.to_string());
    }

    // == Drop Key ==
    /// Removes a key from the tracker, if present.
    pub fn drop_key(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Pop LRU ==
    /// Removes and returns the least recently used key, if any.
    pub fn pop_lru(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    // == Peek LRU ==
    /// Returns the least recently used key without removing it.
    pub fn peek_lru(&self) -> Option<&String> {
        self.order.back()
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
