//! Cache Store Module
//!
//! General-purpose expiring key-value store with tag-based invalidation.
//! All operations are total: a miss is an `Option`/`bool` result, never
//! an error. Expiry is evaluated lazily on read so a stale value can
//! never be returned; the periodic sweep only bounds memory.

use std::collections::HashMap;

use serde_json::Value;

use crate::cache::entry::CacheEntry;
use crate::cache::stats::{AccessCounters, CacheStats};

/// Default entry lifetime: 5 minutes.
pub const DEFAULT_TTL_MILLIS: u64 = 300_000;

// == Set Options ==
/// Per-write options for [`CacheStore::set`].
#[derive(Debug, Clone, Default)]
pub struct SetOptions {
    /// Lifetime in milliseconds; store-wide default when `None`
    pub ttl_millis: Option<u64>,
    /// Invalidation tags; empty by default
    pub tags: Vec<String>,
}

impl SetOptions {
    /// Options with an explicit TTL and no tags.
    pub fn ttl(ttl_millis: u64) -> Self {
        Self {
            ttl_millis: Some(ttl_millis),
            tags: Vec::new(),
        }
    }

    /// Options with an explicit TTL and tags.
    pub fn ttl_and_tags(ttl_millis: u64, tags: Vec<String>) -> Self {
        Self {
            ttl_millis: Some(ttl_millis),
            tags,
        }
    }

    /// Options with tags and the store-wide default TTL.
    pub fn tags(tags: Vec<String>) -> Self {
        Self {
            ttl_millis: None,
            tags,
        }
    }
}

// == Cache Store ==
/// Expiring key-value store with per-entry tags.
///
/// Unbounded by entry count; memory is bounded by TTLs plus the
/// periodic [`CacheStore::cleanup`] sweep.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Hit/miss counters
    counters: AccessCounters,
    /// Default TTL in milliseconds for writes without an explicit TTL
    default_ttl_millis: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store with the given default TTL in milliseconds.
    pub fn new(default_ttl_millis: u64) -> Self {
        Self {
            entries: HashMap::new(),
            counters: AccessCounters::new(),
            default_ttl_millis,
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// An expired entry is removed as a side effect and reported as a
    /// miss; a live entry is cloned out. TTLs never slide on read.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.counters.record_miss();
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
                self.counters.record_hit();
                Some(value)
            }
            None => {
                self.counters.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores a value under `key`, overwriting unconditionally.
    ///
    /// An overwrite replaces the payload, the expiry, and the tag set
    /// in full. Always succeeds.
    pub fn set(&mut self, key: impl Into<String>, value: Value, options: SetOptions) {
        let key = key.into();
        let ttl = options.ttl_millis.unwrap_or(self.default_ttl_millis);
        let entry = CacheEntry::new(&key, value, ttl, options.tags);
        self.entries.insert(key, entry);
    }

    // == Delete ==
    /// Removes an entry by key; true iff something was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Invalidate By Tags ==
    /// Removes every entry whose tag set intersects `tags`.
    ///
    /// Linear scan over all entries; returns the number removed. Entry
    /// counts are small enough that an inverted tag index would only
    /// add consistency bugs.
    pub fn invalidate_by_tags(&mut self, tags: &[String]) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.has_any_tag(tags));
        before - self.entries.len()
    }

    // == Clear ==
    /// Removes all entries. Counters are preserved.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Stats ==
    /// Returns a point-in-time snapshot for observability.
    pub fn stats(&self) -> CacheStats {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        let approx_memory_bytes = self.entries.values().map(|e| e.approx_bytes).sum();

        CacheStats {
            size: self.entries.len(),
            keys,
            approx_memory_bytes,
            hits: self.counters.hits,
            misses: self.counters.misses,
            hit_rate: self.counters.hit_rate(),
        }
    }

    // == Cleanup ==
    /// Proactively removes all currently-expired entries.
    ///
    /// Returns the count removed. Running it twice with no writes in
    /// between removes nothing the second time.
    pub fn cleanup(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the current number of entries (expired-but-unswept included).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_MILLIS)
    }
}
