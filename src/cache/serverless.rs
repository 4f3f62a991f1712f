//! Serverless Cache Module
//!
//! Reduced, tag-free expiring store for short-lived process instances
//! (one or a few requests per cold start). A background sweep thread
//! cannot be relied on in that environment, so the sweep deadline is
//! re-armed inline on every call instead. The sweep is memory hygiene
//! only; lazy expiry on access is what guarantees no stale reads.

use std::collections::HashMap;

use serde_json::Value;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::stats::{AccessCounters, CacheStats};
use crate::cache::store::DEFAULT_TTL_MILLIS;

/// Default inline sweep interval: 60 seconds.
const DEFAULT_SWEEP_INTERVAL_MILLIS: u64 = 60_000;

// == Serverless Entry ==
/// Entry without tags; a payload, an absolute expiry, and a size estimate.
#[derive(Debug, Clone)]
struct ServerlessEntry {
    value: Value,
    expires_at: u64,
    approx_bytes: usize,
}

impl ServerlessEntry {
    fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }
}

// == Serverless Cache ==
/// Tag-free expiring key-value store with inline best-effort sweeping.
#[derive(Debug)]
pub struct ServerlessCache {
    entries: HashMap<String, ServerlessEntry>,
    counters: AccessCounters,
    default_ttl_millis: u64,
    sweep_interval_millis: u64,
    /// Deadline for the next inline sweep, re-armed on every invocation
    next_sweep_at: u64,
}

impl ServerlessCache {
    // == Constructor ==
    /// Creates a cache with the given default TTL and sweep interval.
    pub fn new(default_ttl_millis: u64, sweep_interval_millis: u64) -> Self {
        Self {
            entries: HashMap::new(),
            counters: AccessCounters::new(),
            default_ttl_millis,
            sweep_interval_millis,
            next_sweep_at: current_timestamp_ms().saturating_add(sweep_interval_millis),
        }
    }

    // == Get ==
    /// Retrieves a value by key; an expired entry is removed and
    /// reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        self.maybe_sweep();

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
    /// Stores a value, overwriting unconditionally.
    pub fn set(&mut self, key: impl Into<String>, value: Value, ttl_millis: Option<u64>) {
        self.maybe_sweep();

        let key = key.into();
        let ttl = ttl_millis.unwrap_or(self.default_ttl_millis);
        let approx_bytes =
            key.len() + serde_json::to_string(&value).map(|s| s.len()).unwrap_or(0);
        let entry = ServerlessEntry {
            value,
            expires_at: current_timestamp_ms().saturating_add(ttl),
            approx_bytes,
        };
        self.entries.insert(key, entry);
    }

    // == Has ==
    /// Existence probe; also performs lazy expiry.
    pub fn has(&mut self, key: &str) -> bool {
        self.maybe_sweep();

        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    // == Delete ==
    /// Removes an entry by key; true iff something was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Removes all entries.
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
    /// Removes all currently-expired entries; returns the count removed.
    pub fn cleanup(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Inline Sweep ==
    /// Runs a sweep if the deadline has passed, then re-arms it.
    ///
    /// The hosting process may be suspended between invocations, so the
    /// deadline can be long overdue by the time this runs; that is fine
    /// because correctness never depends on the sweep.
    fn maybe_sweep(&mut self) {
        let now = current_timestamp_ms();
        if now >= self.next_sweep_at {
            self.cleanup();
            self.next_sweep_at = now.saturating_add(self.sweep_interval_millis);
        }
    }
}

impl Default for ServerlessCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_MILLIS, DEFAULT_SWEEP_INTERVAL_MILLIS)
    }
}
