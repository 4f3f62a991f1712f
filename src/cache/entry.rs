//! Cache Entry Module
//!
//! Defines the structure for individual cache entries: an opaque JSON
//! payload plus expiry and invalidation metadata.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// A single cache entry owned by a store.
///
/// The payload is opaque to the store; callers get back clones and must
/// treat them as read-only.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Value,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Absolute expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
    /// Invalidation tags; empty by default, replaced only by a full overwrite
    pub tags: HashSet<String>,
    /// Best-effort serialized-size estimate, computed at insertion
    pub approx_bytes: usize,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_millis` from now.
    ///
    /// # Arguments
    /// * `key` - The key the entry will be stored under (size estimate only)
    /// * `value` - The payload to store
    /// * `ttl_millis` - Lifetime in milliseconds
    /// * `tags` - Invalidation tags
    pub fn new(key: &str, value: Value, ttl_millis: u64, tags: Vec<String>) -> Self {
        let now = current_timestamp_ms();
        let approx_bytes = approx_entry_bytes(key, &value, &tags);

        Self {
            value,
            created_at: now,
            expires_at: now.saturating_add(ttl_millis),
            tags: tags.into_iter().collect(),
            approx_bytes,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is live iff `now < expires_at`, so a
    /// read at exactly `expires_at` already sees a miss.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining lifetime in milliseconds, `0` once expired.
    ///
    /// Useful for debugging and statistics; the stores themselves only
    /// ever ask [`CacheEntry::is_expired`].
    pub fn ttl_remaining_ms(&self) -> u64 {
        let now = current_timestamp_ms();
        self.expires_at.saturating_sub(now)
    }

    // == Tag Intersection ==
    /// Returns true if any of the given tags is attached to this entry.
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        tags.iter().any(|t| self.tags.contains(t))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Best-effort per-entry memory estimate: key + serialized payload + tags.
fn approx_entry_bytes(key: &str, value: &Value, tags: &[String]) -> usize {
    let payload = serde_json::to_string(value).map(|s| s.len()).unwrap_or(0);
    let tag_bytes: usize = tags.iter().map(|t| t.len()).sum();
    key.len() + payload + tag_bytes
}
