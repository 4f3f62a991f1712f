//! Page Cache Module
//!
//! Types shared by the page-revalidation backends plus the bounded
//! local store used when no remote store is configured. The store
//! persists and retrieves; the page-rendering pipeline interprets
//! freshness from `stored_at` and `revalidate_seconds`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::lru::AccessOrder;

// == Page Context ==
/// Caller-supplied context attached to a stored page.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// Revalidation interval in seconds; 0 means no scheduled revalidation
    pub revalidate_seconds: u64,
    /// Invalidation tags
    pub tags: Vec<String>,
}

// == Page Entry ==
/// A stored page: rendered data plus the context it was stored with.
///
/// Serializable because the remote backend persists it as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEntry {
    /// The cached page payload
    pub data: Value,
    /// Storage timestamp (Unix milliseconds)
    pub stored_at: u64,
    /// Revalidation interval in seconds
    pub revalidate_seconds: u64,
    /// Invalidation tags
    pub tags: Vec<String>,
}

impl PageEntry {
    /// Builds an entry from a payload and its context, stamped now.
    pub fn new(data: Value, context: PageContext) -> Self {
        Self {
            data,
            stored_at: current_timestamp_ms(),
            revalidate_seconds: context.revalidate_seconds,
            tags: context.tags,
        }
    }

    /// Serialized size of the entry, used for the admission guard.
    pub fn approx_bytes(&self) -> usize {
        serde_json::to_string(self).map(|s| s.len()).unwrap_or(0)
    }
}

// == Local Page Store ==
/// Bounded local page store with strict LRU eviction.
///
/// Capacity is measured in item count; both `get` and `set` refresh
/// recency. Items whose serialized size exceeds `max_item_bytes` are
/// skipped rather than stored, so a single oversized page can never
/// push everything else out.
#[derive(Debug)]
pub struct LocalPageStore {
    entries: HashMap<String, PageEntry>,
    order: AccessOrder,
    capacity: usize,
    max_item_bytes: usize,
    evictions: u64,
}

impl LocalPageStore {
    // == Constructor ==
    /// Creates a store holding at most `capacity` items of at most
    /// `max_item_bytes` serialized bytes each.
    pub fn new(capacity: usize, max_item_bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: AccessOrder::new(),
            capacity,
            max_item_bytes,
            evictions: 0,
        }
    }

    // == Get ==
    /// Returns the stored entry and refreshes its recency.
    pub fn get(&mut self, key: &str) -> Option<PageEntry> {
        match self.entries.get(key) {
            Some(entry) => {
                let entry = entry.clone();
                self.order.mark_used(key);
                Some(entry)
            }
            None => None,
        }
    }

    // == Set ==
    /// Stores a page, evicting the least recently used entry when at
    /// capacity. Oversized items are skipped; returns whether the item
    /// was stored.
    pub fn set(&mut self, key: impl Into<String>, data: Value, context: PageContext) -> bool {
        let key = key.into();
        let entry = PageEntry::new(data, context);

        if entry.approx_bytes() > self.max_item_bytes {
            debug!(key = %key, "skipping oversized page cache item");
            return false;
        }

        let is_overwrite = self.entries.contains_key(&key);
        if !is_overwrite && self.entries.len() >= self.capacity {
            if let Some(evicted) = self.order.pop_lru() {
                self.entries.remove(&evicted);
                self.evictions += 1;
            }
        }

        self.entries.insert(key.clone(), entry);
        self.order.mark_used(&key);
        true
    }

    // == Revalidate Tag ==
    /// Removes every stored page tagged with `tag`; returns the count.
    pub fn revalidate_tag(&mut self, tag: &str) -> usize {
        let doomed: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.tags.iter().any(|t| t == tag))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &doomed {
            self.entries.remove(key);
            self.order.drop_key(key);
        }
        doomed.len()
    }

    // == Length ==
    /// Returns the number of stored pages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lifetime eviction count.
    pub fn evictions(&self) -> u64 {
        self.evictions
    }
}
