//! Property-Based Tests for the Cache Module
//!
//! Uses proptest to verify the store's correctness properties.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

use serde_json::json;

use crate::cache::store::{CacheStore, SetOptions};

// == Strategies ==
/// Generates cache keys from a small alphabet so operations collide
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-d][0-9]{0,2}".prop_map(|s| s)
}

/// Generates string payloads
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,64}".prop_map(|s| s)
}

/// Generates tag sets drawn from a fixed vocabulary
fn tags_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            Just("products".to_string()),
            Just("orders".to_string()),
            Just("blog".to_string()),
            Just("inventory".to_string()),
        ],
        0..3,
    )
}

/// A sequence of cache operations for model-based testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String, tags: Vec<String> },
    Get { key: String },
    Delete { key: String },
    InvalidateTag { tag: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy(), tags_strategy())
            .prop_map(|(key, value, tags)| CacheOp::Set { key, value, tags }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
        prop_oneof![
            Just("products".to_string()),
            Just("orders".to_string()),
            Just("blog".to_string()),
        ]
        .prop_map(|tag| CacheOp::InvalidateTag { tag }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing a pair and reading it back before expiry returns the
    // exact value that was stored.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        let mut store = CacheStore::default();

        store.set(key.clone(), json!(value), SetOptions::default());

        prop_assert_eq!(store.get(&key), Some(json!(value)));
    }

    // After a delete, a get on the same key is a miss and delete
    // reports whether anything was removed.
    #[test]
    fn prop_delete_removes_entry(key in key_strategy(), value in value_strategy()) {
        let mut store = CacheStore::default();

        store.set(key.clone(), json!(value), SetOptions::default());
        prop_assert!(store.get(&key).is_some());

        prop_assert!(store.delete(&key));
        prop_assert_eq!(store.get(&key), None);
        prop_assert!(!store.delete(&key));
    }

    // Storing V1 then V2 under one key leaves only V2 visible.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        v1 in value_strategy(),
        v2 in value_strategy(),
    ) {
        let mut store = CacheStore::default();

        store.set(key.clone(), json!(v1), SetOptions::default());
        store.set(key.clone(), json!(v2.clone()), SetOptions::default());

        prop_assert_eq!(store.get(&key), Some(json!(v2)));
        prop_assert_eq!(store.len(), 1);
    }

    // Tag invalidation removes exactly the entries whose tag set
    // contains the target tag and nothing else.
    #[test]
    fn prop_tag_invalidation_exactness(
        entries in prop::collection::hash_map(key_strategy(), tags_strategy(), 1..20),
        target in prop_oneof![
            Just("products".to_string()),
            Just("orders".to_string()),
            Just("blog".to_string()),
        ],
    ) {
        let mut store = CacheStore::default();

        for (key, tags) in &entries {
            store.set(key.clone(), json!(key), SetOptions::tags(tags.clone()));
        }

        let expected_removed: HashSet<&String> = entries
            .iter()
            .filter(|(_, tags)| tags.contains(&target))
            .map(|(key, _)| key)
            .collect();

        let removed = store.invalidate_by_tags(std::slice::from_ref(&target));
        prop_assert_eq!(removed, expected_removed.len());

        for (key, _) in &entries {
            let present = store.get(key).is_some();
            prop_assert_eq!(
                present,
                !expected_removed.contains(key),
                "key {} in wrong state after invalidating {}", key, target
            );
        }
    }

    // With no expiring entries involved, hit/miss counters track a
    // HashMap model exactly across arbitrary operation sequences.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = CacheStore::default();
        let mut model: HashMap<String, Vec<String>> = HashMap::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value, tags } => {
                    store.set(key.clone(), json!(value), SetOptions::tags(tags.clone()));
                    model.insert(key, tags);
                }
                CacheOp::Get { key } => {
                    match store.get(&key) {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    }
                    // Default TTL is minutes; nothing expires mid-test
                    prop_assert_eq!(store.len(), model.len());
                }
                CacheOp::Delete { key } => {
                    let removed = store.delete(&key);
                    prop_assert_eq!(removed, model.remove(&key).is_some());
                }
                CacheOp::InvalidateTag { tag } => {
                    let removed = store.invalidate_by_tags(std::slice::from_ref(&tag));
                    let before = model.len();
                    model.retain(|_, tags| !tags.contains(&tag));
                    prop_assert_eq!(removed, before - model.len());
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.size, model.len(), "Size mismatch");
    }

    // Cleanup with nothing expired removes nothing, and clear always
    // empties the store.
    #[test]
    fn prop_cleanup_and_clear(
        entries in prop::collection::hash_map(key_strategy(), value_strategy(), 0..20),
    ) {
        let mut store = CacheStore::default();

        for (key, value) in &entries {
            store.set(key.clone(), json!(value), SetOptions::default());
        }

        // Nothing has expired under the default TTL
        prop_assert_eq!(store.cleanup(), 0);
        prop_assert_eq!(store.len(), entries.len());

        store.clear();
        prop_assert_eq!(store.stats().size, 0);
    }
}
