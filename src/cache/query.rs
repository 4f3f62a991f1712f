//! Query Memoization Module
//!
//! `with_cache` wraps an expensive asynchronous computation (typically
//! a database query) behind the general-purpose store. A failed
//! computation propagates unchanged and nothing is written; cache-side
//! serialization problems are absorbed as misses. The cache is never
//! allowed to turn a working computation into an error.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::cache::store::{CacheStore, SetOptions};

// == With Cache ==
/// Returns the cached value for `key`, or runs `compute`, stores its
/// result under `options`, and returns it.
///
/// A cached value that no longer decodes as `T` is dropped and
/// recomputed rather than surfaced as an error.
pub async fn with_cache<T, E, F, Fut>(
    cache: &Arc<RwLock<CacheStore>>,
    key: &str,
    options: SetOptions,
    compute: F,
) -> Result<T, E>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    {
        let mut store = cache.write().await;
        if let Some(raw) = store.get(key) {
            match serde_json::from_value::<T>(raw) {
                Ok(value) => return Ok(value),
                Err(_) => {
                    // Stored under an older shape; recompute below
                    store.delete(key);
                }
            }
        }
    }

    let computed = compute().await?;

    if let Ok(raw) = serde_json::to_value(&computed) {
        cache.write().await.set(key, raw, options);
    }

    Ok(computed)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Shape of a memoized database result.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct QueryResult {
        rows: Vec<String>,
        row_count: usize,
    }

    fn shared_store() -> Arc<RwLock<CacheStore>> {
        Arc::new(RwLock::new(CacheStore::default()))
    }

    #[tokio::test]
    async fn test_miss_computes_and_caches() {
        let cache = shared_store();
        let calls = AtomicU32::new(0);

        let result: Result<QueryResult, String> =
            with_cache(&cache, "products:all", SetOptions::ttl(60_000), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(QueryResult {
                    rows: vec!["shirt".to_string()],
                    row_count: 1,
                })
            })
            .await;

        assert_eq!(result.unwrap().row_count, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.write().await.len(), 1);
    }

    #[tokio::test]
    async fn test_hit_skips_computation() {
        let cache = shared_store();
        let calls = AtomicU32::new(0);

        for _ in 0..3 {
            let result: Result<QueryResult, String> =
                with_cache(&cache, "products:all", SetOptions::ttl(60_000), || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(QueryResult {
                        rows: vec!["shirt".to_string()],
                        row_count: 1,
                    })
                })
                .await;
            assert!(result.is_ok());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1, "only the first call computes");
    }

    #[tokio::test]
    async fn test_failure_propagates_and_caches_nothing() {
        let cache = shared_store();

        let result: Result<QueryResult, String> =
            with_cache(&cache, "products:all", SetOptions::ttl(60_000), || async {
                Err("connection refused".to_string())
            })
            .await;

        assert_eq!(result.unwrap_err(), "connection refused");
        assert!(cache.write().await.is_empty(), "failed computation must not be cached");
    }

    #[tokio::test]
    async fn test_failure_then_success_recovers() {
        let cache = shared_store();
        let calls = AtomicU32::new(0);

        let first: Result<QueryResult, String> =
            with_cache(&cache, "k", SetOptions::default(), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("down".to_string())
            })
            .await;
        assert!(first.is_err());

        let second: Result<QueryResult, String> =
            with_cache(&cache, "k", SetOptions::default(), || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(QueryResult {
                    rows: vec![],
                    row_count: 0,
                })
            })
            .await;

        assert!(second.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_undecodable_cached_value_is_recomputed() {
        let cache = shared_store();

        // Seed the key with a shape QueryResult cannot decode
        cache
            .write()
            .await
            .set("k", serde_json::json!("not a query result"), SetOptions::default());

        let result: Result<QueryResult, String> =
            with_cache(&cache, "k", SetOptions::default(), || async {
                Ok(QueryResult {
                    rows: vec!["hat".to_string()],
                    row_count: 1,
                })
            })
            .await;

        assert_eq!(result.unwrap().rows, vec!["hat".to_string()]);
    }

    #[tokio::test]
    async fn test_tags_flow_through_to_store() {
        let cache = shared_store();

        let _: Result<QueryResult, String> = with_cache(
            &cache,
            "products:all",
            SetOptions::ttl_and_tags(60_000, vec!["products".to_string()]),
            || async {
                Ok(QueryResult {
                    rows: vec![],
                    row_count: 0,
                })
            },
        )
        .await;

        let removed = cache
            .write()
            .await
            .invalidate_by_tags(&["products".to_string()]);
        assert_eq!(removed, 1);
    }
}
