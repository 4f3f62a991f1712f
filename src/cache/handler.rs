//! Page Cache Handler Module
//!
//! Presents the page-rendering pipeline with one get/set/revalidate_tag
//! contract regardless of backend. The backend is chosen once at
//! process start; every backend failure is absorbed here and degraded
//! to a miss or a `false` return, so a cache outage can slow requests
//! down but never fail them.

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::warn;

use crate::cache::page::{LocalPageStore, PageContext, PageEntry};
use crate::cache::remote::RemotePageStore;
use crate::config::{BackendKind, Config};

// == Backend ==
#[derive(Debug)]
enum Backend {
    /// Bounded in-process LRU; never suspends
    Local(RwLock<LocalPageStore>),
    /// Shared redis store; suspends on network I/O
    Remote(RemotePageStore),
}

// == Page Cache Handler ==
/// Uniform page cache facade over the configured backend.
#[derive(Debug)]
pub struct PageCacheHandler {
    backend: Backend,
}

impl PageCacheHandler {
    // == Constructors ==
    /// Builds a handler over a local store. Used directly in tests and
    /// as the fallback when the remote backend is unavailable.
    pub fn local(store: LocalPageStore) -> Self {
        Self {
            backend: Backend::Local(RwLock::new(store)),
        }
    }

    /// Builds a handler over an established remote store.
    pub fn remote(store: RemotePageStore) -> Self {
        Self {
            backend: Backend::Remote(store),
        }
    }

    /// Resolves the backend from configuration, once, at startup.
    ///
    /// When the remote backend is selected but cannot be reached after
    /// the configured retries, the handler falls back to the local
    /// store with a warning rather than refusing to start: the service
    /// must stay available without its cache.
    pub async fn from_config(config: &Config) -> Self {
        match config.backend {
            BackendKind::Remote => match RemotePageStore::connect(config).await {
                Ok(store) => Self::remote(store),
                Err(err) => {
                    warn!(error = %err, "remote page cache unavailable, falling back to local store");
                    Self::local(LocalPageStore::new(
                        config.local_capacity,
                        config.local_max_item_bytes,
                    ))
                }
            },
            BackendKind::Local => Self::local(LocalPageStore::new(
                config.local_capacity,
                config.local_max_item_bytes,
            )),
        }
    }

    // == Get ==
    /// Returns the stored page, or `None` on miss or backend failure.
    pub async fn get(&self, key: &str) -> Option<PageEntry> {
        match &self.backend {
            Backend::Local(store) => store.write().await.get(key),
            Backend::Remote(store) => match store.get(key).await {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(key = %key, error = %err, "page cache get failed, treating as miss");
                    None
                }
            },
        }
    }

    // == Set ==
    /// Stores a page with its revalidation context. Returns whether the
    /// write took effect; failures are logged and reported as `false`.
    pub async fn set(&self, key: &str, data: Value, context: PageContext) -> bool {
        match &self.backend {
            Backend::Local(store) => store.write().await.set(key, data, context),
            Backend::Remote(store) => {
                let entry = PageEntry::new(data, context);
                match store.set(key, &entry).await {
                    Ok(()) => true,
                    Err(err) => {
                        warn!(key = %key, error = %err, "page cache set failed");
                        false
                    }
                }
            }
        }
    }

    // == Revalidate Tag ==
    /// Removes every stored page tagged with `tag`. Returns whether the
    /// invalidation ran; failures are logged and reported as `false`.
    pub async fn revalidate_tag(&self, tag: &str) -> bool {
        match &self.backend {
            Backend::Local(store) => {
                store.write().await.revalidate_tag(tag);
                true
            }
            Backend::Remote(store) => match store.revalidate_tag(tag).await {
                Ok(_) => true,
                Err(err) => {
                    warn!(tag = %tag, error = %err, "page cache tag revalidation failed");
                    false
                }
            },
        }
    }

    // == Backend Name ==
    /// Name of the active backend, for health reporting.
    pub fn backend_name(&self) -> &'static str {
        match &self.backend {
            Backend::Local(_) => "local",
            Backend::Remote(_) => "remote",
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn local_handler() -> PageCacheHandler {
        PageCacheHandler::local(LocalPageStore::new(10, 1024 * 1024))
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let handler = local_handler();

        let stored = handler
            .set(
                "/products",
                json!(["shirt"]),
                PageContext {
                    revalidate_seconds: 60,
                    tags: vec!["products".to_string()],
                },
            )
            .await;
        assert!(stored);

        let entry = handler.get("/products").await.unwrap();
        assert_eq!(entry.data, json!(["shirt"]));
        assert_eq!(entry.revalidate_seconds, 60);
    }

    #[tokio::test]
    async fn test_get_miss() {
        let handler = local_handler();
        assert!(handler.get("/missing").await.is_none());
    }

    #[tokio::test]
    async fn test_revalidate_tag_local() {
        let handler = local_handler();

        handler
            .set(
                "/products",
                json!(1),
                PageContext {
                    revalidate_seconds: 0,
                    tags: vec!["products".to_string()],
                },
            )
            .await;
        handler
            .set(
                "/orders",
                json!(2),
                PageContext {
                    revalidate_seconds: 0,
                    tags: vec!["orders".to_string()],
                },
            )
            .await;

        assert!(handler.revalidate_tag("products").await);
        assert!(handler.get("/products").await.is_none());
        assert!(handler.get("/orders").await.is_some());
    }

    #[tokio::test]
    async fn test_unreachable_remote_falls_back_to_local() {
        let config = Config {
            backend: BackendKind::Remote,
            remote_url: Some("redis://127.0.0.1:1/".to_string()),
            remote_timeout_millis: 200,
            remote_max_retries: 0,
            remote_retry_backoff_millis: 10,
            ..Config::default()
        };

        let handler = PageCacheHandler::from_config(&config).await;

        // Degrades rather than erroring: local backend, miss on get
        assert_eq!(handler.backend_name(), "local");
        assert!(handler.get("k").await.is_none());
        assert!(
            handler.set("k", json!(1), PageContext::default()).await,
            "fallback store must accept writes"
        );
        assert!(handler.get("k").await.is_some());
    }

    #[tokio::test]
    async fn test_local_config_selects_local() {
        let config = Config::default();
        let handler = PageCacheHandler::from_config(&config).await;
        assert_eq!(handler.backend_name(), "local");
    }
}
