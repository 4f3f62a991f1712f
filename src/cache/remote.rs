//! Remote Page Store Module
//!
//! Redis-backed page store used in production so all process instances
//! share one cache. Pages are stored as JSON under a configurable key
//! prefix; each tag maps to a redis set of member keys so that
//! `revalidate_tag` can delete all tagged pages in one pass.
//!
//! Every operation runs under a fixed deadline; the initial connection
//! is retried a bounded number of times with a fixed backoff.

use std::future::Future;
use std::time::Duration;

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::{info, warn};

use crate::cache::page::PageEntry;
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Remote Page Store ==
/// Shared page store reached over a redis connection.
#[derive(Clone)]
pub struct RemotePageStore {
    manager: ConnectionManager,
    key_prefix: String,
    timeout_millis: u64,
}

impl RemotePageStore {
    // == Connect ==
    /// Establishes the connection described by `config`.
    ///
    /// Attempts `remote_max_retries + 1` connections, sleeping
    /// `remote_retry_backoff_millis` between attempts; each attempt is
    /// bounded by `remote_timeout_millis`.
    pub async fn connect(config: &Config) -> Result<Self> {
        let url = config.remote_url.as_deref().ok_or_else(|| {
            CacheError::InvalidRequest("remote backend selected without a remote URL".to_string())
        })?;
        let client = Client::open(url)?;
        let deadline = Duration::from_millis(config.remote_timeout_millis);
        let backoff = Duration::from_millis(config.remote_retry_backoff_millis);

        let mut attempt = 0;
        loop {
            match tokio::time::timeout(deadline, ConnectionManager::new(client.clone())).await {
                Ok(Ok(manager)) => {
                    info!(url = %url, "connected to remote page cache");
                    return Ok(Self {
                        manager,
                        key_prefix: config.remote_key_prefix.clone(),
                        timeout_millis: config.remote_timeout_millis,
                    });
                }
                Ok(Err(err)) if attempt < config.remote_max_retries => {
                    warn!(attempt, error = %err, "remote page cache connect failed, retrying");
                }
                Ok(Err(err)) => return Err(err.into()),
                Err(_) if attempt < config.remote_max_retries => {
                    warn!(attempt, "remote page cache connect timed out, retrying");
                }
                Err(_) => {
                    return Err(CacheError::Timeout {
                        millis: config.remote_timeout_millis,
                    })
                }
            }
            attempt += 1;
            tokio::time::sleep(backoff).await;
        }
    }

    // == Get ==
    /// Fetches a stored page, or `None` when absent or expired server-side.
    pub async fn get(&self, key: &str) -> Result<Option<PageEntry>> {
        let storage_key = self.page_key(key);
        let mut conn = self.manager.clone();

        let raw: Option<String> = self
            .with_deadline(async move { conn.get(&storage_key).await })
            .await?;

        match raw {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    // == Set ==
    /// Stores a page as JSON and registers it in its tag sets.
    ///
    /// `revalidate_seconds` maps onto redis `EX`; `0` stores without a
    /// server-side expiry.
    pub async fn set(&self, key: &str, entry: &PageEntry) -> Result<()> {
        let storage_key = self.page_key(key);
        let payload = serde_json::to_string(entry)?;
        let tag_keys: Vec<String> = entry.tags.iter().map(|t| self.tag_key(t)).collect();
        let expiry = entry.revalidate_seconds;
        let mut conn = self.manager.clone();

        self.with_deadline(async move {
            if expiry > 0 {
                let _: () = conn.set_ex(&storage_key, payload, expiry).await?;
            } else {
                let _: () = conn.set(&storage_key, payload).await?;
            }
            for tag_key in &tag_keys {
                let _: () = conn.sadd(tag_key, &storage_key).await?;
            }
            Ok(())
        })
        .await
    }

    // == Revalidate Tag ==
    /// Deletes every page registered under `tag` plus the tag set
    /// itself; returns the number of pages deleted.
    pub async fn revalidate_tag(&self, tag: &str) -> Result<usize> {
        let tag_key = self.tag_key(tag);
        let mut conn = self.manager.clone();

        self.with_deadline(async move {
            let members: Vec<String> = conn.smembers(&tag_key).await?;
            let count = members.len();
            if !members.is_empty() {
                let _: () = conn.del(members).await?;
            }
            let _: () = conn.del(&tag_key).await?;
            Ok(count)
        })
        .await
    }

    // == Key Namespacing ==
    fn page_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }

    fn tag_key(&self, tag: &str) -> String {
        format!("{}tag:{}", self.key_prefix, tag)
    }

    // == Deadline Wrapper ==
    /// Runs a redis operation under the configured timeout.
    async fn with_deadline<T, F>(&self, op: F) -> Result<T>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(Duration::from_millis(self.timeout_millis), op).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(CacheError::Timeout {
                millis: self.timeout_millis,
            }),
        }
    }
}

impl std::fmt::Debug for RemotePageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemotePageStore")
            .field("key_prefix", &self.key_prefix)
            .field("timeout_millis", &self.timeout_millis)
            .finish_non_exhaustive()
    }
}
