//! API Handlers
//!
//! HTTP request handlers for the administrative cache endpoints. These
//! are thin pass-throughs: the store and the page cache handler do the
//! actual work.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::{CacheStore, PageCacheHandler};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, DeleteResponse, HealthResponse, InvalidateResponse, InvalidateTagsRequest,
    RevalidateResponse, StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// General-purpose store for memoized query results
    pub cache: Arc<RwLock<CacheStore>>,
    /// Page-revalidation cache handler
    pub pages: Arc<PageCacheHandler>,
}

impl AppState {
    /// Creates state from already-constructed components.
    pub fn new(cache: CacheStore, pages: PageCacheHandler) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            pages: Arc::new(pages),
        }
    }

    /// Creates state from configuration, resolving the page cache
    /// backend once.
    pub async fn from_config(config: &Config) -> Self {
        let cache = CacheStore::new(config.default_ttl_millis);
        let pages = PageCacheHandler::from_config(config).await;
        Self::new(cache, pages)
    }
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::from(cache.stats()))
}

/// Handler for DELETE /cache/keys/:key
///
/// Deleting an absent key is not an error; the response carries
/// `deleted: false`.
pub async fn delete_key_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let deleted = state.cache.write().await.delete(&key);
    Json(DeleteResponse::new(key, deleted))
}

/// Handler for DELETE /cache/tags
pub async fn invalidate_tags_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidateTagsRequest>,
) -> Result<Json<InvalidateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let removed = state.cache.write().await.invalidate_by_tags(&req.tags);
    info!(tags = ?req.tags, removed, "invalidated cache entries by tag");

    Ok(Json(InvalidateResponse::new(req.tags, removed)))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.write().await.clear();
    info!("cache cleared");
    Json(ClearResponse::new())
}

/// Handler for POST /revalidate/:tag
///
/// Administrative revalidation path through the page cache handler.
/// `ok: false` means the backend rejected or failed the invalidation;
/// the request itself still succeeds (fail-open).
pub async fn revalidate_handler(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Json<RevalidateResponse> {
    let ok = state.pages.revalidate_tag(&tag).await;
    Json(RevalidateResponse::new(tag, ok))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.pages.backend_name()))
}
