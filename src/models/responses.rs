//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the stats endpoint (GET /cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of live entries
    pub size: usize,
    /// Keys currently present
    pub keys: Vec<String>,
    /// Best-effort memory estimate in bytes
    pub approx_memory_bytes: usize,
    /// Lifetime hit count
    pub hits: u64,
    /// Lifetime miss count
    pub misses: u64,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            size: stats.size,
            keys: stats.keys,
            approx_memory_bytes: stats.approx_memory_bytes,
            hits: stats.hits,
            misses: stats.misses,
            hit_rate: stats.hit_rate,
        }
    }
}

/// Response body for key deletion (DELETE /cache/keys/:key)
///
/// `deleted` is false when the key was absent; that is not an error.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// The key that was targeted
    pub key: String,
    /// Whether an entry was present and removed
    pub deleted: bool,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>, deleted: bool) -> Self {
        Self {
            key: key.into(),
            deleted,
        }
    }
}

/// Response body for tag invalidation (DELETE /cache/tags)
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Tags that were invalidated
    pub tags: Vec<String>,
    /// Number of entries removed
    pub removed: usize,
}

impl InvalidateResponse {
    /// Creates a new InvalidateResponse
    pub fn new(tags: Vec<String>, removed: usize) -> Self {
        Self { tags, removed }
    }
}

/// Response body for a full clear (DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
}

impl ClearResponse {
    /// Creates a new ClearResponse
    pub fn new() -> Self {
        Self {
            message: "Cache cleared".to_string(),
        }
    }
}

impl Default for ClearResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for page revalidation (POST /revalidate/:tag)
#[derive(Debug, Clone, Serialize)]
pub struct RevalidateResponse {
    /// The tag that was revalidated
    pub tag: String,
    /// Whether the backend accepted the invalidation
    pub ok: bool,
}

impl RevalidateResponse {
    /// Creates a new RevalidateResponse
    pub fn new(tag: impl Into<String>, ok: bool) -> Self {
        Self {
            tag: tag.into(),
            ok,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Active page cache backend ("local" or "remote")
    pub backend: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(backend: &str) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            backend: backend.to_string(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
