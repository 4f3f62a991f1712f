//! Error types for the cache service
//!
//! Misses are never errors anywhere in the crate; they surface as
//! `Option`/`bool` returns. The variants here cover admin API
//! validation (which reaches HTTP) and remote-backend failures (which
//! are absorbed at the handler layer and degraded to misses).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache service.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Invalid request data on the admin API
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Remote cache backend failed
    #[error("Remote cache error: {0}")]
    Remote(#[from] redis::RedisError),

    /// Remote cache operation exceeded its deadline
    #[error("Remote cache timed out after {millis}ms")]
    Timeout {
        /// Deadline that was exceeded
        millis: u64,
    },

    /// Payload could not be (de)serialized
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CacheError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            // Backend failures never reach HTTP in practice; the handler
            // layer absorbs them. Mapped defensively anyway.
            CacheError::Remote(_) | CacheError::Timeout { .. } | CacheError::Serialization(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache service.
pub type Result<T> = std::result::Result<T, CacheError>;
