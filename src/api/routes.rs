//! API Routes
//!
//! Configures the Axum router with all administrative endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, delete_key_handler, health_handler, invalidate_tags_handler,
    revalidate_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Health check
/// - `GET /cache/stats` - Cache statistics
/// - `DELETE /cache/keys/:key` - Remove one entry
/// - `DELETE /cache/tags` - Remove entries whose tags intersect the request
/// - `DELETE /cache` - Clear the store
/// - `POST /revalidate/:tag` - Revalidate tagged pages via the handler
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/cache/stats", get(stats_handler))
        .route("/cache/keys/:key", delete(delete_key_handler))
        .route("/cache/tags", delete(invalidate_tags_handler))
        .route("/cache", delete(clear_handler))
        .route("/revalidate/:tag", post(revalidate_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
