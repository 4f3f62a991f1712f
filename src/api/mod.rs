//! API Module
//!
//! HTTP handlers and routing for the administrative cache endpoints.
//!
//! # Endpoints
//! - `GET /health` - Health check
//! - `GET /cache/stats` - Cache statistics
//! - `DELETE /cache/keys/:key` - Remove one entry
//! - `DELETE /cache/tags` - Remove entries by tag set
//! - `DELETE /cache` - Clear the store
//! - `POST /revalidate/:tag` - Revalidate tagged pages via the handler

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
