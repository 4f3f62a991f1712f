//! Storefront Cache - in-process caching layer for a storefront admin service
//!
//! Provides an expiring key-value store with tag-based invalidation, a
//! serverless variant for ephemeral compute, and a pluggable
//! page-revalidation cache handler backed by either a bounded local LRU
//! store or a shared redis store.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::{BackendKind, Config};
pub use tasks::spawn_sweep_task;
