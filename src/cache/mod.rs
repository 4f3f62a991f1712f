//! Cache Module
//!
//! The caching core: a general-purpose expiring key-value store with
//! tag-based invalidation, a tag-free serverless variant, and the
//! pluggable page-revalidation cache handler with its local and remote
//! backends.

mod entry;
mod handler;
mod lru;
mod page;
mod query;
mod remote;
mod serverless;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use handler::PageCacheHandler;
pub use lru::AccessOrder;
pub use page::{LocalPageStore, PageContext, PageEntry};
pub use query::with_cache;
pub use remote::RemotePageStore;
pub use serverless::ServerlessCache;
pub use stats::CacheStats;
pub use store::{CacheStore, SetOptions, DEFAULT_TTL_MILLIS};
