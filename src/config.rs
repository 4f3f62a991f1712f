//! Configuration Module
//!
//! Explicit configuration struct resolved once at process start and
//! injected everywhere; nothing reads the environment after startup.
//! Backend selection happens here: remote iff the deployment mode is
//! production and a remote URL is configured.

use std::env;

// == Backend Kind ==
/// Which page cache backend the process uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Bounded in-process LRU store
    Local,
    /// Shared redis store
    Remote,
}

// == Config ==
/// Service configuration.
///
/// All values can be set via environment variables with sensible
/// defaults; see [`Config::from_env`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Selected page cache backend
    pub backend: BackendKind,
    /// Local page store capacity in items
    pub local_capacity: usize,
    /// Largest serialized item the local page store accepts, in bytes
    pub local_max_item_bytes: usize,
    /// Remote store connection string, e.g. `redis://host:6379/`
    pub remote_url: Option<String>,
    /// Namespace prefix for remote keys
    pub remote_key_prefix: String,
    /// Deadline for each remote operation, in milliseconds
    pub remote_timeout_millis: u64,
    /// Connection attempts beyond the first
    pub remote_max_retries: u32,
    /// Fixed delay between connection attempts, in milliseconds
    pub remote_retry_backoff_millis: u64,
    /// Default entry TTL for the general-purpose store, in milliseconds
    pub default_ttl_millis: u64,
    /// Background sweep interval in seconds
    pub sweep_interval_secs: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `APP_ENV` - Deployment mode; `production` enables the remote backend
    /// - `REMOTE_CACHE_URL` - Remote store connection string
    /// - `LOCAL_CACHE_CAPACITY` - Local store capacity in items (default: 500)
    /// - `LOCAL_CACHE_MAX_ITEM_BYTES` - Per-item admission limit (default: 1 MiB)
    /// - `REMOTE_CACHE_PREFIX` - Remote key namespace (default: "isr:")
    /// - `REMOTE_CACHE_TIMEOUT_MS` - Remote op deadline (default: 5000)
    /// - `REMOTE_CACHE_MAX_RETRIES` - Connect retries (default: 3)
    /// - `REMOTE_CACHE_RETRY_BACKOFF_MS` - Fixed backoff (default: 500)
    /// - `DEFAULT_TTL_MS` - Store default TTL (default: 300000)
    /// - `CACHE_SWEEP_INTERVAL` - Sweep interval in seconds (default: 600)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let production = env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);
        let remote_url = env::var("REMOTE_CACHE_URL").ok().filter(|v| !v.is_empty());

        let backend = if production && remote_url.is_some() {
            BackendKind::Remote
        } else {
            BackendKind::Local
        };

        Self {
            backend,
            local_capacity: env::var("LOCAL_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
            local_max_item_bytes: env::var("LOCAL_CACHE_MAX_ITEM_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024 * 1024),
            remote_url,
            remote_key_prefix: env::var("REMOTE_CACHE_PREFIX")
                .unwrap_or_else(|_| "isr:".to_string()),
            remote_timeout_millis: env::var("REMOTE_CACHE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            remote_max_retries: env::var("REMOTE_CACHE_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            remote_retry_backoff_millis: env::var("REMOTE_CACHE_RETRY_BACKOFF_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
            default_ttl_millis: env::var("DEFAULT_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300_000),
            sweep_interval_secs: env::var("CACHE_SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(600),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::Local,
            local_capacity: 500,
            local_max_item_bytes: 1024 * 1024,
            remote_url: None,
            remote_key_prefix: "isr:".to_string(),
            remote_timeout_millis: 5000,
            remote_max_retries: 3,
            remote_retry_backoff_millis: 500,
            default_ttl_millis: 300_000,
            sweep_interval_secs: 600,
            server_port: 3000,
        }
    }
}
