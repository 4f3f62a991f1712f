//! Cache Statistics Module
//!
//! Access counters kept by the store plus the observability snapshot
//! returned by `stats()`.

use serde::Serialize;

// == Access Counters ==
/// Hit/miss counters maintained across the lifetime of a store.
#[derive(Debug, Clone, Default)]
pub struct AccessCounters {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key absent or expired)
    pub misses: u64,
}

impl AccessCounters {
    /// Creates counters with everything at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Returns hits / (hits + misses), or 0.0 before any request.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Stats Snapshot ==
/// Point-in-time view of a store, shaped for the admin API.
///
/// `approx_memory_bytes` is a best-effort serialized-size estimate,
/// not an exact measurement.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// Current number of live entries
    pub size: usize,
    /// Keys currently present (expired-but-unswept keys may appear)
    pub keys: Vec<String>,
    /// Sum of per-entry size estimates
    pub approx_memory_bytes: usize,
    /// Lifetime hit count
    pub hits: u64,
    /// Lifetime miss count
    pub misses: u64,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_new() {
        let counters = AccessCounters::new();
        assert_eq!(counters.hits, 0);
        assert_eq!(counters.misses, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let counters = AccessCounters::new();
        assert_eq!(counters.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let mut counters = AccessCounters::new();
        counters.record_hit();
        counters.record_hit();
        assert_eq!(counters.hit_rate(), 1.0);
    }

    #[test]
    fn test_hit_rate_all_misses() {
        let mut counters = AccessCounters::new();
        counters.record_miss();
        counters.record_miss();
        assert_eq!(counters.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut counters = AccessCounters::new();
        counters.record_hit();
        counters.record_miss();
        assert_eq!(counters.hit_rate(), 0.5);
    }

    #[test]
    fn test_stats_serialize() {
        let stats = CacheStats {
            size: 2,
            keys: vec!["a".to_string(), "b".to_string()],
            approx_memory_bytes: 128,
            hits: 3,
            misses: 1,
            hit_rate: 0.75,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("approx_memory_bytes"));
        assert!(json.contains("\"size\":2"));
    }
}
