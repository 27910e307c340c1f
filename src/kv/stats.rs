//! Store Statistics Module
//!
//! Tracks how lookups were served: by the cache, by the table, or rejected
//! by the membership filter.

use serde::Serialize;

// == Store Stats ==
/// Counters describing store traffic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Lookups answered by the recency cache
    pub cache_hits: u64,
    /// Lookups that missed the cache but were found in the primary table
    pub table_hits: u64,
    /// Lookups that found nothing, filter rejections included
    pub misses: u64,
    /// Lookups and removals short-circuited by the filter
    pub filter_rejections: u64,
    /// Filter said "possibly present" but the table had no such key
    pub false_positives: u64,
    /// Entries evicted from the recency cache
    pub evictions: u64,
    /// Current number of entries in the primary table
    pub total_entries: usize,
    /// Current number of entries in the recency cache
    pub cached_entries: usize,
}

impl StoreStats {
    // == Constructor ==
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns found lookups / all lookups, or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.cache_hits + self.table_hits;
        let total = hits + self.misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    pub fn record_cache_hit(&mut self) {
        self.cache_hits += 1;
    }

    pub fn record_table_hit(&mut self) {
        self.table_hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_filter_rejection(&mut self) {
        self.filter_rejections += 1;
    }

    pub fn record_false_positive(&mut self) {
        self.false_positives += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}
