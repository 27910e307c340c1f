//! Store Module
//!
//! The orchestrator that keeps the primary table, prefix index, recency
//! cache and membership filter consistent under set/get/remove.

use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::error::Result;
use crate::kv::hasher::KeyHasher;
use crate::kv::{MembershipFilter, PrefixIndex, PrimaryTable, RecencyCache, StoreStats};

// == Store ==
/// In-memory key-value store with four cooperating indexes.
///
/// Writes go through to every structure in a fixed order: table, prefix
/// index, cache, filter. Reads consult the filter first, then the cache,
/// then the table.
///
/// The filter has no removal path, so a removed key may keep answering
/// `might_contain == true`. Such false positives are expected; `get` and
/// `remove` still report the key as absent.
#[derive(Debug)]
pub struct Store {
    /// Authoritative key/value storage
    table: PrimaryTable,
    /// Keys for prefix enumeration
    prefixes: PrefixIndex,
    /// Recently used values
    cache: RecencyCache,
    /// Fast negative lookups
    filter: MembershipFilter,
    stats: StoreStats,
}

impl Store {
    // == Constructor ==
    /// Creates a store from validated configuration, using the baseline
    /// filter hash functions.
    pub fn new(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        let filter = MembershipFilter::new(config.filter_size, config.filter_hash_count);
        Ok(Self::assemble(config, filter))
    }

    /// Creates a store whose filter is indexed by the given hash functions.
    ///
    /// `config.filter_hash_count` is ignored; every supplied function is used.
    pub fn with_hashers(config: &StoreConfig, hashers: Vec<Box<dyn KeyHasher>>) -> Result<Self> {
        config.validate()?;
        let filter = MembershipFilter::with_hashers(config.filter_size, hashers);
        Ok(Self::assemble(config, filter))
    }

    fn assemble(config: &StoreConfig, filter: MembershipFilter) -> Self {
        info!(
            "Store initialized: buckets={}, cache_capacity={}, filter_size={}, filter_hashes={}",
            config.bucket_count,
            config.cache_capacity,
            filter.size(),
            filter.hash_count()
        );

        Self {
            table: PrimaryTable::new(config.bucket_count),
            prefixes: PrefixIndex::new(),
            cache: RecencyCache::new(config.cache_capacity),
            filter,
            stats: StoreStats::new(),
        }
    }

    // == Set ==
    /// Stores `value` under `key`, overwriting any previous value.
    pub fn set(&mut self, key: String, value: String) {
        self.table.set(key.clone(), value.clone());
        self.prefixes.insert(&key);
        self.cache_put(key.clone(), value);
        self.filter.add(&key);
    }

    // == Get ==
    /// Returns the value stored under `key`.
    ///
    /// A cache miss that hits the table writes the value back into the
    /// cache. `None` after a positive filter check is a filter false positive.
    pub fn get(&mut self, key: &str) -> Option<String> {
        if !self.filter.possibly_contains(key) {
            debug!(key, "get rejected by filter");
            self.stats.record_filter_rejection();
            self.stats.record_miss();
            return None;
        }

        if let Some(value) = self.cache.get(key) {
            let value = value.to_string();
            self.stats.record_cache_hit();
            return Some(value);
        }

        match self.table.get(key) {
            Some(value) => {
                let value = value.to_string();
                self.stats.record_table_hit();
                self.cache_put(key.to_string(), value.clone());
                Some(value)
            }
            None => {
                debug!(key, "filter false positive on get");
                self.stats.record_false_positive();
                self.stats.record_miss();
                None
            }
        }
    }

    // == Remove ==
    /// Removes `key` from the table, prefix index and cache.
    ///
    /// The key's filter bits stay set. Returns whether the key was stored.
    pub fn remove(&mut self, key: &str) -> bool {
        if !self.filter.possibly_contains(key) {
            debug!(key, "remove rejected by filter");
            self.stats.record_filter_rejection();
            return false;
        }

        if !self.table.remove(key) {
            debug!(key, "filter false positive on remove");
            self.stats.record_false_positive();
            return false;
        }

        self.prefixes.remove(key);
        self.cache.remove(key);
        true
    }

    // == Prefix Search ==
    /// Returns the stored keys starting with `prefix`, in trie pre-order.
    pub fn prefix_search(&self, prefix: &str) -> Vec<String> {
        self.prefixes.search_prefix(prefix)
    }

    // == Might Contain ==
    /// Probabilistic membership: false means the key was never stored.
    pub fn might_contain(&self, key: &str) -> bool {
        self.filter.possibly_contains(key)
    }

    // == Stats ==
    /// Returns a snapshot of the store counters.
    pub fn stats(&self) -> StoreStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.table.len();
        stats.cached_entries = self.cache.len();
        stats
    }

    // == Length ==
    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn cache_put(&mut self, key: String, value: String) {
        if let Some((evicted, _)) = self.cache.put(key, value) {
            debug!(key = %evicted, "evicted from recency cache");
            self.stats.record_eviction();
        }
    }

    #[cfg(test)]
    pub(crate) fn parts(&self) -> (&PrimaryTable, &PrefixIndex, &RecencyCache) {
        (&self.table, &self.prefixes, &self.cache)
    }
}

impl Default for Store {
    fn default() -> Self {
        let config = StoreConfig::default();
        let filter = MembershipFilter::new(config.filter_size, config.filter_hash_count);
        Self::assemble(&config, filter)
    }
}
