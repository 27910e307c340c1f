//! Configuration Module
//!
//! Construction parameters for the store, loadable from environment variables.
//! Nothing here can be changed once a store has been built.

use std::env;

use crate::error::{Result, StoreError};

// == Defaults ==
/// Default number of primary table buckets
pub const DEFAULT_BUCKET_COUNT: usize = 101;
/// Default recency cache capacity
pub const DEFAULT_CACHE_CAPACITY: usize = 100;
/// Default membership filter size in bits
pub const DEFAULT_FILTER_SIZE: usize = 1000;
/// Default number of filter hash functions
pub const DEFAULT_FILTER_HASH_COUNT: usize = 3;

/// Store construction parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of chains in the primary table (fixed for the store's lifetime)
    pub bucket_count: usize,
    /// Size of the recency window; 0 disables the cache
    pub cache_capacity: usize,
    /// Filter bit-array length; 0 makes every key "definitely absent"
    pub filter_size: usize,
    /// Requested number of filter hash functions, clamped to the available hash functions
    pub filter_hash_count: usize,
}

impl StoreConfig {
    /// Creates a new StoreConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `KV_BUCKET_COUNT` - Primary table buckets (default: 101)
    /// - `KV_CACHE_CAPACITY` - Recency cache capacity (default: 100)
    /// - `KV_FILTER_SIZE` - Filter size in bits (default: 1000)
    /// - `KV_FILTER_HASH_COUNT` - Filter hash functions (default: 3)
    pub fn from_env() -> Self {
        Self {
            bucket_count: env_or("KV_BUCKET_COUNT", DEFAULT_BUCKET_COUNT),
            cache_capacity: env_or("KV_CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY),
            filter_size: env_or("KV_FILTER_SIZE", DEFAULT_FILTER_SIZE),
            filter_hash_count: env_or("KV_FILTER_HASH_COUNT", DEFAULT_FILTER_HASH_COUNT),
        }
    }

    pub fn with_bucket_count(mut self, bucket_count: usize) -> Self {
        self.bucket_count = bucket_count;
        self
    }

    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    pub fn with_filter_size(mut self, filter_size: usize) -> Self {
        self.filter_size = filter_size;
        self
    }

    pub fn with_filter_hash_count(mut self, filter_hash_count: usize) -> Self {
        self.filter_hash_count = filter_hash_count;
        self
    }

    /// Checks the parameters a store cannot be built from.
    ///
    /// Only a zero bucket count is rejected; zero-sized cache and filter have
    /// well-defined bypass behaviour.
    pub fn validate(&self) -> Result<()> {
        if self.bucket_count == 0 {
            return Err(StoreError::InvalidConfig(
                "bucket_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            filter_size: DEFAULT_FILTER_SIZE,
            filter_hash_count: DEFAULT_FILTER_HASH_COUNT,
        }
    }
}

fn env_or(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
