//! Layered KV - An in-memory key-value store
//!
//! A chained hash table fronted by a Bloom filter, with a trie for prefix
//! search and an LRU cache for recently used values.

pub mod config;
pub mod error;
pub mod kv;
pub mod shell;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use kv::Store;
pub use shell::Session;
