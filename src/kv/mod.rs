//! Key-Value Module
//!
//! The primary table, the three auxiliary indexes layered over it, and the
//! store that keeps them consistent.

mod filter;
pub mod hasher;
mod lru;
mod stats;
mod store;
mod table;
mod trie;


// Re-export public types
pub use filter::MembershipFilter;
pub use hasher::KeyHasher;
pub use lru::RecencyCache;
pub use stats::StoreStats;
pub use store::Store;
pub use table::{Entry, PrimaryTable};
pub use trie::PrefixIndex;
