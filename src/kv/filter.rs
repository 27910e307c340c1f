//! Membership Filter Module
//!
//! Insert-only Bloom filter used to answer "definitely absent" quickly.
//!
//! There is deliberately no removal: clearing a key's hashed bits could also
//! clear bits shared with other keys and introduce false negatives. Callers
//! must treat a positive answer as "possibly present" and expect false
//! positives, including for keys that were stored and later removed.

use std::fmt;

use bitvec::prelude::*;

use super::hasher::{baseline_hashers, KeyHasher};

// == Membership Filter ==
/// Fixed-size bit array indexed by `k` hash functions.
pub struct MembershipFilter {
    /// Hashed bits; never cleared once set
    bits: BitVec,
    /// Active hash functions, fixed at construction
    hashers: Vec<Box<dyn KeyHasher>>,
}

impl MembershipFilter {
    // == Constructor ==
    /// Creates a filter of `size` bits using the first `hash_count` baseline
    /// hash functions.
    ///
    /// `hash_count` is clamped to the number of baseline functions.
    pub fn new(size: usize, hash_count: usize) -> Self {
        let mut hashers = baseline_hashers();
        hashers.truncate(hash_count);
        Self::with_hashers(size, hashers)
    }

    /// Creates a filter of `size` bits indexed by the given hash functions.
    pub fn with_hashers(size: usize, hashers: Vec<Box<dyn KeyHasher>>) -> Self {
        Self {
            bits: bitvec![0; size],
            hashers,
        }
    }

    // == Add ==
    /// Sets every hashed bit for `key`. No bit is ever cleared.
    pub fn add(&mut self, key: &str) {
        if self.bits.is_empty() {
            return;
        }

        for hasher in &self.hashers {
            let pos = self.position(hasher.as_ref(), key);
            self.bits.set(pos, true);
        }
    }

    // == Possibly Contains ==
    /// Returns false only if `key` was definitely never added.
    ///
    /// A zero-sized filter always returns false.
    pub fn possibly_contains(&self, key: &str) -> bool {
        if self.bits.is_empty() {
            return false;
        }

        self.hashers
            .iter()
            .all(|hasher| self.bits[self.position(hasher.as_ref(), key)])
    }

    fn position(&self, hasher: &dyn KeyHasher, key: &str) -> usize {
        (u64::from(hasher.hash(key)) % self.bits.len() as u64) as usize
    }

    // == Accessors ==
    /// Returns the bit-array length.
    pub fn size(&self) -> usize {
        self.bits.len()
    }

    /// Returns the number of hash functions applied per key.
    pub fn hash_count(&self) -> usize {
        self.hashers.len()
    }

    /// Returns the number of bits currently set.
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }
}

impl fmt::Debug for MembershipFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MembershipFilter")
            .field("size", &self.size())
            .field("hash_count", &self.hash_count())
            .field("bits_set", &self.bits_set())
            .finish()
    }
}
