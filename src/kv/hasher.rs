//! Key Hasher Module
//!
//! The integer hash capability that drives the membership filter, plus the
//! three baseline functions a filter is built from by default.

/// Deterministic `key -> u32` hash used to pick a filter bit.
pub trait KeyHasher: Send + Sync {
    fn hash(&self, key: &str) -> u32;
}

/// DJB2 variant: `h = h * 33 + c`, seeded with 5381.
#[derive(Debug, Clone, Copy, Default)]
pub struct Djb2;

impl KeyHasher for Djb2 {
    fn hash(&self, key: &str) -> u32 {
        key.bytes().fold(5381u32, |h, c| {
            (h << 5).wrapping_add(h).wrapping_add(u32::from(c))
        })
    }
}

/// SDBM: `h = c + (h << 6) + (h << 16) - h`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sdbm;

impl KeyHasher for Sdbm {
    fn hash(&self, key: &str) -> u32 {
        key.bytes().fold(0u32, |h, c| {
            u32::from(c)
                .wrapping_add(h << 6)
                .wrapping_add(h << 16)
                .wrapping_sub(h)
        })
    }
}

/// Multiplicative: `h = h * 31 + c`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Polynomial31;

impl KeyHasher for Polynomial31 {
    fn hash(&self, key: &str) -> u32 {
        key.bytes()
            .fold(0u32, |h, c| h.wrapping_mul(31).wrapping_add(u32::from(c)))
    }
}

/// Number of functions returned by [`baseline_hashers`].
pub const BASELINE_HASHER_COUNT: usize = 3;

/// The default hash family, in application order.
pub fn baseline_hashers() -> Vec<Box<dyn KeyHasher>> {
    vec![Box::new(Djb2), Box::new(Sdbm), Box::new(Polynomial31)]
}
