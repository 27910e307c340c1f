//! Primary Table Module
//!
//! Exact-match key/value storage using separate chaining over a fixed
//! number of buckets.

// == Entry ==
/// A single key/value pair stored in a bucket chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

// == Primary Table ==
/// Chained hash table with an immutable bucket count.
///
/// Each operation scans one chain linearly. There is no rehashing, so the
/// bucket count chosen at construction is kept for the table's lifetime.
#[derive(Debug)]
pub struct PrimaryTable {
    /// One chain per bucket
    buckets: Vec<Vec<Entry>>,
    /// Number of live entries across all chains
    len: usize,
}

impl PrimaryTable {
    // == Constructor ==
    /// Creates a table with `bucket_count` chains.
    ///
    /// A bucket count of zero is raised to one so that the bucket index is
    /// always defined; `StoreConfig::validate` rejects it earlier for stores.
    pub fn new(bucket_count: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); bucket_count.max(1)],
            len: 0,
        }
    }

    // == Bucket Index ==
    /// Polynomial hash `h = h * 31 + c (mod B)` folded per character, so the
    /// running value never exceeds `B - 1`.
    fn bucket_index(&self, key: &str) -> usize {
        let modulus = self.buckets.len() as u128;
        let index = key
            .chars()
            .fold(0u128, |h, c| (h * 31 + u128::from(u32::from(c))) % modulus);
        index as usize
    }

    // == Set ==
    /// Inserts a new entry or overwrites the value of an existing one.
    ///
    /// Returns true when the key was not present before.
    pub fn set(&mut self, key: String, value: String) -> bool {
        let index = self.bucket_index(&key);
        let chain = &mut self.buckets[index];

        if let Some(entry) = chain.iter_mut().find(|e| e.key == key) {
            entry.value = value;
            return false;
        }

        chain.push(Entry { key, value });
        self.len += 1;
        true
    }

    // == Get ==
    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.buckets[self.bucket_index(key)]
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    // == Remove ==
    /// Removes `key`, returning whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let index = self.bucket_index(key);
        let chain = &mut self.buckets[index];

        match chain.iter().position(|e| e.key == key) {
            Some(pos) => {
                chain.remove(pos);
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    // == Contains ==
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    // == Length ==
    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the fixed number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}
