//! Recency Cache Module
//!
//! Bounded key/value cache with least-recently-used eviction.

use std::collections::HashMap;
use std::mem;

// == Cache Node ==
/// Slot in the node arena, linked to its neighbours by slot index.
#[derive(Debug, Default)]
struct Node {
    key: String,
    value: String,
    /// Towards the head (more recent)
    prev: Option<usize>,
    /// Towards the tail (less recent)
    next: Option<usize>,
}

// == Recency Cache ==
/// LRU cache built on a doubly-linked list stored in an arena.
///
/// - Head = most recently used
/// - Tail = least recently used
///
/// The key index maps each key to its arena slot, so promotion, removal and
/// eviction all relink nodes in O(1) without scanning. Released slots are
/// recycled through a free list. A capacity of 0 turns every operation into
/// a no-op.
#[derive(Debug)]
pub struct RecencyCache {
    capacity: usize,
    nodes: Vec<Node>,
    /// Arena slots available for reuse
    free: Vec<usize>,
    index: HashMap<String, usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl RecencyCache {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            nodes: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            head: None,
            tail: None,
        }
    }

    // == Get ==
    /// Returns the cached value and marks `key` as most recently used.
    pub fn get(&mut self, key: &str) -> Option<&str> {
        let slot = *self.index.get(key)?;
        self.promote(slot);
        Some(self.nodes[slot].value.as_str())
    }

    // == Put ==
    /// Inserts or updates `key` and marks it as most recently used.
    ///
    /// When a new key would exceed capacity the least recently used entry is
    /// evicted first and returned.
    pub fn put(&mut self, key: String, value: String) -> Option<(String, String)> {
        if self.capacity == 0 {
            return None;
        }

        if let Some(&slot) = self.index.get(&key) {
            self.nodes[slot].value = value;
            self.promote(slot);
            return None;
        }

        let evicted = if self.index.len() >= self.capacity {
            self.pop_lru()
        } else {
            None
        };

        let slot = self.alloc(key.clone(), value);
        self.push_front(slot);
        self.index.insert(key, slot);

        evicted
    }

    // == Contains ==
    /// Checks whether `key` is cached without changing its recency.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == Remove ==
    /// Drops `key` from the cache, returning whether it was cached.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.index.remove(key) {
            Some(slot) => {
                self.unlink(slot);
                self.release(slot);
                true
            }
            None => false,
        }
    }

    // == Peek LRU ==
    /// Returns the key that would be evicted next.
    pub fn peek_lru(&self) -> Option<&str> {
        self.tail.map(|slot| self.nodes[slot].key.as_str())
    }

    /// Returns cached keys from most to least recently used.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys = Vec::with_capacity(self.index.len());
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            keys.push(self.nodes[slot].key.as_str());
            cursor = self.nodes[slot].next;
        }
        keys
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Internal list surgery ==

    fn promote(&mut self, slot: usize) {
        if self.head != Some(slot) {
            self.unlink(slot);
            self.push_front(slot);
        }
    }

    fn pop_lru(&mut self) -> Option<(String, String)> {
        let slot = self.tail?;
        self.unlink(slot);
        let (key, value) = self.release(slot);
        self.index.remove(&key);
        Some((key, value))
    }

    fn push_front(&mut self, slot: usize) {
        self.nodes[slot].prev = None;
        self.nodes[slot].next = self.head;

        match self.head {
            Some(old_head) => self.nodes[old_head].prev = Some(slot),
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }

    fn unlink(&mut self, slot: usize) {
        let prev = self.nodes[slot].prev.take();
        let next = self.nodes[slot].next.take();

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }
    }

    fn alloc(&mut self, key: String, value: String) -> usize {
        let node = Node {
            key,
            value,
            prev: None,
            next: None,
        };

        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Empties an unlinked slot and returns its contents.
    fn release(&mut self, slot: usize) -> (String, String) {
        let node = &mut self.nodes[slot];
        let contents = (mem::take(&mut node.key), mem::take(&mut node.value));
        self.free.push(slot);
        contents
    }
}
