//! Prefix Index Module
//!
//! A character trie over the stored keys, used for prefix enumeration.
//!
//! Each node exclusively owns its children, so removing a child drops the
//! whole pruned subtree. Children are kept in a `BTreeMap` which gives the
//! ascending-character traversal order that `search_prefix` reports.
//!
//! Keys may be arbitrarily long, so every walk over the tree (insert,
//! search, removal, counting and dropping) runs on an explicit work-list
//! instead of the call stack.

use std::collections::BTreeMap;
use std::mem;

use tracing::debug;

// == Trie Node ==
#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    /// Some inserted key ends exactly here
    terminal: bool,
}

impl TrieNode {
    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl Drop for TrieNode {
    fn drop(&mut self) {
        // Detach descendants so each one is dropped childless
        let mut pending: Vec<TrieNode> = mem::take(&mut self.children).into_values().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(mem::take(&mut node.children).into_values());
        }
    }
}

// == Prefix Index ==
/// Trie of inserted keys.
///
/// Invariant: the root-to-terminal paths are exactly the live keys, and no
/// node other than the root is both non-terminal and childless.
#[derive(Debug, Default)]
pub struct PrefixIndex {
    root: TrieNode,
    /// Number of terminal nodes
    len: usize,
}

impl PrefixIndex {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Adds `key`, creating nodes along its path on demand.
    ///
    /// Inserting a key that is already present leaves the index unchanged.
    pub fn insert(&mut self, key: &str) {
        let node = key.chars().fold(&mut self.root, |node, ch| {
            node.children.entry(ch).or_default()
        });

        if !node.terminal {
            node.terminal = true;
            self.len += 1;
        }
    }

    // == Contains ==
    /// Returns true only if `key` itself was inserted; a key that is merely
    /// a prefix of another key is not contained.
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some_and(|node| node.terminal)
    }

    // == Search Prefix ==
    /// Returns every inserted key starting with `prefix`.
    ///
    /// Keys come out in depth-first pre-order with children visited in
    /// ascending character order: a key is emitted before any key it is a
    /// prefix of. A prefix with no matching path yields an empty list.
    pub fn search_prefix(&self, prefix: &str) -> Vec<String> {
        let mut results = Vec::new();
        let Some(start) = self.find(prefix) else {
            return results;
        };

        let mut path = prefix.to_string();
        // (node, path length in bytes before this node's edge, edge char)
        let mut stack: Vec<(&TrieNode, usize, Option<char>)> = vec![(start, path.len(), None)];

        while let Some((node, parent_len, edge)) = stack.pop() {
            path.truncate(parent_len);
            if let Some(ch) = edge {
                path.push(ch);
            }
            if node.terminal {
                results.push(path.clone());
            }

            // Reversed so the smallest character is popped first
            let len = path.len();
            stack.extend(
                node.children
                    .iter()
                    .rev()
                    .map(|(&ch, child)| (child, len, Some(ch))),
            );
        }

        results
    }

    // == Remove ==
    /// Removes `key`, pruning nodes that no longer lead to any key.
    ///
    /// Walking back up from the key's node, each ancestor is dropped while it
    /// is neither terminal nor the parent of another branch. Returns false,
    /// leaving the structure untouched, when `key` is absent. The root itself
    /// is never pruned.
    pub fn remove(&mut self, key: &str) -> bool {
        let chars: Vec<char> = key.chars().collect();

        // Nodes along the key's path, root first
        let mut path: Vec<&TrieNode> = Vec::with_capacity(chars.len() + 1);
        path.push(&self.root);
        for ch in &chars {
            match path[path.len() - 1].children.get(ch) {
                Some(child) => path.push(child),
                None => return false,
            }
        }

        let target = path[chars.len()];
        if !target.terminal {
            return false;
        }

        // Depth of the node that keeps its edge to the pruned branch
        let cut = if target.is_leaf() && !chars.is_empty() {
            let mut depth = chars.len() - 1;
            while depth > 0 && !path[depth].terminal && path[depth].children.len() == 1 {
                depth -= 1;
            }
            Some(depth)
        } else {
            None
        };

        match cut {
            Some(depth) => {
                let parent = chars[..depth]
                    .iter()
                    .fold(Some(&mut self.root), |node, ch| {
                        node.and_then(|n| n.children.get_mut(ch))
                    });
                if let Some(parent) = parent {
                    parent.children.remove(&chars[depth]);
                    debug!(
                        depth,
                        pruned = chars.len() - depth,
                        "pruned trie branch"
                    );
                }
            }
            None => {
                let node = chars.iter().fold(Some(&mut self.root), |node, ch| {
                    node.and_then(|n| n.children.get_mut(ch))
                });
                if let Some(node) = node {
                    node.terminal = false;
                }
            }
        }

        self.len -= 1;
        true
    }

    // == Length ==
    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated nodes, root included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.values());
        }
        count
    }

    fn find(&self, path: &str) -> Option<&TrieNode> {
        path.chars()
            .try_fold(&self.root, |node, ch| node.children.get(&ch))
    }
}
