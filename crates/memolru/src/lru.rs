//! LRU (Least Recently Used) cache implementation
//!
//! Uses an arena-backed doubly-linked list for O(1) recency updates and
//! eviction. Interval-shaped keys additionally support range
//! invalidation: a linear sweep that drops every entry covering a
//! mutated index while leaving the recency order of the survivors
//! intact.

use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;

use crate::error::{Error, Result};

/// Keys that span a contiguous index interval
pub trait Cover {
    /// True if the key's interval contains `index`
    fn covers(&self, index: usize) -> bool;
}

/// Inclusive `(l, r)` interval key
impl Cover for (usize, usize) {
    fn covers(&self, index: usize) -> bool {
        self.0 <= index && index <= self.1
    }
}

/// Node in the LRU doubly-linked list
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// LRU cache with fixed capacity.
///
/// `head` is the most-recently-touched end, `tail` the least. Every
/// successful `get` or `put` moves its key to the head; when a fresh
/// key would push the size past capacity, the tail entry is evicted.
pub struct LruCache<K, V> {
    map: HashMap<K, usize, RandomState>,
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity.
    ///
    /// # Errors
    /// Returns [`Error::ZeroCapacity`] for capacity 0; a cache that can
    /// hold nothing would silently drop every `put`.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        Ok(Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            capacity,
        })
    }

    /// Get a value, marking the key most recently used. A miss returns
    /// `None` with no side effects.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.move_to_front(idx);
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    /// Insert a key-value pair at the most-recently-used end.
    ///
    /// An existing key is overwritten and touched; a fresh key may
    /// evict the entry at the least-recently-used end, at most one per
    /// call. Returns `true` when an entry was evicted.
    pub fn put(&mut self, key: K, value: V) -> bool {
        if let Some(&idx) = self.map.get(&key) {
            if let Some(node) = &mut self.nodes[idx] {
                node.value = value;
            }
            self.move_to_front(idx);
            return false;
        }

        let mut evicted = false;
        if self.map.len() >= self.capacity {
            evicted = self.evict();
        }

        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            key: key.clone(),
            value,
            prev: None,
            next: self.head,
        });

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }

        self.map.insert(key, idx);
        debug_assert!(self.map.len() <= self.capacity);
        evicted
    }

    /// Remove a key from the cache
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.map.remove(key)?;
        self.unlink(idx);
        self.free_node(idx);
        self.nodes[idx].take().map(|node| node.value)
    }

    /// Get the current size of the cache
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Get the configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.map.clear();
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
    }

    /// Key at the least-recently-used end, if any
    pub fn lru_key(&self) -> Option<&K> {
        let tail_idx = self.tail?;
        self.nodes[tail_idx].as_ref().map(|node| &node.key)
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return; // Already at front
        }

        self.unlink(idx);

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = self.head;
        }

        if let Some(head_idx) = self.head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = if let Some(node) = &self.nodes[idx] {
            (node.prev, node.next)
        } else {
            return;
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn evict(&mut self) -> bool {
        let tail_idx = match self.tail {
            Some(idx) => idx,
            None => return false,
        };
        // Unlink while the node is still in place so the list ends
        // get repaired, then drop it.
        self.unlink(tail_idx);
        if let Some(node) = self.nodes[tail_idx].take() {
            self.map.remove(&node.key);
        }
        self.free_node(tail_idx);
        true
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }

    fn free_node(&mut self, idx: usize) {
        self.free_list.push(idx);
    }
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone + Cover,
{
    /// Remove every entry whose key covers `index`, returning how many
    /// were dropped.
    ///
    /// Linear in the number of cached entries. Survivors keep their
    /// relative recency order: removal only unlinks, it never reorders.
    pub fn invalidate_covering(&mut self, index: usize) -> usize {
        let mut stale = Vec::new();
        for (idx, slot) in self.nodes.iter().enumerate() {
            if let Some(node) = slot {
                if node.key.covers(index) {
                    stale.push(idx);
                }
            }
        }

        for &idx in &stale {
            self.unlink(idx);
            if let Some(node) = self.nodes[idx].take() {
                self.map.remove(&node.key);
            }
            self.free_node(idx);
        }

        stale.len()
    }
}
