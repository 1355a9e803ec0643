//! Splay tree keyed by a totally ordered key
//!
//! Nodes live in an arena and refer to each other by index, so rotations
//! rewire `Option<usize>` links instead of moving owned boxes. The splay
//! walk is iterative with an explicit path stack, keeping stack usage
//! bounded for deep access patterns.

use std::cmp::Ordering;

/// Node in the tree arena
struct Node<K, V> {
    key: K,
    value: V,
    left: Option<usize>,
    right: Option<usize>,
}

/// Self-adjusting binary search tree.
///
/// Every access splays toward the requested key, re-rooting the tree at
/// the target (or, on a miss, at the last node on the search path), so
/// recently used keys stay near the root. Lookups therefore take
/// `&mut self`: even a miss reshapes the tree.
pub struct SplayTree<K, V> {
    nodes: Vec<Option<Node<K, V>>>,
    root: Option<usize>,
    len: usize,
}

impl<K, V> Default for SplayTree<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> SplayTree<K, V>
where
    K: Ord,
{
    /// Create an empty tree
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            len: 0,
        }
    }

    /// Look up a key, splaying it (or its nearest neighbor on the search
    /// path) to the root. Returns `None` on a miss; the miss still
    /// re-roots the tree.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.root?;
        self.splay(key);
        let root = self.root?;
        match &self.nodes[root] {
            Some(node) if node.key == *key => Some(&node.value),
            _ => None,
        }
    }

    /// Insert a key-value pair.
    ///
    /// An existing key has its value overwritten in place after being
    /// splayed to the root. A fresh key is spliced in as the new root:
    /// it claims one child subtree from the splayed root and takes the
    /// old root as its other child. The fresh node is not re-splayed
    /// bottom-up; the splice alone puts it at the root.
    pub fn insert(&mut self, key: K, value: V) {
        if self.root.is_none() {
            let idx = self.alloc(Node {
                key,
                value,
                left: None,
                right: None,
            });
            self.root = Some(idx);
            self.len += 1;
            return;
        }

        self.splay(&key);
        let root = match self.root {
            Some(idx) => idx,
            None => return,
        };

        let (order, old_left, old_right) = match &self.nodes[root] {
            Some(node) => (key.cmp(&node.key), node.left, node.right),
            None => return,
        };

        match order {
            Ordering::Equal => {
                if let Some(node) = &mut self.nodes[root] {
                    node.value = value;
                }
            }
            Ordering::Less => {
                if let Some(node) = &mut self.nodes[root] {
                    node.left = None;
                }
                let idx = self.alloc(Node {
                    key,
                    value,
                    left: old_left,
                    right: Some(root),
                });
                self.root = Some(idx);
                self.len += 1;
            }
            Ordering::Greater => {
                if let Some(node) = &mut self.nodes[root] {
                    node.right = None;
                }
                let idx = self.alloc(Node {
                    key,
                    value,
                    left: Some(root),
                    right: old_right,
                });
                self.root = Some(idx);
                self.len += 1;
            }
        }

        debug_assert!(self.is_ordered());
    }

    /// Key at the root, if any
    pub fn root_key(&self) -> Option<&K> {
        let root = self.root?;
        self.nodes[root].as_ref().map(|node| &node.key)
    }

    /// Number of keys in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop all nodes
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Splay toward `key`: walk the search path recording each node,
    /// then rotate the deepest node reached (the target if present) up
    /// to the root with zig-zig / zig-zag rotation pairs.
    fn splay(&mut self, key: &K) {
        let mut cur = match self.root {
            Some(idx) => idx,
            None => return,
        };

        let mut path = Vec::new();
        loop {
            path.push(cur);
            let next = match &self.nodes[cur] {
                Some(node) => match key.cmp(&node.key) {
                    Ordering::Less => node.left,
                    Ordering::Greater => node.right,
                    Ordering::Equal => None,
                },
                None => None,
            };
            match next {
                Some(child) => cur = child,
                None => break,
            }
        }

        // path = [root, ..., target]; rotate the target up two levels at
        // a time, fixing the link from the ancestor above each rotated
        // grandparent.
        while path.len() > 1 {
            let target = path[path.len() - 1];
            let parent = path[path.len() - 2];

            if path.len() == 2 {
                // Zig: target is a child of the root
                let new_root = if self.left_of(parent) == Some(target) {
                    self.rotate_right(parent)
                } else {
                    self.rotate_left(parent)
                };
                self.root = Some(new_root);
                path.clear();
                path.push(new_root);
                continue;
            }

            let grand = path[path.len() - 3];
            let target_left = self.left_of(parent) == Some(target);
            let parent_left = self.left_of(grand) == Some(parent);

            let new_sub = match (parent_left, target_left) {
                (true, true) => {
                    // Zig-zig: rotate the grandparent, then the parent
                    let mid = self.rotate_right(grand);
                    self.rotate_right(mid)
                }
                (false, false) => {
                    let mid = self.rotate_left(grand);
                    self.rotate_left(mid)
                }
                (true, false) => {
                    // Zig-zag: rotate the parent first, relink, then the
                    // grandparent
                    let mid = self.rotate_left(parent);
                    if let Some(node) = &mut self.nodes[grand] {
                        node.left = Some(mid);
                    }
                    self.rotate_right(grand)
                }
                (false, true) => {
                    let mid = self.rotate_right(parent);
                    if let Some(node) = &mut self.nodes[grand] {
                        node.right = Some(mid);
                    }
                    self.rotate_left(grand)
                }
            };

            if path.len() >= 4 {
                let above = path[path.len() - 4];
                if self.left_of(above) == Some(grand) {
                    if let Some(node) = &mut self.nodes[above] {
                        node.left = Some(new_sub);
                    }
                } else if let Some(node) = &mut self.nodes[above] {
                    node.right = Some(new_sub);
                }
            } else {
                self.root = Some(new_sub);
            }

            path.pop();
            path.pop();
            path.pop();
            path.push(new_sub);
        }

        debug_assert!(self.is_ordered());
    }

    /// Right rotation: the left child becomes the subtree root, the old
    /// root becomes its right child. Returns the new subtree root.
    fn rotate_right(&mut self, x: usize) -> usize {
        let y = match self.left_of(x) {
            Some(idx) => idx,
            None => return x,
        };
        let y_right = self.right_of(y);
        if let Some(node) = &mut self.nodes[x] {
            node.left = y_right;
        }
        if let Some(node) = &mut self.nodes[y] {
            node.right = Some(x);
        }
        y
    }

    /// Mirror of [`Self::rotate_right`]
    fn rotate_left(&mut self, x: usize) -> usize {
        let y = match self.right_of(x) {
            Some(idx) => idx,
            None => return x,
        };
        let y_left = self.left_of(y);
        if let Some(node) = &mut self.nodes[x] {
            node.right = y_left;
        }
        if let Some(node) = &mut self.nodes[y] {
            node.left = Some(x);
        }
        y
    }

    fn left_of(&self, idx: usize) -> Option<usize> {
        self.nodes[idx].as_ref().and_then(|node| node.left)
    }

    fn right_of(&self, idx: usize) -> Option<usize> {
        self.nodes[idx].as_ref().and_then(|node| node.right)
    }

    fn alloc(&mut self, node: Node<K, V>) -> usize {
        self.nodes.push(Some(node));
        self.nodes.len() - 1
    }

    /// In-order walk checking strict ascending key order
    fn is_ordered(&self) -> bool {
        let mut stack = Vec::new();
        let mut cur = self.root;
        let mut prev: Option<&K> = None;

        while cur.is_some() || !stack.is_empty() {
            while let Some(idx) = cur {
                stack.push(idx);
                cur = self.left_of(idx);
            }
            let idx = match stack.pop() {
                Some(idx) => idx,
                None => break,
            };
            if let Some(node) = &self.nodes[idx] {
                if let Some(prev_key) = prev {
                    if *prev_key >= node.key {
                        return false;
                    }
                }
                prev = Some(&node.key);
                cur = node.right;
            }
        }

        true
    }
}
