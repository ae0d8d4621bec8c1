//! Node representation.
//!
//! A [`Node`] is a tagged union of [`LeafNode`] and [`InternalNode`]. Both
//! variants keep their keys in a `Vec` sized once for the tree's fanout, so
//! the arrays never reallocate during normal operation. During a split a
//! node briefly holds one entry more than its steady-state capacity.
//!
//! ```text
//!   InternalNode                 keys:     [ 10 | 20 ]
//!                              children:  [ c0 | c1 | c2 ]
//!                                           │    │    └── keys >= 20
//!                                           │    └─────── 10 <= keys < 20
//!                                           └──────────── keys < 10
//!
//!   LeafNode      prev ◀── [ 10 | 12 | 17 ] ──▶ next
//!                          [ r0 | r1 | r2 ]   (records)
//! ```

use crate::common::NodeId;

/// A node of the tree.
#[derive(Debug, Clone)]
pub enum Node<K, V> {
    Leaf(LeafNode<K, V>),
    Internal(InternalNode<K>),
}

impl<K: Ord + Copy, V: Copy> Node<K, V> {
    /// Whether this node is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Number of keys stored in the node.
    #[inline]
    pub fn key_count(&self) -> usize {
        self.keys().len()
    }

    /// The node's keys in increasing order.
    #[inline]
    pub fn keys(&self) -> &[K] {
        match self {
            Node::Leaf(leaf) => &leaf.keys,
            Node::Internal(internal) => &internal.keys,
        }
    }

    /// Index of the first key strictly greater than `key`, or `key_count()`.
    ///
    /// For an internal node this is the child slot `key` belongs in; a key
    /// equal to a separator routes right, because the separator is the
    /// smallest key of its right subtree. For a leaf it is the insertion
    /// point, and an exact match sits just before it.
    #[inline]
    pub fn locate(&self, key: &K) -> usize {
        locate(self.keys(), key)
    }
}

/// Index of the first element of `keys` strictly greater than `key`.
///
/// Nodes hold at most `F - 1` keys, so a linear scan is as fast as a binary
/// search at the fanouts this tree is used with and is simpler to audit.
#[inline]
pub(crate) fn locate<K: Ord>(keys: &[K], key: &K) -> usize {
    keys.iter().position(|k| k > key).unwrap_or(keys.len())
}

// ============================================================================
// Leaf nodes
// ============================================================================

/// A leaf: keys paired positionally with records, plus sibling links.
///
/// `prev` and `next` are navigational only. The node arena owns every leaf;
/// the links exist so range scans can walk leaves in key order without
/// descending from the root again.
#[derive(Debug, Clone)]
pub struct LeafNode<K, V> {
    pub(crate) keys: Vec<K>,
    pub(crate) records: Vec<V>,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

impl<K: Ord + Copy, V: Copy> LeafNode<K, V> {
    /// Create an empty leaf able to hold `capacity` entries without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            records: Vec::with_capacity(capacity),
            prev: None,
            next: None,
        }
    }

    #[inline]
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    #[inline]
    pub fn records(&self) -> &[V] {
        &self.records
    }

    /// Previous leaf in key order.
    #[inline]
    pub fn prev(&self) -> Option<NodeId> {
        self.prev
    }

    /// Next leaf in key order.
    #[inline]
    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    /// Position of `key` in this leaf, if present.
    pub fn position(&self, key: &K) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// Record paired with `key`, if present.
    pub fn get(&self, key: &K) -> Option<V> {
        self.position(key).map(|i| self.records[i])
    }

    /// Insert an entry at `index`, shifting later entries right.
    pub(crate) fn insert_at(&mut self, index: usize, key: K, record: V) {
        self.keys.insert(index, key);
        self.records.insert(index, record);
    }

    /// Remove the entry at `index`, shifting later entries left.
    pub(crate) fn remove_at(&mut self, index: usize) -> (K, V) {
        (self.keys.remove(index), self.records.remove(index))
    }

    pub(crate) fn pop_first(&mut self) -> (K, V) {
        self.remove_at(0)
    }

    pub(crate) fn pop_last(&mut self) -> (K, V) {
        self.remove_at(self.keys.len() - 1)
    }

    pub(crate) fn push_front(&mut self, key: K, record: V) {
        self.insert_at(0, key, record);
    }

    pub(crate) fn push_back(&mut self, key: K, record: V) {
        self.keys.push(key);
        self.records.push(record);
    }

    /// Move entries `[at..]` into a new leaf. Sibling links are left to the
    /// caller.
    pub(crate) fn split_off(&mut self, at: usize, capacity: usize) -> Self {
        let mut right = Self::with_capacity(capacity);
        right.keys.extend(self.keys.drain(at..));
        right.records.extend(self.records.drain(at..));
        right
    }

    /// Append every entry of `right`, which must hold only larger keys.
    pub(crate) fn absorb(&mut self, right: LeafNode<K, V>) {
        debug_assert!(match (self.keys.last(), right.keys.first()) {
            (Some(l), Some(r)) => l < r,
            _ => true,
        });
        self.keys.extend(right.keys);
        self.records.extend(right.records);
    }
}

// ============================================================================
// Internal nodes
// ============================================================================

/// An internal node: `n` separator keys and `n + 1` owned children.
#[derive(Debug, Clone)]
pub struct InternalNode<K> {
    pub(crate) keys: Vec<K>,
    pub(crate) children: Vec<NodeId>,
}

impl<K: Ord + Copy> InternalNode<K> {
    /// Create an empty internal node able to hold `fanout` children without
    /// reallocating.
    pub fn with_capacity(fanout: usize) -> Self {
        Self {
            keys: Vec::with_capacity(fanout),
            children: Vec::with_capacity(fanout + 1),
        }
    }

    /// A new root over two children split around `separator`.
    pub(crate) fn new_root(fanout: usize, left: NodeId, separator: K, right: NodeId) -> Self {
        let mut node = Self::with_capacity(fanout);
        node.keys.push(separator);
        node.children.push(left);
        node.children.push(right);
        node
    }

    #[inline]
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Child covering `key`.
    #[inline]
    pub fn child_for(&self, key: &K) -> (usize, NodeId) {
        let index = locate(&self.keys, key);
        (index, self.children[index])
    }

    /// Insert `separator` and its right-hand child next to the child at
    /// `child_index`.
    pub(crate) fn insert_after(&mut self, child_index: usize, separator: K, right: NodeId) {
        self.keys.insert(child_index, separator);
        self.children.insert(child_index + 1, right);
    }

    /// Detach the first key and the first child.
    pub(crate) fn pop_first(&mut self) -> (K, NodeId) {
        (self.keys.remove(0), self.children.remove(0))
    }

    /// Detach the last key and the last child.
    pub(crate) fn pop_last(&mut self) -> (K, NodeId) {
        let key = self.keys.remove(self.keys.len() - 1);
        let child = self.children.remove(self.children.len() - 1);
        (key, child)
    }

    /// Prepend `key` and make `child` the new first child.
    pub(crate) fn push_front(&mut self, key: K, child: NodeId) {
        self.keys.insert(0, key);
        self.children.insert(0, child);
    }

    /// Append `key` and make `child` the new last child.
    pub(crate) fn push_back(&mut self, key: K, child: NodeId) {
        self.keys.push(key);
        self.children.push(child);
    }

    /// Split an overflowing node around `keys[mid]`.
    ///
    /// Returns the promoted key and the new right node. The promoted key is
    /// not kept in either half.
    pub(crate) fn split_off(&mut self, mid: usize, fanout: usize) -> (K, Self) {
        let mut right = Self::with_capacity(fanout);
        right.keys.extend(self.keys.drain(mid + 1..));
        right.children.extend(self.children.drain(mid + 1..));
        // keys[mid] is now the last key of the left half.
        let promoted = self.keys.pop();
        match promoted {
            Some(key) => (key, right),
            None => unreachable!("internal split of a node without keys"),
        }
    }

    /// Append `separator` followed by all of `right`'s keys and children.
    pub(crate) fn absorb(&mut self, separator: K, right: InternalNode<K>) {
        self.keys.push(separator);
        self.keys.extend(right.keys);
        self.children.extend(right.children);
    }
}
