//! Removal and underflow repair.
//!
//! After an entry leaves its leaf, an underfull node is repaired by, in
//! order of preference:
//!
//! 1. borrowing one entry (leaf) or one key + child (internal) from the left
//!    sibling, if it has more than the minimum;
//! 2. the same from the right sibling;
//! 3. merging with a sibling into the left-hand node of the pair, which
//!    removes one separator from the parent and may underflow it in turn.
//!
//! Repair walks up the recorded path and stops at the first node that is
//! no longer underfull. An internal root left with a single child is
//! replaced by that child.

use crate::common::{Error, NodeId, Result};

use super::node::{locate, Node};
use super::search::PathEntry;
use super::stats::TreeStats;
use super::tree::BPlusTree;

impl<K: Ord + Copy, V: Copy> BPlusTree<K, V> {
    /// Remove `key`. Returns `false`, leaving the tree untouched, if `key` is
    /// absent.
    pub fn remove(&mut self, key: &K) -> bool {
        self.try_remove(key).is_ok()
    }

    /// Remove `key` and return the record it mapped to.
    ///
    /// # Errors
    /// - `Error::KeyNotFound` if `key` is absent. The tree is not modified.
    pub fn try_remove(&mut self, key: &K) -> Result<V> {
        let (leaf_id, path) = self.find_leaf(key).ok_or(Error::KeyNotFound)?;
        let leaf = self.arena.leaf_mut(leaf_id);
        let position = leaf.position(key).ok_or(Error::KeyNotFound)?;
        let (_, record) = leaf.remove_at(position);
        let remaining = leaf.key_count();

        self.len -= 1;
        TreeStats::bump(&self.stats.removes);

        if path.is_empty() {
            if remaining == 0 {
                self.arena.free(leaf_id);
                self.root = None;
                tracing::trace!(target: "interchange_bptree::root", "tree emptied");
            }
            return Ok(record);
        }

        if remaining < self.config.min_keys() {
            self.rebalance(leaf_id, path);
        }
        // Only a leaf's first key can double as a separator.
        if position == 0 {
            self.replace_separator(key);
        }
        Ok(record)
    }

    /// Repair underflow starting at `node`, whose ancestors are `path`.
    fn rebalance(&mut self, mut node: NodeId, mut path: Vec<PathEntry>) {
        let min_keys = self.config.min_keys();

        while let Some(PathEntry {
            node: parent,
            child_index,
        }) = path.pop()
        {
            if self.arena.node(node).key_count() >= min_keys {
                return;
            }
            if self.borrow_from_sibling(parent, child_index, node) {
                return;
            }
            self.merge_with_sibling(parent, child_index);
            node = parent;
        }

        self.collapse_root(node);
    }

    /// Try to move one entry into `node` from a sibling that can spare it.
    fn borrow_from_sibling(&mut self, parent: NodeId, child_index: usize, node: NodeId) -> bool {
        let min_keys = self.config.min_keys();
        let (left, right) = {
            let p = self.arena.internal(parent);
            let left = child_index.checked_sub(1).map(|i| p.children[i]);
            (left, p.children.get(child_index + 1).copied())
        };

        if let Some(left) = left {
            if self.arena.node(left).key_count() > min_keys {
                self.rotate_from_left(parent, child_index, left, node);
                return true;
            }
        }
        if let Some(right) = right {
            if self.arena.node(right).key_count() > min_keys {
                self.rotate_from_right(parent, child_index, node, right);
                return true;
            }
        }
        false
    }

    /// Move the left sibling's last entry to the front of `node` and fix the
    /// separator between them.
    fn rotate_from_left(
        &mut self,
        parent: NodeId,
        child_index: usize,
        left: NodeId,
        node: NodeId,
    ) {
        let separator = self.arena.internal(parent).keys[child_index - 1];
        let new_separator = match self.arena.pair_mut(left, node) {
            (Node::Leaf(l), Node::Leaf(n)) => {
                let (key, record) = l.pop_last();
                n.push_front(key, record);
                key
            }
            (Node::Internal(l), Node::Internal(n)) => {
                let (key, child) = l.pop_last();
                n.push_front(separator, child);
                key
            }
            _ => panic!("siblings {} and {} differ in kind", left, node),
        };
        self.arena.internal_mut(parent).keys[child_index - 1] = new_separator;

        TreeStats::bump(&self.stats.redistributions);
        tracing::trace!(
            target: "interchange_bptree::redistribute",
            from = left.0,
            to = node.0,
            direction = "left",
            "borrowed from left sibling"
        );
    }

    /// Move the right sibling's first entry to the back of `node` and fix the
    /// separator between them.
    fn rotate_from_right(
        &mut self,
        parent: NodeId,
        child_index: usize,
        node: NodeId,
        right: NodeId,
    ) {
        let separator = self.arena.internal(parent).keys[child_index];
        let new_separator = match self.arena.pair_mut(node, right) {
            (Node::Leaf(n), Node::Leaf(r)) => {
                let (key, record) = r.pop_first();
                n.push_back(key, record);
                r.keys[0]
            }
            (Node::Internal(n), Node::Internal(r)) => {
                let (key, child) = r.pop_first();
                n.push_back(separator, child);
                key
            }
            _ => panic!("siblings {} and {} differ in kind", node, right),
        };
        self.arena.internal_mut(parent).keys[child_index] = new_separator;

        TreeStats::bump(&self.stats.redistributions);
        tracing::trace!(
            target: "interchange_bptree::redistribute",
            from = right.0,
            to = node.0,
            direction = "right",
            "borrowed from right sibling"
        );
    }

    /// Merge the child at `child_index` with a sibling. The right-hand node
    /// of the pair is folded into the left-hand one and freed.
    fn merge_with_sibling(&mut self, parent: NodeId, child_index: usize) {
        let p = self.arena.internal_mut(parent);
        let separator_index = if child_index > 0 {
            child_index - 1
        } else {
            child_index
        };
        let left = p.children[separator_index];
        let right = p.children[separator_index + 1];
        let separator = p.keys.remove(separator_index);
        p.children.remove(separator_index + 1);

        let removed = self.arena.free(right);
        let relink = match (removed, self.arena.node_mut(left)) {
            (Node::Leaf(r), Node::Leaf(l)) => {
                let next = r.next;
                l.absorb(r);
                l.next = next;
                TreeStats::bump(&self.stats.leaf_merges);
                next
            }
            (Node::Internal(r), Node::Internal(l)) => {
                l.absorb(separator, r);
                TreeStats::bump(&self.stats.internal_merges);
                None
            }
            _ => panic!("siblings {} and {} differ in kind", left, right),
        };
        if let Some(next) = relink {
            self.arena.leaf_mut(next).prev = Some(left);
        }

        tracing::trace!(
            target: "interchange_bptree::merge",
            survivor = left.0,
            removed = right.0,
            "merged siblings"
        );
    }

    /// Replace an internal root that has lost all its separators with its
    /// only child.
    fn collapse_root(&mut self, root: NodeId) {
        let child = match self.arena.node(root) {
            Node::Internal(internal) if internal.keys.is_empty() => internal.children[0],
            _ => return,
        };
        self.arena.free(root);
        self.root = Some(child);

        TreeStats::bump(&self.stats.root_collapses);
        tracing::trace!(
            target: "interchange_bptree::root",
            old_root = root.0,
            new_root = child.0,
            "collapsed root"
        );
    }

    /// If `removed` still appears as a separator, replace it with the
    /// smallest key of the subtree to its right.
    ///
    /// Separators are unique, and every ancestor routes `removed` towards the
    /// node holding it, so a single descent finds it.
    fn replace_separator(&mut self, removed: &K) {
        let mut current = self.root;
        while let Some(id) = current {
            let (index, child) = match self.arena.node(id) {
                Node::Leaf(_) => return,
                Node::Internal(internal) => {
                    let index = locate(&internal.keys, removed);
                    (index, internal.children[index])
                }
            };

            let keys = &self.arena.internal(id).keys;
            if index > 0 && keys[index - 1] == *removed {
                let successor = self.arena.leaf(self.leftmost_leaf(child)).keys[0];
                self.arena.internal_mut(id).keys[index - 1] = successor;
                return;
            }
            current = Some(child);
        }
    }
}
