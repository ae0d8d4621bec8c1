//! Insertion and overflow splits.
//!
//! ```text
//!  leaf overflow (F = 4)          [5 6 10 20] + none
//!                                      │ split at ceil(F/2) = 2
//!                                      ▼
//!                              [5 6] ◀──▶ [10 20]      separator 10 goes up
//!
//!  internal overflow (F = 4)      keys [10 20 30 40]
//!                                      │ split at F/2 = 2
//!                                      ▼
//!                           [10 20]   30 ▲   [40]      30 moves up, kept nowhere below
//! ```

use crate::common::{Error, NodeId, Result};

use super::node::{locate, InternalNode, LeafNode, Node};
use super::search::PathEntry;
use super::stats::TreeStats;
use super::tree::BPlusTree;

impl<K: Ord + Copy, V: Copy> BPlusTree<K, V> {
    /// Insert `key` → `record`. Returns `false`, leaving the tree untouched,
    /// if `key` is already present.
    pub fn insert(&mut self, key: K, record: V) -> bool {
        self.try_insert(key, record).is_ok()
    }

    /// Insert `key` → `record`.
    ///
    /// # Errors
    /// - `Error::DuplicateKey` if `key` is already present. Existing records
    ///   are never overwritten and the tree is not modified.
    pub fn try_insert(&mut self, key: K, record: V) -> Result<()> {
        let Some((leaf_id, path)) = self.find_leaf(&key) else {
            let mut leaf = LeafNode::with_capacity(self.config.max_fanout);
            leaf.push_back(key, record);
            self.root = Some(self.arena.alloc(Node::Leaf(leaf)));
            self.len = 1;
            TreeStats::bump(&self.stats.inserts);
            return Ok(());
        };

        let max_keys = self.config.max_keys();
        let leaf = self.arena.leaf_mut(leaf_id);
        let index = locate(&leaf.keys, &key);
        if index > 0 && leaf.keys[index - 1] == key {
            return Err(Error::DuplicateKey);
        }
        leaf.insert_at(index, key, record);
        let overflow = leaf.key_count() > max_keys;

        self.len += 1;
        TreeStats::bump(&self.stats.inserts);

        if overflow {
            let (separator, right) = self.split_leaf(leaf_id);
            self.insert_into_parent(path, leaf_id, separator, right);
        }
        Ok(())
    }

    /// Split an overflowing leaf and splice the new right half into the
    /// sibling chain. Returns the separator to promote (the right half's
    /// first key) and the new leaf.
    fn split_leaf(&mut self, leaf_id: NodeId) -> (K, NodeId) {
        let split_at = self.config.leaf_split_point();
        let capacity = self.config.max_fanout;

        let leaf = self.arena.leaf_mut(leaf_id);
        let mut right = leaf.split_off(split_at, capacity);
        let old_next = leaf.next;
        right.prev = Some(leaf_id);
        right.next = old_next;
        let separator = right.keys[0];

        let right_id = self.arena.alloc(Node::Leaf(right));
        self.arena.leaf_mut(leaf_id).next = Some(right_id);
        if let Some(next) = old_next {
            self.arena.leaf_mut(next).prev = Some(right_id);
        }

        TreeStats::bump(&self.stats.leaf_splits);
        tracing::trace!(
            target: "interchange_bptree::split",
            left = leaf_id.0,
            right = right_id.0,
            "split leaf"
        );
        (separator, right_id)
    }

    /// Walk back up `path` inserting `separator` → `right` next to `left`,
    /// splitting full ancestors as needed. Grows a new root if the split
    /// reaches the top.
    fn insert_into_parent(
        &mut self,
        mut path: Vec<PathEntry>,
        mut left: NodeId,
        mut separator: K,
        mut right: NodeId,
    ) {
        let fanout = self.config.max_fanout;
        let max_keys = self.config.max_keys();
        let mid = self.config.internal_split_point();

        while let Some(PathEntry { node, child_index }) = path.pop() {
            let parent = self.arena.internal_mut(node);
            parent.insert_after(child_index, separator, right);
            if parent.key_count() <= max_keys {
                return;
            }

            let (promoted, new_right) = parent.split_off(mid, fanout);
            let new_right_id = self.arena.alloc(Node::Internal(new_right));
            TreeStats::bump(&self.stats.internal_splits);
            tracing::trace!(
                target: "interchange_bptree::split",
                left = node.0,
                right = new_right_id.0,
                "split internal node"
            );

            left = node;
            separator = promoted;
            right = new_right_id;
        }

        let root = InternalNode::new_root(fanout, left, separator, right);
        let root_id = self.arena.alloc(Node::Internal(root));
        self.root = Some(root_id);
        TreeStats::bump(&self.stats.root_splits);
        tracing::trace!(
            target: "interchange_bptree::root",
            root = root_id.0,
            "grew new root"
        );
    }
}
