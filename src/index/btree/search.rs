//! Traversal and point lookup.

use crate::common::NodeId;

use super::node::{locate, Node};
use super::stats::TreeStats;
use super::tree::BPlusTree;

/// One step of a root-to-leaf descent.
///
/// Mutations record the path on the way down and consume it back-to-front
/// to propagate splits and merges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PathEntry {
    /// Internal node that was visited.
    pub node: NodeId,
    /// Index of the child taken out of `node`.
    pub child_index: usize,
}

impl<K: Ord + Copy, V: Copy> BPlusTree<K, V> {
    /// Descend to the leaf that covers `key`, recording every internal node
    /// visited and the child index taken. Returns `None` on an empty tree.
    pub(crate) fn find_leaf(&self, key: &K) -> Option<(NodeId, Vec<PathEntry>)> {
        let mut path = Vec::new();
        let mut current = self.root?;
        loop {
            match self.arena.node(current) {
                Node::Leaf(_) => return Some((current, path)),
                Node::Internal(internal) => {
                    let (child_index, child) = internal.child_for(key);
                    path.push(PathEntry {
                        node: current,
                        child_index,
                    });
                    current = child;
                }
            }
        }
    }

    /// Same descent as [`find_leaf`](Self::find_leaf) without recording the
    /// path, for read-only callers.
    pub(crate) fn leaf_for(&self, key: &K) -> Option<NodeId> {
        let mut current = self.root?;
        while let Node::Internal(internal) = self.arena.node(current) {
            current = internal.children[locate(&internal.keys, key)];
        }
        Some(current)
    }

    /// Leftmost leaf of the subtree rooted at `node`.
    pub(crate) fn leftmost_leaf(&self, mut node: NodeId) -> NodeId {
        while let Node::Internal(internal) = self.arena.node(node) {
            node = internal.children[0];
        }
        node
    }

    /// Rightmost leaf of the subtree rooted at `node`.
    pub(crate) fn rightmost_leaf(&self, mut node: NodeId) -> NodeId {
        while let Node::Internal(internal) = self.arena.node(node) {
            node = internal.children[internal.children.len() - 1];
        }
        node
    }

    // ========================================================================
    // Public API: Point lookup
    // ========================================================================

    /// Record stored under `key`, or `None` if the key is absent.
    pub fn get(&self, key: &K) -> Option<V> {
        TreeStats::bump(&self.stats.lookups);
        let leaf = self.leaf_for(key)?;
        self.arena.leaf(leaf).get(key)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Smallest key and its record.
    pub fn first_key_value(&self) -> Option<(K, V)> {
        let leaf = self.arena.leaf(self.leftmost_leaf(self.root?));
        Some((*leaf.keys.first()?, *leaf.records.first()?))
    }

    /// Largest key and its record.
    pub fn last_key_value(&self) -> Option<(K, V)> {
        let leaf = self.arena.leaf(self.rightmost_leaf(self.root?));
        Some((*leaf.keys.last()?, *leaf.records.last()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(fanout: usize, keys: &[i64]) -> BPlusTree<i64, u64> {
        let mut tree = BPlusTree::new(fanout).unwrap();
        for &k in keys {
            assert!(tree.insert(k, k as u64 * 100));
        }
        tree
    }

    #[test]
    fn test_find_leaf_on_empty_tree() {
        let tree: BPlusTree<i64, u64> = BPlusTree::new(4).unwrap();
        assert!(tree.find_leaf(&1).is_none());
        assert!(tree.leaf_for(&1).is_none());
        assert_eq!(tree.get(&1), None);
        assert_eq!(tree.first_key_value(), None);
    }

    #[test]
    fn test_find_leaf_records_path() {
        // Root [10, 20] over leaves [5,6,7] [10,12,17] [20,30].
        let tree = tree_with(4, &[10, 20, 5, 6, 12, 30, 7, 17]);
        let root = tree.root.unwrap();

        let (leaf, path) = tree.find_leaf(&12).unwrap();
        assert_eq!(
            path,
            vec![PathEntry {
                node: root,
                child_index: 1
            }]
        );
        assert_eq!(tree.arena.leaf(leaf).keys(), &[10, 12, 17]);

        // A key equal to a separator routes to the right subtree.
        let (leaf, path) = tree.find_leaf(&20).unwrap();
        assert_eq!(path[0].child_index, 2);
        assert_eq!(tree.arena.leaf(leaf).keys(), &[20, 30]);

        assert_eq!(tree.leaf_for(&4), Some(tree.leftmost_leaf(root)));
        assert_eq!(tree.leaf_for(&99), Some(tree.rightmost_leaf(root)));
    }

    #[test]
    fn test_get_hits_and_misses() {
        let tree = tree_with(4, &[10, 20, 5, 6, 12, 30, 7, 17]);
        for k in [5, 6, 7, 10, 12, 17, 20, 30] {
            assert_eq!(tree.get(&k), Some(k as u64 * 100));
            assert!(tree.contains_key(&k));
        }
        for k in [0, 8, 11, 18, 25, 31] {
            assert_eq!(tree.get(&k), None);
        }
        // contains_key goes through get, so every hit counts twice.
        assert_eq!(tree.stats().snapshot().lookups, 22);
    }

    #[test]
    fn test_first_and_last() {
        let tree = tree_with(3, &[40, 10, 30, 20, 50]);
        assert_eq!(tree.first_key_value(), Some((10, 1000)));
        assert_eq!(tree.last_key_value(), Some((50, 5000)));
    }
}
