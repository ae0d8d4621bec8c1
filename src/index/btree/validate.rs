//! Structural audit of a tree.
//!
//! [`BPlusTree::check_invariants`] walks every node and reports the first
//! broken rule. It is O(n) and meant for tests and debugging, not for hot
//! paths.

use std::collections::HashSet;
use std::fmt::Debug;

use crate::common::{Error, NodeId, Result};

use super::node::Node;
use super::tree::BPlusTree;

/// Shape of a tree that passed [`BPlusTree::check_invariants`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeShape {
    /// Number of levels (0 for an empty tree).
    pub height: usize,
    /// Number of entries.
    pub len: usize,
    /// Number of leaves.
    pub leaf_count: usize,
    /// Number of internal nodes.
    pub internal_count: usize,
}

/// A node waiting to be visited, with the key interval it must respect.
struct Frame<K> {
    id: NodeId,
    depth: usize,
    lower: Option<K>,
    upper: Option<K>,
}

fn violation(msg: String) -> Error {
    Error::InvariantViolation(msg)
}

impl<K: Ord + Copy + Debug, V: Copy> BPlusTree<K, V> {
    /// Verify every structural invariant:
    ///
    /// 1. keys strictly increase within each node;
    /// 2. non-root nodes hold between `min_keys` and `max_keys` keys, and
    ///    internal nodes have one more child than keys;
    /// 3. all leaves are at the same depth;
    /// 4. the leaf chain visits every leaf in key order with consistent
    ///    `prev`/`next` links;
    /// 5. each separator equals the smallest key of the subtree to its right.
    ///
    /// Also checks that every key lies inside the interval its ancestors
    /// route to it, that `len()` matches the leaves, and that every live
    /// arena slot is reachable from the root exactly once.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` describing the first problem found
    pub fn check_invariants(&self) -> Result<TreeShape> {
        let Some(root) = self.root else {
            if self.len != 0 {
                return Err(violation(format!("empty tree reports len {}", self.len)));
            }
            if self.arena.live_count() != 0 {
                return Err(violation(format!(
                    "empty tree holds {} live nodes",
                    self.arena.live_count()
                )));
            }
            return Ok(TreeShape::default());
        };

        let min_keys = self.config.min_keys();
        let max_keys = self.config.max_keys();

        let mut shape = TreeShape::default();
        let mut leaves = Vec::new();
        let mut leaf_depth = None;
        let mut visited = HashSet::new();
        let mut stack = vec![Frame {
            id: root,
            depth: 0,
            lower: None,
            upper: None,
        }];

        while let Some(Frame {
            id,
            depth,
            lower,
            upper,
        }) = stack.pop()
        {
            if !visited.insert(id) {
                return Err(violation(format!("{} is reachable twice", id)));
            }
            let node = self.arena.node(id);
            let keys = node.keys();

            if let Some(pair) = keys.windows(2).find(|w| w[0] >= w[1]) {
                return Err(violation(format!(
                    "{} keys not strictly increasing: {:?} then {:?}",
                    id, pair[0], pair[1]
                )));
            }
            if keys.len() > max_keys {
                return Err(violation(format!(
                    "{} overfull: {} keys, max {}",
                    id,
                    keys.len(),
                    max_keys
                )));
            }
            if id != root && keys.len() < min_keys {
                return Err(violation(format!(
                    "{} underfull: {} keys, min {}",
                    id,
                    keys.len(),
                    min_keys
                )));
            }
            if id == root && keys.is_empty() {
                return Err(violation(format!("root {} has no keys", id)));
            }
            if let (Some(lo), Some(first)) = (lower, keys.first()) {
                if *first < lo {
                    return Err(violation(format!(
                        "{} key {:?} below routing bound {:?}",
                        id, first, lo
                    )));
                }
            }
            if let (Some(hi), Some(last)) = (upper, keys.last()) {
                if *last >= hi {
                    return Err(violation(format!(
                        "{} key {:?} at or above routing bound {:?}",
                        id, last, hi
                    )));
                }
            }

            match node {
                Node::Leaf(leaf) => {
                    match leaf_depth {
                        None => leaf_depth = Some(depth),
                        Some(d) if d != depth => {
                            return Err(violation(format!(
                                "{} at depth {}, other leaves at depth {}",
                                id, depth, d
                            )));
                        }
                        Some(_) => {}
                    }
                    if leaf.records.len() != leaf.keys.len() {
                        return Err(violation(format!(
                            "{} has {} keys but {} records",
                            id,
                            leaf.keys.len(),
                            leaf.records.len()
                        )));
                    }
                    shape.leaf_count += 1;
                    shape.len += leaf.key_count();
                    leaves.push(id);
                }
                Node::Internal(internal) => {
                    if internal.children.len() != internal.keys.len() + 1 {
                        return Err(violation(format!(
                            "{} has {} keys but {} children",
                            id,
                            internal.keys.len(),
                            internal.children.len()
                        )));
                    }
                    for (i, &separator) in internal.keys.iter().enumerate() {
                        let leftmost =
                            self.arena.leaf(self.leftmost_leaf(internal.children[i + 1]));
                        if leftmost.keys.first() != Some(&separator) {
                            return Err(violation(format!(
                                "{} separator {:?} differs from right subtree minimum {:?}",
                                id,
                                separator,
                                leftmost.keys.first()
                            )));
                        }
                    }
                    shape.internal_count += 1;
                    // Reverse push so children pop left to right.
                    for (i, &child) in internal.children.iter().enumerate().rev() {
                        stack.push(Frame {
                            id: child,
                            depth: depth + 1,
                            lower: if i == 0 {
                                lower
                            } else {
                                Some(internal.keys[i - 1])
                            },
                            upper: internal.keys.get(i).copied().or(upper),
                        });
                    }
                }
            }
        }

        self.check_leaf_chain(&leaves)?;

        if shape.len != self.len {
            return Err(violation(format!(
                "leaves hold {} entries but len is {}",
                shape.len, self.len
            )));
        }
        if let Some(orphan) = self.arena.live_ids().find(|id| !visited.contains(id)) {
            return Err(violation(format!(
                "{} is live but unreachable ({} of {} nodes reachable)",
                orphan,
                visited.len(),
                self.arena.live_count()
            )));
        }

        shape.height = leaf_depth.map_or(0, |d| d + 1);
        Ok(shape)
    }

    /// `leaves` is in left-to-right tree order; the chain must match it.
    fn check_leaf_chain(&self, leaves: &[NodeId]) -> Result<()> {
        let mut prev: Option<NodeId> = None;
        let mut last_key: Option<K> = None;
        for (i, &id) in leaves.iter().enumerate() {
            let leaf = self.arena.leaf(id);
            if leaf.prev != prev {
                return Err(violation(format!(
                    "{} prev link {:?}, expected {:?}",
                    id, leaf.prev, prev
                )));
            }
            let expected_next = leaves.get(i + 1).copied();
            if leaf.next != expected_next {
                return Err(violation(format!(
                    "{} next link {:?}, expected {:?}",
                    id, leaf.next, expected_next
                )));
            }
            if let (Some(last), Some(first)) = (last_key, leaf.keys.first()) {
                if *first <= last {
                    return Err(violation(format!(
                        "leaf chain not increasing at {}: {:?} after {:?}",
                        id, first, last
                    )));
                }
            }
            if let Some(&key) = leaf.keys.last() {
                last_key = Some(key);
            }
            prev = Some(id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(fanout: usize, keys: impl IntoIterator<Item = i64>) -> BPlusTree<i64, u32> {
        let mut tree = BPlusTree::new(fanout).unwrap();
        for k in keys {
            tree.insert(k, 0);
        }
        tree
    }

    #[test]
    fn test_empty_tree_shape() {
        let tree = tree_with(4, []);
        assert_eq!(tree.check_invariants(), Ok(TreeShape::default()));
    }

    #[test]
    fn test_valid_tree_shape() {
        let tree = tree_with(4, 1..=10);
        let shape = tree.check_invariants().unwrap();
        assert_eq!(shape.height, 3);
        assert_eq!(shape.len, 10);
        assert_eq!(shape.leaf_count, 5);
        assert_eq!(shape.internal_count, 3);
    }

    #[test]
    fn test_detects_unordered_leaf() {
        let mut tree = tree_with(4, 1..=3);
        let root = tree.root.unwrap();
        tree.arena.leaf_mut(root).keys.swap(0, 2);
        let err = tree.check_invariants().unwrap_err();
        assert!(format!("{}", err).contains("not strictly increasing"));
    }

    #[test]
    fn test_detects_stale_separator() {
        let mut tree = tree_with(4, 1..=4);
        let root = tree.root.unwrap();
        tree.arena.internal_mut(root).keys[0] = 2;
        let err = tree.check_invariants().unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
    }

    #[test]
    fn test_detects_broken_chain() {
        let mut tree = tree_with(4, 1..=6);
        let first = tree.leftmost_leaf(tree.root.unwrap());
        tree.arena.leaf_mut(first).next = None;
        let err = tree.check_invariants().unwrap_err();
        assert!(format!("{}", err).contains("next link"));
    }

    #[test]
    fn test_detects_len_mismatch() {
        let mut tree = tree_with(4, 1..=6);
        tree.len += 1;
        let err = tree.check_invariants().unwrap_err();
        assert!(format!("{}", err).contains("len is 7"));
    }
}
