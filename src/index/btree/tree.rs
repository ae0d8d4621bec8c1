//! The [`BPlusTree`] handle: root, node arena, configuration and counters.
//!
//! Operations are spread over sibling modules by concern:
//! - [`search`](super::search) - traversal and point lookup
//! - [`insert`](super::insert) - insertion and splits
//! - [`delete`](super::delete) - removal, redistribution and merges
//! - [`scan`](super::scan) - ordered iteration over the leaf chain
//! - [`validate`](super::validate) - structural audit

use crate::common::{IndexConfig, NodeId, RecordPointer, Result};

use super::arena::NodeArena;
use super::node::Node;
use super::stats::TreeStats;

/// An in-memory B+Tree mapping unique keys to fixed-size records.
///
/// # Structure
/// ```text
///                     ┌────────────┐
///                     │  [10 | 20] │            internal (root)
///                     └─┬────┬───┬─┘
///            ┌──────────┘    │   └──────────┐
///      ┌─────▼─────┐  ┌──────▼─────┐  ┌─────▼─────┐
///      │ [5 | 6 |7]│◀▶│[10 | 12|17]│◀▶│ [20 | 30] │  leaves + sibling chain
///      └───────────┘  └────────────┘  └───────────┘
/// ```
///
/// # Thread Safety
/// The tree has no internal locking. Mutation takes `&mut self` and reads
/// take `&self`, so Rust's borrow rules already give "one writer or many
/// readers". To share a tree across threads use
/// [`SharedBPlusTree`](crate::SharedBPlusTree).
///
/// # Example
/// ```
/// use interchange_bptree::{BPlusTree, PageId, RecordPointer};
///
/// let mut tree: BPlusTree = BPlusTree::new(4).unwrap();
/// assert!(tree.insert(10, RecordPointer::new(PageId::new(1), 0)));
/// assert!(!tree.insert(10, RecordPointer::new(PageId::new(1), 1)));
///
/// assert_eq!(tree.get(&10), Some(RecordPointer::new(PageId::new(1), 0)));
/// assert!(tree.remove(&10));
/// assert!(tree.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BPlusTree<K = i64, V = RecordPointer> {
    /// Storage for every node of the tree.
    pub(crate) arena: NodeArena<K, V>,

    /// Root node, or `None` when the tree is empty.
    pub(crate) root: Option<NodeId>,

    /// Fanout and the occupancy bounds derived from it.
    pub(crate) config: IndexConfig,

    /// Number of live entries.
    pub(crate) len: usize,

    /// Operation and structural counters.
    pub(crate) stats: TreeStats,
}

impl<K: Ord + Copy, V: Copy> BPlusTree<K, V> {
    /// Create an empty tree whose internal nodes hold at most `max_fanout`
    /// children.
    ///
    /// # Errors
    /// - `Error::InvalidConfiguration` if `max_fanout < 3`
    pub fn new(max_fanout: usize) -> Result<Self> {
        Self::with_config(IndexConfig::new(max_fanout))
    }

    /// Create an empty tree from a full configuration.
    ///
    /// # Errors
    /// - `Error::InvalidConfiguration` if the config does not validate
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        tracing::debug!(
            max_fanout = config.max_fanout,
            min_keys = config.min_keys(),
            max_keys = config.max_keys(),
            "created bplus tree"
        );
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: IndexConfig) -> Self {
        Self {
            arena: NodeArena::new(),
            root: None,
            config,
            len: 0,
            stats: TreeStats::new(),
        }
    }

    // ========================================================================
    // Public API: Shape and info
    // ========================================================================

    /// Whether the tree holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of levels: 0 when empty, 1 when the root is a leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(id) = current {
            height += 1;
            current = match self.arena.node(id) {
                Node::Leaf(_) => None,
                Node::Internal(internal) => Some(internal.children[0]),
            };
        }
        height
    }

    /// Whether the root is an internal node.
    pub fn root_is_internal(&self) -> bool {
        self.root
            .map(|id| !self.arena.node(id).is_leaf())
            .unwrap_or(false)
    }

    /// Number of nodes currently allocated.
    pub fn node_count(&self) -> usize {
        self.arena.live_count()
    }

    /// Maximum children of an internal node.
    #[inline]
    pub fn max_fanout(&self) -> usize {
        self.config.max_fanout
    }

    /// The tree's configuration.
    #[inline]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Operation and structural counters.
    #[inline]
    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    /// Remove every entry. The configuration and counters are kept.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }
}

impl<K: Ord + Copy, V: Copy> Default for BPlusTree<K, V> {
    fn default() -> Self {
        Self::from_valid_config(IndexConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::DEFAULT_MAX_FANOUT;
    use crate::common::{Error, PageId};

    fn rp(n: i64) -> RecordPointer {
        RecordPointer::new(PageId::new(n as u32), n as u32)
    }

    #[test]
    fn test_new_rejects_small_fanout() {
        for fanout in 0..3 {
            let err = BPlusTree::<i64, RecordPointer>::new(fanout).unwrap_err();
            assert!(matches!(err, Error::InvalidConfiguration { .. }));
        }
        assert!(BPlusTree::<i64, RecordPointer>::new(3).is_ok());
    }

    #[test]
    fn test_new_tree_is_empty() {
        let tree: BPlusTree = BPlusTree::new(4).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.node_count(), 0);
        assert!(!tree.root_is_internal());
        assert_eq!(tree.max_fanout(), 4);
    }

    #[test]
    fn test_default_uses_default_fanout() {
        let tree: BPlusTree = BPlusTree::default();
        assert_eq!(tree.max_fanout(), DEFAULT_MAX_FANOUT);
    }

    #[test]
    fn test_height_grows_with_splits() {
        let mut tree: BPlusTree = BPlusTree::new(3).unwrap();
        tree.insert(1, rp(1));
        assert_eq!(tree.height(), 1);
        tree.insert(2, rp(2));
        tree.insert(3, rp(3));
        assert_eq!(tree.height(), 2);
        assert!(tree.root_is_internal());
    }

    #[test]
    fn test_clear_keeps_config() {
        let mut tree: BPlusTree = BPlusTree::new(4).unwrap();
        for k in 0..50 {
            tree.insert(k, rp(k));
        }
        tree.clear();

        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 0);
        assert_eq!(tree.max_fanout(), 4);
        assert!(tree.insert(7, rp(7)));
        assert_eq!(tree.get(&7), Some(rp(7)));
    }
}
