//! Node arena - slot storage for tree nodes.
//!
//! Every node lives in a slot of a single `Vec`, addressed by [`NodeId`].
//! Freed slots go on a free list and are handed out again by the next
//! allocation (LIFO).
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                      NodeArena                       │
//! │  slots:     [Some(Leaf)] [None] [Some(Internal)] ... │
//! │                             ▲                        │
//! │  free_list: Vec<NodeId> ────┘                        │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Looking up a freed slot, or asking for a leaf and finding an internal
//! node, means the tree's structure is corrupt. Those accessors panic.

use crate::common::NodeId;

use super::node::{InternalNode, LeafNode, Node};

#[derive(Debug, Clone)]
pub(crate) struct NodeArena<K, V> {
    /// Node storage. `None` marks a free slot.
    slots: Vec<Option<Node<K, V>>>,

    /// Stack of free slot ids.
    free_list: Vec<NodeId>,
}

impl<K: Ord + Copy, V: Copy> NodeArena<K, V> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Store `node`, reusing a free slot when one exists.
    pub fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        match self.free_list.pop() {
            Some(id) => {
                debug_assert!(self.slots[id.0].is_none(), "{} on free list is live", id);
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId::new(self.slots.len() - 1)
            }
        }
    }

    /// Remove the node at `id` and return it. The slot becomes free.
    pub fn free(&mut self, id: NodeId) -> Node<K, V> {
        match self.slots.get_mut(id.0).and_then(Option::take) {
            Some(node) => {
                self.free_list.push(id);
                node
            }
            None => panic!("double free of {}", id),
        }
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
    }

    /// Number of live nodes.
    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Ids of all live nodes.
    pub fn live_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| NodeId::new(i))
    }

    // ========================================================================
    // Typed access
    // ========================================================================

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node<K, V> {
        match self.slots.get(id.0) {
            Some(Some(node)) => node,
            _ => panic!("{} is not a live node", id),
        }
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        match self.slots.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => panic!("{} is not a live node", id),
        }
    }

    #[inline]
    pub fn leaf(&self, id: NodeId) -> &LeafNode<K, V> {
        match self.node(id) {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => panic!("{} is not a leaf", id),
        }
    }

    #[inline]
    pub fn leaf_mut(&mut self, id: NodeId) -> &mut LeafNode<K, V> {
        match self.node_mut(id) {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => panic!("{} is not a leaf", id),
        }
    }

    #[inline]
    pub fn internal(&self, id: NodeId) -> &InternalNode<K> {
        match self.node(id) {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => panic!("{} is not an internal node", id),
        }
    }

    #[inline]
    pub fn internal_mut(&mut self, id: NodeId) -> &mut InternalNode<K> {
        match self.node_mut(id) {
            Node::Internal(internal) => internal,
            Node::Leaf(_) => panic!("{} is not an internal node", id),
        }
    }

    /// Mutable access to two distinct nodes at once.
    pub fn pair_mut(&mut self, a: NodeId, b: NodeId) -> (&mut Node<K, V>, &mut Node<K, V>) {
        assert_ne!(a, b, "pair_mut on the same node");
        let (lo, hi, swapped) = if a.0 < b.0 {
            (a, b, false)
        } else {
            (b, a, true)
        };
        let (head, tail) = self.slots.split_at_mut(hi.0);
        let lo_node = match head[lo.0].as_mut() {
            Some(node) => node,
            None => panic!("{} is not a live node", lo),
        };
        let hi_node = match tail[0].as_mut() {
            Some(node) => node,
            None => panic!("{} is not a live node", hi),
        };
        if swapped {
            (hi_node, lo_node)
        } else {
            (lo_node, hi_node)
        }
    }
}

impl<K: Ord + Copy, V: Copy> Default for NodeArena<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_with(key: i64) -> Node<i64, u32> {
        let mut leaf = LeafNode::with_capacity(4);
        leaf.insert_at(0, key, key as u32);
        Node::Leaf(leaf)
    }

    #[test]
    fn test_alloc_and_access() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(leaf_with(1));
        let b = arena.alloc(leaf_with(2));

        assert_eq!(a, NodeId(0));
        assert_eq!(b, NodeId(1));
        assert_eq!(arena.live_count(), 2);
        assert_eq!(arena.leaf(b).keys(), &[2]);
    }

    #[test]
    fn test_free_slot_is_reused() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(leaf_with(1));
        let _b = arena.alloc(leaf_with(2));

        let freed = arena.free(a);
        assert_eq!(freed.keys(), &[1]);
        assert_eq!(arena.live_count(), 1);

        let c = arena.alloc(leaf_with(3));
        assert_eq!(c, a);
        assert_eq!(arena.leaf(c).keys(), &[3]);
        assert_eq!(arena.live_ids().collect::<Vec<_>>(), vec![NodeId(0), NodeId(1)]);
    }

    #[test]
    #[should_panic(expected = "double free")]
    fn test_double_free_panics() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(leaf_with(1));
        arena.free(a);
        arena.free(a);
    }

    #[test]
    #[should_panic(expected = "is not an internal node")]
    fn test_wrong_variant_panics() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(leaf_with(1));
        arena.internal(a);
    }

    #[test]
    fn test_pair_mut_preserves_argument_order() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(leaf_with(1));
        let b = arena.alloc(leaf_with(2));

        let (x, y) = arena.pair_mut(b, a);
        assert_eq!(x.keys(), &[2]);
        assert_eq!(y.keys(), &[1]);

        if let (Node::Leaf(x), Node::Leaf(y)) = arena.pair_mut(a, b) {
            x.insert_at(1, 5, 5);
            assert_eq!(y.keys(), &[2]);
        }
        assert_eq!(arena.leaf(a).keys(), &[1, 5]);
    }

    #[test]
    #[should_panic(expected = "pair_mut on the same node")]
    fn test_pair_mut_same_node_panics() {
        let mut arena = NodeArena::new();
        let a = arena.alloc(leaf_with(1));
        arena.pair_mut(a, a);
    }
}
