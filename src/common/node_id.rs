//! Arena handle for tree nodes.

use std::fmt;

/// Position of a node in the tree's arena.
///
/// Parents hold the `NodeId`s of their children, and leaves hold the
/// `NodeId`s of their chain neighbours. A handle stays valid until the arena
/// frees its slot; after that the slot may be handed to a new node.
///
/// # Example
/// ```
/// use interchange_bptree::NodeId;
///
/// let root = NodeId::new(0);
/// assert_eq!(root.to_string(), "Node(0)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub fn new(slot: usize) -> Self {
        NodeId(slot)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}
