//! interchange-bptree - an in-memory B+Tree index over unique keys.
//!
//! Maps each key to a fixed-size record locator and supports point lookup,
//! ordered range scans, insertion and deletion in `O(log_F n)` node visits.
//! It is the index building block a storage engine puts on top of its
//! buffer pool and page layer; neither of those lives here.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       interchange-bptree                        │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │            SharedBPlusTree (index/btree/shared)          │   │
//! │  │          Arc<RwLock<BPlusTree>> for many threads         │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                BPlusTree (index/btree/)                  │   │
//! │  │   search → insert (split) → delete (borrow / merge)      │   │
//! │  │          range scan over the leaf sibling chain          │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │          NodeArena: Vec<Option<Node>> + free list        │   │
//! │  │      Node = Leaf { keys, records, prev, next }           │   │
//! │  │           | Internal { keys, children }                  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Error, IndexConfig, NodeId, PageId, RecordPointer)
//! - [`index`] - The B+Tree itself
//!
//! # Quick Start
//! ```
//! use interchange_bptree::{BPlusTree, PageId, RecordPointer};
//!
//! let mut tree: BPlusTree = BPlusTree::new(4).unwrap();
//! for (slot, key) in [10, 20, 5, 6, 12, 30, 7, 17].into_iter().enumerate() {
//!     tree.insert(key, RecordPointer::new(PageId::new(1), slot as u32));
//! }
//!
//! let slots: Vec<u32> = tree.range_scan(&6, &17).iter().map(|rp| rp.slot_num).collect();
//! assert_eq!(slots, vec![3, 6, 0, 4]); // keys 6, 7, 10, 12
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_MAX_FANOUT, MIN_FANOUT};
pub use common::{Error, IndexConfig, NodeId, PageId, RecordPointer, Result};

pub use index::btree::{
    BPlusTree, InternalNode, LeafNode, Node, Range, SharedBPlusTree, StatsSnapshot, TreeShape,
    TreeStats,
};
