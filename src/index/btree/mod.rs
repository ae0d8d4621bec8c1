//! B+Tree index implementation.
//!
//! # Components
//! - [`BPlusTree`] - The tree handle and its public operations
//! - [`Node`] / [`LeafNode`] / [`InternalNode`] - Node representation
//! - [`Range`] - Lazy ordered scan over the leaf chain
//! - [`TreeStats`] - Structural and operation counters
//! - [`TreeShape`] - Result of a successful invariant check
//! - [`SharedBPlusTree`] - `RwLock`-guarded handle for multi-threaded use
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]; see
//! `arena.rs` for the slot layout.
//!
//! [`NodeId`]: crate::NodeId

mod arena;
mod delete;
mod insert;
mod node;
mod scan;
mod search;
mod shared;
mod stats;
mod tree;
mod validate;

pub use node::{InternalNode, LeafNode, Node};
pub use scan::Range;
pub use shared::SharedBPlusTree;
pub use stats::{StatsSnapshot, TreeStats};
pub use tree::BPlusTree;
pub use validate::TreeShape;
