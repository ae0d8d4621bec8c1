//! Index structures.
//!
//! - [`btree`] - In-memory B+Tree over unique fixed-size keys

pub mod btree;

pub use btree::{BPlusTree, Range, SharedBPlusTree, StatsSnapshot, TreeShape, TreeStats};
