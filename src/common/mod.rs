//! Common types and utilities shared across the index.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration (fanout and the occupancy bounds derived from it)
//! - Error types
//! - Identifiers (NodeId, PageId) and the RecordPointer payload

pub mod config;
pub mod error;
mod node_id;
mod page_id;
mod record_pointer;

pub use config::IndexConfig;
pub use error::{Error, Result};
pub use node_id::NodeId;
pub use page_id::PageId;
pub use record_pointer::RecordPointer;
