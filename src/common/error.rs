//! Error types for the B+Tree index.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors reported by the index.
///
/// The taxonomy is deliberately narrow: every failure is local to a single
/// call and none of them leaves the tree partially modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// `max_fanout` is too small for the occupancy invariant to hold.
    ///
    /// This is the only error raised at construction time.
    #[error("invalid configuration: max_fanout must be at least {min}, got {max_fanout}")]
    InvalidConfiguration { max_fanout: usize, min: usize },

    /// Insertion of a key that is already present.
    ///
    /// Existing entries are never overwritten.
    #[error("duplicate key")]
    DuplicateKey,

    /// Removal or lookup of a key that is not present.
    #[error("key not found")]
    KeyNotFound,

    /// A structural invariant does not hold.
    ///
    /// Only produced by the invariant checker. Seeing this indicates a bug.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
