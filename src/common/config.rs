//! Configuration for the B+Tree index.
//!
//! The fanout is fixed for the lifetime of a tree. Every occupancy bound
//! used by the split and merge code is derived from it here, so the rest of
//! the crate never repeats the ceiling arithmetic.

use crate::common::{Error, Result};

/// Smallest usable fanout.
///
/// With a fanout of 2 a split would leave one side with zero keys, so the
/// minimum-occupancy invariant could never be satisfied.
pub const MIN_FANOUT: usize = 3;

/// Fanout used by [`IndexConfig::default`].
///
/// 128 children keeps an `i64`-keyed internal node around one 4KB page,
/// matching the page size of the surrounding storage engine.
pub const DEFAULT_MAX_FANOUT: usize = 128;

/// Construction-time parameters of a tree.
///
/// # Example
/// ```
/// use interchange_bptree::IndexConfig;
///
/// let config = IndexConfig::new(4);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_keys(), 3);
/// assert_eq!(config.min_keys(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    /// Maximum number of children of an internal node.
    pub max_fanout: usize,
}

impl IndexConfig {
    /// Create a config with the given fanout. Call [`validate`](Self::validate)
    /// before use; the tree constructors do this for you.
    pub fn new(max_fanout: usize) -> Self {
        Self { max_fanout }
    }

    /// Reject fanouts below [`MIN_FANOUT`].
    pub fn validate(&self) -> Result<()> {
        if self.max_fanout < MIN_FANOUT {
            return Err(Error::InvalidConfiguration {
                max_fanout: self.max_fanout,
                min: MIN_FANOUT,
            });
        }
        Ok(())
    }

    /// Maximum keys in any node (`F - 1`).
    #[inline]
    pub fn max_keys(&self) -> usize {
        self.max_fanout - 1
    }

    /// Minimum keys in any non-root node (`ceil(F/2) - 1`).
    ///
    /// Leaves and internal nodes share this bound: an internal node with
    /// `ceil(F/2)` children carries exactly this many separators.
    #[inline]
    pub fn min_keys(&self) -> usize {
        self.max_fanout.div_ceil(2) - 1
    }

    /// Number of entries the left leaf keeps after an overflow split.
    ///
    /// The overflowing sequence has `F` entries; the left half keeps the
    /// ceiling share and the right half the remainder.
    #[inline]
    pub fn leaf_split_point(&self) -> usize {
        self.max_fanout.div_ceil(2)
    }

    /// Index of the separator promoted out of an overflowing internal node.
    ///
    /// The overflowing node holds `F` keys and `F + 1` children. Keys below
    /// this index stay left, the key at it moves up, the rest go right. Both
    /// halves end up with at least `ceil(F/2)` children.
    #[inline]
    pub fn internal_split_point(&self) -> usize {
        self.max_fanout / 2
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FANOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = IndexConfig::default();
        assert_eq!(config.max_fanout, DEFAULT_MAX_FANOUT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_small_fanout() {
        for fanout in 0..MIN_FANOUT {
            assert_eq!(
                IndexConfig::new(fanout).validate(),
                Err(Error::InvalidConfiguration {
                    max_fanout: fanout,
                    min: MIN_FANOUT
                })
            );
        }
        assert!(IndexConfig::new(MIN_FANOUT).validate().is_ok());
    }

    #[test]
    fn test_bounds_fanout_3() {
        let config = IndexConfig::new(3);
        assert_eq!(config.max_keys(), 2);
        assert_eq!(config.min_keys(), 1);
        assert_eq!(config.leaf_split_point(), 2);
        assert_eq!(config.internal_split_point(), 1);
    }

    #[test]
    fn test_bounds_fanout_4() {
        let config = IndexConfig::new(4);
        assert_eq!(config.max_keys(), 3);
        assert_eq!(config.min_keys(), 1);
        assert_eq!(config.leaf_split_point(), 2);
        assert_eq!(config.internal_split_point(), 2);
    }

    #[test]
    fn test_split_halves_respect_occupancy() {
        for fanout in MIN_FANOUT..64 {
            let config = IndexConfig::new(fanout);

            // Leaf: F entries split into left/right.
            let left = config.leaf_split_point();
            let right = fanout - left;
            assert!(left <= config.max_keys(), "fanout {}", fanout);
            assert!(right >= config.min_keys(), "fanout {}", fanout);

            // Internal: F keys, one promoted.
            let left_keys = config.internal_split_point();
            let right_keys = fanout - left_keys - 1;
            assert!(left_keys >= config.min_keys(), "fanout {}", fanout);
            assert!(right_keys >= config.min_keys(), "fanout {}", fanout);
            assert!(left_keys <= config.max_keys(), "fanout {}", fanout);
        }
    }
}
