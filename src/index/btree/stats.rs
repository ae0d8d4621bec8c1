//! Tree statistics tracking.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Structural and operation counters for one tree.
///
/// All fields are atomic so that read-only operations (`get`, scans) can
/// count through `&self`.
///
/// # Memory Ordering
/// We use `Ordering::Relaxed` for all operations because:
/// - We only need atomicity (no partial updates)
/// - We don't need synchronization between different counters
/// - Statistics are "eventually consistent" - exact ordering doesn't matter
///
/// # Example
/// ```
/// use interchange_bptree::TreeStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = TreeStats::new();
/// stats.leaf_splits.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.snapshot().leaf_splits, 1);
/// ```
#[derive(Debug)]
pub struct TreeStats {
    /// Point lookups performed.
    pub lookups: AtomicU64,

    /// Successful insertions.
    pub inserts: AtomicU64,

    /// Successful removals.
    pub removes: AtomicU64,

    /// Range scans started.
    pub range_scans: AtomicU64,

    /// Leaves split on overflow.
    pub leaf_splits: AtomicU64,

    /// Internal nodes split on overflow.
    pub internal_splits: AtomicU64,

    /// Entries or children moved between siblings to fix an underflow.
    pub redistributions: AtomicU64,

    /// Leaves merged into a sibling.
    pub leaf_merges: AtomicU64,

    /// Internal nodes merged into a sibling.
    pub internal_merges: AtomicU64,

    /// Times a new root was created (height grew).
    pub root_splits: AtomicU64,

    /// Times the root was replaced by its only child (height shrank).
    pub root_collapses: AtomicU64,
}

impl TreeStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            lookups: AtomicU64::new(0),
            inserts: AtomicU64::new(0),
            removes: AtomicU64::new(0),
            range_scans: AtomicU64::new(0),
            leaf_splits: AtomicU64::new(0),
            internal_splits: AtomicU64::new(0),
            redistributions: AtomicU64::new(0),
            leaf_merges: AtomicU64::new(0),
            internal_merges: AtomicU64::new(0),
            root_splits: AtomicU64::new(0),
            root_collapses: AtomicU64::new(0),
        }
    }

    #[inline]
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current statistics.
    ///
    /// This returns a non-atomic copy for display/logging.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            lookups: self.lookups.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            removes: self.removes.load(Ordering::Relaxed),
            range_scans: self.range_scans.load(Ordering::Relaxed),
            leaf_splits: self.leaf_splits.load(Ordering::Relaxed),
            internal_splits: self.internal_splits.load(Ordering::Relaxed),
            redistributions: self.redistributions.load(Ordering::Relaxed),
            leaf_merges: self.leaf_merges.load(Ordering::Relaxed),
            internal_merges: self.internal_merges.load(Ordering::Relaxed),
            root_splits: self.root_splits.load(Ordering::Relaxed),
            root_collapses: self.root_collapses.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        for counter in [
            &self.lookups,
            &self.inserts,
            &self.removes,
            &self.range_scans,
            &self.leaf_splits,
            &self.internal_splits,
            &self.redistributions,
            &self.leaf_merges,
            &self.internal_merges,
            &self.root_splits,
            &self.root_collapses,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }

    /// Emit the current counters as a single `info` event.
    pub fn emit_tracing(&self) {
        let s = self.snapshot();
        tracing::info!(
            target: "interchange_bptree::stats",
            lookups = s.lookups,
            inserts = s.inserts,
            removes = s.removes,
            range_scans = s.range_scans,
            leaf_splits = s.leaf_splits,
            internal_splits = s.internal_splits,
            redistributions = s.redistributions,
            leaf_merges = s.leaf_merges,
            internal_merges = s.internal_merges,
            root_splits = s.root_splits,
            root_collapses = s.root_collapses,
            "bplus tree stats snapshot"
        );
    }
}

impl Default for TreeStats {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TreeStats {
    fn clone(&self) -> Self {
        let s = self.snapshot();
        Self {
            lookups: AtomicU64::new(s.lookups),
            inserts: AtomicU64::new(s.inserts),
            removes: AtomicU64::new(s.removes),
            range_scans: AtomicU64::new(s.range_scans),
            leaf_splits: AtomicU64::new(s.leaf_splits),
            internal_splits: AtomicU64::new(s.internal_splits),
            redistributions: AtomicU64::new(s.redistributions),
            leaf_merges: AtomicU64::new(s.leaf_merges),
            internal_merges: AtomicU64::new(s.internal_merges),
            root_splits: AtomicU64::new(s.root_splits),
            root_collapses: AtomicU64::new(s.root_collapses),
        }
    }
}

/// A point-in-time snapshot of tree statistics.
///
/// Unlike `TreeStats`, this is not atomic and can be safely
/// printed, compared, etc.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub lookups: u64,
    pub inserts: u64,
    pub removes: u64,
    pub range_scans: u64,
    pub leaf_splits: u64,
    pub internal_splits: u64,
    pub redistributions: u64,
    pub leaf_merges: u64,
    pub internal_merges: u64,
    pub root_splits: u64,
    pub root_collapses: u64,
}

impl StatsSnapshot {
    /// Total node splits of either kind.
    pub fn splits(&self) -> u64 {
        self.leaf_splits + self.internal_splits
    }

    /// Total node merges of either kind.
    pub fn merges(&self) -> u64 {
        self.leaf_merges + self.internal_merges
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ inserts: {}, removes: {}, lookups: {}, splits: {}, merges: {}, redistributions: {}, height changes: +{}/-{} }}",
            self.inserts,
            self.removes,
            self.lookups,
            self.splits(),
            self.merges(),
            self.redistributions,
            self.root_splits,
            self.root_collapses
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = TreeStats::new();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_stats_bump_and_snapshot() {
        let stats = TreeStats::new();
        TreeStats::bump(&stats.leaf_splits);
        TreeStats::bump(&stats.leaf_splits);
        TreeStats::bump(&stats.internal_splits);
        TreeStats::bump(&stats.leaf_merges);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.leaf_splits, 2);
        assert_eq!(snapshot.splits(), 3);
        assert_eq!(snapshot.merges(), 1);
    }

    #[test]
    fn test_stats_reset() {
        let stats = TreeStats::new();
        stats.inserts.fetch_add(100, Ordering::Relaxed);
        stats.root_collapses.fetch_add(2, Ordering::Relaxed);

        stats.reset();

        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_stats_clone_is_independent() {
        let stats = TreeStats::new();
        stats.inserts.fetch_add(3, Ordering::Relaxed);

        let cloned = stats.clone();
        stats.inserts.fetch_add(1, Ordering::Relaxed);

        assert_eq!(cloned.snapshot().inserts, 3);
        assert_eq!(stats.snapshot().inserts, 4);
    }

    #[test]
    fn test_emit_tracing_leaves_counters_alone() {
        let stats = TreeStats::new();
        TreeStats::bump(&stats.lookups);
        TreeStats::bump(&stats.root_splits);
        let before = stats.snapshot();

        stats.emit_tracing();
        stats.emit_tracing();

        assert_eq!(stats.snapshot(), before);
    }

    #[test]
    fn test_stats_display() {
        let stats = TreeStats::new();
        stats.inserts.fetch_add(80, Ordering::Relaxed);
        stats.leaf_splits.fetch_add(5, Ordering::Relaxed);
        stats.root_splits.fetch_add(1, Ordering::Relaxed);

        let display = format!("{}", stats.snapshot());

        assert!(display.contains("inserts: 80"));
        assert!(display.contains("splits: 5"));
        assert!(display.contains("+1/-0"));
    }
}
