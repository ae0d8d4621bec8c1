//! Ordered scans over the leaf sibling chain.
//!
//! A scan descends once to the first candidate leaf and then follows
//! `next` links, so the cost is one root-to-leaf traversal plus the number
//! of entries emitted.

use std::iter::FusedIterator;

use crate::common::NodeId;

use super::arena::NodeArena;
use super::stats::TreeStats;
use super::tree::BPlusTree;

/// Lazy iterator over `(key, record)` pairs in increasing key order.
///
/// Produced by [`BPlusTree::range`] and [`BPlusTree::iter`]. It borrows the
/// tree, so the tree cannot change while a scan is in progress; to scan
/// again, call `range` again.
#[derive(Debug, Clone)]
pub struct Range<'a, K, V> {
    arena: &'a NodeArena<K, V>,
    /// Leaf currently being read, `None` once exhausted.
    leaf: Option<NodeId>,
    /// Next entry to read within `leaf`.
    index: usize,
    /// Exclusive upper bound, `None` for unbounded.
    end: Option<K>,
}

impl<'a, K: Ord + Copy, V: Copy> Range<'a, K, V> {
    fn empty(arena: &'a NodeArena<K, V>) -> Self {
        Self {
            arena,
            leaf: None,
            index: 0,
            end: None,
        }
    }
}

impl<K: Ord + Copy, V: Copy> Iterator for Range<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let leaf = self.arena.leaf(self.leaf?);
            if self.index < leaf.key_count() {
                let key = leaf.keys[self.index];
                if matches!(self.end, Some(end) if key >= end) {
                    // Keys only grow from here on.
                    self.leaf = None;
                    return None;
                }
                let record = leaf.records[self.index];
                self.index += 1;
                return Some((key, record));
            }
            self.leaf = leaf.next;
            self.index = 0;
        }
    }
}

impl<K: Ord + Copy, V: Copy> FusedIterator for Range<'_, K, V> {}

impl<K: Ord + Copy, V: Copy> BPlusTree<K, V> {
    /// Lazily yield every entry with `start <= key < end`, in key order.
    ///
    /// An empty tree or an empty interval (`start >= end`) yields nothing.
    pub fn range(&self, start: &K, end: &K) -> Range<'_, K, V> {
        TreeStats::bump(&self.stats.range_scans);
        if start >= end {
            return Range::empty(&self.arena);
        }
        let Some(leaf) = self.leaf_for(start) else {
            return Range::empty(&self.arena);
        };
        let index = self.arena.leaf(leaf).keys.partition_point(|k| k < start);
        Range {
            arena: &self.arena,
            leaf: Some(leaf),
            index,
            end: Some(*end),
        }
    }

    /// Records of every entry with `start <= key < end`, in key order.
    pub fn range_scan(&self, start: &K, end: &K) -> Vec<V> {
        self.range(start, end).map(|(_, record)| record).collect()
    }

    /// Every entry in key order.
    pub fn iter(&self) -> Range<'_, K, V> {
        TreeStats::bump(&self.stats.range_scans);
        Range {
            arena: &self.arena,
            leaf: self.root.map(|root| self.leftmost_leaf(root)),
            index: 0,
            end: None,
        }
    }

    /// Every key in increasing order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.iter().map(|(key, _)| key)
    }
}

impl<'a, K: Ord + Copy, V: Copy> IntoIterator for &'a BPlusTree<K, V> {
    type Item = (K, V);
    type IntoIter = Range<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
