//! Thread-safe handle around a [`BPlusTree`].
//!
//! The tree has no internal latching. [`SharedBPlusTree`] puts the whole
//! tree behind one `parking_lot::RwLock`: writers are serialized, readers
//! run concurrently with each other and never with a writer.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::common::{IndexConfig, RecordPointer, Result};

use super::tree::BPlusTree;

/// A cloneable, `Send + Sync` handle to a tree shared between threads.
///
/// Cloning the handle is cheap and every clone refers to the same tree.
///
/// # Example
/// ```
/// use interchange_bptree::SharedBPlusTree;
/// use std::thread;
///
/// let tree: SharedBPlusTree<i64, u64> = SharedBPlusTree::new(8).unwrap();
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let tree = tree.clone();
///         thread::spawn(move || {
///             for k in 0..100 {
///                 tree.insert(t * 100 + k, k as u64);
///             }
///         })
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
/// assert_eq!(tree.len(), 400);
/// ```
#[derive(Debug)]
pub struct SharedBPlusTree<K = i64, V = RecordPointer> {
    inner: Arc<RwLock<BPlusTree<K, V>>>,
}

impl<K, V> Clone for SharedBPlusTree<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: Ord + Copy, V: Copy> SharedBPlusTree<K, V> {
    /// Create an empty shared tree.
    ///
    /// # Errors
    /// - `Error::InvalidConfiguration` if `max_fanout < 3`
    pub fn new(max_fanout: usize) -> Result<Self> {
        Ok(Self::from_tree(BPlusTree::new(max_fanout)?))
    }

    /// Create an empty shared tree from a full configuration.
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        Ok(Self::from_tree(BPlusTree::with_config(config)?))
    }

    /// Wrap an existing tree.
    pub fn from_tree(tree: BPlusTree<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    // ========================================================================
    // Single-operation access (lock held for one call)
    // ========================================================================

    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.read().get(key)
    }

    pub fn insert(&self, key: K, record: V) -> bool {
        self.inner.write().insert(key, record)
    }

    pub fn try_insert(&self, key: K, record: V) -> Result<()> {
        self.inner.write().try_insert(key, record)
    }

    pub fn remove(&self, key: &K) -> bool {
        self.inner.write().remove(key)
    }

    pub fn try_remove(&self, key: &K) -> Result<V> {
        self.inner.write().try_remove(key)
    }

    /// Records with `start <= key < end`, collected while the read lock is
    /// held.
    pub fn range_scan(&self, start: &K, end: &K) -> Vec<V> {
        self.inner.read().range_scan(start, end)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    // ========================================================================
    // Guarded access (lock held for the guard's lifetime)
    // ========================================================================

    /// Shared access for several reads against one consistent state.
    pub fn read(&self) -> RwLockReadGuard<'_, BPlusTree<K, V>> {
        self.inner.read()
    }

    /// Exclusive access for several mutations applied as a unit.
    pub fn write(&self) -> RwLockWriteGuard<'_, BPlusTree<K, V>> {
        self.inner.write()
    }
}
