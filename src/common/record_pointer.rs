//! Record locator stored in leaf entries.

use std::fmt;

use crate::common::PageId;

/// Address of a tuple: the page holding it plus its slot within that page.
///
/// This is the default payload of [`BPlusTree`](crate::BPlusTree). The
/// record itself is owned by the storage engine; the index only stores
/// where to find it.
///
/// # Example
/// ```
/// use interchange_bptree::{PageId, RecordPointer};
///
/// let rp = RecordPointer::new(PageId::new(7), 3);
/// assert_eq!(rp.page_id, PageId::new(7));
/// assert_eq!(rp.slot_num, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordPointer {
    /// Page holding the tuple.
    pub page_id: PageId,
    /// Slot index of the tuple within the page.
    pub slot_num: u32,
}

impl RecordPointer {
    /// A locator that points nowhere.
    pub const INVALID: RecordPointer = RecordPointer {
        page_id: PageId::INVALID,
        slot_num: 0,
    };

    /// Create a new RecordPointer.
    #[inline]
    pub fn new(page_id: PageId, slot_num: u32) -> Self {
        Self { page_id, slot_num }
    }

    /// Check if the locator references a real page.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.page_id.is_valid()
    }
}

impl Default for RecordPointer {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for RecordPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.page_id, self.slot_num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_pointer_new() {
        let rp = RecordPointer::new(PageId::new(1), 9);
        assert!(rp.is_valid());
        assert_eq!(rp.slot_num, 9);
    }

    #[test]
    fn test_record_pointer_default_is_invalid() {
        assert!(!RecordPointer::default().is_valid());
    }

    #[test]
    fn test_record_pointer_ordering() {
        let a = RecordPointer::new(PageId::new(1), 5);
        let b = RecordPointer::new(PageId::new(1), 6);
        let c = RecordPointer::new(PageId::new(2), 0);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_record_pointer_display() {
        let rp = RecordPointer::new(PageId::new(4), 2);
        assert_eq!(format!("{}", rp), "Page(4):2");
    }
}
