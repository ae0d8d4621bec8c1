//! Page number carried inside record pointers.

use std::fmt;

/// Number of the heap page that holds a record.
///
/// Pages belong to whatever storage engine sits next to the index. The tree
/// only copies `PageId`s around as part of a
/// [`RecordPointer`](crate::RecordPointer) and never dereferences them.
///
/// # Example
/// ```
/// use interchange_bptree::PageId;
///
/// assert!(PageId::new(3).is_valid());
/// assert!(!PageId::INVALID.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub u32);

impl PageId {
    /// Reserved value meaning "no page".
    pub const INVALID: PageId = PageId(u32::MAX);

    #[inline]
    pub fn new(page: u32) -> Self {
        PageId(page)
    }

    /// `false` only for [`PageId::INVALID`].
    #[inline]
    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::INVALID => write!(f, "Page(INVALID)"),
            PageId(page) => write!(f, "Page({})", page),
        }
    }
}
