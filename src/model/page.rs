//! Page numbering.

use std::fmt;
use std::num::NonZeroUsize;
use thiserror::Error;

/// A 1-based page number.
///
/// Smart constructor rejects zero, so `(page - 1)` arithmetic never underflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(NonZeroUsize);

/// Error returned when constructing a page number from zero.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Page numbers start at 1")]
pub struct InvalidPageNumber;

impl PageNumber {
    /// The first page.
    pub const FIRST: PageNumber = PageNumber(NonZeroUsize::MIN);

    /// Smart constructor: returns `Err` for zero.
    pub fn new(page: usize) -> Result<Self, InvalidPageNumber> {
        NonZeroUsize::new(page).map(Self).ok_or(InvalidPageNumber)
    }

    /// The raw 1-based value.
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Zero-based index of the first result on this page.
    pub fn start_offset(self, page_size: usize) -> usize {
        (self.get() - 1).saturating_mul(page_size)
    }

    /// The page after this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The page before this one, or `None` on the first page.
    pub fn prev(self) -> Option<Self> {
        NonZeroUsize::new(self.get() - 1).map(Self)
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for PageNumber {
    type Error = InvalidPageNumber;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Number of pages needed to show `total_count` results at `page_size` per page.
///
/// Returns 0 when there is nothing to show or the page size is zero.
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}
