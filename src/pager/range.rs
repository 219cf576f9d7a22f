//! Visible result range ("X - Y of Z").

use crate::model::{PageNumber, SearchResponse};
use std::fmt;

/// The human-readable window of results currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayRange {
    /// 1-based number of the first result shown, or 0 when nothing is shown.
    pub lower: usize,
    /// 1-based number of the last result shown, clamped to `total`.
    pub upper: usize,
    /// Total matching results.
    pub total: usize,
}

impl fmt::Display for DisplayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} of {}", self.lower, self.upper, self.total)
    }
}

/// Derive the display range from the selected page and the latest response.
///
/// Only the numeric fields of the response are read; the entity count may be
/// shorter than the page size on the last page.
///
/// The lower bound follows the page the user selected rather than the
/// response's `start_offset`, so it stays aligned with the page control while
/// a newer response is in flight. An absent response yields `0 - 0 of 0`.
pub fn derive_range(page: PageNumber, response: &SearchResponse) -> DisplayRange {
    let (page_start, page_size, total_count) = match response.as_page() {
        Some(p) => (p.start_offset, p.page_size, p.total_count),
        None => (0, 0, 0),
    };

    let upper = page_start.saturating_add(page_size).min(total_count);
    let lower = if upper > 0 {
        page.start_offset(page_size).saturating_add(1)
    } else {
        0
    };

    DisplayRange {
        lower,
        upper,
        total: total_count,
    }
}
