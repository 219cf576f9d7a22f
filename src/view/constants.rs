//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Width of the filter panel in columns (border included).
pub const FILTER_PANEL_WIDTH: u16 = 30;

/// Height of the range header ("X - Y of Z") above the result list.
pub const RANGE_HEADER_HEIGHT: u16 = 1;

/// Height of the page control footer.
pub const PAGE_CONTROL_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
///
/// Single line for key hints, loading marker, or the last error.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Maximum number of page slots (numbers and ellipses) in the page control.
pub const MAX_PAGE_SLOTS: usize = 7;
