//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Paging
    /// Go to the next page. Default: n/→/Page Down
    NextPage,
    /// Go to the previous page. Default: p/←/Page Up
    PrevPage,
    /// Jump to page 1. Default: g/Home
    FirstPage,
    /// Jump to the last page. Default: G/End
    LastPage,

    // Filters
    /// Move the filter cursor down. Default: j/↓
    FilterCursorDown,
    /// Move the filter cursor up. Default: k/↑
    FilterCursorUp,
    /// Add or remove the filter under the cursor. Default: Space/Enter
    ToggleFilter,
    /// Remove all active filters. Default: c
    ClearFilters,
    /// Show or hide the filter panel. Default: f
    ToggleFilterPanel,

    // Application
    /// Quit the application. Default: q
    Quit,
}

impl KeyAction {
    /// Whether this action targets the filter panel.
    ///
    /// Filter actions are ignored while the panel is hidden.
    pub fn is_filter_action(self) -> bool {
        matches!(
            self,
            KeyAction::FilterCursorDown
                | KeyAction::FilterCursorUp
                | KeyAction::ToggleFilter
                | KeyAction::ClearFilters
        )
    }
}
