//! TUI rendering and terminal management (impure shell)

pub mod constants;
pub mod filter_panel;
mod layout;
pub mod page_control;
pub mod result_list;
mod result_pager;

pub use filter_panel::{FilterPanel, FilterPanelState};
pub use layout::{KEY_HINTS, StatusBar, render_layout};
pub use page_control::PageControl;
pub use result_list::ResultList;

use crate::backend::SearchDispatch;
use crate::config::keybindings::KeyBindings;
use crate::model::{AppError, KeyAction};
use crate::pager::PagerEvent;
use crate::state::SearchCoordinator;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use filter_panel::{cleared, filter_rows};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] crate::model::InputError),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend, and over the
/// search dispatch so tests can answer requests synchronously.
pub struct TuiApp<B, D>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    coordinator: SearchCoordinator<D>,
    filter_state: FilterPanelState,
    key_bindings: KeyBindings,
}

impl<D: SearchDispatch> TuiApp<CrosstermBackend<Stdout>, D> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(coordinator: SearchCoordinator<D>) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_terminal(terminal, coordinator))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Between key events the loop
    /// drains finished searches and redraws only when one was applied.
    pub fn run(&mut self) -> Result<(), TuiError> {
        // Short tick so responses from the worker show up promptly
        const TICK: Duration = Duration::from_millis(50);

        self.draw()?;

        loop {
            if event::poll(TICK)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        self.draw()?;
                    }
                    Event::Resize(_, _) => self.draw()?,
                    _ => {}
                }
            }

            if self.poll_search() {
                self.draw()?;
            }
        }
    }
}

impl<B, D> TuiApp<B, D>
where
    B: ratatui::backend::Backend,
    D: SearchDispatch,
{
    /// Wrap an existing terminal.
    pub fn with_terminal(terminal: Terminal<B>, coordinator: SearchCoordinator<D>) -> Self {
        Self {
            terminal,
            coordinator,
            filter_state: FilterPanelState::default(),
            key_bindings: KeyBindings::default(),
        }
    }

    /// Coordinator owning the search state.
    pub fn coordinator(&self) -> &SearchCoordinator<D> {
        &self.coordinator
    }

    /// Underlying terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Filter cursor position.
    pub fn filter_state(&self) -> FilterPanelState {
        self.filter_state
    }

    /// Apply finished searches. Returns whether a redraw is needed.
    pub fn poll_search(&mut self) -> bool {
        self.coordinator.poll()
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Special case: Ctrl+C should always quit, even if not in bindings
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            info!("Ctrl+C received, quitting");
            return true;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        match action {
            KeyAction::Quit => return true,
            KeyAction::ToggleFilterPanel => {
                self.coordinator.toggle_show_filters();
                debug!(visible = self.coordinator.show_filters(), "Filter panel toggled");
                return false;
            }
            _ if action.is_filter_action() && !self.coordinator.show_filters() => {
                debug!(?action, "Filter panel hidden; ignoring key");
                return false;
            }
            _ => {}
        }

        // Children report through the pager into an outbox; the coordinator
        // is borrowed by the pager until the block ends.
        let mut outbox: Vec<PagerEvent> = Vec::new();
        {
            let pager = self.coordinator.pager();
            let control = PageControl::new(pager.page_control_props());
            let facets = pager.facets();
            let selected = pager.props().selected_filters;

            let event = match action {
                KeyAction::NextPage => control.next().map(PagerEvent::PageChanged),
                KeyAction::PrevPage => control.prev().map(PagerEvent::PageChanged),
                KeyAction::FirstPage => control.first().map(PagerEvent::PageChanged),
                KeyAction::LastPage => control.last().map(PagerEvent::PageChanged),
                KeyAction::FilterCursorDown => {
                    self.filter_state.move_down(filter_rows(facets).len());
                    None
                }
                KeyAction::FilterCursorUp => {
                    self.filter_state.move_up();
                    None
                }
                KeyAction::ToggleFilter => self
                    .filter_state
                    .toggle(facets, selected)
                    .map(PagerEvent::FiltersChanged),
                KeyAction::ClearFilters => cleared(selected).map(PagerEvent::FiltersChanged),
                KeyAction::ToggleFilterPanel | KeyAction::Quit => None,
            };

            if let Some(event) = event {
                pager.dispatch(event, &mut outbox);
            }
        }

        for event in outbox {
            event.deliver(&mut self.coordinator);
        }

        false
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let rows = filter_rows(self.coordinator.facets().unwrap_or(&[])).len();
        self.filter_state.clamp(rows);

        let coordinator = &self.coordinator;
        let filter_state = &mut self.filter_state;
        self.terminal.draw(|frame| {
            render_layout(frame, coordinator, filter_state);
        })?;

        Ok(())
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on
/// exit. The coordinator should already have issued its first request.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run<D: SearchDispatch>(coordinator: SearchCoordinator<D>) -> Result<(), TuiError> {
    let mut app = TuiApp::new(coordinator)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
