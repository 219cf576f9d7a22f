//! Acceptance Test Harness for TUI testing
//!
//! Provides a high-level API for acceptance testing user stories by wrapping
//! TuiApp<TestBackend> with convenient methods for simulating user interactions.
//! Searches are answered inline, so every key press is fully applied before
//! the next one.

use crate::backend::{DatasetBackend, InlineDispatch};
use crate::state::{SearchCoordinator, SearchOptions};
use crate::view::{TuiApp, TuiError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

/// Fixture catalog shared by acceptance tests.
pub(crate) const CATALOG_FIXTURE: &str = "tests/fixtures/catalog.json";

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Captures the visual output character by character, preserving layout.
/// Blank lines and trailing spaces are removed to keep snapshots clean.
pub(crate) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

type TestApp = TuiApp<TestBackend, InlineDispatch<DatasetBackend>>;

/// Test harness for acceptance testing
///
/// Wraps TuiApp<TestBackend> to provide a clean API for simulating user
/// interactions in acceptance tests.
pub struct AcceptanceTestHarness {
    app: TestApp,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Load fixture into test app with default terminal size (100x30)
    pub fn from_fixture(path: &str, options: SearchOptions) -> Result<Self, TuiError> {
        Self::from_fixture_with_size(path, options, 100, 30)
    }

    /// Load fixture with custom terminal size
    ///
    /// The initial search is issued and applied before returning.
    pub fn from_fixture_with_size(
        path: &str,
        options: SearchOptions,
        width: u16,
        height: u16,
    ) -> Result<Self, TuiError> {
        let backend = DatasetBackend::from_path(path)?;
        let terminal = Terminal::new(TestBackend::new(width, height))?;

        let mut coordinator = SearchCoordinator::new(InlineDispatch::new(backend), options);
        coordinator.start();

        let mut app = TuiApp::with_terminal(terminal, coordinator);
        app.poll_search();

        Ok(Self { app, running: true })
    }

    /// Send a single key event
    ///
    /// Returns `true` if the app quit as a result of this key.
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true; // Already quit
        }

        let quit = self.app.handle_key(KeyEvent::new(key, mods));
        self.app.poll_search();

        if quit {
            self.running = false;
        }

        quit
    }

    /// Send a sequence of keys
    ///
    /// Continues sending keys until the sequence is exhausted or app quits.
    pub fn send_keys(&mut self, keys: &[KeyCode]) {
        for key in keys {
            if self.send_key(*key) {
                break; // Quit encountered
            }
        }
    }

    /// Access the coordinator for assertions
    pub fn state(&self) -> &SearchCoordinator<InlineDispatch<DatasetBackend>> {
        self.app.coordinator()
    }

    /// Check if app is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame to a string
    ///
    /// # Panics
    /// Panics if rendering fails (should never happen with TestBackend)
    pub fn render_to_string(&mut self) -> String {
        self.app
            .draw()
            .expect("Rendering should succeed in test harness");

        buffer_to_string(self.app.terminal().backend().buffer())
    }
}
