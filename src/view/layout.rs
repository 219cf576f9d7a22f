//! Screen layout: result pager above a one-line status bar.

use super::constants::STATUS_BAR_HEIGHT;
use super::filter_panel::FilterPanelState;
use crate::backend::SearchDispatch;
use crate::state::SearchCoordinator;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Key hints shown when nothing else needs the status bar.
pub const KEY_HINTS: &str = "n/p page  g/G first/last  j/k move  space toggle  c clear  f filters  q quit";

/// Status bar widget.
///
/// Shows, in priority order: the last search error, a loading marker, or
/// the key hints. The query and active filter count are always prefixed.
pub struct StatusBar<'a, D> {
    coordinator: &'a SearchCoordinator<D>,
}

impl<'a, D> StatusBar<'a, D> {
    /// Status bar for the coordinator's current state.
    pub fn new(coordinator: &'a SearchCoordinator<D>) -> Self {
        Self { coordinator }
    }
}

impl<D: SearchDispatch> Widget for StatusBar<'_, D> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let coordinator = self.coordinator;
        let mut spans = Vec::new();

        if !coordinator.query().is_empty() {
            spans.push(Span::styled(
                format!("\"{}\" ", coordinator.query()),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        }
        if !coordinator.filters().is_empty() {
            spans.push(Span::raw(format!(
                "[{} filter{}] ",
                coordinator.filters().len(),
                if coordinator.filters().len() == 1 { "" } else { "s" }
            )));
        }

        if let Some(error) = coordinator.last_error() {
            spans.push(Span::styled(
                format!("Error: {error}"),
                Style::default().fg(Color::Red),
            ));
        } else if coordinator.is_loading() {
            spans.push(Span::styled("Searching…", Style::default().fg(Color::Yellow)));
        } else {
            spans.push(Span::styled(
                KEY_HINTS,
                Style::default().add_modifier(Modifier::DIM),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Render the full screen.
pub fn render_layout<D: SearchDispatch>(
    frame: &mut Frame,
    coordinator: &SearchCoordinator<D>,
    filter_state: &mut FilterPanelState,
) {
    let [main_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(STATUS_BAR_HEIGHT),
    ])
    .areas(frame.area());

    frame.render_stateful_widget(coordinator.pager(), main_area, filter_state);
    frame.render_widget(StatusBar::new(coordinator), status_area);
}
