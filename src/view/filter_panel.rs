//! Facet filter panel.
//!
//! Lists every facet bucket with a checkbox. The cursor lives in
//! [`FilterPanelState`]; toggling a bucket produces a complete replacement
//! [`FilterSelection`] for the owner rather than mutating the current one.

use crate::model::{Facet, FilterSelection};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};

/// A selectable facet bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterRow<'a> {
    /// Facet field.
    pub field: &'a str,
    /// Bucket value.
    pub value: &'a str,
    /// Bucket count.
    pub count: usize,
}

/// Flatten facets into selectable rows, in facet then bucket order.
pub fn filter_rows(facets: &[Facet]) -> Vec<FilterRow<'_>> {
    facets
        .iter()
        .flat_map(|facet| {
            facet.aggregations.iter().map(move |bucket| FilterRow {
                field: &facet.field,
                value: &bucket.value,
                count: bucket.count,
            })
        })
        .collect()
}

/// Cursor over the filter rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterPanelState {
    cursor: usize,
}

impl FilterPanelState {
    /// Row index under the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move down, stopping at the last of `row_count` rows.
    pub fn move_down(&mut self, row_count: usize) {
        if self.cursor + 1 < row_count {
            self.cursor += 1;
        }
    }

    /// Move up, stopping at the first row.
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Keep the cursor on an existing row after facets change.
    pub fn clamp(&mut self, row_count: usize) {
        self.cursor = self.cursor.min(row_count.saturating_sub(1));
    }

    /// The selection that results from toggling the row under the cursor.
    ///
    /// `None` when there are no rows.
    pub fn toggle(&self, facets: &[Facet], selected: &FilterSelection) -> Option<FilterSelection> {
        let rows = filter_rows(facets);
        let row = rows.get(self.cursor.min(rows.len().saturating_sub(1)))?;
        Some(selected.toggled(row.field, row.value))
    }
}

/// The selection after clearing all filters, or `None` if nothing is selected.
pub fn cleared(selected: &FilterSelection) -> Option<FilterSelection> {
    if selected.is_empty() {
        None
    } else {
        Some(FilterSelection::empty())
    }
}

/// Filter panel widget.
pub struct FilterPanel<'a> {
    facets: &'a [Facet],
    selected: &'a FilterSelection,
    loading: bool,
}

impl<'a> FilterPanel<'a> {
    /// Panel over `facets` with `selected` marked.
    pub fn new(facets: &'a [Facet], selected: &'a FilterSelection, loading: bool) -> Self {
        Self {
            facets,
            selected,
            loading,
        }
    }

    fn lines(&self, cursor: usize) -> (Vec<Line<'a>>, usize) {
        let mut lines = Vec::new();
        let mut cursor_line = 0;
        let mut row_index = 0;

        for facet in self.facets {
            lines.push(Line::from(Span::styled(
                facet.display_name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )));

            for bucket in &facet.aggregations {
                let checked = self.selected.contains(&facet.field, &bucket.value);
                let at_cursor = row_index == cursor;
                if at_cursor {
                    cursor_line = lines.len();
                }

                let marker = if at_cursor { ">" } else { " " };
                let check = if checked { "[x]" } else { "[ ]" };
                let style = if at_cursor {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default()
                };
                lines.push(Line::from(Span::styled(
                    format!("{marker}{check} {} ({})", bucket.value, bucket.count),
                    style,
                )));
                row_index += 1;
            }
        }

        (lines, cursor_line)
    }
}

impl StatefulWidget for FilterPanel<'_> {
    type State = FilterPanelState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let row_count = filter_rows(self.facets).len();
        state.clamp(row_count);

        let title = if self.loading {
            "Filters (loading)"
        } else {
            "Filters"
        };
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner_height = block.inner(area).height as usize;

        let (lines, cursor_line) = if row_count == 0 {
            (vec![Line::from("No filters")], 0)
        } else {
            self.lines(state.cursor)
        };

        // Scroll just enough to keep the cursor visible
        let scroll = cursor_line.saturating_sub(inner_height.saturating_sub(1));
        let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);

        Paragraph::new(lines)
            .block(block)
            .scroll((scroll, 0))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterCriterion;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn facets() -> Vec<Facet> {
        vec![
            Facet::new("type", "Type")
                .with_bucket("dataset", 4)
                .with_bucket("dashboard", 1),
            Facet::new("platform", "Platform")
                .with_bucket("mysql", 2)
                .with_bucket("kafka", 2),
        ]
    }

    fn render(facets: &[Facet], selected: &FilterSelection, state: &mut FilterPanelState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(30, 10)).unwrap();
        terminal
            .draw(|frame| {
                frame.render_stateful_widget(
                    FilterPanel::new(facets, selected, false),
                    frame.area(),
                    state,
                );
            })
            .unwrap();
        crate::test_harness::buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn rows_flatten_in_order() {
        let facets = facets();
        let rows = filter_rows(&facets);
        let values: Vec<_> = rows.iter().map(|r| (r.field, r.value)).collect();
        assert_eq!(
            values,
            vec![
                ("type", "dataset"),
                ("type", "dashboard"),
                ("platform", "mysql"),
                ("platform", "kafka"),
            ]
        );
    }

    #[test]
    fn cursor_moves_within_rows() {
        let mut state = FilterPanelState::default();
        state.move_up();
        assert_eq!(state.cursor(), 0);
        for _ in 0..10 {
            state.move_down(4);
        }
        assert_eq!(state.cursor(), 3);
        state.clamp(2);
        assert_eq!(state.cursor(), 1);
        state.clamp(0);
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn toggle_adds_row_under_cursor() {
        let facets = facets();
        let mut state = FilterPanelState::default();
        state.move_down(4);
        state.move_down(4);

        let next = state.toggle(&facets, &FilterSelection::empty()).unwrap();
        assert_eq!(next.as_slice(), &[FilterCriterion::new("platform", "mysql")]);
    }

    #[test]
    fn toggle_removes_selected_row() {
        let facets = facets();
        let selected = FilterSelection::new(vec![
            FilterCriterion::new("type", "dataset"),
            FilterCriterion::new("platform", "kafka"),
        ]);
        let state = FilterPanelState::default();

        let next = state.toggle(&facets, &selected).unwrap();
        assert_eq!(next.as_slice(), &[FilterCriterion::new("platform", "kafka")]);
    }

    #[test]
    fn toggle_without_rows_is_none() {
        let state = FilterPanelState::default();
        assert_eq!(state.toggle(&[], &FilterSelection::empty()), None);
    }

    #[test]
    fn clear_only_when_something_selected() {
        assert_eq!(cleared(&FilterSelection::empty()), None);
        let selected = FilterSelection::new(vec![FilterCriterion::new("type", "dataset")]);
        assert_eq!(cleared(&selected), Some(FilterSelection::empty()));
    }

    #[test]
    fn renders_checkboxes_and_cursor() {
        let facets = facets();
        let selected = FilterSelection::new(vec![FilterCriterion::new("platform", "mysql")]);
        let mut state = FilterPanelState::default();

        let output = render(&facets, &selected, &mut state);
        assert!(output.contains(">[ ] dataset (4)"), "{output}");
        assert!(output.contains(" [x] mysql (2)"), "{output}");
        assert!(output.contains("Platform"), "{output}");
    }

    #[test]
    fn renders_placeholder_without_facets() {
        let mut state = FilterPanelState::default();
        let output = render(&[], &FilterSelection::empty(), &mut state);
        assert!(output.contains("No filters"));
    }
}
