//! Result pager widget.
//!
//! Lays out the collaborators around the derived display values:
//!
//! ```text
//! ┌Filters──────┐ 1 - 10 of 42
//! │Platform     │ orders  dataset · mysql
//! │>[x] mysql   │   Customer orders
//! │ [ ] kafka   │ ...
//! └─────────────┘ ‹ [1] 2 3 4 5 ›
//! ```
//!
//! The filter panel is shown only when enabled; the result list only in the
//! populated state. Range header and page control always render, using the
//! last-known response while a new one is loading.

use super::constants::{FILTER_PANEL_WIDTH, PAGE_CONTROL_HEIGHT, RANGE_HEADER_HEIGHT};
use super::filter_panel::{FilterPanel, FilterPanelState};
use super::page_control::PageControl;
use super::result_list::ResultList;
use crate::pager::{RenderState, ResultPager};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
};

impl StatefulWidget for ResultPager<'_> {
    type State = FilterPanelState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let props = *self.props();

        let results_area = if self.filter_panel_visible() {
            let [filters_area, results_area] = Layout::horizontal([
                Constraint::Length(FILTER_PANEL_WIDTH),
                Constraint::Min(0),
            ])
            .areas(area);
            FilterPanel::new(self.facets(), props.selected_filters, props.loading).render(
                filters_area,
                buf,
                state,
            );
            results_area
        } else {
            area
        };

        let [header_area, list_area, footer_area] = Layout::vertical([
            Constraint::Length(RANGE_HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(PAGE_CONTROL_HEIGHT),
        ])
        .areas(results_area);

        let mut header = vec![Span::styled(
            self.display_range().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if self.render_state() == RenderState::Loading {
            header.push(Span::styled(
                "  loading…",
                Style::default().add_modifier(Modifier::DIM),
            ));
        }
        Paragraph::new(Line::from(header)).render(header_area, buf);

        match self.render_state() {
            RenderState::Populated => ResultList::new(self.visible_entities()).render(list_area, buf),
            RenderState::Loading | RenderState::Empty => {}
        }

        PageControl::new(self.page_control_props()).render(footer_area, buf);
    }
}
