//! Result pager coordination (pure core).
//!
//! [`ResultPager`] derives display values from the owner's props and relays
//! child events upward. It holds no page or filter state of its own: every
//! render receives fresh [`PagerProps`], and user intent leaves through the
//! [`PagerHandler`] callbacks as one-shot messages.

pub mod range;

pub use range::{DisplayRange, derive_range};

use crate::model::{Entity, Facet, FilterSelection, PageNumber, SearchResponse, total_pages};
use tracing::debug;

/// Results per page when no configuration overrides it.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Inputs supplied by the owner on every render.
#[derive(Debug, Clone, Copy)]
pub struct PagerProps<'a> {
    /// Currently selected page.
    pub page: PageNumber,
    /// Latest response, or `Absent` if none has arrived.
    pub response: &'a SearchResponse,
    /// Facets to offer in the filter panel; `None` is treated as no facets.
    pub facets: Option<&'a [Facet]>,
    /// Active filters. Always present, possibly empty.
    pub selected_filters: &'a FilterSelection,
    /// True while a newer response is pending.
    pub loading: bool,
    /// Whether the filter panel is rendered at all.
    pub show_filters: bool,
}

/// Which body the result list area shows.
///
/// Chosen per render from the props; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// A request is in flight; entities are suppressed.
    Loading,
    /// Entities are shown in server order.
    Populated,
    /// No entities to show.
    Empty,
}

impl RenderState {
    /// Pick the state for the loading flag and the current entities.
    pub fn select(loading: bool, entities: &[Entity]) -> Self {
        if loading {
            RenderState::Loading
        } else if entities.is_empty() {
            RenderState::Empty
        } else {
            RenderState::Populated
        }
    }
}

/// Events emitted by the pager's children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagerEvent {
    /// The filter panel produced a complete replacement selection.
    FiltersChanged(FilterSelection),
    /// The page control selected a page.
    PageChanged(PageNumber),
}

impl PagerEvent {
    /// Hand the event to the matching callback.
    pub fn deliver<H: PagerHandler + ?Sized>(self, handler: &mut H) {
        match self {
            PagerEvent::FiltersChanged(next) => handler.on_filters_changed(next),
            PagerEvent::PageChanged(next) => handler.on_page_changed(next),
        }
    }
}

/// Owner-side callbacks.
///
/// Both are fire-and-forget: the owner may update its props later, and the
/// pager keeps rendering the props it holds until then.
pub trait PagerHandler {
    /// Receives the complete new selection, not a delta.
    fn on_filters_changed(&mut self, next: FilterSelection);
    /// A different page was selected.
    fn on_page_changed(&mut self, next: PageNumber);
}

/// Collects callbacks as messages for later delivery.
///
/// Lets the shell forward events while the pager still borrows the owner.
impl PagerHandler for Vec<PagerEvent> {
    fn on_filters_changed(&mut self, next: FilterSelection) {
        self.push(PagerEvent::FiltersChanged(next));
    }

    fn on_page_changed(&mut self, next: PageNumber) {
        self.push(PagerEvent::PageChanged(next));
    }
}

/// Props the page control needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControlProps {
    /// Page the user selected.
    pub current_page: PageNumber,
    /// Results per page.
    pub page_size: usize,
    /// Total matching results.
    pub total_count: usize,
}

impl PageControlProps {
    /// Number of pages needed for `total_count`.
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_count, self.page_size)
    }
}

/// The result pager for one render.
#[derive(Debug, Clone, Copy)]
pub struct ResultPager<'a> {
    props: PagerProps<'a>,
    page_size: usize,
}

impl<'a> ResultPager<'a> {
    /// Wrap borrowed props.
    pub fn new(props: PagerProps<'a>) -> Self {
        Self {
            props,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the configured page size passed to the page control.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Props this pager renders.
    pub fn props(&self) -> &PagerProps<'a> {
        &self.props
    }

    /// Range shown in the header.
    pub fn display_range(&self) -> DisplayRange {
        derive_range(self.props.page, self.props.response)
    }

    /// Which body to render.
    pub fn render_state(&self) -> RenderState {
        RenderState::select(self.props.loading, self.props.response.entities())
    }

    /// Entities for the result list; empty unless populated.
    pub fn visible_entities(&self) -> &'a [Entity] {
        match self.render_state() {
            RenderState::Populated => self.props.response.entities(),
            RenderState::Loading | RenderState::Empty => &[],
        }
    }

    /// Facets of the current response, or none.
    pub fn facets(&self) -> &'a [Facet] {
        self.props.facets.unwrap_or(&[])
    }

    /// Whether the filter panel is shown.
    pub fn filter_panel_visible(&self) -> bool {
        self.props.show_filters
    }

    /// Page control inputs, taken from the last-known response even while loading.
    pub fn page_control_props(&self) -> PageControlProps {
        PageControlProps {
            current_page: self.props.page,
            page_size: self.page_size,
            total_count: self
                .props
                .response
                .as_page()
                .map_or(0, |p| p.total_count),
        }
    }

    /// Forward a child event to the owner.
    ///
    /// Filter events are dropped while the filter panel is hidden. Returns
    /// whether the event reached the handler.
    pub fn dispatch<H: PagerHandler + ?Sized>(&self, event: PagerEvent, handler: &mut H) -> bool {
        match &event {
            PagerEvent::FiltersChanged(next) => {
                if !self.props.show_filters {
                    debug!("Filter panel hidden; dropping filter change");
                    return false;
                }
                debug!(filters = next.len(), "Forwarding filter change");
            }
            PagerEvent::PageChanged(next) => {
                debug!(page = next.get(), "Forwarding page change");
            }
        }
        event.deliver(handler);
        true
    }
}

#[cfg(test)]
#[path = "pager_tests.rs"]
mod tests;
