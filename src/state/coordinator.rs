//! Owner of search state.
//!
//! `SearchCoordinator` holds the page, filters and latest response that the
//! result pager renders. It receives the pager's callbacks, issues requests
//! through a `SearchDispatch`, and applies completions with last-write-wins:
//! only the most recently issued request may update the props.

use crate::backend::{RequestId, SearchCompletion, SearchDispatch, SearchRequest};
use crate::model::{
    BackendError, Facet, FilterSelection, PageNumber, SearchResponse, total_pages,
};
use crate::pager::{DEFAULT_PAGE_SIZE, PagerHandler, PagerProps, ResultPager};
use tracing::{debug, info, warn};

/// Initial search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Free-text query.
    pub query: String,
    /// Initial page.
    pub page: PageNumber,
    /// Results per page.
    pub page_size: usize,
    /// Initial filter selection.
    pub filters: FilterSelection,
    /// Whether the filter panel starts visible.
    pub show_filters: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: PageNumber::FIRST,
            page_size: DEFAULT_PAGE_SIZE,
            filters: FilterSelection::empty(),
            show_filters: true,
        }
    }
}

/// Parent coordinator for the result pager.
#[derive(Debug)]
pub struct SearchCoordinator<D> {
    dispatch: D,
    query: String,
    page: PageNumber,
    page_size: usize,
    filters: FilterSelection,
    response: SearchResponse,
    loading: bool,
    show_filters: bool,
    last_error: Option<BackendError>,
    latest: Option<RequestId>,
}

impl<D: SearchDispatch> SearchCoordinator<D> {
    /// Create a coordinator. No request is issued until [`start`](Self::start).
    pub fn new(dispatch: D, options: SearchOptions) -> Self {
        Self {
            dispatch,
            query: options.query,
            page: options.page,
            page_size: options.page_size,
            filters: options.filters,
            response: SearchResponse::Absent,
            loading: false,
            show_filters: options.show_filters,
            last_error: None,
            latest: None,
        }
    }

    /// Issue the initial request.
    pub fn start(&mut self) {
        self.issue();
    }

    fn issue(&mut self) {
        let request = SearchRequest {
            query: self.query.clone(),
            filters: self.filters.clone(),
            start: self.page.start_offset(self.page_size),
            count: self.page_size,
        };

        match self.dispatch.submit(request) {
            Ok(id) => {
                debug!(
                    id = %id,
                    page = self.page.get(),
                    filters = self.filters.len(),
                    "Search issued"
                );
                self.latest = Some(id);
                self.loading = true;
            }
            Err(error) => self.fail(error),
        }
    }

    fn fail(&mut self, error: BackendError) {
        warn!(%error, "Search failed");
        self.response = SearchResponse::Absent;
        self.loading = false;
        self.last_error = Some(error);
    }

    /// Apply a finished request.
    ///
    /// Returns `false` if the completion was stale and dropped.
    pub fn apply(&mut self, completion: SearchCompletion) -> bool {
        if self.latest != Some(completion.id) {
            debug!(id = %completion.id, "Dropping stale search response");
            return false;
        }

        match completion.result {
            Ok(page) => {
                info!(
                    id = %completion.id,
                    total = page.total_count,
                    returned = page.entities.len(),
                    "Search response applied"
                );
                self.response = SearchResponse::Received(page);
                self.loading = false;
                self.last_error = None;
            }
            Err(error) => self.fail(error),
        }
        true
    }

    /// Drain finished requests without blocking.
    ///
    /// Returns whether any completion changed the state.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Some(completion) = self.dispatch.try_recv() {
            changed |= self.apply(completion);
        }
        changed
    }

    /// Props for the current render.
    pub fn props(&self) -> PagerProps<'_> {
        PagerProps {
            page: self.page,
            response: &self.response,
            facets: self.facets(),
            selected_filters: &self.filters,
            loading: self.loading,
            show_filters: self.show_filters,
        }
    }

    /// The result pager for the current render.
    pub fn pager(&self) -> ResultPager<'_> {
        ResultPager::new(self.props()).page_size(self.page_size)
    }

    /// Facets of the latest response; stale while loading.
    pub fn facets(&self) -> Option<&[Facet]> {
        self.response.facets()
    }

    /// Current page.
    pub fn page(&self) -> PageNumber {
        self.page
    }

    /// Results per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current filter selection.
    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    /// Query sent with every request.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Latest applied response.
    pub fn response(&self) -> &SearchResponse {
        &self.response
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the filter panel is shown.
    pub fn show_filters(&self) -> bool {
        self.show_filters
    }

    /// Show or hide the filter panel.
    pub fn toggle_show_filters(&mut self) {
        self.show_filters = !self.show_filters;
    }

    /// Error from the last failed request, cleared on success.
    pub fn last_error(&self) -> Option<&BackendError> {
        self.last_error.as_ref()
    }

    /// Id of the newest issued request.
    pub fn latest_request(&self) -> Option<RequestId> {
        self.latest
    }

    /// Page count of the latest response at the configured page size.
    pub fn total_pages(&self) -> usize {
        let total = self.response.as_page().map_or(0, |p| p.total_count);
        total_pages(total, self.page_size)
    }

    /// Underlying dispatcher.
    pub fn dispatch(&self) -> &D {
        &self.dispatch
    }
}

impl<D: SearchDispatch> PagerHandler for SearchCoordinator<D> {
    fn on_filters_changed(&mut self, next: FilterSelection) {
        self.filters = next;
        self.page = PageNumber::FIRST;
        self.issue();
    }

    fn on_page_changed(&mut self, next: PageNumber) {
        self.page = next;
        self.issue();
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
