//! Search backends.
//!
//! This module provides:
//! - The `SearchBackend` trait the coordinator queries through
//! - `DatasetBackend`, an in-memory backend over a JSON dataset file
//! - `SearchWorker`, which runs a backend on a background thread

use crate::model::{BackendError, FilterSelection, ResultPage};

pub mod dataset;
pub mod worker;

pub use dataset::{DEFAULT_FACET_FIELDS, DatasetBackend};
pub use worker::{InlineDispatch, RequestId, SearchCompletion, SearchDispatch, SearchWorker};

/// One search request: query, filters and the requested window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchRequest {
    /// Free-text query. Empty matches everything.
    pub query: String,
    /// Criteria ORed within a field and ANDed across fields.
    pub filters: FilterSelection,
    /// Zero-based offset of the first result.
    pub start: usize,
    /// Maximum number of results to return.
    pub count: usize,
}

/// A source of search results.
pub trait SearchBackend: Send + Sync {
    /// Execute a request and return one page of results.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request cannot be served.
    fn search(&self, request: &SearchRequest) -> Result<ResultPage, BackendError>;
}

impl<B: SearchBackend + ?Sized> SearchBackend for std::sync::Arc<B> {
    fn search(&self, request: &SearchRequest) -> Result<ResultPage, BackendError> {
        (**self).search(request)
    }
}
