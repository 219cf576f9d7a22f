//! Search responses.

use super::{Entity, Facet};
use serde::{Deserialize, Serialize};

/// One page of search results, as produced by the backend.
///
/// Immutable once received; the next response replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPage {
    /// Zero-based offset of the first entity.
    #[serde(rename = "start")]
    pub start_offset: usize,
    /// Requested page size. `entities` may be shorter on the last page.
    #[serde(rename = "count")]
    pub page_size: usize,
    /// Total number of matching results across all pages.
    #[serde(rename = "total")]
    pub total_count: usize,
    /// Entities on this page.
    #[serde(default)]
    pub entities: Vec<Entity>,
    /// Facet counts, if the backend computed them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facets: Option<Vec<Facet>>,
}

/// The owner's view of the latest response.
///
/// `Absent` means no response has arrived (or the last request failed), which
/// is distinct from a `Received` page that happens to contain no results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchResponse {
    /// No response yet, or the last request failed.
    #[default]
    Absent,
    /// The latest response.
    Received(ResultPage),
}

impl SearchResponse {
    /// The page, if one was received.
    pub fn as_page(&self) -> Option<&ResultPage> {
        match self {
            SearchResponse::Absent => None,
            SearchResponse::Received(page) => Some(page),
        }
    }

    /// Whether no page has been received.
    pub fn is_absent(&self) -> bool {
        matches!(self, SearchResponse::Absent)
    }

    /// Entities of the current page, empty when absent.
    pub fn entities(&self) -> &[Entity] {
        self.as_page().map(|p| p.entities.as_slice()).unwrap_or(&[])
    }

    /// Facets of the current page, if the backend sent any.
    pub fn facets(&self) -> Option<&[Facet]> {
        self.as_page().and_then(|p| p.facets.as_deref())
    }
}

impl From<ResultPage> for SearchResponse {
    fn from(page: ResultPage) -> Self {
        SearchResponse::Received(page)
    }
}

impl From<Option<ResultPage>> for SearchResponse {
    fn from(page: Option<ResultPage>) -> Self {
        page.map_or(SearchResponse::Absent, SearchResponse::Received)
    }
}
