//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod entity;
pub mod error;
pub mod facet;
pub mod filter;
pub mod key_action;
pub mod page;
pub mod result_page;

// Re-export for convenience
pub use entity::Entity;
pub use error::{AppError, BackendError, InputError};
pub use facet::{Facet, FacetBucket};
pub use filter::{FilterCriterion, FilterSelection, InvalidFilter};
pub use key_action::KeyAction;
pub use page::{InvalidPageNumber, PageNumber, total_pages};
pub use result_page::{ResultPage, SearchResponse};
