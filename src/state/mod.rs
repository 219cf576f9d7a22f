//! Application state (pure core).
//!
//! The coordinator owns everything the result pager renders; the pager only
//! reads it and reports user intent back through callbacks.

pub mod coordinator;

pub use coordinator::{SearchCoordinator, SearchOptions};
