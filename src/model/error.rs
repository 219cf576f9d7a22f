//! Error types for rpager.
//!
//! Errors are layered with `thiserror` and compose through `?` and `From`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`InputError`] - Dataset loading failures (missing file, bad JSON, IO)
//!   - [`BackendError`] - Search request failures
//!   - `std::io::Error` - Terminal failures
//!
//! # Recovery Strategy
//!
//! Input and terminal errors are fatal and end the program. Backend errors are
//! **non-fatal**: the coordinator clears the current response, stops loading,
//! and shows the message in the status bar. The result pager itself never
//! fails; it renders zeros for an absent response.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Domain errors convert via `From`, so `?` works across layers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to load the dataset. Fatal.
    #[error("Failed to load dataset: {0}")]
    Input(#[from] InputError),

    /// A search request failed.
    ///
    /// Only surfaces here when the initial request fails before the TUI starts;
    /// inside the event loop these are shown in the status bar instead.
    #[error("Search failed: {0}")]
    Backend(#[from] BackendError),

    /// Terminal or TUI rendering error. Fatal.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when loading the dataset file.
#[derive(Debug, Error)]
pub enum InputError {
    /// The dataset path does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The file exists but is not a valid dataset.
    ///
    /// Accepted shapes are a JSON array of entities or an object with an
    /// `entities` array.
    #[error("Invalid dataset {path}: {message}")]
    InvalidDataset {
        /// Path of the dataset.
        path: PathBuf,
        /// Parse error details.
        message: String,
    },

    /// Reading the file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by a search backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// A request asked for zero results per page.
    #[error("Page size must be at least 1")]
    InvalidPageSize,

    /// The backend could not be reached (e.g. the worker thread exited).
    #[error("Search backend unavailable: {0}")]
    Unavailable(String),
}
