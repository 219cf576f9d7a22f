//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests drive the full TUI against the catalog
//! fixture with searches answered inline.
