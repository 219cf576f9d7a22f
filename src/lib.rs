//! Result pager (rpager)
//!
//! TUI for paging and facet-filtering search results over an entity catalog.
//!
//! Follows the Pure Core / Impure Shell architecture: `model`, `pager` and
//! `state` hold no terminal or thread handles; `backend` runs searches and
//! `view` owns the terminal.

pub mod backend;
pub mod config;
pub mod logging;
pub mod model;
pub mod pager;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
