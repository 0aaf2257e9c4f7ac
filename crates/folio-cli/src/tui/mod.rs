//! Terminal user interface (TUI) for folio.
//!
//! ## Entry points
//!
//! - [`explorer::run_explorer`]: project facets and career timeline in one
//!   full-screen view.

pub mod explorer;
