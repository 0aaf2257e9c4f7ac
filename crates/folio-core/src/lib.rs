//! folio-core library.
//!
//! Portfolio content model plus the derived-state engines the views are built
//! on: facet extraction and filtering over projects, and the merged
//! experience/certification timeline with its expand/collapse registry.
//!
//! # Conventions
//!
//! - **Errors**: only loading and parsing edges fail ([`error::FolioError`]);
//!   filter, timeline and expand operations are total.
//! - **State**: [`filter::FilterState`] and [`expand::ExpandRegistry`] are
//!   values; transitions return new values.
//! - **Logging**: `tracing` macros (`debug!` for derived-view recomputation).

pub mod config;
pub mod content;
pub mod error;
pub mod expand;
pub mod facets;
pub mod filter;
pub mod model;
pub mod timeline;

pub use content::PortfolioContent;
pub use expand::{EntryKind, ExpandKey, ExpandRegistry};
pub use facets::{Facets, StatusFacet, get_facets};
pub use filter::{FilterState, StatusSelection, evaluate, filter_projects};
pub use timeline::{TimelineItem, merge_timeline};
