//! Client-side state for a server-driven data grid.
//!
//! This crate is the client half of the gridline pair: column
//! specifications with a tagged per-cell render strategy, a fetch
//! coordinator that supersedes stale responses, row selection, and the
//! grid state machine that ties them to the request/query contract in
//! `gridline-lib`.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gridline_grid::column::{ColumnSpec, FilterKind};
//! use gridline_grid::grid::{Grid, GridConfig};
//! use gridline_lib::memory::MemorySource;
//! use gridline_lib::query::{MatchKind, QueryConfig};
//! use gridline_lib::request::SortSpec;
//! use serde_json::json;
//!
//! # async fn demo() -> Result<(), gridline_lib::FetchError> {
//! let source = MemorySource::new(
//!     vec![json!({"id": 1, "title": "Phone", "price": 99})],
//!     QueryConfig::new("id")
//!         .sortable(["price"])
//!         .filterable("title", MatchKind::Contains),
//! );
//!
//! let grid = Grid::new(
//!     vec![
//!         ColumnSpec::new("Title", "title").filterable(FilterKind::Text),
//!         ColumnSpec::new("Price", "price").sortable(),
//!     ],
//!     GridConfig::new(),
//!     Arc::new(source),
//! );
//! grid.load()?;
//! grid.sort_change(&[SortSpec::desc("price")])?;
//! # Ok(())
//! # }
//! ```

pub mod column;
pub mod coordinator;
pub mod grid;
pub mod selection;

pub use column::{CellContent, CellPosition, ColumnField, ColumnSpec, FilterKind, render_cell};
pub use coordinator::{FetchCoordinator, FetchDelivery, FetchOutcome, PendingFetch};
pub use grid::{Grid, GridConfig, LoadPhase};
pub use selection::{Selection, SelectionMode};
