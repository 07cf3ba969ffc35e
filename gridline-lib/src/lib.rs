//! Server-driven data grid contract and query execution.
//!
//! This crate is the shared half of a paginated, sortable, filterable data
//! grid: the canonical page request descriptor and its stable wire
//! encoding, the dynamic row model with dotted-path resolution, the
//! allow-listed query planner, the page metadata arithmetic, and the
//! [`RowSource`] seam a client fetches through. The client-side state
//! machine lives in the companion `gridline-grid` crate.

pub mod error;
pub mod memory;
pub mod page;
pub mod query;
pub mod request;
pub mod row;
pub mod source;

pub use error::FetchError;
pub use memory::{MemoryCatalog, MemorySource};
pub use page::{PageData, PageInfo};
pub use query::{MatchKind, QueryConfig, QueryPlan};
pub use request::{Direction, FilterSet, PageRequest, SortSpec};
pub use row::{Row, resolve_path};
pub use source::RowSource;
