//! Allow-listed query planning and in-memory execution.
//!
//! A [`QueryPlan`] is built from a [`PageRequest`](crate::request::PageRequest)
//! and a [`QueryConfig`]. The config names which fields a request may sort
//! and filter by; anything outside the allow-lists degrades safely (sort
//! falls back to the default field, unknown filter keys are ignored) so a
//! bad field can never abort a page load or reach the executor verbatim.
//!
//! # Example
//!
//! ```
//! use gridline_lib::query::{MatchKind, QueryConfig, QueryPlan};
//! use gridline_lib::request::{PageRequest, SortSpec};
//! use serde_json::json;
//!
//! let config = QueryConfig::new("id")
//!     .sortable(["id", "price"])
//!     .filterable("title", MatchKind::Contains)
//!     .searchable(["title", "description"]);
//!
//! let request = PageRequest::new(1, 2).with_sort(SortSpec::desc("price"));
//! let plan = QueryPlan::new(&request, &config);
//!
//! let rows = vec![
//!     json!({"id": 1, "price": 5}),
//!     json!({"id": 2, "price": 9}),
//!     json!({"id": 3, "price": 7}),
//! ];
//! let page = plan.execute(&rows);
//! assert_eq!(page.total_count, 3);
//! assert_eq!(page.rows[0]["price"], json!(9));
//! ```

mod config;
mod plan;

pub use config::MatchKind;
pub use config::QueryConfig;
pub use plan::QueryPlan;
