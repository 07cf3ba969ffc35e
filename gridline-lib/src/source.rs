//! The fetch seam between a grid and whatever hosts its data.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::page::PageData;
use crate::request::PageRequest;

/// The sole interface a grid uses to reach a query host, whether that host
/// is a remote service or an in-process collection.
///
/// Implementations must accept the request descriptor verbatim and return
/// one page plus the total count under the same predicates. They are free
/// to suspend (network or database round trips); cancellation and
/// supersession are the caller's concern.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Executes one page request.
    async fn fetch(&self, request: &PageRequest) -> Result<PageData, FetchError>;
}
