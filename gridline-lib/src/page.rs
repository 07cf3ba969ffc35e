//! Page results and derived pagination metadata.

use crate::row::Row;

/// One page of rows plus the unbounded total for the same predicates.
///
/// Invariant: `rows.len()` never exceeds the page size of the request that
/// produced it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageData {
    /// The bounded row slice, in result order.
    pub rows: Vec<Row>,
    /// Total matching rows across all pages.
    pub total_count: u64,
}

impl PageData {
    /// Creates a page from a row slice and the filtered total.
    pub fn new(rows: Vec<Row>, total_count: u64) -> Self {
        Self { rows, total_count }
    }

    /// An empty page of an empty collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of rows on this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Derived pagination metadata. Never stored independently: recomputed
/// from every [`PageData`] so it cannot drift from the data it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// One-based page number of this slice.
    pub page: u64,
    /// Rows per page the request asked for.
    pub page_size: u64,
    /// Total matching rows.
    pub total_count: u64,
    /// Total number of pages (0 when there are no matches).
    pub total_pages: u64,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_prev: bool,
    /// One-based position of the first row on this page (0 when empty).
    pub first: u64,
    /// One-based position of the last row on this page (0 when empty).
    pub last: u64,
}

impl PageInfo {
    /// Computes the metadata for one delivered page.
    ///
    /// A `page` beyond `total_pages` is a valid empty slice, not an error;
    /// the executor already returned zero rows for the out-of-range
    /// offset.
    pub fn assemble(page: u64, page_size: u64, total_count: u64, rows_on_page: usize) -> Self {
        let total_pages = if total_count == 0 || page_size == 0 {
            0
        } else {
            total_count.div_ceil(page_size)
        };
        let (first, last) = if rows_on_page == 0 {
            (0, 0)
        } else {
            let first = page.saturating_sub(1).saturating_mul(page_size) + 1;
            (first, first + rows_on_page as u64 - 1)
        };
        Self {
            page,
            page_size,
            total_count,
            total_pages,
            has_next: page < total_pages,
            has_prev: total_count > 0 && page > 1,
            first,
            last,
        }
    }

    /// The human-readable range summary shown under a grid.
    ///
    /// # Example
    ///
    /// ```
    /// use gridline_lib::page::PageInfo;
    ///
    /// let info = PageInfo::assemble(1, 10, 25, 10);
    /// assert_eq!(info.report(), "Showing 1 to 10 of 25 results");
    /// ```
    pub fn report(&self) -> String {
        format!(
            "Showing {} to {} of {} results",
            self.first, self.last, self.total_count
        )
    }
}
