//! Grid-side configuration.

use gridline_lib::request::DEFAULT_PAGE_SIZE;

use crate::selection::SelectionMode;

/// Client-side grid settings.
#[derive(Debug, Clone)]
pub struct GridConfig {
    pub(crate) row_key: String,
    pub(crate) default_page_size: u64,
    pub(crate) page_size_options: Vec<u64>,
    pub(crate) with_index: bool,
    pub(crate) selection: SelectionMode,
}

impl GridConfig {
    /// Default settings: rows keyed by `"id"`, ten rows per page, the
    /// usual page-size choices, no index column, multi-selection.
    pub fn new() -> Self {
        Self {
            row_key: "id".to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![10, 25, 50, 100],
            with_index: false,
            selection: SelectionMode::Multi,
        }
    }

    /// Sets the property path that uniquely identifies a row. Selection is
    /// keyed by this field.
    pub fn with_row_key(mut self, path: impl Into<String>) -> Self {
        self.row_key = path.into();
        self
    }

    /// Sets the page size used before the first page-change event.
    pub fn with_default_page_size(mut self, size: u64) -> Self {
        self.default_page_size = size.max(1);
        self
    }

    /// Sets the page sizes the paginator offers.
    pub fn with_page_size_options(mut self, options: Vec<u64>) -> Self {
        self.page_size_options = options;
        self
    }

    /// Prepends a computed `"#"` row-number column (unless a column already
    /// shows the row key).
    pub fn with_index(mut self) -> Self {
        self.with_index = true;
        self
    }

    /// Sets the selection mode.
    pub fn with_selection(mut self, mode: SelectionMode) -> Self {
        self.selection = mode;
        self
    }

    /// The row-key property path.
    pub fn row_key(&self) -> &str {
        &self.row_key
    }

    /// The page sizes the paginator offers.
    pub fn page_size_options(&self) -> &[u64] {
        &self.page_size_options
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new()
    }
}
