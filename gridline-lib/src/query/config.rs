//! Query-side configuration: allow-lists and bounds.

use std::collections::{BTreeMap, BTreeSet};

/// How an allow-listed filter field matches its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Case-insensitive substring match (text inputs).
    Contains,
    /// Exact match against the display form (select inputs, categories).
    Equals,
}

/// Per-collection query rules: which fields may be sorted and filtered,
/// which fields a global search spans, and how large a page may get.
///
/// The default sort field doubles as the fallback when a request names a
/// field outside the sort allow-list, which keeps ordering deterministic
/// even for invalid requests.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    pub(crate) default_sort: String,
    pub(crate) sortable: BTreeSet<String>,
    pub(crate) filterable: BTreeMap<String, MatchKind>,
    pub(crate) searchable: Vec<String>,
    pub(crate) max_page_size: u64,
}

/// Upper bound applied when no explicit maximum is configured.
pub const DEFAULT_MAX_PAGE_SIZE: u64 = 100;

impl QueryConfig {
    /// Creates a config with the given default (and fallback) sort field.
    /// The default sort field is always sortable.
    pub fn new(default_sort: impl Into<String>) -> Self {
        let default_sort = default_sort.into();
        let mut sortable = BTreeSet::new();
        sortable.insert(default_sort.clone());
        Self {
            default_sort,
            sortable,
            filterable: BTreeMap::new(),
            searchable: Vec::new(),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }

    /// Adds fields to the sort allow-list.
    pub fn sortable<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.sortable.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Adds one field to the filter allow-list with its match mode.
    pub fn filterable(mut self, field: impl Into<String>, kind: MatchKind) -> Self {
        self.filterable.insert(field.into(), kind);
        self
    }

    /// Sets the fields a global search term is matched against.
    pub fn searchable<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.searchable = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Caps the page size a single request may ask for.
    pub fn max_page_size(mut self, limit: u64) -> Self {
        self.max_page_size = limit.max(1);
        self
    }

    /// The default sort field.
    pub fn default_sort_field(&self) -> &str {
        &self.default_sort
    }

    /// Returns `true` if the field may be sorted by.
    pub fn is_sortable(&self, field: &str) -> bool {
        self.sortable.contains(field)
    }

    /// Returns the match mode for an allow-listed filter field.
    pub fn filter_kind(&self, field: &str) -> Option<MatchKind> {
        self.filterable.get(field).copied()
    }
}
