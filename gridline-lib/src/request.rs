//! The canonical page request descriptor and its wire encoding.
//!
//! A [`PageRequest`] captures page, sort, and filter intent. Every user
//! interaction that changes any of the three builds a fresh descriptor; a
//! descriptor already handed to a fetch is superseded by the next one,
//! never mutated.
//!
//! Pagination is one-based throughout the model: `page` starts at 1 and the
//! raw row offset is derived as `skip = (page - 1) * page_size` in exactly
//! one place ([`PageRequest::skip`]). The zero-based skip count only exists
//! on the wire.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// The reserved filter key that switches a request into global search mode.
pub const GLOBAL_FILTER_KEY: &str = "global";

/// Sort direction for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Parses a wire direction. Anything other than the case-insensitive
    /// literal `"desc"` normalizes to ascending.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    /// The wire form of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Returns `true` for descending order.
    pub fn is_descending(self) -> bool {
        self == Self::Desc
    }
}

/// A single active sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// The field to sort by (dot paths allowed).
    pub field: String,
    /// The sort direction.
    pub direction: Direction,
}

impl SortSpec {
    /// Creates an ascending sort on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending sort on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

/// The filter portion of a request. The three modes are mutually
/// exclusive by construction: a request is unfiltered, globally searched,
/// or filtered per field, never a mix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterSet {
    /// No filtering.
    #[default]
    None,
    /// One term OR-matched across the configured searchable fields.
    Global(String),
    /// Per-field values, AND-combined.
    Fields(BTreeMap<String, String>),
}

impl FilterSet {
    /// Creates a global search over one term.
    pub fn global(term: impl Into<String>) -> Self {
        Self::Global(term.into())
    }

    /// Creates a single-field filter.
    pub fn field(field: impl Into<String>, value: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(field.into(), value.into());
        Self::Fields(map)
    }

    /// Creates a per-field filter from any iterator of pairs.
    pub fn fields<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Fields(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns `true` when no filtering is active.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The wire form: a flat string map, with the reserved `"global"` key
    /// carrying a global search term.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        match self {
            Self::None => BTreeMap::new(),
            Self::Global(term) => {
                let mut map = BTreeMap::new();
                map.insert(GLOBAL_FILTER_KEY.to_string(), term.clone());
                map
            }
            Self::Fields(fields) => fields.clone(),
        }
    }

    /// Rebuilds a filter set from its wire form. A `"global"` entry wins
    /// over any per-field entries, which keeps the modes exclusive even
    /// against a sloppy caller.
    pub fn from_map(mut map: BTreeMap<String, String>) -> Self {
        if let Some(term) = map.remove(GLOBAL_FILTER_KEY) {
            return Self::Global(term);
        }
        if map.is_empty() {
            Self::None
        } else {
            Self::Fields(map)
        }
    }
}

/// A canonical, immutable page request.
///
/// # Example
///
/// ```
/// use gridline_lib::request::{Direction, FilterSet, PageRequest, SortSpec};
///
/// let request = PageRequest::new(1, 10)
///     .with_sort(SortSpec::desc("price"))
///     .with_filters(FilterSet::global("phone"));
///
/// assert_eq!(request.skip(), 0);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WirePageRequest", try_from = "WirePageRequest")]
pub struct PageRequest {
    /// One-based page number.
    pub page: u64,
    /// Rows per page.
    pub page_size: u64,
    /// The active sort key, if any.
    pub sort: Option<SortSpec>,
    /// The active filters.
    pub filters: FilterSet,
}

impl PageRequest {
    /// Creates a request for the given one-based page.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page,
            page_size,
            sort: None,
            filters: FilterSet::None,
        }
    }

    /// Replaces the sort key.
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Replaces the filters.
    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    /// The derived zero-based row offset. This is the only place the
    /// one-based page is converted to a skip count.
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Rejects malformed descriptors before any fetch is issued.
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.page == 0 {
            return Err(FetchError::validation("page must be at least 1"));
        }
        if self.page_size == 0 {
            return Err(FetchError::validation("page size must be positive"));
        }
        Ok(())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// The stable wire shape of a request crossing a process boundary. Field
/// names are a contract between the two sides and must not change.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WirePageRequest {
    skip: u64,
    limit: u64,
    #[serde(rename = "sortBy", default)]
    sort_by: String,
    #[serde(default)]
    order: String,
    #[serde(default)]
    filters: BTreeMap<String, String>,
}

impl From<PageRequest> for WirePageRequest {
    fn from(request: PageRequest) -> Self {
        let (sort_by, order) = match &request.sort {
            Some(sort) => (sort.field.clone(), sort.direction.as_str().to_string()),
            None => (String::new(), String::new()),
        };
        Self {
            skip: request.skip(),
            limit: request.page_size,
            sort_by,
            order,
            filters: request.filters.to_map(),
        }
    }
}

impl TryFrom<WirePageRequest> for PageRequest {
    type Error = FetchError;

    fn try_from(wire: WirePageRequest) -> Result<Self, Self::Error> {
        if wire.limit == 0 {
            return Err(FetchError::validation("limit must be positive"));
        }
        let sort = if wire.sort_by.is_empty() {
            None
        } else {
            Some(SortSpec {
                field: wire.sort_by,
                direction: Direction::parse(&wire.order),
            })
        };
        Ok(Self {
            // A skip that is not page-aligned rounds down to the
            // containing page.
            page: wire.skip / wire.limit + 1,
            page_size: wire.limit,
            sort,
            filters: FilterSet::from_map(wire.filters),
        })
    }
}
