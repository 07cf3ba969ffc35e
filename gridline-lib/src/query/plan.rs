//! Compiled query plans: predicate, ordering, and bounds for one request.

use std::cmp::Ordering;

use log::debug;

use crate::page::PageData;
use crate::request::{Direction, FilterSet, PageRequest};
use crate::row::{Row, compare_values, display_value, resolve_path};

use super::config::{MatchKind, QueryConfig};

/// The filter predicate after allow-listing.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PlanFilter {
    /// Match every row.
    All,
    /// OR of case-insensitive substring matches across the searchable
    /// fields.
    Global { term: String, fields: Vec<String> },
    /// AND of per-field matches that survived the allow-list.
    Fields(Vec<FieldMatch>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldMatch {
    field: String,
    kind: MatchKind,
    value: String,
}

/// One request compiled against one collection's [`QueryConfig`].
///
/// The plan carries everything needed to produce both halves of a page
/// result: the bounded row slice (offset/limit) and the unbounded total
/// under the same predicates. The effective sort and bounds are exposed so
/// callers can observe what the allow-list actually admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    filter: PlanFilter,
    sort_field: String,
    direction: Direction,
    offset: u64,
    limit: u64,
}

impl QueryPlan {
    /// Compiles a request.
    ///
    /// - A sort field outside the allow-list silently falls back to the
    ///   default sort field; a request with no sort uses the default
    ///   ascending, so ordering is always deterministic.
    /// - Filter keys outside the allow-list are dropped, not errors.
    /// - The page size is clamped to the configured maximum.
    pub fn new(request: &PageRequest, config: &QueryConfig) -> Self {
        let (sort_field, direction) = match &request.sort {
            Some(sort) if config.is_sortable(&sort.field) => {
                (sort.field.clone(), sort.direction)
            }
            Some(sort) => {
                debug!(
                    "sort field {:?} not allow-listed, falling back to {:?}",
                    sort.field, config.default_sort
                );
                (config.default_sort.clone(), sort.direction)
            }
            None => (config.default_sort.clone(), Direction::Asc),
        };

        let filter = match &request.filters {
            FilterSet::None => PlanFilter::All,
            FilterSet::Global(term) => {
                let term = term.trim().to_lowercase();
                if term.is_empty() || config.searchable.is_empty() {
                    PlanFilter::All
                } else {
                    PlanFilter::Global {
                        term,
                        fields: config.searchable.clone(),
                    }
                }
            }
            FilterSet::Fields(entries) => {
                let mut matches = Vec::new();
                for (field, value) in entries {
                    match config.filter_kind(field) {
                        Some(kind) => matches.push(FieldMatch {
                            field: field.clone(),
                            kind,
                            value: value.clone(),
                        }),
                        None => {
                            debug!("ignoring filter on non-allow-listed field {field:?}");
                        }
                    }
                }
                if matches.is_empty() {
                    PlanFilter::All
                } else {
                    PlanFilter::Fields(matches)
                }
            }
        };

        let limit = request.page_size.min(config.max_page_size);
        Self {
            filter,
            sort_field,
            direction,
            offset: request.page.saturating_sub(1).saturating_mul(limit),
            limit,
        }
    }

    /// The sort field after allow-listing.
    pub fn sort_field(&self) -> &str {
        &self.sort_field
    }

    /// The sort direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The zero-based row offset of the slice.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// The slice bound after clamping.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Whether a row satisfies the plan's predicates.
    pub fn matches(&self, row: &Row) -> bool {
        match &self.filter {
            PlanFilter::All => true,
            PlanFilter::Global { term, fields } => fields.iter().any(|field| {
                resolve_path(row, field)
                    .map(|value| display_value(value).to_lowercase().contains(term))
                    .unwrap_or(false)
            }),
            PlanFilter::Fields(matches) => matches.iter().all(|entry| {
                let Some(value) = resolve_path(row, &entry.field) else {
                    return false;
                };
                let display = display_value(value);
                match entry.kind {
                    MatchKind::Contains => display
                        .to_lowercase()
                        .contains(&entry.value.trim().to_lowercase()),
                    MatchKind::Equals => display == entry.value,
                }
            }),
        }
    }

    /// Runs the plan over a collection, producing the bounded slice and
    /// the unbounded total in one pass.
    pub fn execute(&self, rows: &[Row]) -> PageData {
        let mut matching: Vec<&Row> = rows.iter().filter(|row| self.matches(row)).collect();
        let total = matching.len() as u64;

        // Stable sort: rows with equal keys keep input order, so the same
        // input always yields the same page.
        matching.sort_by(|a, b| self.compare_rows(a, b));

        let slice = matching
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .cloned()
            .collect();
        PageData::new(slice, total)
    }

    fn compare_rows(&self, a: &Row, b: &Row) -> Ordering {
        let left = resolve_path(a, &self.sort_field);
        let right = resolve_path(b, &self.sort_field);
        let ordering = match (left, right) {
            (Some(left), Some(right)) => compare_values(left, right),
            // Rows missing the sort key sink to the end in either direction.
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        if self.direction.is_descending() {
            ordering.reverse()
        } else {
            ordering
        }
    }
}
