//! Column specifications.
//!
//! A [`ColumnSpec`] describes one grid column: what it is titled, which row
//! property it shows (or whether it is a computed index/action column),
//! whether it participates in sorting and filtering, and how its cells are
//! produced. Cell production is a tagged strategy resolved at render time;
//! see [`render`].

mod render;

use std::fmt;
use std::sync::Arc;

use gridline_lib::row::Row;

pub use render::{CellContent, CellPosition, render_cell};

/// Reserved property token for the computed row-number column.
pub const INDEX_FIELD: &str = "index";

/// Reserved property token for action columns (buttons, links).
pub const ACTION_FIELD: &str = "action";

/// What a column shows. Exactly one of the three applies to any column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnField {
    /// A dot-separated property path into the row.
    Path(String),
    /// The computed, page-aware row number.
    Index,
    /// An action cell delegated to an external renderer.
    Action,
}

impl ColumnField {
    /// Maps a property name onto a field, honoring the reserved
    /// `"index"`/`"action"` tokens.
    pub fn parse(property: &str) -> Self {
        match property {
            INDEX_FIELD => Self::Index,
            ACTION_FIELD => Self::Action,
            path => Self::Path(path.to_string()),
        }
    }
}

/// The input widget a filterable column asks the host UI for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Free-text input, matched as a case-insensitive substring.
    Text,
    /// A fixed-choice input, matched exactly.
    Select,
}

/// Hook computing a per-row string (display text or a CSS class hint).
pub type CellHook = Arc<dyn Fn(&Row) -> String + Send + Sync>;

/// Configuration for one grid column.
///
/// # Examples
///
/// ```
/// use gridline_grid::column::{ColumnSpec, FilterKind};
///
/// let columns = vec![
///     ColumnSpec::new("Title", "title").sortable().filterable(FilterKind::Text),
///     ColumnSpec::new("Price", "price")
///         .sortable()
///         .formatted(|row| format!("${}", row["price"])),
///     ColumnSpec::new("Category", "category.name").filterable(FilterKind::Select),
///     ColumnSpec::action("Actions").rendered_by("row-actions"),
/// ];
/// assert_eq!(columns.len(), 4);
/// ```
#[derive(Clone)]
pub struct ColumnSpec {
    /// Header text.
    pub title: String,
    /// What the column shows.
    pub field: ColumnField,
    /// Whether the column header triggers sort events.
    pub sortable: bool,
    /// The filter widget this column offers, if any.
    pub filterable: Option<FilterKind>,
    pub(crate) formatter: Option<CellHook>,
    pub(crate) class: Option<CellHook>,
    pub(crate) renderer: Option<String>,
}

impl ColumnSpec {
    /// Creates a column over a row property. The reserved names `"index"`
    /// and `"action"` produce the corresponding computed columns.
    pub fn new(title: impl Into<String>, property: &str) -> Self {
        Self {
            title: title.into(),
            field: ColumnField::parse(property),
            sortable: false,
            filterable: None,
            formatter: None,
            class: None,
            renderer: None,
        }
    }

    /// Creates the computed row-number column.
    pub fn index() -> Self {
        Self::new("#", INDEX_FIELD)
    }

    /// Creates an action column.
    pub fn action(title: impl Into<String>) -> Self {
        Self::new(title, ACTION_FIELD)
    }

    /// Makes the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Makes the column filterable with the given input kind.
    pub fn filterable(mut self, kind: FilterKind) -> Self {
        self.filterable = Some(kind);
        self
    }

    /// Installs a display formatter. The row data is untouched; only the
    /// rendered text changes.
    pub fn formatted(mut self, hook: impl Fn(&Row) -> String + Send + Sync + 'static) -> Self {
        self.formatter = Some(Arc::new(hook));
        self
    }

    /// Installs a per-row class hook (a styling hint the host interprets).
    pub fn classed(mut self, hook: impl Fn(&Row) -> String + Send + Sync + 'static) -> Self {
        self.class = Some(Arc::new(hook));
        self
    }

    /// Delegates the whole cell to an external renderer by name. The core
    /// never interprets renderer internals.
    pub fn rendered_by(mut self, renderer: impl Into<String>) -> Self {
        self.renderer = Some(renderer.into());
        self
    }

    /// The property path, for plain columns.
    pub fn path(&self) -> Option<&str> {
        match &self.field {
            ColumnField::Path(path) => Some(path),
            _ => None,
        }
    }

    /// Returns `true` for the computed row-number column.
    pub fn is_index(&self) -> bool {
        self.field == ColumnField::Index
    }

    /// Returns `true` for action columns.
    pub fn is_action(&self) -> bool {
        self.field == ColumnField::Action
    }
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("title", &self.title)
            .field("field", &self.field)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("formatter", &self.formatter.is_some())
            .field("class", &self.class.is_some())
            .field("renderer", &self.renderer)
            .finish()
    }
}
