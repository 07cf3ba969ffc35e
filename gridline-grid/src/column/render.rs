//! The per-cell render strategy.

use gridline_lib::row::{Row, display_value, resolve_path};

use super::{ColumnField, ColumnSpec};

/// Where a cell sits within the overall result set. Needed to compute
/// page-aware row numbers for index columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    /// One-based page number of the slice being rendered.
    pub page: u64,
    /// Rows per page of that slice.
    pub page_size: u64,
    /// Zero-based offset of the row within the slice.
    pub offset: usize,
}

impl CellPosition {
    /// The one-based row number across the whole result set:
    /// `(page - 1) * page_size + offset + 1`.
    pub fn global_index(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size) + self.offset as u64 + 1
    }
}

/// What a cell renders as. The host UI interprets the variants; the core
/// only decides which one applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    /// Nothing to show (the property path did not resolve).
    Empty,
    /// Plain or formatter-produced display text.
    Text(String),
    /// Display text plus a class hint from the column's class hook.
    Styled {
        /// The display text.
        text: String,
        /// The class hint (a CSS class name or similar).
        class: String,
    },
    /// The whole cell is delegated to an external renderer.
    Component {
        /// Renderer name, resolved by the host.
        renderer: String,
    },
    /// The computed, page-aware row number.
    Index(u64),
}

/// Produces one cell.
///
/// Resolution never fails: a missing or null path yields
/// [`CellContent::Empty`], not an error. An installed renderer always wins;
/// otherwise a formatter replaces the resolved display text, and a class
/// hook upgrades the result to [`CellContent::Styled`].
pub fn render_cell(column: &ColumnSpec, row: &Row, position: CellPosition) -> CellContent {
    if let Some(renderer) = &column.renderer {
        return CellContent::Component {
            renderer: renderer.clone(),
        };
    }

    match &column.field {
        ColumnField::Index => CellContent::Index(position.global_index()),
        // An action column without a renderer has nothing to show.
        ColumnField::Action => CellContent::Empty,
        ColumnField::Path(path) => {
            let text = match &column.formatter {
                Some(format) => format(row),
                None => match resolve_path(row, path) {
                    Some(value) => display_value(value),
                    None => return CellContent::Empty,
                },
            };
            match &column.class {
                Some(class) => CellContent::Styled {
                    text,
                    class: class(row),
                },
                None => CellContent::Text(text),
            }
        }
    }
}
