//! The grid state machine.
//!
//! A [`Grid`] owns the canonical [`PageRequest`], the latest accepted page
//! of rows, the selection, and the column set, and translates UI events
//! (page change, sort click, filter edit) into fresh descriptors issued
//! through a [`FetchCoordinator`].
//!
//! Phases move `Idle → Loading → Loaded | Failed`. Previously loaded rows
//! are sticky: they stay renderable while a newer fetch is in flight and
//! across a failed fetch, and are replaced only when a newer result lands
//! or the grid is explicitly reset.

mod config;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, Weak};

use log::{debug, warn};

use gridline_lib::error::FetchError;
use gridline_lib::page::{PageData, PageInfo};
use gridline_lib::request::{FilterSet, PageRequest, SortSpec};
use gridline_lib::row::{Row, display_value, resolve_path};
use gridline_lib::source::RowSource;

use crate::column::{CellContent, CellPosition, ColumnSpec, render_cell};
use crate::coordinator::{FetchCoordinator, FetchOutcome, PendingFetch};
use crate::selection::Selection;

pub use config::GridConfig;

/// Where the grid is in its load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// No fetch issued yet (or explicitly reset).
    #[default]
    Idle,
    /// A fetch is in flight; previous rows, if any, remain renderable.
    Loading,
    /// The latest fetch landed.
    Loaded,
    /// The latest fetch failed; the last good rows remain renderable.
    Failed,
}

/// The latest accepted page together with the descriptor that produced it.
/// Kept as a pair so the rendered metadata can never drift from the rows
/// it describes.
#[derive(Debug, Clone)]
struct Snapshot {
    request: PageRequest,
    data: PageData,
}

struct GridInner {
    columns: Vec<ColumnSpec>,
    request: PageRequest,
    snapshot: Option<Snapshot>,
    phase: LoadPhase,
    error: Option<FetchError>,
    selection: Selection,
}

/// A server-driven data grid instance.
///
/// Cheap to clone; all clones share state. Event methods return a
/// synchronous [`FetchError::Validation`] for malformed input and `Ok`
/// once the fetch is on its way; results are applied asynchronously and
/// flagged through [`Grid::is_dirty`].
pub struct Grid {
    config: Arc<GridConfig>,
    inner: Arc<RwLock<GridInner>>,
    dirty: Arc<AtomicBool>,
    coordinator: Arc<FetchCoordinator>,
}

impl Grid {
    /// Creates an idle grid over a source. No fetch is issued until
    /// [`Grid::load`] or the first event.
    pub fn new(columns: Vec<ColumnSpec>, config: GridConfig, source: Arc<dyn RowSource>) -> Self {
        let request = PageRequest::new(1, config.default_page_size);
        let selection = Selection::new(config.selection);
        Self {
            config: Arc::new(config),
            inner: Arc::new(RwLock::new(GridInner {
                columns,
                request,
                snapshot: None,
                phase: LoadPhase::Idle,
                error: None,
                selection,
            })),
            dirty: Arc::new(AtomicBool::new(false)),
            coordinator: Arc::new(FetchCoordinator::new(source)),
        }
    }

    /// The grid configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Issues the current descriptor. Used for the initial load and by
    /// hosts that want an explicit refresh.
    pub fn load(&self) -> Result<(), FetchError> {
        self.issue_current()
    }

    /// Moves to another page and/or page size, keeping sort and filters.
    pub fn page_change(&self, page: u64, page_size: u64) -> Result<(), FetchError> {
        self.mutate_and_issue(|request| {
            request.page = page;
            request.page_size = page_size;
        })
    }

    /// Applies a sort event. Single- and multi-sort inputs both normalize
    /// to one active key: the FIRST entry wins, the rest are dropped. An
    /// empty slice clears the sort. The current page is kept.
    pub fn sort_change(&self, sorts: &[SortSpec]) -> Result<(), FetchError> {
        if sorts.len() > 1 {
            debug!("multi-sort event: honoring first entry, dropping {}", sorts.len() - 1);
        }
        let sort = sorts.first().cloned();
        self.mutate_and_issue(|request| {
            request.sort = sort;
        })
    }

    /// Switches filter mode. `None` clears all filters; either way the
    /// grid returns to page 1 so a narrower result set cannot strand the
    /// user on an out-of-range page.
    ///
    /// The request channel is replaced wholesale, so an in-flight fetch
    /// from the previous mode can never be mistaken for this one.
    pub fn filter_change(&self, filters: Option<FilterSet>) -> Result<(), FetchError> {
        self.coordinator.replace_channel();
        self.mutate_and_issue(|request| {
            request.filters = filters.unwrap_or_default();
            request.page = 1;
        })
    }

    /// Explicit reset: drops rows, selection, filters and sort, cancels
    /// anything in flight, and returns to [`LoadPhase::Idle`]. No fetch is
    /// issued; call [`Grid::load`] to start over.
    pub fn reset(&self) {
        self.coordinator.replace_channel();
        if let Ok(mut inner) = self.inner.write() {
            inner.request = PageRequest::new(1, self.config.default_page_size);
            inner.snapshot = None;
            inner.phase = LoadPhase::Idle;
            inner.error = None;
            inner.selection.clear();
        }
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Tears the grid down: cancels all outstanding fetches so their
    /// eventual resolution cannot touch this state again.
    pub fn shutdown(&self) {
        self.coordinator.shutdown();
    }

    fn mutate_and_issue(&self, mutate: impl FnOnce(&mut PageRequest)) -> Result<(), FetchError> {
        if let Ok(mut inner) = self.inner.write() {
            // Descriptors are immutable once issued: build the successor
            // from the current one, then swap it in whole.
            let mut next = inner.request.clone();
            mutate(&mut next);
            inner.request = next;
        }
        self.issue_current()
    }

    fn issue_current(&self) -> Result<(), FetchError> {
        let request = self
            .inner
            .read()
            .map(|inner| inner.request.clone())
            .unwrap_or_default();
        // Validation failures surface synchronously and leave the current
        // phase untouched: nothing was issued, so nothing was superseded.
        let pending = self.coordinator.issue(&request)?;
        if let Ok(mut inner) = self.inner.write() {
            inner.phase = LoadPhase::Loading;
            inner.error = None;
        }
        self.dirty.store(true, Ordering::SeqCst);
        self.spawn_apply(pending);
        Ok(())
    }

    fn spawn_apply(&self, pending: PendingFetch) {
        // The task holds the grid weakly: once every Grid clone is gone, a
        // late resolution has nothing left to mutate.
        let inner = Arc::downgrade(&self.inner);
        let dirty = Arc::clone(&self.dirty);
        let coordinator = Arc::clone(&self.coordinator);
        tokio::spawn(async move {
            let Some(delivery) = pending.run().await else {
                return;
            };
            Self::apply(&inner, &coordinator, &dirty, delivery.generation, delivery.request, delivery.outcome);
        });
    }

    fn apply(
        inner: &Weak<RwLock<GridInner>>,
        coordinator: &FetchCoordinator,
        dirty: &AtomicBool,
        generation: u64,
        request: PageRequest,
        outcome: FetchOutcome,
    ) {
        let Some(inner) = inner.upgrade() else {
            return;
        };
        let Ok(mut guard) = inner.write() else {
            return;
        };
        // Authoritative supersession check, under the state lock: a newer
        // issue between completion and application still wins.
        if !coordinator.is_current(generation) {
            debug!("dropping superseded result for generation {generation}");
            return;
        }
        match outcome {
            FetchOutcome::Loaded(data) => {
                guard.snapshot = Some(Snapshot { request, data });
                guard.phase = LoadPhase::Loaded;
                guard.error = None;
            }
            FetchOutcome::Failed(error) => {
                warn!("fetch failed, retaining previous page: {error}");
                guard.phase = LoadPhase::Failed;
                guard.error = Some(error);
            }
        }
        dirty.store(true, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // State access
    // -------------------------------------------------------------------------

    /// The current load phase.
    pub fn phase(&self) -> LoadPhase {
        self.inner.read().map(|inner| inner.phase).unwrap_or_default()
    }

    /// The error of the latest failed fetch, if the grid is in
    /// [`LoadPhase::Failed`].
    pub fn last_error(&self) -> Option<FetchError> {
        self.inner.read().ok().and_then(|inner| inner.error.clone())
    }

    /// The current canonical descriptor.
    pub fn request(&self) -> PageRequest {
        self.inner
            .read()
            .map(|inner| inner.request.clone())
            .unwrap_or_default()
    }

    /// The currently renderable rows (sticky: survives an in-flight fetch
    /// and a failed one).
    pub fn rows(&self) -> Vec<Row> {
        self.inner
            .read()
            .ok()
            .and_then(|inner| inner.snapshot.as_ref().map(|s| s.data.rows.clone()))
            .unwrap_or_default()
    }

    /// Pagination metadata for the latest accepted page.
    pub fn page_info(&self) -> Option<PageInfo> {
        self.inner.read().ok().and_then(|inner| {
            inner.snapshot.as_ref().map(|snapshot| {
                PageInfo::assemble(
                    snapshot.request.page,
                    snapshot.request.page_size,
                    snapshot.data.total_count,
                    snapshot.data.len(),
                )
            })
        })
    }

    /// The "Showing X to Y of Z results" line for the latest accepted page.
    pub fn page_report(&self) -> Option<String> {
        self.page_info().map(|info| info.report())
    }

    // -------------------------------------------------------------------------
    // Columns and cells
    // -------------------------------------------------------------------------

    /// The configured columns.
    pub fn columns(&self) -> Vec<ColumnSpec> {
        self.inner
            .read()
            .map(|inner| inner.columns.clone())
            .unwrap_or_default()
    }

    /// Replaces the column set.
    pub fn set_columns(&self, columns: Vec<ColumnSpec>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.columns = columns;
        }
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// The columns as rendered: with the computed `"#"` column prepended
    /// when the grid is configured `with_index` and no column already
    /// shows the row key.
    pub fn visible_columns(&self) -> Vec<ColumnSpec> {
        let columns = self.columns();
        if !self.config.with_index {
            return columns;
        }
        let shows_key = columns
            .iter()
            .any(|column| column.path() == Some(self.config.row_key.as_str()));
        if shows_key {
            return columns;
        }
        let mut visible = Vec::with_capacity(columns.len() + 1);
        visible.push(ColumnSpec::index());
        visible.extend(columns);
        visible
    }

    /// Renders one cell of the latest accepted page. A row offset outside
    /// the page renders as an empty cell, never an error.
    pub fn cell(&self, row_offset: usize, column: &ColumnSpec) -> CellContent {
        let Ok(inner) = self.inner.read() else {
            return CellContent::Empty;
        };
        let Some(snapshot) = &inner.snapshot else {
            return CellContent::Empty;
        };
        let Some(row) = snapshot.data.rows.get(row_offset) else {
            return CellContent::Empty;
        };
        let position = CellPosition {
            page: snapshot.request.page,
            page_size: snapshot.request.page_size,
            offset: row_offset,
        };
        render_cell(column, row, position)
    }

    /// The selection key of a row, resolved through the configured row-key
    /// path.
    pub fn row_key(&self, row: &Row) -> Option<String> {
        resolve_path(row, &self.config.row_key).map(display_value)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Toggles selection of a row key. Never triggers a fetch.
    pub fn toggle_select(&self, key: &str) -> bool {
        let changed = self
            .inner
            .write()
            .map(|mut inner| inner.selection.toggle(key))
            .unwrap_or(false);
        if changed {
            self.dirty.store(true, Ordering::SeqCst);
        }
        changed
    }

    /// Returns `true` if the row key is selected.
    pub fn is_selected(&self, key: &str) -> bool {
        self.inner
            .read()
            .map(|inner| inner.selection.is_selected(key))
            .unwrap_or(false)
    }

    /// The selected row keys, sorted.
    pub fn selected_keys(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|inner| inner.selection.keys())
            .unwrap_or_default()
    }

    /// Explicitly clears the selection. This is the only way it empties
    /// besides [`Grid::reset`]; refetches and page changes leave it alone.
    pub fn clear_selection(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.selection.clear();
        }
        self.dirty.store(true, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Returns `true` if state changed since the last [`Grid::clear_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clears the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for Grid {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
            coordinator: Arc::clone(&self.coordinator),
        }
    }
}
