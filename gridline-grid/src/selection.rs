//! Row selection, keyed by the configured row-key field.
//!
//! Selection is independent of fetch state: selecting rows never triggers a
//! fetch, and a page change leaves the selection intact. Only an explicit
//! [`Selection::clear`] (or a grid reset) empties it.

use std::collections::BTreeSet;

/// Selection mode for a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// No selection allowed.
    None,
    /// At most one row selected at a time.
    Single,
    /// Any number of rows selected.
    #[default]
    Multi,
}

/// Tracks selected rows by their key values.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    mode: SelectionMode,
    selected: BTreeSet<String>,
}

impl Selection {
    /// Creates an empty selection in the given mode.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: BTreeSet::new(),
        }
    }

    /// The selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Toggles one key. Returns `true` if the selection changed.
    pub fn toggle(&mut self, key: &str) -> bool {
        match self.mode {
            SelectionMode::None => false,
            SelectionMode::Single => {
                if self.selected.contains(key) {
                    self.selected.clear();
                } else {
                    self.selected.clear();
                    self.selected.insert(key.to_string());
                }
                true
            }
            SelectionMode::Multi => {
                if !self.selected.remove(key) {
                    self.selected.insert(key.to_string());
                }
                true
            }
        }
    }

    /// Selects one key (clearing others in single mode). Returns `true` if
    /// the selection changed.
    pub fn select(&mut self, key: &str) -> bool {
        match self.mode {
            SelectionMode::None => false,
            SelectionMode::Single => {
                if self.selected.contains(key) {
                    return false;
                }
                self.selected.clear();
                self.selected.insert(key.to_string());
                true
            }
            SelectionMode::Multi => self.selected.insert(key.to_string()),
        }
    }

    /// Deselects one key. Returns `true` if it was selected.
    pub fn deselect(&mut self, key: &str) -> bool {
        self.selected.remove(key)
    }

    /// Returns `true` if the key is selected.
    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.contains(key)
    }

    /// Explicitly clears the whole selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// The selected keys, in sorted order.
    pub fn keys(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
