//! Row selection of a view.
//!
//! Rows are keyed by their index's internal id, so the name and flags cells
//! of one row share a selection state.
//!
//! ```
//! use voxroster::model::{ModelIndex, SelectionCommand, SelectionModel};
//!
//! let mut selection = SelectionModel::new();
//! let row = ModelIndex::new(0, 0, ModelIndex::invalid(), 42);
//!
//! selection.apply(row.clone(), SelectionCommand::ClearAndSelect);
//! assert!(selection.is_selected(&row.sibling_at_column(1)));
//! ```

use std::collections::BTreeMap;

use voxroster_core::Signal;

use super::index::ModelIndex;

/// How many rows may be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Selection requests are ignored.
    NoSelection,
    /// At most one row.
    #[default]
    SingleSelection,
    /// Any number of rows.
    MultiSelection,
}

/// A change to apply to one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCommand {
    Select,
    Deselect,
    Toggle,
    /// Drop every other row first.
    ClearAndSelect,
}

/// Selected rows plus the current (focused) row.
pub struct SelectionModel {
    mode: SelectionMode,
    current: ModelIndex,
    /// Selected rows by internal id, each with the index it was selected through.
    rows: BTreeMap<u64, ModelIndex>,

    /// Emitted with (selected, deselected) rows.
    pub selection_changed: Signal<(Vec<ModelIndex>, Vec<ModelIndex>)>,
    /// Emitted with (new, old) current index.
    pub current_changed: Signal<(ModelIndex, ModelIndex)>,
}

impl Default for SelectionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionModel {
    pub fn new() -> Self {
        Self {
            mode: SelectionMode::default(),
            current: ModelIndex::invalid(),
            rows: BTreeMap::new(),
            selection_changed: Signal::new(),
            current_changed: Signal::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
    }

    pub fn current_index(&self) -> &ModelIndex {
        &self.current
    }

    /// Moves the focus without touching the selection.
    pub fn set_current_index(&mut self, index: ModelIndex) {
        if self.current == index {
            return;
        }
        let old = std::mem::replace(&mut self.current, index.clone());
        self.current_changed.emit((index, old));
    }

    pub fn is_selected(&self, index: &ModelIndex) -> bool {
        index.is_valid() && self.rows.contains_key(&index.internal_id())
    }

    pub fn has_selection(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Selected rows, ordered by internal id.
    pub fn selected(&self) -> Vec<ModelIndex> {
        self.rows.values().cloned().collect()
    }

    /// Applies `command` to the row behind `index`.
    pub fn apply(&mut self, index: ModelIndex, command: SelectionCommand) {
        if self.mode == SelectionMode::NoSelection || !index.is_valid() {
            return;
        }
        let id = index.internal_id();
        let was_selected = self.rows.contains_key(&id);
        let select = match command {
            SelectionCommand::Select | SelectionCommand::ClearAndSelect => true,
            SelectionCommand::Deselect => false,
            SelectionCommand::Toggle => !was_selected,
        };

        let mut deselected = Vec::new();
        if select && (command == SelectionCommand::ClearAndSelect || self.mode == SelectionMode::SingleSelection) {
            deselected.extend(
                std::mem::take(&mut self.rows)
                    .into_iter()
                    .filter(|(other, _)| *other != id)
                    .map(|(_, row)| row),
            );
        }

        let mut selected = Vec::new();
        if select {
            if self.rows.insert(id, index.clone()).is_none() && !was_selected {
                selected.push(index);
            }
        } else if let Some(row) = self.rows.remove(&id) {
            deselected.push(row);
        }

        if !selected.is_empty() || !deselected.is_empty() {
            self.selection_changed.emit((selected, deselected));
        }
    }

    /// Deselects every row; the current index stays.
    pub fn clear_selection(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let deselected = std::mem::take(&mut self.rows).into_values().collect();
        self.selection_changed.emit((Vec::new(), deselected));
    }
}
