//! Headless tree-view state.
//!
//! [`TreeViewState`] is the part of a tree view a model interacts with:
//! which rows are selected, which row is current, and which nodes are
//! expanded. A rendering view owns one and draws from it.

use std::collections::HashSet;

use parking_lot::{Mutex, MutexGuard};

use super::index::ModelIndex;
use super::selection::{SelectionCommand, SelectionModel};

/// Selection, current index and expansion of a tree view.
///
/// Expansion is tracked per item (by internal id), so the name and flags
/// cells of a row share it.
#[derive(Default)]
pub struct TreeViewState {
    selection: Mutex<SelectionModel>,
    expanded: Mutex<HashSet<u64>>,
}

impl TreeViewState {
    /// Creates an empty view state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the selection model.
    ///
    /// Selection signals fire while the guard is held; slots must not lock it
    /// again.
    pub fn selection(&self) -> MutexGuard<'_, SelectionModel> {
        self.selection.lock()
    }

    /// Returns `true` if the item behind `index` is selected.
    pub fn is_selected(&self, index: &ModelIndex) -> bool {
        self.selection.lock().is_selected(index)
    }

    /// The current (focused) index.
    pub fn current_index(&self) -> ModelIndex {
        self.selection.lock().current_index().clone()
    }

    /// Makes `index` current without changing the selection.
    pub fn set_current_index(&self, index: ModelIndex) {
        self.selection.lock().set_current_index(index);
    }

    /// Selects `index` alone and makes it current.
    pub fn select_current(&self, index: ModelIndex) {
        let mut selection = self.selection.lock();
        selection.apply(index.clone(), SelectionCommand::ClearAndSelect);
        selection.set_current_index(index);
    }

    /// Deselects everything.
    pub fn clear_selection(&self) {
        self.selection.lock().clear_selection();
    }

    /// Expands or collapses the node behind `index`. Invalid indices are ignored.
    pub fn set_expanded(&self, index: &ModelIndex, expanded: bool) {
        if !index.is_valid() {
            return;
        }
        let mut set = self.expanded.lock();
        if expanded {
            set.insert(index.internal_id());
        } else {
            set.remove(&index.internal_id());
        }
    }

    /// Returns `true` if the node behind `index` is expanded.
    pub fn is_expanded(&self, index: &ModelIndex) -> bool {
        index.is_valid() && self.expanded.lock().contains(&index.internal_id())
    }

    /// Number of expanded nodes.
    pub fn expanded_count(&self) -> usize {
        self.expanded.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expansion_is_per_item() {
        let state = TreeViewState::new();
        let name = ModelIndex::new(0, 0, ModelIndex::invalid(), 3);

        state.set_expanded(&name, true);
        assert!(state.is_expanded(&name.sibling_at_column(1)));

        state.set_expanded(&name, false);
        assert!(!state.is_expanded(&name));
        state.set_expanded(&ModelIndex::invalid(), true);
        assert_eq!(state.expanded_count(), 0);
    }

    #[test]
    fn test_select_current_then_clear() {
        let state = TreeViewState::new();
        let index = ModelIndex::new(1, 0, ModelIndex::invalid(), 8);

        state.select_current(index.clone());
        assert!(state.is_selected(&index));
        assert_eq!(state.current_index(), index);

        state.clear_selection();
        state.set_current_index(ModelIndex::invalid());
        assert!(!state.is_selected(&index));
        assert!(!state.current_index().is_valid());
    }
}
