//! Cell addresses.
//!
//! A [`ModelIndex`] names a cell as row and column under a parent index, plus
//! an opaque id the model uses to get back to its own node. The player model
//! stores a generational arena key there, so an index that outlives its row
//! resolves to nothing rather than to whatever took the slot.

use std::fmt;
use std::sync::Arc;

#[derive(Clone, PartialEq, Eq, Hash)]
struct Cell {
    row: usize,
    column: usize,
    internal_id: u64,
    parent: ModelIndex,
}

/// A cell of an [`ItemModel`](super::ItemModel), or the invalid index.
///
/// The invalid index is the parent of top-level rows and the answer for
/// anything a model cannot address. Indices are cheap to clone but meant to
/// be short-lived: after rows move, an old index may point elsewhere.
///
/// ```
/// use voxroster::model::ModelIndex;
///
/// let lobby = ModelIndex::new(0, 0, ModelIndex::invalid(), 7);
/// let alice = ModelIndex::new(2, 1, lobby.clone(), 9);
///
/// assert_eq!(alice.parent(), lobby);
/// assert!(!lobby.parent().is_valid());
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ModelIndex(Option<Arc<Cell>>);

impl ModelIndex {
    #[inline]
    pub const fn invalid() -> Self {
        Self(None)
    }

    pub fn new(row: usize, column: usize, parent: ModelIndex, internal_id: u64) -> Self {
        Self(Some(Arc::new(Cell {
            row,
            column,
            internal_id,
            parent,
        })))
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// Zero for the invalid index.
    pub fn row(&self) -> usize {
        self.0.as_ref().map_or(0, |cell| cell.row)
    }

    /// Zero for the invalid index.
    pub fn column(&self) -> usize {
        self.0.as_ref().map_or(0, |cell| cell.column)
    }

    pub fn internal_id(&self) -> u64 {
        self.0.as_ref().map_or(0, |cell| cell.internal_id)
    }

    pub fn parent(&self) -> ModelIndex {
        self.0
            .as_ref()
            .map(|cell| cell.parent.clone())
            .unwrap_or_default()
    }

    /// The cell in `column` of the same row.
    pub fn sibling_at_column(&self, column: usize) -> ModelIndex {
        match &self.0 {
            Some(cell) if cell.column == column => self.clone(),
            Some(cell) => Self::new(cell.row, column, cell.parent.clone(), cell.internal_id),
            None => Self::invalid(),
        }
    }
}

impl fmt::Debug for ModelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(cell) = &self.0 else {
            return f.write_str("ModelIndex(invalid)");
        };
        write!(f, "ModelIndex({}, {} #{:x}", cell.row, cell.column, cell.internal_id)?;
        if cell.parent.is_valid() {
            write!(f, " in {:?}", cell.parent)?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_index_reads_as_zero() {
        let index = ModelIndex::invalid();
        assert!(!index.is_valid());
        assert_eq!((index.row(), index.column(), index.internal_id()), (0, 0, 0));
        assert_eq!(index, ModelIndex::default());
        assert!(!index.parent().is_valid());
    }

    #[test]
    fn test_equality_covers_id_and_parent() {
        let lobby = ModelIndex::new(0, 0, ModelIndex::invalid(), 1);
        let a = ModelIndex::new(1, 0, lobby.clone(), 100);
        assert_eq!(a, ModelIndex::new(1, 0, lobby, 100));
        assert_ne!(a, ModelIndex::new(1, 0, ModelIndex::invalid(), 100));
        assert_ne!(a, ModelIndex::new(1, 0, ModelIndex::invalid(), 101));
    }

    #[test]
    fn test_sibling_at_column_keeps_row_and_parent() {
        let lobby = ModelIndex::new(0, 0, ModelIndex::invalid(), 5);
        let name = ModelIndex::new(4, 0, lobby.clone(), 9);
        let flags = name.sibling_at_column(1);

        assert_eq!((flags.row(), flags.column(), flags.internal_id()), (4, 1, 9));
        assert_eq!(flags.parent(), lobby);
        assert_eq!(flags.sibling_at_column(0), name);
        assert!(!ModelIndex::invalid().sibling_at_column(1).is_valid());
    }

    #[test]
    fn test_debug_shows_chain() {
        let lobby = ModelIndex::new(0, 0, ModelIndex::invalid(), 0x10);
        let alice = ModelIndex::new(2, 1, lobby, 0x2a);
        assert_eq!(format!("{alice:?}"), "ModelIndex(2, 1 #2a in ModelIndex(0, 0 #10))");
    }
}
