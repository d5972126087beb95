//! The model side of model/view: [`ItemModel`], [`ItemFlags`] and the
//! [`ModelSignals`] views listen on.

use voxroster_core::Signal;

use super::index::ModelIndex;
use super::mime::{DropAction, MimeData};
use super::role::{ItemData, ItemRole};

/// What a view may do with a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemFlags {
    pub enabled: bool,
    pub selectable: bool,
    pub drag_enabled: bool,
    pub drop_enabled: bool,
}

impl ItemFlags {
    /// Nothing allowed; the flags of an invalid index.
    pub const NONE: Self = Self {
        enabled: false,
        selectable: false,
        drag_enabled: false,
        drop_enabled: false,
    };

    pub const ENABLED: Self = Self {
        enabled: true,
        ..Self::NONE
    };

    pub const fn selectable(self) -> Self {
        Self {
            selectable: true,
            ..self
        }
    }

    pub const fn draggable(self) -> Self {
        Self {
            drag_enabled: true,
            ..self
        }
    }

    pub const fn drop_target(self) -> Self {
        Self {
            drop_enabled: true,
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// Which header a section number refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A tree of cells as a view sees it.
///
/// All methods take `&self`. Implementations keep their state behind locks
/// and release them before emitting, because slots query the model again.
/// The invalid index stands for the root everywhere a parent is expected.
pub trait ItemModel: Send + Sync {
    fn row_count(&self, parent: &ModelIndex) -> usize;

    fn column_count(&self, parent: &ModelIndex) -> usize;

    /// [`ItemData::None`] for invalid indices and unanswered roles.
    fn data(&self, index: &ModelIndex, role: ItemRole) -> ItemData;

    /// The invalid index when `row` or `column` is out of range.
    fn index(&self, row: usize, column: usize, parent: &ModelIndex) -> ModelIndex;

    /// The invalid index for top-level rows.
    fn parent(&self, index: &ModelIndex) -> ModelIndex;

    fn signals(&self) -> &ModelSignals;

    fn flags(&self, index: &ModelIndex) -> ItemFlags {
        if index.is_valid() {
            ItemFlags::ENABLED.selectable()
        } else {
            ItemFlags::NONE
        }
    }

    fn header_data(&self, _section: usize, _orientation: Orientation, _role: ItemRole) -> ItemData {
        ItemData::None
    }

    /// Shorthand for the [`ItemRole::Display`] string.
    fn display_text(&self, index: &ModelIndex) -> Option<String> {
        self.data(index, ItemRole::Display).into_string()
    }

    fn supported_drop_actions(&self) -> DropAction {
        DropAction::NONE
    }

    /// Formats [`mime_data`](Self::mime_data) produces and drops accept.
    fn mime_types(&self) -> Vec<String> {
        Vec::new()
    }

    /// Drag payload for `indexes`, or `None` if they cannot be dragged.
    fn mime_data(&self, _indexes: &[ModelIndex]) -> Option<MimeData> {
        None
    }

    /// Handles a drop onto `parent`; `row` and `column` are `None` for a drop
    /// on the item itself. Returns whether the drop was taken.
    fn drop_mime_data(
        &self,
        _data: &MimeData,
        _action: DropAction,
        _row: Option<usize>,
        _column: Option<usize>,
        _parent: &ModelIndex,
    ) -> bool {
        false
    }
}

type RowRange = (ModelIndex, usize, usize);

/// Change notifications of an [`ItemModel`].
///
/// Row signals carry `(parent, first, last)`. `data_changed` carries
/// `(top_left, bottom_right, roles)`.
#[derive(Default)]
pub struct ModelSignals {
    pub rows_about_to_be_inserted: Signal<RowRange>,
    pub rows_inserted: Signal<RowRange>,
    pub rows_about_to_be_removed: Signal<RowRange>,
    pub rows_removed: Signal<RowRange>,
    pub data_changed: Signal<(ModelIndex, ModelIndex, Vec<ItemRole>)>,
}

impl ModelSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `insert` between `rows_about_to_be_inserted` and `rows_inserted`.
    /// `insert` must drop any model lock before it returns.
    pub fn emit_rows_inserted(&self, parent: ModelIndex, first: usize, last: usize, insert: impl FnOnce()) {
        self.rows_about_to_be_inserted.emit((parent.clone(), first, last));
        insert();
        self.rows_inserted.emit((parent, first, last));
    }

    /// Runs `remove` between `rows_about_to_be_removed` and `rows_removed`.
    pub fn emit_rows_removed(&self, parent: ModelIndex, first: usize, last: usize, remove: impl FnOnce()) {
        self.rows_about_to_be_removed.emit((parent.clone(), first, last));
        remove();
        self.rows_removed.emit((parent, first, last));
    }

    /// `data_changed` for one cell.
    pub fn emit_data_changed_single(&self, index: ModelIndex, roles: Vec<ItemRole>) {
        self.data_changed.emit((index.clone(), index, roles));
    }
}
