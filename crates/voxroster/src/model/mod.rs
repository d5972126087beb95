//! Model/view plumbing shared by the player tree.
//!
//! A view reaches a model only through [`ItemModel`]: it addresses cells with
//! [`ModelIndex`], asks for an [`ItemRole`] and gets [`ItemData`] back. The
//! model announces structural and data changes on [`ModelSignals`], and the
//! view calls back into the model from those slots. Painting goes through an
//! [`ItemDelegate`]; [`TreeViewState`] is the selection and expansion state a
//! model is allowed to adjust.

mod delegate;
mod index;
mod mime;
mod role;
mod selection;
mod traits;
mod view_state;

pub use delegate::{
    DefaultItemDelegate, DelegatePaintContext, DelegateTheme, ItemDelegate, StyleOptionViewItem,
    ViewItemState,
};
pub use index::ModelIndex;
pub use mime::{DropAction, MimeData};
pub use role::{ItemData, ItemRole};
pub use selection::{SelectionCommand, SelectionMode, SelectionModel};
pub use traits::{ItemFlags, ItemModel, ModelSignals, Orientation};
pub use view_state::TreeViewState;
