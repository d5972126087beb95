//! voxroster - the channel and player tree of a voice-chat client.
//!
//! The crate keeps a [`Roster`] of server channels and connected players and
//! exposes it to a tree view through [`PlayerModel`], a hierarchical
//! [`ItemModel`](model::ItemModel). [`PlayerDelegate`] renders the model's
//! status column.
//!
//! # Example
//!
//! ```
//! use voxroster::{ChannelId, PlayerModel, Session, SessionContext};
//! use voxroster::model::{ItemModel, ModelIndex};
//!
//! let model = PlayerModel::new(SessionContext::new().with_local_session(Session(7)));
//! model.add_channel(ChannelId(1), ChannelId::ROOT, "Lobby")?;
//! model.add_player(Session(7), "me")?;
//! model.move_player(Session(7), ChannelId(1))?;
//!
//! assert_eq!(model.row_count(&ModelIndex::invalid()), 1);
//! assert!(model.linked_channels().contains(&ChannelId(1)));
//! # Ok::<(), voxroster::RosterError>(())
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod player_delegate;
pub mod player_model;
pub mod roster;

pub use config::{DelegateMetrics, IconTheme, PlayerIcons, RosterConfig};
pub use context::{Overlay, PlayerView, ServerHandler, ServerMessage, SessionContext};
pub use error::{ConfigError, DragError, Result, RosterError};
pub use player_delegate::PlayerDelegate;
pub use player_model::PlayerModel;
pub use roster::{Channel, ChannelId, Player, PlayerFlags, Roster, Session};
pub use voxroster_core::{ConnectionId, Signal, TreeFormatOptions, TreeStyle};

/// Rendering primitives.
pub mod render {
    pub use voxroster_render::*;
}
