//! Collaborators the player model calls out to.
//!
//! The model does not own a network connection, an overlay or a widget. It
//! reaches them through the traits here, bundled in a [`SessionContext`]
//! that is handed to the model at construction and can be updated as the
//! session comes and goes.

use std::fmt;
use std::sync::Arc;

use voxroster_render::Font;

use crate::model::{ModelIndex, TreeViewState};
use crate::roster::{ChannelId, Player, Session};

/// A request sent to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMessage {
    /// Move a player into a channel.
    PlayerMove { victim: Session, channel: ChannelId },
    /// Re-parent a channel.
    ChannelMove { channel: ChannelId, parent: ChannelId },
}

/// Outbound connection to the server.
pub trait ServerHandler: Send + Sync {
    /// Queues a message for the server. Must not call back into the model.
    fn send_message(&self, message: ServerMessage);
}

/// In-game overlay showing who shares the local player's channel.
pub trait Overlay: Send + Sync {
    /// Replaces the displayed players.
    fn set_players(&self, players: &[Player]);
}

/// The part of the bound tree view the model has to manage.
///
/// The model clears stale selection before removing a row and expands the
/// chain of channels that leads to the local player.
pub trait PlayerView: Send + Sync {
    /// Returns `true` if the row behind `index` is selected.
    fn is_selected(&self, index: &ModelIndex) -> bool;

    /// The view's current index.
    fn current_index(&self) -> ModelIndex;

    /// Deselects everything.
    fn clear_selection(&self);

    /// Changes the current index.
    fn set_current_index(&self, index: ModelIndex);

    /// Expands or collapses a node.
    fn set_expanded(&self, index: &ModelIndex, expanded: bool);
}

impl PlayerView for TreeViewState {
    fn is_selected(&self, index: &ModelIndex) -> bool {
        TreeViewState::is_selected(self, index)
    }

    fn current_index(&self) -> ModelIndex {
        TreeViewState::current_index(self)
    }

    fn clear_selection(&self) {
        TreeViewState::clear_selection(self);
    }

    fn set_current_index(&self, index: ModelIndex) {
        TreeViewState::set_current_index(self, index);
    }

    fn set_expanded(&self, index: &ModelIndex, expanded: bool) {
        TreeViewState::set_expanded(self, index, expanded);
    }
}

/// Per-session state shared between the model and the rest of the client.
#[derive(Clone, Default)]
pub struct SessionContext {
    /// Our own session, once the server assigned one.
    pub local_session: Option<Session>,
    /// Base font of the tree view; the local player is shown in bold.
    pub font: Font,
    /// Where drag-and-drop move requests go.
    pub server: Option<Arc<dyn ServerHandler>>,
    /// Optional overlay.
    pub overlay: Option<Arc<dyn Overlay>>,
    /// The bound view, if any.
    pub view: Option<Arc<dyn PlayerView>>,
}

impl SessionContext {
    /// Creates an empty context: no session, default font, no collaborators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the local session.
    pub fn with_local_session(mut self, session: Session) -> Self {
        self.local_session = Some(session);
        self
    }

    /// Sets the base font.
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Sets the server handler.
    pub fn with_server(mut self, server: Arc<dyn ServerHandler>) -> Self {
        self.server = Some(server);
        self
    }

    /// Sets the overlay.
    pub fn with_overlay(mut self, overlay: Arc<dyn Overlay>) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// Sets the bound view.
    pub fn with_view(mut self, view: Arc<dyn PlayerView>) -> Self {
        self.view = Some(view);
        self
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("local_session", &self.local_session)
            .field("font", &self.font)
            .field("server", &self.server.is_some())
            .field("overlay", &self.overlay.is_some())
            .field("view", &self.view.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Outbox(Mutex<Vec<ServerMessage>>);

    impl ServerHandler for Outbox {
        fn send_message(&self, message: ServerMessage) {
            self.0.lock().push(message);
        }
    }

    #[test]
    fn test_context_builder() {
        let outbox = Arc::new(Outbox::default());
        let view = Arc::new(TreeViewState::new());
        let ctx = SessionContext::new()
            .with_local_session(Session(4))
            .with_server(outbox.clone())
            .with_view(view);

        assert_eq!(ctx.local_session, Some(Session(4)));
        assert!(ctx.overlay.is_none());

        if let Some(server) = &ctx.server {
            server.send_message(ServerMessage::PlayerMove {
                victim: Session(4),
                channel: ChannelId(2),
            });
        }
        assert_eq!(outbox.0.lock().len(), 1);
        assert!(format!("{ctx:?}").contains("server: true"));
    }

    #[test]
    fn test_tree_view_state_as_player_view() {
        let state = TreeViewState::new();
        let view: &dyn PlayerView = &state;
        let index = ModelIndex::new(0, 0, ModelIndex::invalid(), 1);

        view.set_current_index(index.clone());
        assert_eq!(view.current_index(), index);
        view.set_expanded(&index, true);
        assert!(state.is_expanded(&index));
        assert!(!view.is_selected(&index));
    }
}
