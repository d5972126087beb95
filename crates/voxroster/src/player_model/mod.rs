//! The channel/player tree model.
//!
//! [`PlayerModel`] projects a [`Roster`] into a two-column tree for the
//! model/view framework: column 0 shows names with a talk-state or channel
//! icon, column 1 a strip of mute/deaf status icons. The tree root is the
//! implicit root channel and is never materialized as a row; its child
//! channels and players are the top-level rows.
//!
//! The roster is mirrored by a shadow tree ([`item::ItemTree`]) that keeps
//! each node's children sorted by name. All structural changes go through
//! the model so that every insertion and removal is bracketed by the
//! matching begin/end row signals, with the roster and the shadow tree
//! changed together strictly inside the bracket.
//!
//! # Example
//!
//! ```
//! use voxroster::model::{ItemModel, ItemRole, ModelIndex};
//! use voxroster::player_model::PlayerModel;
//! use voxroster::roster::{ChannelId, Session};
//! use voxroster::SessionContext;
//!
//! let model = PlayerModel::new(SessionContext::new());
//! model.add_channel(ChannelId(1), ChannelId::ROOT, "Lobby").unwrap();
//! model.add_player(Session(1), "Alice").unwrap();
//! model.move_player(Session(1), ChannelId(1)).unwrap();
//!
//! let lobby = model.index_of_channel(ChannelId(1));
//! assert_eq!(model.row_count(&lobby), 1);
//! let alice = model.index(0, 0, &lobby);
//! assert_eq!(model.display_text(&alice).as_deref(), Some("Alice"));
//! ```

mod drag;
pub mod item;
mod mutate;

use std::collections::BTreeSet;

use parking_lot::RwLock;
use voxroster_core::TreeFormatOptions;
use voxroster_core::logging::targets;

use crate::config::{PlayerIcons, RosterConfig};
use crate::context::{ServerMessage, SessionContext};
use crate::model::{
    DropAction, ItemData, ItemFlags, ItemModel, ItemRole, MimeData, ModelIndex, ModelSignals,
    Orientation,
};
use crate::roster::{Channel, ChannelId, Player, Roster, Session};

pub use drag::{DragEntry, MIME_TYPE, decode_entries, encode_entries, first_entry};
pub use item::{ItemKey, ItemKind, ModelItem};

use item::ItemTree;

/// Column showing the name and talk/channel icon.
pub const NAME_COLUMN: usize = 0;
/// Column showing the status icon strip.
pub const FLAGS_COLUMN: usize = 1;
const COLUMN_COUNT: usize = 2;

const PLAYER_NAME_TIP: &str = "Name of player";
const CHANNEL_NAME_TIP: &str = "Name of channel";
const PLAYER_FLAGS_TIP: &str = "Player flags";
const PLAYER_NAME_HELP: &str = "A player connected to the server. The icon next to the name \
    shows whether they are talking:<br />\
    <img src=\":/icons/talking_on.png\" /> Talking<br />\
    <img src=\":/icons/talking_off.png\" /> Not talking";
const CHANNEL_NAME_HELP: &str =
    "A channel on the server. Players only hear others in the same or a linked channel.";
const FLAGS_HELP: &str = "Server-side flags of the player, if any:<br />\
    <img src=\":/icons/authenticated.png\" /> Authenticated user<br />\
    <img src=\":/icons/muted_server.png\" /> Muted by an admin<br />\
    <img src=\":/icons/deafened_server.png\" /> Deafened by an admin<br />\
    <img src=\":/icons/muted_self.png\" /> Muted by themselves<br />\
    <img src=\":/icons/deafened_self.png\" /> Deafened by themselves<br />\
    <img src=\":/icons/muted_local.png\" /> Muted by you<br />\
    Self-muted players are usually away from the keyboard.";

/// Roster data and its shadow tree, guarded together.
struct ModelState {
    roster: Roster,
    tree: ItemTree,
    /// Link closure of the local player's channel.
    linked: BTreeSet<ChannelId>,
}

/// Tree model over a server's channels and players.
///
/// All methods take `&self`. Model state sits behind one lock that is never
/// held while a signal is emitted or a collaborator is called, so views may
/// query the model from inside any notification.
pub struct PlayerModel {
    state: RwLock<ModelState>,
    context: RwLock<SessionContext>,
    icons: PlayerIcons,
    signals: ModelSignals,
}

impl PlayerModel {
    /// Creates a model holding only the root channel, with default icons.
    pub fn new(context: SessionContext) -> Self {
        Self::with_icons(context, PlayerIcons::default())
    }

    /// Creates a model using the icon theme of `config`.
    pub fn with_config(context: SessionContext, config: &RosterConfig) -> Self {
        Self::with_icons(context, config.player_icons())
    }

    /// Creates a model with an explicit icon set.
    pub fn with_icons(context: SessionContext, icons: PlayerIcons) -> Self {
        Self {
            state: RwLock::new(ModelState {
                roster: Roster::new(),
                tree: ItemTree::new(),
                linked: BTreeSet::new(),
            }),
            context: RwLock::new(context),
            icons,
            signals: ModelSignals::new(),
        }
    }

    /// The icons rows are decorated with.
    pub fn icons(&self) -> &PlayerIcons {
        &self.icons
    }

    // =========================================================================
    // Context
    // =========================================================================

    /// A copy of the session context.
    pub fn context(&self) -> SessionContext {
        self.context.read().clone()
    }

    /// Replaces the session context, then re-derives link decoration and
    /// view expansion for the (possibly new) local player.
    pub fn set_context(&self, context: SessionContext) {
        *self.context.write() = context;
        self.ensure_self_visible();
        self.update_overlay();
    }

    /// Our own session id.
    pub fn local_session(&self) -> Option<Session> {
        self.context.read().local_session
    }

    /// Sets our own session id.
    pub fn set_local_session(&self, session: Option<Session>) {
        self.context.write().local_session = session;
        tracing::debug!(target: targets::PLAYER_MODEL, ?session, "local session changed");
        self.ensure_self_visible();
        self.update_overlay();
    }

    // =========================================================================
    // Roster access
    // =========================================================================

    /// Runs `f` with read access to the roster.
    pub fn with_roster<R>(&self, f: impl FnOnce(&Roster) -> R) -> R {
        f(&self.state.read().roster)
    }

    /// A copy of a player record.
    pub fn player(&self, session: Session) -> Option<Player> {
        self.state.read().roster.player(session).cloned()
    }

    /// A copy of a channel record.
    pub fn channel(&self, id: ChannelId) -> Option<Channel> {
        self.state.read().roster.channel(id).cloned()
    }

    /// Channels currently decorated as linked.
    pub fn linked_channels(&self) -> BTreeSet<ChannelId> {
        self.state.read().linked.clone()
    }

    /// Channels that have a shadow node, root included.
    pub fn shown_channels(&self) -> BTreeSet<ChannelId> {
        self.state.read().tree.registered_channels().collect()
    }

    /// Players that have a shadow node.
    pub fn shown_players(&self) -> BTreeSet<Session> {
        self.state.read().tree.registered_players().collect()
    }

    /// Child channels of `parent` in row order.
    pub fn child_channels(&self, parent: ChannelId) -> Vec<ChannelId> {
        let state = self.state.read();
        state
            .tree
            .channel_key(parent)
            .and_then(|key| state.tree.get(key))
            .map(|item| item.channels().to_vec())
            .unwrap_or_default()
    }

    /// Players of `channel` in row order.
    pub fn child_players(&self, channel: ChannelId) -> Vec<Session> {
        let state = self.state.read();
        state
            .tree
            .channel_key(channel)
            .and_then(|key| state.tree.get(key))
            .map(|item| item.players().to_vec())
            .unwrap_or_default()
    }

    /// The `n`th sub-channel of `parent` in row order.
    pub fn sub_channel(&self, parent: ChannelId, n: usize) -> Option<ChannelId> {
        let state = self.state.read();
        let key = state.tree.channel_key(parent)?;
        state.tree.get(key)?.channels().get(n).copied()
    }

    // =========================================================================
    // Index lookups
    // =========================================================================

    /// Index of a shown player.
    ///
    /// The player must currently be shown.
    pub fn index_of_player(&self, session: Session, column: usize) -> ModelIndex {
        let state = self.state.read();
        let key = state.tree.player_key(session);
        debug_assert!(key.is_some(), "index of unshown player {session}");
        key.map_or_else(ModelIndex::invalid, |key| index_for_key(&state, key, column))
    }

    /// Index of a shown channel; invalid for the root channel.
    ///
    /// The channel must currently be shown.
    pub fn index_of_channel(&self, id: ChannelId) -> ModelIndex {
        let state = self.state.read();
        let key = state.tree.channel_key(id);
        debug_assert!(key.is_some(), "index of unshown channel {id}");
        key.map_or_else(ModelIndex::invalid, |key| index_for_key(&state, key, NAME_COLUMN))
    }

    /// The player behind an index, if it is a player row.
    pub fn player_at(&self, index: &ModelIndex) -> Option<Session> {
        let state = self.state.read();
        let key = resolve(&state, index)?;
        state.tree.get(key)?.player()
    }

    /// The channel behind an index; a player row yields the player's channel.
    pub fn channel_at(&self, index: &ModelIndex) -> Option<ChannelId> {
        let state = self.state.read();
        let key = resolve(&state, index)?;
        match state.tree.get(key)?.kind() {
            ItemKind::Channel(id) => Some(id),
            ItemKind::Player(session) => state.roster.player(session)?.channel(),
        }
    }

    /// Short description of an index for log output.
    pub fn describe_index(&self, index: &ModelIndex) -> String {
        if !index.is_valid() {
            return "invIdx".to_string();
        }
        let state = self.state.read();
        let Some(item) = resolve(&state, index).and_then(|key| state.tree.get(key)) else {
            return "invPtr".to_string();
        };
        let (tag, name) = match item.kind() {
            ItemKind::Channel(id) => ("C", state.roster.channel(id).map(|c| c.name.as_str())),
            ItemKind::Player(session) => ("P", state.roster.player(session).map(|p| p.name.as_str())),
        };
        format!(
            "{tag}:{} [{},{}]",
            name.unwrap_or("?"),
            index.row(),
            index.column()
        )
    }

    /// Renders the shadow tree for debugging.
    pub fn format_tree(&self, options: &TreeFormatOptions) -> String {
        let state = self.state.read();
        state.tree.format(&state.roster, options)
    }

    // =========================================================================
    // Data
    // =========================================================================

    fn player_data(&self, player: &Player, column: usize, role: ItemRole) -> ItemData {
        match (role, column) {
            (ItemRole::Decoration, NAME_COLUMN) => {
                let icon = match (player.flags.talking, player.flags.alt_speak) {
                    (true, true) => &self.icons.talking_alt,
                    (true, false) => &self.icons.talking_on,
                    (false, _) => &self.icons.talking_off,
                };
                ItemData::Icon(icon.clone())
            }
            (ItemRole::Font, NAME_COLUMN) => {
                let context = self.context.read();
                if context.local_session == Some(player.session()) {
                    ItemData::Font(context.font.bold())
                } else {
                    ItemData::None
                }
            }
            (ItemRole::Display, NAME_COLUMN) => ItemData::from(player.name.as_str()),
            (ItemRole::Display, FLAGS_COLUMN) => ItemData::from(self.status_icons(player)),
            _ => ItemData::None,
        }
    }

    fn channel_data(&self, state: &ModelState, channel: &Channel, column: usize, role: ItemRole) -> ItemData {
        match (role, column) {
            (ItemRole::Decoration, NAME_COLUMN) => {
                let icon = if state.linked.contains(&channel.id()) {
                    &self.icons.channel_linked
                } else {
                    &self.icons.channel
                };
                ItemData::Icon(icon.clone())
            }
            (ItemRole::Display, NAME_COLUMN) => ItemData::from(channel.name.as_str()),
            _ => ItemData::None,
        }
    }

    /// Status icons of a player in display order.
    fn status_icons(&self, player: &Player) -> Vec<voxroster_render::Icon> {
        let flags = &player.flags;
        [
            (player.is_authenticated(), &self.icons.authenticated),
            (flags.mute, &self.icons.muted_server),
            (flags.deaf, &self.icons.deafened_server),
            (flags.self_mute, &self.icons.muted_self),
            (flags.self_deaf, &self.icons.deafened_self),
            (flags.local_mute, &self.icons.muted_local),
        ]
        .into_iter()
        .filter_map(|(set, icon)| set.then(|| icon.clone()))
        .collect()
    }
}

/// Static help texts, independent of the row's data.
fn help_text(column: usize, role: ItemRole, is_player: bool) -> Option<&'static str> {
    match (role, column) {
        (ItemRole::ToolTip, NAME_COLUMN) => {
            Some(if is_player { PLAYER_NAME_TIP } else { CHANNEL_NAME_TIP })
        }
        (ItemRole::ToolTip, FLAGS_COLUMN) => is_player.then_some(PLAYER_FLAGS_TIP),
        (ItemRole::WhatsThis, NAME_COLUMN) => {
            Some(if is_player { PLAYER_NAME_HELP } else { CHANNEL_NAME_HELP })
        }
        (ItemRole::WhatsThis, FLAGS_COLUMN) => Some(FLAGS_HELP),
        _ => None,
    }
}

/// Resolves an index to a live shadow node.
fn resolve(state: &ModelState, index: &ModelIndex) -> Option<ItemKey> {
    if !index.is_valid() {
        return None;
    }
    let key = ItemKey::from_internal_id(index.internal_id());
    state.tree.get(key).map(|_| key)
}

/// Resolves a parent index; an invalid parent is the root.
fn resolve_parent(state: &ModelState, parent: &ModelIndex) -> Option<ItemKey> {
    if parent.is_valid() {
        resolve(state, parent)
    } else {
        Some(state.tree.root())
    }
}

/// Builds the index of a node from its position in the shadow tree.
///
/// The root and detached nodes yield an invalid index.
fn index_for_key(state: &ModelState, key: ItemKey, column: usize) -> ModelIndex {
    if key == state.tree.root() {
        return ModelIndex::invalid();
    }
    let Some(parent) = state.tree.parent(key, &state.roster) else {
        return ModelIndex::invalid();
    };
    let Some(row) = state.tree.row_of_self(key, &state.roster) else {
        return ModelIndex::invalid();
    };
    let parent_index = index_for_key(state, parent, NAME_COLUMN);
    ModelIndex::new(row, column, parent_index, key.to_internal_id())
}

impl ItemModel for PlayerModel {
    fn row_count(&self, parent: &ModelIndex) -> usize {
        let state = self.state.read();
        resolve_parent(&state, parent)
            .and_then(|key| state.tree.get(key))
            .map_or(0, ModelItem::row_count)
    }

    fn column_count(&self, _parent: &ModelIndex) -> usize {
        COLUMN_COUNT
    }

    fn data(&self, index: &ModelIndex, role: ItemRole) -> ItemData {
        let state = self.state.read();
        let Some(item) = resolve(&state, index).and_then(|key| state.tree.get(key)) else {
            return ItemData::None;
        };
        let column = index.column();

        if let Some(text) = help_text(column, role, item.player().is_some()) {
            return ItemData::from(text);
        }

        match item.kind() {
            ItemKind::Player(session) => state
                .roster
                .player(session)
                .map_or(ItemData::None, |p| self.player_data(p, column, role)),
            ItemKind::Channel(id) => state
                .roster
                .channel(id)
                .map_or(ItemData::None, |c| self.channel_data(&state, c, column, role)),
        }
    }

    fn index(&self, row: usize, column: usize, parent: &ModelIndex) -> ModelIndex {
        if column >= COLUMN_COUNT {
            return ModelIndex::invalid();
        }
        let state = self.state.read();
        let Some(child) = resolve_parent(&state, parent).and_then(|key| state.tree.child(key, row)) else {
            return ModelIndex::invalid();
        };
        ModelIndex::new(
            row,
            column,
            parent.sibling_at_column(NAME_COLUMN),
            child.to_internal_id(),
        )
    }

    fn parent(&self, index: &ModelIndex) -> ModelIndex {
        let state = self.state.read();
        let Some(key) = resolve(&state, index) else {
            return ModelIndex::invalid();
        };
        match state.tree.parent(key, &state.roster) {
            Some(parent) => index_for_key(&state, parent, NAME_COLUMN),
            None => ModelIndex::invalid(),
        }
    }

    fn signals(&self) -> &ModelSignals {
        &self.signals
    }

    fn flags(&self, index: &ModelIndex) -> ItemFlags {
        if resolve(&self.state.read(), index).is_none() {
            return ItemFlags::NONE;
        }
        let flags = ItemFlags::ENABLED.draggable().drop_target();
        if index.column() == NAME_COLUMN {
            flags.selectable()
        } else {
            flags
        }
    }

    fn header_data(&self, section: usize, orientation: Orientation, role: ItemRole) -> ItemData {
        match (orientation, role, section) {
            (Orientation::Horizontal, ItemRole::Display, NAME_COLUMN) => ItemData::from("Name"),
            (Orientation::Horizontal, ItemRole::Display, FLAGS_COLUMN) => ItemData::from("Flags"),
            _ => ItemData::None,
        }
    }

    fn supported_drop_actions(&self) -> DropAction {
        DropAction::COPY
    }

    fn mime_types(&self) -> Vec<String> {
        vec![MIME_TYPE.to_string()]
    }

    fn mime_data(&self, indexes: &[ModelIndex]) -> Option<MimeData> {
        let entries: Vec<DragEntry> = {
            let state = self.state.read();
            indexes
                .iter()
                .filter_map(|index| {
                    let key = resolve(&state, index)?;
                    Some(match state.tree.get(key)?.kind() {
                        ItemKind::Channel(id) => DragEntry::Channel(id),
                        ItemKind::Player(session) => DragEntry::Player(session),
                    })
                })
                .collect()
        };
        tracing::trace!(target: targets::DRAG, count = entries.len(), "encoding drag payload");

        let mut data = MimeData::new();
        data.set_data(MIME_TYPE, encode_entries(&entries));
        Some(data)
    }

    fn drop_mime_data(
        &self,
        data: &MimeData,
        action: DropAction,
        _row: Option<usize>,
        _column: Option<usize>,
        parent: &ModelIndex,
    ) -> bool {
        let entry = match drag::first_entry(data) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(target: targets::DRAG, %err, "drop rejected");
                return false;
            }
        };

        let target = if parent.is_valid() {
            match self.channel_at(parent) {
                Some(channel) => channel,
                None => {
                    tracing::warn!(target: targets::DRAG, "drop rejected: target {} is gone", self.describe_index(parent));
                    return false;
                }
            }
        } else {
            ChannelId::ROOT
        };

        let Some(server) = self.context.read().server.clone() else {
            tracing::warn!(target: targets::DRAG, "drop rejected: no server connection");
            return false;
        };

        let message = match entry {
            DragEntry::Player(victim) => ServerMessage::PlayerMove {
                victim,
                channel: target,
            },
            DragEntry::Channel(channel) => ServerMessage::ChannelMove {
                channel,
                parent: target,
            },
        };
        tracing::debug!(target: targets::DRAG, ?message, ?action, "drop requests move");
        server.send_message(message);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::PlayerFlags;

    fn lobby_model() -> PlayerModel {
        let model = PlayerModel::new(SessionContext::new());
        model.add_channel(ChannelId(1), ChannelId::ROOT, "Lobby").unwrap();
        model.add_player(Session(1), "Alice").unwrap();
        model.move_player(Session(1), ChannelId(1)).unwrap();
        model
    }

    #[test]
    fn test_top_level_rows() {
        let model = lobby_model();
        let root = ModelIndex::invalid();
        assert_eq!(model.row_count(&root), 1);
        assert_eq!(model.column_count(&root), 2);

        let lobby = model.index(0, 0, &root);
        assert_eq!(model.display_text(&lobby).as_deref(), Some("Lobby"));
        assert!(!model.parent(&lobby).is_valid());
        assert!(!model.index(1, 0, &root).is_valid());
        assert!(!model.index(0, 2, &root).is_valid());
    }

    #[test]
    fn test_player_index_round_trip() {
        let model = lobby_model();
        let alice = model.index_of_player(Session(1), 0);
        assert_eq!(model.player_at(&alice), Some(Session(1)));
        assert_eq!(model.channel_at(&alice), Some(ChannelId(1)));
        assert_eq!(model.parent(&alice), model.index_of_channel(ChannelId(1)));
        assert_eq!(model.index(0, 0, &model.parent(&alice)), alice);
    }

    #[test]
    fn test_root_channel_index_is_invalid() {
        let model = lobby_model();
        assert!(!model.index_of_channel(ChannelId::ROOT).is_valid());
    }

    #[test]
    fn test_flags_per_column() {
        let model = lobby_model();
        let name = model.index_of_player(Session(1), 0);
        let flags = model.flags(&name);
        assert!(flags.enabled && flags.selectable && flags.drag_enabled && flags.drop_enabled);

        let status = model.flags(&name.sibling_at_column(1));
        assert!(status.enabled && status.drag_enabled && status.drop_enabled);
        assert!(!status.selectable);
        assert!(model.flags(&ModelIndex::invalid()).is_empty());
    }

    #[test]
    fn test_status_icon_precedence() {
        let model = lobby_model();
        let state = PlayerFlags::default()
            .with_local_mute(true)
            .with_self_mute(true)
            .with_deaf(true);
        model.set_player_state(Session(1), state, Some(12)).unwrap();

        let data = model.data(&model.index_of_player(Session(1), 1), ItemRole::Display);
        let names: Vec<&str> = data.icons().iter().map(|icon| icon.name()).collect();
        assert_eq!(
            names,
            vec!["authenticated", "deafened_server", "muted_self", "muted_local"]
        );
    }

    #[test]
    fn test_talking_decoration() {
        let model = lobby_model();
        let alice = model.index_of_player(Session(1), 0);
        let icon = |m: &PlayerModel| {
            m.data(&alice, ItemRole::Decoration)
                .as_icon()
                .map(|i| i.name().to_string())
        };

        assert_eq!(icon(&model).as_deref(), Some("talking_off"));
        model.set_player_talking(Session(1), true, false).unwrap();
        assert_eq!(icon(&model).as_deref(), Some("talking_on"));
        model.set_player_talking(Session(1), true, true).unwrap();
        assert_eq!(icon(&model).as_deref(), Some("talking_alt"));
    }

    #[test]
    fn test_local_player_is_bold() {
        let model = lobby_model();
        let alice = model.index_of_player(Session(1), 0);
        assert!(model.data(&alice, ItemRole::Font).is_none());

        model.set_local_session(Some(Session(1)));
        let font = model.data(&alice, ItemRole::Font);
        assert!(font.as_font().is_some_and(|f| f.is_bold()));
        assert!(model.data(&alice.sibling_at_column(1), ItemRole::Font).is_none());
    }

    #[test]
    fn test_help_texts() {
        let model = lobby_model();
        let lobby = model.index_of_channel(ChannelId(1));
        let alice = model.index_of_player(Session(1), 0);

        assert_eq!(model.data(&lobby, ItemRole::ToolTip).as_string(), Some(CHANNEL_NAME_TIP));
        assert_eq!(model.data(&alice, ItemRole::ToolTip).as_string(), Some(PLAYER_NAME_TIP));
        assert!(model.data(&lobby.sibling_at_column(1), ItemRole::ToolTip).is_none());
        assert_eq!(
            model.data(&lobby.sibling_at_column(1), ItemRole::WhatsThis).as_string(),
            Some(FLAGS_HELP)
        );
        assert!(model.data(&lobby, ItemRole::StatusTip).is_none());
    }

    #[test]
    fn test_header_data() {
        let model = PlayerModel::new(SessionContext::new());
        assert_eq!(
            model.header_data(0, Orientation::Horizontal, ItemRole::Display).as_string(),
            Some("Name")
        );
        assert_eq!(
            model.header_data(1, Orientation::Horizontal, ItemRole::Display).as_string(),
            Some("Flags")
        );
        assert!(model.header_data(0, Orientation::Vertical, ItemRole::Display).is_none());
        assert!(model.header_data(2, Orientation::Horizontal, ItemRole::Display).is_none());
    }

    #[test]
    fn test_describe_index() {
        let model = lobby_model();
        let alice = model.index_of_player(Session(1), 1);
        assert_eq!(model.describe_index(&alice), "P:Alice [0,1]");
        assert_eq!(
            model.describe_index(&model.index_of_channel(ChannelId(1))),
            "C:Lobby [0,0]"
        );
        assert_eq!(model.describe_index(&ModelIndex::invalid()), "invIdx");

        model.remove_player(Session(1)).unwrap();
        assert_eq!(model.describe_index(&alice), "invPtr");
    }

    #[test]
    fn test_stale_index_yields_nothing() {
        let model = lobby_model();
        let alice = model.index_of_player(Session(1), 0);
        model.remove_player(Session(1)).unwrap();
        model.add_player(Session(2), "Bob").unwrap();

        assert!(model.data(&alice, ItemRole::Display).is_none());
        assert!(model.flags(&alice).is_empty());
        assert!(!model.parent(&alice).is_valid());
        assert_eq!(model.row_count(&alice), 0);
    }

    #[test]
    fn test_sub_channel() {
        let model = lobby_model();
        model.add_channel(ChannelId(2), ChannelId::ROOT, "Afk").unwrap();
        assert_eq!(model.sub_channel(ChannelId::ROOT, 0), Some(ChannelId(2)));
        assert_eq!(model.sub_channel(ChannelId::ROOT, 1), Some(ChannelId(1)));
        assert_eq!(model.sub_channel(ChannelId::ROOT, 2), None);
        assert_eq!(model.sub_channel(ChannelId(42), 0), None);
    }

    #[test]
    fn test_format_tree_lists_rows_in_order() {
        let model = lobby_model();
        model.add_player(Session(2), "Bob").unwrap();
        let dump = model.format_tree(&TreeFormatOptions::minimal());
        assert_eq!(dump, "Root\n├── Lobby\n│   └── Alice\n└── Bob\n");
    }
}
