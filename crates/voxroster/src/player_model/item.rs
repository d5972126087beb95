//! The shadow tree behind `PlayerModel`.
//!
//! Every channel and player visible in the view has exactly one
//! [`ModelItem`]. Items live in a generational arena; a [`ModelIndex`] carries
//! the item's [`ItemKey`] as its internal id, so an index that outlives its
//! item resolves to `None` instead of to whatever reused the slot.
//!
//! Two reverse maps (channel id → key, session → key) give O(1) lookup from
//! roster ids. The root item backs [`ChannelId::ROOT`] and is never removed.
//!
//! [`ModelIndex`]: crate::model::ModelIndex

use std::collections::HashMap;
use std::fmt::Write as _;

use slotmap::{Key, KeyData, SlotMap, new_key_type};
use voxroster_core::TreeFormatOptions;

use crate::roster::{ChannelId, PlayerFlags, Roster, Session};

new_key_type! {
    /// Handle of a shadow node.
    pub struct ItemKey;
}

impl ItemKey {
    /// Encodes the handle for `ModelIndex::internal_id`.
    pub fn to_internal_id(self) -> u64 {
        self.data().as_ffi()
    }

    /// Decodes a handle from `ModelIndex::internal_id`.
    pub fn from_internal_id(id: u64) -> Self {
        KeyData::from_ffi(id).into()
    }
}

/// What a shadow node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Channel(ChannelId),
    Player(Session),
}

/// A shadow node.
///
/// Child channels and child players are kept in two separate sequences,
/// each sorted by display name. Rows `[0, channels)` address the channels and
/// the rows after them address the players.
#[derive(Debug, Clone)]
pub struct ModelItem {
    kind: ItemKind,
    channels: Vec<ChannelId>,
    players: Vec<Session>,
}

impl ModelItem {
    fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            channels: Vec::new(),
            players: Vec::new(),
        }
    }

    /// The backing roster object.
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// The backing channel, if this node stands for one.
    pub fn channel(&self) -> Option<ChannelId> {
        match self.kind {
            ItemKind::Channel(id) => Some(id),
            ItemKind::Player(_) => None,
        }
    }

    /// The backing player, if this node stands for one.
    pub fn player(&self) -> Option<Session> {
        match self.kind {
            ItemKind::Player(session) => Some(session),
            ItemKind::Channel(_) => None,
        }
    }

    /// Child channels in row order.
    pub fn channels(&self) -> &[ChannelId] {
        &self.channels
    }

    /// Child players in row order.
    pub fn players(&self) -> &[Session] {
        &self.players
    }

    /// Number of rows below this node.
    pub fn row_count(&self) -> usize {
        self.channels.len() + self.players.len()
    }

    /// Returns `true` if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.channels.is_empty() && self.players.is_empty()
    }

    /// Row of a child channel. The last match wins when ids repeat.
    pub fn row_of_channel(&self, id: ChannelId) -> Option<usize> {
        self.channels.iter().rposition(|c| *c == id)
    }

    /// Row of a child player. The last match wins when ids repeat.
    pub fn row_of_player(&self, session: Session) -> Option<usize> {
        self.players
            .iter()
            .rposition(|s| *s == session)
            .map(|row| row + self.channels.len())
    }

    /// The roster object at `row`, or `None` out of range.
    pub fn child_at(&self, row: usize) -> Option<ItemKind> {
        if let Some(id) = self.channels.get(row) {
            return Some(ItemKind::Channel(*id));
        }
        row.checked_sub(self.channels.len())
            .and_then(|r| self.players.get(r))
            .map(|s| ItemKind::Player(*s))
    }
}

/// Row a new entry named `name` takes among `siblings`.
///
/// The name is added to a snapshot of the sibling names, the snapshot is
/// sorted, and the last position holding `name` is the answer. A duplicate
/// therefore lands after every existing entry of the same name.
///
/// Names compare by UTF-16 code units, which puts U+E000..=U+FFFF after
/// characters outside the basic plane, as other clients of the server sort.
fn insert_index<'a>(siblings: impl Iterator<Item = &'a str>, name: &'a str) -> usize {
    let mut names: Vec<&str> = siblings.collect();
    names.push(name);
    names.sort_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));
    names
        .iter()
        .rposition(|n| *n == name)
        .unwrap_or(names.len() - 1)
}

/// Arena of shadow nodes plus the id → node maps.
#[derive(Debug)]
pub struct ItemTree {
    nodes: SlotMap<ItemKey, ModelItem>,
    channels: HashMap<ChannelId, ItemKey>,
    players: HashMap<Session, ItemKey>,
    root: ItemKey,
}

impl Default for ItemTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemTree {
    /// Creates a tree holding only the root node.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(ModelItem::new(ItemKind::Channel(ChannelId::ROOT)));
        let mut channels = HashMap::new();
        channels.insert(ChannelId::ROOT, root);
        Self {
            nodes,
            channels,
            players: HashMap::new(),
            root,
        }
    }

    /// The root node.
    pub fn root(&self) -> ItemKey {
        self.root
    }

    /// Resolves a handle. Stale handles resolve to `None`.
    pub fn get(&self, key: ItemKey) -> Option<&ModelItem> {
        self.nodes.get(key)
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: the root node is permanent.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node of a channel.
    pub fn channel_key(&self, id: ChannelId) -> Option<ItemKey> {
        self.channels.get(&id).copied()
    }

    /// Node of a player.
    pub fn player_key(&self, session: Session) -> Option<ItemKey> {
        self.players.get(&session).copied()
    }

    /// Node of a roster object.
    pub fn key_of(&self, kind: ItemKind) -> Option<ItemKey> {
        match kind {
            ItemKind::Channel(id) => self.channel_key(id),
            ItemKind::Player(session) => self.player_key(session),
        }
    }

    /// Channels that currently have a node.
    pub fn registered_channels(&self) -> impl Iterator<Item = ChannelId> + '_ {
        self.channels.keys().copied()
    }

    /// Players that currently have a node.
    pub fn registered_players(&self) -> impl Iterator<Item = Session> + '_ {
        self.players.keys().copied()
    }

    // =========================================================================
    // Node lifecycle
    // =========================================================================

    /// Creates and registers the node of a channel.
    pub fn create_channel(&mut self, id: ChannelId) -> ItemKey {
        debug_assert!(
            !self.channels.contains_key(&id),
            "channel {id} already has a node"
        );
        let key = self.nodes.insert(ModelItem::new(ItemKind::Channel(id)));
        self.channels.insert(id, key);
        key
    }

    /// Creates and registers the node of a player.
    pub fn create_player(&mut self, session: Session) -> ItemKey {
        debug_assert!(
            !self.players.contains_key(&session),
            "player {session} already has a node"
        );
        let key = self.nodes.insert(ModelItem::new(ItemKind::Player(session)));
        self.players.insert(session, key);
        key
    }

    /// Unregisters and drops a node.
    ///
    /// The node must have no children left, and the root is never destroyed.
    pub fn destroy(&mut self, key: ItemKey) {
        if key == self.root {
            debug_assert!(false, "the root node is permanent");
            return;
        }
        let Some(item) = self.nodes.remove(key) else {
            return;
        };
        debug_assert!(item.is_leaf(), "destroying {:?} with children", item.kind);
        match item.kind {
            ItemKind::Channel(id) => {
                self.channels.remove(&id);
            }
            ItemKind::Player(session) => {
                self.players.remove(&session);
            }
        }
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Parent node, found through the roster's structural parent.
    ///
    /// `None` for the root and for objects whose parent has no node.
    pub fn parent(&self, key: ItemKey, roster: &Roster) -> Option<ItemKey> {
        let parent = match self.nodes.get(key)?.kind {
            ItemKind::Channel(id) => roster.channel(id)?.parent()?,
            ItemKind::Player(session) => roster.player(session)?.channel()?,
        };
        self.channel_key(parent)
    }

    /// Child node at `row`, or `None` out of range.
    pub fn child(&self, key: ItemKey, row: usize) -> Option<ItemKey> {
        let kind = self.nodes.get(key)?.child_at(row)?;
        self.key_of(kind)
    }

    /// Row of a node within its parent.
    pub fn row_of_self(&self, key: ItemKey, roster: &Roster) -> Option<usize> {
        let parent = self.nodes.get(self.parent(key, roster)?)?;
        match self.nodes.get(key)?.kind {
            ItemKind::Channel(id) => parent.row_of_channel(id),
            ItemKind::Player(session) => parent.row_of_player(session),
        }
    }

    /// Row a channel named `name` would take below `parent`.
    pub fn channel_insert_index(&self, parent: ItemKey, name: &str, roster: &Roster) -> usize {
        let Some(item) = self.nodes.get(parent) else {
            return 0;
        };
        let siblings = item
            .channels
            .iter()
            .map(|id| roster.channel(*id).map_or("", |c| c.name.as_str()));
        insert_index(siblings, name)
    }

    /// Row a player named `name` would take below `parent`, channels included.
    pub fn player_insert_index(&self, parent: ItemKey, name: &str, roster: &Roster) -> usize {
        let Some(item) = self.nodes.get(parent) else {
            return 0;
        };
        let siblings = item
            .players
            .iter()
            .map(|s| roster.player(*s).map_or("", |p| p.name.as_str()));
        item.channels.len() + insert_index(siblings, name)
    }

    /// Inserts a channel below `parent` at its sorted position.
    pub fn insert_channel(&mut self, parent: ItemKey, id: ChannelId, roster: &Roster) -> Option<usize> {
        let name = roster.channel(id).map_or("", |c| c.name.as_str());
        let row = self.channel_insert_index(parent, name, roster);
        self.nodes.get_mut(parent)?.channels.insert(row, id);
        Some(row)
    }

    /// Inserts a player below `parent` at its sorted position.
    pub fn insert_player(&mut self, parent: ItemKey, session: Session, roster: &Roster) -> Option<usize> {
        let name = roster.player(session).map_or("", |p| p.name.as_str());
        let row = self.player_insert_index(parent, name, roster);
        let item = self.nodes.get_mut(parent)?;
        item.players.insert(row - item.channels.len(), session);
        Some(row)
    }

    /// Removes every occurrence of a channel below `parent`.
    pub fn remove_channel(&mut self, parent: ItemKey, id: ChannelId) {
        if let Some(item) = self.nodes.get_mut(parent) {
            item.channels.retain(|c| *c != id);
        }
    }

    /// Removes every occurrence of a player below `parent`.
    pub fn remove_player(&mut self, parent: ItemKey, session: Session) {
        if let Some(item) = self.nodes.get_mut(parent) {
            item.players.retain(|s| *s != session);
        }
    }

    // =========================================================================
    // Debugging
    // =========================================================================

    /// Renders the tree below the root, one node per line.
    pub fn format(&self, roster: &Roster, options: &TreeFormatOptions) -> String {
        let mut out = String::new();
        self.format_node(&mut out, self.root, roster, options);
        out.push('\n');
        self.format_children(&mut out, self.root, roster, options, "", 0);
        out
    }

    fn format_children(
        &self,
        out: &mut String,
        key: ItemKey,
        roster: &Roster,
        options: &TreeFormatOptions,
        prefix: &str,
        depth: usize,
    ) {
        if options.max_depth.is_some_and(|max| depth >= max) {
            return;
        }
        let Some(item) = self.nodes.get(key) else {
            return;
        };

        let rows = item.row_count();
        for row in 0..rows {
            let Some(child) = self.child(key, row) else {
                continue;
            };
            let is_last = row + 1 == rows;
            out.push_str(prefix);
            out.push_str(options.style.branch(is_last));
            self.format_node(out, child, roster, options);
            out.push('\n');

            let next = format!(
                "{prefix}{}",
                options.style.continuation(is_last, options.indent_size)
            );
            self.format_children(out, child, roster, options, &next, depth + 1);
        }
    }

    fn format_node(&self, out: &mut String, key: ItemKey, roster: &Roster, options: &TreeFormatOptions) {
        let Some(item) = self.nodes.get(key) else {
            out.push_str("<stale>");
            return;
        };
        match item.kind {
            ItemKind::Channel(id) => {
                let name = roster.channel(id).map_or("?", |c| c.name.as_str());
                out.push_str(name);
                if options.show_ids {
                    let _ = write!(out, " [{id}]");
                }
            }
            ItemKind::Player(session) => {
                let player = roster.player(session);
                out.push_str(player.map_or("?", |p| p.name.as_str()));
                if options.show_ids {
                    let _ = write!(out, " (#{session})");
                }
                if options.show_state {
                    if let Some(player) = player {
                        let state = describe_flags(&player.flags);
                        if !state.is_empty() {
                            let _ = write!(out, " [{}]", state.join(", "));
                        }
                    }
                }
            }
        }
    }
}

fn describe_flags(flags: &PlayerFlags) -> Vec<&'static str> {
    [
        (flags.talking, "talking"),
        (flags.alt_speak, "alt"),
        (flags.mute, "mute"),
        (flags.deaf, "deaf"),
        (flags.self_mute, "self-mute"),
        (flags.self_deaf, "self-deaf"),
        (flags.local_mute, "local-mute"),
    ]
    .into_iter()
    .filter_map(|(set, label)| set.then_some(label))
    .collect()
}
