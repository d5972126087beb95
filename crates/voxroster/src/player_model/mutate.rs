//! Structural changes of [`PlayerModel`].
//!
//! Every visible change goes through one of four primitives: `show_player`,
//! `hide_player`, `show_channel` and `hide_channel`. Each computes the
//! affected parent index and row under a read lock, emits the begin signal,
//! updates roster membership and the shadow tree in one write-locked step,
//! then emits the end signal after the lock is gone. Moves and renames are a
//! hide followed by a show, so the row lands at its new sorted position.

use voxroster_core::logging::targets;

use super::{FLAGS_COLUMN, ModelState, NAME_COLUMN, PlayerModel, index_for_key};
use crate::error::{Result, RosterError};
use crate::model::{ItemRole, ModelIndex};
use crate::roster::{ChannelId, Player, PlayerFlags, Session};

impl PlayerModel {
    // =========================================================================
    // Players
    // =========================================================================

    /// Adds a player and shows it in the root channel.
    pub fn add_player(&self, session: Session, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        {
            let mut state = self.state.write();
            state.roster.add_player(session, name.as_str())?;
            state.tree.create_player(session);
        }
        tracing::debug!(target: targets::PLAYER_MODEL, %session, %name, "player added");
        self.show_player(session, ChannelId::ROOT);
        Ok(())
    }

    /// Hides and forgets a player.
    pub fn remove_player(&self, session: Session) -> Result<()> {
        self.require_player(session)?;
        self.hide_player(session);

        let mut state = self.state.write();
        state.roster.remove_player(session)?;
        if let Some(key) = state.tree.player_key(session) {
            state.tree.destroy(key);
        }
        tracing::debug!(target: targets::PLAYER_MODEL, %session, "player removed");
        Ok(())
    }

    /// Moves a player into another channel.
    pub fn move_player(&self, session: Session, channel: ChannelId) -> Result<()> {
        self.require_player(session)?;
        self.require_channel(channel)?;
        tracing::debug!(target: targets::PLAYER_MODEL, %session, %channel, "moving player");
        self.hide_player(session);
        self.show_player(session, channel);
        Ok(())
    }

    /// Renames a player, re-sorting it among its siblings.
    pub fn rename_player(&self, session: Session, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        let channel = self.require_player(session)?;
        self.hide_player(session);
        if let Some(player) = self.state.write().roster.player_mut(session) {
            player.name = name;
        }
        self.show_player(session, channel.unwrap_or(ChannelId::ROOT));
        Ok(())
    }

    /// Updates the talk state of a player.
    pub fn set_player_talking(&self, session: Session, talking: bool, alt_speak: bool) -> Result<()> {
        let index = {
            let mut state = self.state.write();
            let player = state
                .roster
                .player_mut(session)
                .ok_or(RosterError::UnknownPlayer(session))?;
            player.flags.talking = talking;
            player.flags.alt_speak = alt_speak;
            player_index(&state, session, NAME_COLUMN)
        };
        tracing::trace!(target: targets::PLAYER_MODEL, %session, talking, alt_speak, "talk state");

        if index.is_valid() {
            self.signals
                .emit_data_changed_single(index, vec![ItemRole::Decoration]);
        }
        self.update_overlay();
        Ok(())
    }

    /// Updates the mute/deaf state and registration of a player.
    ///
    /// The talk state in `flags` is ignored; see [`Self::set_player_talking`].
    pub fn set_player_state(
        &self,
        session: Session,
        flags: PlayerFlags,
        identity: Option<u32>,
    ) -> Result<()> {
        let index = {
            let mut state = self.state.write();
            let player = state
                .roster
                .player_mut(session)
                .ok_or(RosterError::UnknownPlayer(session))?;
            player.flags = player.flags.with_mute_deaf_of(flags);
            player.identity = identity;
            player_index(&state, session, FLAGS_COLUMN)
        };
        tracing::debug!(target: targets::PLAYER_MODEL, %session, ?flags, ?identity, "player state");

        if index.is_valid() {
            self.signals
                .emit_data_changed_single(index, vec![ItemRole::Display]);
        }
        Ok(())
    }

    // =========================================================================
    // Channels
    // =========================================================================

    /// Adds a channel below `parent`.
    pub fn add_channel(&self, id: ChannelId, parent: ChannelId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.require_channel(parent)?;
        {
            let mut state = self.state.write();
            state.roster.add_channel(id, name.as_str())?;
            state.tree.create_channel(id);
        }
        tracing::debug!(target: targets::PLAYER_MODEL, channel = %id, %parent, %name, "channel added");
        self.show_channel(id, parent);
        Ok(())
    }

    /// Removes a channel together with everything below it.
    ///
    /// Sub-channels go first, deepest first, then the channel's players.
    pub fn remove_channel(&self, id: ChannelId) -> Result<()> {
        if id.is_root() {
            return Err(RosterError::RootChannel("removed"));
        }
        let (channels, players) = {
            let state = self.state.read();
            let key = state
                .tree
                .channel_key(id)
                .ok_or(RosterError::UnknownChannel(id))?;
            let item = state.tree.get(key).ok_or(RosterError::UnknownChannel(id))?;
            (item.channels().to_vec(), item.players().to_vec())
        };

        for child in channels {
            self.remove_channel(child)?;
        }
        for session in players {
            self.remove_player(session)?;
        }
        self.hide_channel(id);

        let mut state = self.state.write();
        state.roster.remove_channel(id)?;
        if let Some(key) = state.tree.channel_key(id) {
            state.tree.destroy(key);
        }
        tracing::debug!(target: targets::PLAYER_MODEL, channel = %id, "channel removed");
        Ok(())
    }

    /// Re-parents a channel.
    ///
    /// Fails without touching the model if `parent` is the channel itself or
    /// lies below it.
    pub fn move_channel(&self, id: ChannelId, parent: ChannelId) -> Result<()> {
        if id.is_root() {
            return Err(RosterError::RootChannel("moved"));
        }
        self.require_channel(id)?;
        self.require_channel(parent)?;
        let cyclic = self.with_roster(|roster| parent == id || roster.is_descendant(parent, id));
        if cyclic {
            return Err(RosterError::CyclicMove { channel: id, parent });
        }

        tracing::debug!(target: targets::PLAYER_MODEL, channel = %id, %parent, "moving channel");
        self.hide_channel(id);
        self.show_channel(id, parent);
        Ok(())
    }

    /// Renames a channel, re-sorting it among its siblings.
    pub fn rename_channel(&self, id: ChannelId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        let parent = self.require_channel(id)?;
        let Some(parent) = parent else {
            // The root is never a row; renaming it changes nothing visible.
            if let Some(channel) = self.state.write().roster.channel_mut(id) {
                channel.name = name;
            }
            return Ok(());
        };

        self.hide_channel(id);
        if let Some(channel) = self.state.write().roster.channel_mut(id) {
            channel.name = name;
        }
        self.show_channel(id, parent);
        Ok(())
    }

    /// Links `id` with each of `links`. Nothing is linked unless every id is known.
    pub fn link_channels(&self, id: ChannelId, links: &[ChannelId]) -> Result<()> {
        {
            let mut state = self.state.write();
            known_channels(&state, id, links)?;
            for &other in links {
                state.roster.link(id, other)?;
            }
        }
        self.recheck_links();
        Ok(())
    }

    /// Removes the links between `id` and each of `links`. Nothing is unlinked
    /// unless every id is known.
    pub fn unlink_channels(&self, id: ChannelId, links: &[ChannelId]) -> Result<()> {
        {
            let mut state = self.state.write();
            known_channels(&state, id, links)?;
            for &other in links {
                state.roster.unlink(id, Some(other))?;
            }
        }
        self.recheck_links();
        Ok(())
    }

    /// Removes every link of `id`.
    pub fn unlink_all(&self, id: ChannelId) -> Result<()> {
        self.state.write().roster.unlink(id, None)?;
        self.recheck_links();
        Ok(())
    }

    /// Removes every channel and player, leaving the root channel.
    pub fn remove_all(&self) -> Result<()> {
        while let Some(id) = self.child_channels(ChannelId::ROOT).first().copied() {
            self.remove_channel(id)?;
        }
        while let Some(session) = self.child_players(ChannelId::ROOT).first().copied() {
            self.remove_player(session)?;
        }
        self.state.write().linked.clear();
        tracing::debug!(target: targets::PLAYER_MODEL, "model cleared");
        Ok(())
    }

    // =========================================================================
    // Local player
    // =========================================================================

    /// Expands the view along the path to the local player, then refreshes
    /// link decoration.
    pub fn ensure_self_visible(&self) {
        let view = self.context.read().view.clone();
        if let (Some(view), Some(local)) = (view, self.local_session()) {
            let path: Vec<ModelIndex> = {
                let state = self.state.read();
                let home = state.roster.player(local).and_then(Player::channel);
                let mut chain: Vec<ChannelId> = home
                    .map(|home| {
                        let mut chain = state.roster.ancestors(home);
                        chain.insert(0, home);
                        chain
                    })
                    .unwrap_or_default();
                chain.reverse();
                chain
                    .into_iter()
                    .filter_map(|id| state.tree.channel_key(id))
                    .map(|key| index_for_key(&state, key, NAME_COLUMN))
                    .filter(ModelIndex::is_valid)
                    .collect()
            };
            for index in &path {
                view.set_expanded(index, true);
            }
        }
        self.recheck_links();
    }

    /// Recomputes the link closure of the local player's channel and
    /// refreshes the decoration of every channel that entered or left it.
    pub fn recheck_links(&self) {
        let local = self.local_session();
        let changed: Vec<ModelIndex> = {
            let mut state = self.state.write();
            let home = local
                .and_then(|session| state.roster.player(session))
                .and_then(Player::channel);
            let linked = home
                .map(|home| state.roster.all_links(home))
                .unwrap_or_default();
            if linked == state.linked {
                return;
            }

            let changed: Vec<ChannelId> = state
                .linked
                .symmetric_difference(&linked)
                .copied()
                .collect();
            state.linked = linked;
            changed
                .into_iter()
                .filter_map(|id| state.tree.channel_key(id))
                .map(|key| index_for_key(&state, key, NAME_COLUMN))
                .filter(ModelIndex::is_valid)
                .collect()
        };
        tracing::debug!(target: targets::PLAYER_MODEL, changed = changed.len(), "link decoration changed");

        for index in changed {
            self.signals
                .emit_data_changed_single(index, vec![ItemRole::Decoration]);
        }
        self.update_overlay();
    }

    /// Pushes the players sharing the local player's channel to the overlay.
    pub fn update_overlay(&self) {
        let Some(overlay) = self.context.read().overlay.clone() else {
            return;
        };
        let players: Vec<Player> = {
            let state = self.state.read();
            let home = self
                .local_session()
                .and_then(|session| state.roster.player(session))
                .and_then(Player::channel);
            home.and_then(|home| state.tree.channel_key(home))
                .and_then(|key| state.tree.get(key))
                .map(|item| {
                    item.players()
                        .iter()
                        .filter_map(|s| state.roster.player(*s).cloned())
                        .collect()
                })
                .unwrap_or_default()
        };
        overlay.set_players(&players);
    }

    // =========================================================================
    // Primitives
    // =========================================================================

    fn show_player(&self, session: Session, channel: ChannelId) {
        let bracket = {
            let state = self.state.read();
            state.tree.channel_key(channel).zip(state.roster.player(session)).map(
                |(parent, player)| {
                    let row = state
                        .tree
                        .player_insert_index(parent, &player.name, &state.roster);
                    (parent, index_for_key(&state, parent, NAME_COLUMN), row)
                },
            )
        };
        let Some((parent, parent_index, row)) = bracket else {
            tracing::warn!(target: targets::PLAYER_MODEL, %session, %channel, "cannot show player");
            return;
        };

        tracing::trace!(target: targets::PLAYER_MODEL, %session, %channel, row, "inserting player row");
        self.signals.emit_rows_inserted(parent_index, row, row, || {
            let mut state = self.state.write();
            let ModelState { roster, tree, .. } = &mut *state;
            if let Err(err) = roster.attach_player(session, channel) {
                tracing::warn!(target: targets::PLAYER_MODEL, %err, "attach failed");
            }
            let inserted = tree.insert_player(parent, session, roster);
            debug_assert_eq!(inserted, Some(row));
        });

        if self.shares_local_channel(channel) {
            self.update_overlay();
        }
        self.ensure_self_visible();
    }

    fn hide_player(&self, session: Session) {
        let bracket = {
            let state = self.state.read();
            let channel = state.roster.player(session).and_then(Player::channel);
            channel.and_then(|channel| {
                let parent = state.tree.channel_key(channel)?;
                let row = state.tree.get(parent)?.row_of_player(session)?;
                Some((
                    channel,
                    parent,
                    index_for_key(&state, parent, NAME_COLUMN),
                    row,
                    player_index(&state, session, NAME_COLUMN),
                ))
            })
        };
        let Some((channel, parent, parent_index, row, index)) = bracket else {
            return;
        };
        let shared = self.shares_local_channel(channel);

        self.clear_view_state(&index);
        tracing::trace!(target: targets::PLAYER_MODEL, %session, %channel, row, "removing player row");
        self.signals.emit_rows_removed(parent_index, row, row, || {
            let mut state = self.state.write();
            if let Err(err) = state.roster.detach_player(session) {
                tracing::warn!(target: targets::PLAYER_MODEL, %err, "detach failed");
            }
            state.tree.remove_player(parent, session);
        });

        if shared {
            self.update_overlay();
        }
    }

    fn show_channel(&self, id: ChannelId, parent: ChannelId) {
        let bracket = {
            let state = self.state.read();
            state
                .tree
                .channel_key(parent)
                .zip(state.roster.channel(id))
                .map(|(parent_key, channel)| {
                    let row = state
                        .tree
                        .channel_insert_index(parent_key, &channel.name, &state.roster);
                    (parent_key, index_for_key(&state, parent_key, NAME_COLUMN), row)
                })
        };
        let Some((parent_key, parent_index, row)) = bracket else {
            tracing::warn!(target: targets::PLAYER_MODEL, channel = %id, %parent, "cannot show channel");
            return;
        };

        tracing::trace!(target: targets::PLAYER_MODEL, channel = %id, %parent, row, "inserting channel row");
        self.signals.emit_rows_inserted(parent_index, row, row, || {
            let mut state = self.state.write();
            let ModelState { roster, tree, .. } = &mut *state;
            if let Err(err) = roster.attach_channel(id, parent) {
                tracing::warn!(target: targets::PLAYER_MODEL, %err, "attach failed");
            }
            let inserted = tree.insert_channel(parent_key, id, roster);
            debug_assert_eq!(inserted, Some(row));
        });

        self.ensure_self_visible();
    }

    fn hide_channel(&self, id: ChannelId) {
        let bracket = {
            let state = self.state.read();
            let parent = state.roster.channel(id).and_then(|c| c.parent());
            parent.and_then(|parent| {
                let parent_key = state.tree.channel_key(parent)?;
                let row = state.tree.get(parent_key)?.row_of_channel(id)?;
                let key = state.tree.channel_key(id)?;
                Some((
                    parent_key,
                    index_for_key(&state, parent_key, NAME_COLUMN),
                    row,
                    index_for_key(&state, key, NAME_COLUMN),
                ))
            })
        };
        let Some((parent_key, parent_index, row, index)) = bracket else {
            return;
        };

        self.clear_view_state(&index);
        tracing::trace!(target: targets::PLAYER_MODEL, channel = %id, row, "removing channel row");
        self.signals.emit_rows_removed(parent_index, row, row, || {
            let mut state = self.state.write();
            state.linked.remove(&id);
            if let Err(err) = state.roster.detach_channel(id) {
                tracing::warn!(target: targets::PLAYER_MODEL, %err, "detach failed");
            }
            state.tree.remove_channel(parent_key, id);
        });
    }

    /// Drops selection and current index if they point at a row about to go.
    ///
    /// Views tend to keep dangling current indices across a removal.
    fn clear_view_state(&self, index: &ModelIndex) {
        let Some(view) = self.context.read().view.clone() else {
            return;
        };
        // Stored indices keep the row they were taken at; match the item instead.
        let current = view.current_index();
        let is_current = current.is_valid() && current.internal_id() == index.internal_id();
        if view.is_selected(index) || is_current {
            view.clear_selection();
            view.set_current_index(ModelIndex::invalid());
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Returns `true` if the local player sits in `channel`.
    fn shares_local_channel(&self, channel: ChannelId) -> bool {
        let Some(local) = self.local_session() else {
            return false;
        };
        self.state
            .read()
            .roster
            .player(local)
            .and_then(Player::channel)
            == Some(channel)
    }

    /// Checks a player exists and has a node; returns its channel.
    fn require_player(&self, session: Session) -> Result<Option<ChannelId>> {
        let state = self.state.read();
        let player = state
            .roster
            .player(session)
            .ok_or(RosterError::UnknownPlayer(session))?;
        state
            .tree
            .player_key(session)
            .ok_or(RosterError::UnknownPlayer(session))?;
        Ok(player.channel())
    }

    /// Checks a channel exists and has a node; returns its parent.
    fn require_channel(&self, id: ChannelId) -> Result<Option<ChannelId>> {
        let state = self.state.read();
        let channel = state
            .roster
            .channel(id)
            .ok_or(RosterError::UnknownChannel(id))?;
        state
            .tree
            .channel_key(id)
            .ok_or(RosterError::UnknownChannel(id))?;
        Ok(channel.parent())
    }
}

fn known_channels(state: &ModelState, id: ChannelId, others: &[ChannelId]) -> Result<()> {
    for &channel in std::iter::once(&id).chain(others) {
        if state.roster.channel(channel).is_none() {
            return Err(RosterError::UnknownChannel(channel));
        }
    }
    Ok(())
}

fn player_index(state: &ModelState, session: Session, column: usize) -> ModelIndex {
    state
        .tree
        .player_key(session)
        .map_or_else(ModelIndex::invalid, |key| index_for_key(state, key, column))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::context::{Overlay, SessionContext};
    use crate::model::{ItemModel, TreeViewState};

    #[derive(Default)]
    struct RecordingOverlay(Mutex<Vec<Vec<String>>>);

    impl Overlay for RecordingOverlay {
        fn set_players(&self, players: &[Player]) {
            self.0
                .lock()
                .push(players.iter().map(|p| p.name.clone()).collect());
        }
    }

    fn model_with(context: SessionContext) -> PlayerModel {
        let model = PlayerModel::new(context);
        model.add_channel(ChannelId(1), ChannelId::ROOT, "Lobby").unwrap();
        model.add_channel(ChannelId(2), ChannelId::ROOT, "Games").unwrap();
        model.add_channel(ChannelId(3), ChannelId(2), "Chess").unwrap();
        model
    }

    #[test]
    fn test_players_sorted_after_channels() {
        let model = model_with(SessionContext::new());
        model.add_player(Session(1), "zoe").unwrap();
        model.add_player(Session(2), "Adam").unwrap();

        assert_eq!(model.child_players(ChannelId::ROOT), vec![Session(2), Session(1)]);
        assert_eq!(model.index_of_player(Session(2), 0).row(), 2);
        assert_eq!(model.index_of_player(Session(1), 0).row(), 3);
    }

    #[test]
    fn test_move_player_keeps_state() {
        let model = model_with(SessionContext::new());
        model.add_player(Session(1), "Alice").unwrap();
        model
            .set_player_state(Session(1), PlayerFlags::default().with_mute(true), None)
            .unwrap();
        model.move_player(Session(1), ChannelId(3)).unwrap();

        let player = model.player(Session(1)).unwrap();
        assert_eq!(player.channel(), Some(ChannelId(3)));
        assert!(player.flags.mute);
        assert!(model.child_players(ChannelId::ROOT).is_empty());
        assert_eq!(model.child_players(ChannelId(3)), vec![Session(1)]);
    }

    #[test]
    fn test_rename_resorts() {
        let model = model_with(SessionContext::new());
        model.rename_channel(ChannelId(1), "Arcade").unwrap();
        assert_eq!(
            model.child_channels(ChannelId::ROOT),
            vec![ChannelId(1), ChannelId(2)]
        );

        model.add_player(Session(1), "b").unwrap();
        model.add_player(Session(2), "c").unwrap();
        model.rename_player(Session(2), "a").unwrap();
        assert_eq!(model.child_players(ChannelId::ROOT), vec![Session(2), Session(1)]);
    }

    #[test]
    fn test_remove_channel_takes_subtree() {
        let model = model_with(SessionContext::new());
        model.add_player(Session(1), "Alice").unwrap();
        model.move_player(Session(1), ChannelId(3)).unwrap();

        model.remove_channel(ChannelId(2)).unwrap();
        assert!(model.channel(ChannelId(3)).is_none());
        assert!(model.player(Session(1)).is_none());
        assert_eq!(
            model.shown_channels().into_iter().collect::<Vec<_>>(),
            vec![ChannelId::ROOT, ChannelId(1)]
        );
        assert!(model.shown_players().is_empty());
    }

    #[test]
    fn test_rejected_mutations() {
        let model = model_with(SessionContext::new());
        assert_eq!(
            model.remove_channel(ChannelId::ROOT),
            Err(RosterError::RootChannel("removed"))
        );
        assert_eq!(
            model.move_channel(ChannelId(2), ChannelId(3)),
            Err(RosterError::CyclicMove {
                channel: ChannelId(2),
                parent: ChannelId(3)
            })
        );
        assert_eq!(
            model.move_player(Session(9), ChannelId(1)),
            Err(RosterError::UnknownPlayer(Session(9)))
        );
        assert_eq!(
            model.add_channel(ChannelId(1), ChannelId::ROOT, "Again"),
            Err(RosterError::DuplicateChannel(ChannelId(1)))
        );
        // Still intact after the rejected cyclic move.
        assert_eq!(model.child_channels(ChannelId(2)), vec![ChannelId(3)]);
    }

    #[test]
    fn test_links_follow_local_channel() {
        let model = model_with(SessionContext::new());
        model.add_player(Session(1), "Me").unwrap();
        model.move_player(Session(1), ChannelId(1)).unwrap();
        model.link_channels(ChannelId(1), &[ChannelId(3)]).unwrap();
        assert!(model.linked_channels().is_empty());

        model.set_local_session(Some(Session(1)));
        assert_eq!(
            model.linked_channels().into_iter().collect::<Vec<_>>(),
            vec![ChannelId(1), ChannelId(3)]
        );

        let changes = Arc::new(Mutex::new(0));
        let counter = changes.clone();
        model
            .signals()
            .data_changed
            .connect(move |_| *counter.lock() += 1);
        model.recheck_links();
        assert_eq!(*changes.lock(), 0);

        model.unlink_all(ChannelId(1)).unwrap();
        assert_eq!(*changes.lock(), 1);
        assert_eq!(
            model.linked_channels().into_iter().collect::<Vec<_>>(),
            vec![ChannelId(1)]
        );
    }

    #[test]
    fn test_overlay_tracks_local_channel() {
        let overlay = Arc::new(RecordingOverlay::default());
        let model = model_with(
            SessionContext::new()
                .with_local_session(Session(1))
                .with_overlay(overlay.clone()),
        );
        model.add_player(Session(1), "Me").unwrap();
        model.add_player(Session(2), "Bob").unwrap();
        model.move_player(Session(1), ChannelId(1)).unwrap();
        model.move_player(Session(2), ChannelId(1)).unwrap();

        let last = overlay.0.lock().last().cloned().unwrap();
        assert_eq!(last, vec!["Bob".to_string(), "Me".to_string()]);

        model.move_player(Session(2), ChannelId(3)).unwrap();
        let last = overlay.0.lock().last().cloned().unwrap();
        assert_eq!(last, vec!["Me".to_string()]);
    }

    #[test]
    fn test_view_expands_path_and_drops_selection() {
        let view = Arc::new(TreeViewState::new());
        let model = model_with(
            SessionContext::new()
                .with_local_session(Session(1))
                .with_view(view.clone()),
        );
        model.add_player(Session(1), "Me").unwrap();
        model.move_player(Session(1), ChannelId(3)).unwrap();
        assert!(view.is_expanded(&model.index_of_channel(ChannelId(2))));
        assert!(view.is_expanded(&model.index_of_channel(ChannelId(3))));

        model.add_player(Session(2), "Bob").unwrap();
        let bob = model.index_of_player(Session(2), 0);
        view.select_current(bob.clone());
        model.remove_player(Session(2)).unwrap();
        assert!(!view.current_index().is_valid());
        assert!(!view.is_selected(&bob));
    }

    #[test]
    fn test_removed_row_clears_stale_current_index() {
        let view = Arc::new(TreeViewState::new());
        let model = model_with(SessionContext::new().with_view(view.clone()));
        model.add_player(Session(2), "Bob").unwrap();
        view.set_current_index(model.index_of_player(Session(2), 0));

        // Aaron sorts first, so the stored index now names the wrong row.
        model.add_player(Session(3), "Aaron").unwrap();
        assert_ne!(view.current_index(), model.index_of_player(Session(2), 0));

        model.remove_player(Session(2)).unwrap();
        assert!(!view.current_index().is_valid());
    }

    #[test]
    fn test_current_index_of_other_row_survives_removal() {
        let view = Arc::new(TreeViewState::new());
        let model = model_with(SessionContext::new().with_view(view.clone()));
        model.add_player(Session(2), "Bob").unwrap();
        model.add_player(Session(3), "Carol").unwrap();
        let carol = model.index_of_player(Session(3), 0);
        view.set_current_index(carol.clone());

        model.remove_player(Session(2)).unwrap();
        assert_eq!(view.current_index().internal_id(), carol.internal_id());
    }

    #[test]
    fn test_link_with_unknown_channel_changes_nothing() {
        let model = model_with(SessionContext::new().with_local_session(Session(1)));
        model.add_player(Session(1), "Me").unwrap();
        model.move_player(Session(1), ChannelId(1)).unwrap();

        let err = model.link_channels(ChannelId(1), &[ChannelId(2), ChannelId(99)]);
        assert!(matches!(err, Err(RosterError::UnknownChannel(ChannelId(99)))));
        assert!(model.channel(ChannelId(1)).unwrap().links().is_empty());
        assert_eq!(
            model.linked_channels(),
            model.with_roster(|roster| roster.all_links(ChannelId(1)))
        );

        model.link_channels(ChannelId(1), &[ChannelId(2)]).unwrap();
        let err = model.unlink_channels(ChannelId(1), &[ChannelId(2), ChannelId(99)]);
        assert!(err.is_err());
        assert_eq!(
            model.linked_channels().into_iter().collect::<Vec<_>>(),
            vec![ChannelId(1), ChannelId(2)]
        );
    }

    #[test]
    fn test_remove_all() {
        let model = model_with(SessionContext::new().with_local_session(Session(1)));
        model.add_player(Session(1), "Me").unwrap();
        model.add_player(Session(2), "Bob").unwrap();
        model.move_player(Session(2), ChannelId(3)).unwrap();

        model.remove_all().unwrap();
        assert_eq!(model.row_count(&ModelIndex::invalid()), 0);
        assert_eq!(model.shown_channels().len(), 1);
        assert!(model.linked_channels().is_empty());
        assert_eq!(model.with_roster(|r| r.player_count()), 0);
    }
}
