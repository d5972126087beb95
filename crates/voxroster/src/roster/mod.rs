//! The server's channel and player records.
//!
//! [`Roster`] owns every [`Channel`] and [`Player`] the client knows about,
//! the structural parent/child relations between them, and the symmetric
//! link relation between channels. It knows nothing about presentation;
//! `PlayerModel` drives it and mirrors it into a view model.
//!
//! # Example
//!
//! ```
//! use voxroster::roster::{ChannelId, Roster, Session};
//!
//! let mut roster = Roster::new();
//! roster.add_channel(ChannelId(1), "Games").unwrap();
//! roster.attach_channel(ChannelId(1), ChannelId::ROOT).unwrap();
//! roster.add_player(Session(7), "Alice").unwrap();
//! roster.attach_player(Session(7), ChannelId(1)).unwrap();
//!
//! assert_eq!(roster.player(Session(7)).and_then(|p| p.channel()), Some(ChannelId(1)));
//! ```

mod channel;
mod player;

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use voxroster_core::logging::targets;

use crate::error::{Result, RosterError};

pub use channel::Channel;
pub use player::{Player, PlayerFlags};

/// Server-assigned channel id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ChannelId(pub u32);

impl ChannelId {
    /// The implicit top-level channel, always present.
    pub const ROOT: ChannelId = ChannelId(0);

    /// Returns `true` for the root channel.
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-assigned player session id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Session(pub u16);

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owner of all channel and player records.
#[derive(Debug, Clone)]
pub struct Roster {
    channels: HashMap<ChannelId, Channel>,
    players: HashMap<Session, Player>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    /// Creates a roster holding only the root channel.
    pub fn new() -> Self {
        Self::with_root_name("Root")
    }

    /// Creates a roster whose root channel carries the given name.
    pub fn with_root_name(name: impl Into<String>) -> Self {
        let mut channels = HashMap::new();
        channels.insert(ChannelId::ROOT, Channel::new(ChannelId::ROOT, name));
        Self {
            channels,
            players: HashMap::new(),
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Gets a channel by id.
    pub fn channel(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.get(&id)
    }

    /// Gets a mutable channel by id.
    pub fn channel_mut(&mut self, id: ChannelId) -> Option<&mut Channel> {
        self.channels.get_mut(&id)
    }

    /// Gets a player by session.
    pub fn player(&self, session: Session) -> Option<&Player> {
        self.players.get(&session)
    }

    /// Gets a mutable player by session.
    pub fn player_mut(&mut self, session: Session) -> Option<&mut Player> {
        self.players.get_mut(&session)
    }

    /// Number of channels, root included.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// All channels, in no particular order.
    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    /// All players, in no particular order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    fn require_channel(&self, id: ChannelId) -> Result<&Channel> {
        self.channels.get(&id).ok_or(RosterError::UnknownChannel(id))
    }

    fn require_player(&self, session: Session) -> Result<&Player> {
        self.players
            .get(&session)
            .ok_or(RosterError::UnknownPlayer(session))
    }

    // =========================================================================
    // Records
    // =========================================================================

    /// Registers a new channel. It starts detached; see [`Roster::attach_channel`].
    pub fn add_channel(&mut self, id: ChannelId, name: impl Into<String>) -> Result<()> {
        if self.channels.contains_key(&id) {
            return Err(RosterError::DuplicateChannel(id));
        }
        let channel = Channel::new(id, name);
        tracing::debug!(target: targets::ROSTER, channel = %id, name = %channel.name, "channel added");
        self.channels.insert(id, channel);
        Ok(())
    }

    /// Drops a channel record, detaching it and removing all its links.
    ///
    /// Children still attached become detached.
    pub fn remove_channel(&mut self, id: ChannelId) -> Result<Channel> {
        if id.is_root() {
            return Err(RosterError::RootChannel("removed"));
        }
        self.require_channel(id)?;
        self.detach_channel(id)?;
        self.unlink(id, None)?;

        let channel = self
            .channels
            .remove(&id)
            .ok_or(RosterError::UnknownChannel(id))?;
        for child in &channel.channels {
            if let Some(child) = self.channels.get_mut(child) {
                child.parent = None;
            }
        }
        for session in &channel.players {
            if let Some(player) = self.players.get_mut(session) {
                player.channel = None;
            }
        }
        tracing::debug!(target: targets::ROSTER, channel = %id, "channel removed");
        Ok(channel)
    }

    /// Registers a new player. It starts outside any channel.
    pub fn add_player(&mut self, session: Session, name: impl Into<String>) -> Result<()> {
        if self.players.contains_key(&session) {
            return Err(RosterError::DuplicatePlayer(session));
        }
        let player = Player::new(session, name);
        tracing::debug!(target: targets::ROSTER, session = %session, name = %player.name, "player added");
        self.players.insert(session, player);
        Ok(())
    }

    /// Drops a player record, taking it out of its channel.
    pub fn remove_player(&mut self, session: Session) -> Result<Player> {
        self.detach_player(session)?;
        let player = self
            .players
            .remove(&session)
            .ok_or(RosterError::UnknownPlayer(session))?;
        tracing::debug!(target: targets::ROSTER, session = %session, "player removed");
        Ok(player)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Puts a player into a channel, leaving its previous channel first.
    pub fn attach_player(&mut self, session: Session, channel: ChannelId) -> Result<()> {
        self.require_channel(channel)?;
        self.detach_player(session)?;

        if let Some(player) = self.players.get_mut(&session) {
            player.channel = Some(channel);
        }
        if let Some(c) = self.channels.get_mut(&channel) {
            c.players.push(session);
        }
        Ok(())
    }

    /// Takes a player out of its channel, returning the channel it left.
    pub fn detach_player(&mut self, session: Session) -> Result<Option<ChannelId>> {
        let previous = self.require_player(session)?.channel;
        if let Some(previous) = previous {
            if let Some(c) = self.channels.get_mut(&previous) {
                c.remove_player(session);
            }
            if let Some(player) = self.players.get_mut(&session) {
                player.channel = None;
            }
        }
        Ok(previous)
    }

    /// Makes `child` a sub-channel of `parent`, leaving its previous parent first.
    pub fn attach_channel(&mut self, child: ChannelId, parent: ChannelId) -> Result<()> {
        if child.is_root() {
            return Err(RosterError::RootChannel("moved"));
        }
        self.require_channel(child)?;
        self.require_channel(parent)?;
        if parent == child || self.is_descendant(parent, child) {
            return Err(RosterError::CyclicMove {
                channel: child,
                parent,
            });
        }
        self.detach_channel(child)?;

        if let Some(c) = self.channels.get_mut(&child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.channels.get_mut(&parent) {
            p.channels.push(child);
        }
        Ok(())
    }

    /// Detaches a channel from its parent, returning the parent it left.
    pub fn detach_channel(&mut self, child: ChannelId) -> Result<Option<ChannelId>> {
        let previous = self.require_channel(child)?.parent;
        if let Some(previous) = previous {
            if let Some(p) = self.channels.get_mut(&previous) {
                p.remove_channel(child);
            }
            if let Some(c) = self.channels.get_mut(&child) {
                c.parent = None;
            }
        }
        Ok(previous)
    }

    /// Parent chain of a channel, immediate parent first.
    pub fn ancestors(&self, id: ChannelId) -> Vec<ChannelId> {
        let mut chain = Vec::new();
        let mut current = self.channels.get(&id).and_then(Channel::parent);
        while let Some(c) = current {
            // A parent cycle cannot be built through attach_channel; stop anyway.
            if chain.contains(&c) || c == id {
                break;
            }
            chain.push(c);
            current = self.channels.get(&c).and_then(Channel::parent);
        }
        chain
    }

    /// Returns `true` if `id` lies strictly below `ancestor`.
    pub fn is_descendant(&self, id: ChannelId, ancestor: ChannelId) -> bool {
        self.ancestors(id).contains(&ancestor)
    }

    // =========================================================================
    // Links
    // =========================================================================

    /// Links two channels. Links are symmetric; linking a channel to itself is a no-op.
    pub fn link(&mut self, a: ChannelId, b: ChannelId) -> Result<()> {
        self.require_channel(a)?;
        self.require_channel(b)?;
        if a == b {
            return Ok(());
        }
        if let Some(c) = self.channels.get_mut(&a) {
            c.links.insert(b);
        }
        if let Some(c) = self.channels.get_mut(&b) {
            c.links.insert(a);
        }
        tracing::debug!(target: targets::ROSTER, %a, %b, "channels linked");
        Ok(())
    }

    /// Removes the link between `a` and `other`, or every link of `a` when
    /// `other` is `None`.
    pub fn unlink(&mut self, a: ChannelId, other: Option<ChannelId>) -> Result<()> {
        let dropped: Vec<ChannelId> = match other {
            Some(b) => {
                self.require_channel(b)?;
                self.require_channel(a)?;
                vec![b]
            }
            None => self.require_channel(a)?.links.iter().copied().collect(),
        };

        for b in dropped {
            if let Some(c) = self.channels.get_mut(&a) {
                c.links.remove(&b);
            }
            if let Some(c) = self.channels.get_mut(&b) {
                c.links.remove(&a);
            }
            tracing::debug!(target: targets::ROSTER, %a, %b, "channels unlinked");
        }
        Ok(())
    }

    /// Every channel reachable from `id` over links, `id` itself included.
    ///
    /// Empty for an unknown channel.
    pub fn all_links(&self, id: ChannelId) -> BTreeSet<ChannelId> {
        let mut seen = BTreeSet::new();
        if !self.channels.contains_key(&id) {
            return seen;
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            if let Some(channel) = self.channels.get(&current) {
                stack.extend(channel.links.iter().copied().filter(|l| !seen.contains(l)));
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_with(ids: &[u32]) -> Roster {
        let mut roster = Roster::new();
        for &id in ids {
            roster.add_channel(ChannelId(id), format!("c{id}")).unwrap();
            roster.attach_channel(ChannelId(id), ChannelId::ROOT).unwrap();
        }
        roster
    }

    #[test]
    fn test_new_roster_has_root() {
        let roster = Roster::new();
        assert_eq!(roster.channel_count(), 1);
        assert_eq!(roster.channel(ChannelId::ROOT).map(|c| c.name.as_str()), Some("Root"));
        assert_eq!(roster.player_count(), 0);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut roster = roster_with(&[1]);
        assert_eq!(
            roster.add_channel(ChannelId(1), "again"),
            Err(RosterError::DuplicateChannel(ChannelId(1)))
        );
        roster.add_player(Session(2), "Bob").unwrap();
        assert_eq!(
            roster.add_player(Session(2), "Bob"),
            Err(RosterError::DuplicatePlayer(Session(2)))
        );
    }

    #[test]
    fn test_attach_player_moves_between_channels() {
        let mut roster = roster_with(&[1, 2]);
        roster.add_player(Session(1), "Alice").unwrap();
        roster.attach_player(Session(1), ChannelId(1)).unwrap();
        roster.attach_player(Session(1), ChannelId(2)).unwrap();

        assert!(roster.channel(ChannelId(1)).unwrap().players().is_empty());
        assert_eq!(roster.channel(ChannelId(2)).unwrap().players(), &[Session(1)]);
        assert_eq!(roster.detach_player(Session(1)), Ok(Some(ChannelId(2))));
        assert_eq!(roster.player(Session(1)).unwrap().channel(), None);
    }

    #[test]
    fn test_attach_channel_rejects_cycles_and_root() {
        let mut roster = roster_with(&[1]);
        roster.add_channel(ChannelId(2), "child").unwrap();
        roster.attach_channel(ChannelId(2), ChannelId(1)).unwrap();

        assert_eq!(
            roster.attach_channel(ChannelId(1), ChannelId(2)),
            Err(RosterError::CyclicMove {
                channel: ChannelId(1),
                parent: ChannelId(2)
            })
        );
        assert_eq!(
            roster.attach_channel(ChannelId::ROOT, ChannelId(1)),
            Err(RosterError::RootChannel("moved"))
        );
        assert_eq!(roster.ancestors(ChannelId(2)), vec![ChannelId(1), ChannelId::ROOT]);
    }

    #[test]
    fn test_all_links_is_transitive_and_includes_self() {
        let mut roster = roster_with(&[1, 2, 3, 4]);
        roster.link(ChannelId(1), ChannelId(2)).unwrap();
        roster.link(ChannelId(2), ChannelId(3)).unwrap();

        let expected: BTreeSet<_> = [1, 2, 3].into_iter().map(ChannelId).collect();
        assert_eq!(roster.all_links(ChannelId(1)), expected);
        assert_eq!(roster.all_links(ChannelId(3)), expected);
        assert_eq!(
            roster.all_links(ChannelId(4)),
            BTreeSet::from([ChannelId(4)])
        );
        assert!(roster.all_links(ChannelId(99)).is_empty());
    }

    #[test]
    fn test_unlink_one_and_all() {
        let mut roster = roster_with(&[1, 2, 3]);
        roster.link(ChannelId(1), ChannelId(2)).unwrap();
        roster.link(ChannelId(1), ChannelId(3)).unwrap();

        roster.unlink(ChannelId(1), Some(ChannelId(2))).unwrap();
        assert!(!roster.channel(ChannelId(2)).unwrap().is_linked(ChannelId(1)));
        assert!(roster.channel(ChannelId(3)).unwrap().is_linked(ChannelId(1)));

        roster.unlink(ChannelId(1), None).unwrap();
        assert!(roster.channel(ChannelId(1)).unwrap().links().is_empty());
        assert!(roster.channel(ChannelId(3)).unwrap().links().is_empty());
    }

    #[test]
    fn test_remove_channel_drops_links_and_membership() {
        let mut roster = roster_with(&[1, 2]);
        roster.link(ChannelId(1), ChannelId(2)).unwrap();
        roster.add_player(Session(5), "Eve").unwrap();
        roster.attach_player(Session(5), ChannelId(1)).unwrap();

        let removed = roster.remove_channel(ChannelId(1)).unwrap();
        assert_eq!(removed.players(), &[Session(5)]);
        assert_eq!(roster.player(Session(5)).unwrap().channel(), None);
        assert!(roster.channel(ChannelId(2)).unwrap().links().is_empty());
        assert!(!roster.channel(ChannelId::ROOT).unwrap().channels().contains(&ChannelId(1)));
        assert_eq!(
            roster.remove_channel(ChannelId::ROOT).unwrap_err(),
            RosterError::RootChannel("removed")
        );
    }
}
