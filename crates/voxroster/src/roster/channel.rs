//! Channel records.

use std::collections::BTreeSet;

use super::{ChannelId, Session};

/// A channel on the server.
///
/// Child lists keep arrival order; sorted presentation is the model's job.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    id: ChannelId,
    /// Display name.
    pub name: String,
    pub(crate) parent: Option<ChannelId>,
    pub(crate) channels: Vec<ChannelId>,
    pub(crate) players: Vec<Session>,
    pub(crate) links: BTreeSet<ChannelId>,
}

impl Channel {
    /// Creates a channel with no parent, children or links.
    pub fn new(id: ChannelId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent: None,
            channels: Vec::new(),
            players: Vec::new(),
            links: BTreeSet::new(),
        }
    }

    /// The channel id.
    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// The parent channel, `None` for the root and for detached channels.
    pub fn parent(&self) -> Option<ChannelId> {
        self.parent
    }

    /// Sub-channels, in the order they were attached.
    pub fn channels(&self) -> &[ChannelId] {
        &self.channels
    }

    /// Players in this channel, in the order they joined.
    pub fn players(&self) -> &[Session] {
        &self.players
    }

    /// Channels directly linked to this one.
    pub fn links(&self) -> &BTreeSet<ChannelId> {
        &self.links
    }

    /// Returns `true` if `other` is directly linked.
    pub fn is_linked(&self, other: ChannelId) -> bool {
        self.links.contains(&other)
    }

    pub(crate) fn remove_player(&mut self, session: Session) {
        self.players.retain(|s| *s != session);
    }

    pub(crate) fn remove_channel(&mut self, id: ChannelId) {
        self.channels.retain(|c| *c != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_channel_is_empty() {
        let channel = Channel::new(ChannelId(5), "Games");
        assert_eq!(channel.id(), ChannelId(5));
        assert_eq!(channel.parent(), None);
        assert!(channel.channels().is_empty());
        assert!(channel.players().is_empty());
        assert!(channel.links().is_empty());
    }

    #[test]
    fn test_remove_children() {
        let mut channel = Channel::new(ChannelId(1), "A");
        channel.players.extend([Session(1), Session(2)]);
        channel.channels.push(ChannelId(9));

        channel.remove_player(Session(1));
        channel.remove_channel(ChannelId(9));
        assert_eq!(channel.players(), &[Session(2)]);
        assert!(channel.channels().is_empty());
    }
}
