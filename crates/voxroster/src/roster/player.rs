//! Player records.

use super::{ChannelId, Session};

/// Talk and mute/deaf state of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerFlags {
    /// Currently transmitting.
    pub talking: bool,
    /// Transmitting on the alternate (whisper/shout) path.
    pub alt_speak: bool,
    /// Muted by the server.
    pub mute: bool,
    /// Deafened by the server.
    pub deaf: bool,
    /// Muted by the player.
    pub self_mute: bool,
    /// Deafened by the player.
    pub self_deaf: bool,
    /// Muted locally by this client.
    pub local_mute: bool,
}

impl PlayerFlags {
    /// Returns a copy with the server mute flag set.
    pub fn with_mute(mut self, mute: bool) -> Self {
        self.mute = mute;
        self
    }

    /// Returns a copy with the server deaf flag set.
    pub fn with_deaf(mut self, deaf: bool) -> Self {
        self.deaf = deaf;
        self
    }

    /// Returns a copy with the self mute flag set.
    pub fn with_self_mute(mut self, self_mute: bool) -> Self {
        self.self_mute = self_mute;
        self
    }

    /// Returns a copy with the self deaf flag set.
    pub fn with_self_deaf(mut self, self_deaf: bool) -> Self {
        self.self_deaf = self_deaf;
        self
    }

    /// Returns a copy with the local mute flag set.
    pub fn with_local_mute(mut self, local_mute: bool) -> Self {
        self.local_mute = local_mute;
        self
    }

    /// Copies the mute/deaf flags of `other`, keeping the talk state.
    pub fn with_mute_deaf_of(mut self, other: PlayerFlags) -> Self {
        self.mute = other.mute;
        self.deaf = other.deaf;
        self.self_mute = other.self_mute;
        self.self_deaf = other.self_deaf;
        self.local_mute = other.local_mute;
        self
    }
}

/// A player connected to the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    session: Session,
    /// Display name.
    pub name: String,
    pub(crate) channel: Option<ChannelId>,
    /// Talk and mute/deaf state.
    pub flags: PlayerFlags,
    /// Registered user id, when the player authenticated.
    pub identity: Option<u32>,
}

impl Player {
    /// Creates a player that is not yet in any channel.
    pub fn new(session: Session, name: impl Into<String>) -> Self {
        Self {
            session,
            name: name.into(),
            channel: None,
            flags: PlayerFlags::default(),
            identity: None,
        }
    }

    /// The session id.
    pub fn session(&self) -> Session {
        self.session
    }

    /// The channel the player is in, if any.
    pub fn channel(&self) -> Option<ChannelId> {
        self.channel
    }

    /// Returns `true` if the player authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}
