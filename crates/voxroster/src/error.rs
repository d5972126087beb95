//! Error types for roster mutations, drag payloads and configuration.

use std::path::PathBuf;

use crate::roster::{ChannelId, Session};

/// Result type alias for roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;

/// Errors raised by id-based roster and model entry points.
///
/// Ids arrive from the network, so an unknown or duplicate id is a runtime
/// condition the caller handles, not a programming error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    /// No channel with this id exists.
    #[error("unknown channel {0}")]
    UnknownChannel(ChannelId),

    /// No player with this session exists.
    #[error("unknown player session {0}")]
    UnknownPlayer(Session),

    /// A channel with this id already exists.
    #[error("channel {0} already exists")]
    DuplicateChannel(ChannelId),

    /// A player with this session already exists.
    #[error("player session {0} already exists")]
    DuplicatePlayer(Session),

    /// The root channel cannot be removed, moved or renamed away.
    #[error("the root channel cannot be {0}")]
    RootChannel(&'static str),

    /// Moving the channel would make it its own ancestor.
    #[error("cannot move channel {channel} under its descendant {parent}")]
    CyclicMove { channel: ChannelId, parent: ChannelId },
}

/// Errors decoding a drag payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DragError {
    /// The drag data does not carry the expected MIME format.
    #[error("drag data has no '{0}' entry")]
    MissingFormat(String),

    /// The payload ended inside a record.
    #[error("drag payload truncated: needed {needed} more bytes, {remaining} left")]
    Truncated { needed: usize, remaining: usize },
}

/// Errors loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("failed to access config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parse error.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
