//! Roster presentation settings.
//!
//! Icon resource paths and delegate metrics, loadable from TOML. Every field
//! has a default, so a config file only needs the keys it changes:
//!
//! ```toml
//! [icons]
//! talking_on = "/usr/share/voxroster/talking.svg"
//!
//! [delegate]
//! cell_pitch = 20.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use voxroster_core::logging::targets;
use voxroster_render::{Icon, Size};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Icon resource paths.
    pub icons: IconTheme,
    /// Flags-column delegate geometry.
    pub delegate: DelegateMetrics,
}

impl RosterConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Serializes the configuration to TOML text.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the configuration to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = self.to_toml_string()?;
        std::fs::write(path, text).map_err(|e| ConfigError::io(path, e))
    }

    /// Builds the icon set at the delegate's icon size.
    pub fn player_icons(&self) -> PlayerIcons {
        self.icons.load(self.delegate.icon_size)
    }
}

/// Resource paths of the roster icons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconTheme {
    pub talking_on: String,
    pub talking_alt: String,
    pub talking_off: String,
    pub muted_self: String,
    pub muted_server: String,
    pub muted_local: String,
    pub deafened_self: String,
    pub deafened_server: String,
    pub authenticated: String,
    pub channel: String,
    pub channel_linked: String,
}

impl Default for IconTheme {
    fn default() -> Self {
        Self {
            talking_on: ":/icons/talking_on.png".into(),
            talking_alt: ":/icons/talking_alt.png".into(),
            talking_off: ":/icons/talking_off.png".into(),
            muted_self: ":/icons/muted_self.png".into(),
            muted_server: ":/icons/muted_server.png".into(),
            muted_local: ":/icons/muted_local.png".into(),
            deafened_self: ":/icons/deafened_self.png".into(),
            deafened_server: ":/icons/deafened_server.png".into(),
            authenticated: ":/icons/authenticated.png".into(),
            channel: ":/icons/channel.png".into(),
            channel_linked: ":/icons/channel_linked.png".into(),
        }
    }
}

impl IconTheme {
    /// Resolves every path into an [`Icon`] with the given square size.
    pub fn load(&self, icon_size: f32) -> PlayerIcons {
        let size = Size::square(icon_size);
        let icon = |path: &str| Icon::from_path(path).with_preferred_size(size);
        PlayerIcons {
            talking_on: icon(&self.talking_on),
            talking_alt: icon(&self.talking_alt),
            talking_off: icon(&self.talking_off),
            muted_self: icon(&self.muted_self),
            muted_server: icon(&self.muted_server),
            muted_local: icon(&self.muted_local),
            deafened_self: icon(&self.deafened_self),
            deafened_server: icon(&self.deafened_server),
            authenticated: icon(&self.authenticated),
            channel: icon(&self.channel),
            channel_linked: icon(&self.channel_linked),
        }
    }
}

/// The icons `PlayerModel` decorates rows with.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerIcons {
    pub talking_on: Icon,
    pub talking_alt: Icon,
    pub talking_off: Icon,
    pub muted_self: Icon,
    pub muted_server: Icon,
    pub muted_local: Icon,
    pub deafened_self: Icon,
    pub deafened_server: Icon,
    pub authenticated: Icon,
    pub channel: Icon,
    pub channel_linked: Icon,
}

impl Default for PlayerIcons {
    fn default() -> Self {
        RosterConfig::default().player_icons()
    }
}

/// Geometry of the flags-column icon strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelegateMetrics {
    /// Horizontal distance between icon origins, also the row height.
    pub cell_pitch: f32,
    /// Edge length of each icon.
    pub icon_size: f32,
}

impl Default for DelegateMetrics {
    fn default() -> Self {
        Self {
            cell_pitch: 18.0,
            icon_size: 16.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RosterConfig::default();
        assert_eq!(config.delegate.cell_pitch, 18.0);
        assert_eq!(config.delegate.icon_size, 16.0);
        assert_eq!(config.icons.muted_server, ":/icons/muted_server.png");

        let icons = config.player_icons();
        assert_eq!(icons.channel_linked.name(), "channel_linked");
        assert_eq!(icons.talking_on.preferred_size(), Some(Size::new(16.0, 16.0)));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RosterConfig::from_toml_str(
            r#"
            [icons]
            talking_on = "/themes/dark/talk.svg"

            [delegate]
            cell_pitch = 20.0
            "#,
        )
        .unwrap();

        assert_eq!(config.icons.talking_on, "/themes/dark/talk.svg");
        assert_eq!(config.icons.talking_off, ":/icons/talking_off.png");
        assert_eq!(config.delegate.cell_pitch, 20.0);
        assert_eq!(config.delegate.icon_size, 16.0);
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let err = RosterConfig::from_toml_str("[delegate]\ncell_pitch = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.toml");

        let mut config = RosterConfig::default();
        config.delegate.icon_size = 24.0;
        config.save(&path).unwrap();

        assert_eq!(RosterConfig::load(&path).unwrap(), config);
        assert!(matches!(
            RosterConfig::load(dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
