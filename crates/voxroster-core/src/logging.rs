//! `tracing` targets and tree-dump formatting.
//!
//! Nothing here installs a subscriber; applications pick one. Filtering by
//! target looks like:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("voxroster::player_model=debug,voxroster::drag=trace")
//!     .init();
//! ```

/// Log targets, one per subsystem.
pub mod targets {
    pub const SIGNAL: &str = "voxroster_core::signal";
    /// Row brackets and model mutations.
    pub const PLAYER_MODEL: &str = "voxroster::player_model";
    pub const ROSTER: &str = "voxroster::roster";
    /// Drag payloads and drop dispatch.
    pub const DRAG: &str = "voxroster::drag";
    pub const CONFIG: &str = "voxroster::config";
}

/// Glyph set for [`TreeFormatOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    Ascii,
    #[default]
    Unicode,
    /// Plain indentation, no branch lines.
    Compact,
}

impl TreeStyle {
    /// Drawn in front of a node's label.
    pub fn branch(self, is_last: bool) -> &'static str {
        match self {
            TreeStyle::Ascii if is_last => "`-- ",
            TreeStyle::Ascii => "|-- ",
            TreeStyle::Unicode if is_last => "└── ",
            TreeStyle::Unicode => "├── ",
            TreeStyle::Compact => "",
        }
    }

    /// Drawn in front of every line below a node, once per ancestor level.
    pub fn continuation(self, is_last: bool, indent_size: usize) -> String {
        let rail = match self {
            TreeStyle::Compact => return " ".repeat(indent_size),
            _ if is_last => ' ',
            TreeStyle::Ascii => '|',
            TreeStyle::Unicode => '│',
        };
        format!("{rail}   ")
    }
}

/// What a tree dump shows.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    pub style: TreeStyle,
    /// Append channel ids and player sessions.
    pub show_ids: bool,
    /// Append per-player flags and talk state.
    pub show_state: bool,
    /// Levels below the root to print; `None` prints everything.
    pub max_depth: Option<usize>,
    /// Spaces per level with [`TreeStyle::Compact`].
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_state: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Ids and state.
    pub fn detailed() -> Self {
        Self {
            show_state: true,
            ..Self::default()
        }
    }

    /// Names only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            ..Self::default()
        }
    }

    pub fn with_style(self, style: TreeStyle) -> Self {
        Self { style, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_and_rail_glyphs() {
        assert_eq!(TreeStyle::Ascii.branch(true), "`-- ");
        assert_eq!(TreeStyle::Unicode.branch(false), "├── ");
        assert_eq!(TreeStyle::Unicode.continuation(false, 2), "│   ");
        assert_eq!(TreeStyle::Ascii.continuation(true, 2), "    ");
    }

    #[test]
    fn test_compact_indents_without_glyphs() {
        assert_eq!(TreeStyle::Compact.branch(true), "");
        assert_eq!(TreeStyle::Compact.continuation(false, 3), "   ");
    }

    #[test]
    fn test_option_presets() {
        assert!(TreeFormatOptions::detailed().show_state);
        let minimal = TreeFormatOptions::minimal().with_style(TreeStyle::Ascii);
        assert!(!minimal.show_ids && !minimal.show_state);
        assert_eq!(minimal.style, TreeStyle::Ascii);
    }
}
