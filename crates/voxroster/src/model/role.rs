//! What a view asks a cell for, and what it gets back.

use voxroster_render::{Font, Icon};

/// The aspect of a cell being queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemRole {
    /// Text, or an icon list for strip-style columns.
    Display,
    /// The icon drawn before the text.
    Decoration,
    ToolTip,
    StatusTip,
    /// Longer help, shown on request.
    WhatsThis,
    Font,
}

/// A cell value. [`ItemData::None`] means the cell has nothing for a role.
///
/// ```
/// use voxroster::model::ItemData;
///
/// assert_eq!(ItemData::from("Lobby").as_string(), Some("Lobby"));
/// assert!(ItemData::default().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ItemData {
    #[default]
    None,
    String(String),
    Font(Font),
    Icon(Icon),
    List(Vec<ItemData>),
}

impl ItemData {
    pub fn is_none(&self) -> bool {
        matches!(self, ItemData::None)
    }

    pub fn as_string(&self) -> Option<&str> {
        if let ItemData::String(text) = self { Some(text) } else { None }
    }

    pub fn into_string(self) -> Option<String> {
        if let ItemData::String(text) = self { Some(text) } else { None }
    }

    pub fn as_font(&self) -> Option<&Font> {
        if let ItemData::Font(font) = self { Some(font) } else { None }
    }

    pub fn as_icon(&self) -> Option<&Icon> {
        if let ItemData::Icon(icon) = self { Some(icon) } else { None }
    }

    pub fn as_list(&self) -> Option<&[ItemData]> {
        if let ItemData::List(items) = self { Some(items) } else { None }
    }

    /// The icons of a list value in order. Empty for anything else.
    pub fn icons(&self) -> Vec<&Icon> {
        self.as_list()
            .into_iter()
            .flatten()
            .filter_map(ItemData::as_icon)
            .collect()
    }
}

impl From<String> for ItemData {
    fn from(text: String) -> Self {
        ItemData::String(text)
    }
}

impl From<&str> for ItemData {
    fn from(text: &str) -> Self {
        ItemData::String(text.to_owned())
    }
}

impl From<Font> for ItemData {
    fn from(font: Font) -> Self {
        ItemData::Font(font)
    }
}

impl From<Icon> for ItemData {
    fn from(icon: Icon) -> Self {
        ItemData::Icon(icon)
    }
}

impl From<Vec<Icon>> for ItemData {
    fn from(icons: Vec<Icon>) -> Self {
        ItemData::List(icons.into_iter().map(ItemData::Icon).collect())
    }
}
