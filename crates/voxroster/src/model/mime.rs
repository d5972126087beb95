//! Drag payloads.
//!
//! [`ItemModel::mime_data`](super::ItemModel::mime_data) packs dragged rows
//! into a [`MimeData`], one byte blob per format, and
//! [`ItemModel::drop_mime_data`](super::ItemModel::drop_mime_data) unpacks it
//! on the receiving side.

use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;

/// A set of drop actions, combined with `|`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DropAction(u8);

impl DropAction {
    pub const NONE: Self = Self(0);
    pub const COPY: Self = Self(0b001);
    pub const MOVE: Self = Self(0b010);
    pub const LINK: Self = Self(0b100);

    /// Every action in `other` is also in `self`.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl std::ops::BitOr for DropAction {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for DropAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [(Self::COPY, "COPY"), (Self::MOVE, "MOVE"), (Self::LINK, "LINK")]
            .into_iter()
            .filter(|(action, _)| self.contains(*action))
            .map(|(_, name)| name)
            .collect();
        if names.is_empty() {
            f.write_str("DropAction(NONE)")
        } else {
            write!(f, "DropAction({})", names.join(" | "))
        }
    }
}

/// Format name to payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MimeData {
    payloads: BTreeMap<String, Bytes>,
}

impl MimeData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// Format names in sorted order.
    pub fn formats(&self) -> impl Iterator<Item = &str> {
        self.payloads.keys().map(String::as_str)
    }

    pub fn data(&self, format: &str) -> Option<&Bytes> {
        self.payloads.get(format)
    }

    /// Replaces any payload already stored under `format`.
    pub fn set_data(&mut self, format: impl Into<String>, payload: impl Into<Bytes>) {
        self.payloads.insert(format.into(), payload.into());
    }
}
