//! Named image resources.
//!
//! An [`Icon`] only carries its resource path (a file path or an embedded
//! name such as `:/icons/channel.png`). Turning that into pixels is the
//! [`Painter`](crate::Painter) backend's job.
//!
//! ```
//! use voxroster_render::{Icon, Size};
//!
//! let talking = Icon::from_path(":/icons/talking_on.png").with_preferred_size(Size::square(16.0));
//! assert_eq!(talking.name(), "talking_on");
//! ```

use std::sync::Arc;

use crate::types::Size;

/// Cheap to clone; the path is shared.
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    path: Arc<str>,
    preferred_size: Option<Size>,
}

impl Icon {
    pub fn from_path(path: impl AsRef<str>) -> Self {
        Self {
            path: path.as_ref().into(),
            preferred_size: None,
        }
    }

    pub fn with_preferred_size(self, size: Size) -> Self {
        Self {
            preferred_size: Some(size),
            ..self
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// File stem of the path. A leading dot is part of the stem.
    pub fn name(&self) -> &str {
        let file = self.path.rsplit(['/', '\\']).next().unwrap_or_default();
        match file.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => file,
        }
    }

    pub fn preferred_size(&self) -> Option<Size> {
        self.preferred_size
    }
}
