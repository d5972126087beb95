//! Text styling.

/// Where glyphs come from: a named family or a generic fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    Name(String),
    #[default]
    SansSerif,
    Monospace,
}

/// CSS-style weight, 100 to 900.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: Self = Self(400);
    pub const BOLD: Self = Self(700);
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// How a cell's text is drawn. Purely descriptive; the painter backend
/// resolves it to font data.
///
/// ```
/// use voxroster_render::{Font, FontFamily};
///
/// let tree = Font::new(FontFamily::Name("Noto Sans".into()), 12.0);
/// assert!(tree.bold().is_bold());
/// assert!(!tree.is_bold());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    family: FontFamily,
    size: f32,
    weight: FontWeight,
}

impl Default for Font {
    fn default() -> Self {
        Self::new(FontFamily::default(), 13.0)
    }
}

impl Font {
    /// `size` is in pixels.
    pub fn new(family: FontFamily, size: f32) -> Self {
        Self {
            family,
            size,
            weight: FontWeight::default(),
        }
    }

    pub fn family(&self) -> &FontFamily {
        &self.family
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn is_bold(&self) -> bool {
        self.weight >= FontWeight::BOLD
    }

    /// The same font at bold weight.
    pub fn bold(&self) -> Self {
        Self {
            weight: FontWeight::BOLD,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_keeps_family_and_size() {
        let mono = Font::new(FontFamily::Monospace, 11.0);
        let bold = mono.bold();
        assert_eq!(bold.family(), &FontFamily::Monospace);
        assert_eq!(bold.size(), 11.0);
        assert_eq!(bold.weight(), FontWeight::BOLD);
        assert_eq!(Font::default().weight(), FontWeight::NORMAL);
    }
}
