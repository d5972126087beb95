//! Geometry and color in logical pixels.

/// A position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A square of side `side`, the shape of every roster icon.
    #[inline]
    pub const fn square(side: f32) -> Self {
        Self::new(side, side)
    }
}

/// An axis-aligned rectangle: top-left corner plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left() + self.width()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top() + self.height()
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.left() + self.width() * 0.5, self.top() + self.height() * 0.5)
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        (self.left()..self.right()).contains(&point.x) && (self.top()..self.bottom()).contains(&point.y)
    }

    /// Insets every edge by `inset`, clamping the extent at zero.
    pub fn deflate(&self, inset: f32) -> Rect {
        let grow = -2.0 * inset;
        Rect::new(
            self.left() + inset,
            self.top() + inset,
            (self.width() + grow).max(0.0),
            (self.height() + grow).max(0.0),
        )
    }

    /// Translated copy.
    pub fn offset(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            origin: Point::new(self.left() + dx, self.top() + dy),
            ..*self
        }
    }

    /// Copy anchored at the same corner with a new extent.
    pub fn with_size(&self, size: Size) -> Rect {
        Rect { size, ..*self }
    }
}

/// Premultiplied RGBA, each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Takes already premultiplied channels.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Straight-alpha 8-bit channels, premultiplied on the way in.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let alpha = f32::from(a) / 255.0;
        let channel = |c: u8| f32::from(c) / 255.0 * alpha;
        Self::new(channel(r), channel(g), channel(b), alpha)
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, u8::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!((rect.right(), rect.bottom()), (40.0, 60.0));
        assert_eq!(rect.center(), Point::new(25.0, 40.0));
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let icon = Rect::new(0.0, 0.0, 18.0, 18.0);
        assert!(icon.contains(Point::new(0.0, 17.9)));
        assert!(!icon.contains(Point::new(18.0, 5.0)));
    }

    #[test]
    fn test_icon_slot_geometry() {
        let cell = Rect::new(100.0, 36.0, 54.0, 18.0);
        let slot = cell.with_size(Size::square(16.0)).offset(19.0, 1.0);
        assert_eq!(slot, Rect::new(119.0, 37.0, 16.0, 16.0));
        assert_eq!(cell.deflate(2.0), Rect::new(102.0, 38.0, 50.0, 14.0));
        assert_eq!(Rect::new(0.0, 0.0, 2.0, 2.0).deflate(5.0).size, Size::ZERO);
    }

    #[test]
    fn test_color_premultiplies() {
        let shade = Color::from_rgba8(255, 0, 0, 51);
        assert!((shade.r - 0.2).abs() < 1e-6);
        assert_eq!(Color::from_rgb8(255, 255, 255), Color::WHITE);
    }
}
