//! Rendering primitives for voxroster.
//!
//! This crate holds the small set of drawing types the item views need:
//! geometry, colors, fonts, icons, and the [`Painter`] trait delegates draw
//! through.

mod font;
mod icon;
mod painter;
mod types;

pub use font::{Font, FontFamily, FontWeight};
pub use icon::Icon;
pub use painter::{DisplayList, PaintCommand, Painter};
pub use types::{Color, Point, Rect, Size};
