//! Painter abstraction used by item delegates.
//!
//! [`Painter`] is the drawing surface a view hands to its delegates. Backends
//! translate the calls into real drawing; [`DisplayList`] records them, which
//! is what headless views and tests use.

use crate::font::Font;
use crate::icon::Icon;
use crate::types::{Color, Point, Rect};

/// The calls a delegate may make while painting a cell.
pub trait Painter {
    /// Pushes clip and transform.
    fn save(&mut self);

    /// Pops what the matching [`save`](Painter::save) pushed.
    fn restore(&mut self);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);

    /// Scales `icon` into `rect`.
    fn draw_icon(&mut self, rect: Rect, icon: &Icon);

    /// One line of text, `position` being the left end of its baseline.
    fn draw_text(&mut self, position: Point, text: &str, font: &Font, color: Color);
}

/// One [`Painter`] call, as [`DisplayList`] stores it.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    Save,
    Restore,
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, color: Color, width: f32 },
    Icon { rect: Rect, icon: Icon },
    Text { position: Point, text: String, font: Font, color: Color },
}

/// Records painter calls instead of drawing. Headless views and tests
/// inspect the result.
#[derive(Debug, Default)]
pub struct DisplayList {
    commands: Vec<PaintCommand>,
    depth: usize,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// `(rect, icon)` of each icon drawn, in paint order.
    pub fn icons(&self) -> Vec<(Rect, &Icon)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                PaintCommand::Icon { rect, icon } => Some((*rect, icon)),
                _ => None,
            })
            .collect()
    }

    /// No `save` is left open.
    pub fn is_balanced(&self) -> bool {
        self.depth == 0
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.depth = 0;
    }
}

impl Painter for DisplayList {
    fn save(&mut self) {
        self.depth += 1;
        self.commands.push(PaintCommand::Save);
    }

    fn restore(&mut self) {
        if self.depth == 0 {
            tracing::warn!("unbalanced restore ignored");
            return;
        }
        self.depth -= 1;
        self.commands.push(PaintCommand::Restore);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(PaintCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.commands
            .push(PaintCommand::StrokeRect { rect, color, width });
    }

    fn draw_icon(&mut self, rect: Rect, icon: &Icon) {
        self.commands.push(PaintCommand::Icon {
            rect,
            icon: icon.clone(),
        });
    }

    fn draw_text(&mut self, position: Point, text: &str, font: &Font, color: Color) {
        self.commands.push(PaintCommand::Text {
            position,
            text: text.to_string(),
            font: font.clone(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_list_records_in_order() {
        let mut list = DisplayList::new();
        let icon = Icon::from_path(":/icons/channel.png");

        list.save();
        list.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        list.draw_icon(Rect::new(1.0, 1.0, 16.0, 16.0), &icon);
        list.restore();

        assert_eq!(list.commands().len(), 4);
        assert_eq!(list.commands()[0], PaintCommand::Save);
        assert_eq!(list.icons(), vec![(Rect::new(1.0, 1.0, 16.0, 16.0), &icon)]);
        assert!(list.is_balanced());
    }

    #[test]
    fn test_unmatched_restore_is_ignored() {
        let mut list = DisplayList::new();
        list.restore();
        assert!(list.commands().is_empty());
        assert!(list.is_balanced());

        list.save();
        assert!(!list.is_balanced());
        list.clear();
        assert!(list.is_balanced());
    }
}
