//! Cell painting.
//!
//! A view gathers everything it knows about a cell into a
//! [`StyleOptionViewItem`] and hands it to an [`ItemDelegate`], which draws
//! through a [`Painter`] and reports the size it wants. Delegates never talk
//! to the model.
//!
//! ```
//! use voxroster::model::{DefaultItemDelegate, DelegatePaintContext, ItemDelegate, ModelIndex, StyleOptionViewItem};
//! use voxroster_render::{DisplayList, Rect};
//!
//! let option = StyleOptionViewItem::new(Rect::new(0.0, 0.0, 120.0, 18.0), ModelIndex::invalid())
//!     .with_text("Lobby");
//!
//! let mut painter = DisplayList::new();
//! DefaultItemDelegate::new().paint(&mut DelegatePaintContext::new(&mut painter, option.rect), &option);
//! assert!(painter.is_balanced());
//! ```

use voxroster_render::{Color, Font, Icon, Painter, Point, Rect, Size};

use super::index::ModelIndex;
use super::role::{ItemData, ItemRole};
use super::traits::{ItemFlags, ItemModel};

/// View-side state of a cell.
#[derive(Debug, Clone, Copy)]
pub struct ViewItemState {
    pub enabled: bool,
    pub selected: bool,
    /// Has keyboard focus.
    pub focused: bool,
}

impl Default for ViewItemState {
    fn default() -> Self {
        Self {
            enabled: true,
            selected: false,
            focused: false,
        }
    }
}

impl ViewItemState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selected(self, selected: bool) -> Self {
        Self { selected, ..self }
    }

    pub fn with_focused(self, focused: bool) -> Self {
        Self { focused, ..self }
    }
}

/// One cell, ready to paint.
#[derive(Debug, Clone)]
pub struct StyleOptionViewItem {
    pub rect: Rect,
    pub index: ModelIndex,
    pub state: ViewItemState,
    pub flags: ItemFlags,
    /// The Display value as the model returned it, lists included.
    pub display: ItemData,
    /// `display` when it is a string.
    pub text: Option<String>,
    pub icon: Option<Icon>,
    pub icon_size: Size,
    /// Gap between icon and text.
    pub icon_spacing: f32,
    /// Overrides the delegate's font.
    pub font: Option<Font>,
    pub tooltip: Option<String>,
}

impl StyleOptionViewItem {
    pub fn new(rect: Rect, index: ModelIndex) -> Self {
        Self {
            rect,
            index,
            state: ViewItemState::new(),
            flags: ItemFlags::ENABLED.selectable(),
            display: ItemData::None,
            text: None,
            icon: None,
            icon_size: Size::square(16.0),
            icon_spacing: 4.0,
            font: None,
            tooltip: None,
        }
    }

    /// Reads every role the delegates use from `model`.
    pub fn from_model(model: &dyn ItemModel, rect: Rect, index: ModelIndex) -> Self {
        let flags = model.flags(&index);
        let option = Self {
            icon: model.data(&index, ItemRole::Decoration).as_icon().cloned(),
            font: model.data(&index, ItemRole::Font).as_font().cloned(),
            tooltip: model.data(&index, ItemRole::ToolTip).into_string(),
            state: ViewItemState {
                enabled: flags.enabled,
                ..ViewItemState::new()
            },
            flags,
            ..Self::new(rect, index.clone())
        };
        option.with_display(model.data(&index, ItemRole::Display))
    }

    pub fn with_state(self, state: ViewItemState) -> Self {
        Self { state, ..self }
    }

    pub fn with_display(self, display: ItemData) -> Self {
        Self {
            text: display.as_string().map(str::to_owned),
            display,
            ..self
        }
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_display(ItemData::String(text.into()))
    }

    pub fn with_icon(self, icon: Icon) -> Self {
        Self {
            icon: Some(icon),
            ..self
        }
    }
}

/// The painter a delegate draws into, plus the cell bounds.
pub struct DelegatePaintContext<'a> {
    painter: &'a mut dyn Painter,
    rect: Rect,
}

impl<'a> DelegatePaintContext<'a> {
    pub fn new(painter: &'a mut dyn Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }

    #[inline]
    pub fn painter(&mut self) -> &mut dyn Painter {
        &mut *self.painter
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }
}

/// Paints cells and sizes them.
pub trait ItemDelegate: Send + Sync {
    /// Must leave the painter's save stack as it found it.
    fn paint(&self, ctx: &mut DelegatePaintContext<'_>, option: &StyleOptionViewItem);

    /// `(width, height)` in pixels.
    fn size_hint(&self, option: &StyleOptionViewItem) -> (f32, f32);
}

/// Colors used by [`DefaultItemDelegate`].
#[derive(Debug, Clone)]
pub struct DelegateTheme {
    pub text: Color,
    pub disabled_text: Color,
    pub selection_background: Color,
    pub selection_text: Color,
    pub focus_border: Color,
}

impl Default for DelegateTheme {
    fn default() -> Self {
        let accent = Color::from_rgb8(51, 153, 255);
        Self {
            text: Color::from_rgb8(33, 33, 33),
            disabled_text: Color::from_rgb8(160, 160, 160),
            selection_background: accent,
            selection_text: Color::WHITE,
            focus_border: accent,
        }
    }
}

/// Icon then one line of text, with selection fill and focus frame.
#[derive(Debug, Clone)]
pub struct DefaultItemDelegate {
    theme: DelegateTheme,
    font: Font,
    padding: f32,
}

impl Default for DefaultItemDelegate {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultItemDelegate {
    pub fn new() -> Self {
        Self {
            theme: DelegateTheme::default(),
            font: Font::default(),
            padding: 4.0,
        }
    }

    pub fn with_theme(self, theme: DelegateTheme) -> Self {
        Self { theme, ..self }
    }

    fn font_for<'a>(&'a self, option: &'a StyleOptionViewItem) -> &'a Font {
        option.font.as_ref().unwrap_or(&self.font)
    }

    fn text_color(&self, state: ViewItemState) -> Color {
        match state {
            ViewItemState { enabled: false, .. } => self.theme.disabled_text,
            ViewItemState { selected: true, .. } => self.theme.selection_text,
            _ => self.theme.text,
        }
    }
}

impl ItemDelegate for DefaultItemDelegate {
    fn paint(&self, ctx: &mut DelegatePaintContext<'_>, option: &StyleOptionViewItem) {
        let cell = ctx.rect();
        let painter = ctx.painter();
        painter.save();

        if option.state.enabled && option.state.selected {
            painter.fill_rect(cell, self.theme.selection_background);
        }

        let content = cell.deflate(self.padding);
        let mut text_x = content.left();
        if let Some(icon) = &option.icon {
            let size = option.icon_size;
            let top = content.top() + (content.height() - size.height).max(0.0) * 0.5;
            let slot = Rect::new(content.left(), top, size.width, size.height);
            painter.draw_icon(slot, icon);
            text_x = slot.right() + option.icon_spacing;
        }

        if let Some(text) = option.text.as_deref().filter(|text| !text.is_empty()) {
            let baseline = Point::new(text_x, cell.center().y);
            painter.draw_text(baseline, text, self.font_for(option), self.text_color(option.state));
        }

        if option.state.focused {
            painter.stroke_rect(cell.deflate(1.0), self.theme.focus_border, 1.0);
        }
        painter.restore();
    }

    /// Text width is estimated at half the font size per character.
    fn size_hint(&self, option: &StyleOptionViewItem) -> (f32, f32) {
        let font_size = self.font_for(option).size();
        let chars = option.text.as_deref().map_or(0, |text| text.chars().count());
        let mut width = self.padding * 2.0 + chars as f32 * font_size * 0.5;
        let mut height = font_size;

        if option.icon.is_some() {
            width += option.icon_size.width + option.icon_spacing;
            height = height.max(option.icon_size.height);
        }
        (width, height + self.padding * 2.0)
    }
}
