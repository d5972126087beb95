//! Delegate for the player tree.
//!
//! The flags column holds a list of icons rather than text. [`PlayerDelegate`]
//! lays those out left to right on a fixed pitch and leaves every other
//! column to [`DefaultItemDelegate`].

use voxroster_render::{Rect, Size};

use crate::config::DelegateMetrics;
use crate::model::{DefaultItemDelegate, DelegatePaintContext, ItemDelegate, StyleOptionViewItem};
use crate::player_model::FLAGS_COLUMN;

/// Item delegate that draws the status icon strip.
#[derive(Debug, Clone, Default)]
pub struct PlayerDelegate {
    metrics: DelegateMetrics,
    inner: DefaultItemDelegate,
}

impl PlayerDelegate {
    /// Creates a delegate with default metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses custom strip geometry.
    pub fn with_metrics(mut self, metrics: DelegateMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Replaces the delegate used for the name column.
    pub fn with_inner(mut self, inner: DefaultItemDelegate) -> Self {
        self.inner = inner;
        self
    }

    /// The strip geometry.
    pub fn metrics(&self) -> DelegateMetrics {
        self.metrics
    }

    fn is_strip(option: &StyleOptionViewItem) -> bool {
        option.index.column() == FLAGS_COLUMN
    }

    /// Rectangle of the `slot`th icon in a strip starting at `cell`.
    fn icon_rect(&self, cell: Rect, slot: usize) -> Rect {
        let pitch = self.metrics.cell_pitch;
        let size = self.metrics.icon_size;
        cell.with_size(Size::square(size))
            .offset(slot as f32 * pitch + 1.0, 1.0)
    }
}

impl ItemDelegate for PlayerDelegate {
    fn paint(&self, ctx: &mut DelegatePaintContext<'_>, option: &StyleOptionViewItem) {
        if !Self::is_strip(option) {
            self.inner.paint(ctx, option);
            return;
        }

        ctx.painter().save();
        for (slot, icon) in option.display.icons().into_iter().enumerate() {
            let rect = self.icon_rect(option.rect, slot);
            ctx.painter().draw_icon(rect, icon);
        }
        ctx.painter().restore();
    }

    fn size_hint(&self, option: &StyleOptionViewItem) -> (f32, f32) {
        if !Self::is_strip(option) {
            return self.inner.size_hint(option);
        }
        let count = option.display.as_list().map_or(0, <[_]>::len);
        let pitch = self.metrics.cell_pitch;
        (pitch * count as f32, pitch)
    }
}

#[cfg(test)]
mod tests {
    use voxroster_render::{DisplayList, Icon};

    use super::*;
    use crate::model::{ItemData, ModelIndex};

    fn strip_option(icons: Vec<Icon>) -> StyleOptionViewItem {
        let index = ModelIndex::new(0, FLAGS_COLUMN, ModelIndex::invalid(), 1);
        StyleOptionViewItem::new(Rect::new(100.0, 36.0, 80.0, 18.0), index)
            .with_display(ItemData::from(icons))
    }

    #[test]
    fn test_strip_size_hint() {
        let delegate = PlayerDelegate::new();
        let icons = vec![
            Icon::from_path(":/icons/authenticated.png"),
            Icon::from_path(":/icons/muted_server.png"),
        ];
        assert_eq!(delegate.size_hint(&strip_option(icons)), (36.0, 18.0));
        assert_eq!(delegate.size_hint(&strip_option(Vec::new())), (0.0, 18.0));
    }

    #[test]
    fn test_strip_paints_icons_on_pitch() {
        let delegate = PlayerDelegate::new();
        let option = strip_option(vec![
            Icon::from_path(":/icons/muted_self.png"),
            Icon::from_path(":/icons/deafened_self.png"),
        ]);

        let mut painter = DisplayList::new();
        delegate.paint(&mut DelegatePaintContext::new(&mut painter, option.rect), &option);

        let placed: Vec<(Rect, &str)> = painter
            .icons()
            .into_iter()
            .map(|(rect, icon)| (rect, icon.name()))
            .collect();
        assert_eq!(
            placed,
            vec![
                (Rect::new(101.0, 37.0, 16.0, 16.0), "muted_self"),
                (Rect::new(119.0, 37.0, 16.0, 16.0), "deafened_self"),
            ]
        );
        assert!(painter.is_balanced());
    }

    #[test]
    fn test_custom_metrics() {
        let delegate = PlayerDelegate::new().with_metrics(DelegateMetrics {
            cell_pitch: 24.0,
            icon_size: 20.0,
        });
        let option = strip_option(vec![Icon::from_path(":/icons/authenticated.png"); 3]);
        assert_eq!(delegate.size_hint(&option), (72.0, 24.0));
    }

    #[test]
    fn test_name_column_goes_to_default_delegate() {
        let delegate = PlayerDelegate::new();
        let index = ModelIndex::new(0, 0, ModelIndex::invalid(), 1);
        let option = StyleOptionViewItem::new(Rect::new(0.0, 0.0, 120.0, 18.0), index)
            .with_text("Alice");

        assert_eq!(
            delegate.size_hint(&option),
            DefaultItemDelegate::new().size_hint(&option)
        );

        let mut painter = DisplayList::new();
        delegate.paint(&mut DelegatePaintContext::new(&mut painter, option.rect), &option);
        assert!(painter.icons().is_empty());
        assert!(painter.is_balanced());
    }
}
