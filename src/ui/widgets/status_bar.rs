// SPDX-License-Identifier: MPL-2.0
//! Status line made of keyed segments.

use super::{MeasureContext, Measurable, PaintContext, Paintable};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::layout::{Point, Rect, Size};
use crate::ui::paint::Frame;

const SEPARATOR: &str = " | ";

/// Ordered `key -> text` segments rendered as `a | b | c`.
///
/// Setting an existing key replaces its text in place; new keys are
/// appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBar {
    segments: Vec<(String, String)>,
}

impl StatusBar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, key: &str, text: impl Into<String>) {
        let text = text.into();
        match self.segments.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = text,
            None => self.segments.push((key.to_string(), text)),
        }
    }

    /// Removes a segment. Returns whether it existed.
    pub fn unset(&mut self, key: &str) -> bool {
        let before = self.segments.len();
        self.segments.retain(|(k, _)| k != key);
        self.segments.len() != before
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.segments
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, text)| text.as_str())
    }

    /// The rendered line.
    #[must_use]
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|(_, text)| text.as_str())
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }
}

impl Measurable for StatusBar {
    fn measure(&self, ctx: &MeasureContext<'_>) -> Size {
        let text = ctx.text_size(&self.text(), typography::CAPTION);
        Size::new(
            text.width + 2 * ctx.scale.px(spacing::XS),
            text.height.max(ctx.scale.px(sizing::BAR_HEIGHT)),
        )
    }
}

impl Paintable for StatusBar {
    fn paint(&self, bounds: Rect, ctx: &PaintContext<'_>, frame: &mut Frame) {
        frame.fill_rect(bounds, palette::GRAY_800);
        let text = self.text();
        let extent = ctx.measure.text_size(&text, typography::CAPTION);
        let y = bounds.y + bounds.height.saturating_sub(extent.height) / 2;
        frame.text(
            Point::new((bounds.x + ctx.scale().px(spacing::XS)) as f32, y as f32),
            text,
            ctx.scale().px_f32(typography::CAPTION),
            palette::GRAY_200,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_keep_insertion_order() {
        let mut bar = StatusBar::new();
        bar.set_status("status", "photo.png");
        bar.set_status("resolution", "800x600px");
        bar.set_status("status", "other.png");
        assert_eq!(bar.text(), "other.png | 800x600px");
    }

    #[test]
    fn unset_removes_segment() {
        let mut bar = StatusBar::new();
        bar.set_status("preview", "Previewing Blur");
        assert!(bar.unset("preview"));
        assert!(!bar.unset("preview"));
        assert_eq!(bar.get("preview"), None);
        assert_eq!(bar.text(), "");
    }
}
