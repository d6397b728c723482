// SPDX-License-Identifier: MPL-2.0
//! Horizontal bar of text menu entries.

use super::{
    HitTestable, MeasureContext, Measurable, PaintContext, Paintable, PointerEvent, PointerKind,
    PointerResponse,
};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::layout::{Rect, Size};
use crate::ui::paint::Frame;

#[derive(Debug, Clone)]
pub struct MenuBar<M> {
    items: Vec<(String, M)>,
    pressed: Option<usize>,
}

impl<M> MenuBar<M> {
    pub fn new(items: impl IntoIterator<Item = (String, M)>) -> Self {
        Self {
            items: items.into_iter().collect(),
            pressed: None,
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(label, _)| label.as_str())
    }

    /// Item rectangles inside `bounds`, left to right.
    #[must_use]
    pub fn item_rects(&self, bounds: Rect, ctx: &MeasureContext<'_>) -> Vec<Rect> {
        let gap = ctx.scale.px(spacing::SM);
        let mut x = bounds.x + ctx.scale.px(spacing::XXS);
        self.items
            .iter()
            .map(|(label, _)| {
                let width = ctx.text_size(label, typography::BODY).width + 2 * gap;
                let rect = Rect::new(x, bounds.y, width, bounds.height);
                x += width;
                rect
            })
            .collect()
    }

    fn item_at(&self, bounds: Rect, ctx: &MeasureContext<'_>, event: PointerEvent) -> Option<usize> {
        self.item_rects(bounds, ctx)
            .iter()
            .position(|rect| rect.contains(event.position))
    }
}

impl<M> Measurable for MenuBar<M> {
    fn measure(&self, ctx: &MeasureContext<'_>) -> Size {
        let gap = ctx.scale.px(spacing::SM);
        let width = self
            .items
            .iter()
            .map(|(label, _)| ctx.text_size(label, typography::BODY).width + 2 * gap)
            .sum::<u32>()
            + ctx.scale.px(spacing::XXS);
        Size::new(width, ctx.scale.px(sizing::BAR_HEIGHT))
    }
}

impl<M> Paintable for MenuBar<M> {
    fn paint(&self, bounds: Rect, ctx: &PaintContext<'_>, frame: &mut Frame) {
        frame.fill_rect(bounds, palette::GRAY_800);
        for (index, (rect, (label, _))) in self
            .item_rects(bounds, &ctx.measure)
            .into_iter()
            .zip(&self.items)
            .enumerate()
        {
            if self.pressed == Some(index) {
                frame.fill_rect(rect, palette::GRAY_700);
            }
            ctx.centered_text(frame, rect, label, typography::BODY, palette::GRAY_100);
        }
    }
}

impl<M: Clone> HitTestable<M> for MenuBar<M> {
    fn on_pointer(
        &mut self,
        event: PointerEvent,
        bounds: Rect,
        ctx: &MeasureContext<'_>,
    ) -> PointerResponse<M> {
        match event.kind {
            PointerKind::Pressed => match self.item_at(bounds, ctx, event) {
                Some(index) => {
                    self.pressed = Some(index);
                    PointerResponse::captured()
                }
                None => PointerResponse::ignored(),
            },
            PointerKind::Moved => PointerResponse::captured(),
            PointerKind::Released => {
                let pressed = self.pressed.take();
                match (pressed, self.item_at(bounds, ctx, event)) {
                    (Some(pressed), Some(released)) if pressed == released => self
                        .items
                        .get(released)
                        .map_or_else(PointerResponse::ignored, |(_, message)| {
                            PointerResponse::publish(message.clone())
                        }),
                    _ => PointerResponse::ignored(),
                }
            }
        }
    }
}
