// SPDX-License-Identifier: MPL-2.0
//! Displays the working image, scaled to fit and centered.

use super::{MeasureContext, Measurable, PaintContext, Paintable};
use crate::application::port::Image;
use crate::ui::design_tokens::palette;
use crate::ui::layout::{Rect, Size};
use crate::ui::paint::{Bitmap, Frame};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct ImageView {
    bitmap: Option<Arc<Bitmap>>,
}

impl ImageView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the displayed image.
    pub fn set_image(&mut self, image: &Image) {
        self.bitmap = Some(Arc::new(Bitmap::from_image(image)));
    }

    pub fn clear(&mut self) {
        self.bitmap = None;
    }

    #[must_use]
    pub fn bitmap(&self) -> Option<&Arc<Bitmap>> {
        self.bitmap.as_ref()
    }

    /// Pixel size of the displayed image.
    #[must_use]
    pub fn image_size(&self) -> Option<Size> {
        self.bitmap.as_ref().map(|bitmap| bitmap.size())
    }

    /// Where the image lands inside `bounds`: the largest centered
    /// rectangle with the image's aspect ratio.
    #[must_use]
    pub fn display_rect(&self, bounds: Rect) -> Option<Rect> {
        let image = self.image_size()?;
        contain(image, bounds)
    }
}

/// Largest rectangle with `image`'s aspect ratio centered in `bounds`.
pub(crate) fn contain(image: Size, bounds: Rect) -> Option<Rect> {
    if image.width == 0 || image.height == 0 || bounds.width == 0 || bounds.height == 0 {
        return None;
    }
    let scale = (f64::from(bounds.width) / f64::from(image.width))
        .min(f64::from(bounds.height) / f64::from(image.height));

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let fit = |extent: u32, limit: u32| ((f64::from(extent) * scale).round() as u32).clamp(1, limit);
    let width = fit(image.width, bounds.width);
    let height = fit(image.height, bounds.height);

    Some(Rect::new(
        bounds.x + (bounds.width - width) / 2,
        bounds.y + (bounds.height - height) / 2,
        width,
        height,
    ))
}

impl Measurable for ImageView {
    fn measure(&self, _ctx: &MeasureContext<'_>) -> Size {
        // Fills whatever its container gives it.
        Size::ZERO
    }
}

impl Paintable for ImageView {
    fn paint(&self, bounds: Rect, _ctx: &PaintContext<'_>, frame: &mut Frame) {
        frame.fill_rect(bounds, palette::GRAY_900);
        if let (Some(bitmap), Some(rect)) = (self.bitmap.as_ref(), self.display_rect(bounds)) {
            frame.image(rect, Arc::clone(bitmap));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::paint::DrawCommand;
    use crate::ui::scale::ScaleFactor;
    use crate::ui::text::MonospaceMeasurer;
    use crate::ui::widgets::MeasureContext;
    use image_rs::RgbaImage;

    fn view_with(width: u32, height: u32) -> ImageView {
        let mut view = ImageView::new();
        view.set_image(&Image::ImageRgba8(RgbaImage::new(width, height)));
        view
    }

    #[test]
    fn wide_image_is_letterboxed() {
        let view = view_with(800, 400);
        let rect = view.display_rect(Rect::new(10, 20, 400, 400)).expect("image set");
        assert_eq!(rect, Rect::new(10, 120, 400, 200));
    }

    #[test]
    fn small_image_is_scaled_up_to_fit() {
        let view = view_with(10, 20);
        let rect = view.display_rect(Rect::new(0, 0, 300, 100)).expect("image set");
        assert_eq!(rect, Rect::new(125, 0, 50, 100));
    }

    #[test]
    fn empty_view_has_no_display_rect() {
        assert!(ImageView::new().display_rect(Rect::new(0, 0, 10, 10)).is_none());
        assert!(view_with(4, 4).display_rect(Rect::new(0, 0, 0, 10)).is_none());
    }

    #[test]
    fn paint_emits_background_then_image() {
        let measurer = MonospaceMeasurer::default();
        let ctx = PaintContext {
            measure: MeasureContext {
                scale: ScaleFactor::default(),
                text: &measurer,
            },
            disabled: false,
        };
        let view = view_with(4, 4);
        let mut frame = Frame::new(Size::new(8, 8));
        view.paint(Rect::new(0, 0, 8, 8), &ctx, &mut frame);

        assert!(matches!(frame.commands()[0], DrawCommand::FillRect { .. }));
        match &frame.commands()[1] {
            DrawCommand::Image { rect, bitmap } => {
                assert_eq!(*rect, Rect::new(0, 0, 8, 8));
                assert_eq!(bitmap.size(), Size::new(4, 4));
            }
            other => panic!("expected image, got {other:?}"),
        }
    }
}
