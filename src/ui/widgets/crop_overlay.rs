// SPDX-License-Identifier: MPL-2.0
//! Crop selection drawn over the image view.
//!
//! The selection is stored as four edge ratios (fraction of the image to
//! exclude from each side), so it survives window resizes unchanged. The
//! overlay shares its bounds with the image view underneath and computes
//! the same contain-fit rectangle from the image size it is given.

use super::image_view::contain;
use super::{
    HitTestable, MeasureContext, PaintContext, Paintable, PointerEvent, PointerKind,
    PointerResponse,
};
use crate::application::port::CropRatios;
use crate::ui::design_tokens::{opacity, palette, sizing};
use crate::ui::layout::{Rect, Size};
use crate::ui::paint::Frame;

/// Smallest fraction of each dimension a drag may leave selected.
const MIN_SELECTED_FRACTION: f32 = 0.01;

/// Which edges a drag moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Grab {
    left: bool,
    top: bool,
    right: bool,
    bottom: bool,
}

impl Grab {
    fn any(self) -> bool {
        self.left || self.top || self.right || self.bottom
    }
}

#[derive(Debug, Clone, Default)]
pub struct CropOverlay {
    active: bool,
    ratios: CropRatios,
    image_size: Option<Size>,
    grab: Option<Grab>,
}

impl CropOverlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the overlay with nothing excluded.
    pub fn show(&mut self) {
        self.active = true;
        self.ratios = CropRatios::default();
        self.grab = None;
    }

    pub fn hide(&mut self) {
        self.active = false;
        self.grab = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current edge ratios `(left, top, right, bottom)`.
    #[must_use]
    pub fn ratios(&self) -> CropRatios {
        self.ratios
    }

    /// Sets the edge ratios, clamped so the selection stays non-empty.
    pub fn set_ratios(&mut self, ratios: CropRatios) {
        let (left, right) = clamp_pair(ratios.left, ratios.right);
        let (top, bottom) = clamp_pair(ratios.top, ratios.bottom);
        self.ratios = CropRatios::new(left, top, right, bottom);
    }

    /// Size of the image under the overlay, used to place the selection.
    pub fn set_image_size(&mut self, size: Option<Size>) {
        self.image_size = size;
    }

    fn image_rect(&self, bounds: Rect) -> Option<Rect> {
        contain(self.image_size?, bounds)
    }

    /// Selection in window pixels as `(left, top, right, bottom)`.
    fn selection(&self, image: Rect) -> (f32, f32, f32, f32) {
        let (x, y) = (image.x as f32, image.y as f32);
        let (width, height) = (image.width as f32, image.height as f32);
        (
            x + width * self.ratios.left,
            y + height * self.ratios.top,
            x + width * (1.0 - self.ratios.right),
            y + height * (1.0 - self.ratios.bottom),
        )
    }

    fn grab_at(&self, image: Rect, x: f32, y: f32, reach: f32) -> Grab {
        let (left, top, right, bottom) = self.selection(image);
        let inside_x = x >= left - reach && x <= right + reach;
        let inside_y = y >= top - reach && y <= bottom + reach;
        if !inside_x || !inside_y {
            return Grab::default();
        }
        let grab = Grab {
            left: (x - left).abs() <= reach,
            top: (y - top).abs() <= reach,
            right: (x - right).abs() <= reach,
            bottom: (y - bottom).abs() <= reach,
        };
        // A tiny selection puts both opposing edges in reach; keep the closer one.
        Grab {
            left: grab.left && (!grab.right || (x - left).abs() <= (x - right).abs()),
            right: grab.right && (!grab.left || (x - right).abs() < (x - left).abs()),
            top: grab.top && (!grab.bottom || (y - top).abs() <= (y - bottom).abs()),
            bottom: grab.bottom && (!grab.top || (y - bottom).abs() < (y - top).abs()),
        }
    }

    fn drag(&mut self, grab: Grab, image: Rect, x: f32, y: f32) {
        let fx = ((x - image.x as f32) / image.width as f32).clamp(0.0, 1.0);
        let fy = ((y - image.y as f32) / image.height as f32).clamp(0.0, 1.0);
        let mut ratios = self.ratios;
        if grab.left {
            ratios.left = fx.min(1.0 - ratios.right - MIN_SELECTED_FRACTION);
        }
        if grab.right {
            ratios.right = (1.0 - fx).min(1.0 - ratios.left - MIN_SELECTED_FRACTION);
        }
        if grab.top {
            ratios.top = fy.min(1.0 - ratios.bottom - MIN_SELECTED_FRACTION);
        }
        if grab.bottom {
            ratios.bottom = (1.0 - fy).min(1.0 - ratios.top - MIN_SELECTED_FRACTION);
        }
        self.set_ratios(ratios);
    }
}

/// Keeps both ratios in `[0, 1)` with a non-empty selection between them.
fn clamp_pair(first: f32, second: f32) -> (f32, f32) {
    let sanitize = |value: f32| if value.is_finite() { value.max(0.0) } else { 0.0 };
    let limit = 1.0 - MIN_SELECTED_FRACTION;
    let first = sanitize(first).min(limit);
    let second = sanitize(second).min(limit - first);
    (first, second)
}

impl Paintable for CropOverlay {
    fn paint(&self, bounds: Rect, ctx: &PaintContext<'_>, frame: &mut Frame) {
        if !self.active {
            return;
        }
        let Some(image) = self.image_rect(bounds) else {
            return;
        };
        let (left, top, right, bottom) = self.selection(image);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let px = |value: f32| value.round().max(0.0) as u32;
        let (left, top, right, bottom) = (px(left), px(top), px(right), px(bottom));
        let shade = palette::BLACK.with_alpha(opacity::OVERLAY_MEDIUM);

        // Excluded margins.
        frame.fill_rect(
            Rect::new(image.x, image.y, image.width, top.saturating_sub(image.y)),
            shade,
        );
        frame.fill_rect(
            Rect::new(image.x, bottom, image.width, image.bottom().saturating_sub(bottom)),
            shade,
        );
        frame.fill_rect(
            Rect::new(image.x, top, left.saturating_sub(image.x), bottom.saturating_sub(top)),
            shade,
        );
        frame.fill_rect(
            Rect::new(right, top, image.right().saturating_sub(right), bottom.saturating_sub(top)),
            shade,
        );

        let selection = Rect::new(
            left,
            top,
            right.saturating_sub(left),
            bottom.saturating_sub(top),
        );
        frame.stroke_rect(selection, palette::WHITE, ctx.scale().px_f32(2.0));

        let handle = ctx.scale().px_f32(sizing::CROP_HANDLE_SIZE);
        let (mid_x, mid_y) = ((left + right) / 2, (top + bottom) / 2);
        for (hx, hy) in [
            (left, top),
            (mid_x, top),
            (right, top),
            (right, mid_y),
            (right, bottom),
            (mid_x, bottom),
            (left, bottom),
            (left, mid_y),
        ] {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let rect = Rect::new(
                (hx as f32 - handle / 2.0).max(0.0) as u32,
                (hy as f32 - handle / 2.0).max(0.0) as u32,
                handle as u32,
                handle as u32,
            );
            frame.fill_rect(rect, palette::WHITE);
        }
    }
}

impl<M> HitTestable<M> for CropOverlay {
    fn accepts_pointer(&self) -> bool {
        self.active && self.image_size.is_some()
    }

    fn on_pointer(
        &mut self,
        event: PointerEvent,
        bounds: Rect,
        ctx: &MeasureContext<'_>,
    ) -> PointerResponse<M> {
        let Some(image) = self.image_rect(bounds) else {
            return PointerResponse::ignored();
        };
        let (x, y) = (event.position.x, event.position.y);
        match event.kind {
            PointerKind::Pressed => {
                let grab = self.grab_at(image, x, y, ctx.scale.px_f32(sizing::CROP_HANDLE_HIT_SIZE));
                if grab.any() {
                    self.grab = Some(grab);
                    PointerResponse::captured()
                } else {
                    PointerResponse::ignored()
                }
            }
            PointerKind::Moved => match self.grab {
                Some(grab) => {
                    self.drag(grab, image, x, y);
                    PointerResponse::captured()
                }
                None => PointerResponse::ignored(),
            },
            PointerKind::Released => {
                self.grab = None;
                PointerResponse::ignored()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, RATIO_EPSILON};
    use crate::ui::layout::Point;
    use crate::ui::scale::ScaleFactor;
    use crate::ui::text::MonospaceMeasurer;

    fn event(kind: PointerKind, x: f32, y: f32) -> PointerEvent {
        PointerEvent {
            kind,
            position: Point::new(x, y),
        }
    }

    fn active_overlay() -> CropOverlay {
        let mut overlay = CropOverlay::new();
        overlay.set_image_size(Some(Size::new(200, 100)));
        overlay.show();
        overlay
    }

    fn send(overlay: &mut CropOverlay, kind: PointerKind, x: f32, y: f32) -> PointerResponse<()> {
        let measurer = MonospaceMeasurer::default();
        let ctx = MeasureContext {
            scale: ScaleFactor::default(),
            text: &measurer,
        };
        overlay.on_pointer(event(kind, x, y), Rect::new(0, 0, 200, 100), &ctx)
    }

    #[test]
    fn show_resets_ratios() {
        let mut overlay = active_overlay();
        overlay.set_ratios(CropRatios::new(0.2, 0.2, 0.2, 0.2));
        overlay.hide();
        assert!(!overlay.is_active());
        overlay.show();
        assert_eq!(overlay.ratios(), CropRatios::default());
    }

    #[test]
    fn dragging_left_edge_moves_left_ratio() {
        let mut overlay = active_overlay();
        assert!(send(&mut overlay, PointerKind::Pressed, 1.0, 50.0).capture);
        send(&mut overlay, PointerKind::Moved, 50.0, 50.0);
        send(&mut overlay, PointerKind::Released, 50.0, 50.0);

        let ratios = overlay.ratios();
        assert_abs_diff_eq!(ratios.left, 0.25, epsilon = RATIO_EPSILON);
        assert_abs_diff_eq!(ratios.right, 0.0);
        assert_abs_diff_eq!(ratios.top, 0.0);
    }

    #[test]
    fn dragging_corner_moves_two_edges() {
        let mut overlay = active_overlay();
        send(&mut overlay, PointerKind::Pressed, 199.0, 99.0);
        send(&mut overlay, PointerKind::Moved, 150.0, 75.0);

        let ratios = overlay.ratios();
        assert_abs_diff_eq!(ratios.right, 0.25, epsilon = RATIO_EPSILON);
        assert_abs_diff_eq!(ratios.bottom, 0.25, epsilon = RATIO_EPSILON);
    }

    #[test]
    fn press_in_the_middle_is_not_captured() {
        let mut overlay = active_overlay();
        assert!(!send(&mut overlay, PointerKind::Pressed, 100.0, 50.0).capture);
    }

    #[test]
    fn edges_never_cross() {
        let mut overlay = active_overlay();
        send(&mut overlay, PointerKind::Pressed, 1.0, 50.0);
        send(&mut overlay, PointerKind::Moved, 500.0, 50.0);

        let ratios = overlay.ratios();
        assert!(ratios.left + ratios.right < 1.0);
        assert!(ratios.left < 1.0);
    }

    #[test]
    fn set_ratios_sanitizes_input() {
        let mut overlay = CropOverlay::new();
        overlay.set_ratios(CropRatios::new(-1.0, f32::NAN, 0.7, 2.0));
        let ratios = overlay.ratios();
        assert_abs_diff_eq!(ratios.left, 0.0);
        assert_abs_diff_eq!(ratios.top, 0.0);
        assert_abs_diff_eq!(ratios.right, 0.7);
        assert!(ratios.bottom < 1.0);
    }

    #[test]
    fn inactive_overlay_ignores_pointer() {
        let overlay = CropOverlay::new();
        assert!(!HitTestable::<()>::accepts_pointer(&overlay));
    }
}
