// SPDX-License-Identifier: MPL-2.0
//! Leaf controls: buttons, sliders, labels and separators.

use super::{
    HitTestable, MeasureContext, Measurable, PaintContext, Paintable, PointerEvent, PointerKind,
    PointerResponse,
};
use crate::ui::design_tokens::{opacity, palette, sizing, spacing, typography};
use crate::ui::layout::{Point, Rect, Size};
use crate::ui::paint::{Color, Frame};
use std::fmt;

// =============================================================================
// Button
// =============================================================================

/// Push button publishing `on_press` when released over itself.
#[derive(Debug, Clone)]
pub struct Button<M> {
    label: String,
    on_press: M,
    pressed: bool,
}

impl<M> Button<M> {
    pub fn new(label: impl Into<String>, on_press: M) -> Self {
        Self {
            label: label.into(),
            on_press,
            pressed: false,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

impl<M> Measurable for Button<M> {
    fn measure(&self, ctx: &MeasureContext<'_>) -> Size {
        let text = ctx.text_size(&self.label, typography::BODY);
        Size::new(
            text.width + 2 * ctx.scale.px(spacing::SM),
            text.height.max(ctx.scale.px(sizing::BUTTON_HEIGHT)),
        )
    }
}

impl<M> Paintable for Button<M> {
    fn paint(&self, bounds: Rect, ctx: &PaintContext<'_>, frame: &mut Frame) {
        let (background, foreground) = if ctx.disabled {
            (palette::GRAY_700, palette::GRAY_200.with_alpha(opacity::DISABLED))
        } else if self.pressed {
            (palette::PRIMARY_700, palette::WHITE)
        } else {
            (palette::PRIMARY_500, palette::WHITE)
        };
        frame.fill_rect(bounds, background);
        ctx.centered_text(frame, bounds, &self.label, typography::BODY, foreground);
    }
}

impl<M: Clone> HitTestable<M> for Button<M> {
    fn on_pointer(
        &mut self,
        event: PointerEvent,
        bounds: Rect,
        _ctx: &MeasureContext<'_>,
    ) -> PointerResponse<M> {
        match event.kind {
            PointerKind::Pressed => {
                self.pressed = true;
                PointerResponse::captured()
            }
            PointerKind::Moved => PointerResponse::captured(),
            PointerKind::Released => {
                let was_pressed = std::mem::take(&mut self.pressed);
                if was_pressed && bounds.contains(event.position) {
                    PointerResponse::publish(self.on_press.clone())
                } else {
                    PointerResponse::ignored()
                }
            }
        }
    }
}

// =============================================================================
// Slider
// =============================================================================

/// Horizontal integer slider over `0..=max` with a step of 1.
///
/// User drags publish `on_change(value)` whenever the value changes;
/// [`Slider::set_value`] is silent.
pub struct Slider<M> {
    value: f32,
    max: f32,
    on_change: Box<dyn Fn(f32) -> M>,
    dragging: bool,
}

impl<M> fmt::Debug for Slider<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slider")
            .field("value", &self.value)
            .field("max", &self.max)
            .field("dragging", &self.dragging)
            .finish_non_exhaustive()
    }
}

impl<M> Slider<M> {
    pub fn new(max: u32, on_change: impl Fn(f32) -> M + 'static) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let max = max.max(1) as f32;
        Self {
            value: 0.0,
            max,
            on_change: Box::new(on_change),
            dragging: false,
        }
    }

    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[must_use]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Moves the thumb without publishing a message.
    pub fn set_value(&mut self, value: f32) {
        self.value = self.snap(value);
    }

    fn snap(&self, value: f32) -> f32 {
        if value.is_finite() {
            value.round().clamp(0.0, self.max)
        } else {
            0.0
        }
    }

    /// Horizontal span the thumb center travels along.
    fn track(bounds: Rect, ctx: &MeasureContext<'_>) -> (f32, f32) {
        let inset = ctx.scale.px_f32(sizing::SLIDER_THUMB) / 2.0;
        let start = bounds.x as f32 + inset;
        let end = (bounds.right() as f32 - inset).max(start);
        (start, end)
    }

    fn value_at(&self, x: f32, bounds: Rect, ctx: &MeasureContext<'_>) -> f32 {
        let (start, end) = Self::track(bounds, ctx);
        let width = end - start;
        if width <= 0.0 {
            return 0.0;
        }
        self.snap((x - start) / width * self.max)
    }

    fn drag_to(&mut self, x: f32, bounds: Rect, ctx: &MeasureContext<'_>) -> PointerResponse<M> {
        let value = self.value_at(x, bounds, ctx);
        #[allow(clippy::float_cmp)]
        if value == self.value {
            return PointerResponse::captured();
        }
        self.value = value;
        PointerResponse::publish((self.on_change)(value)).and_capture()
    }
}

impl<M> Measurable for Slider<M> {
    fn measure(&self, ctx: &MeasureContext<'_>) -> Size {
        Size::new(
            ctx.scale.px(10 * spacing::XS),
            ctx.scale.px(sizing::SLIDER_HEIGHT),
        )
    }
}

impl<M> Paintable for Slider<M> {
    fn paint(&self, bounds: Rect, ctx: &PaintContext<'_>, frame: &mut Frame) {
        let (start, end) = Self::track(bounds, &ctx.measure);
        let center_y = bounds.y as f32 + bounds.height as f32 / 2.0;
        let track = ctx.scale().px_f32(sizing::SLIDER_TRACK);
        let accent = if ctx.disabled {
            palette::GRAY_400
        } else {
            palette::PRIMARY_400
        };
        let thumb_x = start + (end - start) * (self.value / self.max);

        frame.line(
            Point::new(start, center_y),
            Point::new(end, center_y),
            palette::GRAY_700,
            track,
        );
        frame.line(
            Point::new(start, center_y),
            Point::new(thumb_x, center_y),
            accent,
            track,
        );

        let thumb = ctx.scale().px_f32(sizing::SLIDER_THUMB);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let thumb_rect = Rect::new(
            (thumb_x - thumb / 2.0).max(0.0) as u32,
            (center_y - thumb / 2.0).max(0.0) as u32,
            thumb as u32,
            thumb as u32,
        );
        frame.fill_rect(thumb_rect, accent);
    }
}

impl<M> HitTestable<M> for Slider<M> {
    fn on_pointer(
        &mut self,
        event: PointerEvent,
        bounds: Rect,
        ctx: &MeasureContext<'_>,
    ) -> PointerResponse<M> {
        match event.kind {
            PointerKind::Pressed => {
                self.dragging = true;
                self.drag_to(event.position.x, bounds, ctx)
            }
            PointerKind::Moved if self.dragging => self.drag_to(event.position.x, bounds, ctx),
            PointerKind::Moved => PointerResponse::ignored(),
            PointerKind::Released => {
                self.dragging = false;
                PointerResponse::ignored()
            }
        }
    }
}

// =============================================================================
// Label
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    text: String,
    size: f32,
    color: Color,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: typography::BODY,
            color: palette::GRAY_100,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text. The natural size changes with it.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Measurable for Label {
    fn measure(&self, ctx: &MeasureContext<'_>) -> Size {
        ctx.text_size(&self.text, self.size)
    }
}

impl Paintable for Label {
    fn paint(&self, bounds: Rect, ctx: &PaintContext<'_>, frame: &mut Frame) {
        frame.text(
            Point::new(bounds.x as f32, bounds.y as f32),
            self.text.as_str(),
            ctx.scale().px_f32(self.size),
            self.color,
        );
    }
}

// =============================================================================
// Separator
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One logical pixel thick divider line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separator {
    orientation: Orientation,
}

impl Separator {
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        Self { orientation }
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

impl Measurable for Separator {
    fn measure(&self, ctx: &MeasureContext<'_>) -> Size {
        let thickness = ctx.scale.px(sizing::SEPARATOR).max(1);
        match self.orientation {
            Orientation::Horizontal => Size::new(0, thickness),
            Orientation::Vertical => Size::new(thickness, 0),
        }
    }
}

impl Paintable for Separator {
    fn paint(&self, bounds: Rect, _ctx: &PaintContext<'_>, frame: &mut Frame) {
        frame.fill_rect(bounds, palette::GRAY_700);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::scale::ScaleFactor;
    use crate::ui::text::MonospaceMeasurer;

    #[derive(Debug, Clone, PartialEq)]
    enum Message {
        Pressed,
        Changed(f32),
    }

    fn ctx(measurer: &MonospaceMeasurer) -> MeasureContext<'_> {
        MeasureContext {
            scale: ScaleFactor::default(),
            text: measurer,
        }
    }

    fn event(kind: PointerKind, x: f32, y: f32) -> PointerEvent {
        PointerEvent {
            kind,
            position: Point::new(x, y),
        }
    }

    #[test]
    fn button_fires_on_release_inside() {
        let measurer = MonospaceMeasurer::default();
        let bounds = Rect::new(0, 0, 100, 30);
        let mut button = Button::new("Crop", Message::Pressed);

        let press = button.on_pointer(event(PointerKind::Pressed, 10.0, 10.0), bounds, &ctx(&measurer));
        assert!(press.capture);
        assert!(press.message.is_none());
        assert!(button.is_pressed());

        let release =
            button.on_pointer(event(PointerKind::Released, 20.0, 10.0), bounds, &ctx(&measurer));
        assert_eq!(release.message, Some(Message::Pressed));
        assert!(!button.is_pressed());
    }

    #[test]
    fn button_release_outside_cancels() {
        let measurer = MonospaceMeasurer::default();
        let bounds = Rect::new(0, 0, 100, 30);
        let mut button = Button::new("Crop", Message::Pressed);

        button.on_pointer(event(PointerKind::Pressed, 10.0, 10.0), bounds, &ctx(&measurer));
        let release =
            button.on_pointer(event(PointerKind::Released, 200.0, 10.0), bounds, &ctx(&measurer));
        assert!(release.message.is_none());
    }

    #[test]
    fn slider_publishes_only_on_change() {
        let measurer = MonospaceMeasurer::default();
        // Thumb inset is 6px on each side: the track spans 6..=106.
        let bounds = Rect::new(0, 0, 112, 24);
        let mut slider = Slider::new(10, Message::Changed);

        let press = slider.on_pointer(event(PointerKind::Pressed, 56.0, 12.0), bounds, &ctx(&measurer));
        assert_eq!(press.message, Some(Message::Changed(5.0)));
        assert!(press.capture);

        let same = slider.on_pointer(event(PointerKind::Moved, 57.0, 12.0), bounds, &ctx(&measurer));
        assert!(same.message.is_none());

        let end = slider.on_pointer(event(PointerKind::Moved, 500.0, 12.0), bounds, &ctx(&measurer));
        assert_eq!(end.message, Some(Message::Changed(10.0)));

        slider.on_pointer(event(PointerKind::Released, 500.0, 12.0), bounds, &ctx(&measurer));
        let after = slider.on_pointer(event(PointerKind::Moved, 6.0, 12.0), bounds, &ctx(&measurer));
        assert!(after.message.is_none());
        assert_eq!(slider.value(), 10.0);
    }

    #[test]
    fn slider_set_value_snaps_and_clamps() {
        let mut slider = Slider::new(20, Message::Changed);
        slider.set_value(4.6);
        assert_eq!(slider.value(), 5.0);
        slider.set_value(99.0);
        assert_eq!(slider.value(), 20.0);
        slider.set_value(-1.0);
        assert_eq!(slider.value(), 0.0);
    }

    #[test]
    fn label_measures_its_text() {
        let measurer = MonospaceMeasurer::default();
        let label = Label::new("Filters");
        let size = label.measure(&ctx(&measurer));
        assert!(size.width > 0);
        assert!(size.height > 0);

        let empty = Label::new("");
        assert_eq!(empty.measure(&ctx(&measurer)), Size::ZERO);
    }

    #[test]
    fn separator_is_thin_across() {
        let measurer = MonospaceMeasurer::default();
        let vertical = Separator::new(Orientation::Vertical).measure(&ctx(&measurer));
        assert_eq!(vertical, Size::new(1, 0));
    }
}
