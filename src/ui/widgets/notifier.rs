// SPDX-License-Identifier: MPL-2.0
//! Widget rendering the current notification.
//!
//! Collapses to zero height when nothing is shown. The editor copies the
//! [`EventNotifier`](crate::ui::notifications::EventNotifier) state into it
//! after every change.

use super::{
    HitTestable, MeasureContext, Measurable, PaintContext, Paintable, PointerEvent, PointerKind,
    PointerResponse,
};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::layout::{Point, Rect, Size};
use crate::ui::notifications::Severity;
use crate::ui::paint::Frame;

const DISMISS_LABEL: &str = "×";

#[derive(Debug, Clone, PartialEq)]
struct Shown {
    text: String,
    severity: Severity,
    action_label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Action,
    Dismiss,
}

#[derive(Debug, Clone)]
pub struct Notifier<M> {
    shown: Option<Shown>,
    on_action: M,
    on_dismiss: M,
    pressed: Option<Control>,
}

impl<M> Notifier<M> {
    pub fn new(on_action: M, on_dismiss: M) -> Self {
        Self {
            shown: None,
            on_action,
            on_dismiss,
            pressed: None,
        }
    }

    pub fn show(&mut self, text: impl Into<String>, severity: Severity, action_label: Option<String>) {
        self.shown = Some(Shown {
            text: text.into(),
            severity,
            action_label,
        });
        self.pressed = None;
    }

    pub fn clear(&mut self) {
        self.shown = None;
        self.pressed = None;
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.shown.as_ref().map(|shown| shown.text.as_str())
    }

    #[must_use]
    pub fn action_label(&self) -> Option<&str> {
        self.shown.as_ref()?.action_label.as_deref()
    }

    /// Rectangles of the action control (if any) and the dismiss control.
    fn controls(&self, bounds: Rect, ctx: &MeasureContext<'_>) -> Vec<(Control, Rect)> {
        let Some(shown) = &self.shown else {
            return Vec::new();
        };
        let gap = ctx.scale.px(spacing::XS);
        let mut right = bounds.right().saturating_sub(gap);
        let mut controls = Vec::with_capacity(2);

        let mut place = |control: Control, label: &str| {
            let width = ctx.text_size(label, typography::BODY).width + 2 * gap;
            let x = right.saturating_sub(width).max(bounds.x);
            controls.push((control, Rect::new(x, bounds.y, right.saturating_sub(x), bounds.height)));
            right = x;
        };
        place(Control::Dismiss, DISMISS_LABEL);
        if let Some(label) = &shown.action_label {
            place(Control::Action, label);
        }
        controls
    }

    fn control_at(&self, bounds: Rect, ctx: &MeasureContext<'_>, position: Point) -> Option<Control> {
        self.controls(bounds, ctx)
            .into_iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(control, _)| control)
    }
}

impl<M> Measurable for Notifier<M> {
    fn measure(&self, ctx: &MeasureContext<'_>) -> Size {
        match &self.shown {
            None => Size::ZERO,
            Some(shown) => {
                let text = ctx.text_size(&shown.text, typography::BODY);
                Size::new(
                    text.width + 2 * ctx.scale.px(spacing::SM),
                    text.height.max(ctx.scale.px(sizing::BAR_HEIGHT)),
                )
            }
        }
    }
}

impl<M> Paintable for Notifier<M> {
    fn paint(&self, bounds: Rect, ctx: &PaintContext<'_>, frame: &mut Frame) {
        let Some(shown) = &self.shown else {
            return;
        };
        frame.fill_rect(bounds, palette::GRAY_800);
        let accent = ctx.scale().px(spacing::XXS);
        frame.fill_rect(
            Rect::new(bounds.x, bounds.y, accent.min(bounds.width), bounds.height),
            shown.severity.color(),
        );

        let extent = ctx.measure.text_size(&shown.text, typography::BODY);
        let y = bounds.y + bounds.height.saturating_sub(extent.height) / 2;
        frame.text(
            Point::new((bounds.x + ctx.scale().px(spacing::SM)) as f32, y as f32),
            shown.text.as_str(),
            ctx.scale().px_f32(typography::BODY),
            palette::GRAY_100,
        );

        for (control, rect) in self.controls(bounds, &ctx.measure) {
            let label = match control {
                Control::Dismiss => DISMISS_LABEL,
                Control::Action => shown.action_label.as_deref().unwrap_or_default(),
            };
            if self.pressed == Some(control) {
                frame.fill_rect(rect, palette::GRAY_700);
            }
            ctx.centered_text(frame, rect, label, typography::BODY, palette::PRIMARY_400);
        }
    }
}

impl<M: Clone> HitTestable<M> for Notifier<M> {
    fn accepts_pointer(&self) -> bool {
        self.shown.is_some()
    }

    fn on_pointer(
        &mut self,
        event: PointerEvent,
        bounds: Rect,
        ctx: &MeasureContext<'_>,
    ) -> PointerResponse<M> {
        match event.kind {
            PointerKind::Pressed => match self.control_at(bounds, ctx, event.position) {
                Some(control) => {
                    self.pressed = Some(control);
                    PointerResponse::captured()
                }
                None => PointerResponse::ignored(),
            },
            PointerKind::Moved => PointerResponse::captured(),
            PointerKind::Released => {
                let pressed = self.pressed.take();
                match (pressed, self.control_at(bounds, ctx, event.position)) {
                    (Some(Control::Action), Some(Control::Action)) => {
                        PointerResponse::publish(self.on_action.clone())
                    }
                    (Some(Control::Dismiss), Some(Control::Dismiss)) => {
                        PointerResponse::publish(self.on_dismiss.clone())
                    }
                    _ => PointerResponse::ignored(),
                }
            }
        }
    }
}
