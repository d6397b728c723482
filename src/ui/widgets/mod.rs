// SPDX-License-Identifier: MPL-2.0
//! Widget kinds and the declarative element builder.
//!
//! A widget is one variant of [`WidgetKind`]. Containers (`Row`, `Column`,
//! `Stack`) only arrange children; every other kind is a leaf exposing some
//! of the capabilities [`Measurable`], [`Paintable`] and [`HitTestable`].
//!
//! Widgets never call back into the application. An interactive widget
//! answers pointer events with a [`PointerResponse`] that may carry a typed
//! message `M`; the tree collects those and the application dispatches them.
//!
//! Trees are written declaratively with [`Element`]:
//!
//! ```
//! use imeditor::ui::widgets::Element;
//!
//! #[derive(Debug, Clone)]
//! enum Message { Crop }
//!
//! let sidebar: Element<Message> = Element::column([
//!     Element::label("Tools"),
//!     Element::button("Crop", Message::Crop).name("crop"),
//! ]);
//! # let _ = sidebar;
//! ```

pub mod controls;
pub mod crop_overlay;
pub mod image_view;
pub mod menu_bar;
pub mod notifier;
pub mod status_bar;

pub use controls::{Button, Label, Orientation, Separator, Slider};
pub use crop_overlay::CropOverlay;
pub use image_view::ImageView;
pub use menu_bar::MenuBar;
pub use notifier::Notifier;
pub use status_bar::StatusBar;

use crate::ui::layout::{Alignment, Axis, Length, Padding, Point, Rect, Size, SizeSpec};
use crate::ui::paint::Frame;
use crate::ui::scale::ScaleFactor;
use crate::ui::text::TextMeasurer;

// =============================================================================
// Capabilities
// =============================================================================

/// Environment available while measuring.
#[derive(Clone, Copy)]
pub struct MeasureContext<'a> {
    pub scale: ScaleFactor,
    pub text: &'a dyn TextMeasurer,
}

impl MeasureContext<'_> {
    /// Physical extent of `text` at logical font `size`, rounded up.
    #[must_use]
    pub fn text_size(&self, text: &str, size: f32) -> Size {
        let (width, height) = self.text.measure(text, self.scale.px_f32(size));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let size = Size::new(width.ceil() as u32, height.ceil() as u32);
        size
    }
}

/// Environment available while painting.
#[derive(Clone, Copy)]
pub struct PaintContext<'a> {
    pub measure: MeasureContext<'a>,
    /// Set when the widget or one of its ancestors is disabled.
    pub disabled: bool,
}

impl PaintContext<'_> {
    #[must_use]
    pub fn scale(&self) -> ScaleFactor {
        self.measure.scale
    }

    /// Draws `text` centered in `rect`.
    pub fn centered_text(
        &self,
        frame: &mut Frame,
        rect: Rect,
        text: &str,
        size: f32,
        color: crate::ui::paint::Color,
    ) {
        let extent = self.measure.text_size(text, size);
        let x = rect.x as f32 + (rect.width.saturating_sub(extent.width) / 2) as f32;
        let y = rect.y as f32 + (rect.height.saturating_sub(extent.height) / 2) as f32;
        frame.text(Point::new(x, y), text, self.scale().px_f32(size), color);
    }
}

/// Leaf widgets with a content-driven natural size.
pub trait Measurable {
    /// Natural size in physical pixels, padding excluded.
    fn measure(&self, ctx: &MeasureContext<'_>) -> Size;
}

/// Widgets that draw themselves.
pub trait Paintable {
    /// Records draw commands for a widget occupying `bounds`.
    fn paint(&self, bounds: Rect, ctx: &PaintContext<'_>, frame: &mut Frame);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Pressed,
    Moved,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

/// A widget's answer to a pointer event.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerResponse<M> {
    /// Route the following moves and the release to this widget.
    pub capture: bool,
    pub message: Option<M>,
}

impl<M> PointerResponse<M> {
    #[must_use]
    pub fn ignored() -> Self {
        Self {
            capture: false,
            message: None,
        }
    }

    #[must_use]
    pub fn captured() -> Self {
        Self {
            capture: true,
            message: None,
        }
    }

    #[must_use]
    pub fn publish(message: M) -> Self {
        Self {
            capture: false,
            message: Some(message),
        }
    }

    #[must_use]
    pub fn and_capture(mut self) -> Self {
        self.capture = true;
        self
    }
}

/// Widgets that react to the pointer.
pub trait HitTestable<M> {
    /// Whether the widget currently takes part in hit-testing.
    fn accepts_pointer(&self) -> bool {
        true
    }

    fn on_pointer(
        &mut self,
        event: PointerEvent,
        bounds: Rect,
        ctx: &MeasureContext<'_>,
    ) -> PointerResponse<M>;
}

// =============================================================================
// WidgetKind
// =============================================================================

/// Every widget the framework knows about.
#[derive(Debug)]
pub enum WidgetKind<M> {
    Row,
    Column,
    Stack,
    Button(Button<M>),
    Slider(Slider<M>),
    Label(Label),
    Spacer,
    Separator(Separator),
    ImageView(ImageView),
    CropOverlay(CropOverlay),
    StatusBar(StatusBar),
    Notifier(Notifier<M>),
    MenuBar(MenuBar<M>),
}

impl<M: Clone> WidgetKind<M> {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Row => "row",
            WidgetKind::Column => "column",
            WidgetKind::Stack => "stack",
            WidgetKind::Button(_) => "button",
            WidgetKind::Slider(_) => "slider",
            WidgetKind::Label(_) => "label",
            WidgetKind::Spacer => "spacer",
            WidgetKind::Separator(_) => "separator",
            WidgetKind::ImageView(_) => "image view",
            WidgetKind::CropOverlay(_) => "crop overlay",
            WidgetKind::StatusBar(_) => "status bar",
            WidgetKind::Notifier(_) => "notifier",
            WidgetKind::MenuBar(_) => "menu bar",
        }
    }

    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, WidgetKind::Row | WidgetKind::Column | WidgetKind::Stack)
    }

    /// Main axis of linear containers.
    #[must_use]
    pub fn axis(&self) -> Option<Axis> {
        match self {
            WidgetKind::Row => Some(Axis::Horizontal),
            WidgetKind::Column => Some(Axis::Vertical),
            _ => None,
        }
    }
}

impl<M: Clone> Measurable for WidgetKind<M> {
    fn measure(&self, ctx: &MeasureContext<'_>) -> Size {
        match self {
            WidgetKind::Row | WidgetKind::Column | WidgetKind::Stack | WidgetKind::Spacer => {
                Size::ZERO
            }
            WidgetKind::Button(button) => button.measure(ctx),
            WidgetKind::Slider(slider) => slider.measure(ctx),
            WidgetKind::Label(label) => label.measure(ctx),
            WidgetKind::Separator(separator) => separator.measure(ctx),
            WidgetKind::ImageView(view) => view.measure(ctx),
            WidgetKind::CropOverlay(_) => Size::ZERO,
            WidgetKind::StatusBar(bar) => bar.measure(ctx),
            WidgetKind::Notifier(notifier) => notifier.measure(ctx),
            WidgetKind::MenuBar(menu) => menu.measure(ctx),
        }
    }
}

impl<M: Clone> Paintable for WidgetKind<M> {
    fn paint(&self, bounds: Rect, ctx: &PaintContext<'_>, frame: &mut Frame) {
        match self {
            WidgetKind::Row | WidgetKind::Column | WidgetKind::Stack | WidgetKind::Spacer => {}
            WidgetKind::Button(button) => button.paint(bounds, ctx, frame),
            WidgetKind::Slider(slider) => slider.paint(bounds, ctx, frame),
            WidgetKind::Label(label) => label.paint(bounds, ctx, frame),
            WidgetKind::Separator(separator) => separator.paint(bounds, ctx, frame),
            WidgetKind::ImageView(view) => view.paint(bounds, ctx, frame),
            WidgetKind::CropOverlay(overlay) => overlay.paint(bounds, ctx, frame),
            WidgetKind::StatusBar(bar) => bar.paint(bounds, ctx, frame),
            WidgetKind::Notifier(notifier) => notifier.paint(bounds, ctx, frame),
            WidgetKind::MenuBar(menu) => menu.paint(bounds, ctx, frame),
        }
    }
}

impl<M: Clone> HitTestable<M> for WidgetKind<M> {
    fn accepts_pointer(&self) -> bool {
        match self {
            WidgetKind::Button(_) | WidgetKind::Slider(_) | WidgetKind::MenuBar(_) => true,
            WidgetKind::CropOverlay(overlay) => HitTestable::<M>::accepts_pointer(overlay),
            WidgetKind::Notifier(notifier) => notifier.accepts_pointer(),
            _ => false,
        }
    }

    fn on_pointer(
        &mut self,
        event: PointerEvent,
        bounds: Rect,
        ctx: &MeasureContext<'_>,
    ) -> PointerResponse<M> {
        match self {
            WidgetKind::Button(button) => button.on_pointer(event, bounds, ctx),
            WidgetKind::Slider(slider) => slider.on_pointer(event, bounds, ctx),
            WidgetKind::CropOverlay(overlay) => overlay.on_pointer(event, bounds, ctx),
            WidgetKind::Notifier(notifier) => notifier.on_pointer(event, bounds, ctx),
            WidgetKind::MenuBar(menu) => menu.on_pointer(event, bounds, ctx),
            _ => PointerResponse::ignored(),
        }
    }
}

/// Typed access to the widget stored in a node.
pub trait WidgetCast<M>: Sized {
    /// Reported in [`crate::error::Error::WidgetKind`].
    const KIND: &'static str;

    fn cast(kind: &WidgetKind<M>) -> Option<&Self>;

    fn cast_mut(kind: &mut WidgetKind<M>) -> Option<&mut Self>;
}

macro_rules! widget_cast {
    ($variant:ident, $ty:ty, $kind:literal) => {
        impl<M> WidgetCast<M> for $ty {
            const KIND: &'static str = $kind;

            fn cast(kind: &WidgetKind<M>) -> Option<&Self> {
                match kind {
                    WidgetKind::$variant(widget) => Some(widget),
                    _ => None,
                }
            }

            fn cast_mut(kind: &mut WidgetKind<M>) -> Option<&mut Self> {
                match kind {
                    WidgetKind::$variant(widget) => Some(widget),
                    _ => None,
                }
            }
        }
    };
}

widget_cast!(Button, Button<M>, "button");
widget_cast!(Slider, Slider<M>, "slider");
widget_cast!(Label, Label, "label");
widget_cast!(Separator, Separator, "separator");
widget_cast!(ImageView, ImageView, "image view");
widget_cast!(CropOverlay, CropOverlay, "crop overlay");
widget_cast!(StatusBar, StatusBar, "status bar");
widget_cast!(Notifier, Notifier<M>, "notifier");
widget_cast!(MenuBar, MenuBar<M>, "menu bar");

// =============================================================================
// Element builder
// =============================================================================

/// Configuration fixed when a widget is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub size: SizeSpec,
    /// Logical pixels.
    pub padding: Padding,
    /// Placement on the parent's cross axis (both axes inside a stack).
    pub align: Alignment,
    pub visible: bool,
    /// Disabled widgets keep their space but ignore the pointer.
    pub disabled: bool,
    /// Lookup key for [`crate::ui::tree::WidgetTree::find`].
    pub name: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            size: SizeSpec::UNSET,
            padding: Padding::ZERO,
            align: Alignment::Start,
            visible: true,
            disabled: false,
            name: None,
        }
    }
}

/// A widget description, mounted into a [`crate::ui::tree::WidgetTree`].
#[derive(Debug)]
pub struct Element<M> {
    pub(crate) kind: WidgetKind<M>,
    pub(crate) options: Options,
    pub(crate) children: Vec<Element<M>>,
}

impl<M> Element<M> {
    fn leaf(kind: WidgetKind<M>) -> Self {
        Self {
            kind,
            options: Options::default(),
            children: Vec::new(),
        }
    }

    fn container(kind: WidgetKind<M>, children: impl IntoIterator<Item = Element<M>>) -> Self {
        Self {
            kind,
            options: Options::default(),
            children: children.into_iter().collect(),
        }
    }

    /// Children laid out left to right.
    pub fn row(children: impl IntoIterator<Item = Element<M>>) -> Self {
        Self::container(WidgetKind::Row, children)
    }

    /// Children laid out top to bottom.
    pub fn column(children: impl IntoIterator<Item = Element<M>>) -> Self {
        Self::container(WidgetKind::Column, children)
    }

    /// Children layered on top of each other, later children above.
    pub fn stack(children: impl IntoIterator<Item = Element<M>>) -> Self {
        Self::container(WidgetKind::Stack, children)
    }

    pub fn button(label: impl Into<String>, on_press: M) -> Self {
        Self::leaf(WidgetKind::Button(Button::new(label, on_press)))
    }

    /// Integer slider over `0..=max`.
    pub fn slider(max: u32, on_change: impl Fn(f32) -> M + 'static) -> Self {
        Self::leaf(WidgetKind::Slider(Slider::new(max, on_change)))
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self::leaf(WidgetKind::Label(Label::new(text)))
    }

    pub fn spacer() -> Self {
        Self::leaf(WidgetKind::Spacer)
    }

    /// A thin line that stretches along its long axis by default.
    pub fn separator(orientation: Orientation) -> Self {
        let mut element = Self::leaf(WidgetKind::Separator(Separator::new(orientation)));
        element.options.size = match orientation {
            Orientation::Vertical => SizeSpec::new(Length::Unset, Length::Flex(1.0)),
            Orientation::Horizontal => SizeSpec::new(Length::Flex(1.0), Length::Unset),
        };
        element
    }

    pub fn image_view() -> Self {
        Self::leaf(WidgetKind::ImageView(ImageView::new()))
    }

    pub fn crop_overlay() -> Self {
        Self::leaf(WidgetKind::CropOverlay(CropOverlay::new()))
    }

    pub fn status_bar() -> Self {
        Self::leaf(WidgetKind::StatusBar(StatusBar::new()))
    }

    /// Message line with an optional action control and a dismiss control.
    pub fn notifier(on_action: M, on_dismiss: M) -> Self {
        Self::leaf(WidgetKind::Notifier(Notifier::new(on_action, on_dismiss)))
    }

    pub fn menu_bar(items: impl IntoIterator<Item = (String, M)>) -> Self {
        Self::leaf(WidgetKind::MenuBar(MenuBar::new(items)))
    }

    #[must_use]
    pub fn size(mut self, size: SizeSpec) -> Self {
        self.options.size = size;
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: Padding) -> Self {
        self.options.padding = padding;
        self
    }

    #[must_use]
    pub fn align(mut self, align: Alignment) -> Self {
        self.options.align = align;
        self
    }

    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.options.visible = visible;
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.options.disabled = disabled;
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.options.name = Some(name.into());
        self
    }

    /// Appends a child. Only meaningful for containers.
    #[must_use]
    pub fn push(mut self, child: Element<M>) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }
}
