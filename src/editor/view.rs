// SPDX-License-Identifier: MPL-2.0
//! Widget tree of the editor window.
//!
//! ```text
//! ┌ menu ─────────────────────────────────────────────┐
//! │ Open Image  Save  Save As                         │
//! ├──┬─────────────────────────────┬──┬─┬─────────────┤
//! │  │ image view + crop overlay   │  │|│ [  Crop   ] │
//! │  │                             │  │|│ ─────────── │
//! │  │                             │  │|│ Filters     │
//! │  │                             │  │|│ [Blur] ==o= │
//! ├──┴─────────────────────────────┴──┴─┴─────────────┤
//! │ status                                            │
//! │ notifier (collapsed when empty)                   │
//! └───────────────────────────────────────────────────┘
//! ```

use super::messages::Message;
use crate::application::port::FilterKind;
use crate::error::Result;
use crate::ui::design_tokens::spacing;
use crate::ui::layout::{Alignment, Length, Padding, SizeSpec};
use crate::ui::tree::{WidgetId, WidgetTree};
use crate::ui::widgets::{Element, Orientation};

/// Text shown in the status bar before any image is loaded.
pub const INITIAL_STATUS: &str = "Image Editor, Load an image to edit it";

/// Status bar segment keys.
pub mod status_keys {
    pub const STATUS: &str = "status";
    pub const RESOLUTION: &str = "resolution";
    pub const PREVIEW: &str = "preview";
}

const IMAGE_STACK: &str = "image-stack";
const IMAGE_VIEW: &str = "image-view";
const CROP_OVERLAY: &str = "crop-overlay";
const CROP_BUTTON: &str = "crop-button";
const STATUS_BAR: &str = "status-bar";
const NOTIFIER: &str = "notifier";

fn filter_button_name(kind: FilterKind) -> String {
    format!("{}-apply", kind.name())
}

fn filter_slider_name(kind: FilterKind) -> String {
    format!("{}-slider", kind.name())
}

fn size(width: Length, height: Length) -> SizeSpec {
    SizeSpec::new(width, height)
}

/// Controls of one filter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterHandles {
    pub kind: FilterKind,
    pub apply: WidgetId,
    pub slider: WidgetId,
}

/// Widgets the editor talks to after mounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handles {
    pub image_stack: WidgetId,
    pub image_view: WidgetId,
    pub crop_overlay: WidgetId,
    pub crop_button: WidgetId,
    pub status_bar: WidgetId,
    pub notifier: WidgetId,
    pub filters: Vec<FilterHandles>,
}

impl Handles {
    fn resolve(tree: &WidgetTree<Message>) -> Result<Self> {
        let filters = FilterKind::ALL
            .iter()
            .map(|&kind| {
                Ok(FilterHandles {
                    kind,
                    apply: tree.find(&filter_button_name(kind))?,
                    slider: tree.find(&filter_slider_name(kind))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            image_stack: tree.find(IMAGE_STACK)?,
            image_view: tree.find(IMAGE_VIEW)?,
            crop_overlay: tree.find(CROP_OVERLAY)?,
            crop_button: tree.find(CROP_BUTTON)?,
            status_bar: tree.find(STATUS_BAR)?,
            notifier: tree.find(NOTIFIER)?,
            filters,
        })
    }

    /// Handles of `kind`'s row.
    #[must_use]
    pub fn filter(&self, kind: FilterKind) -> Option<FilterHandles> {
        self.filters.iter().copied().find(|handles| handles.kind == kind)
    }

    /// Every widget that stays disabled until an image is loaded.
    #[must_use]
    pub fn image_controls(&self) -> Vec<WidgetId> {
        let mut controls = vec![self.crop_button];
        for filter in &self.filters {
            controls.push(filter.apply);
            controls.push(filter.slider);
        }
        controls
    }
}

/// Per-filter slider ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterLimits {
    pub blur: u32,
    pub sharpen: u32,
}

impl FilterLimits {
    #[must_use]
    pub fn max(&self, kind: FilterKind) -> u32 {
        match kind {
            FilterKind::Blur => self.blur,
            FilterKind::Sharpen => self.sharpen,
        }
    }
}

fn filter_row(kind: FilterKind, max: u32) -> Element<Message> {
    Element::row([
        Element::spacer().size(size(Length::Fixed(spacing::XS), Length::Unset)),
        Element::button(kind.title(), Message::ApplyFilter(kind))
            .disabled(true)
            .name(filter_button_name(kind)),
        Element::spacer().size(size(Length::Fixed(spacing::MD), Length::Unset)),
        Element::slider(max, move |value| Message::FilterChanged(kind, value))
            .size(size(Length::Flex(1.0), Length::Unset))
            .align(Alignment::Center)
            .disabled(true)
            .name(filter_slider_name(kind)),
        Element::spacer().size(size(Length::Fixed(spacing::XS), Length::Unset)),
    ])
    .size(size(Length::Flex(1.0), Length::Unset))
}

fn vertical_gap(logical: u32) -> Element<Message> {
    Element::spacer().size(size(Length::Unset, Length::Fixed(logical)))
}

fn sidebar(limits: FilterLimits) -> Element<Message> {
    let mut column = Element::column([
        vertical_gap(spacing::XS),
        Element::button("Crop", Message::CropPressed)
            .size(size(Length::Flex(1.0), Length::Unset))
            .padding(Padding::symmetric(0, spacing::XS))
            .disabled(true)
            .name(CROP_BUTTON),
        vertical_gap(spacing::XS),
        Element::separator(Orientation::Horizontal).padding(Padding::symmetric(0, spacing::XS)),
        vertical_gap(spacing::XS),
        Element::label("Filters").align(Alignment::Center),
        vertical_gap(spacing::XXS),
    ])
    .size(size(Length::Percent(30.0), Length::Unset))
    .align(Alignment::Center);

    for kind in FilterKind::ALL {
        column = column
            .push(filter_row(kind, limits.max(kind)))
            .push(vertical_gap(spacing::XXS));
    }
    column
}

/// Declarative description of the editor window.
#[must_use]
pub fn layout(limits: FilterLimits) -> Element<Message> {
    let gutter = || Element::spacer().size(size(Length::Fixed(10), Length::Fixed(0)));
    let menu = Element::menu_bar([
        ("Open Image".to_string(), Message::OpenImage),
        ("Save".to_string(), Message::Save),
        ("Save As".to_string(), Message::SaveAs),
    ])
    .size(size(Length::Flex(1.0), Length::Unset));

    let image_stack = Element::stack([
        Element::image_view()
            .size(size(Length::Flex(1.0), Length::Flex(1.0)))
            .name(IMAGE_VIEW),
        Element::crop_overlay()
            .size(size(Length::Flex(1.0), Length::Flex(1.0)))
            .name(CROP_OVERLAY),
    ])
    .size(size(Length::Flex(1.0), Length::Flex(1.0)))
    .name(IMAGE_STACK);

    let body = Element::row([
        gutter(),
        image_stack,
        gutter(),
        Element::separator(Orientation::Vertical),
        sidebar(limits),
    ])
    .size(size(Length::Flex(1.0), Length::Flex(1.0)));

    Element::column([
        menu,
        body,
        Element::status_bar()
            .size(size(Length::Flex(1.0), Length::Unset))
            .name(STATUS_BAR),
        Element::notifier(Message::NotificationAction, Message::NotificationDismissed)
            .size(size(Length::Flex(1.0), Length::Unset))
            .name(NOTIFIER),
    ])
}

/// Mounts the editor window into `tree` and looks up its handles.
pub fn mount(tree: &mut WidgetTree<Message>, limits: FilterLimits) -> Result<Handles> {
    tree.mount(layout(limits));
    Handles::resolve(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::layout::Size;
    use crate::ui::scale::ScaleFactor;
    use crate::ui::text::MonospaceMeasurer;

    const LIMITS: FilterLimits = FilterLimits {
        blur: 20,
        sharpen: 10,
    };

    fn mounted(width: u32, height: u32) -> (WidgetTree<Message>, Handles) {
        let mut tree = WidgetTree::new(
            ScaleFactor::default(),
            Box::new(MonospaceMeasurer::default()),
            Size::new(width, height),
        );
        let handles = mount(&mut tree, LIMITS).expect("editor layout mounts");
        let root = tree.root().expect("root");
        tree.recalculate_layout(root, true).expect("layout");
        (tree, handles)
    }

    #[test]
    fn image_controls_start_disabled() {
        let (tree, handles) = mounted(1024, 720);
        for id in handles.image_controls() {
            assert!(tree.is_disabled(id).unwrap());
        }
        assert_eq!(handles.image_controls().len(), 1 + 2 * FilterKind::ALL.len());
    }

    #[test]
    fn sidebar_takes_thirty_percent_of_the_body() {
        let (tree, handles) = mounted(1000, 700);
        let crop = tree.bounds(handles.crop_button).unwrap();
        let sidebar = tree.node(tree.node(handles.crop_button).unwrap().parent().unwrap()).unwrap();
        assert_eq!(sidebar.bounds().width, 300);
        assert_eq!(sidebar.bounds().right(), 1000);
        // Crop button stretches across the sidebar.
        assert_eq!(crop.width, 300);
    }

    #[test]
    fn image_stack_fills_the_remaining_width() {
        let (tree, handles) = mounted(1000, 700);
        let stack = tree.bounds(handles.image_stack).unwrap();
        // 1000 - 300 (sidebar) - 1 (separator) - 2 * 10 (gutters).
        assert_eq!(stack.width, 679);
        assert_eq!(stack.x, 10);
        assert_eq!(tree.bounds(handles.image_view).unwrap(), stack);
        assert_eq!(tree.bounds(handles.crop_overlay).unwrap(), stack);
    }

    #[test]
    fn notifier_is_collapsed_and_status_bar_is_at_the_bottom() {
        let (tree, handles) = mounted(1000, 700);
        let notifier = tree.bounds(handles.notifier).unwrap();
        let status = tree.bounds(handles.status_bar).unwrap();
        assert_eq!(notifier.height, 0);
        assert_eq!(status.bottom(), 700);
    }
}
