// SPDX-License-Identifier: MPL-2.0
//! Two-pass layout over the widget arena.
//!
//! 1. **Measurement** (bottom-up): every node caches its natural size. Leaves
//!    ask their widget; containers combine their children's preferred sizes.
//! 2. **Allocation** (top-down): every container splits its inner box
//!    between its children with [`resolve_axis`] on the main axis and
//!    [`resolve_cross`] / [`align_offset`] on the cross axis.
//!
//! All values are physical pixels. Declared fixed sizes and paddings are
//! logical and go through [`ScaleFactor`] first.
//!
//! The [`WidgetTree`](crate::ui::tree::WidgetTree) decides when to run each
//! pass; this module only knows how.

pub mod geometry;
pub mod size;

pub use geometry::{Alignment, Axis, Padding, Point, Rect, Size};
pub use size::{align_offset, resolve_axis, resolve_cross, Length, SizeSpec, Track};

use crate::ui::scale::ScaleFactor;
use crate::ui::text::TextMeasurer;
use crate::ui::tree::{NodeArena, WidgetId};
use crate::ui::widgets::{MeasureContext, Measurable};

/// Work counters, for tests and benchmarks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    /// Nodes whose natural size was computed.
    pub measured: u64,
    /// Nodes that received bounds.
    pub allocated: u64,
}

pub struct LayoutEngine {
    scale: ScaleFactor,
    text: Box<dyn TextMeasurer>,
    stats: LayoutStats,
}

impl std::fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("scale", &self.scale)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl LayoutEngine {
    pub fn new(scale: ScaleFactor, text: Box<dyn TextMeasurer>) -> Self {
        Self {
            scale,
            text,
            stats: LayoutStats::default(),
        }
    }

    #[must_use]
    pub fn scale(&self) -> ScaleFactor {
        self.scale
    }

    #[must_use]
    pub fn measure_context(&self) -> MeasureContext<'_> {
        MeasureContext {
            scale: self.scale,
            text: self.text.as_ref(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> LayoutStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = LayoutStats::default();
    }

    /// Measures `id` and all its descendants, returning the new natural size.
    pub(crate) fn measure_subtree<M: Clone>(&mut self, nodes: &mut NodeArena<M>, id: WidgetId) -> Size {
        let children = nodes
            .get(id)
            .map(|node| node.children.clone())
            .unwrap_or_default();
        for child in children {
            self.measure_subtree(nodes, child);
        }
        self.measure_node(nodes, id)
    }

    /// Recomputes the natural size of `id` from its widget and its
    /// children's cached sizes.
    pub(crate) fn measure_node<M: Clone>(&mut self, nodes: &mut NodeArena<M>, id: WidgetId) -> Size {
        let Some(node) = nodes.get(id) else {
            return Size::ZERO;
        };
        let padding = node.options.padding.scaled(self.scale);

        let natural = if !node.options.visible {
            Size::ZERO
        } else if node.kind.is_container() {
            if node.children.is_empty() {
                Size::ZERO
            } else {
                let preferred = |child: WidgetId, axis: Axis| -> u32 {
                    nodes
                        .get(child)
                        .map_or(0, |child| {
                            self.preferred(
                                child.options.visible,
                                child.options.size.along(axis),
                                child.natural.main(axis),
                            )
                        })
                };
                let (width, height) = match node.kind.axis() {
                    Some(axis) => {
                        let main: u32 = node.children.iter().map(|&c| preferred(c, axis)).sum();
                        let cross = node
                            .children
                            .iter()
                            .map(|&c| preferred(c, axis.cross()))
                            .max()
                            .unwrap_or(0);
                        let size = Size::from_axis(axis, main, cross);
                        (size.width, size.height)
                    }
                    None => (
                        node.children
                            .iter()
                            .map(|&c| preferred(c, Axis::Horizontal))
                            .max()
                            .unwrap_or(0),
                        node.children
                            .iter()
                            .map(|&c| preferred(c, Axis::Vertical))
                            .max()
                            .unwrap_or(0),
                    ),
                };
                Size::new(width, height).expand(padding)
            }
        } else {
            node.kind.measure(&self.measure_context()).expand(padding)
        };

        if let Some(node) = nodes.get_mut(id) {
            node.natural = natural;
        }
        self.stats.measured += 1;
        natural
    }

    /// Size a child asks its parent for when the parent is content sized.
    fn preferred(&self, visible: bool, length: Length, natural: u32) -> u32 {
        if !visible {
            return 0;
        }
        match length.normalized() {
            Length::Fixed(px) => self.scale.px(px),
            _ => natural,
        }
    }

    /// Gives `id` the box `rect` and lays out its descendants inside it.
    ///
    /// Clears the dirty flag of every node it visits.
    pub(crate) fn allocate<M: Clone>(&mut self, nodes: &mut NodeArena<M>, id: WidgetId, rect: Rect) {
        let Some(node) = nodes.get_mut(id) else {
            return;
        };
        node.bounds = rect;
        node.dirty = false;
        self.stats.allocated += 1;

        let children = node.children.clone();
        let visible = node.options.visible;
        let padding = node.options.padding;
        let axis = node.kind.axis();
        if children.is_empty() {
            return;
        }
        if !visible {
            let collapsed = Rect::new(rect.x, rect.y, 0, 0);
            for child in children {
                self.allocate(nodes, child, collapsed);
            }
            return;
        }

        let inner = rect.inset(padding.scaled(self.scale));
        let placements = match axis {
            Some(axis) => self.place_linear(nodes, &children, inner, axis),
            None => self.place_stacked(nodes, &children, inner),
        };
        for (child, child_rect) in children.into_iter().zip(placements) {
            self.allocate(nodes, child, child_rect);
        }
    }

    fn track<M>(&self, nodes: &NodeArena<M>, child: WidgetId, axis: Axis) -> Track {
        match nodes.get(child) {
            Some(node) if node.options.visible => node
                .options
                .size
                .along(axis)
                .track(self.scale, node.natural.main(axis)),
            _ => Track::Fixed(0),
        }
    }

    fn alignment<M>(nodes: &NodeArena<M>, child: WidgetId) -> Alignment {
        nodes
            .get(child)
            .map_or(Alignment::Start, |node| node.options.align)
    }

    fn place_linear<M>(
        &self,
        nodes: &NodeArena<M>,
        children: &[WidgetId],
        inner: Rect,
        axis: Axis,
    ) -> Vec<Rect> {
        let available = inner.size();
        let tracks: Vec<Track> = children
            .iter()
            .map(|&child| self.track(nodes, child, axis))
            .collect();
        let mains = resolve_axis(available.main(axis), &tracks);

        let mut offset = 0u32;
        children
            .iter()
            .zip(mains)
            .map(|(&child, main)| {
                let cross_available = available.cross(axis);
                let cross = resolve_cross(cross_available, self.track(nodes, child, axis.cross()));
                let cross_offset = align_offset(cross_available, cross, Self::alignment(nodes, child));
                let rect = match axis {
                    Axis::Horizontal => {
                        Rect::new(inner.x + offset, inner.y + cross_offset, main, cross)
                    }
                    Axis::Vertical => {
                        Rect::new(inner.x + cross_offset, inner.y + offset, cross, main)
                    }
                };
                offset += main;
                rect
            })
            .collect()
    }

    fn place_stacked<M>(&self, nodes: &NodeArena<M>, children: &[WidgetId], inner: Rect) -> Vec<Rect> {
        children
            .iter()
            .map(|&child| {
                let align = Self::alignment(nodes, child);
                let width = resolve_cross(inner.width, self.track(nodes, child, Axis::Horizontal));
                let height = resolve_cross(inner.height, self.track(nodes, child, Axis::Vertical));
                Rect::new(
                    inner.x + align_offset(inner.width, width, align),
                    inner.y + align_offset(inner.height, height, align),
                    width,
                    height,
                )
            })
            .collect()
    }
}
