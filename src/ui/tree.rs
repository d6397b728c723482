// SPDX-License-Identifier: MPL-2.0
//! Retained widget tree.
//!
//! Nodes live in a [`SlotMap`] arena and refer to each other by
//! [`WidgetId`]; a node owns its children, and removing a node removes its
//! whole subtree. The tree tracks staleness with a per-node dirty flag:
//! changing a node's size, children or visibility marks the node and all of
//! its ancestors dirty, and [`WidgetTree::recalculate_layout`] only works
//! when something under the requested node is dirty (or when forced).
//!
//! Input is routed with [`WidgetTree::dispatch`], which hit-tests the
//! deepest enabled widget under the pointer, keeps routing to it while it
//! holds the pointer capture, and returns the messages widgets published.

use crate::error::{Error, Result};
use crate::ui::layout::{LayoutEngine, LayoutStats, Point, Rect, Size, SizeSpec};
use crate::ui::paint::Frame;
use crate::ui::scale::ScaleFactor;
use crate::ui::text::TextMeasurer;
use crate::ui::widgets::{
    Element, HitTestable, Options, PaintContext, Paintable, PointerEvent, PointerKind, WidgetCast,
    WidgetKind,
};
use slotmap::{new_key_type, SlotMap};
use std::collections::HashMap;

new_key_type! {
    pub struct WidgetId;
}

pub(crate) type NodeArena<M> = SlotMap<WidgetId, Node<M>>;

/// One widget plus its place in the tree and its last layout.
#[derive(Debug)]
pub struct Node<M> {
    pub(crate) kind: WidgetKind<M>,
    pub(crate) options: Options,
    pub(crate) parent: Option<WidgetId>,
    pub(crate) children: Vec<WidgetId>,
    pub(crate) dirty: bool,
    /// Measured size, physical pixels, padding included.
    pub(crate) natural: Size,
    /// Allocated box, physical pixels, window coordinates.
    pub(crate) bounds: Rect,
}

impl<M> Node<M> {
    #[must_use]
    pub fn kind(&self) -> &WidgetKind<M> {
        &self.kind
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn natural(&self) -> Size {
        self.natural
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// Raw input delivered by the backend, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerPressed { x: f32, y: f32 },
    PointerMoved { x: f32, y: f32 },
    PointerReleased { x: f32, y: f32 },
    Resized { width: u32, height: u32 },
}

#[derive(Debug)]
pub struct WidgetTree<M> {
    nodes: NodeArena<M>,
    names: HashMap<String, WidgetId>,
    root: Option<WidgetId>,
    viewport: Size,
    engine: LayoutEngine,
    captured: Option<WidgetId>,
}

impl<M: Clone> WidgetTree<M> {
    pub fn new(scale: ScaleFactor, text: Box<dyn TextMeasurer>, viewport: Size) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            names: HashMap::new(),
            root: None,
            viewport,
            engine: LayoutEngine::new(scale, text),
            captured: None,
        }
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Replaces the whole tree with `element` and returns the new root.
    pub fn mount(&mut self, element: Element<M>) -> WidgetId {
        self.nodes.clear();
        self.names.clear();
        self.captured = None;
        let root = self.insert(element, None);
        self.root = Some(root);
        root
    }

    /// Adds `element` as the last child of `parent`.
    pub fn append_child(&mut self, parent: WidgetId, element: Element<M>) -> Result<WidgetId> {
        if !self.node(parent)?.kind.is_container() {
            return Err(Error::WidgetKind {
                expected: "container",
            });
        }
        let child = self.insert(element, Some(parent));
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        self.mark_dirty(parent)?;
        Ok(child)
    }

    /// Removes `id` and its subtree.
    pub fn remove(&mut self, id: WidgetId) -> Result<()> {
        let parent = self.node(id)?.parent;
        if let Some(parent) = parent.and_then(|parent| self.nodes.get_mut(parent)) {
            parent.children.retain(|&child| child != id);
        }

        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(current) {
                pending.extend(node.children);
                if let Some(name) = node.options.name {
                    self.names.remove(&name);
                }
            }
            if self.captured == Some(current) {
                self.captured = None;
            }
        }

        if self.root == Some(id) {
            self.root = None;
        }
        if let Some(parent) = parent {
            self.mark_dirty(parent)?;
        }
        Ok(())
    }

    fn insert(&mut self, element: Element<M>, parent: Option<WidgetId>) -> WidgetId {
        let Element {
            kind,
            options,
            children,
        } = element;
        let name = options.name.clone();
        let id = self.nodes.insert(Node {
            kind,
            options,
            parent,
            children: Vec::new(),
            dirty: true,
            natural: Size::ZERO,
            bounds: Rect::default(),
        });
        if let Some(name) = name {
            if let Some(previous) = self.names.insert(name.clone(), id) {
                tracing::warn!(%name, ?previous, "widget name reused, lookups now find the newer widget");
            }
        }
        let child_ids: Vec<WidgetId> = children
            .into_iter()
            .map(|child| self.insert(child, Some(id)))
            .collect();
        if let Some(node) = self.nodes.get_mut(id) {
            node.children = child_ids;
        }
        id
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    #[must_use]
    pub fn root(&self) -> Option<WidgetId> {
        self.root
    }

    /// Widget registered under `name`.
    pub fn find(&self, name: &str) -> Result<WidgetId> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| Error::WidgetNotFound(name.to_string()))
    }

    pub fn node(&self, id: WidgetId) -> Result<&Node<M>> {
        self.nodes
            .get(id)
            .ok_or_else(|| Error::WidgetNotFound(format!("{id:?}")))
    }

    fn node_mut(&mut self, id: WidgetId) -> Result<&mut Node<M>> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| Error::WidgetNotFound(format!("{id:?}")))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn bounds(&self, id: WidgetId) -> Result<Rect> {
        Ok(self.node(id)?.bounds)
    }

    /// The widget stored at `id`, if it is a `W`.
    pub fn widget<W: WidgetCast<M>>(&self, id: WidgetId) -> Result<&W> {
        W::cast(&self.node(id)?.kind).ok_or(Error::WidgetKind { expected: W::KIND })
    }

    /// Mutable access to the widget at `id`.
    ///
    /// Content changes that alter the widget's natural size should be
    /// followed by [`Self::after_layout_recalculation`].
    pub fn widget_mut<W: WidgetCast<M>>(&mut self, id: WidgetId) -> Result<&mut W> {
        W::cast_mut(&mut self.node_mut(id)?.kind).ok_or(Error::WidgetKind { expected: W::KIND })
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Marks `id` and every ancestor as needing layout.
    pub fn mark_dirty(&mut self, id: WidgetId) -> Result<()> {
        self.node(id)?;
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.nodes.get_mut(node_id) else {
                break;
            };
            node.dirty = true;
            current = node.parent;
        }
        Ok(())
    }

    pub fn set_size(&mut self, id: WidgetId, size: SizeSpec) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.options.size != size {
            node.options.size = size;
            self.mark_dirty(id)?;
        }
        Ok(())
    }

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.options.visible != visible {
            node.options.visible = visible;
            self.mark_dirty(id)?;
        }
        Ok(())
    }

    /// Toggles hit-testing and the disabled look. Space stays allocated.
    pub fn set_disabled(&mut self, id: WidgetId, disabled: bool) -> Result<()> {
        self.node_mut(id)?.options.disabled = disabled;
        Ok(())
    }

    pub fn is_disabled(&self, id: WidgetId) -> Result<bool> {
        Ok(self.node(id)?.options.disabled)
    }

    pub fn is_visible(&self, id: WidgetId) -> Result<bool> {
        Ok(self.node(id)?.options.visible)
    }

    // =========================================================================
    // Layout
    // =========================================================================

    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Resizes the root box. Marks the root dirty when the size changes.
    pub fn set_viewport(&mut self, viewport: Size) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        if let Some(root) = self.root {
            if let Some(node) = self.nodes.get_mut(root) {
                node.dirty = true;
            }
        }
    }

    #[must_use]
    pub fn scale(&self) -> ScaleFactor {
        self.engine.scale()
    }

    fn root_rect(&self) -> Rect {
        Rect::new(0, 0, self.viewport.width, self.viewport.height)
    }

    fn layout_rect(&self, id: WidgetId) -> Result<Rect> {
        if self.root == Some(id) {
            Ok(self.root_rect())
        } else {
            self.bounds(id)
        }
    }

    /// Re-resolves the subtree of `id` when `forced` or when anything in it
    /// is dirty. Returns whether a pass ran.
    ///
    /// A non-root node keeps its current bounds; only its descendants move.
    pub fn recalculate_layout(&mut self, id: WidgetId, forced: bool) -> Result<bool> {
        if !forced && !self.node(id)?.dirty {
            return Ok(false);
        }
        let rect = self.layout_rect(id)?;
        self.engine.measure_subtree(&mut self.nodes, id);
        self.engine.allocate(&mut self.nodes, id, rect);
        tracing::trace!(?id, forced, ?rect, "layout recalculated");
        Ok(true)
    }

    /// Narrow pass after an in-place content change of `id`.
    ///
    /// Re-measures the subtree of `id`, then each ancestor from its cached
    /// children for as long as natural sizes keep changing. Allocation then
    /// restarts from the first node of that chain whose natural size did
    /// not change, or from the root.
    pub fn after_layout_recalculation(&mut self, id: WidgetId) -> Result<()> {
        let before = self.node(id)?.natural;
        let mut changed = self.engine.measure_subtree(&mut self.nodes, id) != before;
        let mut anchor = id;

        while changed {
            let Some(parent) = self.node(anchor)?.parent else {
                break;
            };
            let before = self.node(parent)?.natural;
            changed = self.engine.measure_node(&mut self.nodes, parent) != before;
            anchor = parent;
        }

        let rect = self.layout_rect(anchor)?;
        self.engine.allocate(&mut self.nodes, anchor, rect);
        tracing::trace!(?id, ?anchor, "narrow layout pass");
        Ok(())
    }

    #[must_use]
    pub fn layout_stats(&self) -> LayoutStats {
        self.engine.stats()
    }

    pub fn reset_layout_stats(&mut self) {
        self.engine.reset_stats();
    }

    // =========================================================================
    // Paint
    // =========================================================================

    /// Records the whole visible tree, parents below children.
    #[must_use]
    pub fn paint(&self) -> Frame {
        let mut frame = Frame::new(self.viewport);
        if let Some(root) = self.root {
            self.paint_node(root, false, &mut frame);
        }
        frame
    }

    fn paint_node(&self, id: WidgetId, disabled: bool, frame: &mut Frame) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.options.visible {
            return;
        }
        let ctx = PaintContext {
            measure: self.engine.measure_context(),
            disabled: disabled || node.options.disabled,
        };
        node.kind.paint(node.bounds, &ctx, frame);
        for &child in &node.children {
            self.paint_node(child, ctx.disabled, frame);
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Routes one input event and returns the messages it produced.
    pub fn dispatch(&mut self, event: InputEvent) -> Vec<M> {
        match event {
            InputEvent::Resized { width, height } => {
                self.set_viewport(Size::new(width, height));
                Vec::new()
            }
            InputEvent::PointerPressed { x, y } => {
                let position = Point::new(x, y);
                let target = self
                    .captured
                    .or_else(|| self.root.and_then(|root| self.hit_test(root, position)));
                match target {
                    Some(target) => self.deliver(target, PointerKind::Pressed, position),
                    None => Vec::new(),
                }
            }
            InputEvent::PointerMoved { x, y } => match self.captured {
                Some(target) => self.deliver(target, PointerKind::Moved, Point::new(x, y)),
                None => Vec::new(),
            },
            InputEvent::PointerReleased { x, y } => match self.captured.take() {
                Some(target) => self.deliver(target, PointerKind::Released, Point::new(x, y)),
                None => Vec::new(),
            },
        }
    }

    /// The widget currently holding the pointer capture.
    #[must_use]
    pub fn captured(&self) -> Option<WidgetId> {
        self.captured
    }

    /// Deepest visible, enabled, pointer-accepting widget under `position`.
    /// Later siblings are above earlier ones.
    pub fn hit_test(&self, id: WidgetId, position: Point) -> Option<WidgetId> {
        let node = self.nodes.get(id)?;
        if !node.options.visible || node.options.disabled || !node.bounds.contains(position) {
            return None;
        }
        node.children
            .iter()
            .rev()
            .find_map(|&child| self.hit_test(child, position))
            .or_else(|| node.kind.accepts_pointer().then_some(id))
    }

    fn deliver(&mut self, target: WidgetId, kind: PointerKind, position: Point) -> Vec<M> {
        let ctx = self.engine.measure_context();
        let Some(node) = self.nodes.get_mut(target) else {
            self.captured = None;
            return Vec::new();
        };
        let response = node
            .kind
            .on_pointer(PointerEvent { kind, position }, node.bounds, &ctx);

        self.captured = match kind {
            PointerKind::Released => None,
            _ if response.capture => Some(target),
            PointerKind::Pressed => None,
            PointerKind::Moved => self.captured,
        };
        response.message.into_iter().collect()
    }
}
