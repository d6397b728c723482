// SPDX-License-Identifier: MPL-2.0
//! Renderable frame produced by the paint walk.
//!
//! The widget tree does not talk to a GPU. Painting records a flat list of
//! [`DrawCommand`]s in physical pixels, which the backend replays.

use crate::application::port::Image;
use crate::ui::layout::{Point, Rect, Size};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::from_rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::from_rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[must_use]
    pub const fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha replaced.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Unique identity of a decoded pixel buffer.
///
/// Backends key their texture caches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitmapRevision(u64);

impl BitmapRevision {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// RGBA8 pixels of the working image, ready to upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    rgba: Arc<[u8]>,
    revision: BitmapRevision,
}

impl Bitmap {
    /// Converts `image` to RGBA8 and assigns a fresh revision.
    #[must_use]
    pub fn from_image(image: &Image) -> Self {
        let rgba = image.to_rgba8();
        Self {
            width: rgba.width(),
            height: rgba.height(),
            rgba: Arc::from(rgba.into_raw()),
            revision: BitmapRevision::next(),
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn rgba(&self) -> &Arc<[u8]> {
        &self.rgba
    }

    #[must_use]
    pub fn revision(&self) -> BitmapRevision {
        self.revision
    }
}

/// One primitive, in physical pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f32,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f32,
    },
    /// `position` is the top-left corner of the text box.
    Text {
        position: Point,
        content: String,
        size: f32,
        color: Color,
    },
    Image {
        rect: Rect,
        bitmap: Arc<Bitmap>,
    },
}

/// Draw list for one render of the whole window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl Frame {
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.width > 0 && rect.height > 0 {
            self.commands.push(DrawCommand::FillRect { rect, color });
        }
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.commands.push(DrawCommand::StrokeRect { rect, color, width });
    }

    pub fn line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    pub fn text(&mut self, position: Point, content: impl Into<String>, size: f32, color: Color) {
        let content = content.into();
        if !content.is_empty() {
            self.commands.push(DrawCommand::Text {
                position,
                content,
                size,
                color,
            });
        }
    }

    pub fn image(&mut self, rect: Rect, bitmap: Arc<Bitmap>) {
        self.commands.push(DrawCommand::Image { rect, bitmap });
    }

    /// Every text string in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }
}
