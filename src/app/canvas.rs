// SPDX-License-Identifier: MPL-2.0
//! Canvas program replaying the editor's draw list.

use super::AppMessage;
use crate::ui::layout::{Point as TreePoint, Rect};
use crate::ui::paint::{BitmapRevision, Color, DrawCommand, Frame};
use crate::ui::tree::InputEvent;
use iced::advanced::image::Image;
use iced::widget::canvas::{self, Path, Stroke, Text};
use iced::widget::image::Handle;
use iced::widget::Action;
use iced::{mouse, Pixels, Point, Rectangle, Renderer, Size, Theme};
use std::collections::HashMap;

/// Image handles of the bitmaps currently on screen, keyed by revision.
///
/// A bitmap is uploaded once and reused for as long as frames keep drawing
/// the same revision.
#[derive(Debug, Default)]
pub struct ImageCache {
    handles: HashMap<BitmapRevision, Handle>,
}

impl ImageCache {
    /// Creates handles for new bitmaps in `frame` and forgets the rest.
    pub fn refresh(&mut self, frame: &Frame) {
        let mut live = HashMap::with_capacity(self.handles.len());
        for command in frame.commands() {
            let DrawCommand::Image { bitmap, .. } = command else {
                continue;
            };
            let revision = bitmap.revision();
            if live.contains_key(&revision) {
                continue;
            }
            let handle = self.handles.remove(&revision).unwrap_or_else(|| {
                tracing::trace!(?revision, "uploading bitmap");
                Handle::from_rgba(bitmap.width(), bitmap.height(), bitmap.rgba().to_vec())
            });
            live.insert(revision, handle);
        }
        self.handles = live;
    }

    #[must_use]
    pub fn get(&self, revision: BitmapRevision) -> Option<&Handle> {
        self.handles.get(&revision)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Full-window canvas showing one [`Frame`].
pub struct Surface<'a> {
    frame: &'a Frame,
    images: &'a ImageCache,
}

impl<'a> Surface<'a> {
    pub fn new(frame: &'a Frame, images: &'a ImageCache) -> Self {
        Self { frame, images }
    }
}

/// Whether the left button went down inside the canvas.
#[derive(Debug, Default)]
pub struct PointerState {
    pressed: bool,
}

impl canvas::Program<AppMessage> for Surface<'_> {
    type State = PointerState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<AppMessage>> {
        let iced::Event::Mouse(event) = event else {
            return None;
        };
        let input = match event {
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                let position = cursor.position_in(bounds)?;
                state.pressed = true;
                InputEvent::PointerPressed {
                    x: position.x,
                    y: position.y,
                }
            }
            mouse::Event::CursorMoved { .. } if state.pressed => {
                let position = relative(cursor, bounds)?;
                InputEvent::PointerMoved {
                    x: position.x,
                    y: position.y,
                }
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) if state.pressed => {
                state.pressed = false;
                let position = relative(cursor, bounds).unwrap_or(Point::ORIGIN);
                InputEvent::PointerReleased {
                    x: position.x,
                    y: position.y,
                }
            }
            _ => return None,
        };
        Some(Action::publish(AppMessage::Input(input)).and_capture())
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut target = canvas::Frame::new(renderer, bounds.size());

        for command in self.frame.commands() {
            match command {
                DrawCommand::FillRect { rect, color } => {
                    target.fill_rectangle(top_left(*rect), extent(*rect), to_iced(*color));
                }
                DrawCommand::StrokeRect { rect, color, width } => {
                    target.stroke(
                        &Path::rectangle(top_left(*rect), extent(*rect)),
                        Stroke::default().with_color(to_iced(*color)).with_width(*width),
                    );
                }
                DrawCommand::Line {
                    from,
                    to,
                    color,
                    width,
                } => {
                    target.stroke(
                        &Path::line(point(*from), point(*to)),
                        Stroke::default().with_color(to_iced(*color)).with_width(*width),
                    );
                }
                DrawCommand::Text {
                    position,
                    content,
                    size,
                    color,
                } => {
                    target.fill_text(Text {
                        content: content.clone(),
                        position: point(*position),
                        size: Pixels(*size),
                        color: to_iced(*color),
                        ..Text::default()
                    });
                }
                DrawCommand::Image { rect, bitmap } => {
                    if let Some(handle) = self.images.get(bitmap.revision()) {
                        target.draw_image(
                            Rectangle::new(top_left(*rect), extent(*rect)),
                            Image::new(handle.clone()),
                        );
                    }
                }
            }
        }

        vec![target.into_geometry()]
    }
}

/// Cursor position relative to `bounds`, also while outside of them.
fn relative(cursor: mouse::Cursor, bounds: Rectangle) -> Option<Point> {
    let position = cursor.position()?;
    Some(Point::new(
        (position.x - bounds.x).max(0.0),
        (position.y - bounds.y).max(0.0),
    ))
}

fn top_left(rect: Rect) -> Point {
    Point::new(rect.x as f32, rect.y as f32)
}

fn extent(rect: Rect) -> Size {
    Size::new(rect.width as f32, rect.height as f32)
}

fn point(point: TreePoint) -> Point {
    Point::new(point.x, point.y)
}

fn to_iced(color: Color) -> iced::Color {
    iced::Color::from_rgba(color.r, color.g, color.b, color.a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::Image as WorkingImage;
    use crate::ui::layout::Size as TreeSize;
    use crate::ui::paint::Bitmap;
    use image_rs::{Rgba, RgbaImage};
    use std::sync::Arc;

    fn bitmap(width: u32, height: u32) -> Arc<Bitmap> {
        let image = WorkingImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([9, 8, 7, 255])));
        Arc::new(Bitmap::from_image(&image))
    }

    fn frame_with(bitmaps: &[Arc<Bitmap>]) -> Frame {
        let mut frame = Frame::new(TreeSize::new(100, 100));
        for bitmap in bitmaps {
            frame.image(Rect::new(0, 0, 10, 10), Arc::clone(bitmap));
        }
        frame
    }

    #[test]
    fn refresh_reuses_handles_of_unchanged_bitmaps() {
        let first = bitmap(4, 4);
        let mut cache = ImageCache::default();
        cache.refresh(&frame_with(&[Arc::clone(&first)]));
        let id = cache.get(first.revision()).expect("uploaded").id();

        cache.refresh(&frame_with(&[Arc::clone(&first), Arc::clone(&first)]));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(first.revision()).expect("kept").id(), id);
    }

    #[test]
    fn refresh_drops_bitmaps_no_longer_drawn() {
        let first = bitmap(4, 4);
        let second = bitmap(2, 3);
        let mut cache = ImageCache::default();
        cache.refresh(&frame_with(&[Arc::clone(&first)]));
        cache.refresh(&frame_with(&[Arc::clone(&second)]));

        assert!(cache.get(first.revision()).is_none());
        assert!(cache.get(second.revision()).is_some());

        cache.refresh(&Frame::new(TreeSize::new(1, 1)));
        assert!(cache.is_empty());
    }

    #[test]
    fn colors_convert_component_wise() {
        let color = to_iced(Color::from_rgba(0.25, 0.5, 0.75, 0.5));
        assert_eq!(color, iced::Color::from_rgba(0.25, 0.5, 0.75, 0.5));
    }
}
