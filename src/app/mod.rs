// SPDX-License-Identifier: MPL-2.0
//! iced backend.
//!
//! The whole window is one canvas. The editor's widget tree paints into a
//! [`Frame`] that the canvas replays, pointer events on the canvas go back to
//! the tree, and a timer subscription runs the lazy layout pass at the
//! configured frame rate. iced's logical pixels are the tree's pixels; the
//! configured scale factor does the rest.

mod canvas;

pub use canvas::ImageCache;

use crate::config::defaults::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use crate::config::Config;
use crate::editor::Editor;
use crate::ui::paint::Frame;
use crate::ui::tree::InputEvent;
use canvas::Surface;
use iced::{event, time, window, Element, Length, Subscription, Theme};
use std::time::Duration;

pub const WINDOW_TITLE: &str = "Image Editor";

#[derive(Debug, Clone)]
pub enum AppMessage {
    Input(InputEvent),
    Tick,
}

/// Root state handed to iced.
#[derive(Debug)]
pub struct App {
    editor: Editor,
    frame: Frame,
    images: ImageCache,
    tick: Duration,
}

impl App {
    pub fn new(editor: Editor, config: &Config) -> Self {
        let mut app = Self {
            editor,
            frame: Frame::default(),
            images: ImageCache::default(),
            tick: frame_interval(config.target_fps()),
        };
        app.repaint();
        app
    }

    #[must_use]
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    fn title(&self) -> String {
        WINDOW_TITLE.to_string()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn update(&mut self, message: AppMessage) {
        let result = match message {
            AppMessage::Input(event) => self.editor.handle_input(event).map(|()| true),
            AppMessage::Tick => self.editor.tick(),
        };
        match result {
            Ok(false) => {}
            Ok(true) => self.repaint(),
            Err(err) => {
                tracing::error!(%err, "editor contract violated");
                self.repaint();
            }
        }
    }

    fn repaint(&mut self) {
        self.frame = self.editor.frame();
        self.images.refresh(&self.frame);
    }

    fn view(&self) -> Element<'_, AppMessage> {
        iced::widget::canvas(Surface::new(&self.frame, &self.images))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn subscription(&self) -> Subscription<AppMessage> {
        Subscription::batch([
            event::listen_with(window_event),
            time::every(self.tick).map(|_| AppMessage::Tick),
        ])
    }
}

fn frame_interval(fps: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(fps.max(1)))
}

fn window_event(
    event: iced::Event,
    _status: event::Status,
    _window: window::Id,
) -> Option<AppMessage> {
    match event {
        iced::Event::Window(window::Event::Resized(size)) => {
            Some(AppMessage::Input(InputEvent::Resized {
                width: size.width.round() as u32,
                height: size.height.round() as u32,
            }))
        }
        _ => None,
    }
}

/// Builds the window settings.
pub fn window_settings(config: &Config) -> window::Settings {
    let (width, height) = config.window_size();
    window::Settings {
        size: iced::Size::new(width as f32, height as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the iced application loop.
pub fn run(editor: Editor, config: &Config) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires Fn for boot, the editor is handed over exactly once.
    let boot_state = RefCell::new(Some(App::new(editor, config)));
    let boot = move || {
        boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once")
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings(config))
        .subscription(App::subscription)
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_interval_follows_fps() {
        assert_eq!(frame_interval(100), Duration::from_millis(10));
        assert_eq!(frame_interval(0), Duration::from_secs(1));
    }

    #[test]
    fn resize_events_become_input() {
        let event = iced::Event::Window(window::Event::Resized(iced::Size::new(800.4, 599.6)));
        let message = window_event(event, event::Status::Ignored, window::Id::unique());
        assert!(matches!(
            message,
            Some(AppMessage::Input(InputEvent::Resized {
                width: 800,
                height: 600
            }))
        ));
    }

    #[test]
    fn window_settings_use_configured_size() {
        let settings = window_settings(&Config::default());
        assert_eq!(settings.size, iced::Size::new(1024.0, 720.0));
        assert_eq!(settings.min_size, Some(iced::Size::new(640.0, 480.0)));
    }
}
