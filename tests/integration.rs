// SPDX-License-Identifier: MPL-2.0
//! Whole editing sessions driven through the public API.

use imeditor::application::port::{CropRatios, FileDialog, FileFilter, FilterKind};
use imeditor::config::{self, Config};
use imeditor::editor::{Editor, Message, OperationState};
use imeditor::infrastructure::RasterService;
use imeditor::ui::layout::Size;
use imeditor::ui::tree::InputEvent;
use image_rs::{Rgba, RgbaImage};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::tempdir;

/// File dialogs answering from queues; an empty queue means "cancelled".
#[derive(Clone, Default)]
struct Dialogs {
    open: Rc<RefCell<VecDeque<PathBuf>>>,
    save: Rc<RefCell<VecDeque<PathBuf>>>,
}

impl FileDialog for Dialogs {
    fn open_file(&self, _filters: &[FileFilter]) -> Option<PathBuf> {
        self.open.borrow_mut().pop_front()
    }

    fn save_file(
        &self,
        _filters: &[FileFilter],
        _default_extension: &str,
        _initial_dir: Option<&Path>,
    ) -> Option<PathBuf> {
        self.save.borrow_mut().pop_front()
    }
}

fn editor(config: &Config, dialogs: &Dialogs) -> Editor {
    Editor::new(
        config,
        Box::new(RasterService::new()),
        Box::new(dialogs.clone()),
        Size::new(1000, 700),
    )
    .expect("editor window builds")
}

fn write_png(path: &Path, width: u32, height: u32) {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 251) as u8, (y % 241) as u8, ((x ^ y) % 256) as u8, 255])
    })
    .save(path)
    .expect("write test image");
}

fn notice(editor: &Editor) -> Option<String> {
    editor
        .notifications()
        .current()
        .map(|notification| notification.message().to_string())
}

#[test]
fn open_crop_save_and_reopen() {
    let dir = tempdir().expect("temp dir");
    let source = dir.path().join("landscape.png");
    let target = dir.path().join("landscape-cropped.png");
    write_png(&source, 800, 600);

    let dialogs = Dialogs::default();
    let mut editor = editor(&Config::default(), &dialogs);

    dialogs.open.borrow_mut().push_back(source.clone());
    editor.update(Message::OpenImage).unwrap();
    assert_eq!(editor.status_text().unwrap(), "landscape.png | 800x600px");

    editor.update(Message::CropPressed).unwrap();
    assert_eq!(editor.operation_state().unwrap(), OperationState::CropActive);
    editor
        .set_crop_ratios(CropRatios::new(0.1, 0.1, 0.1, 0.1))
        .unwrap();
    editor.update(Message::CropPressed).unwrap();
    assert_eq!(editor.status_text().unwrap(), "landscape.png | 640x480px");

    dialogs.save.borrow_mut().push_back(target.clone());
    editor.update(Message::SaveAs).unwrap();
    assert_eq!(
        notice(&editor),
        Some(format!("Image saved to: {}", target.display()))
    );

    let reopened = image_rs::open(&target).expect("saved file decodes");
    assert_eq!((reopened.width(), reopened.height()), (640, 480));
    let untouched = image_rs::open(&source).expect("source decodes");
    assert_eq!((untouched.width(), untouched.height()), (800, 600));
}

#[test]
fn filter_preview_is_gated_by_the_running_crop() {
    let dir = tempdir().expect("temp dir");
    let source = dir.path().join("portrait.png");
    write_png(&source, 60, 90);

    let dialogs = Dialogs::default();
    let mut editor = editor(&Config::default(), &dialogs);
    dialogs.open.borrow_mut().push_back(source);
    editor.update(Message::OpenImage).unwrap();
    let original = editor.controller().image().unwrap().as_bytes().to_vec();

    editor.update(Message::CropPressed).unwrap();
    editor
        .update(Message::FilterChanged(FilterKind::Blur, 4.0))
        .unwrap();
    assert_eq!(editor.slider_value(FilterKind::Blur).unwrap(), 0.0);
    assert_eq!(
        notice(&editor).as_deref(),
        Some("Can't preview blur while another operation is in progress")
    );

    // Second refusal in a row stays quiet.
    editor.update(Message::NotificationDismissed).unwrap();
    editor
        .update(Message::FilterChanged(FilterKind::Sharpen, 2.0))
        .unwrap();
    assert!(notice(&editor).is_none());

    // Finishing the crop with an untouched selection keeps every pixel.
    editor.update(Message::CropPressed).unwrap();
    assert_eq!(editor.controller().image().unwrap().as_bytes(), original.as_slice());

    editor
        .update(Message::FilterChanged(FilterKind::Blur, 4.0))
        .unwrap();
    assert_eq!(
        editor.operation_state().unwrap(),
        OperationState::FilterPreview(FilterKind::Blur)
    );
    assert_eq!(
        editor.status_text().unwrap(),
        "portrait.png | 60x90px | Previewing Blur"
    );

    // Cropping while a preview runs drops the preview.
    editor.update(Message::CropPressed).unwrap();
    assert_eq!(editor.operation_state().unwrap(), OperationState::Idle);
    assert_eq!(editor.slider_value(FilterKind::Blur).unwrap(), 0.0);
    assert_eq!(editor.controller().image().unwrap().as_bytes(), original.as_slice());
    assert_eq!(editor.status_text().unwrap(), "portrait.png | 60x90px");
}

#[test]
fn applied_filter_is_what_gets_saved() {
    let dir = tempdir().expect("temp dir");
    let source = dir.path().join("noise.png");
    write_png(&source, 32, 32);
    let before = image_rs::open(&source).unwrap().to_rgba8().into_raw();

    let dialogs = Dialogs::default();
    let mut editor = editor(&Config::default(), &dialogs);
    dialogs.open.borrow_mut().push_back(source.clone());
    editor.update(Message::OpenImage).unwrap();

    editor
        .update(Message::FilterChanged(FilterKind::Blur, 3.0))
        .unwrap();
    editor.update(Message::ApplyFilter(FilterKind::Blur)).unwrap();
    assert_eq!(notice(&editor).as_deref(), Some("Applied Blur"));
    editor.update(Message::Save).unwrap();

    let after = image_rs::open(&source).unwrap().to_rgba8().into_raw();
    assert_ne!(before, after);
}

#[test]
fn configured_filter_limits_cap_the_sliders() {
    let dir = tempdir().expect("temp dir");
    let source = dir.path().join("small.png");
    write_png(&source, 16, 16);

    let config = Config {
        blur_max_radius: Some(5),
        ..Config::default()
    };
    let dialogs = Dialogs::default();
    let mut editor = editor(&config, &dialogs);
    dialogs.open.borrow_mut().push_back(source);
    editor.update(Message::OpenImage).unwrap();

    editor
        .update(Message::FilterChanged(FilterKind::Blur, 40.0))
        .unwrap();
    assert_eq!(editor.slider_value(FilterKind::Blur).unwrap(), 5.0);
}

#[test]
fn window_resize_is_laid_out_on_the_next_tick() {
    let dialogs = Dialogs::default();
    let mut editor = editor(&Config::default(), &dialogs);
    let status_bar = editor.handles().status_bar;

    editor
        .handle_input(InputEvent::Resized {
            width: 1200,
            height: 800,
        })
        .unwrap();
    assert!(editor.tick().unwrap());
    assert!(!editor.tick().unwrap());

    let status = editor.tree().bounds(status_bar).unwrap();
    assert_eq!(status.width, 1200);
    assert_eq!(status.bottom(), 800);
    assert_eq!(editor.frame().size(), Size::new(1200, 800));
}

#[test]
fn scale_factor_enlarges_widgets() {
    let dialogs = Dialogs::default();
    let normal = editor(&Config::default(), &dialogs);
    let doubled = editor(
        &Config {
            scale_factor: Some(2.0),
            ..Config::default()
        },
        &dialogs,
    );

    let height = |editor: &Editor| {
        editor
            .tree()
            .bounds(editor.handles().status_bar)
            .unwrap()
            .height
    };
    assert!(height(&doubled) > height(&normal));
    assert_eq!(doubled.scale().value(), 2.0);
}

#[test]
fn settings_file_round_trip() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let written = Config {
        scale_factor: Some(1.5),
        target_fps: Some(60),
        ..Config::default()
    };
    config::save_to_path(&written, &path).expect("Failed to write config file");
    let loaded = config::load_from_path(&path).expect("Failed to load config file");

    assert_eq!(loaded.scale_factor(), 1.5);
    assert_eq!(loaded.target_fps(), 60);
    assert_eq!(loaded.window_size(), Config::default().window_size());
}

#[test]
fn crop_during_a_blur_preview_notifies_once_and_restores() {
    let dir = tempdir().expect("temp dir");
    let source = dir.path().join("gating.png");
    write_png(&source, 40, 30);

    let dialogs = Dialogs::default();
    let mut editor = editor(&Config::default(), &dialogs);
    dialogs.open.borrow_mut().push_back(source);
    editor.update(Message::OpenImage).unwrap();
    let original = editor.controller().image().unwrap().as_bytes().to_vec();

    editor
        .update(Message::FilterChanged(FilterKind::Blur, 5.0))
        .unwrap();
    assert_ne!(editor.controller().image().unwrap().as_bytes(), original.as_slice());
    let issued = editor.notifications().issued();

    editor.update(Message::CropPressed).unwrap();

    assert_eq!(editor.notifications().issued(), issued + 1);
    let current = editor.notifications().current().expect("conflict notified");
    assert_eq!(
        current.message(),
        "Can not perform this operation while another operation is in progress"
    );
    assert_eq!(
        current.action().map(|action| action.label.as_str()),
        Some("Remind me")
    );
    assert_eq!(editor.slider_value(FilterKind::Blur).unwrap(), 0.0);
    assert_eq!(editor.operation_state().unwrap(), OperationState::Idle);
    assert_eq!(editor.controller().image().unwrap().as_bytes(), original.as_slice());
}
