// SPDX-License-Identifier: MPL-2.0
//! The image editor: widget tree, shared context and message handling.
//!
//! [`Editor`] is the central dispatcher. Widgets publish [`Message`]s; the
//! editor runs them through the [`OperationStateMachine`], applies the
//! resulting changes to the [`ImageViewController`] and to the widgets it
//! holds handles to, and keeps the layout up to date.
//!
//! Every recoverable failure (cancelled dialogs, I/O and codec errors,
//! refused operations) ends up as a notification inside
//! [`Editor::update`]. Only contract violations are returned.

mod controller;
mod messages;
mod operation;
mod view;

pub use controller::ImageViewController;
pub use messages::Message;
pub use operation::{
    ApplyTransition, CropTransition, FilterTransition, OperationState, OperationStateMachine,
    Rejection,
};
pub use view::{status_keys, FilterHandles, FilterLimits, Handles, INITIAL_STATUS};

use crate::application::port::{CropRatios, FileDialog, FilterKind, FilterStrength, ImageService};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::infrastructure::{open_filters, save_filters};
use crate::ui::context::{ImageFilePath, OperationKind, SharedContext};
use crate::ui::layout::Size;
use crate::ui::notifications::{EventNotifier, Notification};
use crate::ui::paint::Frame;
use crate::ui::scale::ScaleFactor;
use crate::ui::text::{MonospaceMeasurer, TextMeasurer};
use crate::ui::tree::{InputEvent, WidgetId, WidgetTree};
use crate::ui::widgets::{CropOverlay, ImageView, Notifier, Slider, StatusBar, WidgetCast};
use std::path::{Path, PathBuf};

const DEFAULT_SAVE_EXTENSION: &str = "png";
const REMIND_ME: &str = "Remind me";

const NO_IMAGE: &str = "No image file is currently opened";
const CROP_GUIDANCE: &str = "Please adjust the handles to crop the image";
const CROP_TOO_SMALL: &str = "Can't crop further, the image is too small";
const OPERATION_IN_PROGRESS: &str =
    "Can not perform this operation while another operation is in progress";

pub struct Editor {
    tree: WidgetTree<Message>,
    handles: Handles,
    ctx: SharedContext,
    machine: OperationStateMachine,
    controller: ImageViewController,
    notifier: EventNotifier<Message>,
    dialogs: Box<dyn FileDialog>,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("ctx", &self.ctx)
            .field("controller", &self.controller)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

impl Editor {
    /// Builds the editor window for a physical `viewport`.
    pub fn new(
        config: &Config,
        service: Box<dyn ImageService>,
        dialogs: Box<dyn FileDialog>,
        viewport: Size,
    ) -> Result<Self> {
        Self::with_text_measurer(
            config,
            service,
            dialogs,
            Box::new(MonospaceMeasurer::default()),
            viewport,
        )
    }

    pub fn with_text_measurer(
        config: &Config,
        service: Box<dyn ImageService>,
        dialogs: Box<dyn FileDialog>,
        text: Box<dyn TextMeasurer>,
        viewport: Size,
    ) -> Result<Self> {
        let scale = ScaleFactor::new(config.scale_factor());
        let mut tree = WidgetTree::new(scale, text, viewport);
        let limits = FilterLimits {
            blur: config.blur_max_radius(),
            sharpen: config.sharpen_max_amount(),
        };
        let handles = view::mount(&mut tree, limits)?;

        let mut editor = Self {
            tree,
            handles,
            ctx: SharedContext::with_defaults(),
            machine: OperationStateMachine::new(),
            controller: ImageViewController::new(service),
            notifier: EventNotifier::new(),
            dialogs,
        };
        editor.set_status(status_keys::STATUS, INITIAL_STATUS)?;
        editor.recalculate(true)?;
        tracing::debug!(?viewport, scale = scale.value(), "editor ready");
        Ok(editor)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn context(&self) -> &SharedContext {
        &self.ctx
    }

    #[must_use]
    pub fn tree(&self) -> &WidgetTree<Message> {
        &self.tree
    }

    #[must_use]
    pub fn handles(&self) -> &Handles {
        &self.handles
    }

    #[must_use]
    pub fn controller(&self) -> &ImageViewController {
        &self.controller
    }

    #[must_use]
    pub fn notifications(&self) -> &EventNotifier<Message> {
        &self.notifier
    }

    pub fn operation_state(&self) -> Result<OperationState> {
        self.machine.state(&self.ctx)
    }

    /// File the working image is bound to.
    pub fn image_path(&self) -> Result<Option<PathBuf>> {
        self.ctx.get::<ImageFilePath>()
    }

    /// Rendered status line.
    pub fn status_text(&self) -> Result<String> {
        Ok(self.widget::<StatusBar>(self.handles.status_bar)?.text())
    }

    pub fn status(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .widget::<StatusBar>(self.handles.status_bar)?
            .get(key)
            .map(str::to_string))
    }

    /// Position of `kind`'s slider.
    pub fn slider_value(&self, kind: FilterKind) -> Result<f32> {
        Ok(self.widget::<Slider<Message>>(self.filter_handles(kind)?.slider)?.value())
    }

    pub fn crop_overlay(&self) -> Result<&CropOverlay> {
        self.widget::<CropOverlay>(self.handles.crop_overlay)
    }

    /// Moves the crop selection, as a drag on the overlay would.
    pub fn set_crop_ratios(&mut self, ratios: CropRatios) -> Result<()> {
        self.widget_mut::<CropOverlay>(self.handles.crop_overlay)?
            .set_ratios(ratios);
        Ok(())
    }

    fn widget<W: WidgetCast<Message>>(&self, id: WidgetId) -> Result<&W> {
        self.tree.widget::<W>(id)
    }

    fn widget_mut<W: WidgetCast<Message>>(&mut self, id: WidgetId) -> Result<&mut W> {
        self.tree.widget_mut::<W>(id)
    }

    fn filter_handles(&self, kind: FilterKind) -> Result<FilterHandles> {
        self.handles
            .filter(kind)
            .ok_or_else(|| Error::WidgetNotFound(format!("{kind} controls")))
    }

    // =========================================================================
    // Frame loop
    // =========================================================================

    /// Routes one input event and handles every message it produced.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<()> {
        for message in self.tree.dispatch(event) {
            self.update(message)?;
        }
        Ok(())
    }

    /// Lazy layout pass, run once per frame. Returns whether work was done.
    pub fn tick(&mut self) -> Result<bool> {
        self.recalculate(false)
    }

    /// Draw list of the whole window.
    #[must_use]
    pub fn frame(&self) -> Frame {
        self.tree.paint()
    }

    #[must_use]
    pub fn scale(&self) -> ScaleFactor {
        self.tree.scale()
    }

    fn recalculate(&mut self, forced: bool) -> Result<bool> {
        match self.tree.root() {
            Some(root) => self.tree.recalculate_layout(root, forced),
            None => Ok(false),
        }
    }

    /// Lets the next refused operation notify again.
    pub fn reset_conflict_notice(&mut self) {
        self.machine.reset_conflict_notice(&mut self.ctx);
        tracing::debug!("conflict notice re-enabled");
    }

    // =========================================================================
    // Messages
    // =========================================================================

    /// Handles one message.
    ///
    /// Recoverable failures become notifications; only contract violations
    /// are returned.
    pub fn update(&mut self, message: Message) -> Result<()> {
        tracing::trace!(?message, "update");
        let result = match message {
            Message::OpenImage => self.open_image(),
            Message::Save => self.save(),
            Message::SaveAs => self.save_as(),
            Message::CropPressed => self.crop_pressed(),
            Message::FilterChanged(kind, value) => self.filter_changed(kind, value),
            Message::ApplyFilter(kind) => self.apply_filter(kind),
            Message::NotificationAction => match self.notifier.take_action() {
                Some(action) => self.update(action),
                None => Ok(()),
            },
            Message::NotificationDismissed => {
                self.notifier.clear();
                Ok(())
            }
            Message::ResetConflictNotice => {
                self.reset_conflict_notice();
                Ok(())
            }
        };

        match result {
            Err(err) if !err.is_contract_violation() => {
                tracing::warn!(%err, "operation failed");
                self.notifier.notify(Notification::error(err.to_string()));
            }
            other => other?,
        }
        self.sync_notifier()
    }

    fn open_image(&mut self) -> Result<()> {
        let Some(path) = self.dialogs.open_file(&open_filters()) else {
            return Ok(());
        };
        let image = match self.controller.open(&path) {
            Ok(image) => image,
            Err(err) => {
                self.notify_error(format!("Error encountered while loading file: {err}"));
                return Ok(());
            }
        };

        self.cancel_operation()?;
        let (width, height) = (image.width(), image.height());
        self.controller.set_image(image);
        self.ctx.set::<ImageFilePath>(Some(path.clone()));
        tracing::info!(path = %path.display(), width, height, "image opened");

        self.set_status(status_keys::STATUS, file_name(&path))?;
        self.set_status(status_keys::RESOLUTION, resolution(width, height))?;
        for id in self.handles.image_controls() {
            self.tree.set_disabled(id, false)?;
        }
        self.sync_image()?;
        self.tree.recalculate_layout(self.handles.image_stack, true)?;
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let Some(path) = self.ctx.get::<ImageFilePath>()? else {
            self.notify_info(NO_IMAGE);
            return Ok(());
        };
        match self.controller.save(&path) {
            Ok(()) => self.notify_info(format!("Image saved to: {}", path.display())),
            Err(err) => self.notify_error(format!("Error encountered while saving: {err}")),
        }
        Ok(())
    }

    fn save_as(&mut self) -> Result<()> {
        let Some(current) = self.ctx.get::<ImageFilePath>()? else {
            self.notify_info(NO_IMAGE);
            return Ok(());
        };
        let Some(target) = self.dialogs.save_file(
            &save_filters(),
            DEFAULT_SAVE_EXTENSION,
            current.parent(),
        ) else {
            return Ok(());
        };

        self.ctx.set::<ImageFilePath>(Some(target.clone()));
        match self.controller.save(&target) {
            Ok(()) => {
                self.notify_info(format!("Image saved to: {}", target.display()));
                self.set_status(status_keys::STATUS, file_name(&target))
            }
            Err(err) => {
                self.notify_error(format!("Error encountered while saving: {err}"));
                self.ctx.set::<ImageFilePath>(Some(current));
                Ok(())
            }
        }
    }

    fn crop_pressed(&mut self) -> Result<()> {
        if self.controller.image().is_none() {
            self.notify_info(NO_IMAGE);
            return Ok(());
        }
        match self.machine.on_crop_action(&mut self.ctx)? {
            CropTransition::Begin { guidance } => {
                self.widget_mut::<CropOverlay>(self.handles.crop_overlay)?.show();
                if guidance {
                    self.notify_info(CROP_GUIDANCE);
                }
            }
            CropTransition::Finish => {
                let overlay = self.widget_mut::<CropOverlay>(self.handles.crop_overlay)?;
                let ratios = overlay.ratios();
                overlay.hide();
                match self.controller.crop(ratios) {
                    Ok((width, height)) => {
                        self.set_status(status_keys::RESOLUTION, resolution(width, height))?;
                        self.sync_image()?;
                    }
                    Err(Error::DegenerateCrop(rect)) => {
                        tracing::debug!(%rect, "crop rejected");
                        self.notifier.notify(Notification::warning(CROP_TOO_SMALL));
                    }
                    Err(err) => return Err(err),
                }
            }
            CropTransition::Rejected(rejection) => {
                if let OperationKind::Filter(kind) = rejection.holder {
                    self.force_filter_to_zero(kind)?;
                }
                if rejection.notify {
                    self.notify_conflict(OPERATION_IN_PROGRESS.to_string());
                }
            }
        }
        Ok(())
    }

    fn filter_changed(&mut self, kind: FilterKind, value: f32) -> Result<()> {
        let slider_id = self.filter_handles(kind)?.slider;
        let has_image = self.controller.image().is_some();
        let slider = self.widget_mut::<Slider<Message>>(slider_id)?;
        slider.set_value(if has_image { value } else { 0.0 });
        if !has_image {
            return Ok(());
        }
        let strength = FilterStrength::from_slider(slider.value());

        match self.machine.on_filter_control(&mut self.ctx, kind, strength)? {
            FilterTransition::Begin => {
                self.controller.begin_preview(kind, strength)?;
                self.set_status(status_keys::PREVIEW, format!("Previewing {}", kind.title()))?;
                self.sync_image()?;
            }
            FilterTransition::Update => {
                self.controller.update_preview(kind, strength)?;
                self.sync_image()?;
            }
            FilterTransition::End => {
                self.controller.end_preview();
                self.unset_status(status_keys::PREVIEW)?;
                self.sync_image()?;
            }
            FilterTransition::Unchanged => {}
            FilterTransition::Rejected(rejection) => {
                self.widget_mut::<Slider<Message>>(slider_id)?.set_value(0.0);
                if rejection.notify {
                    self.notify_conflict(format!(
                        "Can't preview {kind} while another operation is in progress"
                    ));
                }
            }
        }
        Ok(())
    }

    fn apply_filter(&mut self, kind: FilterKind) -> Result<()> {
        let slider_id = self.filter_handles(kind)?.slider;
        let strength =
            FilterStrength::from_slider(self.widget::<Slider<Message>>(slider_id)?.value());

        match self.machine.on_filter_apply(&mut self.ctx, kind, strength)? {
            ApplyTransition::Commit => {
                if !self.controller.commit_preview() {
                    self.controller.apply_filter(kind, strength)?;
                }
                self.widget_mut::<Slider<Message>>(slider_id)?.set_value(0.0);
                self.unset_status(status_keys::PREVIEW)?;
                self.sync_image()?;
                self.notify_info(format!("Applied {}", kind.title()));
            }
            ApplyTransition::NothingToApply => {
                self.notify_info(format!(
                    "Please set a {kind} value before applying this filter"
                ));
            }
            ApplyTransition::Rejected(rejection) => {
                if rejection.notify {
                    self.notify_conflict(OPERATION_IN_PROGRESS.to_string());
                }
            }
        }
        Ok(())
    }

    /// Forces `kind`'s slider to zero and ends its preview.
    fn force_filter_to_zero(&mut self, kind: FilterKind) -> Result<()> {
        let slider_id = self.filter_handles(kind)?.slider;
        self.widget_mut::<Slider<Message>>(slider_id)?.set_value(0.0);
        if self
            .machine
            .on_filter_control(&mut self.ctx, kind, FilterStrength::ZERO)?
            == FilterTransition::End
        {
            self.controller.end_preview();
            self.unset_status(status_keys::PREVIEW)?;
            self.sync_image()?;
        }
        Ok(())
    }

    /// Abandons whatever operation holds the lock.
    fn cancel_operation(&mut self) -> Result<()> {
        match self.machine.state(&self.ctx)? {
            OperationState::Idle => return Ok(()),
            OperationState::CropActive => {
                self.widget_mut::<CropOverlay>(self.handles.crop_overlay)?.hide();
            }
            OperationState::FilterPreview(kind) => {
                let slider_id = self.filter_handles(kind)?.slider;
                self.widget_mut::<Slider<Message>>(slider_id)?.set_value(0.0);
                self.controller.end_preview();
                self.unset_status(status_keys::PREVIEW)?;
            }
        }
        self.machine.release(&mut self.ctx);
        tracing::debug!("operation cancelled");
        Ok(())
    }

    // =========================================================================
    // Widget sync
    // =========================================================================

    /// Pushes the working image into the view and the overlay.
    fn sync_image(&mut self) -> Result<()> {
        let size = self
            .controller
            .image_size()
            .map(|(width, height)| Size::new(width, height));
        let view = self.tree.widget_mut::<ImageView>(self.handles.image_view)?;
        match self.controller.image() {
            Some(image) => view.set_image(image),
            None => view.clear(),
        }
        self.widget_mut::<CropOverlay>(self.handles.crop_overlay)?
            .set_image_size(size);
        self.tree.after_layout_recalculation(self.handles.image_view)
    }

    /// Mirrors the notification manager into the notifier widget.
    fn sync_notifier(&mut self) -> Result<()> {
        let current = self.notifier.current().map(|notification| {
            (
                notification.message().to_string(),
                notification.severity(),
                notification.action().map(|action| action.label.clone()),
            )
        });
        let widget = self.widget_mut::<Notifier<Message>>(self.handles.notifier)?;
        match current {
            Some((text, severity, action)) => {
                if widget.text() == Some(text.as_str()) && widget.action_label() == action.as_deref() {
                    return Ok(());
                }
                widget.show(text, severity, action);
            }
            None if widget.text().is_none() => return Ok(()),
            None => widget.clear(),
        }
        self.tree.after_layout_recalculation(self.handles.notifier)
    }

    fn set_status(&mut self, key: &str, text: impl Into<String>) -> Result<()> {
        self.widget_mut::<StatusBar>(self.handles.status_bar)?
            .set_status(key, text);
        self.tree.after_layout_recalculation(self.handles.status_bar)
    }

    fn unset_status(&mut self, key: &str) -> Result<()> {
        if self.widget_mut::<StatusBar>(self.handles.status_bar)?.unset(key) {
            self.tree.after_layout_recalculation(self.handles.status_bar)?;
        }
        Ok(())
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    fn notify_info(&mut self, text: impl Into<String>) {
        self.notifier.notify(Notification::info(text));
    }

    fn notify_error(&mut self, text: impl Into<String>) {
        self.notifier.notify(Notification::error(text));
    }

    fn notify_conflict(&mut self, text: String) {
        self.notifier.notify(
            Notification::warning(text).with_action(REMIND_ME, Message::ResetConflictNotice),
        );
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

fn resolution(width: u32, height: u32) -> String {
    format!("{width}x{height}px")
}
