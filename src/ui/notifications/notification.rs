// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct and `Severity` enum
//! used throughout the notification system.

use crate::ui::design_tokens::palette;
use crate::ui::paint::Color;

/// Identifier assigned by the [`EventNotifier`](super::EventNotifier) that
/// displayed the notification. Sequential per notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub(crate) u64);

impl NotificationId {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Severity level determines the accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Guidance or confirmation.
    #[default]
    Info,
    /// The request was refused; nothing changed.
    Warning,
    /// An I/O or codec failure.
    Error,
}

impl Severity {
    /// Returns the primary color for this severity level.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }
}

/// User-invocable follow-up attached to a notification.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationAction<M> {
    pub label: String,
    pub message: M,
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification<M> {
    severity: Severity,
    message: String,
    action: Option<NotificationAction<M>>,
}

impl<M> Notification<M> {
    /// Creates a new notification with the given severity and text.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            action: None,
        }
    }

    /// Creates an info notification.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    /// Creates a warning notification.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Creates an error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Offers a control labelled `label` that dispatches `message`.
    #[must_use]
    pub fn with_action(mut self, label: impl Into<String>, message: M) -> Self {
        self.action = Some(NotificationAction {
            label: label.into(),
            message,
        });
        self
    }

    /// Returns the severity level.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn action(&self) -> Option<&NotificationAction<M>> {
        self.action.as_ref()
    }

    pub(crate) fn take_action(&mut self) -> Option<NotificationAction<M>> {
        self.action.take()
    }
}
