// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `EventNotifier` holds at most one notification. It is shown until a
//! newer one supersedes it or it is cleared, either directly or by
//! invoking its action.

use super::notification::{Notification, NotificationId, Severity};

/// Single-slot notification holder.
#[derive(Debug)]
pub struct EventNotifier<M> {
    current: Option<(NotificationId, Notification<M>)>,
    next_id: u64,
}

impl<M> Default for EventNotifier<M> {
    fn default() -> Self {
        Self {
            current: None,
            next_id: 0,
        }
    }
}

impl<M> EventNotifier<M> {
    /// Creates a new empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Displays `notification`, replacing any current one.
    pub fn notify(&mut self, notification: Notification<M>) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;

        match notification.severity() {
            Severity::Info => tracing::debug!(text = notification.message(), "notify"),
            Severity::Warning | Severity::Error => {
                tracing::warn!(text = notification.message(), "notify");
            }
        }
        if let Some((previous, _)) = self.current.replace((id, notification)) {
            tracing::trace!(superseded = previous.value(), "notification superseded");
        }
        id
    }

    /// Returns the displayed notification.
    #[must_use]
    pub fn current(&self) -> Option<&Notification<M>> {
        self.current.as_ref().map(|(_, notification)| notification)
    }

    #[must_use]
    pub fn current_id(&self) -> Option<NotificationId> {
        self.current.as_ref().map(|(id, _)| *id)
    }

    /// Removes the displayed notification. Returns whether one was shown.
    pub fn clear(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Clears the notification and hands back its action message, if any.
    ///
    /// Without an action the notification stays displayed.
    pub fn take_action(&mut self) -> Option<M> {
        let (_, notification) = self.current.as_mut()?;
        let action = notification.take_action()?;
        self.current = None;
        Some(action.message)
    }

    /// Number of notifications displayed since creation.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.next_id
    }
}
