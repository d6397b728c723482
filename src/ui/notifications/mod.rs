// SPDX-License-Identifier: MPL-2.0
//! Transient user feedback.
//!
//! One message is shown at a time. A new notification silently replaces an
//! unacknowledged one; there is no queue. A notification may carry a
//! labelled action whose message is dispatched when the user invokes it.
//!
//! # Components
//!
//! - [`notification`] - `Notification` with severity and optional action
//! - [`manager`] - `EventNotifier` holding the single current notification
//!
//! # Usage
//!
//! ```
//! use imeditor::ui::notifications::{EventNotifier, Notification};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Message { Undo }
//!
//! let mut notifier = EventNotifier::new();
//! notifier.notify(Notification::info("Applied Blur").with_action("Undo", Message::Undo));
//! assert_eq!(notifier.take_action(), Some(Message::Undo));
//! assert!(notifier.current().is_none());
//! ```

mod manager;
mod notification;

pub use manager::EventNotifier;
pub use notification::{Notification, NotificationAction, NotificationId, Severity};
