// SPDX-License-Identifier: MPL-2.0
//! Messages published by the editor's widgets.

use crate::application::port::FilterKind;

/// Everything a widget of the editor can ask for.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// "Open Image" menu entry.
    OpenImage,
    /// "Save" menu entry.
    Save,
    /// "Save As" menu entry.
    SaveAs,
    /// Crop button: shows the overlay, or applies the selection when shown.
    CropPressed,
    /// A filter slider moved to the given position.
    FilterChanged(FilterKind, f32),
    /// A filter's apply button.
    ApplyFilter(FilterKind),
    /// The action control of the current notification.
    NotificationAction,
    /// The dismiss control of the current notification.
    NotificationDismissed,
    /// Re-enables the "operation in progress" notification.
    ResetConflictNotice,
}
