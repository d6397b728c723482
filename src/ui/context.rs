// SPDX-License-Identifier: MPL-2.0
//! Shared context used by widget callbacks to coordinate.
//!
//! Independent widgets (the crop button, each filter slider, the menu) need
//! to agree on a handful of cross-cutting values such as "is an edit in
//! progress". Instead of an implicit global, one [`SharedContext`] is created
//! by the editor and handed by reference to everything that reads it.
//!
//! The key set is closed: each key is a zero-sized type implementing
//! [`ContextKey`], which fixes both its name and its value type. Reading a
//! key that was never set or defaulted is a contract violation and returns
//! [`Error::KeyNotFound`].
//!
//! # Example
//!
//! ```
//! use imeditor::ui::context::{AllowImageChanges, SharedContext};
//!
//! let mut ctx = SharedContext::new();
//! assert!(ctx.get::<AllowImageChanges>().is_err());
//! ctx.set_default::<AllowImageChanges>(true);
//! ctx.set_default::<AllowImageChanges>(false);
//! assert_eq!(ctx.get::<AllowImageChanges>().unwrap(), true);
//! ```

use crate::application::port::FilterKind;
use crate::error::{Error, Result};
use std::fmt;
use std::path::PathBuf;

/// The edit currently holding the operation lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Crop,
    Filter(FilterKind),
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Crop => f.write_str("crop"),
            OperationKind::Filter(kind) => write!(f, "{kind}"),
        }
    }
}

/// A typed key of [`SharedContext`].
pub trait ContextKey {
    type Value: Clone;

    /// Name reported in [`Error::KeyNotFound`] and logs.
    const NAME: &'static str;

    #[doc(hidden)]
    fn slot(ctx: &SharedContext) -> &Option<Self::Value>;

    #[doc(hidden)]
    fn slot_mut(ctx: &mut SharedContext) -> &mut Option<Self::Value>;
}

macro_rules! context_keys {
    ($($(#[$meta:meta])* $key:ident => $field:ident: $value:ty = $default:expr;)+) => {
        /// Process-wide key/value store with default-insertion semantics.
        ///
        /// Single-threaded; the editor owns the only instance.
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct SharedContext {
            $($field: Option<$value>,)+
        }

        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy)]
            pub struct $key;

            impl ContextKey for $key {
                type Value = $value;
                const NAME: &'static str = stringify!($field);

                fn slot(ctx: &SharedContext) -> &Option<$value> {
                    &ctx.$field
                }

                fn slot_mut(ctx: &mut SharedContext) -> &mut Option<$value> {
                    &mut ctx.$field
                }
            }
        )+

        impl SharedContext {
            /// Defaults every key the editor relies on.
            pub fn install_defaults(&mut self) {
                $(self.set_default::<$key>($default);)+
            }
        }
    };
}

context_keys! {
    /// `false` while an operation holds the edit lock.
    AllowImageChanges => allow_image_changes: bool = true;
    /// The operation holding the edit lock, if any.
    CurrentOperation => current_operation: Option<OperationKind> = None;
    /// File the working image was loaded from or last saved to.
    ImageFilePath => image_file_path: Option<PathBuf> = None;
    /// Whether the "another operation is in progress" notice was shown.
    FilterNotificationShown => filter_notification_shown: bool = false;
    /// Whether the crop guidance notice was shown.
    CropNotificationShown => crop_notification_shown: bool = false;
}

impl SharedContext {
    /// Creates an empty context. Every read fails until keys are set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context with every key defaulted.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut ctx = Self::new();
        ctx.install_defaults();
        ctx
    }

    /// Returns the value stored under `K`.
    pub fn get<K: ContextKey>(&self) -> Result<K::Value> {
        K::slot(self).clone().ok_or(Error::KeyNotFound(K::NAME))
    }

    /// Stores `value` under `K`, replacing any previous value.
    pub fn set<K: ContextKey>(&mut self, value: K::Value) {
        *K::slot_mut(self) = Some(value);
    }

    /// Stores `value` under `K` only if the key is absent.
    ///
    /// Returns `true` when the value was inserted.
    pub fn set_default<K: ContextKey>(&mut self, value: K::Value) -> bool {
        let slot = K::slot_mut(self);
        if slot.is_some() {
            return false;
        }
        *slot = Some(value);
        true
    }

    #[must_use]
    pub fn contains<K: ContextKey>(&self) -> bool {
        K::slot(self).is_some()
    }
}
