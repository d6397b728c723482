// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`.
//!
//! - [`raster`]: pixel operations via the `image` crate (implements [`ImageService`])
//! - [`dialogs`]: native file pickers via `rfd` (implements [`FileDialog`])
//!
//! [`ImageService`]: crate::application::port::ImageService
//! [`FileDialog`]: crate::application::port::FileDialog

pub mod dialogs;
pub mod raster;

pub use dialogs::NativeDialogs;
pub use raster::{open_filters, save_filters, RasterService};
