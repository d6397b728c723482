// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//!
//! # Available Ports
//!
//! - [`image`]: Pixel operations (open, save, crop, filter)
//! - [`dialog`]: Native open/save file pickers
//!
//! # Design Notes
//!
//! - All calls are synchronous; they run on the UI thread and may stall a frame
//! - Methods return `Result` with the crate error type
//! - No traits are `Send`: the editor is single-threaded
//!
//! # Example
//!
//! ```ignore
//! use imeditor::application::port::{FilterKind, FilterParams, FilterStrength, ImageService};
//!
//! fn preview(service: &dyn ImageService, image: &imeditor::application::port::Image) {
//!     let params = FilterParams::new(FilterStrength::new(4));
//!     let _blurred = service.filter(image, FilterKind::Blur, params);
//! }
//! ```

pub mod dialog;
pub mod image;

pub use dialog::{FileDialog, FileFilter};
pub use image::{
    CropRatios, CropRect, FilterKind, FilterParams, FilterStrength, Image, ImageService,
    MIN_CROP_EXTENT,
};
