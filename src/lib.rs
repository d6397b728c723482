// SPDX-License-Identifier: MPL-2.0
//! `imeditor` is a small image editor built with the Iced GUI framework.
//!
//! It opens a single raster image, crops it through an interactive overlay,
//! previews and applies blur and sharpen filters, and saves the result. The
//! window is a retained widget tree with its own layout engine, painted onto
//! an iced canvas.

pub mod app;
pub mod application;
pub mod config;
pub mod editor;
pub mod error;
pub mod infrastructure;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
