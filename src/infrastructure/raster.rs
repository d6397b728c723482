// SPDX-License-Identifier: MPL-2.0
//! [`ImageService`] backed by the `image` crate.

use crate::application::port::{
    CropRect, FileFilter, FilterKind, FilterParams, Image, ImageService, MIN_CROP_EXTENT,
};
use crate::error::{Error, Result};
use image_rs::{ImageError, ImageFormat};
use std::path::Path;

/// Threshold passed to the unsharp mask; differences below it are left alone.
const SHARPEN_THRESHOLD: i32 = 1;

#[derive(Debug, Default, Clone, Copy)]
pub struct RasterService;

impl RasterService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ImageService for RasterService {
    fn open(&self, path: &Path) -> Result<Image> {
        let image = image_rs::open(path).map_err(decode_error)?;
        tracing::debug!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "decoded image"
        );
        Ok(image)
    }

    fn save(&self, image: &Image, path: &Path) -> Result<()> {
        image.save(path).map_err(encode_error)
    }

    fn crop(&self, image: &Image, rect: CropRect) -> Result<Image> {
        let fits = rect.right <= image.width() && rect.bottom <= image.height();
        if !fits
            || f64::from(rect.width()) < MIN_CROP_EXTENT
            || f64::from(rect.height()) < MIN_CROP_EXTENT
        {
            return Err(Error::DegenerateCrop(rect));
        }
        Ok(image.crop_imm(rect.left, rect.top, rect.width(), rect.height()))
    }

    fn filter(&self, image: &Image, kind: FilterKind, params: FilterParams) -> Image {
        let strength = params.strength;
        if strength.is_zero() {
            return image.clone();
        }
        #[allow(clippy::cast_precision_loss)]
        let amount = strength.value() as f32;
        match kind {
            FilterKind::Blur => image.blur(amount),
            FilterKind::Sharpen => image.unsharpen(amount, SHARPEN_THRESHOLD),
        }
    }
}

fn decode_error(err: ImageError) -> Error {
    match err {
        ImageError::IoError(io) => Error::Io(io.to_string()),
        other => Error::Decode(other.to_string()),
    }
}

fn encode_error(err: ImageError) -> Error {
    match err {
        ImageError::IoError(io) => Error::Io(io.to_string()),
        other => Error::Encode(other.to_string()),
    }
}

/// Extensions of every format the `image` crate can decode.
#[must_use]
pub fn open_filters() -> Vec<FileFilter> {
    vec![FileFilter::new(
        "Image File",
        extensions(ImageFormat::reading_enabled),
    )]
}

/// Extensions of every format the `image` crate can encode.
#[must_use]
pub fn save_filters() -> Vec<FileFilter> {
    vec![FileFilter::new(
        "Image File",
        extensions(ImageFormat::writing_enabled),
    )]
}

fn extensions(enabled: fn(&ImageFormat) -> bool) -> Vec<String> {
    let mut all: Vec<String> = ImageFormat::all()
        .filter(|format| enabled(format))
        .flat_map(|format| format.extensions_str().iter().map(|ext| (*ext).to_string()))
        .collect();
    all.sort();
    all.dedup();
    all
}
