// SPDX-License-Identifier: MPL-2.0
//! Owner of the working image.
//!
//! While a filter preview runs, the controller also keeps the image as it
//! was before the preview started. Every preview frame is computed from that
//! snapshot, never from the previous preview, so ending the preview restores
//! the exact pixels it started from.

use crate::application::port::{
    CropRatios, CropRect, FilterKind, FilterParams, FilterStrength, Image, ImageService,
};
use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;

pub struct ImageViewController {
    service: Box<dyn ImageService>,
    image: Option<Image>,
    original_snapshot: Option<Image>,
}

impl fmt::Debug for ImageViewController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageViewController")
            .field("image", &self.image_size())
            .field("previewing", &self.is_previewing())
            .finish_non_exhaustive()
    }
}

impl ImageViewController {
    pub fn new(service: Box<dyn ImageService>) -> Self {
        Self {
            service,
            image: None,
            original_snapshot: None,
        }
    }

    #[must_use]
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    /// `(width, height)` of the working image.
    #[must_use]
    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|image| (image.width(), image.height()))
    }

    #[must_use]
    pub fn is_previewing(&self) -> bool {
        self.original_snapshot.is_some()
    }

    #[must_use]
    pub fn original_snapshot(&self) -> Option<&Image> {
        self.original_snapshot.as_ref()
    }

    /// Decodes `path` without touching the working image.
    pub fn open(&self, path: &Path) -> Result<Image> {
        self.service.open(path)
    }

    /// Replaces the working image. Any preview snapshot is dropped.
    pub fn set_image(&mut self, image: Image) {
        self.image = Some(image);
        self.original_snapshot = None;
    }

    /// Encodes the working image to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let image = self.image.as_ref().ok_or(Error::NoImage)?;
        self.service.save(image, path)?;
        tracing::info!(path = %path.display(), "image saved");
        Ok(())
    }

    /// Snapshots the working image and shows `kind` at `strength` on it.
    ///
    /// A snapshot taken earlier is kept.
    pub fn begin_preview(&mut self, kind: FilterKind, strength: FilterStrength) -> Result<()> {
        if self.original_snapshot.is_none() {
            self.original_snapshot = Some(self.image.clone().ok_or(Error::NoImage)?);
        }
        self.update_preview(kind, strength)
    }

    /// Recomputes the preview from the snapshot.
    pub fn update_preview(&mut self, kind: FilterKind, strength: FilterStrength) -> Result<()> {
        let snapshot = self.original_snapshot.as_ref().ok_or(Error::NoImage)?;
        let preview = self
            .service
            .filter(snapshot, kind, FilterParams::new(strength));
        self.image = Some(preview);
        Ok(())
    }

    /// Restores the snapshot. Returns whether a preview was running.
    pub fn end_preview(&mut self) -> bool {
        match self.original_snapshot.take() {
            Some(original) => {
                self.image = Some(original);
                true
            }
            None => false,
        }
    }

    /// Keeps the previewed image and drops the snapshot.
    pub fn commit_preview(&mut self) -> bool {
        self.original_snapshot.take().is_some()
    }

    /// Filters the working image in place, outside of any preview.
    pub fn apply_filter(&mut self, kind: FilterKind, strength: FilterStrength) -> Result<()> {
        let image = self.image.as_ref().ok_or(Error::NoImage)?;
        let filtered = self.service.filter(image, kind, FilterParams::new(strength));
        self.image = Some(filtered);
        Ok(())
    }

    /// Crops the working image to `ratios` and returns the new size.
    ///
    /// Fails with [`Error::DegenerateCrop`] and leaves the image untouched
    /// when the selection is under two pixels wide or high.
    pub fn crop(&mut self, ratios: CropRatios) -> Result<(u32, u32)> {
        let size = self.image_size().ok_or(Error::NoImage)?;
        let rect = CropRect::from_ratios(size, ratios)
            .ok_or_else(|| Error::DegenerateCrop(CropRect::rounded(size, ratios)))?;
        let image = self.image.as_ref().ok_or(Error::NoImage)?;
        let cropped = self.service.crop(image, rect)?;
        tracing::debug!(%rect, "cropped");
        let new_size = (cropped.width(), cropped.height());
        self.set_image(cropped);
        Ok(new_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::RasterService;
    use image_rs::{Rgba, RgbaImage};
    use tempfile::tempdir;

    fn gradient(width: u32, height: u32) -> Image {
        let buffer = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7 % 256) as u8, (y * 13 % 256) as u8, (x * y * 5 % 256) as u8, 255])
        });
        Image::ImageRgba8(buffer)
    }

    fn controller_with(image: Image) -> ImageViewController {
        let mut controller = ImageViewController::new(Box::new(RasterService::new()));
        controller.set_image(image);
        controller
    }

    #[test]
    fn preview_is_always_computed_from_the_snapshot() {
        let original = gradient(32, 24);
        let mut controller = controller_with(original.clone());

        controller.begin_preview(FilterKind::Blur, FilterStrength::new(2)).unwrap();
        controller.update_preview(FilterKind::Blur, FilterStrength::new(5)).unwrap();
        let direct = RasterService::new().filter(
            &original,
            FilterKind::Blur,
            FilterParams::new(FilterStrength::new(5)),
        );
        assert_eq!(controller.image().unwrap().as_bytes(), direct.as_bytes());
        assert_eq!(controller.original_snapshot().unwrap().as_bytes(), original.as_bytes());
    }

    #[test]
    fn ending_a_preview_restores_identical_pixels() {
        let original = gradient(16, 16);
        let mut controller = controller_with(original.clone());

        controller.begin_preview(FilterKind::Sharpen, FilterStrength::new(3)).unwrap();
        assert_ne!(controller.image().unwrap().as_bytes(), original.as_bytes());
        assert!(controller.end_preview());
        assert_eq!(controller.image().unwrap().as_bytes(), original.as_bytes());
        assert!(!controller.is_previewing());
        assert!(!controller.end_preview());
    }

    #[test]
    fn commit_keeps_the_filtered_image() {
        let mut controller = controller_with(gradient(16, 16));
        controller.begin_preview(FilterKind::Blur, FilterStrength::new(2)).unwrap();
        let preview = controller.image().unwrap().as_bytes().to_vec();
        assert!(controller.commit_preview());
        assert!(!controller.is_previewing());
        assert_eq!(controller.image().unwrap().as_bytes(), preview.as_slice());
    }

    #[test]
    fn crop_resizes_the_image() {
        let mut controller = controller_with(gradient(800, 600));
        let size = controller.crop(CropRatios::new(0.1, 0.1, 0.1, 0.1)).unwrap();
        assert_eq!(size, (640, 480));
        assert_eq!(controller.image_size(), Some((640, 480)));
    }

    #[test]
    fn degenerate_crop_leaves_the_image_alone() {
        let original = gradient(10, 10);
        let mut controller = controller_with(original.clone());
        let err = controller
            .crop(CropRatios::new(0.45, 0.0, 0.45, 0.0))
            .unwrap_err();
        assert!(matches!(err, Error::DegenerateCrop(_)));
        assert_eq!(controller.image().unwrap().as_bytes(), original.as_bytes());
    }

    #[test]
    fn operations_without_an_image_fail() {
        let mut controller = ImageViewController::new(Box::new(RasterService::new()));
        assert!(matches!(
            controller.begin_preview(FilterKind::Blur, FilterStrength::new(1)),
            Err(Error::NoImage)
        ));
        assert!(!controller.is_previewing());
        assert!(matches!(controller.crop(CropRatios::default()), Err(Error::NoImage)));
        assert!(matches!(
            controller.save(Path::new("unused.png")),
            Err(Error::NoImage)
        ));
    }

    #[test]
    fn open_and_save_go_through_the_service() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.png");
        let controller = controller_with(gradient(12, 8));
        controller.save(&path).unwrap();

        let reopened = controller.open(&path).unwrap();
        assert_eq!((reopened.width(), reopened.height()), (12, 8));
    }
}
