// SPDX-License-Identifier: MPL-2.0
//! Image processing port definition.
//!
//! The editor never touches pixels itself. Decoding, encoding, cropping and
//! filtering all go through [`ImageService`]; the types here are the
//! vocabulary shared between the editor and whatever implements the service.

use crate::error::Result;
use std::fmt;
use std::path::Path;

/// Working image type exchanged with the service.
pub type Image = image_rs::DynamicImage;

/// Minimum width and height, in image pixels, of an accepted crop.
pub const MIN_CROP_EXTENT: f64 = 2.0;

// =============================================================================
// ImageService
// =============================================================================

/// Pixel operations consumed by the editor.
///
/// `crop` and `filter` are pure: they return a new image and never modify
/// their input. `filter` must be deterministic for identical inputs so a
/// preview can always be recomputed from the untouched snapshot.
pub trait ImageService {
    /// Decodes the file at `path`.
    fn open(&self, path: &Path) -> Result<Image>;

    /// Encodes `image` to `path`, picking the format from the extension.
    fn save(&self, image: &Image, path: &Path) -> Result<()>;

    /// Returns the `rect` region of `image`.
    ///
    /// Fails with [`crate::error::Error::DegenerateCrop`] when the rectangle
    /// is thinner than [`MIN_CROP_EXTENT`] on either side or leaves the image.
    fn crop(&self, image: &Image, rect: CropRect) -> Result<Image>;

    /// Applies `kind` with `params` to `image`.
    fn filter(&self, image: &Image, kind: FilterKind, params: FilterParams) -> Image;
}

// =============================================================================
// Filters
// =============================================================================

/// Preview-able filters, each driven by one slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Blur,
    Sharpen,
}

impl FilterKind {
    /// Every filter, in the order they appear in the sidebar.
    pub const ALL: [FilterKind; 2] = [FilterKind::Blur, FilterKind::Sharpen];

    /// Lower-case name used in messages ("Can't preview blur ...").
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Blur => "blur",
            FilterKind::Sharpen => "sharpen",
        }
    }

    /// Capitalized name used for labels and status text.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            FilterKind::Blur => "Blur",
            FilterKind::Sharpen => "Sharpen",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Integer filter strength read from a slider. Zero means "no filter".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FilterStrength(u32);

impl FilterStrength {
    pub const ZERO: FilterStrength = FilterStrength(0);

    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Converts a slider position, truncating toward zero.
    ///
    /// Negative and non-finite positions read as zero.
    #[must_use]
    pub fn from_slider(value: f32) -> Self {
        if value.is_finite() && value > 0.0 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let truncated = value.trunc().min(u32::MAX as f32) as u32;
            Self(truncated)
        } else {
            Self(0)
        }
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// Parameters handed to [`ImageService::filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterParams {
    pub strength: FilterStrength,
}

impl FilterParams {
    #[must_use]
    pub fn new(strength: FilterStrength) -> Self {
        Self { strength }
    }
}

// =============================================================================
// Crop geometry
// =============================================================================

/// Fractions of each dimension to exclude, measured from the matching edge.
///
/// Each ratio lies in `[0, 1)`; `left + right` and `top + bottom` stay below 1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CropRatios {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl CropRatios {
    #[must_use]
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The ratios as `(left, top, right, bottom)`.
    #[must_use]
    pub fn as_tuple(self) -> (f32, f32, f32, f32) {
        (self.left, self.top, self.right, self.bottom)
    }
}

/// Absolute crop rectangle in image pixels, `right`/`bottom` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRect {
    /// Converts edge ratios to a rectangle on an image of `size`.
    ///
    /// Returns `None` when the remaining width or height is below
    /// [`MIN_CROP_EXTENT`].
    #[must_use]
    pub fn from_ratios(size: (u32, u32), ratios: CropRatios) -> Option<Self> {
        let (left, top, right, bottom) = edges(size, ratios);
        if right - left < MIN_CROP_EXTENT || bottom - top < MIN_CROP_EXTENT {
            return None;
        }
        Some(Self::rounded(size, ratios))
    }

    /// Same conversion without the minimum size check, rounded to whole
    /// pixels inside the image.
    #[must_use]
    pub fn rounded(size: (u32, u32), ratios: CropRatios) -> Self {
        let (left, top, right, bottom) = edges(size, ratios);

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let round = |value: f64, max: u32| value.round().clamp(0.0, f64::from(max)) as u32;

        Self {
            left: round(left, size.0),
            top: round(top, size.1),
            right: round(right, size.0),
            bottom: round(bottom, size.1),
        }
    }

    #[must_use]
    pub fn width(self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    #[must_use]
    pub fn height(self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }
}

fn edges(size: (u32, u32), ratios: CropRatios) -> (f64, f64, f64, f64) {
    let width = f64::from(size.0);
    let height = f64::from(size.1);
    (
        width * f64::from(ratios.left),
        height * f64::from(ratios.top),
        width - width * f64::from(ratios.right),
        height - height * f64::from(ratios.bottom),
    )
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}
