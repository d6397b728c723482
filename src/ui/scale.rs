// SPDX-License-Identifier: MPL-2.0
//! Logical to physical pixel conversion.
//!
//! Every size the application declares (fixed widths, padding, font sizes)
//! is written in logical pixels and multiplied by the display scale factor
//! before the layout engine sees it.

use crate::config::{DEFAULT_SCALE_FACTOR, MAX_SCALE_FACTOR, MIN_SCALE_FACTOR};

/// Display scale factor (physical pixels per logical pixel).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor(f32);

impl ScaleFactor {
    /// Creates a scale factor, clamped to the supported range.
    ///
    /// Non-finite values fall back to the default.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(MIN_SCALE_FACTOR, MAX_SCALE_FACTOR))
        } else {
            Self(DEFAULT_SCALE_FACTOR)
        }
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Converts whole logical pixels to whole physical pixels (rounded).
    #[must_use]
    pub fn px(self, logical: u32) -> u32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let physical = (f64::from(logical) * f64::from(self.0)).round() as u32;
        physical
    }

    /// Converts fractional logical pixels to physical pixels.
    #[must_use]
    pub fn px_f32(self, logical: f32) -> f32 {
        logical * self.0
    }

    /// Converts physical pixels back to logical pixels.
    #[must_use]
    pub fn logical(self, physical: f32) -> f32 {
        physical / self.0
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self(DEFAULT_SCALE_FACTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn identity_scale_keeps_values() {
        let scale = ScaleFactor::default();
        assert_eq!(scale.px(10), 10);
        assert_abs_diff_eq!(scale.px_f32(12.5), 12.5);
    }

    #[test]
    fn px_rounds_to_nearest_physical_pixel() {
        let scale = ScaleFactor::new(1.5);
        assert_eq!(scale.px(10), 15);
        assert_eq!(scale.px(3), 5); // 4.5 rounds away from zero
        assert_eq!(scale.px(0), 0);
    }

    #[test]
    fn logical_inverts_px_f32() {
        let scale = ScaleFactor::new(2.0);
        assert_abs_diff_eq!(scale.logical(scale.px_f32(33.0)), 33.0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_abs_diff_eq!(ScaleFactor::new(100.0).value(), MAX_SCALE_FACTOR);
        assert_abs_diff_eq!(ScaleFactor::new(0.0).value(), MIN_SCALE_FACTOR);
        assert_abs_diff_eq!(ScaleFactor::new(f32::NAN).value(), DEFAULT_SCALE_FACTOR);
    }
}
