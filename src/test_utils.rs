// SPDX-License-Identifier: MPL-2.0
//! Test helpers shared by unit tests.
//!
//! Float results (scale conversions, slider positions, crop ratios) go
//! through `approx` instead of `assert_eq!`.

pub use approx::assert_abs_diff_eq;

/// Tolerance for ratios derived from pixel positions.
pub const RATIO_EPSILON: f32 = 1e-5;
