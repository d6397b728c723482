// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Display**: scale factor and frame rate
//! - **Window**: initial window size
//! - **Filters**: slider ranges for the preview filters

// ==========================================================================
// Display Defaults
// ==========================================================================

/// Default logical-to-physical pixel factor.
pub const DEFAULT_SCALE_FACTOR: f32 = 1.0;

/// Minimum allowed scale factor.
pub const MIN_SCALE_FACTOR: f32 = 0.5;

/// Maximum allowed scale factor.
pub const MAX_SCALE_FACTOR: f32 = 4.0;

/// Default render/input loop frequency.
pub const DEFAULT_TARGET_FPS: u32 = 90;

/// Minimum frame rate.
pub const MIN_TARGET_FPS: u32 = 1;

/// Maximum frame rate.
pub const MAX_TARGET_FPS: u32 = 240;

// ==========================================================================
// Window Defaults
// ==========================================================================

/// Default window width in logical pixels.
pub const DEFAULT_WINDOW_WIDTH: u32 = 1024;

/// Default window height in logical pixels.
pub const DEFAULT_WINDOW_HEIGHT: u32 = 720;

/// Minimum window width in logical pixels.
pub const MIN_WINDOW_WIDTH: u32 = 640;

/// Minimum window height in logical pixels.
pub const MIN_WINDOW_HEIGHT: u32 = 480;

// ==========================================================================
// Filter Defaults
// ==========================================================================

/// Default upper bound of the blur slider (Gaussian radius).
pub const DEFAULT_BLUR_MAX_RADIUS: u32 = 20;

/// Default upper bound of the sharpen slider (unsharp mask sigma).
pub const DEFAULT_SHARPEN_MAX_AMOUNT: u32 = 10;

/// Smallest slider range a filter may be configured with.
pub const MIN_FILTER_MAX: u32 = 1;

/// Largest blur slider range.
pub const MAX_BLUR_MAX_RADIUS: u32 = 100;

/// Largest sharpen slider range.
pub const MAX_SHARPEN_MAX_AMOUNT: u32 = 50;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_SCALE_FACTOR > 0.0);
    assert!(MIN_SCALE_FACTOR <= DEFAULT_SCALE_FACTOR);
    assert!(MAX_SCALE_FACTOR >= DEFAULT_SCALE_FACTOR);

    assert!(MIN_TARGET_FPS > 0);
    assert!(DEFAULT_TARGET_FPS >= MIN_TARGET_FPS);
    assert!(DEFAULT_TARGET_FPS <= MAX_TARGET_FPS);

    assert!(DEFAULT_WINDOW_WIDTH >= MIN_WINDOW_WIDTH);
    assert!(DEFAULT_WINDOW_HEIGHT >= MIN_WINDOW_HEIGHT);

    assert!(MIN_FILTER_MAX > 0);
    assert!(DEFAULT_BLUR_MAX_RADIUS >= MIN_FILTER_MAX);
    assert!(DEFAULT_BLUR_MAX_RADIUS <= MAX_BLUR_MAX_RADIUS);
    assert!(DEFAULT_SHARPEN_MAX_AMOUNT >= MIN_FILTER_MAX);
    assert!(DEFAULT_SHARPEN_MAX_AMOUNT <= MAX_SHARPEN_MAX_AMOUNT);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_defaults_are_valid() {
        assert_eq!(DEFAULT_SCALE_FACTOR, 1.0);
        assert!(MIN_SCALE_FACTOR < DEFAULT_SCALE_FACTOR);
        assert!(MAX_SCALE_FACTOR > DEFAULT_SCALE_FACTOR);
    }

    #[test]
    fn fps_defaults_are_valid() {
        assert_eq!(DEFAULT_TARGET_FPS, 90);
        assert!(DEFAULT_TARGET_FPS <= MAX_TARGET_FPS);
    }

    #[test]
    fn filter_defaults_are_valid() {
        assert_eq!(DEFAULT_BLUR_MAX_RADIUS, 20);
        assert!(DEFAULT_SHARPEN_MAX_AMOUNT <= MAX_SHARPEN_MAX_AMOUNT);
    }
}
