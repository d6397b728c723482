// SPDX-License-Identifier: MPL-2.0
//! Design tokens shared by every widget.
//!
//! Sizes are logical pixels; widgets scale them with
//! [`ScaleFactor`](crate::ui::scale::ScaleFactor) before measuring or painting.
//!
//! ```
//! use imeditor::ui::design_tokens::{palette, spacing};
//!
//! let overlay = palette::BLACK.with_alpha(0.5);
//! let gap = spacing::XS;
//! # let _ = (overlay, gap);
//! ```

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use crate::ui::paint::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_900: Color = Color::from_rgb(0.1, 0.1, 0.1);
    pub const GRAY_800: Color = Color::from_rgb(0.16, 0.16, 0.16);
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.3);
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);
    pub const GRAY_200: Color = Color::from_rgb(0.75, 0.75, 0.75);
    pub const GRAY_100: Color = Color::from_rgb(0.85, 0.85, 0.85);

    pub const PRIMARY_400: Color = Color::from_rgb(0.4, 0.7, 1.0);
    pub const PRIMARY_500: Color = Color::from_rgb(0.3, 0.6, 0.9);
    pub const PRIMARY_700: Color = Color::from_rgb(0.15, 0.4, 0.7);

    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
    pub const INFO_500: Color = Color::from_rgb(0.392, 0.588, 1.0);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const DISABLED: f32 = 0.4;
}

// ============================================================================
// Spacing Scale
// ============================================================================

pub mod spacing {
    pub const XXS: u32 = 4;
    pub const XS: u32 = 8;
    pub const SM: u32 = 12;
    pub const MD: u32 = 16;
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    pub const BUTTON_HEIGHT: u32 = 32;
    pub const SLIDER_HEIGHT: u32 = 24;
    pub const SLIDER_TRACK: f32 = 4.0;
    pub const SLIDER_THUMB: f32 = 12.0;
    pub const BAR_HEIGHT: u32 = 28;
    pub const SEPARATOR: u32 = 1;

    /// Visible crop handle edge.
    pub const CROP_HANDLE_SIZE: f32 = 10.0;
    /// Distance from an edge within which a press grabs it.
    pub const CROP_HANDLE_HIT_SIZE: f32 = 12.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    pub const BODY: f32 = 14.0;
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XXS < spacing::XS);
    assert!(spacing::XS < spacing::SM);
    assert!(spacing::SM < spacing::MD);
    assert!(sizing::CROP_HANDLE_HIT_SIZE >= sizing::CROP_HANDLE_SIZE);
    assert!(typography::CAPTION < typography::BODY);
};
