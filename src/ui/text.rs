// SPDX-License-Identifier: MPL-2.0
//! Text metrics used by the measurement pass.

/// Measures a single line of text.
///
/// `size` and the returned extents are physical pixels.
pub trait TextMeasurer {
    fn measure(&self, text: &str, size: f32) -> (f32, f32);
}

/// Fixed-advance approximation of a proportional UI font.
///
/// Good enough for sizing labels and buttons; the backend's real text
/// rasterizer draws inside the measured box.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasurer {
    advance: f32,
    line_height: f32,
}

impl MonospaceMeasurer {
    #[must_use]
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(0.6, 1.25)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        let chars = text.chars().count();
        if chars == 0 {
            return (0.0, 0.0);
        }
        #[allow(clippy::cast_precision_loss)]
        let width = chars as f32 * size * self.advance;
        (width, size * self.line_height)
    }
}
