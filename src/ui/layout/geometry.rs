// SPDX-License-Identifier: MPL-2.0
//! Integer geometry in physical pixels.

/// A pointer position in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0,
        height: 0,
    };

    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn main(self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    #[must_use]
    pub fn cross(self, axis: Axis) -> u32 {
        self.main(axis.cross())
    }

    /// Builds a size from main and cross extents along `axis`.
    #[must_use]
    pub fn from_axis(axis: Axis, main: u32, cross: u32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(main, cross),
            Axis::Vertical => Self::new(cross, main),
        }
    }

    #[must_use]
    pub fn shrink(self, padding: Padding) -> Self {
        Self::new(
            self.width.saturating_sub(padding.horizontal()),
            self.height.saturating_sub(padding.vertical()),
        )
    }

    #[must_use]
    pub fn expand(self, padding: Padding) -> Self {
        Self::new(
            self.width.saturating_add(padding.horizontal()),
            self.height.saturating_add(padding.vertical()),
        )
    }
}

/// An axis-aligned box; `x`/`y` are absolute window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[must_use]
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn right(self) -> u32 {
        self.x.saturating_add(self.width)
    }

    #[must_use]
    pub fn bottom(self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Half-open containment test.
    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.x as f32
            && point.y >= self.y as f32
            && point.x < self.right() as f32
            && point.y < self.bottom() as f32
    }

    /// The inner box after removing `padding`.
    #[must_use]
    pub fn inset(self, padding: Padding) -> Self {
        let width = self.width.saturating_sub(padding.horizontal());
        let height = self.height.saturating_sub(padding.vertical());
        Self::new(
            self.x + padding.left.min(self.width),
            self.y + padding.top.min(self.height),
            width,
            height,
        )
    }
}

/// Inner spacing of a widget, in physical pixels once scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Padding {
    pub const ZERO: Padding = Padding {
        top: 0,
        right: 0,
        bottom: 0,
        left: 0,
    };

    #[must_use]
    pub fn all(value: u32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    #[must_use]
    pub fn symmetric(vertical: u32, horizontal: u32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    #[must_use]
    pub fn horizontal(self) -> u32 {
        self.left.saturating_add(self.right)
    }

    #[must_use]
    pub fn vertical(self) -> u32 {
        self.top.saturating_add(self.bottom)
    }

    /// Converts a logical padding to physical pixels.
    #[must_use]
    pub fn scaled(self, scale: crate::ui::scale::ScaleFactor) -> Self {
        Self {
            top: scale.px(self.top),
            right: scale.px(self.right),
            bottom: scale.px(self.bottom),
            left: scale.px(self.left),
        }
    }
}

/// Cross-axis placement of a child inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    #[must_use]
    pub fn cross(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}
