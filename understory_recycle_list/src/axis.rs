// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Main-axis projection helpers.
//!
//! Layouts are written once against a main axis (the scroll direction) and a
//! cross axis. [`Axis`] projects kurbo geometry onto those two axes.

use kurbo::{Insets, Point, Size, Vec2};

/// Scroll direction of a layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// Items stack top to bottom; the main coordinate is `y`.
    #[default]
    Vertical,
    /// Items stack left to right; the main coordinate is `x`.
    Horizontal,
}

impl Axis {
    /// The perpendicular axis.
    #[must_use]
    pub const fn cross_axis(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }

    /// Extent of `size` along this axis.
    #[must_use]
    pub const fn main(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// Extent of `size` across this axis.
    #[must_use]
    pub const fn cross(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.width,
            Self::Horizontal => size.height,
        }
    }

    /// Coordinate of `point` along this axis.
    #[must_use]
    pub const fn main_of(self, point: Point) -> f64 {
        match self {
            Self::Vertical => point.y,
            Self::Horizontal => point.x,
        }
    }

    /// Component of `vec` along this axis.
    #[must_use]
    pub const fn main_of_vec(self, vec: Vec2) -> f64 {
        match self {
            Self::Vertical => vec.y,
            Self::Horizontal => vec.x,
        }
    }

    /// Builds a point from main and cross coordinates.
    #[must_use]
    pub const fn point(self, main: f64, cross: f64) -> Point {
        match self {
            Self::Vertical => Point::new(cross, main),
            Self::Horizontal => Point::new(main, cross),
        }
    }

    /// Builds a size from main and cross extents.
    #[must_use]
    pub const fn size(self, main: f64, cross: f64) -> Size {
        match self {
            Self::Vertical => Size::new(cross, main),
            Self::Horizontal => Size::new(main, cross),
        }
    }

    /// Builds a vector from main and cross components.
    #[must_use]
    pub const fn vec(self, main: f64, cross: f64) -> Vec2 {
        match self {
            Self::Vertical => Vec2::new(cross, main),
            Self::Horizontal => Vec2::new(main, cross),
        }
    }

    /// Replaces the main coordinate of `point`.
    #[must_use]
    pub const fn with_main(self, point: Point, main: f64) -> Point {
        match self {
            Self::Vertical => Point::new(point.x, main),
            Self::Horizontal => Point::new(main, point.y),
        }
    }

    /// Replaces the main extent of `size`.
    #[must_use]
    pub const fn with_main_size(self, size: Size, main: f64) -> Size {
        match self {
            Self::Vertical => Size::new(size.width, main),
            Self::Horizontal => Size::new(main, size.height),
        }
    }

    /// Inset at the leading end of the main axis (top or left).
    #[must_use]
    pub const fn leading(self, insets: Insets) -> f64 {
        match self {
            Self::Vertical => insets.y0,
            Self::Horizontal => insets.x0,
        }
    }

    /// Inset at the trailing end of the main axis (bottom or right).
    #[must_use]
    pub const fn trailing(self, insets: Insets) -> f64 {
        match self {
            Self::Vertical => insets.y1,
            Self::Horizontal => insets.x1,
        }
    }

    /// Inset at the leading end of the cross axis.
    #[must_use]
    pub const fn cross_leading(self, insets: Insets) -> f64 {
        self.cross_axis().leading(insets)
    }

    /// Sum of both insets across this axis.
    #[must_use]
    pub const fn cross_total(self, insets: Insets) -> f64 {
        let cross = self.cross_axis();
        cross.leading(insets) + cross.trailing(insets)
    }
}

/// One end of the main axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Top for vertical layouts, left for horizontal ones.
    Leading,
    /// Bottom for vertical layouts, right for horizontal ones.
    Trailing,
}
