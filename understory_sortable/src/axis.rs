// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis and edge helpers.

use kurbo::{Point, Rect, Size, Vec2};

/// The axis along which dragging and sibling displacement happen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal movement.
    X,
    /// Vertical movement.
    #[default]
    Y,
}

/// The leading edge measured for an [`Axis`].
///
/// Vertical lists measure from the top, horizontal lists from the left.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Left edge, paired with [`Axis::X`].
    Left,
    /// Top edge, paired with [`Axis::Y`].
    Top,
}

impl Axis {
    /// Returns the leading edge for this axis.
    #[must_use]
    pub const fn edge(self) -> Edge {
        match self {
            Self::X => Edge::Left,
            Self::Y => Edge::Top,
        }
    }

    /// Picks this axis' component out of a vector.
    #[must_use]
    pub const fn of_vec(self, v: Vec2) -> f64 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
        }
    }

    /// Picks this axis' extent out of a size (width for `X`, height for `Y`).
    #[must_use]
    pub const fn extent(self, size: Size) -> f64 {
        match self {
            Self::X => size.width,
            Self::Y => size.height,
        }
    }

    /// Builds a vector that is `value` along this axis and zero on the other.
    #[must_use]
    pub const fn vec(self, value: f64) -> Vec2 {
        match self {
            Self::X => Vec2::new(value, 0.0),
            Self::Y => Vec2::new(0.0, value),
        }
    }

    /// Returns `v` with this axis' component replaced by `value`.
    #[must_use]
    pub const fn with_component(self, v: Vec2, value: f64) -> Vec2 {
        match self {
            Self::X => Vec2::new(value, v.y),
            Self::Y => Vec2::new(v.x, value),
        }
    }

    /// Returns `v` with the component orthogonal to this axis set to zero.
    #[must_use]
    pub const fn lock(self, v: Vec2) -> Vec2 {
        self.vec(self.of_vec(v))
    }
}

impl Edge {
    /// Picks the coordinate of `p` measured along this edge.
    #[must_use]
    pub const fn of_point(self, p: Point) -> f64 {
        match self {
            Self::Left => p.x,
            Self::Top => p.y,
        }
    }

    /// Returns the start coordinate (`x0` or `y0`) of `rect` for this edge.
    #[must_use]
    pub const fn start_of(self, rect: Rect) -> f64 {
        match self {
            Self::Left => rect.x0,
            Self::Top => rect.y0,
        }
    }
}
