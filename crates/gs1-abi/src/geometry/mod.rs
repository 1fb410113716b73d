// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Screen-space geometry.
//!
//! Rectangles are half-open: a rectangle covers the pixels `left..right`
//! horizontally and `top..bottom` vertically. A rectangle whose right edge is
//! not past its left edge (or bottom not past top) is empty.

use core::fmt;

#[cfg(test)]
mod geometry_test;

/// A point in screen coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct Point {
    /// Horizontal position.
    pub x: i16,
    /// Vertical position.
    pub y: i16,
}

impl Point {
    /// Creates a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// An axis-aligned, half-open screen rectangle.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct Rect {
    /// Left edge (inclusive).
    pub left: i16,
    /// Top edge (inclusive).
    pub top: i16,
    /// Right edge (exclusive).
    pub right: i16,
    /// Bottom edge (exclusive).
    pub bottom: i16,
}

const fn min(a: i16, b: i16) -> i16 {
    if a < b { a } else { b }
}

const fn max(a: i16, b: i16) -> i16 {
    if a > b { a } else { b }
}

const fn clamp(v: i16, lo: i16, hi: i16) -> i16 {
    min(max(v, lo), hi)
}

impl Rect {
    /// The canonical empty rectangle.
    pub const EMPTY: Self = Self::new(0, 0, 0, 0);

    /// Creates a rectangle from its four edges.
    #[inline]
    #[must_use]
    pub const fn new(left: i16, top: i16, right: i16, bottom: i16) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a rectangle from an origin and a size.
    ///
    /// Edges saturate at the `i16` range instead of wrapping.
    #[inline]
    #[must_use]
    pub const fn from_origin_size(x: i16, y: i16, width: i16, height: i16) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    /// Width in pixels (zero for inverted rectangles).
    #[inline]
    #[must_use]
    pub const fn width(self) -> i16 {
        if self.right > self.left {
            self.right.saturating_sub(self.left)
        } else {
            0
        }
    }

    /// Height in pixels (zero for inverted rectangles).
    #[inline]
    #[must_use]
    pub const fn height(self) -> i16 {
        if self.bottom > self.top {
            self.bottom.saturating_sub(self.top)
        } else {
            0
        }
    }

    /// Returns true if the rectangle covers no pixel.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Returns true if the point lies inside the rectangle.
    #[inline]
    #[must_use]
    pub const fn contains(self, pt: Point) -> bool {
        pt.x >= self.left && pt.x < self.right && pt.y >= self.top && pt.y < self.bottom
    }

    /// Returns true if `other` lies entirely inside this rectangle.
    ///
    /// An empty rectangle is contained in everything.
    #[must_use]
    pub const fn contains_rect(self, other: Self) -> bool {
        other.is_empty()
            || (other.left >= self.left
                && other.top >= self.top
                && other.right <= self.right
                && other.bottom <= self.bottom)
    }

    /// Returns true if the two rectangles share at least one pixel.
    #[inline]
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        !(self.right <= other.left
            || self.left >= other.right
            || self.bottom <= other.top
            || self.top >= other.bottom)
    }

    /// Axis-aligned bounding box of both rectangles.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self::new(
            min(self.left, other.left),
            min(self.top, other.top),
            max(self.right, other.right),
            max(self.bottom, other.bottom),
        )
    }

    /// Overlapping region of both rectangles (may be empty).
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self::new(
            max(self.left, other.left),
            max(self.top, other.top),
            min(self.right, other.right),
            min(self.bottom, other.bottom),
        )
    }

    /// Clamps every edge into `bounds`.
    ///
    /// The result always lies inside `bounds`. A rectangle lying entirely
    /// outside comes back empty, flattened against the nearest edge.
    #[must_use]
    pub const fn clip_to(self, bounds: Self) -> Self {
        Self::new(
            clamp(self.left, bounds.left, bounds.right),
            clamp(self.top, bounds.top, bounds.bottom),
            clamp(self.right, bounds.left, bounds.right),
            clamp(self.bottom, bounds.top, bounds.bottom),
        )
    }

    /// Translates the rectangle.
    #[must_use]
    pub const fn offset(self, dx: i16, dy: i16) -> Self {
        Self::new(
            self.left.saturating_add(dx),
            self.top.saturating_add(dy),
            self.right.saturating_add(dx),
            self.bottom.saturating_add(dy),
        )
    }

    /// Top-left corner.
    #[inline]
    #[must_use]
    pub const fn origin(self) -> Point {
        Point::new(self.left, self.top)
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect({},{})-({},{})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})-({},{})",
            self.left, self.top, self.right, self.bottom
        )
    }
}
