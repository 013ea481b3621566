//! Core geometry types for Perch.
//!
//! All coordinates are viewport pixels with the origin at the top-left corner.

use std::ops::Sub;

use serde::{Deserialize, Serialize};

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Largest absolute component. Used to judge how far a popover moved.
    #[inline]
    pub fn max_abs(&self) -> f32 {
        self.x.abs().max(self.y.abs())
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Replace non-finite and negative components with zero.
    #[inline]
    pub fn sanitized(&self) -> Self {
        Self {
            width: non_negative(self.width),
            height: non_negative(self.height),
        }
    }
}

/// A rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Check if `other` lies entirely inside this rectangle (edges inclusive).
    #[inline]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Get the origin point of this rectangle.
    #[inline]
    pub fn origin(&self) -> Point {
        Point { x: self.x, y: self.y }
    }

    /// Get the right edge X coordinate.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the bottom edge Y coordinate.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Translate this rectangle by an offset.
    #[inline]
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..*self
        }
    }

    /// Replace non-finite coordinates with zero and negative sizes with zero.
    ///
    /// Negative origins are kept: a trigger may be partially scrolled off-screen.
    #[inline]
    pub fn sanitized(&self) -> Self {
        Self {
            x: finite_or_zero(self.x),
            y: finite_or_zero(self.y),
            width: non_negative(self.width),
            height: non_negative(self.height),
        }
    }
}

/// Absolute distances from each viewport edge to the matching edge of a box.
///
/// Hosts that position overlays with `top`/`left`/`right`/`bottom` style
/// offsets consume this instead of a [`Rect`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Edges {
    pub top: f32,
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Edges {
    /// Edge distances of `rect` inside a viewport of `viewport` size.
    pub fn of(rect: &Rect, viewport: Size) -> Self {
        Self {
            top: rect.y,
            left: rect.x,
            right: viewport.width - rect.right(),
            bottom: viewport.height - rect.bottom(),
        }
    }
}

#[inline]
fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

#[inline]
fn non_negative(v: f32) -> f32 {
    finite_or_zero(v).max(0.0)
}
