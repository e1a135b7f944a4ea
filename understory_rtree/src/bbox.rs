// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding boxes used as node and entry envelopes.

use crate::error::RTreeError;

/// Axis-aligned bounding box in 2D with `f64` coordinates.
///
/// A box with `max < min` on either axis is *empty*. [`BoundingBox::EMPTY`] is the
/// identity for [`BoundingBox::expand`]: expanding any box by it returns that box unchanged.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    /// Minimum x (left)
    pub min_x: f64,
    /// Minimum y (top)
    pub min_y: f64,
    /// Maximum x (right)
    pub max_x: f64,
    /// Maximum y (bottom)
    pub max_y: f64,
}

impl BoundingBox {
    /// The empty box. Contains nothing, intersects nothing, and has zero area.
    pub const EMPTY: Self = Self {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    /// Create a new box from min/max corners.
    ///
    /// The coordinates are not checked; use [`BoundingBox::validate`] when the
    /// input comes from an untrusted source.
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a box from origin and size.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    /// Create a degenerate box covering a single point.
    pub const fn from_point(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    /// Return true if the box is inverted on either axis (no extent at all).
    ///
    /// A zero-width or zero-height box is *not* empty; it has zero area but still
    /// covers a line or a point.
    pub fn is_empty(&self) -> bool {
        self.max_x < self.min_x || self.max_y < self.min_y
    }

    /// Whether all four coordinates are finite and `min <= max` on both axes.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Check the box is usable as an index key.
    ///
    /// # Errors
    ///
    /// - [`RTreeError::NonFiniteBox`] if any coordinate is NaN or infinite.
    /// - [`RTreeError::InvertedBox`] if `min > max` on either axis.
    pub fn validate(&self) -> Result<(), RTreeError> {
        let finite = self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite();
        if !finite {
            return Err(RTreeError::NonFiniteBox(*self));
        }
        if self.is_empty() {
            return Err(RTreeError::InvertedBox(*self));
        }
        Ok(())
    }

    /// Width of the box, or `0.0` if empty.
    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    /// Height of the box, or `0.0` if empty.
    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }

    /// Width × height; zero for empty and degenerate boxes.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// The smallest box containing both `self` and `other`.
    #[must_use]
    pub fn expand(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grow `self` in place to also enclose `other`.
    pub fn expand_to_include(&mut self, other: &Self) {
        *self = self.expand(other);
    }

    /// Extra area needed for `self` to also enclose `candidate`.
    ///
    /// Zero whenever `self` already contains `candidate`. Growth too large to represent
    /// (areas overflowing to infinity) is `f64::INFINITY`, never NaN.
    pub fn required_expansion(&self, candidate: &Self) -> f64 {
        if self.contains(candidate) {
            return 0.0;
        }
        let growth = self.expand(candidate).area() - self.area();
        if growth.is_nan() {
            f64::INFINITY
        } else {
            growth
        }
    }

    /// Whether the two boxes overlap. Touching edges count as overlapping.
    pub fn intersects(&self, other: &Self) -> bool {
        self.intersects_coords(other.min_x, other.min_y, other.max_x, other.max_y)
    }

    /// Coordinate form of [`BoundingBox::intersects`].
    ///
    /// Inverted ranges and NaN coordinates intersect nothing.
    pub fn intersects_coords(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> bool {
        min_x <= max_x
            && min_y <= max_y
            && min_x <= self.max_x
            && self.min_x <= max_x
            && min_y <= self.max_y
            && self.min_y <= max_y
    }

    /// Whether `other` lies entirely inside `self` (boundaries inclusive).
    ///
    /// The empty box is contained by every box; an empty `self` contains nothing else.
    pub fn contains(&self, other: &Self) -> bool {
        if other.is_empty() {
            return true;
        }
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }

    /// Whether the point lies inside the box (boundaries inclusive).
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }

    /// Union of a sequence of boxes; [`BoundingBox::EMPTY`] for an empty sequence.
    pub fn union_of<'a>(boxes: impl IntoIterator<Item = &'a Self>) -> Self {
        boxes.into_iter().fold(Self::EMPTY, |acc, b| acc.expand(b))
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(feature = "kurbo")]
impl From<kurbo::Rect> for BoundingBox {
    /// Converts a Kurbo rectangle, normalizing negative widths and heights.
    fn from(r: kurbo::Rect) -> Self {
        Self::new(
            r.x0.min(r.x1),
            r.y0.min(r.y1),
            r.x0.max(r.x1),
            r.y0.max(r.y1),
        )
    }
}

#[cfg(feature = "kurbo")]
impl From<BoundingBox> for kurbo::Rect {
    fn from(b: BoundingBox) -> Self {
        if b.is_empty() {
            return Self::ZERO;
        }
        Self::new(b.min_x, b.min_y, b.max_x, b.max_y)
    }
}
