//! 2D geometry primitives for posture rules.
//!
//! All coordinates are normalized image space: `[0, 1]` on both axes with
//! the y axis growing downward, matching detector output.

use serde::{Deserialize, Serialize};

/// A point in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// Horizontal position (0.0 = left edge, 1.0 = right edge).
    pub x: f32,
    /// Vertical position (0.0 = top edge, 1.0 = bottom edge).
    pub y: f32,
}

impl Point2D {
    /// Creates a point from raw coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns a synthetic reference point directly above this one.
    ///
    /// "Above" means a smaller y value since image y grows downward. Rules
    /// use this to build a vertical reference ray from a body landmark.
    #[must_use]
    pub fn above(self, offset: f32) -> Self {
        Self::new(self.x, self.y - offset)
    }
}

/// Returns the midpoint of two points.
#[must_use]
pub fn midpoint(a: Point2D, b: Point2D) -> Point2D {
    Point2D::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Returns the angle in degrees at vertex `b` between rays `b->a` and `b->c`.
///
/// Computed as the absolute difference of the two ray headings, folded into
/// `[0, 180]`. Collinear rays pointing the same way measure 0 degrees;
/// opposite-pointing rays measure 180. Degenerate triples (coincident
/// points) go through the same arithmetic without special-casing.
#[must_use]
pub fn angle(a: Point2D, b: Point2D, c: Point2D) -> f32 {
    let heading_c = (c.y - b.y).atan2(c.x - b.x);
    let heading_a = (a.y - b.y).atan2(a.x - b.x);
    let mut degrees = (heading_c - heading_a).to_degrees().abs();
    if degrees > 180.0 {
        degrees = 360.0 - degrees;
    }
    degrees
}
