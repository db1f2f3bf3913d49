use crate::math::{Point2, Vector2};

/// A straight segment between two points.
///
/// The parametric form is `P(t) = p0·(1−t) + p1·t` for `t` in `[0, 1]`.
/// Intersection routines may also treat the carrier as an infinite line;
/// that choice is made at the call site, not encoded here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSegment {
    pub p0: Point2,
    pub p1: Point2,
}

impl LinearSegment {
    /// Creates a new segment between two endpoints.
    #[must_use]
    pub fn new(p0: Point2, p1: Point2) -> Self {
        Self { p0, p1 }
    }

    /// Evaluates the segment at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        let h = 1.0 - t;
        Point2::new(self.p0.x * h + self.p1.x * t, self.p0.y * h + self.p1.y * t)
    }

    /// Closed-form length.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.p1 - self.p0).norm()
    }

    /// Direction vector `p1 − p0` (not normalized).
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        self.p1 - self.p0
    }
}

/// A cubic Bézier segment with four control points.
///
/// There is no closed-form length; the segment must be flattened
/// before any arc-length use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub p0: Point2,
    pub c0: Point2,
    pub c1: Point2,
    pub p1: Point2,
}

impl CubicSegment {
    /// Creates a new cubic segment from its control points.
    #[must_use]
    pub fn new(p0: Point2, c0: Point2, c1: Point2, p1: Point2) -> Self {
        Self { p0, c0, c1, p1 }
    }

    /// Evaluates the curve at parameter `t` via the cubic Bernstein basis.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        let h = 1.0 - t;
        let b0 = h * h * h;
        let b1 = 3.0 * h * h * t;
        let b2 = 3.0 * h * t * t;
        let b3 = t * t * t;
        Point2::new(
            b0 * self.p0.x + b1 * self.c0.x + b2 * self.c1.x + b3 * self.p1.x,
            b0 * self.p0.y + b1 * self.c0.y + b2 * self.c1.y + b3 * self.p1.y,
        )
    }
}

/// A path segment: either straight or cubic.
///
/// Parsed paths are ordered lists of these, with each segment starting
/// where the previous one ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Linear(LinearSegment),
    Cubic(CubicSegment),
}

impl Segment {
    /// Evaluates the segment at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        match self {
            Self::Linear(s) => s.point_at(t),
            Self::Cubic(s) => s.point_at(t),
        }
    }

    /// First control point.
    #[must_use]
    pub fn start(&self) -> Point2 {
        match self {
            Self::Linear(s) => s.p0,
            Self::Cubic(s) => s.p0,
        }
    }

    /// Last control point.
    #[must_use]
    pub fn end(&self) -> Point2 {
        match self {
            Self::Linear(s) => s.p1,
            Self::Cubic(s) => s.p1,
        }
    }
}
