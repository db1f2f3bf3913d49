use crate::error::{MeasureError, Result};
use crate::geometry::polyline::Polyline;
use crate::geometry::segment::LinearSegment;
use crate::math::solve_2d::solve2;
use crate::math::TOLERANCE;

/// How the second entity of an intersection query is interpreted.
///
/// The data shape is always a [`LinearSegment`]; whether its carrier is
/// clipped to `[0, 1]` is decided here, at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundedness {
    /// Accept crossings only within the segment's own extent.
    Bounded,
    /// Treat the segment as an infinite line through its endpoints.
    Unbounded,
}

/// Parametric line-line intersection.
///
/// Solves `a.p0 + t·(a.p1 − a.p0) = b.p0 + h·(b.p1 − b.p0)` for `(t, h)`.
/// The parameters are unfiltered; callers clip them to `[0, 1]` as their
/// boundedness requires. Returns `None` for a singular system (parallel
/// or coincident carriers).
#[must_use]
pub fn line_line(a: &LinearSegment, b: &LinearSegment) -> Option<(f64, f64)> {
    solve2(&a.direction(), &-b.direction(), &(b.p0 - a.p0))
}

/// All crossings of two polylines, as `(arclen_a, arclen_b)` pairs.
///
/// Segment pairs are visited in nested index order (outer: `a`, inner:
/// `b`), which fixes the result order. Both local parameters must lie in
/// `[0, 1]`; accepted local parameters are converted to cumulative
/// arc-lengths. A result identical to the immediately preceding one is
/// skipped, so a crossing exactly at a shared vertex is reported once.
#[must_use]
pub fn poly_poly(a: &Polyline, b: &Polyline) -> Vec<(f64, f64)> {
    let mut results: Vec<(f64, f64)> = Vec::new();
    let mut walked_a = 0.0;
    for i in 0..a.size() {
        let seg_a = LinearSegment::new(a.vertex(i), a.vertex(i + 1));
        let mut walked_b = 0.0;
        for j in 0..b.size() {
            let seg_b = LinearSegment::new(b.vertex(j), b.vertex(j + 1));
            if let Some((t, h)) = line_line(&seg_a, &seg_b) {
                if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&h) {
                    push_unless_repeat(
                        &mut results,
                        (
                            walked_a + t * a.section_length(i),
                            walked_b + h * b.section_length(j),
                        ),
                    );
                }
            }
            walked_b += b.section_length(j);
        }
        walked_a += a.section_length(i);
    }
    results
}

/// All crossings of a polyline with a line, as
/// `(arclen_along_poly, h)` pairs.
///
/// With [`Boundedness::Unbounded`] only the polyline-side parameter is
/// clipped to `[0, 1]` and `h` is the unbounded offset along the line's
/// carrier; with [`Boundedness::Bounded`] both are clipped. Duplicate
/// reporting at shared vertices is suppressed as in [`poly_poly`].
#[must_use]
pub fn poly_line(poly: &Polyline, line: &LinearSegment, bounds: Boundedness) -> Vec<(f64, f64)> {
    let mut results: Vec<(f64, f64)> = Vec::new();
    let mut walked = 0.0;
    for i in 0..poly.size() {
        let seg = LinearSegment::new(poly.vertex(i), poly.vertex(i + 1));
        if let Some((t, h)) = line_line(&seg, line) {
            let in_range = (0.0..=1.0).contains(&t)
                && (bounds == Boundedness::Unbounded || (0.0..=1.0).contains(&h));
            if in_range {
                push_unless_repeat(&mut results, (walked + t * poly.section_length(i), h));
            }
        }
        walked += poly.section_length(i);
    }
    results
}

/// Reduces an intersection result list to the single expected crossing.
///
/// # Errors
///
/// Returns [`MeasureError::NoCrossing`] for an empty list and
/// [`MeasureError::AmbiguousCrossing`] when more than one crossing was
/// accepted; the caller never gets a silently chosen candidate.
pub fn expect_single(results: &[(f64, f64)]) -> Result<(f64, f64)> {
    match results {
        [] => Err(MeasureError::NoCrossing.into()),
        [single] => Ok(*single),
        many => Err(MeasureError::AmbiguousCrossing { count: many.len() }.into()),
    }
}

fn push_unless_repeat(results: &mut Vec<(f64, f64)>, candidate: (f64, f64)) {
    if let Some(&(prev_t, prev_h)) = results.last() {
        if (prev_t - candidate.0).abs() < TOLERANCE && (prev_h - candidate.1).abs() < TOLERANCE {
            return;
        }
    }
    results.push(candidate);
}
