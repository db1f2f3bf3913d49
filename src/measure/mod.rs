use tracing::{debug, info};

use crate::error::{GeometryError, MeasureError, Result};
use crate::geometry::polyline::Polyline;
use crate::geometry::segment::LinearSegment;
use crate::intersect::{expect_single, poly_line, poly_poly, Boundedness};
use crate::math::{distance, Point2, Vector2, TOLERANCE};

/// One sample of the development pattern: how far the profile sits from
/// the reference at a given position along the sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Distance along the sweep span, starting at the sweep's start cut.
    pub position: f64,
    /// Perpendicular distance from the reference to the profile.
    pub offset: f64,
    /// The sampled point on the boundary.
    pub boundary_point: Point2,
    /// The crossing point found on the profile.
    pub profile_point: Point2,
}

/// Where and how densely to sample the boundary.
///
/// `start` and `end` are arc-lengths on the boundary; a `start` past
/// `end` means the sweep wraps around a closed boundary.
#[derive(Debug, Clone, Copy)]
pub struct SweepPlan {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

/// Orthogonal projection of a point onto the infinite carrier of `line`.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] when the reference segment has
/// zero length, so no carrier direction exists.
pub fn project_onto(point: &Point2, line: &LinearSegment) -> Result<Point2> {
    let s = line.direction();
    let len_sq = s.dot(&s);
    if len_sq < TOLERANCE * TOLERANCE {
        return Err(GeometryError::Degenerate("zero-length reference segment".into()).into());
    }
    let v = point - line.p0;
    Ok(line.p0 + s * (v.dot(&s) / len_sq))
}

/// The perpendicular to `reference` passing through `at`.
///
/// The returned segment is a carrier for [`Boundedness::Unbounded`]
/// queries; its extent has no meaning.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] when the reference segment has
/// zero length.
pub fn perpendicular_probe(reference: &LinearSegment, at: Point2) -> Result<LinearSegment> {
    let dir = reference.direction();
    if dir.norm() < TOLERANCE {
        return Err(GeometryError::Degenerate("zero-length reference segment".into()).into());
    }
    let ort = Vector2::new(dir.y, -dir.x);
    Ok(LinearSegment::new(at, at + ort))
}

/// Measures the profile offset at one position along the boundary.
///
/// The boundary point at arc-length `pos` is projected onto the
/// reference; the perpendicular through the projection is intersected
/// with the profile, which must be crossed exactly once; the offset is
/// the distance from the projection to that crossing.
///
/// # Errors
///
/// Returns a domain error when `pos` is outside the boundary, a
/// degeneracy error for a zero-length reference, or a
/// [`MeasureError`] when the perpendicular misses the profile or
/// crosses it more than once.
pub fn offset_at(
    boundary: &Polyline,
    profile: &Polyline,
    reference: &LinearSegment,
    pos: f64,
) -> Result<Measurement> {
    let boundary_point = boundary.point_at(pos)?;
    let foot = project_onto(&boundary_point, reference)?;
    let probe = perpendicular_probe(reference, foot)?;

    let hits = poly_line(profile, &probe, Boundedness::Unbounded);
    let (t, _h) = expect_single(&hits)?;
    let profile_point = profile.point_at(t)?;

    let offset = distance(&foot, &profile_point);
    debug!(pos, offset, "measured profile offset");

    Ok(Measurement {
        position: pos,
        offset,
        boundary_point,
        profile_point,
    })
}

/// Arc-length position where a cut marker crosses the boundary.
///
/// # Errors
///
/// Returns a [`MeasureError`] unless the marker crosses the boundary in
/// exactly one point.
pub fn cut_position(boundary: &Polyline, marker: &Polyline) -> Result<f64> {
    let hits = poly_poly(boundary, marker);
    let (t, _) = expect_single(&hits)?;
    info!(position = t, "cut marker crosses the boundary");
    Ok(t)
}

/// Samples the boundary at regular arc-length steps over the plan's span.
///
/// The span runs from `start` to `end`, wrapping past the boundary's
/// total length when `start >= end` (a sweep around a closed boundary;
/// equal cut positions mean a full revolution). Samples are taken every
/// `step` until the span is exhausted, then one final sample lands
/// exactly at `end`. Each measurement's `position` is the distance
/// walked along the span, not the boundary arc-length.
///
/// # Errors
///
/// Returns [`MeasureError::InvalidStep`] for a non-positive step,
/// [`MeasureError::EmptySpan`] when the span is degenerate or exceeds
/// the boundary, or any error from [`offset_at`].
pub fn sweep(
    boundary: &Polyline,
    profile: &Polyline,
    reference: &LinearSegment,
    plan: &SweepPlan,
) -> Result<Vec<Measurement>> {
    if plan.step <= 0.0 {
        return Err(MeasureError::InvalidStep(plan.step).into());
    }
    let length = boundary.length();
    let span = if plan.start < plan.end {
        plan.end - plan.start
    } else {
        length - (plan.start - plan.end)
    };
    if span <= 0.0 || span > length + TOLERANCE {
        return Err(MeasureError::EmptySpan.into());
    }
    info!(length, span, step = plan.step, "sweeping boundary");

    let mut samples = Vec::new();
    let mut pos = plan.start;
    let mut walked = 0.0;
    while walked < span {
        let mut sample = offset_at(boundary, profile, reference, pos)?;
        sample.position = walked;
        samples.push(sample);

        pos += plan.step;
        if pos > length {
            pos -= length;
        }
        walked += plan.step;
    }

    // Close the series with a sample exactly at the end cut.
    let mut last = offset_at(boundary, profile, reference, plan.end)?;
    last.position = span;
    samples.push(last);

    Ok(samples)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FlatpatError;

    /// Routes measurement diagnostics into the test harness output.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> LinearSegment {
        LinearSegment::new(Point2::new(x0, y0), Point2::new(x1, y1))
    }

    /// Tent-shaped profile over a horizontal reference, with the
    /// boundary running parallel underneath.
    fn tent() -> (Polyline, Polyline, LinearSegment) {
        let boundary = Polyline::new(vec![Point2::new(0.0, -5.0), Point2::new(10.0, -5.0)]);
        let profile = Polyline::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 3.0),
            Point2::new(10.0, 0.0),
        ]);
        let reference = seg(0.0, 0.0, 10.0, 0.0);
        (boundary, profile, reference)
    }

    #[test]
    fn project_onto_diagonal() {
        let p = project_onto(&Point2::new(0.0, 2.0), &seg(0.0, 0.0, 2.0, 2.0)).unwrap();
        assert!((p - Point2::new(1.0, 1.0)).norm() < TOLERANCE);
    }

    #[test]
    fn project_onto_horizontal() {
        let p = project_onto(&Point2::new(5.0, 7.0), &seg(6.0, 8.0, 1.0, 8.0)).unwrap();
        assert!((p - Point2::new(5.0, 8.0)).norm() < TOLERANCE);
    }

    #[test]
    fn project_onto_degenerate_reference_fails() {
        let err = project_onto(&Point2::new(1.0, 1.0), &seg(2.0, 2.0, 2.0, 2.0));
        assert!(matches!(
            err,
            Err(FlatpatError::Geometry(GeometryError::Degenerate(_)))
        ));
    }

    #[test]
    fn perpendicular_probe_is_orthogonal() {
        let reference = seg(0.0, 0.0, 3.0, 4.0);
        let probe = perpendicular_probe(&reference, Point2::new(1.0, 1.0)).unwrap();
        assert!((probe.p0 - Point2::new(1.0, 1.0)).norm() < TOLERANCE);
        assert!(probe.direction().dot(&reference.direction()).abs() < TOLERANCE);
    }

    #[test]
    fn offset_at_measures_tent_ramp() {
        init_tracing();
        let (boundary, profile, reference) = tent();
        let m = offset_at(&boundary, &profile, &reference, 2.5).unwrap();
        assert!((m.boundary_point - Point2::new(2.5, -5.0)).norm() < TOLERANCE);
        assert!((m.profile_point - Point2::new(2.5, 1.5)).norm() < TOLERANCE);
        assert!((m.offset - 1.5).abs() < TOLERANCE);
    }

    #[test]
    fn offset_at_apex_is_unambiguous() {
        let (boundary, profile, reference) = tent();
        let m = offset_at(&boundary, &profile, &reference, 5.0).unwrap();
        assert!((m.offset - 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn offset_at_out_of_domain_position_fails() {
        let (boundary, profile, reference) = tent();
        assert!(matches!(
            offset_at(&boundary, &profile, &reference, 20.0),
            Err(FlatpatError::Geometry(
                GeometryError::DistanceOutOfRange { .. }
            ))
        ));
    }

    #[test]
    fn offset_at_missing_profile_crossing_fails() {
        let boundary = Polyline::new(vec![Point2::new(0.0, -1.0), Point2::new(4.0, -1.0)]);
        // Profile only spans x in [5, 6]; the probe at x = 0 misses it.
        let profile = Polyline::new(vec![Point2::new(5.0, 1.0), Point2::new(6.0, 1.0)]);
        let reference = seg(0.0, 0.0, 4.0, 0.0);
        assert!(matches!(
            offset_at(&boundary, &profile, &reference, 0.0),
            Err(FlatpatError::Measure(MeasureError::NoCrossing))
        ));
    }

    #[test]
    fn offset_at_double_crossing_is_ambiguous() {
        let boundary = Polyline::new(vec![Point2::new(0.0, -1.0), Point2::new(4.0, -1.0)]);
        // The vertical probe at x = 2 crosses this profile twice.
        let profile = Polyline::new(vec![
            Point2::new(0.0, 1.0),
            Point2::new(4.0, 1.0),
            Point2::new(0.0, 3.0),
        ]);
        let reference = seg(0.0, 0.0, 4.0, 0.0);
        assert!(matches!(
            offset_at(&boundary, &profile, &reference, 2.0),
            Err(FlatpatError::Measure(MeasureError::AmbiguousCrossing {
                count: 2
            }))
        ));
    }

    #[test]
    fn cut_position_finds_single_crossing() {
        init_tracing();
        let boundary = Polyline::new(vec![
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 2.0),
        ]);
        let marker = Polyline::new(vec![Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0)]);
        let pos = cut_position(&boundary, &marker).unwrap();
        assert!((pos - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn cut_position_rejects_non_crossing_marker() {
        let boundary = Polyline::new(vec![Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)]);
        let marker = Polyline::new(vec![Point2::new(0.0, 5.0), Point2::new(2.0, 5.0)]);
        assert!(matches!(
            cut_position(&boundary, &marker),
            Err(FlatpatError::Measure(MeasureError::NoCrossing))
        ));
    }

    #[test]
    fn sweep_samples_span_and_closes_at_end() {
        init_tracing();
        let (boundary, profile, reference) = tent();
        let plan = SweepPlan {
            start: 0.0,
            end: 10.0,
            step: 2.5,
        };
        let samples = sweep(&boundary, &profile, &reference, &plan).unwrap();
        let positions: Vec<f64> = samples.iter().map(|m| m.position).collect();
        assert_eq!(positions.len(), 5);
        for (got, want) in positions.iter().zip([0.0, 2.5, 5.0, 7.5, 10.0]) {
            assert!((got - want).abs() < TOLERANCE);
        }
        let offsets: Vec<f64> = samples.iter().map(|m| m.offset).collect();
        for (got, want) in offsets.iter().zip([0.0, 1.5, 3.0, 1.5, 0.0]) {
            assert!((got - want).abs() < TOLERANCE);
        }
    }

    #[test]
    fn sweep_wraps_around_closed_boundary() {
        // Unit square boundary, swept from arc-length 3 around to 1.
        let boundary = Polyline::new(vec![
            Point2::new(0.0, -2.0),
            Point2::new(1.0, -2.0),
            Point2::new(1.0, -1.0),
            Point2::new(0.0, -1.0),
            Point2::new(0.0, -2.0),
        ]);
        let profile = Polyline::new(vec![Point2::new(-1.0, 1.0), Point2::new(2.0, 1.0)]);
        let reference = seg(-1.0, 0.0, 2.0, 0.0);
        let plan = SweepPlan {
            start: 3.0,
            end: 1.0,
            step: 0.5,
        };
        let samples = sweep(&boundary, &profile, &reference, &plan).unwrap();
        // Span is 4 - (3 - 1) = 2: samples at 0, 0.5, 1.0, 1.5 plus the end.
        assert_eq!(samples.len(), 5);
        assert!((samples.last().unwrap().position - 2.0).abs() < TOLERANCE);
        let mono = samples.windows(2).all(|w| w[0].position < w[1].position);
        assert!(mono);
    }

    #[test]
    fn full_pipeline_from_path_data() {
        use crate::geometry::flatten::FlattenParams;
        use crate::parse::parse_path;

        let segments = parse_path("M 0,0 C 2,4 8,4 10,0").unwrap();
        let profile = Polyline::from_segments(&segments, &FlattenParams::new(0.01)).unwrap();
        let boundary = Polyline::new(vec![Point2::new(0.0, -5.0), Point2::new(10.0, -5.0)]);
        let reference = LinearSegment::new(profile.first().unwrap(), profile.last().unwrap());

        // The arch peaks at (5, 3); the probe at x = 5 must find it.
        let m = offset_at(&boundary, &profile, &reference, 5.0).unwrap();
        assert!((m.offset - 3.0).abs() < 0.05, "offset = {}", m.offset);
    }

    #[test]
    fn sweep_rejects_bad_plans() {
        let (boundary, profile, reference) = tent();
        let bad_step = SweepPlan {
            start: 0.0,
            end: 5.0,
            step: 0.0,
        };
        assert!(matches!(
            sweep(&boundary, &profile, &reference, &bad_step),
            Err(FlatpatError::Measure(MeasureError::InvalidStep(_)))
        ));
    }
}
