use crate::error::{GeometryError, Result};
use crate::math::{distance, Point2, TOLERANCE};

use super::segment::{CubicSegment, Segment};

/// Interior probe positions used to sample chord deviation per interval.
const PROBES: [f64; 3] = [0.33, 0.50, 0.67];

/// Parameters controlling adaptive flattening.
#[derive(Debug, Clone, Copy)]
pub struct FlattenParams {
    /// Maximum allowed deviation between a chord and the true curve,
    /// in the same units as the curve coordinates.
    pub tolerance: f64,
    /// Upper bound on the subdivision search.
    pub max_subdivisions: u32,
}

impl FlattenParams {
    /// Default cap on the subdivision search.
    pub const DEFAULT_MAX_SUBDIVISIONS: u32 = 16_000;

    /// Creates parameters with the given tolerance and the default cap.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            max_subdivisions: Self::DEFAULT_MAX_SUBDIVISIONS,
        }
    }
}

/// Result of flattening: the vertex chain and the worst deviation
/// actually observed.
#[derive(Debug, Clone)]
pub struct Flattened {
    pub vertices: Vec<Point2>,
    pub deviation: f64,
}

/// Flattens one cubic segment into a chord chain within tolerance.
///
/// Subdivision counts are searched linearly starting at 1: for each `n`,
/// the curve is sampled at `n + 1` uniform parameters and the deviation
/// between each chord and the curve is probed at three interior points
/// per interval. The first `n` whose worst deviation fits the tolerance
/// wins. The per-`n` deviation is not proven monotone, so the search
/// stays linear rather than binary.
///
/// # Errors
///
/// Returns [`GeometryError::ToleranceUnachievable`] when no subdivision
/// count up to the cap satisfies the tolerance.
pub fn flatten_cubic(curve: &CubicSegment, params: &FlattenParams) -> Result<Flattened> {
    for n in 1..=params.max_subdivisions {
        let samples = sample_uniform(curve, n);
        let deviation = chord_deviation(curve, &samples, n);
        if deviation <= params.tolerance {
            return Ok(Flattened {
                vertices: samples,
                deviation,
            });
        }
    }
    Err(GeometryError::ToleranceUnachievable {
        tolerance: params.tolerance,
        max_subdivisions: params.max_subdivisions,
    }
    .into())
}

/// Flattens an ordered segment list into one stitched vertex chain.
///
/// Linear segments contribute their endpoints directly; cubic segments
/// are flattened via [`flatten_cubic`]. Consecutive segments must share
/// endpoints. The reported deviation is the maximum across all cubic
/// segments (zero for an all-linear path).
///
/// # Errors
///
/// Returns [`GeometryError::Discontinuity`] when adjacent segments do
/// not share an endpoint, or a flattening error from [`flatten_cubic`].
pub fn flatten_segments(segments: &[Segment], params: &FlattenParams) -> Result<Flattened> {
    let mut vertices: Vec<Point2> = Vec::new();
    let mut worst = 0.0_f64;

    for segment in segments {
        let chain = match segment {
            Segment::Linear(s) => vec![s.p0, s.p1],
            Segment::Cubic(s) => {
                let flat = flatten_cubic(s, params)?;
                worst = worst.max(flat.deviation);
                flat.vertices
            }
        };
        match vertices.last() {
            None => vertices.extend(chain),
            Some(last) => {
                let gap = distance(last, &chain[0]);
                if gap > TOLERANCE {
                    return Err(GeometryError::Discontinuity { gap }.into());
                }
                vertices.extend(chain.into_iter().skip(1));
            }
        }
    }

    Ok(Flattened {
        vertices,
        deviation: worst,
    })
}

fn sample_uniform(curve: &CubicSegment, n: u32) -> Vec<Point2> {
    (0..=n)
        .map(|i| curve.point_at(f64::from(i) / f64::from(n)))
        .collect()
}

fn chord_deviation(curve: &CubicSegment, samples: &[Point2], n: u32) -> f64 {
    let mut worst = 0.0_f64;
    for i in 0..n as usize {
        let a = samples[i];
        let b = samples[i + 1];
        for q in PROBES {
            #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
            let t = (i as f64 + q) / f64::from(n);
            let on_curve = curve.point_at(t);
            let on_chord = Point2::new(a.x * (1.0 - q) + b.x * q, a.y * (1.0 - q) + b.y * q);
            worst = worst.max(distance(&on_curve, &on_chord));
        }
    }
    worst
}
