use crate::error::{GeometryError, Result};
use crate::math::{distance, Point2, TOLERANCE};

use super::flatten::{flatten_segments, FlattenParams};
use super::segment::Segment;

/// An ordered, connected vertex chain with an induced arc-length
/// parameterization.
///
/// Per-segment Euclidean lengths are precomputed at construction; the
/// cumulative sum defines the distance domain `[0, length()]`. The chain
/// is assembled once (optionally via [`Polyline::extend`] /
/// [`Polyline::join`]) and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Polyline {
    vertices: Vec<Point2>,
    section_lengths: Vec<f64>,
}

impl Polyline {
    /// Creates a polyline from an ordered vertex list.
    #[must_use]
    pub fn new(vertices: Vec<Point2>) -> Self {
        let section_lengths = section_lengths_of(&vertices);
        Self {
            vertices,
            section_lengths,
        }
    }

    /// Flattens a parsed segment list and wraps the result in a polyline.
    ///
    /// # Errors
    ///
    /// Returns an error if flattening fails or the segment chain is
    /// discontinuous.
    pub fn from_segments(segments: &[Segment], params: &FlattenParams) -> Result<Self> {
        let flattened = flatten_segments(segments, params)?;
        Ok(Self::new(flattened.vertices))
    }

    /// Total arc length: the sum of all section lengths.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.section_lengths.iter().sum()
    }

    /// Number of segments (one less than the vertex count).
    #[must_use]
    pub fn size(&self) -> usize {
        self.section_lengths.len()
    }

    /// Vertex at index `i`.
    #[must_use]
    pub fn vertex(&self, i: usize) -> Point2 {
        self.vertices[i]
    }

    /// First vertex, if any.
    #[must_use]
    pub fn first(&self) -> Option<Point2> {
        self.vertices.first().copied()
    }

    /// Last vertex, if any.
    #[must_use]
    pub fn last(&self) -> Option<Point2> {
        self.vertices.last().copied()
    }

    /// Length of segment `i`.
    #[must_use]
    pub fn section_length(&self, i: usize) -> f64 {
        self.section_lengths[i]
    }

    /// Whether the first vertex coincides with the last.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.vertices.first(), self.vertices.last()) {
            (Some(a), Some(b)) => distance(a, b) < TOLERANCE,
            _ => false,
        }
    }

    /// Point at arc-length distance `d` from the start.
    ///
    /// The walk accumulates section lengths until the section containing
    /// `d` is found, then interpolates linearly within it. A `d` slightly
    /// past the total length (within `TOLERANCE`) returns the last vertex.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DistanceOutOfRange`] when `d` lies outside
    /// `[0, length()]`.
    pub fn point_at(&self, d: f64) -> Result<Point2> {
        let total = self.length();
        if d < -TOLERANCE || d > total + TOLERANCE || self.vertices.is_empty() {
            return Err(GeometryError::DistanceOutOfRange {
                distance: d,
                length: total,
            }
            .into());
        }
        let d = d.clamp(0.0, total);
        let last = self.vertices[self.vertices.len() - 1];

        let mut walked = 0.0;
        for (i, &section) in self.section_lengths.iter().enumerate() {
            if d <= walked + section {
                if section < TOLERANCE {
                    // Degenerate section, both endpoints coincide.
                    return Ok(self.vertices[i]);
                }
                let t = (d - walked) / section;
                let a = self.vertices[i];
                let b = self.vertices[i + 1];
                return Ok(Point2::new(
                    a.x * (1.0 - t) + b.x * t,
                    a.y * (1.0 - t) + b.y * t,
                ));
            }
            walked += section;
        }
        // Accumulated rounding pushed d past the final section.
        Ok(last)
    }

    /// Appends a vertex chain whose first vertex must coincide with the
    /// current last vertex. The shared vertex is not duplicated.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Discontinuity`] when the shared endpoints
    /// do not coincide within `TOLERANCE`.
    pub fn extend(&mut self, chain: &[Point2]) -> Result<()> {
        let Some(&chain_first) = chain.first() else {
            return Ok(());
        };
        match self.vertices.last() {
            None => {
                self.vertices.extend_from_slice(chain);
            }
            Some(last) => {
                let gap = distance(last, &chain_first);
                if gap > TOLERANCE {
                    return Err(GeometryError::Discontinuity { gap }.into());
                }
                self.vertices.extend_from_slice(&chain[1..]);
            }
        }
        self.section_lengths = section_lengths_of(&self.vertices);
        Ok(())
    }

    /// Concatenates another polyline onto this one.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Discontinuity`] when the other polyline
    /// does not start where this one ends.
    pub fn join(&mut self, other: &Polyline) -> Result<()> {
        self.extend(&other.vertices)
    }
}

fn section_lengths_of(vertices: &[Point2]) -> Vec<f64> {
    vertices
        .windows(2)
        .map(|w| distance(&w[0], &w[1]))
        .collect()
}
