use serde::{Deserialize, Serialize};

use super::distance_2d::point_to_segment_dist;
use super::{ordered, points_coincide, Point2, Vector2, POINT_TOLERANCE};
use crate::error::{OperationError, Result};

/// A straight line segment: a door, secret door, interior wall or
/// invisible wall.
///
/// Persists as the 4-tuple `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl From<[f64; 4]> for Segment {
    fn from(c: [f64; 4]) -> Self {
        Self::from_coords(c[0], c[1], c[2], c[3])
    }
}

impl From<Segment> for [f64; 4] {
    fn from(s: Segment) -> Self {
        [s.start.x, s.start.y, s.end.x, s.end.y]
    }
}

impl Segment {
    /// Creates a segment without checking its length.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Creates a segment from raw coordinates.
    #[must_use]
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    /// Creates a segment, rejecting zero-length or non-finite input.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the endpoints coincide or
    /// any coordinate is not finite.
    pub fn checked(start: Point2, end: Point2) -> Result<Self> {
        if !(start.x.is_finite() && start.y.is_finite() && end.x.is_finite() && end.y.is_finite())
        {
            return Err(OperationError::InvalidInput(
                "segment coordinates must be finite".to_owned(),
            )
            .into());
        }
        if points_coincide(&start, &end) {
            return Err(OperationError::InvalidInput(format!(
                "zero-length segment at ({}, {})",
                start.x, start.y
            ))
            .into());
        }
        Ok(Self::new(start, end))
    }

    /// Length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        nalgebra::distance(&self.start, &self.end)
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        points_coincide(&self.start, &self.end)
    }

    /// Returns the segment with endpoints in lexicographic order.
    #[must_use]
    pub fn canonical(&self) -> Self {
        let (a, b) = ordered(self.start, self.end);
        Self::new(a, b)
    }

    /// Returns `true` if `other` lies entirely on this segment
    /// (a collinear subset, endpoints included).
    #[must_use]
    pub fn contains(&self, other: &Segment) -> bool {
        point_to_segment_dist(&other.start, &self.start, &self.end) < POINT_TOLERANCE
            && point_to_segment_dist(&other.end, &self.start, &self.end) < POINT_TOLERANCE
    }

    /// Splits this segment around a contained `gap`, returning the pieces
    /// from each original endpoint to the nearer gap endpoint.
    ///
    /// Both segments are canonicalized first, so the result does not
    /// depend on the endpoint order of either input. Zero-length pieces
    /// (a gap flush with an end) are dropped.
    #[must_use]
    pub fn split_around(&self, gap: &Segment) -> Vec<Segment> {
        let outer = self.canonical();
        let inner = gap.canonical();
        [
            Segment::new(outer.start, inner.start),
            Segment::new(inner.end, outer.end),
        ]
        .into_iter()
        .filter(|s| !s.is_degenerate())
        .collect()
    }

    /// Slope of the supporting line. Vertical lines are `f64::INFINITY`,
    /// horizontal lines `0.0`.
    #[must_use]
    pub fn slope(&self) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        if dx.abs() < POINT_TOLERANCE {
            f64::INFINITY
        } else if dy.abs() < POINT_TOLERANCE {
            0.0
        } else {
            dy / dx
        }
    }

    /// Slope of the perpendicular. `0` and infinity swap; any other slope
    /// `m` maps to `-1 / m`.
    #[must_use]
    pub fn perpendicular_slope(&self) -> f64 {
        let m = self.slope();
        if m.is_infinite() {
            0.0
        } else if m == 0.0 {
            f64::INFINITY
        } else {
            -1.0 / m
        }
    }

    /// Corners of the rectangle of the given thickness centred on this
    /// segment, in ring order.
    #[must_use]
    pub fn outline(&self, thickness: f64) -> [Point2; 4] {
        let m = self.perpendicular_slope();
        let dir = if m.is_infinite() {
            Vector2::new(0.0, 1.0)
        } else {
            Vector2::new(1.0, m).normalize()
        };
        let off = dir * (thickness / 2.0);
        [
            self.start + off,
            self.end + off,
            self.end - off,
            self.start - off,
        ]
    }

    /// The segment as a `geo` line.
    #[must_use]
    pub fn to_line(&self) -> geo::Line<f64> {
        geo::Line::new(
            geo::coord! { x: self.start.x, y: self.start.y },
            geo::coord! { x: self.end.x, y: self.end.y },
        )
    }
}
