use std::f64::consts::TAU;

use geo::{coord, LineString, Polygon, Rect};
use serde::{Deserialize, Serialize};

use super::to_coord;
use crate::error::{GeometryError, Result};
use crate::math::Point2;

/// Number of vertices used to approximate an ellipse.
pub const ELLIPSE_VERTICES: usize = 100;

/// An axis-aligned rectangle given by its origin corner and extents.
///
/// Negative extents (a drag towards the origin) are normalized when the
/// rectangle is turned into a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Centre of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Converts the rectangle into a closed polygon.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidShape` if any value is not finite.
    pub fn to_polygon(&self) -> Result<Polygon<f64>> {
        if ![self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(
                GeometryError::InvalidShape("rectangle values must be finite".to_owned()).into(),
            );
        }
        Ok(Rect::new(
            coord! { x: self.x, y: self.y },
            coord! { x: self.x + self.width, y: self.y + self.height },
        )
        .to_polygon())
    }
}

/// Builds a polygon from an ordered vertex list, closing the ring if the
/// last point does not repeat the first.
///
/// No validity check happens here; see [`super::predicates::validate`].
///
/// # Errors
///
/// Returns `GeometryError::InvalidShape` for fewer than 3 vertices or
/// non-finite coordinates.
pub fn polygon_from_points(points: &[Point2]) -> Result<Polygon<f64>> {
    if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return Err(GeometryError::InvalidShape("coordinates must be finite".to_owned()).into());
    }
    if points.len() < 3 {
        return Err(GeometryError::InvalidShape(format!(
            "a polygon needs at least 3 points, got {}",
            points.len()
        ))
        .into());
    }
    let ring: LineString<f64> = points.iter().map(to_coord).collect();
    Ok(Polygon::new(ring, vec![]))
}

/// A two-point line geometry.
#[must_use]
pub fn line(a: &Point2, b: &Point2) -> geo::Line<f64> {
    geo::Line::new(to_coord(a), to_coord(b))
}

/// Approximates the ellipse inscribed in `bounds` with
/// [`ELLIPSE_VERTICES`] vertices.
///
/// # Errors
///
/// Returns `GeometryError::InvalidShape` if the bounds are not finite.
pub fn ellipse(bounds: &Rectangle) -> Result<Polygon<f64>> {
    let center = bounds.center();
    let rx = bounds.width.abs() / 2.0;
    let ry = bounds.height.abs() / 2.0;
    let points: Vec<Point2> = (0..ELLIPSE_VERTICES)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let angle = TAU * i as f64 / ELLIPSE_VERTICES as f64;
            Point2::new(center.x + rx * angle.cos(), center.y + ry * angle.sin())
        })
        .collect();
    polygon_from_points(&points)
}
