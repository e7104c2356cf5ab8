use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Area, Intersects, Polygon, Relate, Validation};

use super::{to_point, FloorGeometry};
use crate::error::{GeometryError, Result};
use crate::math::collinear::merge_collinear;
use crate::math::distance_2d::point_to_segment_dist;
use crate::math::segment::Segment;
use crate::math::{points_coincide, Point2, POINT_TOLERANCE, TOLERANCE};

/// Returns `true` if the polygon is a valid simple polygon with area.
#[must_use]
pub fn is_valid(polygon: &Polygon<f64>) -> bool {
    polygon.is_valid() && polygon.unsigned_area() > TOLERANCE
}

/// Rejects polygons that are not valid simple polygons.
///
/// Invalid input is never repaired.
///
/// # Errors
///
/// Returns `GeometryError::InvalidShape` if [`is_valid`] fails.
pub fn validate(polygon: &Polygon<f64>) -> Result<()> {
    if is_valid(polygon) {
        Ok(())
    } else {
        Err(GeometryError::InvalidShape(
            "shape must be a simple polygon without self-intersections".to_owned(),
        )
        .into())
    }
}

/// Returns `true` if every component is valid and no two components
/// overlap.
#[must_use]
pub fn is_valid_geometry(geometry: &FloorGeometry) -> bool {
    match geometry {
        FloorGeometry::Polygon(p) => is_valid(p),
        FloorGeometry::MultiPolygon(m) => m.0.iter().all(is_valid) && m.is_valid(),
    }
}

/// Rejects floor geometry that is not a valid region.
///
/// # Errors
///
/// Returns `GeometryError::InvalidShape` if a component is invalid or
/// components overlap.
pub fn validate_geometry(geometry: &FloorGeometry) -> Result<()> {
    for polygon in geometry.polygons() {
        validate(polygon)?;
    }
    if is_valid_geometry(geometry) {
        Ok(())
    } else {
        Err(GeometryError::InvalidShape("floor components must not overlap".to_owned()).into())
    }
}

/// Returns `true` if the shape shares any point with the geometry.
#[must_use]
pub fn intersects(geometry: &FloorGeometry, shape: &Polygon<f64>) -> bool {
    geometry.polygons().iter().any(|p| p.intersects(shape))
}

/// Returns `true` if the boundaries meet but the interiors are disjoint.
#[must_use]
pub fn touches(geometry: &FloorGeometry, shape: &Polygon<f64>) -> bool {
    geometry.to_multi().relate(shape).is_touches()
}

/// Returns `true` if the shape contains the geometry entirely.
#[must_use]
pub fn contains(shape: &Polygon<f64>, geometry: &FloorGeometry) -> bool {
    shape.relate(&geometry.to_multi()).is_contains()
}

/// Returns `true` if the segment lies in the polygon and reaches its
/// interior; a segment running along the boundary is not contained.
#[must_use]
pub fn contains_segment(polygon: &Polygon<f64>, segment: &Segment) -> bool {
    polygon.relate(&segment.to_line()).is_contains()
}

/// Returns `true` if the segment shares any point with the polygon.
#[must_use]
pub fn segment_intersects(polygon: &Polygon<f64>, segment: &Segment) -> bool {
    polygon.intersects(&segment.to_line())
}

/// Where two shapes' boundaries meet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SharedBoundary {
    /// Maximal collinear overlaps of the two boundaries.
    pub segments: Vec<Segment>,
    /// Touch points not covered by any overlap.
    pub points: Vec<Point2>,
}

impl SharedBoundary {
    /// Number of coordinates describing the contact: two per overlap
    /// segment plus one per isolated point.
    #[must_use]
    pub fn coordinate_count(&self) -> usize {
        self.segments.len() * 2 + self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.points.is_empty()
    }
}

/// Computes the boundary contact between the geometry and a shape.
#[must_use]
pub fn shared_boundary(geometry: &FloorGeometry, shape: &Polygon<f64>) -> SharedBoundary {
    let geometry_edges = geometry.ring_edges();
    let shape_edges = FloorGeometry::Polygon(shape.clone()).ring_edges();

    let mut overlaps = Vec::new();
    let mut points: Vec<Point2> = Vec::new();
    for a in &shape_edges {
        for b in &geometry_edges {
            match line_intersection(a.to_line(), b.to_line()) {
                Some(LineIntersection::Collinear { intersection }) => {
                    let overlap =
                        Segment::new(to_point(intersection.start), to_point(intersection.end));
                    if overlap.is_degenerate() {
                        points.push(overlap.start);
                    } else {
                        overlaps.push(overlap);
                    }
                }
                Some(LineIntersection::SinglePoint { intersection, .. }) => {
                    points.push(to_point(intersection));
                }
                None => {}
            }
        }
    }

    let segments = merge_collinear(&overlaps);
    let mut isolated: Vec<Point2> = Vec::new();
    for p in points {
        let on_overlap = segments
            .iter()
            .any(|s| point_to_segment_dist(&p, &s.start, &s.end) < POINT_TOLERANCE);
        if !on_overlap && !isolated.iter().any(|q| points_coincide(q, &p)) {
            isolated.push(p);
        }
    }

    SharedBoundary {
        segments,
        points: isolated,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{polygon_from_points, Rectangle};

    fn square(x: f64, y: f64, size: f64) -> Polygon<f64> {
        Rectangle::new(x, y, size, size).to_polygon().unwrap()
    }

    #[test]
    fn bowtie_is_invalid() {
        let bowtie = polygon_from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 10.0),
        ])
        .unwrap();
        assert!(!is_valid(&bowtie));
        assert!(validate(&bowtie).is_err());
    }

    #[test]
    fn flat_rectangle_is_invalid() {
        assert!(!is_valid(&Rectangle::new(0.0, 0.0, 10.0, 0.0).to_polygon().unwrap()));
        assert!(is_valid(&square(0.0, 0.0, 10.0)));
    }

    #[test]
    fn overlapping_components_are_invalid() {
        let overlapping = FloorGeometry::MultiPolygon(geo::MultiPolygon::new(vec![
            square(0.0, 0.0, 50.0),
            square(25.0, 25.0, 50.0),
        ]));
        assert!(!is_valid_geometry(&overlapping));
        assert!(validate_geometry(&overlapping).is_err());

        let apart = FloorGeometry::MultiPolygon(geo::MultiPolygon::new(vec![
            square(0.0, 0.0, 50.0),
            square(100.0, 0.0, 50.0),
        ]));
        assert!(validate_geometry(&apart).is_ok());
    }

    #[test]
    fn adjacent_squares_touch() {
        let g = FloorGeometry::from(square(0.0, 0.0, 50.0));
        assert!(touches(&g, &square(50.0, 0.0, 50.0)));
        assert!(intersects(&g, &square(50.0, 0.0, 50.0)));
        assert!(!touches(&g, &square(25.0, 0.0, 50.0)));
        assert!(!intersects(&g, &square(200.0, 0.0, 50.0)));
    }

    #[test]
    fn containment() {
        let g = FloorGeometry::from(square(10.0, 10.0, 10.0));
        assert!(contains(&square(0.0, 0.0, 100.0), &g));
        assert!(!contains(&square(15.0, 0.0, 100.0), &g));
    }

    #[test]
    fn boundary_segment_is_not_contained() {
        let room = square(0.0, 0.0, 100.0);
        assert!(contains_segment(&room, &Segment::from_coords(10.0, 50.0, 90.0, 50.0)));
        assert!(!contains_segment(&room, &Segment::from_coords(0.0, 0.0, 100.0, 0.0)));
        assert!(segment_intersects(&room, &Segment::from_coords(0.0, 0.0, 100.0, 0.0)));
    }

    #[test]
    fn shared_edge_is_one_segment() {
        let g = FloorGeometry::from(square(0.0, 0.0, 50.0));
        let contact = shared_boundary(&g, &square(50.0, 0.0, 50.0));
        assert_eq!(contact.segments.len(), 1);
        assert!(contact.points.is_empty());
        assert_eq!(contact.coordinate_count(), 2);
        let s = contact.segments[0];
        assert!(s.contains(&Segment::from_coords(50.0, 0.0, 50.0, 50.0)));
        assert!(Segment::from_coords(50.0, 0.0, 50.0, 50.0).contains(&s));
    }

    #[test]
    fn corner_contact_is_single_point() {
        let g = FloorGeometry::from(square(0.0, 0.0, 50.0));
        let contact = shared_boundary(&g, &square(50.0, 50.0, 50.0));
        assert!(contact.segments.is_empty());
        assert_eq!(contact.coordinate_count(), 1);
    }
}
