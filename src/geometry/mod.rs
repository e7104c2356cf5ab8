pub mod boolean;
pub mod construct;
pub mod grid;
pub mod predicates;
pub mod shaping;
pub mod text;

pub use construct::{ellipse, line, polygon_from_points, Rectangle};
pub use geo::{MultiPolygon, Polygon};

use geo::Area;

use crate::math::segment::Segment;
use crate::math::Point2;

/// The floor area of a dungeon: a single polygon or a multi-polygon,
/// possibly with holes.
#[derive(Debug, Clone, PartialEq)]
pub enum FloorGeometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl From<Polygon<f64>> for FloorGeometry {
    fn from(polygon: Polygon<f64>) -> Self {
        Self::Polygon(polygon)
    }
}

impl FloorGeometry {
    /// Normalizes a kernel result: no components is `None`, one component
    /// is a plain polygon. Empty components are dropped.
    #[must_use]
    pub fn from_multi(multi: MultiPolygon<f64>) -> Option<Self> {
        let mut polygons: Vec<Polygon<f64>> = multi
            .0
            .into_iter()
            .filter(|p| !p.exterior().0.is_empty())
            .collect();
        match polygons.len() {
            0 => None,
            1 => polygons.pop().map(Self::Polygon),
            _ => Some(Self::MultiPolygon(MultiPolygon::new(polygons))),
        }
    }

    /// The geometry as a multi-polygon (cloned).
    #[must_use]
    pub fn to_multi(&self) -> MultiPolygon<f64> {
        match self {
            Self::Polygon(p) => MultiPolygon::new(vec![p.clone()]),
            Self::MultiPolygon(m) => m.clone(),
        }
    }

    /// The connected components.
    #[must_use]
    pub fn polygons(&self) -> &[Polygon<f64>] {
        match self {
            Self::Polygon(p) => std::slice::from_ref(p),
            Self::MultiPolygon(m) => &m.0,
        }
    }

    #[must_use]
    pub fn component_count(&self) -> usize {
        self.polygons().len()
    }

    /// Total floor area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.polygons().iter().map(Area::unsigned_area).sum()
    }

    /// Every edge of every exterior and interior ring, zero-length edges
    /// skipped.
    #[must_use]
    pub fn ring_edges(&self) -> Vec<Segment> {
        self.polygons()
            .iter()
            .flat_map(|p| std::iter::once(p.exterior()).chain(p.interiors()))
            .flat_map(geo::LineString::lines)
            .map(|l| Segment::new(to_point(l.start), to_point(l.end)))
            .filter(|s| !s.is_degenerate())
            .collect()
    }
}

/// Converts a kernel coordinate into a map point.
#[must_use]
pub fn to_point(c: geo::Coord<f64>) -> Point2 {
    Point2::new(c.x, c.y)
}

/// Converts a map point into a kernel coordinate.
#[must_use]
pub fn to_coord(p: &Point2) -> geo::Coord<f64> {
    geo::coord! { x: p.x, y: p.y }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(x: f64, y: f64, size: f64) -> Polygon<f64> {
        Rectangle::new(x, y, size, size).to_polygon().unwrap()
    }

    #[test]
    fn single_component_normalizes_to_polygon() {
        let g = FloorGeometry::from_multi(MultiPolygon::new(vec![square(0.0, 0.0, 10.0)]));
        assert!(matches!(g, Some(FloorGeometry::Polygon(_))));
        assert!(FloorGeometry::from_multi(MultiPolygon::new(vec![])).is_none());
    }

    #[test]
    fn ring_edges_include_holes() {
        let outer = square(0.0, 0.0, 100.0);
        let hole = square(40.0, 40.0, 20.0);
        let with_hole = Polygon::new(outer.exterior().clone(), vec![hole.exterior().clone()]);
        let g = FloorGeometry::from(with_hole);
        assert_eq!(g.ring_edges().len(), 8);
        assert_relative_eq!(g.area(), 100.0 * 100.0 - 20.0 * 20.0);
    }
}
