//! WKT round-trip for floor geometry.

use ::wkt::{ToWkt, TryFromWkt};
use geo::{Geometry, MultiPolygon};

use super::FloorGeometry;
use crate::error::{GeometryError, Result};

/// Serializes the geometry as WKT (`POLYGON` or `MULTIPOLYGON`).
#[must_use]
pub fn to_wkt(geometry: &FloorGeometry) -> String {
    match geometry {
        FloorGeometry::Polygon(p) => p.wkt_string(),
        FloorGeometry::MultiPolygon(m) => m.wkt_string(),
    }
}

/// Parses WKT produced by [`to_wkt`], normalized like a kernel result:
/// an empty geometry is `None`, a single component is a plain polygon.
///
/// # Errors
///
/// Returns `GeometryError::Wkt` if the text is malformed or is not a
/// polygon or multi-polygon.
pub fn from_wkt(text: &str) -> Result<Option<FloorGeometry>> {
    let geometry = Geometry::<f64>::try_from_wkt_str(text)
        .map_err(|e| GeometryError::Wkt(e.to_string()))?;
    let multi = match geometry {
        Geometry::Polygon(p) => MultiPolygon::new(vec![p]),
        Geometry::MultiPolygon(m) => m,
        _ => {
            return Err(GeometryError::Wkt("expected POLYGON or MULTIPOLYGON".to_owned()).into())
        }
    };
    Ok(FloorGeometry::from_multi(multi))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::boolean::union;
    use crate::geometry::Rectangle;

    #[test]
    fn polygon_round_trip() {
        let g = FloorGeometry::from(Rectangle::new(0.5, 1.25, 40.0, 30.0).to_polygon().unwrap());
        let text = to_wkt(&g);
        assert!(text.starts_with("POLYGON"));
        assert_eq!(from_wkt(&text).unwrap(), Some(g));
    }

    #[test]
    fn multipolygon_round_trip() {
        let a = FloorGeometry::from(Rectangle::new(0.0, 0.0, 50.0, 50.0).to_polygon().unwrap());
        let b = Rectangle::new(200.0, 0.0, 50.0, 50.0).to_polygon().unwrap();
        let g = union(&a, &b).unwrap().unwrap();
        let text = to_wkt(&g);
        assert!(text.starts_with("MULTIPOLYGON"));
        assert_eq!(from_wkt(&text).unwrap(), Some(g));
    }

    #[test]
    fn empty_text_is_none() {
        assert_eq!(from_wkt("MULTIPOLYGON EMPTY").unwrap(), None);
        assert_eq!(from_wkt("POLYGON EMPTY").unwrap(), None);
    }

    #[test]
    fn single_component_multipolygon_is_a_polygon() {
        let g = from_wkt("MULTIPOLYGON(((0 0,10 0,10 10,0 10,0 0)))").unwrap().unwrap();
        assert!(matches!(g, FloorGeometry::Polygon(_)));
        assert_eq!(g.component_count(), 1);
    }

    #[test]
    fn rejects_other_geometry_types() {
        assert!(from_wkt("POINT(1 2)").is_err());
        assert!(from_wkt("POLYGON((0 0,").is_err());
    }
}
