use geo::{Buffer, ChaikinSmoothing, MultiPolygon, Polygon, Simplify};
use tracing::debug;

use super::boolean::guarded;
use super::predicates::{is_valid, is_valid_geometry};
use super::FloorGeometry;
use crate::error::Result;

/// Simplification tolerance for generator-produced geometry.
pub const GENERATOR_TOLERANCE: f64 = 5.0;

/// Simplification tolerance for geometry feeding wall synthesis.
pub const WALL_TOLERANCE: f64 = 10.0;

/// Expands the geometry outward by `distance`.
///
/// A non-positive distance shrinks it, possibly to nothing (`Ok(None)`).
///
/// # Errors
///
/// Returns `GeometryError::Kernel` if the kernel fails on the input.
pub fn expand(geometry: &FloorGeometry, distance: f64) -> Result<Option<FloorGeometry>> {
    let multi = geometry.to_multi();
    let buffered = guarded("buffer", || multi.buffer(distance))?;
    Ok(FloorGeometry::from_multi(buffered))
}

/// Simplifies every polygon with the Douglas–Peucker `tolerance`.
///
/// A polygon whose simplified form would be invalid keeps its original
/// vertices. If the simplified components would overlap each other, the
/// geometry is returned unsimplified.
#[must_use]
pub fn simplify(geometry: &FloorGeometry, tolerance: f64) -> FloorGeometry {
    let simplified = map_polygons(geometry, |p| {
        let simplified = p.simplify(tolerance);
        if is_valid(&simplified) {
            simplified
        } else {
            p.clone()
        }
    });
    if is_valid_geometry(&simplified) {
        simplified
    } else {
        debug!(tolerance, "simplified components overlap, keeping original");
        geometry.clone()
    }
}

/// Rounds corners with `iterations` passes of Chaikin smoothing.
#[must_use]
pub fn smooth(geometry: &FloorGeometry, iterations: usize) -> FloorGeometry {
    map_polygons(geometry, |p| p.chaikin_smoothing(iterations))
}

fn map_polygons<F>(geometry: &FloorGeometry, f: F) -> FloorGeometry
where
    F: Fn(&Polygon<f64>) -> Polygon<f64>,
{
    match geometry {
        FloorGeometry::Polygon(p) => FloorGeometry::Polygon(f(p)),
        FloorGeometry::MultiPolygon(m) => {
            FloorGeometry::MultiPolygon(MultiPolygon::new(m.0.iter().map(f).collect()))
        }
    }
}
