use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use geo::{BooleanOps, MultiPolygon, Polygon};
use tracing::error;

use super::FloorGeometry;
use crate::error::{GeometryError, Result};

/// The type of boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Difference,
    Intersection,
}

/// Computes `geometry ∪ shape`.
///
/// # Errors
///
/// Returns `GeometryError::Kernel` if the kernel fails on the input.
pub fn union(geometry: &FloorGeometry, shape: &Polygon<f64>) -> Result<Option<FloorGeometry>> {
    boolean_execute(geometry, shape, BooleanOp::Union)
}

/// Computes `geometry − shape`.
///
/// # Errors
///
/// Returns `GeometryError::Kernel` if the kernel fails on the input.
pub fn difference(
    geometry: &FloorGeometry,
    shape: &Polygon<f64>,
) -> Result<Option<FloorGeometry>> {
    boolean_execute(geometry, shape, BooleanOp::Difference)
}

/// Computes `geometry ∩ shape`.
///
/// # Errors
///
/// Returns `GeometryError::Kernel` if the kernel fails on the input.
pub fn intersection(
    geometry: &FloorGeometry,
    shape: &Polygon<f64>,
) -> Result<Option<FloorGeometry>> {
    boolean_execute(geometry, shape, BooleanOp::Intersection)
}

/// Runs a boolean operation, normalizing the result.
///
/// An empty result is `Ok(None)`.
///
/// # Errors
///
/// Returns `GeometryError::Kernel` if the kernel fails on the input.
pub fn boolean_execute(
    geometry: &FloorGeometry,
    shape: &Polygon<f64>,
    op: BooleanOp,
) -> Result<Option<FloorGeometry>> {
    let a = geometry.to_multi();
    let b = MultiPolygon::new(vec![shape.clone()]);
    let result = guarded(op_name(op), || match op {
        BooleanOp::Union => a.union(&b),
        BooleanOp::Difference => a.difference(&b),
        BooleanOp::Intersection => a.intersection(&b),
    })?;
    Ok(FloorGeometry::from_multi(result))
}

/// Unions a list of polygons into one normalized geometry.
///
/// # Errors
///
/// Returns `GeometryError::Kernel` if the kernel fails on the input.
pub fn union_all(polygons: &[Polygon<f64>]) -> Result<Option<FloorGeometry>> {
    let mut acc: Option<FloorGeometry> = None;
    for poly in polygons {
        acc = match acc {
            None => Some(FloorGeometry::Polygon(poly.clone())),
            Some(g) => union(&g, poly)?,
        };
    }
    Ok(acc)
}

/// Runs a kernel computation, converting a panic inside the kernel into
/// `GeometryError::Kernel`.
pub(crate) fn guarded<T, F>(op: &str, f: F) -> Result<T>
where
    F: FnOnce() -> T,
{
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let msg = panic_message(payload.as_ref());
        error!(op, %msg, "geometry kernel failure");
        GeometryError::Kernel(format!("{op}: {msg}")).into()
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}

fn op_name(op: BooleanOp) -> &'static str {
    match op {
        BooleanOp::Union => "union",
        BooleanOp::Difference => "difference",
        BooleanOp::Intersection => "intersection",
    }
}
