use tracing::debug;

use super::boolean::union_all;
use super::shaping::{simplify, smooth, GENERATOR_TOLERANCE};
use super::{FloorGeometry, Rectangle};
use crate::error::{OperationError, Result};

/// Turns the floor cells of a generated layout into floor geometry.
///
/// Each `(column, row)` cell becomes a `cell_size` square; the squares are
/// unioned, simplified with [`GENERATOR_TOLERANCE`] and, when
/// `smoothing` is given, rounded with that many Chaikin passes. An empty
/// cell list yields `Ok(None)`.
///
/// # Errors
///
/// Returns `OperationError::InvalidInput` for a non-positive cell size,
/// or `GeometryError::Kernel` if the union fails.
pub fn cells_to_geometry(
    cells: &[(i32, i32)],
    cell_size: f64,
    smoothing: Option<usize>,
) -> Result<Option<FloorGeometry>> {
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return Err(OperationError::InvalidInput(format!(
            "cell size must be positive, got {cell_size}"
        ))
        .into());
    }

    let squares = cells
        .iter()
        .map(|&(col, row)| {
            Rectangle::new(
                f64::from(col) * cell_size,
                f64::from(row) * cell_size,
                cell_size,
                cell_size,
            )
            .to_polygon()
        })
        .collect::<Result<Vec<_>>>()?;

    let Some(merged) = union_all(&squares)? else {
        return Ok(None);
    };
    let simplified = simplify(&merged, GENERATOR_TOLERANCE);
    debug!(
        cells = cells.len(),
        components = simplified.component_count(),
        "generated layout merged"
    );
    Ok(Some(match smoothing {
        Some(iterations) if iterations > 0 => smooth(&simplified, iterations),
        _ => simplified,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn l_shaped_room() {
        let cells = [(0, 0), (1, 0), (2, 0), (0, 1), (0, 2)];
        let g = cells_to_geometry(&cells, 50.0, None).unwrap().unwrap();
        assert_eq!(g.component_count(), 1);
        assert_relative_eq!(g.area(), 5.0 * 2500.0, epsilon = 1e-6);
        // Collinear cell corners are gone: six corners, a closing point and
        // at most one collinear ring start.
        assert!(g.polygons()[0].exterior().0.len() <= 8);
    }

    #[test]
    fn separate_rooms_stay_separate() {
        let g = cells_to_geometry(&[(0, 0), (5, 5)], 10.0, None).unwrap().unwrap();
        assert_eq!(g.component_count(), 2);
    }

    #[test]
    fn empty_and_bad_input() {
        assert!(cells_to_geometry(&[], 10.0, None).unwrap().is_none());
        assert!(cells_to_geometry(&[(0, 0)], 0.0, None).is_err());
    }

    #[test]
    fn smoothing_is_optional() {
        let cells = [(0, 0), (1, 0), (0, 1), (1, 1)];
        let plain = cells_to_geometry(&cells, 50.0, None).unwrap().unwrap();
        let smoothed = cells_to_geometry(&cells, 50.0, Some(1)).unwrap().unwrap();
        assert!(smoothed.area() < plain.area());
    }
}
