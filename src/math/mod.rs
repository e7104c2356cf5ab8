pub mod collinear;
pub mod distance_2d;
pub mod segment;

use std::cmp::Ordering;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Distance under which two map-space points (pixels) are the same point.
pub const POINT_TOLERANCE: f64 = 1e-6;

/// Deterministic lexicographic point order: x first, then y.
///
/// Splitting walls around doors canonicalizes endpoints with this order so
/// the same input always yields the same output pieces.
#[must_use]
pub fn cmp_points(a: &Point2, b: &Point2) -> Ordering {
    a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y))
}

/// Returns `true` if the two points are closer than [`POINT_TOLERANCE`].
#[must_use]
pub fn points_coincide(a: &Point2, b: &Point2) -> bool {
    nalgebra::distance(a, b) < POINT_TOLERANCE
}

/// Returns the two points ordered by [`cmp_points`].
#[must_use]
pub fn ordered(a: Point2, b: Point2) -> (Point2, Point2) {
    if cmp_points(&a, &b) == Ordering::Greater {
        (b, a)
    } else {
        (a, b)
    }
}
