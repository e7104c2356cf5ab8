use super::{Point2, TOLERANCE};

/// Returns the minimum distance from `p` to the line segment `a`–`b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < TOLERANCE * TOLERANCE {
        // Degenerate segment (zero length).
        return nalgebra::distance(p, a);
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    nalgebra::distance(p, &(a + d * t))
}
