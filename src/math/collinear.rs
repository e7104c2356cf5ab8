use std::cmp::Ordering;

use super::segment::Segment;
use super::{cmp_points, points_coincide, Point2, POINT_TOLERANCE};

/// Merges collinear, touching or overlapping segments into maximal ones.
///
/// Segments are canonicalized and grouped by the line they lie on. Within
/// a group, pieces are chained in point order and any piece starting at or
/// before the current end extends it. Groups come out in first-seen order;
/// degenerate input is skipped.
#[must_use]
pub fn merge_collinear(segments: &[Segment]) -> Vec<Segment> {
    let mut groups: Vec<Vec<Segment>> = Vec::new();
    for seg in segments.iter().filter(|s| !s.is_degenerate()) {
        let seg = seg.canonical();
        match groups.iter_mut().find(|g| same_line(&g[0], &seg)) {
            Some(group) => group.push(seg),
            None => groups.push(vec![seg]),
        }
    }
    groups.into_iter().flat_map(chain).collect()
}

/// Perpendicular distance from `p` to the infinite line through `line`.
fn line_distance(line: &Segment, p: &Point2) -> f64 {
    let d = line.end - line.start;
    let v = p - line.start;
    (d.x * v.y - d.y * v.x).abs() / line.length()
}

fn same_line(a: &Segment, b: &Segment) -> bool {
    line_distance(a, &b.start) < POINT_TOLERANCE && line_distance(a, &b.end) < POINT_TOLERANCE
}

/// Joins the pieces of one line. Canonical endpoints order the same way
/// along a line as the points themselves, so one sorted pass suffices.
fn chain(mut pieces: Vec<Segment>) -> Vec<Segment> {
    pieces.sort_by(|a, b| cmp_points(&a.start, &b.start));
    let mut merged: Vec<Segment> = Vec::with_capacity(pieces.len());
    for piece in pieces {
        match merged.last_mut() {
            Some(run) if reaches(&run.end, &piece.start) => {
                if cmp_points(&piece.end, &run.end) == Ordering::Greater {
                    run.end = piece.end;
                }
            }
            _ => merged.push(piece),
        }
    }
    merged
}

fn reaches(end: &Point2, start: &Point2) -> bool {
    cmp_points(start, end) != Ordering::Greater || points_coincide(start, end)
}
