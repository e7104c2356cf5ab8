use geo::{Intersects, Polygon};
use tracing::debug;

use super::SegmentLayer;
use crate::error::Result;
use crate::geometry::predicates::segment_intersects;
use crate::geometry::Rectangle;
use crate::state::DungeonState;

/// Removes the segments of one layer that intersect a rectangle.
pub struct RemoveSegments {
    area: Rectangle,
    layer: SegmentLayer,
}

impl RemoveSegments {
    #[must_use]
    pub fn new(area: Rectangle, layer: SegmentLayer) -> Self {
        Self { area, layer }
    }

    /// # Errors
    ///
    /// Returns `GeometryError::InvalidShape` if the rectangle is not finite.
    pub fn execute(&self, state: &DungeonState) -> Result<Option<DungeonState>> {
        let area = self.area.to_polygon()?;
        let mut next = state.clone();
        if remove_intersecting(&mut next, self.layer, &area) == 0 {
            return Ok(None);
        }
        Ok(Some(next))
    }
}

/// The eraser: removes doors, secret doors, interior walls and invisible
/// walls intersecting a rectangle, as one edit.
pub struct Erase {
    area: Rectangle,
}

impl Erase {
    #[must_use]
    pub fn new(area: Rectangle) -> Self {
        Self { area }
    }

    /// # Errors
    ///
    /// Returns `GeometryError::InvalidShape` if the rectangle is not finite.
    pub fn execute(&self, state: &DungeonState) -> Result<Option<DungeonState>> {
        let area = self.area.to_polygon()?;
        let mut next = state.clone();
        let removed: usize = SegmentLayer::ALL
            .iter()
            .map(|&layer| remove_intersecting(&mut next, layer, &area))
            .sum();
        if removed == 0 {
            return Ok(None);
        }
        debug!(removed, "erased segments");
        Ok(Some(next))
    }
}

/// Removes the theme areas that intersect a rectangle.
pub struct RemoveThemeAreas {
    area: Rectangle,
}

impl RemoveThemeAreas {
    #[must_use]
    pub fn new(area: Rectangle) -> Self {
        Self { area }
    }

    /// # Errors
    ///
    /// Returns `GeometryError::InvalidShape` if the rectangle is not finite.
    pub fn execute(&self, state: &DungeonState) -> Result<Option<DungeonState>> {
        let area = self.area.to_polygon()?;
        let mut next = state.clone();
        let before = next.theme_areas.len();
        // Areas whose points no longer form a polygon cannot be hit.
        next.theme_areas.retain(|theme_area| {
            theme_area
                .polygon()
                .map_or(true, |polygon| !polygon.intersects(&area))
        });
        if next.theme_areas.len() == before {
            return Ok(None);
        }
        Ok(Some(next))
    }
}

fn remove_intersecting(state: &mut DungeonState, layer: SegmentLayer, area: &Polygon<f64>) -> usize {
    let segments = layer.segments_mut(state);
    let before = segments.len();
    segments.retain(|segment| !segment_intersects(area, segment));
    before - segments.len()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::segment::Segment;
    use crate::math::Point2;
    use crate::state::ThemeArea;

    fn populated() -> DungeonState {
        let mut state = DungeonState::start();
        state.doors.push(Segment::from_coords(0.0, 0.0, 10.0, 0.0));
        state.doors.push(Segment::from_coords(100.0, 0.0, 110.0, 0.0));
        state.secret_doors.push(Segment::from_coords(5.0, -5.0, 5.0, 5.0));
        state.interior_walls.push(Segment::from_coords(0.0, 2.0, 10.0, 2.0));
        state.invisible_walls.push(Segment::from_coords(200.0, 0.0, 210.0, 0.0));
        state
    }

    #[test]
    fn remove_doors_only_touches_doors() {
        let next = RemoveSegments::new(Rectangle::new(-1.0, -1.0, 20.0, 20.0), SegmentLayer::Doors)
            .execute(&populated())
            .unwrap()
            .unwrap();
        assert_eq!(next.doors, vec![Segment::from_coords(100.0, 0.0, 110.0, 0.0)]);
        assert_eq!(next.secret_doors.len(), 1);
        assert_eq!(next.interior_walls.len(), 1);
    }

    #[test]
    fn remove_with_nothing_hit_is_noop() {
        let result = RemoveSegments::new(
            Rectangle::new(500.0, 500.0, 5.0, 5.0),
            SegmentLayer::InvisibleWalls,
        )
        .execute(&populated())
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn eraser_clears_every_layer() {
        let next = Erase::new(Rectangle::new(-1.0, -1.0, 20.0, 20.0))
            .execute(&populated())
            .unwrap()
            .unwrap();
        assert_eq!(next.doors.len(), 1);
        assert!(next.secret_doors.is_empty());
        assert!(next.interior_walls.is_empty());
        assert_eq!(next.invisible_walls.len(), 1);
    }

    #[test]
    fn eraser_miss_is_noop() {
        let result = Erase::new(Rectangle::new(50.0, 50.0, 5.0, 5.0))
            .execute(&populated())
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn theme_areas_removed_by_rectangle() {
        let mut state = DungeonState::start();
        let triangle = |x: f64| {
            vec![Point2::new(x, 0.0), Point2::new(x + 10.0, 0.0), Point2::new(x, 10.0)]
        };
        state.theme_areas.push(ThemeArea::new(triangle(0.0), "a"));
        state.theme_areas.push(ThemeArea::new(triangle(100.0), "b"));
        let next = RemoveThemeAreas::new(Rectangle::new(2.0, 2.0, 3.0, 3.0))
            .execute(&state)
            .unwrap()
            .unwrap();
        assert_eq!(next.theme_areas.len(), 1);
        assert_eq!(next.theme_areas[0].theme_key, "b");
    }
}
