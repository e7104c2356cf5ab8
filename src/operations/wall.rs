use tracing::debug;

use super::{openings, split_around_openings, SegmentLayer};
use crate::error::Result;
use crate::math::segment::Segment;
use crate::state::DungeonState;

/// Adds an interior or invisible wall.
///
/// An interior wall drawn across existing doors is split around them
/// instead of closing them; invisible walls are added as drawn.
pub struct AddWall {
    segment: Segment,
    layer: SegmentLayer,
}

impl AddWall {
    #[must_use]
    pub fn interior(segment: Segment) -> Self {
        Self {
            segment,
            layer: SegmentLayer::InteriorWalls,
        }
    }

    #[must_use]
    pub fn invisible(segment: Segment) -> Self {
        Self {
            segment,
            layer: SegmentLayer::InvisibleWalls,
        }
    }

    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for a zero-length wall.
    pub fn execute(&self, state: &DungeonState) -> Result<Option<DungeonState>> {
        let wall = Segment::checked(self.segment.start, self.segment.end)?;

        let pieces = match self.layer {
            SegmentLayer::InteriorWalls => split_around_openings(wall, openings(state)),
            _ => vec![wall],
        };
        if pieces.is_empty() {
            debug!("wall lies entirely within a door");
            return Ok(None);
        }

        let mut next = state.clone();
        self.layer.segments_mut(&mut next).extend(pieces);
        Ok(Some(next))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn with_door(door: Segment) -> DungeonState {
        let mut state = DungeonState::start();
        state.doors.push(door);
        state
    }

    #[test]
    fn wall_over_door_splits() {
        let door = Segment::from_coords(40.0, 0.0, 60.0, 0.0);
        let next = AddWall::interior(Segment::from_coords(0.0, 0.0, 100.0, 0.0))
            .execute(&with_door(door))
            .unwrap()
            .unwrap();
        assert_eq!(
            next.interior_walls,
            vec![
                Segment::from_coords(0.0, 0.0, 40.0, 0.0),
                Segment::from_coords(60.0, 0.0, 100.0, 0.0),
            ]
        );
        assert_eq!(next.doors, vec![door]);
    }

    #[test]
    fn wall_over_secret_door_splits() {
        let mut state = DungeonState::start();
        state.secret_doors.push(Segment::from_coords(0.0, 40.0, 0.0, 60.0));
        let next = AddWall::interior(Segment::from_coords(0.0, 0.0, 0.0, 100.0))
            .execute(&state)
            .unwrap()
            .unwrap();
        assert_eq!(next.interior_walls.len(), 2);
    }

    #[test]
    fn invisible_wall_ignores_doors() {
        let door = Segment::from_coords(40.0, 0.0, 60.0, 0.0);
        let next = AddWall::invisible(Segment::from_coords(0.0, 0.0, 100.0, 0.0))
            .execute(&with_door(door))
            .unwrap()
            .unwrap();
        assert_eq!(next.invisible_walls.len(), 1);
        assert!(next.interior_walls.is_empty());
    }

    #[test]
    fn wall_exactly_over_door_is_noop() {
        let door = Segment::from_coords(40.0, 0.0, 60.0, 0.0);
        let result = AddWall::interior(door).execute(&with_door(door)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn plain_wall_is_appended() {
        let next = AddWall::interior(Segment::from_coords(0.0, 0.0, 10.0, 10.0))
            .execute(&DungeonState::start())
            .unwrap()
            .unwrap();
        assert_eq!(next.interior_walls.len(), 1);
    }
}
