use tracing::debug;

use super::SegmentLayer;
use crate::error::Result;
use crate::math::segment::Segment;
use crate::state::DungeonState;

/// Adds a door or secret door.
///
/// Every interior wall that fully contains the door is split into the two
/// pieces flanking it.
pub struct AddDoor {
    segment: Segment,
    layer: SegmentLayer,
}

impl AddDoor {
    /// A regular door.
    #[must_use]
    pub fn door(segment: Segment) -> Self {
        Self {
            segment,
            layer: SegmentLayer::Doors,
        }
    }

    /// A secret door.
    #[must_use]
    pub fn secret(segment: Segment) -> Self {
        Self {
            segment,
            layer: SegmentLayer::SecretDoors,
        }
    }

    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for a zero-length door.
    pub fn execute(&self, state: &DungeonState) -> Result<Option<DungeonState>> {
        let door = Segment::checked(self.segment.start, self.segment.end)?;

        let mut next = state.clone();
        let mut split = 0;
        next.interior_walls = state
            .interior_walls
            .iter()
            .flat_map(|wall| {
                if wall.contains(&door) {
                    split += 1;
                    wall.split_around(&door)
                } else {
                    vec![*wall]
                }
            })
            .collect();
        if split > 0 {
            debug!(split, "door cut through interior walls");
        }

        self.layer.segments_mut(&mut next).push(door);
        Ok(Some(next))
    }
}
