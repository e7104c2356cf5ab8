//! State transitions of the editing engine.
//!
//! Each operation is a small struct built with `new` and run with
//! `execute(&state)`. A successful edit returns `Ok(Some(next))`; an edit
//! that would change nothing returns `Ok(None)` and must not occupy a
//! history slot. Errors leave the input state untouched.

mod door;
mod erase;
mod region;
mod replace;
mod theme;
mod wall;

pub use door::AddDoor;
pub use erase::{Erase, RemoveSegments, RemoveThemeAreas};
pub use region::{AddRegion, RegionShape, SubtractRegion};
pub use replace::{ReplaceGeometry, SetConfig};
pub use theme::{
    resolve_theme_areas, AddThemeArea, ResolvedThemeArea, SettingsProvider, StaticSettings,
};
pub use wall::AddWall;

use crate::math::segment::Segment;
use crate::state::DungeonState;

/// One of the segment collections of a dungeon state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentLayer {
    Doors,
    SecretDoors,
    InteriorWalls,
    InvisibleWalls,
}

impl SegmentLayer {
    pub const ALL: [SegmentLayer; 4] = [
        SegmentLayer::Doors,
        SegmentLayer::SecretDoors,
        SegmentLayer::InteriorWalls,
        SegmentLayer::InvisibleWalls,
    ];

    #[must_use]
    pub fn segments(self, state: &DungeonState) -> &Vec<Segment> {
        match self {
            Self::Doors => &state.doors,
            Self::SecretDoors => &state.secret_doors,
            Self::InteriorWalls => &state.interior_walls,
            Self::InvisibleWalls => &state.invisible_walls,
        }
    }

    pub fn segments_mut(self, state: &mut DungeonState) -> &mut Vec<Segment> {
        match self {
            Self::Doors => &mut state.doors,
            Self::SecretDoors => &mut state.secret_doors,
            Self::InteriorWalls => &mut state.interior_walls,
            Self::InvisibleWalls => &mut state.invisible_walls,
        }
    }
}

/// Splits `wall` around every opening it fully contains.
///
/// Openings are applied in order; each one splits whichever current piece
/// contains it. A wall covered exactly by an opening yields no pieces.
#[must_use]
pub fn split_around_openings<'a>(
    wall: Segment,
    openings: impl IntoIterator<Item = &'a Segment>,
) -> Vec<Segment> {
    let mut pieces = vec![wall];
    for opening in openings {
        pieces = pieces
            .into_iter()
            .flat_map(|piece| {
                if piece.contains(opening) {
                    piece.split_around(opening)
                } else {
                    vec![piece]
                }
            })
            .collect();
    }
    pieces
}

/// Every door and secret door of the state.
fn openings(state: &DungeonState) -> impl Iterator<Item = &Segment> {
    state.doors.iter().chain(&state.secret_doors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_doors_on_one_wall() {
        let wall = Segment::from_coords(0.0, 0.0, 100.0, 0.0);
        let doors = [
            Segment::from_coords(10.0, 0.0, 20.0, 0.0),
            Segment::from_coords(70.0, 0.0, 80.0, 0.0),
        ];
        let pieces = split_around_openings(wall, &doors);
        assert_eq!(
            pieces,
            vec![
                Segment::from_coords(0.0, 0.0, 10.0, 0.0),
                Segment::from_coords(20.0, 0.0, 70.0, 0.0),
                Segment::from_coords(80.0, 0.0, 100.0, 0.0),
            ]
        );
    }

    #[test]
    fn unrelated_openings_leave_wall_whole() {
        let wall = Segment::from_coords(0.0, 0.0, 100.0, 0.0);
        let doors = [Segment::from_coords(10.0, 5.0, 20.0, 5.0)];
        assert_eq!(split_around_openings(wall, &doors), vec![wall]);
    }

    #[test]
    fn layers_address_their_lists() {
        let mut state = DungeonState::start();
        SegmentLayer::SecretDoors
            .segments_mut(&mut state)
            .push(Segment::from_coords(0.0, 0.0, 1.0, 0.0));
        assert_eq!(state.secret_doors.len(), 1);
        assert!(SegmentLayer::Doors.segments(&state).is_empty());
    }
}
