//! Wall synthesis: derives the physical wall and door objects of a state.
//!
//! Synthesis is delete-then-recreate. Every synthesized wall carries
//! [`SYNTHESIS_VERSION`], so a new pass removes exactly the walls of the
//! previous pass before writing its own. Wall identity is therefore not
//! stable across edits.

mod store;

pub use store::{MemoryWallStore, WallId, WallStore};

use tracing::debug;

use crate::error::Result;
use crate::geometry::shaping::{expand, simplify, WALL_TOLERANCE};
use crate::math::segment::Segment;
use crate::state::DungeonState;

/// Version tag written on every synthesized wall.
pub const SYNTHESIS_VERSION: u32 = 1;

/// What a physical wall object represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallKind {
    /// Solid, rendered wall (floor outline or interior wall).
    Wall,
    Door,
    SecretDoor,
    /// Blocks movement and sight but is not drawn.
    Invisible,
}

/// A wall object to create in the host's wall store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSpec {
    pub segment: Segment,
    pub kind: WallKind,
    /// `Some` for synthesized walls, `None` for walls created elsewhere.
    pub version: Option<u32>,
}

impl WallSpec {
    /// A wall tagged with the current [`SYNTHESIS_VERSION`].
    #[must_use]
    pub fn synthesized(segment: Segment, kind: WallKind) -> Self {
        Self {
            segment,
            kind,
            version: Some(SYNTHESIS_VERSION),
        }
    }
}

/// Derives wall objects from a dungeon state.
pub struct WallSynthesizer<'a> {
    state: &'a DungeonState,
}

impl<'a> WallSynthesizer<'a> {
    #[must_use]
    pub fn new(state: &'a DungeonState) -> Self {
        Self { state }
    }

    /// Computes the full wall set.
    ///
    /// The floor outline is expanded by half the wall thickness and
    /// simplified with [`WALL_TOLERANCE`]; each edge of every exterior and
    /// hole ring becomes a wall. Interior walls, doors, secret doors and
    /// invisible walls follow, one object each.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Kernel` if buffering fails.
    pub fn synthesize(&self) -> Result<Vec<WallSpec>> {
        let state = self.state;
        let mut walls = Vec::new();

        if let Some(geometry) = &state.geometry {
            let half = state.config.wall_thickness() / 2.0;
            if let Some(outline) = expand(geometry, half)? {
                let outline = simplify(&outline, WALL_TOLERANCE);
                walls.extend(
                    outline
                        .ring_edges()
                        .into_iter()
                        .map(|edge| WallSpec::synthesized(edge, WallKind::Wall)),
                );
            }
        }

        let explicit = [
            (&state.interior_walls, WallKind::Wall),
            (&state.doors, WallKind::Door),
            (&state.secret_doors, WallKind::SecretDoor),
            (&state.invisible_walls, WallKind::Invisible),
        ];
        for (segments, kind) in explicit {
            walls.extend(
                segments
                    .iter()
                    .filter(|s| !s.is_degenerate())
                    .map(|&s| WallSpec::synthesized(s, kind)),
            );
        }

        Ok(walls)
    }

    /// Replaces the previously synthesized walls in `store` with a fresh
    /// set, returning the number of walls written.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Kernel` if synthesis fails, or the store's
    /// error if deleting or creating fails.
    pub fn write(&self, store: &mut dyn WallStore) -> Result<usize> {
        let walls = self.synthesize()?;
        let deleted = store.delete_synthesized()?;
        let created = walls.len();
        store.create_bulk(walls)?;
        debug!(deleted, created, "walls synthesized");
        Ok(created)
    }
}
