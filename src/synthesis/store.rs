use slotmap::SlotMap;

use super::WallSpec;
use crate::error::Result;

slotmap::new_key_type! {
    /// Unique identifier for a wall object in a [`MemoryWallStore`].
    pub struct WallId;
}

/// The host's store of physical wall objects.
pub trait WallStore {
    /// Deletes every wall carrying a synthesis version tag, returning how
    /// many were deleted. Untagged walls are left alone.
    ///
    /// # Errors
    ///
    /// Returns `CollaboratorError::WallStore` if the host store fails.
    fn delete_synthesized(&mut self) -> Result<usize>;

    /// Creates the given walls in one batch.
    ///
    /// # Errors
    ///
    /// Returns `CollaboratorError::WallStore` if the host store fails.
    fn create_bulk(&mut self, walls: Vec<WallSpec>) -> Result<()>;
}

/// In-memory wall store backed by a slot map.
#[derive(Debug, Default)]
pub struct MemoryWallStore {
    walls: SlotMap<WallId, WallSpec>,
}

impl MemoryWallStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a single wall and returns its ID.
    pub fn add_wall(&mut self, wall: WallSpec) -> WallId {
        self.walls.insert(wall)
    }

    #[must_use]
    pub fn wall(&self, id: WallId) -> Option<&WallSpec> {
        self.walls.get(id)
    }

    pub fn walls(&self) -> impl Iterator<Item = (WallId, &WallSpec)> {
        self.walls.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }
}

impl WallStore for MemoryWallStore {
    fn delete_synthesized(&mut self) -> Result<usize> {
        let before = self.walls.len();
        self.walls.retain(|_, wall| wall.version.is_none());
        Ok(before - self.walls.len())
    }

    fn create_bulk(&mut self, walls: Vec<WallSpec>) -> Result<()> {
        for wall in walls {
            self.walls.insert(wall);
        }
        Ok(())
    }
}
