//! The dungeon entity: history plus the collaborators every change flows
//! through.
//!
//! Each edit runs an operation against the current state. A real change
//! is persisted, pushed to history, rendered, and finally turned into
//! wall objects. Persistence comes first, so a failed save leaves history
//! untouched. All mutation goes through `&mut Dungeon`, which serializes
//! edits on one instance; hosts driving a dungeon from several sources
//! share it behind a `Mutex`.

mod collaborators;

pub use collaborators::{DocumentStore, MemoryDocument, Permission, Renderer};

use tracing::{debug, warn};

use crate::error::Result;
use crate::geometry::{FloorGeometry, Rectangle};
use crate::history::History;
use crate::math::segment::Segment;
use crate::math::Point2;
use crate::operations::{
    AddDoor, AddRegion, AddThemeArea, AddWall, Erase, RegionShape, RemoveSegments,
    RemoveThemeAreas, ReplaceGeometry, SegmentLayer, SetConfig, SettingsProvider, SubtractRegion,
};
use crate::state::{DungeonConfig, DungeonState};
use crate::synthesis::{WallStore, WallSynthesizer};

/// An editable dungeon bound to its document, wall store and renderer.
pub struct Dungeon<D, W, R> {
    history: History,
    document: D,
    walls: W,
    renderer: R,
    permission: Permission,
}

impl<D, W, R> Dungeon<D, W, R>
where
    D: DocumentStore,
    W: WallStore,
    R: Renderer,
{
    /// Opens the dungeon stored in `document`, or a fresh one if the
    /// document is empty, and renders it.
    ///
    /// # Errors
    ///
    /// Returns the document's error if it cannot be read, or a state error
    /// if its content is malformed.
    pub fn load(document: D, walls: W, renderer: R, permission: Permission) -> Result<Self> {
        let initial = match document.load()? {
            Some(content) => DungeonState::from_content(&content)?,
            None => DungeonState::start(),
        };
        let mut dungeon = Self {
            history: History::new(initial),
            document,
            walls,
            renderer,
            permission,
        };
        dungeon.renderer.render(dungeon.history.current());
        Ok(dungeon)
    }

    #[must_use]
    pub fn state(&self) -> &DungeonState {
        self.history.current()
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn document(&self) -> &D {
        &self.document
    }

    #[must_use]
    pub fn wall_store(&self) -> &W {
        &self.walls
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn permission(&self) -> Permission {
        self.permission
    }

    // --- History ---

    /// Persists `state`, records it after the cursor (discarding any redo
    /// branch), renders it and rewrites the walls.
    ///
    /// # Errors
    ///
    /// Returns the document's error (history unchanged) or the wall
    /// store's error (state already committed).
    pub fn push_state(&mut self, state: DungeonState) -> Result<()> {
        self.persist(&state)?;
        self.history.push(state);
        self.after_change()
    }

    /// Steps back one state. Returns `Ok(false)` at the start of history.
    ///
    /// # Errors
    ///
    /// Returns the document's error (cursor restored) or the wall store's
    /// error.
    pub fn undo(&mut self) -> Result<bool> {
        if !self.history.undo() {
            return Ok(false);
        }
        if let Err(e) = self.persist_current() {
            self.history.redo();
            return Err(e);
        }
        self.after_change()?;
        Ok(true)
    }

    /// Steps forward one state. Returns `Ok(false)` at the end of history.
    ///
    /// # Errors
    ///
    /// Returns the document's error (cursor restored) or the wall store's
    /// error.
    pub fn redo(&mut self) -> Result<bool> {
        if !self.history.redo() {
            return Ok(false);
        }
        if let Err(e) = self.persist_current() {
            self.history.undo();
            return Err(e);
        }
        self.after_change()?;
        Ok(true)
    }

    /// Resets to an empty dungeon that keeps the current config, replacing
    /// the whole history. Silently does nothing for a viewer.
    ///
    /// # Errors
    ///
    /// Returns the document's error (history unchanged) or the wall
    /// store's error.
    pub fn delete_all(&mut self) -> Result<bool> {
        if !self.permission.is_privileged() {
            debug!("delete_all skipped without permission");
            return Ok(false);
        }
        let fresh = DungeonState::start_with_config(self.state().config.clone());
        self.persist(&fresh)?;
        self.history.reset(fresh);
        self.after_change()?;
        Ok(true)
    }

    /// Applies content changed by someone else: pushed and rendered, but
    /// neither saved back nor turned into walls. Content equal to the
    /// current state is ignored.
    ///
    /// # Errors
    ///
    /// Returns a state error if the content is malformed.
    pub fn refresh(&mut self, content: &str) -> Result<bool> {
        let state = DungeonState::from_content(content)?;
        if &state == self.state() {
            return Ok(false);
        }
        self.history.push(state);
        self.renderer.render(self.history.current());
        Ok(true)
    }

    // --- Regions ---

    /// # Errors
    ///
    /// See [`AddRegion::execute`] and [`Self::push_state`].
    pub fn add_region(&mut self, shape: RegionShape) -> Result<bool> {
        let next = AddRegion::new(shape).execute(self.state())?;
        self.apply(next)
    }

    /// # Errors
    ///
    /// See [`Self::add_region`].
    pub fn add_rectangle(&mut self, rect: Rectangle) -> Result<bool> {
        self.add_region(RegionShape::Rectangle(rect))
    }

    /// # Errors
    ///
    /// See [`Self::add_region`].
    pub fn add_polygon(&mut self, points: Vec<Point2>) -> Result<bool> {
        self.add_region(RegionShape::Polygon(points))
    }

    /// # Errors
    ///
    /// See [`Self::add_region`].
    pub fn add_ellipse(&mut self, bounds: Rectangle) -> Result<bool> {
        self.add_region(RegionShape::Ellipse(bounds))
    }

    /// # Errors
    ///
    /// See [`Self::add_region`].
    pub fn add_freehand(&mut self, samples: Vec<Point2>) -> Result<bool> {
        self.add_region(RegionShape::Freehand(samples))
    }

    /// # Errors
    ///
    /// See [`SubtractRegion::execute`] and [`Self::push_state`].
    pub fn subtract_region(&mut self, shape: RegionShape) -> Result<bool> {
        let next = SubtractRegion::new(shape).execute(self.state())?;
        self.apply(next)
    }

    /// # Errors
    ///
    /// See [`Self::subtract_region`].
    pub fn subtract_rectangle(&mut self, rect: Rectangle) -> Result<bool> {
        self.subtract_region(RegionShape::Rectangle(rect))
    }

    /// # Errors
    ///
    /// See [`Self::subtract_region`].
    pub fn subtract_polygon(&mut self, points: Vec<Point2>) -> Result<bool> {
        self.subtract_region(RegionShape::Polygon(points))
    }

    /// # Errors
    ///
    /// See [`Self::subtract_region`].
    pub fn subtract_ellipse(&mut self, bounds: Rectangle) -> Result<bool> {
        self.subtract_region(RegionShape::Ellipse(bounds))
    }

    /// # Errors
    ///
    /// See [`Self::subtract_region`].
    pub fn subtract_freehand(&mut self, samples: Vec<Point2>) -> Result<bool> {
        self.subtract_region(RegionShape::Freehand(samples))
    }

    /// Pushes generator-produced floor geometry.
    ///
    /// # Errors
    ///
    /// See [`ReplaceGeometry::execute`] and [`Self::push_state`].
    pub fn replace_geometry(&mut self, geometry: Option<FloorGeometry>) -> Result<bool> {
        let next = ReplaceGeometry::new(geometry).execute(self.state())?;
        self.apply(next)
    }

    // --- Doors and walls ---

    /// # Errors
    ///
    /// See [`AddDoor::execute`] and [`Self::push_state`].
    pub fn add_door(&mut self, door: Segment) -> Result<bool> {
        let next = AddDoor::door(door).execute(self.state())?;
        self.apply(next)
    }

    /// # Errors
    ///
    /// See [`AddDoor::execute`] and [`Self::push_state`].
    pub fn add_secret_door(&mut self, door: Segment) -> Result<bool> {
        let next = AddDoor::secret(door).execute(self.state())?;
        self.apply(next)
    }

    /// # Errors
    ///
    /// See [`AddWall::execute`] and [`Self::push_state`].
    pub fn add_interior_wall(&mut self, wall: Segment) -> Result<bool> {
        let next = AddWall::interior(wall).execute(self.state())?;
        self.apply(next)
    }

    /// # Errors
    ///
    /// See [`AddWall::execute`] and [`Self::push_state`].
    pub fn add_invisible_wall(&mut self, wall: Segment) -> Result<bool> {
        let next = AddWall::invisible(wall).execute(self.state())?;
        self.apply(next)
    }

    /// # Errors
    ///
    /// See [`RemoveSegments::execute`] and [`Self::push_state`].
    pub fn remove_doors(&mut self, area: Rectangle) -> Result<bool> {
        self.remove_segments(area, SegmentLayer::Doors)
    }

    /// # Errors
    ///
    /// See [`RemoveSegments::execute`] and [`Self::push_state`].
    pub fn remove_secret_doors(&mut self, area: Rectangle) -> Result<bool> {
        self.remove_segments(area, SegmentLayer::SecretDoors)
    }

    /// # Errors
    ///
    /// See [`RemoveSegments::execute`] and [`Self::push_state`].
    pub fn remove_interior_walls(&mut self, area: Rectangle) -> Result<bool> {
        self.remove_segments(area, SegmentLayer::InteriorWalls)
    }

    /// # Errors
    ///
    /// See [`RemoveSegments::execute`] and [`Self::push_state`].
    pub fn remove_invisible_walls(&mut self, area: Rectangle) -> Result<bool> {
        self.remove_segments(area, SegmentLayer::InvisibleWalls)
    }

    /// The eraser: doors, secret doors, interior and invisible walls in
    /// one edit.
    ///
    /// # Errors
    ///
    /// See [`Erase::execute`] and [`Self::push_state`].
    pub fn remove_doors_and_walls(&mut self, area: Rectangle) -> Result<bool> {
        let next = Erase::new(area).execute(self.state())?;
        self.apply(next)
    }

    fn remove_segments(&mut self, area: Rectangle, layer: SegmentLayer) -> Result<bool> {
        let next = RemoveSegments::new(area, layer).execute(self.state())?;
        self.apply(next)
    }

    // --- Themes and config ---

    /// Paints a theme area with the theme selected in `settings`.
    ///
    /// # Errors
    ///
    /// See [`AddThemeArea::execute`] and [`Self::push_state`].
    pub fn add_theme_area(
        &mut self,
        points: Vec<Point2>,
        settings: &dyn SettingsProvider,
    ) -> Result<bool> {
        let next = AddThemeArea::from_settings(points, settings)?.execute(self.state())?;
        self.apply(next)
    }

    /// # Errors
    ///
    /// See [`RemoveThemeAreas::execute`] and [`Self::push_state`].
    pub fn remove_theme_areas(&mut self, area: Rectangle) -> Result<bool> {
        let next = RemoveThemeAreas::new(area).execute(self.state())?;
        self.apply(next)
    }

    /// # Errors
    ///
    /// See [`Self::push_state`].
    pub fn set_config(&mut self, config: DungeonConfig) -> Result<bool> {
        let next = SetConfig::new(config).execute(self.state())?;
        self.apply(next)
    }

    // --- Internals ---

    fn apply(&mut self, next: Option<DungeonState>) -> Result<bool> {
        match next {
            Some(state) => {
                self.push_state(state)?;
                Ok(true)
            }
            None => {
                debug!("edit changed nothing");
                Ok(false)
            }
        }
    }

    fn persist(&mut self, state: &DungeonState) -> Result<()> {
        let content = state.to_content()?;
        self.document
            .update(&content)
            .inspect_err(|e| warn!(error = %e, "saving dungeon failed"))
    }

    fn persist_current(&mut self) -> Result<()> {
        let current = self.history.current().clone();
        self.persist(&current)
    }

    fn after_change(&mut self) -> Result<()> {
        self.renderer.render(self.history.current());
        if !self.permission.is_privileged() {
            debug!("wall synthesis skipped without permission");
            return Ok(());
        }
        WallSynthesizer::new(self.history.current()).write(&mut self.walls)?;
        Ok(())
    }
}
