pub mod config;
pub mod theme;

pub use config::DungeonConfig;
pub use theme::ThemeArea;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, StateError, VaultplanError};
use crate::geometry::text::{from_wkt, to_wkt};
use crate::geometry::FloorGeometry;
use crate::math::segment::Segment;

/// One snapshot of the floor plan.
///
/// States are values: editing clones the current state, changes the clone
/// and pushes it to history. A state in history is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct DungeonState {
    /// Floor area, net of subtractions. `None` for an empty dungeon.
    pub geometry: Option<FloorGeometry>,
    pub theme_areas: Vec<ThemeArea>,
    pub doors: Vec<Segment>,
    pub secret_doors: Vec<Segment>,
    pub interior_walls: Vec<Segment>,
    pub invisible_walls: Vec<Segment>,
    pub config: DungeonConfig,
}

impl Default for DungeonState {
    fn default() -> Self {
        Self::start()
    }
}

/// The persisted JSON document.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateDocument {
    wkt: Option<String>,
    #[serde(default)]
    theme_areas: Vec<ThemeArea>,
    #[serde(default)]
    doors: Vec<Segment>,
    #[serde(default)]
    secret_doors: Vec<Segment>,
    #[serde(default)]
    interior_walls: Vec<Segment>,
    #[serde(default)]
    invisible_walls: Vec<Segment>,
    #[serde(default)]
    config: Map<String, Value>,
}

impl DungeonState {
    /// An empty dungeon with the default config.
    #[must_use]
    pub fn start() -> Self {
        Self::start_with_config(DungeonConfig::default())
    }

    /// An empty dungeon keeping the given config.
    #[must_use]
    pub fn start_with_config(config: DungeonConfig) -> Self {
        Self {
            geometry: None,
            theme_areas: Vec::new(),
            doors: Vec::new(),
            secret_doors: Vec::new(),
            interior_walls: Vec::new(),
            invisible_walls: Vec::new(),
            config,
        }
    }

    /// Serializes the state into its persisted JSON form
    /// `{wkt, themeAreas, doors, secretDoors, interiorWalls, invisibleWalls, config}`.
    ///
    /// # Errors
    ///
    /// Returns `StateError::Json` if serialization fails.
    pub fn to_content(&self) -> Result<String> {
        let doc = StateDocument {
            wkt: self.geometry.as_ref().map(to_wkt),
            theme_areas: self.theme_areas.clone(),
            doors: self.doors.clone(),
            secret_doors: self.secret_doors.clone(),
            interior_walls: self.interior_walls.clone(),
            invisible_walls: self.invisible_walls.clone(),
            config: self.config.as_map().clone(),
        };
        serde_json::to_string(&doc).map_err(|e| StateError::Json(e).into())
    }

    /// Parses persisted content, merging the config against the current
    /// defaults. Lists absent from older documents load as empty.
    ///
    /// # Errors
    ///
    /// Returns `StateError::Json` for malformed JSON or
    /// `GeometryError::Wkt` for malformed geometry.
    pub fn from_content(content: &str) -> Result<Self> {
        let doc: StateDocument = serde_json::from_str(content).map_err(StateError::Json)?;
        let geometry = match doc.wkt.as_deref() {
            None | Some("") => None,
            Some(text) => from_wkt(text)?,
        };
        Ok(Self {
            geometry,
            theme_areas: doc.theme_areas,
            doors: doc.doors,
            secret_doors: doc.secret_doors,
            interior_walls: doc.interior_walls,
            invisible_walls: doc.invisible_walls,
            config: DungeonConfig::merged_with_defaults(doc.config),
        })
    }
}

impl FromStr for DungeonState {
    type Err = VaultplanError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_content(s)
    }
}
