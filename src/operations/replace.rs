use tracing::warn;

use crate::error::Result;
use crate::geometry::predicates::validate_geometry;
use crate::geometry::FloorGeometry;
use crate::state::{DungeonConfig, DungeonState};

/// Replaces the config wholesale, filling any missing keys from the
/// defaults. Setting an identical config changes nothing.
pub struct SetConfig {
    config: DungeonConfig,
}

impl SetConfig {
    #[must_use]
    pub fn new(config: DungeonConfig) -> Self {
        Self { config }
    }

    /// # Errors
    ///
    /// Never fails.
    #[allow(clippy::unnecessary_wraps)]
    pub fn execute(&self, state: &DungeonState) -> Result<Option<DungeonState>> {
        let config = self.config.clone().normalized();
        if config == state.config {
            return Ok(None);
        }
        let mut next = state.clone();
        next.config = config;
        Ok(Some(next))
    }
}

/// Replaces the floor geometry with externally produced geometry, such as
/// the output of a layout generator.
pub struct ReplaceGeometry {
    geometry: Option<FloorGeometry>,
}

impl ReplaceGeometry {
    #[must_use]
    pub fn new(geometry: Option<FloorGeometry>) -> Self {
        Self { geometry }
    }

    /// # Errors
    ///
    /// Returns `GeometryError::InvalidShape` if any component is invalid
    /// or components overlap.
    pub fn execute(&self, state: &DungeonState) -> Result<Option<DungeonState>> {
        if let Some(geometry) = &self.geometry {
            validate_geometry(geometry).inspect_err(|e| warn!(error = %e, "rejected geometry"))?;
        }
        let mut next = state.clone();
        next.geometry.clone_from(&self.geometry);
        Ok(Some(next))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::grid::cells_to_geometry;
    use crate::geometry::{polygon_from_points, Rectangle};
    use crate::math::Point2;
    use geo::MultiPolygon;
    use serde_json::json;

    #[test]
    fn set_config_fills_defaults() {
        let mut sparse = DungeonConfig::merged_with_defaults(serde_json::Map::new());
        sparse.set("wallColor", json!("#FF0000FF"));
        let next = SetConfig::new(sparse).execute(&DungeonState::start()).unwrap().unwrap();
        assert_eq!(next.config.text("wallColor"), "#FF0000FF");
        assert!((next.config.wall_thickness() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn identical_config_is_noop() {
        let result = SetConfig::new(DungeonConfig::default())
            .execute(&DungeonState::start())
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn generated_geometry_replaces_floor() {
        let mut state = DungeonState::start();
        state.geometry = Some(Rectangle::new(0.0, 0.0, 10.0, 10.0).to_polygon().unwrap().into());
        let generated = cells_to_geometry(&[(0, 0), (1, 0), (4, 4)], 50.0, None).unwrap();
        let next = ReplaceGeometry::new(generated.clone()).execute(&state).unwrap().unwrap();
        assert_eq!(next.geometry, generated);
    }

    #[test]
    fn invalid_generated_geometry_rejected() {
        let bowtie = polygon_from_points(&[
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 10.0),
        ])
        .unwrap();
        assert!(ReplaceGeometry::new(Some(bowtie.into()))
            .execute(&DungeonState::start())
            .is_err());
    }

    #[test]
    fn overlapping_generated_components_rejected() {
        let a = Rectangle::new(0.0, 0.0, 50.0, 50.0).to_polygon().unwrap();
        let b = Rectangle::new(25.0, 25.0, 50.0, 50.0).to_polygon().unwrap();
        let overlapping = FloorGeometry::MultiPolygon(MultiPolygon::new(vec![a, b]));
        let state = DungeonState::start();
        assert!(ReplaceGeometry::new(Some(overlapping)).execute(&state).is_err());
    }
}
