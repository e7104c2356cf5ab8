use std::collections::HashMap;

use geo::Polygon;
use tracing::warn;

use crate::error::{OperationError, Result};
use crate::geometry::polygon_from_points;
use crate::geometry::predicates::validate;
use crate::math::Point2;
use crate::state::{DungeonConfig, DungeonState, ThemeArea};

/// Host settings the editing engine reads.
pub trait SettingsProvider {
    /// Theme key currently chosen in the theme painter, if any.
    fn selected_theme(&self) -> Option<String>;

    /// Config of a theme in the catalog.
    fn theme_config(&self, key: &str) -> Option<DungeonConfig>;
}

/// Fixed settings, for hosts without a settings store and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings {
    pub selected: Option<String>,
    pub themes: HashMap<String, DungeonConfig>,
}

impl StaticSettings {
    #[must_use]
    pub fn with_theme(mut self, key: impl Into<String>, config: DungeonConfig) -> Self {
        self.themes.insert(key.into(), config);
        self
    }

    #[must_use]
    pub fn selecting(mut self, key: impl Into<String>) -> Self {
        self.selected = Some(key.into());
        self
    }
}

impl SettingsProvider for StaticSettings {
    fn selected_theme(&self) -> Option<String> {
        self.selected.clone()
    }

    fn theme_config(&self, key: &str) -> Option<DungeonConfig> {
        self.themes.get(key).cloned()
    }
}

/// Paints a theme area.
pub struct AddThemeArea {
    points: Vec<Point2>,
    theme_key: String,
}

impl AddThemeArea {
    #[must_use]
    pub fn new(points: Vec<Point2>, theme_key: impl Into<String>) -> Self {
        Self {
            points,
            theme_key: theme_key.into(),
        }
    }

    /// Paints with the theme selected in `settings`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if no theme is selected.
    pub fn from_settings(points: Vec<Point2>, settings: &dyn SettingsProvider) -> Result<Self> {
        let theme_key = settings.selected_theme().ok_or_else(|| {
            OperationError::InvalidInput("no theme selected in the theme painter".to_owned())
        })?;
        Ok(Self::new(points, theme_key))
    }

    /// # Errors
    ///
    /// Returns `GeometryError::InvalidShape` if the points do not form a
    /// valid simple polygon.
    pub fn execute(&self, state: &DungeonState) -> Result<Option<DungeonState>> {
        let polygon = polygon_from_points(&self.points)?;
        validate(&polygon).inspect_err(|e| warn!(error = %e, "rejected theme area"))?;

        let mut next = state.clone();
        next.theme_areas
            .push(ThemeArea::new(self.points.clone(), self.theme_key.clone()));
        Ok(Some(next))
    }
}

/// A theme area ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedThemeArea {
    pub polygon: Polygon<f64>,
    pub theme_key: String,
    pub config: DungeonConfig,
}

/// Pairs each theme area with its theme's config, bottom layer first.
///
/// Areas whose theme is missing from the catalog, or whose points no
/// longer form a polygon, are skipped.
#[must_use]
pub fn resolve_theme_areas(
    state: &DungeonState,
    settings: &dyn SettingsProvider,
) -> Vec<ResolvedThemeArea> {
    state
        .theme_areas
        .iter()
        .filter_map(|area| {
            let Some(config) = settings.theme_config(&area.theme_key) else {
                warn!(theme = %area.theme_key, "unknown theme, area skipped");
                return None;
            };
            let polygon = area
                .polygon()
                .inspect_err(|e| warn!(error = %e, "unusable theme area skipped"))
                .ok()?;
            Some(ResolvedThemeArea {
                polygon,
                theme_key: area.theme_key.clone(),
                config: config.normalized(),
            })
        })
        .collect()
}
