use geo::Polygon;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::polygon_from_points;
use crate::math::Point2;

/// A painted region rendered with the config of another theme.
///
/// Theme areas are independent of the floor geometry and may overlap;
/// later areas render on top of earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeArea {
    pub points: Vec<Point2>,
    pub theme_key: String,
}

impl ThemeArea {
    #[must_use]
    pub fn new(points: Vec<Point2>, theme_key: impl Into<String>) -> Self {
        Self {
            points,
            theme_key: theme_key.into(),
        }
    }

    /// The area's outline as a polygon.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidShape` if the stored points cannot
    /// form a polygon.
    pub fn polygon(&self) -> Result<Polygon<f64>> {
        polygon_from_points(&self.points)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn persists_points_as_pairs() {
        let area = ThemeArea::new(
            vec![Point2::new(0.0, 0.0), Point2::new(5.0, 0.0), Point2::new(5.0, 5.0)],
            "custom/cavern",
        );
        let json = serde_json::to_string(&area).unwrap();
        assert_eq!(
            json,
            r#"{"points":[[0.0,0.0],[5.0,0.0],[5.0,5.0]],"themeKey":"custom/cavern"}"#
        );
        let back: ThemeArea = serde_json::from_str(&json).unwrap();
        assert_eq!(back, area);
    }
}
