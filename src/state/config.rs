use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Visual and behavioral parameters of a dungeon.
///
/// A flat key → value mapping. Loading merges against
/// [`DungeonConfig::default`]: keys written by other versions are kept and
/// keys introduced since are filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DungeonConfig(Map<String, Value>);

impl Default for DungeonConfig {
    fn default() -> Self {
        let defaults = [
            ("backgroundColor", json!("#999999FF")),
            ("doorColor", json!("#000000FF")),
            ("doorFillColor", json!("#FFFFFFFF")),
            ("doorFillOpacity", json!(1.0)),
            ("doorThickness", json!(25.0)),
            ("exteriorShadowColor", json!("#000000FF")),
            ("exteriorShadowOpacity", json!(0.5)),
            ("exteriorShadowThickness", json!(20.0)),
            ("floorColor", json!("#F2EDDFFF")),
            ("floorTexture", json!("")),
            ("floorTextureTint", json!("")),
            ("interiorShadowColor", json!("#000000FF")),
            ("interiorShadowOpacity", json!(0.5)),
            ("interiorShadowThickness", json!(8.0)),
            ("secretDoorFillColor", json!("#FFFFFFFF")),
            ("secretDoorStyle", json!("default")),
            ("wallColor", json!("#000000FF")),
            ("wallTexture", json!("")),
            ("wallTextureTint", json!("")),
            ("wallThickness", json!(8.0)),
        ];
        Self(
            defaults
                .into_iter()
                .map(|(key, value)| (key.to_owned(), value))
                .collect(),
        )
    }
}

impl DungeonConfig {
    /// Builds a config from stored values, filling missing keys from the
    /// defaults and keeping unknown ones.
    #[must_use]
    pub fn merged_with_defaults(stored: Map<String, Value>) -> Self {
        let mut config = Self::default();
        config.0.extend(stored);
        config
    }

    /// Re-merges this config against the current defaults.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self::merged_with_defaults(self.0)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Sets one parameter, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Numeric parameter, falling back to the default when the stored value
    /// is missing or not a number.
    #[must_use]
    pub fn number(&self, key: &str) -> f64 {
        self.0
            .get(key)
            .and_then(Value::as_f64)
            .or_else(|| Self::default().0.get(key).and_then(Value::as_f64))
            .unwrap_or(0.0)
    }

    /// String parameter, empty when missing or not a string.
    #[must_use]
    pub fn text(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    #[must_use]
    pub fn wall_thickness(&self) -> f64 {
        self.number("wallThickness")
    }

    #[must_use]
    pub fn door_thickness(&self) -> f64 {
        self.number("doorThickness")
    }

    #[must_use]
    pub fn exterior_shadow_thickness(&self) -> f64 {
        self.number("exteriorShadowThickness")
    }

    #[must_use]
    pub fn interior_shadow_thickness(&self) -> f64 {
        self.number("interiorShadowThickness")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_unknown_and_fills_missing() {
        let stored: Map<String, Value> =
            serde_json::from_str(r#"{"wallThickness": 12, "legacyGlow": true}"#).unwrap();
        let config = DungeonConfig::merged_with_defaults(stored);
        assert!((config.wall_thickness() - 12.0).abs() < f64::EPSILON);
        assert_eq!(config.get("legacyGlow"), Some(&Value::Bool(true)));
        assert_eq!(config.text("floorColor"), "#F2EDDFFF");
    }

    #[test]
    fn non_numeric_value_falls_back_to_default() {
        let mut config = DungeonConfig::default();
        config.set("wallThickness", Value::String("thick".into()));
        assert!((config.wall_thickness() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn serializes_flat() {
        let json = serde_json::to_value(DungeonConfig::default()).unwrap();
        assert_eq!(json["doorThickness"], json!(25.0));
    }
}
