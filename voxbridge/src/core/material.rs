//! Module `core::material`
//!
//! Defines [`Material`], the record decoded from a `MATL` chunk, and the
//! consumer-side coercion of its raw string properties into [`PropertyValue`]s.
//!
//! The decoder never interprets property values. Typed access goes through
//! [`coerce_property`], which consults a fixed per-key table.
//!
//! # Examples
//!
//! ```rust
//! use voxbridge::{Material, MaterialKind, PropertyValue};
//!
//! let mut material = Material::new(8);
//! material.insert("_type", "_metal");
//! material.insert("_rough", "0.4");
//!
//! assert_eq!(material.get("_rough"), Some("0.4"));
//! assert_eq!(material.kind(), MaterialKind::Metal);
//! assert_eq!(material.typed("_rough"), Some(PropertyValue::Float(0.4)));
//! ```

use std::collections::BTreeMap;

use log::warn;

/// A material record: palette slot id plus its raw property dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    pub id: i32,
    pub properties: BTreeMap<String, String>,
}

/// A property value after coercion.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyValue {
    Text(String),
    Float(f32),
    Bool(bool),
}

/// How [`coerce_property`] treats the value stored under a given key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    Text,
    Float,
    Bool,
}

/// Keys whose values are numeric in MagicaVoxel's material model.
const FLOAT_KEYS: &[&str] = &[
    "_rough", "_weight", "_spec", "_ior", "_att", "_flux", "_metal", "_emit", "_alpha", "_trans",
    "_ldr", "_sp", "_g", "_media",
];

/// Keys whose values are flags.
const BOOL_KEYS: &[&str] = &["_plastic"];

/// Returns the coercion applied to values stored under `key`.
#[must_use]
pub fn coercion_for(key: &str) -> Coercion {
    if FLOAT_KEYS.contains(&key) {
        Coercion::Float
    } else if BOOL_KEYS.contains(&key) {
        Coercion::Bool
    } else {
        Coercion::Text
    }
}

/// Converts a raw property value according to the coercion table.
///
/// Values that do not parse under their key's coercion are kept as
/// [`PropertyValue::Text`].
#[must_use]
pub fn coerce_property(key: &str, raw: &str) -> PropertyValue {
    match coercion_for(key) {
        Coercion::Text => PropertyValue::Text(raw.to_owned()),
        Coercion::Float => match raw.trim().parse::<f32>() {
            Ok(value) => PropertyValue::Float(value),
            Err(err) => {
                warn!("Material property {key}={raw:?} is not a number ({err}), keeping as text");
                PropertyValue::Text(raw.to_owned())
            }
        },
        Coercion::Bool => match raw.trim() {
            "1" | "true" => PropertyValue::Bool(true),
            "0" | "false" => PropertyValue::Bool(false),
            _ => {
                warn!("Material property {key}={raw:?} is not a flag, keeping as text");
                PropertyValue::Text(raw.to_owned())
            }
        },
    }
}

impl PropertyValue {
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            PropertyValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Text(value) => write!(f, "{value}"),
            PropertyValue::Float(value) => write!(f, "{value}"),
            PropertyValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// Surface type named by a material's `_type` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaterialKind {
    #[default]
    Diffuse,
    Metal,
    Glass,
    Emit,
    Blend,
    Media,
    Other,
}

impl MaterialKind {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "_diffuse" => MaterialKind::Diffuse,
            "_metal" => MaterialKind::Metal,
            "_glass" => MaterialKind::Glass,
            "_emit" => MaterialKind::Emit,
            "_blend" => MaterialKind::Blend,
            "_media" => MaterialKind::Media,
            _ => MaterialKind::Other,
        }
    }
}

impl Material {
    #[must_use]
    pub fn new(id: i32) -> Self {
        Self {
            id,
            properties: BTreeMap::new(),
        }
    }

    /// Stores a raw property. A repeated key keeps the last value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Returns the coerced value stored under `key`.
    #[must_use]
    pub fn typed(&self, key: &str) -> Option<PropertyValue> {
        self.get(key).map(|raw| coerce_property(key, raw))
    }

    /// Coerces every property through the table.
    #[must_use]
    pub fn typed_properties(&self) -> BTreeMap<String, PropertyValue> {
        self.properties
            .iter()
            .map(|(key, raw)| (key.clone(), coerce_property(key, raw)))
            .collect()
    }

    /// Surface type from `_type`, [`MaterialKind::Diffuse`] when absent.
    #[must_use]
    pub fn kind(&self) -> MaterialKind {
        self.get("_type")
            .map(MaterialKind::parse)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_values_are_kept_as_strings() {
        let mut material = Material::new(1);
        material.insert("_rough", "0.4");
        assert_eq!(material.get("_rough"), Some("0.4"));
        assert_eq!(material.properties["_rough"], "0.4");
    }

    #[test]
    fn test_coercion_table() {
        assert_eq!(coercion_for("_rough"), Coercion::Float);
        assert_eq!(coercion_for("_flux"), Coercion::Float);
        assert_eq!(coercion_for("_plastic"), Coercion::Bool);
        assert_eq!(coercion_for("_type"), Coercion::Text);
        assert_eq!(coercion_for("_unknown"), Coercion::Text);
    }

    #[test]
    fn test_coerce_float() {
        assert_eq!(coerce_property("_ior", "1.3"), PropertyValue::Float(1.3));
        assert_eq!(coerce_property("_weight", " 1 "), PropertyValue::Float(1.0));
    }

    #[test]
    fn test_coerce_float_fallback_to_text() {
        assert_eq!(
            coerce_property("_spec", "shiny"),
            PropertyValue::Text("shiny".to_owned())
        );
    }

    #[test]
    fn test_coerce_bool() {
        assert_eq!(coerce_property("_plastic", "1"), PropertyValue::Bool(true));
        assert_eq!(coerce_property("_plastic", "false"), PropertyValue::Bool(false));
        assert_eq!(
            coerce_property("_plastic", "maybe"),
            PropertyValue::Text("maybe".to_owned())
        );
    }

    #[test]
    fn test_typed_properties() {
        let mut material = Material::new(3);
        material.insert("_type", "_glass");
        material.insert("_alpha", "0.5");

        let typed = material.typed_properties();
        assert_eq!(typed.len(), 2);
        assert_eq!(typed["_type"].as_str(), Some("_glass"));
        assert_eq!(typed["_alpha"].as_f32(), Some(0.5));
    }

    #[test]
    fn test_kind() {
        let mut material = Material::new(0);
        assert_eq!(material.kind(), MaterialKind::Diffuse);

        material.insert("_type", "_emit");
        assert_eq!(material.kind(), MaterialKind::Emit);

        material.insert("_type", "_pbr");
        assert_eq!(material.kind(), MaterialKind::Other);
    }

    #[test]
    fn test_repeated_key_keeps_last() {
        let mut material = Material::new(0);
        material.insert("_rough", "0.1");
        material.insert("_rough", "0.9");
        assert_eq!(material.len(), 1);
        assert_eq!(material.get("_rough"), Some("0.9"));
    }
}
