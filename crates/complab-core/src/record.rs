//! Material records and their property groups.
//!
//! A record is parsed from one JSON document and never mutated afterwards.
//! Property groups are stored as ordered sequences so that rendering follows
//! the order in which the datasheet author wrote them; they serialize back
//! to JSON objects in the same order.
//!
//! ```
//! use complab_core::MaterialRecord;
//!
//! let json = r#"{
//!     "id": "T300",
//!     "name": "T300 Carbon Fiber",
//!     "type": "Fiber",
//!     "mechanical": {
//!         "tensile_modulus": {"label": "Tensile Modulus", "value": 230, "unit": "GPa"}
//!     }
//! }"#;
//! let record = MaterialRecord::from_json(json).unwrap();
//! assert_eq!(record.mechanical.get("tensile_modulus").unwrap().display(), "230 GPa");
//! ```

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::category::Category;

/// One measured property inside a group.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Key inside the group (`tensile_modulus`).
    pub key: String,
    /// Human-readable label (`Tensile Modulus`).
    pub label: String,
    /// Raw value, displayed verbatim.
    pub value: Value,
    /// Unit suffix (`GPa`).
    pub unit: String,
    /// Precomputed display string; takes precedence when non-empty.
    pub display_value: Option<String>,
    /// Fields this viewer does not interpret, kept for export.
    pub extra: Map<String, Value>,
}

impl Property {
    /// Create a property with a numeric or textual value.
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<Value>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value: value.into(),
            unit: unit.into(),
            display_value: None,
            extra: Map::new(),
        }
    }

    /// Set the precomputed display string.
    pub fn with_display_value(mut self, display: impl Into<String>) -> Self {
        self.display_value = Some(display.into());
        self
    }

    /// The string shown in property tables.
    ///
    /// `display_value` when present and non-empty, otherwise exactly
    /// `"{value} {unit}"`. Values are never converted or rounded.
    pub fn display(&self) -> String {
        match self.display_value.as_deref() {
            Some(display) if !display.is_empty() => display.to_string(),
            _ => format!("{} {}", value_text(&self.value), self.unit),
        }
    }

    /// Label to show; falls back to the key when the label is blank.
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            &self.key
        } else {
            &self.label
        }
    }
}

/// Text form of a raw property value.
///
/// Integral floats print without a fractional part (`230.0` shows as
/// `230`); every other number prints as written.
fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 => format!("{f}"),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Text field that tolerates `null` and non-string scalars.
fn lenient_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    Ok(value_text(&Value::deserialize(deserializer)?))
}

/// Optional text field: `null` is absent, scalars become their text form.
fn lenient_optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        other => Some(value_text(&other)),
    })
}

#[derive(Deserialize)]
struct PropertyFields {
    #[serde(default, deserialize_with = "lenient_text")]
    label: String,
    #[serde(default)]
    value: Value,
    #[serde(default, deserialize_with = "lenient_text")]
    unit: String,
    #[serde(default, deserialize_with = "lenient_optional_text")]
    display_value: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Serialize)]
struct PropertyFieldsRef<'a> {
    label: &'a str,
    value: &'a Value,
    unit: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_value: Option<&'a str>,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

/// Ordered group of properties (mechanical, thermal, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyGroup(Vec<Property>);

impl PropertyGroup {
    /// Create a group from properties in display order.
    pub fn new(properties: Vec<Property>) -> Self {
        Self(properties)
    }

    /// Properties in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.0.iter()
    }

    /// Look up a property by key.
    pub fn get(&self, key: &str) -> Option<&Property> {
        self.0.iter().find(|p| p.key == key)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the group has no properties.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a PropertyGroup {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for PropertyGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for property in &self.0 {
            let fields = PropertyFieldsRef {
                label: &property.label,
                value: &property.value,
                unit: &property.unit,
                display_value: property.display_value.as_deref(),
                extra: &property.extra,
            };
            map.serialize_entry(&property.key, &fields)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PropertyGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct GroupVisitor;

        impl<'de> Visitor<'de> for GroupVisitor {
            type Value = PropertyGroup;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of property key to {label, value, unit}")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut properties = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, fields)) = access.next_entry::<String, PropertyFields>()? {
                    properties.push(Property {
                        key,
                        label: fields.label,
                        value: fields.value,
                        unit: fields.unit,
                        display_value: fields.display_value,
                        extra: fields.extra,
                    });
                }
                Ok(PropertyGroup(properties))
            }
        }

        deserializer.deserialize_map(GroupVisitor)
    }
}

/// The generated-code block (an ABAQUS material definition).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Template text, copied and exported verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Fields this viewer does not interpret, kept for export.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One catalog entry describing a fiber or matrix material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// Identifier, matching the manifest entry.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category tag as written in the datasheet (`Fiber`, `Matrix`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Manufacturer name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    /// Short free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Long-form description: blank-line separated paragraphs with
    /// `**bold**` spans.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
    /// Mechanical properties.
    #[serde(default)]
    pub mechanical: PropertyGroup,
    /// Thermal properties.
    #[serde(default)]
    pub thermal: PropertyGroup,
    /// Cure-kinetics parameters.
    #[serde(default)]
    pub cure_kinetics: PropertyGroup,
    /// Processing parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing: Option<PropertyGroup>,
    /// Rheological properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rheological: Option<PropertyGroup>,
    /// Generated-code block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abaqus: Option<CodeBlock>,
    /// Literature references, in source order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<String>>,
    /// Free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Fields this viewer does not interpret, kept for export.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MaterialRecord {
    /// Create a record with no properties or optional sections.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            manufacturer: None,
            description: None,
            detailed_description: None,
            mechanical: PropertyGroup::default(),
            thermal: PropertyGroup::default(),
            cure_kinetics: PropertyGroup::default(),
            processing: None,
            rheological: None,
            abaqus: None,
            references: None,
            notes: None,
            extra: Map::new(),
        }
    }

    /// Parse a record document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Pretty-printed JSON, as written by the export action.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Category parsed from the record's tag, if recognised.
    pub fn category(&self) -> Option<Category> {
        Category::parse(&self.kind)
    }

    /// The generated-code template, if any.
    pub fn code_template(&self) -> Option<&str> {
        self.abaqus.as_ref().and_then(|block| block.template.as_deref())
    }

    /// References, or an empty slice when absent.
    pub fn references(&self) -> &[String] {
        self.references.as_deref().unwrap_or(&[])
    }

    /// Properties whose display string would be empty.
    ///
    /// Used for best-effort presence checks; such properties still render.
    pub fn blank_properties(&self) -> Vec<&Property> {
        [
            Some(&self.mechanical),
            Some(&self.thermal),
            Some(&self.cure_kinetics),
            self.processing.as_ref(),
            self.rheological.as_ref(),
        ]
        .into_iter()
        .flatten()
        .flat_map(PropertyGroup::iter)
        .filter(|p| p.display().trim().is_empty())
        .collect()
    }
}
