// ABOUTME: Variable records as supplied by the host variable store
// ABOUTME: Per-mode values are either direct RGB triples or aliases to other variables

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::color::Rgb;

/// Declared value type of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolvedType {
    Color,
    Float,
    String,
    Boolean,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolvedType::Color => "COLOR",
            ResolvedType::Float => "FLOAT",
            ResolvedType::String => "STRING",
            ResolvedType::Boolean => "BOOLEAN",
            ResolvedType::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// Tag used by the host for alias values. Both spellings occur in the wild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AliasKind {
    VariableAlias,
    VariableReference,
}

/// Reference to another variable's value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAlias {
    #[serde(rename = "type")]
    pub kind: AliasKind,
    /// Id of the referenced variable
    pub id: String,
}

/// Value of a variable for a single mode.
///
/// Anything that is neither an alias nor an RGB triple is kept verbatim as
/// [`ValueEntry::Unsupported`] so that a single odd value never fails the
/// decoding of a whole snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueEntry {
    Alias(VariableAlias),
    Color(Rgb),
    Unsupported(serde_json::Value),
}

impl ValueEntry {
    /// Direct color value
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::Color(Rgb::new(r, g, b))
    }

    /// Alias to the variable with the given id
    pub fn alias(target_id: impl Into<String>) -> Self {
        Self::Alias(VariableAlias {
            kind: AliasKind::VariableAlias,
            id: target_id.into(),
        })
    }

    pub fn as_rgb(&self) -> Option<&Rgb> {
        match self {
            ValueEntry::Color(rgb) => Some(rgb),
            _ => None,
        }
    }

    pub fn as_alias(&self) -> Option<&VariableAlias> {
        match self {
            ValueEntry::Alias(alias) => Some(alias),
            _ => None,
        }
    }
}

/// A design variable with one value per mode.
///
/// `values_by_mode` preserves the host's iteration order, which the alias
/// resolver relies on when it falls back to a referenced variable's first mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableRecord {
    pub id: String,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    pub resolved_type: ResolvedType,
    #[serde(default)]
    pub variable_collection_id: String,
    #[serde(default)]
    pub values_by_mode: IndexMap<String, ValueEntry>,
}

impl VariableRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, resolved_type: ResolvedType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            resolved_type,
            variable_collection_id: String::new(),
            values_by_mode: IndexMap::new(),
        }
    }

    /// Shorthand for a COLOR variable with no values yet
    pub fn color(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, ResolvedType::Color)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = (!description.trim().is_empty()).then_some(description);
        self
    }

    pub fn in_collection(mut self, collection_id: impl Into<String>) -> Self {
        self.variable_collection_id = collection_id.into();
        self
    }

    pub fn with_value(mut self, mode_id: impl Into<String>, value: ValueEntry) -> Self {
        self.values_by_mode.insert(mode_id.into(), value);
        self
    }

    pub fn is_color(&self) -> bool {
        self.resolved_type == ResolvedType::Color
    }

    pub fn value_for_mode(&self, mode_id: &str) -> Option<&ValueEntry> {
        self.values_by_mode.get(mode_id)
    }

    pub fn has_mode(&self, mode_id: &str) -> bool {
        self.values_by_mode.contains_key(mode_id)
    }

    /// First mode id in iteration order
    pub fn first_mode_id(&self) -> Option<&str> {
        self.values_by_mode.keys().next().map(String::as_str)
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
