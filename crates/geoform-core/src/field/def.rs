//! A single field of a template's layout.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::FieldKind;

/// Key of the fixed location field every template carries.
pub const PLACE_KEY: &str = "place";

/// Declaration of one field in a template's layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FieldDef {
    /// Submission key the field binds to.
    pub key: String,
    /// Human-readable label.
    pub label: String,
    /// Value type the field accepts.
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Whether a submission must carry this field.
    #[serde(default)]
    pub required: bool,
    /// Optional help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldDef {
    /// Creates an optional field with no description.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: false,
            description: None,
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attaches help text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The fixed location field injected into every template.
    #[must_use]
    pub fn place() -> Self {
        Self {
            key: PLACE_KEY.to_owned(),
            label: "Location".to_owned(),
            kind: FieldKind::Place,
            required: true,
            description: Some("Latitude and longitude".to_owned()),
        }
    }
}
