//! Type tags a template field can declare.
//!
//! This module provides the [`FieldKind`] enum, the registry of value types
//! a field can take. Per-kind coercion and validation rules live in the
//! schema engine; this enum only names the kinds and answers broad
//! questions about them.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Type tag of a template field.
///
/// Tags are stored and transmitted in lowercase. A tag this build does not
/// recognize deserializes to [`FieldKind::Unknown`], whose values pass
/// through validation unchanged; stored templates therefore keep working
/// across registry revisions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free-form text, passed through unchanged
    Text,
    /// Numeric value, coerced from text parts
    Number,
    /// Calendar date in ISO `YYYY-MM-DD` form
    Date,
    /// Wall-clock time in ISO `HH:MM[:SS]` form
    Time,
    /// Absolute URL
    Link,
    /// Uploaded image attachment
    Image,
    /// Uploaded document attachment
    Document,
    /// Geographic coordinate pair
    Place,
    /// Any tag this build does not recognize
    #[default]
    #[serde(other)]
    Unknown,
}

impl FieldKind {
    /// Check if values of this kind arrive as binary uploads
    #[must_use]
    pub fn is_attachment(&self) -> bool {
        matches!(self, Self::Image | Self::Document)
    }

    /// Check if this kind is the coordinate pair
    #[must_use]
    pub fn is_place(&self) -> bool {
        matches!(self, Self::Place)
    }

    /// Check if the tag was not recognized at deserialization time
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_kind_predicates() {
        assert!(FieldKind::Image.is_attachment());
        assert!(FieldKind::Document.is_attachment());
        assert!(!FieldKind::Text.is_attachment());

        assert!(FieldKind::Place.is_place());
        assert!(!FieldKind::Number.is_place());

        assert!(FieldKind::Unknown.is_unknown());
        assert!(!FieldKind::Link.is_unknown());
    }

    #[test]
    fn test_field_kind_display() {
        assert_eq!(FieldKind::Text.to_string(), "text");
        assert_eq!(FieldKind::Number.to_string(), "number");
        assert_eq!(FieldKind::Date.to_string(), "date");
        assert_eq!(FieldKind::Time.to_string(), "time");
        assert_eq!(FieldKind::Link.to_string(), "link");
        assert_eq!(FieldKind::Image.to_string(), "image");
        assert_eq!(FieldKind::Document.to_string(), "document");
        assert_eq!(FieldKind::Place.to_string(), "place");
        assert_eq!(FieldKind::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_field_kind_from_str() {
        use std::str::FromStr;

        assert_eq!(FieldKind::from_str("place").unwrap(), FieldKind::Place);
        assert_eq!(FieldKind::from_str("image").unwrap(), FieldKind::Image);
        assert!(FieldKind::from_str("invalid").is_err());
    }

    #[test]
    fn test_serialization() {
        let kind = FieldKind::Document;
        let serialized = serde_json::to_string(&kind).unwrap();
        assert_eq!(serialized, "\"document\"");

        let deserialized: FieldKind = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, kind);
    }

    #[test]
    fn test_unrecognized_tag_deserializes_to_unknown() {
        let deserialized: FieldKind = serde_json::from_str("\"hologram\"").unwrap();
        assert_eq!(deserialized, FieldKind::Unknown);
    }
}
