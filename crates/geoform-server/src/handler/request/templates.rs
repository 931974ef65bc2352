//! Template request types.

use std::sync::LazyLock;

use geoform_core::{FieldDef, FieldKind, PLACE_KEY, Template};
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::validations::validation_error;

/// Slug shape marker icons must match.
static MARKER_ICON_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("invalid marker icon pattern"));

/// Request payload for creating a new template.
///
/// The fixed location field is never part of the request; it is injected
/// server-side ahead of the declared fields.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplate {
    /// Display name of the template (at least 3 characters).
    #[validate(length(min = 3))]
    pub name: String,

    /// Optional free-form description.
    pub description: Option<String>,

    /// Map marker slug shown next to submissions.
    #[validate(regex(
        path = *MARKER_ICON_PATTERN,
        code = "marker_icon_format",
        message = "Only lowercase letters, numbers, hyphens allowed"
    ))]
    pub marker_icon: String,

    /// Dynamic field layout, in display order.
    #[validate(nested)]
    #[validate(custom(function = "validate_field_layout"))]
    pub fields: Vec<FieldDefPayload>,
}

impl CreateTemplate {
    /// Converts this request into a [`Template`] model for insertion.
    pub fn into_model(self) -> Template {
        let fields = self
            .fields
            .into_iter()
            .map(FieldDefPayload::into_model)
            .collect();
        Template::new(self.name, self.description, self.marker_icon, fields)
    }
}

/// One dynamic field in a template creation request.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefPayload {
    /// Submission key the field binds to.
    #[validate(length(min = 1))]
    pub key: String,

    /// Human-readable label.
    #[validate(length(min = 1))]
    pub label: String,

    /// Value type the field accepts.
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_known_kind"))]
    pub kind: FieldKind,

    /// Whether a submission must carry this field.
    #[serde(default)]
    pub required: bool,

    /// Optional help text.
    pub description: Option<String>,
}

impl FieldDefPayload {
    /// Converts this payload into a [`FieldDef`].
    pub fn into_model(self) -> FieldDef {
        let mut field = FieldDef::new(self.key, self.label, self.kind);
        if self.required {
            field = field.required();
        }
        match self.description {
            Some(description) => field.with_description(description),
            None => field,
        }
    }
}

/// Tags this build does not recognize cannot be validated and are rejected
/// at creation time.
fn validate_known_kind(kind: &FieldKind) -> Result<(), ValidationError> {
    if kind.is_unknown() {
        return Err(validation_error("field_type", "Unrecognized field type"));
    }
    Ok(())
}

/// Dynamic keys must be unique and must not shadow the fixed location
/// field.
fn validate_field_layout(fields: &[FieldDefPayload]) -> Result<(), ValidationError> {
    let mut seen = std::collections::HashSet::with_capacity(fields.len());
    for field in fields {
        if field.key == PLACE_KEY {
            return Err(validation_error(
                "reserved_field_key",
                "Field key 'place' is reserved for the fixed location field",
            ));
        }
        if !seen.insert(field.key.as_str()) {
            return Err(validation_error(
                "duplicate_field_key",
                &format!("Duplicate field key '{}'", field.key),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(key: &str, kind: FieldKind) -> FieldDefPayload {
        FieldDefPayload {
            key: key.to_owned(),
            label: key.to_owned(),
            kind,
            required: false,
            description: None,
        }
    }

    fn event_request() -> CreateTemplate {
        CreateTemplate {
            name: "Event".to_owned(),
            description: Some("Things happening around town".to_owned()),
            marker_icon: "calendar-star".to_owned(),
            fields: vec![field("title", FieldKind::Text), field("photo", FieldKind::Image)],
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(event_request().validate().is_ok());
    }

    #[test]
    fn test_short_name_is_rejected() {
        let mut request = event_request();
        request.name = "Ev".to_owned();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_marker_icon_slug_is_enforced() {
        for icon in ["Calendar", "star icon", "café", ""] {
            let mut request = event_request();
            request.marker_icon = icon.to_owned();
            assert!(request.validate().is_err(), "accepted {icon:?}");
        }

        let mut request = event_request();
        request.marker_icon = "event-2".to_owned();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_place_key_is_reserved() {
        let mut request = event_request();
        request.fields.push(field("place", FieldKind::Text));

        let errors = request.validate().unwrap_err();
        assert!(errors.to_string().contains("reserved"));
    }

    #[test]
    fn test_duplicate_keys_are_rejected() {
        let mut request = event_request();
        request.fields.push(field("title", FieldKind::Date));
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_empty_field_key_is_rejected() {
        let mut request = event_request();
        request.fields.push(field("", FieldKind::Text));
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_unrecognized_field_type_is_rejected() {
        let request: CreateTemplate = serde_json::from_value(serde_json::json!({
            "name": "Event",
            "markerIcon": "event",
            "fields": [{ "key": "x", "label": "X", "type": "hologram" }],
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_into_model_injects_fixed_place_field() {
        let mut request = event_request();
        request.fields[0].required = true;

        let template = request.into_model();
        assert_eq!(template.fixed_fields.len(), 1);
        assert_eq!(template.fixed_fields[0].key, PLACE_KEY);

        let keys: Vec<_> = template.dynamic_fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, ["title", "photo"]);
        assert!(template.dynamic_fields[0].required);
        assert!(!template.dynamic_fields[1].required);
    }

    #[test]
    fn test_camel_case_wire_names() {
        let json = serde_json::to_value(event_request()).unwrap();
        assert!(json.get("markerIcon").is_some());
        assert_eq!(json["fields"][0]["type"], "text");
    }
}
