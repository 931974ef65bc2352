//! Form templates: a named layout of fields that submissions validate
//! against.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::field::FieldDef;

/// A stored template.
///
/// `fixed_fields` is owned by the system and currently holds exactly the
/// location field; `dynamic_fields` is the author's layout. Templates are
/// immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Map marker slug (lowercase letters, digits, hyphens).
    pub marker_icon: String,
    /// System-owned fields, always validated.
    pub fixed_fields: Vec<FieldDef>,
    /// Author-declared fields, in declaration order.
    pub dynamic_fields: Vec<FieldDef>,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last modification time.
    pub updated_at: Timestamp,
}

impl Template {
    /// Creates a template, injecting the fixed location field ahead of the
    /// author's dynamic fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        marker_icon: impl Into<String>,
        dynamic_fields: Vec<FieldDef>,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
            marker_icon: marker_icon.into(),
            fixed_fields: vec![FieldDef::place()],
            dynamic_fields,
            created_at: now,
            updated_at: now,
        }
    }

    /// Fixed fields followed by dynamic fields, in stored order.
    ///
    /// This is the field list submissions are validated against; the
    /// location field always comes first.
    #[must_use]
    pub fn composed_fields(&self) -> Vec<FieldDef> {
        let mut fields = Vec::with_capacity(self.fixed_fields.len() + self.dynamic_fields.len());
        fields.extend(self.fixed_fields.iter().cloned());
        fields.extend(self.dynamic_fields.iter().cloned());
        fields
    }

    /// Looks a field up by key across both lists.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldDef> {
        self.fixed_fields
            .iter()
            .chain(&self.dynamic_fields)
            .find(|field| field.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldKind, PLACE_KEY};

    fn event_template() -> Template {
        Template::new(
            "Event",
            Some("Things happening around town".to_owned()),
            "calendar-star",
            vec![
                FieldDef::new("title", "Title", FieldKind::Text).required(),
                FieldDef::new("photo", "Photo", FieldKind::Image),
            ],
        )
    }

    #[test]
    fn test_new_injects_place_field() {
        let template = event_template();
        assert_eq!(template.fixed_fields.len(), 1);
        assert_eq!(template.fixed_fields[0].key, PLACE_KEY);
        assert_eq!(template.dynamic_fields.len(), 2);
        assert_eq!(template.created_at, template.updated_at);
    }

    #[test]
    fn test_composed_fields_puts_place_first() {
        let template = event_template();
        let keys: Vec<_> = template
            .composed_fields()
            .into_iter()
            .map(|field| field.key)
            .collect();
        assert_eq!(keys, [PLACE_KEY, "title", "photo"]);
    }

    #[test]
    fn test_field_lookup_spans_both_lists() {
        let template = event_template();
        assert_eq!(template.field(PLACE_KEY).map(|f| f.kind), Some(FieldKind::Place));
        assert_eq!(template.field("photo").map(|f| f.kind), Some(FieldKind::Image));
        assert!(template.field("missing").is_none());
    }

    #[test]
    fn test_serde_round_trip_keeps_field_order() {
        let template = event_template();
        let json = serde_json::to_string(&template).unwrap();
        let back: Template = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, template.id);
        assert_eq!(back.dynamic_fields, template.dynamic_fields);
        assert!(json.contains("\"markerIcon\":\"calendar-star\""));
    }
}
