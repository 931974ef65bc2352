//! Compiling a field list into a validation plan.

use serde::{Deserialize, Serialize};

use super::issue::{Issue, IssueCode, PathSegment};
use super::rules;
use crate::field::{FieldDef, FieldKind, PLACE_KEY};
use crate::value::{FieldValue, FormData, RawObject, RawValue};

/// Handling of submission keys the field list does not declare.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKeys {
    /// Pass undeclared keys through into the validated output.
    #[default]
    Allow,
    /// Report undeclared keys as issues.
    Reject,
}

/// One field's compiled binding.
#[derive(Debug, Clone)]
struct Binding {
    key: String,
    kind: FieldKind,
    required: bool,
}

impl From<&FieldDef> for Binding {
    fn from(field: &FieldDef) -> Self {
        Self {
            key: field.key.clone(),
            kind: field.kind,
            required: field.required,
        }
    }
}

/// A compiled validation plan for one template's field list.
///
/// Building is cheap and infallible; plans are meant to be rebuilt per
/// request from the template's current field list rather than cached.
#[derive(Debug, Clone)]
pub struct FormSchema {
    bindings: Vec<Binding>,
    unknown_keys: UnknownKeys,
}

impl FormSchema {
    /// Compiles a field list into a validation plan.
    ///
    /// The location field is always bound: when the list does not declare
    /// it, a binding for it is injected ahead of everything else.
    #[must_use]
    pub fn build(fields: &[FieldDef], unknown_keys: UnknownKeys) -> Self {
        let mut bindings: Vec<Binding> = fields.iter().map(Binding::from).collect();
        if !bindings.iter().any(|binding| binding.key == PLACE_KEY) {
            bindings.insert(0, Binding::from(&FieldDef::place()));
        }
        Self {
            bindings,
            unknown_keys,
        }
    }

    /// Number of bound fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the plan binds no fields. Never true in practice, as the
    /// location binding is always injected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Validates a decoded submission against the plan.
    ///
    /// Bindings are checked in declaration order and every failure is
    /// collected before reporting; the result is all-or-nothing. Identical
    /// inputs yield identical issue lists.
    pub fn validate(&self, candidate: &RawObject) -> Result<FormData, Vec<Issue>> {
        let mut data = FormData::with_capacity(candidate.len());
        let mut issues = Vec::new();

        for binding in &self.bindings {
            match candidate.get(&binding.key) {
                Some(raw) => match rules::check(binding.kind, &binding.key, raw) {
                    Ok(value) => {
                        data.insert(binding.key.clone(), value);
                    }
                    Err(field_issues) => issues.extend(field_issues),
                },
                None if binding.required => {
                    issues.push(Issue::missing([PathSegment::key(binding.key.as_str())]));
                }
                None => {}
            }
        }

        for (key, raw) in candidate {
            if self.bindings.iter().any(|binding| &binding.key == key) {
                continue;
            }
            match self.unknown_keys {
                UnknownKeys::Reject => issues.push(Issue::unknown(key)),
                UnknownKeys::Allow => match raw {
                    // an undeclared file part still gets materialized
                    RawValue::Upload(upload) => {
                        data.insert(key.clone(), FieldValue::Upload(upload.clone()));
                    }
                    other => match other.to_json() {
                        Some(value) => {
                            data.insert(key.clone(), FieldValue::Other(value));
                        }
                        None => issues.push(Issue::new(
                            IssueCode::InvalidType,
                            [PathSegment::key(key.as_str())],
                            "Unexpected file upload",
                        )),
                    },
                },
            }
        }

        if issues.is_empty() { Ok(data) } else { Err(issues) }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::decode::decode_parts;
    use crate::value::FileUpload;

    fn event_fields() -> Vec<FieldDef> {
        vec![
            FieldDef::place(),
            FieldDef::new("title", "Title", FieldKind::Text).required(),
            FieldDef::new("attendees", "Attendees", FieldKind::Number),
            FieldDef::new("website", "Website", FieldKind::Link),
            FieldDef::new("photo", "Photo", FieldKind::Image),
        ]
    }

    fn parts(entries: &[(&str, &str)]) -> RawObject {
        decode_parts(
            entries
                .iter()
                .map(|(name, value)| ((*name).to_owned(), RawValue::from(*value))),
        )
    }

    fn valid_parts() -> Vec<(&'static str, &'static str)> {
        vec![
            ("place.lat", "20"),
            ("place.lng", "30"),
            ("title", "Street market"),
        ]
    }

    #[test]
    fn test_place_binding_injected_when_absent() {
        let fields = vec![FieldDef::new("title", "Title", FieldKind::Text)];
        let schema = FormSchema::build(&fields, UnknownKeys::Allow);
        assert_eq!(schema.len(), 2);

        let issues = schema.validate(&parts(&[("title", "x")])).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, IssueCode::MissingRequiredField);
        assert_eq!(issues[0].path, vec![PathSegment::key("place")]);
    }

    #[test]
    fn test_valid_submission_coerces_each_kind() {
        let schema = FormSchema::build(&event_fields(), UnknownKeys::Allow);
        let candidate = parts(&[
            ("place.lat", "20"),
            ("place.lng", "30"),
            ("title", "Street market"),
            ("attendees", "120"),
            ("website", "https://example.com/market"),
        ]);

        let data = schema.validate(&candidate).unwrap();
        assert!(matches!(
            data.get("place"),
            Some(FieldValue::Place { lat, lng }) if *lat == 20.0 && *lng == 30.0
        ));
        assert!(matches!(
            data.get("attendees"),
            Some(FieldValue::Number(value)) if *value == 120.0
        ));
        assert!(matches!(data.get("website"), Some(FieldValue::Link(_))));
    }

    #[test]
    fn test_optional_absent_field_is_omitted() {
        let schema = FormSchema::build(&event_fields(), UnknownKeys::Allow);
        let data = schema.validate(&parts(&valid_parts())).unwrap();
        assert!(!data.contains_key("attendees"));
        assert!(!data.contains_key("photo"));
    }

    #[test]
    fn test_collects_every_issue_in_declaration_order() {
        let schema = FormSchema::build(&event_fields(), UnknownKeys::Allow);
        let candidate = parts(&[
            ("place.lat", "91"),
            ("place.lng", "30"),
            ("attendees", "lots"),
        ]);

        let issues = schema.validate(&candidate).unwrap_err();
        assert_eq!(issues.len(), 3);
        assert_eq!(
            issues[0].path,
            vec![PathSegment::key("place"), PathSegment::key("lat")]
        );
        assert_eq!(issues[0].code, IssueCode::OutOfRange);
        assert_eq!(issues[1].path, vec![PathSegment::key("title")]);
        assert_eq!(issues[1].code, IssueCode::MissingRequiredField);
        assert_eq!(issues[2].path, vec![PathSegment::key("attendees")]);
        assert_eq!(issues[2].code, IssueCode::InvalidNumber);
    }

    #[test]
    fn test_validation_is_deterministic() {
        let schema = FormSchema::build(&event_fields(), UnknownKeys::Allow);
        let candidate = parts(&[("place.lat", "91"), ("attendees", "lots")]);

        let first = schema.validate(&candidate).unwrap_err();
        let second = schema.validate(&candidate).unwrap_err();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_keys_pass_through_when_allowed() {
        let schema = FormSchema::build(&event_fields(), UnknownKeys::Allow);
        let mut candidate = parts(&valid_parts());
        candidate.insert("mood".to_owned(), RawValue::from("sunny"));

        let data = schema.validate(&candidate).unwrap();
        assert_eq!(
            data.get("mood"),
            Some(&FieldValue::Other(serde_json::json!("sunny")))
        );
    }

    #[test]
    fn test_unknown_keys_reported_when_rejected() {
        let schema = FormSchema::build(&event_fields(), UnknownKeys::Reject);
        let mut candidate = parts(&valid_parts());
        candidate.insert("mood".to_owned(), RawValue::from("sunny"));

        let issues = schema.validate(&candidate).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, IssueCode::UnknownField);
        assert_eq!(issues[0].path, vec![PathSegment::key("mood")]);
    }

    #[test]
    fn test_undeclared_upload_passes_through_for_materialization() {
        let schema = FormSchema::build(&event_fields(), UnknownKeys::Allow);
        let mut candidate = parts(&valid_parts());
        candidate.insert(
            "extra".to_owned(),
            RawValue::from(FileUpload::new("x.bin", None, Bytes::from_static(b"b"))),
        );

        let data = schema.validate(&candidate).unwrap();
        assert!(data.get("extra").is_some_and(FieldValue::is_upload));
    }

    #[test]
    fn test_nested_upload_under_undeclared_key_is_rejected() {
        let schema = FormSchema::build(&event_fields(), UnknownKeys::Allow);
        let mut candidate = parts(&valid_parts());
        let mut nested = RawObject::new();
        nested.insert(
            "file".to_owned(),
            RawValue::from(FileUpload::new("x.bin", None, Bytes::from_static(b"b"))),
        );
        candidate.insert("meta".to_owned(), RawValue::Object(nested));

        let issues = schema.validate(&candidate).unwrap_err();
        assert_eq!(issues[0].code, IssueCode::InvalidType);
        assert_eq!(issues[0].path, vec![PathSegment::key("meta")]);
    }

    #[test]
    fn test_declared_place_is_not_duplicated() {
        let schema = FormSchema::build(&event_fields(), UnknownKeys::Allow);
        assert_eq!(schema.len(), event_fields().len());
    }
}
