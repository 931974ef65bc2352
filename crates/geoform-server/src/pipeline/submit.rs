//! Multipart intake and schema validation for submissions.

use axum::extract::Multipart;
use axum::extract::multipart::{Field, MultipartError};
use bytes::Bytes;
use geoform_core::{
    FileUpload, FormData, FormSchema, FormStatus, Issue, IssueCode, PathSegment, RawObject,
    RawValue, Template, UnknownKeys,
};
use strum::IntoEnumIterator;

use crate::handler::{Error, ErrorKind, Result};

/// Multipart part that routes a submission to its template.
pub const TEMPLATE_ID_PART: &str = "templateId";

/// Multipart part that carries the requested lifecycle status.
pub const STATUS_PART: &str = "status";

/// Maximum size of a single upload part.
pub const MAX_UPLOAD_SIZE: usize = 25 * 1024 * 1024;

/// A submission that passed schema validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Requested lifecycle status, when the body carried one.
    ///
    /// Whether a missing status is acceptable is the caller's call: create
    /// demands one, update ignores it.
    pub status: Option<FormStatus>,
    /// Validated field values, in binding order.
    pub data: FormData,
}

/// Drains a multipart body into named raw parts, in arrival order.
///
/// Text parts come out as [`RawValue::Text`], file parts as
/// [`RawValue::Upload`] with the client file name and content type
/// attached, buffered against [`MAX_UPLOAD_SIZE`]. Unnamed parts carry
/// no addressable value and are dropped.
pub async fn read_parts(mut multipart: Multipart) -> Result<Vec<(String, RawValue)>> {
    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(body_error)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match field.file_name().map(str::to_owned) {
            Some(file_name) => {
                let content_type = field.content_type().map(str::to_owned);
                let bytes = read_upload(&file_name, field).await?;
                let upload = FileUpload::new(file_name, content_type, bytes);
                parts.push((name, RawValue::from(upload)));
            }
            None => {
                let text = field.text().await.map_err(body_error)?;
                parts.push((name, RawValue::from(text)));
            }
        }
    }
    Ok(parts)
}

/// Buffers an upload part, capped at [`MAX_UPLOAD_SIZE`].
///
/// The size is checked before each chunk lands so an oversized part is
/// rejected without being held in memory whole.
async fn read_upload(file_name: &str, mut field: Field<'_>) -> Result<Bytes> {
    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(body_error)? {
        if data.len() + chunk.len() > MAX_UPLOAD_SIZE {
            return Err(ErrorKind::BadRequest
                .with_message("File too large")
                .with_context(format!(
                    "File '{}' exceeds maximum size of {} MB",
                    file_name,
                    MAX_UPLOAD_SIZE / (1024 * 1024)
                )));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data.into())
}

fn body_error(error: MultipartError) -> Error<'static> {
    ErrorKind::BadRequest
        .with_message("Invalid multipart form data")
        .with_context(error.body_text())
}

/// Removes and returns the template id routing part.
///
/// Only a text part counts; a file uploaded under that name is discarded.
pub fn take_template_id(candidate: &mut RawObject) -> Option<String> {
    match candidate.shift_remove(TEMPLATE_ID_PART) {
        Some(RawValue::Text(id)) => Some(id),
        _ => None,
    }
}

/// Validates a decoded submission against its template.
///
/// The routing parts are stripped first: the template schema never declares
/// `templateId` or `status`, so `status` is parsed here and any leftover
/// `templateId` is discarded. Failures are collected, never short-circuited,
/// with the status issue ahead of the field issues.
pub fn validate_submission(
    template: &Template,
    mut candidate: RawObject,
    unknown_keys: UnknownKeys,
) -> Result<Submission, Vec<Issue>> {
    candidate.shift_remove(TEMPLATE_ID_PART);

    let mut issues = Vec::new();
    let status = match candidate.shift_remove(STATUS_PART) {
        None => None,
        Some(RawValue::Text(text)) => match text.parse::<FormStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                issues.push(invalid_status_issue());
                None
            }
        },
        Some(_) => {
            issues.push(Issue::new(
                IssueCode::InvalidType,
                [PathSegment::key(STATUS_PART)],
                "Expected text",
            ));
            None
        }
    };

    let schema = FormSchema::build(&template.composed_fields(), unknown_keys);
    match schema.validate(&candidate) {
        Ok(data) if issues.is_empty() => Ok(Submission { status, data }),
        Ok(_) => Err(issues),
        Err(field_issues) => {
            issues.extend(field_issues);
            Err(issues)
        }
    }
}

fn invalid_status_issue() -> Issue {
    let permitted = FormStatus::iter()
        .map(|status| status.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Issue::new(
        IssueCode::InvalidValue,
        [PathSegment::key(STATUS_PART)],
        format!("Expected one of: {permitted}"),
    )
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{Request, header};
    use geoform_core::{FieldDef, FieldKind, FieldValue, decode_parts};

    use super::*;

    fn event_template() -> Template {
        Template::new(
            "Event",
            None,
            "calendar-star",
            vec![
                FieldDef::new("title", "Title", FieldKind::Text).required(),
                FieldDef::new("photo", "Photo", FieldKind::Image),
            ],
        )
    }

    fn candidate(entries: &[(&str, &str)]) -> RawObject {
        decode_parts(
            entries
                .iter()
                .map(|(name, value)| ((*name).to_owned(), RawValue::from(*value))),
        )
    }

    fn valid_entries() -> Vec<(&'static str, &'static str)> {
        vec![
            ("place.lat", "20"),
            ("place.lng", "30"),
            ("title", "Street market"),
        ]
    }

    async fn multipart_from(body: &'static str) -> Multipart {
        let request = Request::builder()
            .header(
                header::CONTENT_TYPE,
                "multipart/form-data; boundary=XBOUND",
            )
            .body(Body::from(body))
            .unwrap();
        Multipart::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_read_parts_keeps_arrival_order() {
        let body = concat!(
            "--XBOUND\r\n",
            "Content-Disposition: form-data; name=\"title\"\r\n",
            "\r\n",
            "Street market\r\n",
            "--XBOUND\r\n",
            "Content-Disposition: form-data; name=\"photo\"; filename=\"mural.png\"\r\n",
            "Content-Type: image/png\r\n",
            "\r\n",
            "not-really-a-png\r\n",
            "--XBOUND--\r\n",
        );
        let parts = read_parts(multipart_from(body).await).await.unwrap();

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].0, "title");
        assert_eq!(parts[0].1, RawValue::from("Street market"));

        assert_eq!(parts[1].0, "photo");
        let RawValue::Upload(upload) = &parts[1].1 else {
            panic!("expected an upload part");
        };
        assert_eq!(upload.file_name, "mural.png");
        assert_eq!(upload.content_type.as_deref(), Some("image/png"));
        assert_eq!(&upload.bytes[..], b"not-really-a-png");
    }

    #[test]
    fn test_take_template_id_removes_the_part() {
        let mut object = candidate(&[("templateId", "abc"), ("title", "x")]);
        assert_eq!(take_template_id(&mut object), Some("abc".to_owned()));
        assert!(!object.contains_key(TEMPLATE_ID_PART));
        assert!(object.contains_key("title"));

        assert_eq!(take_template_id(&mut object), None);
    }

    #[test]
    fn test_validate_strips_routing_parts() {
        let mut entries = valid_entries();
        entries.push(("templateId", "leftover"));
        entries.push(("status", "ongoing"));

        let submission =
            validate_submission(&event_template(), candidate(&entries), UnknownKeys::Reject)
                .unwrap();

        assert_eq!(submission.status, Some(FormStatus::Ongoing));
        assert!(!submission.data.contains_key(TEMPLATE_ID_PART));
        assert!(!submission.data.contains_key(STATUS_PART));
        assert_eq!(
            submission.data.get("title"),
            Some(&FieldValue::Text("Street market".to_owned()))
        );
    }

    #[test]
    fn test_missing_status_is_not_an_issue_here() {
        let submission =
            validate_submission(&event_template(), candidate(&valid_entries()), UnknownKeys::Allow)
                .unwrap();
        assert_eq!(submission.status, None);
    }

    #[test]
    fn test_unrecognized_status_reports_invalid_value() {
        let mut entries = valid_entries();
        entries.push(("status", "archived"));

        let issues =
            validate_submission(&event_template(), candidate(&entries), UnknownKeys::Allow)
                .unwrap_err();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, IssueCode::InvalidValue);
        assert_eq!(issues[0].path, vec![PathSegment::key("status")]);
        assert!(issues[0].message.contains("created, ongoing, completed"));
    }

    #[test]
    fn test_status_issue_precedes_field_issues() {
        let entries = vec![("status", "archived"), ("place.lat", "91"), ("place.lng", "0")];

        let issues =
            validate_submission(&event_template(), candidate(&entries), UnknownKeys::Allow)
                .unwrap_err();

        assert!(issues.len() >= 2);
        assert_eq!(issues[0].path, vec![PathSegment::key("status")]);
        assert!(
            issues
                .iter()
                .any(|issue| issue.code == IssueCode::OutOfRange)
        );
    }

    #[test]
    fn test_valid_status_with_failing_fields_still_fails() {
        let entries = vec![("status", "created"), ("title", "x")];

        let issues =
            validate_submission(&event_template(), candidate(&entries), UnknownKeys::Allow)
                .unwrap_err();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, IssueCode::MissingRequiredField);
        assert_eq!(issues[0].path, vec![PathSegment::key("place")]);
    }
}
