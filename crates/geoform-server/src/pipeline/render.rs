//! Response rendering for stored forms.

use geoform_core::{FieldKind, Form, JsonObject, Template};
use serde_json::{Value, json};

/// URL prefix stored attachment handles are served under.
pub const FILE_URL_PREFIX: &str = "/api/files/";

/// Returns the form's data with attachment handles swapped for download
/// descriptors.
///
/// Every composed field of kind image or document whose stored value is a
/// string handle becomes `{type, url, filename}`. Everything else passes
/// through unchanged, including keys the template no longer declares.
#[must_use]
pub fn render_data(form: &Form, template: &Template) -> JsonObject {
    let mut rendered = JsonObject::with_capacity(form.data.len());
    for (key, value) in &form.data {
        let substituted = match (template.field(key), value) {
            (Some(field), Value::String(handle)) if field.kind.is_attachment() => {
                attachment_view(field.kind, handle)
            }
            _ => value.clone(),
        };
        rendered.insert(key.clone(), substituted);
    }
    rendered
}

/// Download descriptor for one stored attachment handle.
fn attachment_view(kind: FieldKind, handle: &str) -> Value {
    json!({
        "type": kind,
        "url": format!("{FILE_URL_PREFIX}{handle}"),
        "filename": handle,
    })
}
