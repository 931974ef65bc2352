//! Form response types.

use geoform_core::{Form, FormStatus, JsonObject, Template};
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pipeline::render_data;

/// Form response.
///
/// `data` is either the stored submission as-is or the rendered variant
/// where attachment handles become download descriptors; see
/// [`FormView::rendered`].
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    /// ID of the form.
    pub id: Uuid,
    /// ID of the template the submission was validated against.
    pub template_id: Uuid,
    /// Lifecycle status of the form.
    pub status: FormStatus,
    /// Submission data, in field binding order.
    pub data: JsonObject,
    /// Timestamp when the form was created.
    pub created_at: Timestamp,
    /// Timestamp when the form was last updated.
    pub updated_at: Timestamp,
}

impl FormView {
    /// Creates a new instance of [`FormView`] with the stored data as-is.
    ///
    /// Used when the owning template no longer exists and attachment
    /// fields cannot be told apart from plain text.
    pub fn from_model(form: Form) -> Self {
        Self {
            id: form.id,
            template_id: form.template_id,
            status: form.status,
            data: form.data,
            created_at: form.created_at,
            updated_at: form.updated_at,
        }
    }

    /// Creates a new instance of [`FormView`] with attachment fields
    /// rendered into download descriptors.
    pub fn rendered(form: Form, template: &Template) -> Self {
        let data = render_data(&form, template);
        Self {
            id: form.id,
            template_id: form.template_id,
            status: form.status,
            data,
            created_at: form.created_at,
            updated_at: form.updated_at,
        }
    }
}

/// Response for listing forms.
pub type FormViews = Vec<FormView>;
