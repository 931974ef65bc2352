//! Template response types.

use geoform_core::{FieldDef, Template};
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Template response.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateView {
    /// ID of the template.
    pub id: Uuid,
    /// Display name of the template.
    pub name: String,
    /// Description of the template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Map marker slug shown next to submissions.
    pub marker_icon: String,
    /// System-owned fields, always validated.
    pub fixed_fields: Vec<FieldDef>,
    /// Author-declared fields, in declaration order.
    pub dynamic_fields: Vec<FieldDef>,
    /// Timestamp when the template was created.
    pub created_at: Timestamp,
    /// Timestamp when the template was last updated.
    pub updated_at: Timestamp,
}

impl TemplateView {
    /// Creates a new instance of [`TemplateView`] from the stored model.
    pub fn from_model(template: Template) -> Self {
        Self {
            id: template.id,
            name: template.name,
            description: template.description,
            marker_icon: template.marker_icon,
            fixed_fields: template.fixed_fields,
            dynamic_fields: template.dynamic_fields,
            created_at: template.created_at,
            updated_at: template.updated_at,
        }
    }
}

/// Response for listing all templates.
pub type TemplateViews = Vec<TemplateView>;
