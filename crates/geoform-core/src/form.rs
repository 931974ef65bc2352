//! Submitted forms and their lifecycle status.

use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::value::JsonObject;

/// Lifecycle status of a submitted form.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    /// Freshly submitted
    #[default]
    Created,
    /// Being worked on
    Ongoing,
    /// Closed out
    Completed,
}

/// A stored submission against one template.
///
/// `data` holds only validated, materialized values: attachment fields are
/// storage handles, never bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    /// Unique identifier.
    pub id: Uuid,
    /// Template the submission was validated against.
    pub template_id: Uuid,
    /// Lifecycle status.
    pub status: FormStatus,
    /// Validated submission data, in field binding order.
    pub data: JsonObject,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last modification time.
    pub updated_at: Timestamp,
}

impl Form {
    /// Creates a form from validated submission data.
    #[must_use]
    pub fn new(template_id: Uuid, status: FormStatus, data: JsonObject) -> Self {
        let now = Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            template_id,
            status,
            data,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the submission data and bumps the modification time.
    pub fn replace_data(&mut self, data: JsonObject) {
        self.data = data;
        self.updated_at = Timestamp::now();
    }
}
