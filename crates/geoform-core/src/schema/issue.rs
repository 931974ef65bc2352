//! Validation issues reported by the schema engine.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Stable identifier for a class of validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter)]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// Value has the wrong shape for the field's kind
    InvalidType,
    /// Required field absent from the submission
    MissingRequiredField,
    /// Text did not coerce to a finite number
    InvalidNumber,
    /// Number outside the field's permitted range
    OutOfRange,
    /// Text did not parse as an ISO calendar date
    InvalidDate,
    /// Text did not parse as an ISO wall-clock time
    InvalidTime,
    /// Text did not parse as an absolute URL
    InvalidUrl,
    /// Value not among the permitted set
    InvalidValue,
    /// Key not declared by the template
    UnknownField,
}

/// One step of the path from the submission root to a value.
///
/// Serializes untagged, so a path renders as a plain array of names and
/// positions: `["place", "lat"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(untagged)]
pub enum PathSegment {
    /// Object member name.
    Key(String),
    /// Array position.
    Index(usize),
}

impl PathSegment {
    /// Segment addressing an object member.
    #[must_use]
    pub fn key(name: impl Into<String>) -> Self {
        Self::Key(name.into())
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        Self::Key(name.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        Self::Key(name)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// One problem found while validating a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Issue {
    /// Failure class.
    pub code: IssueCode,
    /// Where in the submission the failure was found.
    pub path: Vec<PathSegment>,
    /// Human-readable explanation.
    pub message: String,
}

impl Issue {
    /// Creates an issue at the given path.
    #[must_use]
    pub fn new(
        code: IssueCode,
        path: impl IntoIterator<Item = PathSegment>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            path: path.into_iter().collect(),
            message: message.into(),
        }
    }

    /// A required field was absent.
    #[must_use]
    pub fn missing(path: impl IntoIterator<Item = PathSegment>) -> Self {
        Self::new(IssueCode::MissingRequiredField, path, "Required")
    }

    /// A key the template does not declare was rejected.
    #[must_use]
    pub fn unknown(key: &str) -> Self {
        Self::new(
            IssueCode::UnknownField,
            [PathSegment::key(key)],
            "Unrecognized field",
        )
    }
}
