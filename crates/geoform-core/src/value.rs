//! Submission values on both sides of validation.
//!
//! [`RawValue`] is what the decoder produces from a multipart body;
//! [`FieldValue`] is what the schema engine produces from a [`RawValue`]
//! once a field's rules have accepted it.

use bytes::Bytes;
use indexmap::IndexMap;
use jiff::civil;
use serde_json::Value;
use url::Url;

/// A decoded submission: top-level keys to raw values, in part order.
pub type RawObject = IndexMap<String, RawValue>;

/// A validated submission: field keys to typed values, in binding order.
pub type FormData = IndexMap<String, FieldValue>;

/// A persisted submission: field keys to plain JSON, in binding order.
pub type JsonObject = IndexMap<String, Value>;

/// One uploaded file from a multipart body.
///
/// The payload is reference-counted; cloning an upload does not copy the
/// bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    /// File name as sent by the client.
    pub file_name: String,
    /// Content type as sent by the client, when present.
    pub content_type: Option<String>,
    /// Raw payload.
    pub bytes: Bytes,
}

impl FileUpload {
    /// Creates an upload from its multipart parts.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: Option<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Extension of the client file name, without the dot.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
    }

    /// Payload size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A single decoded value before validation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Text part.
    Text(String),
    /// File part.
    Upload(FileUpload),
    /// Nested object assembled from dotted part names.
    Object(RawObject),
}

impl RawValue {
    /// Plain JSON rendition of this value.
    ///
    /// Returns `None` when the value is, or contains, a binary upload,
    /// which has no JSON form.
    #[must_use]
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Self::Text(text) => Some(Value::String(text.clone())),
            Self::Upload(_) => None,
            Self::Object(object) => {
                let mut map = serde_json::Map::with_capacity(object.len());
                for (key, value) in object {
                    map.insert(key.clone(), value.to_json()?);
                }
                Some(Value::Object(map))
            }
        }
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<FileUpload> for RawValue {
    fn from(upload: FileUpload) -> Self {
        Self::Upload(upload)
    }
}

/// A single validated value.
///
/// `Upload` only survives until file materialization replaces it with a
/// storage handle; persisted data never contains one.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Accepted text.
    Text(String),
    /// Coerced finite number.
    Number(f64),
    /// Parsed calendar date.
    Date(civil::Date),
    /// Parsed wall-clock time.
    Time(civil::Time),
    /// Parsed absolute URL.
    Link(Url),
    /// Accepted upload, not yet written to storage.
    Upload(FileUpload),
    /// Handle of a file already in storage.
    FileRef(String),
    /// Validated coordinate pair.
    Place {
        /// Degrees latitude, within [-90, 90].
        lat: f64,
        /// Degrees longitude, within [-180, 180].
        lng: f64,
    },
    /// Pass-through value from an unknown field or kind.
    Other(Value),
}

impl FieldValue {
    /// JSON representation for persistence.
    ///
    /// Uploads have no JSON form and must be materialized into storage
    /// handles first; converting one yields its client file name.
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            Self::Text(text) => Value::String(text),
            Self::Number(number) => {
                serde_json::Number::from_f64(number).map_or(Value::Null, Value::Number)
            }
            Self::Date(date) => Value::String(date.to_string()),
            Self::Time(time) => Value::String(time.to_string()),
            Self::Link(url) => Value::String(url.into()),
            Self::Upload(upload) => Value::String(upload.file_name),
            Self::FileRef(handle) => Value::String(handle),
            Self::Place { lat, lng } => serde_json::json!({ "lat": lat, "lng": lng }),
            Self::Other(value) => value,
        }
    }

    /// Whether this value still carries upload bytes.
    #[must_use]
    pub fn is_upload(&self) -> bool {
        matches!(self, Self::Upload(_))
    }
}
