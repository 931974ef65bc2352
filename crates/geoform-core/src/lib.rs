#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

//! # Geoform Core
//!
//! Foundation types for the geoform backend: the field type registry
//! ([`FieldKind`]), template and form documents, decoded submission values,
//! and the dynamic schema engine ([`FormSchema`]) that validates a
//! submission against a template's field list.

/// Tracing target for schema validation.
pub const TRACING_TARGET: &str = "geoform_core::schema";

mod decode;
mod field;
mod form;
mod schema;
mod template;
mod value;

pub use decode::decode_parts;
pub use field::{FieldDef, FieldKind, PLACE_KEY};
pub use form::{Form, FormStatus};
pub use schema::{FormSchema, Issue, IssueCode, PathSegment, UnknownKeys};
pub use template::Template;
pub use value::{FieldValue, FileUpload, FormData, JsonObject, RawObject, RawValue};

#[doc(hidden)]
pub mod prelude {
    //! Commonly used types, re-exported for convenience.

    pub use crate::decode::decode_parts;
    pub use crate::field::{FieldDef, FieldKind, PLACE_KEY};
    pub use crate::form::{Form, FormStatus};
    pub use crate::schema::{FormSchema, Issue, IssueCode, PathSegment, UnknownKeys};
    pub use crate::template::Template;
    pub use crate::value::{
        FieldValue, FileUpload, FormData, JsonObject, RawObject, RawValue,
    };
}
