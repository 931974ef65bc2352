//! Submission processing pipeline.
//!
//! Form create and update run the same request-scoped stages in order:
//!
//! - [`read_parts`] / [`validate_submission`] - drain the multipart body,
//!   decode it, and validate it against the owning template's schema
//! - [`materialize_uploads`] - write accepted uploads to file storage and
//!   swap them for handles
//! - [`render_data`] - rehydrate stored attachment handles into download
//!   descriptors for the response
//!
//! Stages are plain functions over request-scoped data; none of them holds
//! shared mutable state.

mod materialize;
mod render;
mod submit;

pub use materialize::materialize_uploads;
pub use render::{FILE_URL_PREFIX, render_data};
pub use submit::{
    MAX_UPLOAD_SIZE, STATUS_PART, Submission, TEMPLATE_ID_PART, read_parts, take_template_id,
    validate_submission,
};
