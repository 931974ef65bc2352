//! The dynamic schema engine.
//!
//! [`FormSchema::build`] compiles a template's field list into an ordered
//! validation plan; [`FormSchema::validate`] runs a decoded submission
//! through it, collecting every issue instead of stopping at the first.

mod builder;
mod issue;
mod rules;

pub use builder::{FormSchema, UnknownKeys};
pub use issue::{Issue, IssueCode, PathSegment};
