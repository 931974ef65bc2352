//! Request types for HTTP handlers.

mod templates;
mod validations;

pub use templates::*;
pub use validations::*;
