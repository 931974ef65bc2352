//! Request extractors with improved error handling and validation.
//!
//! Drop-in replacements for the standard Axum extractors that convert
//! rejections into the crate-wide [`Error`] type, so every extraction
//! failure serializes through the same response bodies.
//!
//! [`Error`]: crate::handler::Error

pub mod json;
pub mod multipart;
pub mod path;
pub mod validated_json;

pub use self::json::Json;
pub use self::multipart::Multipart;
pub use self::path::Path;
pub use self::validated_json::ValidateJson;
