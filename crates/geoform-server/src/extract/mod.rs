//! HTTP request extractors with improved error handling and validation.
//!
//! Custom Axum extractors used across the handlers. All of them reject
//! through the crate-wide [`Error`] type so failures serialize into the
//! same response bodies, and authentication state is cached per request.
//!
//! # Extractor Categories
//!
//! ## Authentication
//!
//! - [`AuthClaims`] - JWT claims carried by session tokens
//! - [`AuthState`] - Validated authentication state (header or cookie)
//!
//! ## Request Data Extraction
//!
//! - [`Json`] - JSON deserialization with better error messages
//! - [`ValidateJson`] - JSON extraction with automatic validation
//! - [`Multipart`] - Multipart form extraction for submissions
//! - [`Path`] - Path parameter extraction with detailed error context
//!
//! [`Error`]: crate::handler::Error

// Authentication
pub mod auth;

// Request Data Extraction
pub mod reject;

pub use crate::extract::auth::{AuthClaims, AuthState, SESSION_COOKIE};
pub use crate::extract::reject::{Json, Multipart, Path, ValidateJson};
