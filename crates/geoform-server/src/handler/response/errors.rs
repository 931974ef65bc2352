//! Error response bodies.
//!
//! Three wire shapes cover every failure the API reports: a generic
//! `{"error": ...}` body, the `{"message": ...}` body reserved for
//! authentication failures, and the `{"error": "ValidationError",
//! "issues": [...]}` body for rejected submissions.

use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use geoform_core::Issue;
use schemars::JsonSchema;
use serde::Serialize;

/// Generic error response body.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ErrorResponse<'a> {
    /// User-facing description of what went wrong.
    pub error: Cow<'a, str>,
    /// HTTP status code (not serialized in JSON).
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // 4xx Client Errors
    pub const BAD_REQUEST: Self = Self::new("Invalid request", StatusCode::BAD_REQUEST);
    pub const NOT_FOUND: Self = Self::new("Not found", StatusCode::NOT_FOUND);
    // 5xx Server Errors
    pub const INTERNAL_SERVER_ERROR: Self =
        Self::new("Internal server error", StatusCode::INTERNAL_SERVER_ERROR);

    /// Creates a new error response.
    #[inline]
    pub const fn new(error: &'a str, status: StatusCode) -> Self {
        Self {
            error: Cow::Borrowed(error),
            status,
        }
    }

    /// Replaces the error description.
    pub fn with_error(mut self, error: impl Into<Cow<'a, str>>) -> Self {
        self.error = error.into();
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Response body for authentication failures.
///
/// Authentication errors use a `message` key instead of `error`; clients
/// key off this shape to trigger a sign-in flow.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct UnauthorizedResponse<'a> {
    /// Why the request was not authenticated.
    pub message: Cow<'a, str>,
}

impl<'a> UnauthorizedResponse<'a> {
    pub const INVALID_TOKEN: Self = Self::new("Invalid token");
    pub const MISSING_TOKEN: Self = Self::new("No token provided");

    /// Creates a new unauthorized response.
    #[inline]
    pub const fn new(message: &'a str) -> Self {
        Self {
            message: Cow::Borrowed(message),
        }
    }
}

impl IntoResponse for UnauthorizedResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(self)).into_response()
    }
}

/// Response body for submissions the schema engine rejected.
///
/// The `error` discriminator is always `"ValidationError"`; the issue list
/// preserves the order failures were found in.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ValidationErrorResponse {
    /// Discriminator, always `"ValidationError"`.
    pub error: Cow<'static, str>,
    /// Every failure found, in field declaration order.
    pub issues: Vec<Issue>,
}

impl ValidationErrorResponse {
    /// Discriminator value clients match on.
    pub const ERROR_NAME: &str = "ValidationError";

    /// Creates a validation error response from collected issues.
    pub fn new(issues: Vec<Issue>) -> Self {
        Self {
            error: Cow::Borrowed(Self::ERROR_NAME),
            issues,
        }
    }
}

impl IntoResponse for ValidationErrorResponse {
    #[inline]
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}
