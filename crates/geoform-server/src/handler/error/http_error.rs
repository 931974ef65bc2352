//! HTTP error handling with a builder pattern for dynamic error responses.

use std::borrow::Cow;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use geoform_core::Issue;
use geoform_store::StoreError;

use crate::TRACING_TARGET_HANDLER;
use crate::handler::response::{ErrorResponse, UnauthorizedResponse, ValidationErrorResponse};

/// The error type for HTTP handlers in the server.
///
/// Carries the error kind, an optional user-facing message, optional
/// internal context (logged, never serialized), and any validation issues.
/// An error with issues always serializes as a validation error body.
#[derive(Clone)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    message: Option<Cow<'a, str>>,
    context: Option<Cow<'a, str>>,
    issues: Vec<Issue>,
}

impl Error<'static> {
    /// Creates a new [`Error`] with the specified kind.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            context: None,
            issues: Vec::new(),
        }
    }

    /// Creates an error from issues collected by the schema engine.
    pub fn validation(issues: Vec<Issue>) -> Self {
        Self {
            kind: ErrorKind::BadRequest,
            message: None,
            context: None,
            issues,
        }
    }
}

impl<'a> Error<'a> {
    /// Sets a user-facing message for the error.
    ///
    /// Authentication errors have a fixed wire body; for those kinds the
    /// message only shows up in logs and [`fmt::Display`] output.
    #[inline]
    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    /// Attaches internal context to the error.
    ///
    /// Context is logged when the error is serialized but never included
    /// in the response body.
    #[inline]
    pub fn with_context(self, context: impl Into<Cow<'a, str>>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the custom message if present.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the context if present.
    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Returns the validation issues.
    #[inline]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Converts this error into a static version by cloning all borrowed data.
    pub fn into_static(self) -> Error<'static> {
        Error {
            kind: self.kind,
            message: self.message.map(|m| Cow::Owned(m.into_owned())),
            context: self.context.map(|c| Cow::Owned(c.into_owned())),
            issues: self.issues,
        }
    }
}

impl Default for Error<'static> {
    #[inline]
    fn default() -> Self {
        Self::new(ErrorKind::default())
    }
}

impl fmt::Debug for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug_struct = f.debug_struct("Error");
        debug_struct
            .field("kind", &self.kind)
            .field("status", &self.kind.status_code());

        if let Some(ref message) = self.message {
            debug_struct.field("message", message);
        }

        if let Some(ref context) = self.context {
            debug_struct.field("context", context);
        }

        if !self.issues.is_empty() {
            debug_struct.field("issues", &self.issues);
        }

        debug_struct.finish()
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.kind.status_code();
        write!(f, "{} ({})", self.kind.name(), status.as_u16())?;

        if let Some(ref message) = self.message {
            write!(f, ": {message}")?;
        }

        if let Some(ref context) = self.context {
            write!(f, " - {context}")?;
        }

        if !self.issues.is_empty() {
            write!(f, " [{} issue(s)]", self.issues.len())?;
        }

        Ok(())
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        if let Some(context) = self.context.as_deref() {
            tracing::debug!(
                target: TRACING_TARGET_HANDLER,
                kind = self.kind.name(),
                context,
                "request failed"
            );
        }

        if !self.issues.is_empty() {
            return ValidationErrorResponse::new(self.issues).into_response();
        }

        match self.kind {
            ErrorKind::MissingAuthToken => UnauthorizedResponse::MISSING_TOKEN.into_response(),
            ErrorKind::InvalidAuthToken => UnauthorizedResponse::INVALID_TOKEN.into_response(),
            ErrorKind::BadRequest => respond(ErrorResponse::BAD_REQUEST, self.message),
            ErrorKind::NotFound => respond(ErrorResponse::NOT_FOUND, self.message),
            ErrorKind::InternalServerError => {
                respond(ErrorResponse::INTERNAL_SERVER_ERROR, self.message)
            }
        }
    }
}

/// Serializes a preset body, overriding its description when a custom
/// message was set.
fn respond(preset: ErrorResponse<'static>, message: Option<Cow<'_, str>>) -> Response {
    match message {
        Some(message) => preset.with_error(message.into_owned()).into_response(),
        None => preset.into_response(),
    }
}

// Error bodies are documented per route via `response_with`, so no
// default response schema is inferred here.
impl aide::OperationOutput for Error<'_> {
    type Inner = Self;
}

impl From<ErrorKind> for Error<'static> {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<StoreError> for Error<'static> {
    fn from(error: StoreError) -> Self {
        let kind = match &error {
            StoreError::NotFound(_) | StoreError::InvalidHandle(_) => ErrorKind::NotFound,
            _ => ErrorKind::InternalServerError,
        };
        kind.into_error().with_context(error.to_string())
    }
}

/// A specialized [`Result`] type for HTTP operations.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Enumeration of all HTTP error kinds the API reports.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // 4xx Client Errors
    /// 400 Bad Request - Invalid request data
    BadRequest,
    /// 401 Unauthorized - Missing authentication token
    MissingAuthToken,
    /// 401 Unauthorized - Invalid or expired authentication token
    InvalidAuthToken,
    /// 404 Not Found - Resource not found
    NotFound,

    // 5xx Server Errors
    /// 500 Internal Server Error - Unexpected server error
    #[default]
    InternalServerError,
}

impl ErrorKind {
    /// Converts this error kind into a full [`Error`].
    #[inline]
    pub fn into_error(self) -> Error<'static> {
        Error::new(self)
    }

    /// Creates an [`Error`] with the specified message.
    #[inline]
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    /// Creates an [`Error`] with the specified context.
    #[inline]
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_context(context)
    }

    /// Returns the HTTP status code for this error kind.
    #[inline]
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::MissingAuthToken | Self::InvalidAuthToken => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the snake_case identifier used in logs.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::MissingAuthToken => "missing_auth_token",
            Self::InvalidAuthToken => "invalid_auth_token",
            Self::NotFound => "not_found",
            Self::InternalServerError => "internal_server_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.into_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use geoform_core::{IssueCode, PathSegment};

    use super::*;

    #[test]
    fn default_http_error() {
        let error = Error::default();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        let _ = error.into_response();
    }

    #[test]
    fn error_from_kind() {
        let error = Error::new(ErrorKind::NotFound);
        assert_eq!(error.kind(), ErrorKind::NotFound);
        let _ = error.into_response();
    }

    #[test]
    fn error_builder_chaining() {
        let error = ErrorKind::NotFound
            .with_message("Template not found")
            .with_context("id: not-a-uuid");

        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(error.message(), Some("Template not found"));
        assert_eq!(error.context(), Some("id: not-a-uuid"));
    }

    #[test]
    fn validation_error_keeps_issues() {
        let issue = Issue::new(
            IssueCode::MissingRequiredField,
            [PathSegment::key("title")],
            "Required",
        );
        let error = Error::validation(vec![issue]);

        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.issues().len(), 1);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn auth_kinds_map_to_unauthorized() {
        assert_eq!(
            ErrorKind::MissingAuthToken.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorKind::InvalidAuthToken.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn store_not_found_becomes_http_not_found() {
        let error: Error<'static> = StoreError::not_found("templates/x.json").into();
        assert_eq!(error.kind(), ErrorKind::NotFound);

        let error: Error<'static> = StoreError::invalid_handle("../etc/passwd").into();
        assert_eq!(error.kind(), ErrorKind::NotFound);

        let error: Error<'static> = StoreError::init("bad root").into();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn std_fmt_display() {
        let error = ErrorKind::NotFound
            .with_message("Form not found")
            .with_context("id: 123");

        let display = format!("{error}");
        assert!(display.contains("not_found"));
        assert!(display.contains("404"));
        assert!(display.contains("Form not found"));
        assert!(display.contains("id: 123"));
    }

    #[test]
    fn std_error_trait() {
        let error = Error::new(ErrorKind::BadRequest);
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn error_into_static() {
        let error = ErrorKind::NotFound
            .with_message("Test message".to_string())
            .with_context("Test context".to_string());

        let static_error = error.into_static();
        assert_eq!(static_error.message(), Some("Test message"));
        assert_eq!(static_error.context(), Some("Test context"));
    }
}
