//! Middleware for `axum::Router` and HTTP request processing.
//!
//! This module provides middleware for:
//! - Authentication gating of private route groups
//! - Observability (tracing, request IDs, header redaction)
//! - OpenAPI documentation with the Scalar reference UI
//! - Recovery from timeouts, panics, and stray service errors

mod observability;
mod open_api;
mod recovery;
mod require_auth;

pub use observability::{
    RouterObservabilityExt, create_propagate_request_id_layer, create_request_id_layer,
    create_sensitive_headers_layer, create_trace_layer,
};
pub use open_api::{OpenApiConfig, RouterOpenApiExt};
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use require_auth::require_authentication;
