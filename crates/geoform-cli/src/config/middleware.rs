//! Middleware configuration for the HTTP server.
//!
//! This module groups the CLI-configurable middleware settings: OpenAPI
//! documentation paths and request recovery (timeouts/panic handling).
//!
//! Both configs are re-exported from `geoform-server` and support CLI
//! arguments as well as environment variables.
//!
//! # Example
//!
//! ```bash
//! # Move the OpenAPI document and raise the request timeout
//! geoform-cli --open-api-json /docs/openapi.json --request-timeout 60
//! ```

use clap::Args;
use geoform_server::middleware::{OpenApiConfig, RecoveryConfig};
use serde::{Deserialize, Serialize};

use super::TRACING_TARGET_CONFIG;

/// Middleware configuration combining OpenAPI and recovery settings.
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// OpenAPI documentation configuration.
    ///
    /// Configures the paths where the OpenAPI JSON document and the
    /// Scalar UI are served.
    #[clap(flatten)]
    pub openapi: OpenApiConfig,

    /// Recovery middleware configuration.
    ///
    /// Controls request timeout and panic recovery behavior.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    /// Logs middleware configuration at info level.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            openapi_path = %self.openapi.open_api_json,
            scalar_path = %self.openapi.scalar_ui,
            "OpenAPI configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            request_timeout_secs = self.recovery.request_timeout,
            "recovery configuration"
        );
    }
}
