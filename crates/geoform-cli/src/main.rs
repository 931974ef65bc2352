#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use axum::response::Redirect;
use axum::routing::get;
use geoform_server::handler;
use geoform_server::middleware::{RouterObservabilityExt, RouterOpenApiExt, RouterRecoveryExt};
use geoform_server::service::{ServiceConfig, ServiceState};

use crate::config::{Cli, MiddlewareConfig};

/// Tracing target for application startup events.
pub const TRACING_TARGET_STARTUP: &str = "geoform_cli::startup";

/// Tracing target for application shutdown events.
pub const TRACING_TARGET_SHUTDOWN: &str = "geoform_cli::shutdown";

/// Tracing target for configuration logging.
pub const TRACING_TARGET_CONFIG: &str = "geoform_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    log_startup_info();

    cli.validate()?;
    cli.log();

    let service_config = ServiceConfig::from(cli.service);
    let state = ServiceState::from_config(&service_config)
        .await
        .context("failed to create service state")?;

    let router = create_router(state, cli.middleware);
    server::serve(router, cli.server).await?;

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - catches panics and enforces timeouts
/// 2. Observability - request IDs and tracing spans
/// 3. Routes (innermost) - actual request handlers
///
/// The root path redirects to the Scalar UI so a browser pointed at the
/// server lands on the API reference.
fn create_router(state: ServiceState, middleware: MiddlewareConfig) -> Router {
    let scalar_ui = middleware.openapi.scalar_ui.clone();

    let router = handler::routes(state.clone())
        .with_open_api(middleware.openapi)
        .with_state(state);

    router
        .route("/", get(move || async move { Redirect::temporary(&scalar_ui) }))
        .with_observability()
        .with_recovery(&middleware.recovery)
}

/// Logs startup information.
fn log_startup_info() {
    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting geoform server"
    );
}
