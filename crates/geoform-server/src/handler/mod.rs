//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust
//! use geoform_server::handler;
//! use geoform_server::middleware::{OpenApiConfig, RouterOpenApiExt};
//! use geoform_server::service::{ServiceConfig, ServiceState};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServiceConfig::default();
//! let state = ServiceState::from_config(&config).await?;
//!
//! // Serve the API with its OpenAPI document and Scalar UI.
//! let router: axum::Router = handler::routes(state.clone())
//!     .with_open_api(OpenApiConfig::default())
//!     .with_state(state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod error;
mod files;
mod forms;
mod monitors;
mod request;
mod response;
mod templates;

use aide::axum::ApiRouter;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
use crate::middleware::require_authentication;
use crate::service::ServiceState;

/// Maximum request body size, sized above the per-part upload cap.
const MAX_BODY_SIZE: usize = 32 * 1024 * 1024;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns an [`ApiRouter`] with all private routes.
fn private_routes() -> ApiRouter<ServiceState> {
    ApiRouter::new()
        .merge(templates::routes())
        .merge(forms::routes())
}

/// Returns an [`ApiRouter`] with all public routes.
fn public_routes() -> ApiRouter<ServiceState> {
    ApiRouter::new()
        .merge(monitors::routes())
        .merge(files::routes())
}

/// Returns an [`ApiRouter`] with all routes nested under `/api`.
///
/// Template and form routes sit behind the authentication gate. Health
/// and file serving stay public; file handles are server-generated and
/// unguessable, and probes must work without credentials. The default
/// body limit is raised to [`MAX_BODY_SIZE`] so multipart submissions
/// can carry uploads up to the per-part cap.
pub fn routes(state: ServiceState) -> ApiRouter<ServiceState> {
    let require_authentication = from_fn_with_state(state, require_authentication);

    let private_router = private_routes().route_layer(require_authentication);
    let public_router = public_routes();

    let api_router = ApiRouter::new().merge(private_router).merge(public_router);

    ApiRouter::new()
        .nest("/api", api_router)
        .fallback(handler)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
}

#[cfg(test)]
mod test {
    use axum_test::TestServer;

    use crate::extract::AuthClaims;
    use crate::handler::routes;
    use crate::middleware::{OpenApiConfig, RouterOpenApiExt};
    use crate::service::{AuthKeys, ServiceState};

    /// Secret the memory-backed test state signs session tokens with.
    const TEST_AUTH_SECRET: &str = "handler-test-secret";

    /// Returns a new [`TestServer`] over the full route tree.
    pub async fn create_test_server() -> anyhow::Result<TestServer> {
        create_test_server_with_state(ServiceState::default()).await
    }

    /// Returns a new [`TestServer`] with the given state.
    pub async fn create_test_server_with_state(state: ServiceState) -> anyhow::Result<TestServer> {
        let router = routes(state.clone()).with_open_api(OpenApiConfig::default());
        let server = TestServer::new(router.with_state(state))?;
        Ok(server)
    }

    /// Mints an `Authorization` header value the test state accepts.
    pub fn auth_header() -> anyhow::Result<String> {
        let keys = AuthKeys::from_secret(TEST_AUTH_SECRET)?;
        let token = AuthClaims::new("handler-tests").encode(keys.encoding_key())?;
        Ok(format!("Bearer {token}"))
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let server = create_test_server().await?;
        assert!(server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn unmatched_routes_fall_back_to_not_found() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server.get("/api/no-such-route").await;
        response.assert_status_not_found();

        let response = server.get("/outside").await;
        response.assert_status_not_found();

        Ok(())
    }
}
