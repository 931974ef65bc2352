use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::extract::AuthState;

/// Requires a valid authentication token to proceed with the request.
///
/// #### Notes
///
/// - [`AuthState`] accepts a bearer header or the session cookie.
/// - Requests without a verifiable token are rejected with `401` before
///   the inner handler runs.
///
/// #### Examples
///
/// ```rust,no_run
/// use axum::extract::Request;
/// use axum::middleware::{FromFnLayer, from_fn_with_state};
/// use geoform_server::extract::AuthState;
/// use geoform_server::middleware::require_authentication;
/// use geoform_server::service::{ServiceConfig, ServiceState};
///
/// # async fn build() -> geoform_server::service::Result<()> {
/// let state = ServiceState::from_config(&ServiceConfig::default()).await?;
/// let _guard: FromFnLayer<_, _, (AuthState, Request)> =
///     from_fn_with_state(state, require_authentication);
/// # Ok(())
/// # }
/// ```
pub async fn require_authentication(
    AuthState(_): AuthState,
    request: Request,
    next: Next,
) -> Response {
    next.run(request).await
}
