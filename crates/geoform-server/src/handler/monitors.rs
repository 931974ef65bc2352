//! Service health monitoring handlers.
//!
//! The plain health route stays public so load balancers and uptime
//! probes can hit it without credentials. The authenticated variant lets
//! clients verify a session token and storage reachability in one call.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use geoform_store::StorageBackend;

use crate::extract::{AuthState, Json};
use crate::handler::Result;
use crate::handler::response::{AuthHealthStatus, DatabaseHealth, HealthStatus, UnauthorizedResponse};
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "geoform_server::handler::monitors";

/// Reports service health and storage reachability.
///
/// Always answers `200 OK`; a failed storage probe shows up in the body
/// as `disconnected` rather than as an error status.
#[tracing::instrument(skip_all)]
async fn health(State(storage): State<StorageBackend>) -> Result<Json<HealthStatus>> {
    tracing::debug!(target: TRACING_TARGET, "Checking service health");

    let probe = storage.check().await;
    if let Err(err) = &probe {
        tracing::warn!(target: TRACING_TARGET, error = %err, "storage probe failed");
    }

    let status = HealthStatus::new(DatabaseHealth::from_probe(&probe));
    Ok(Json(status))
}

fn health_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Check health")
        .description(
            "Reports service health and storage reachability. A failed \
            storage probe is reported in the body, not as an error status.",
        )
        .response::<200, Json<HealthStatus>>()
}

/// Reports service health for an authenticated caller.
///
/// Reaching the handler at all means the session token verified, so the
/// response confirms authorization alongside the storage probe.
#[tracing::instrument(skip_all, fields(subject = %auth_state.subject))]
async fn health_auth(
    State(storage): State<StorageBackend>,
    auth_state: AuthState,
) -> Result<Json<AuthHealthStatus>> {
    tracing::debug!(target: TRACING_TARGET, "Checking service health (authenticated)");

    let probe = storage.check().await;
    if let Err(err) = &probe {
        tracing::warn!(target: TRACING_TARGET, error = %err, "storage probe failed");
    }

    let status = AuthHealthStatus::new(DatabaseHealth::from_probe(&probe));
    Ok(Json(status))
}

fn health_auth_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Check health with authentication")
        .description("Verifies the session token and reports service health.")
        .response::<200, Json<AuthHealthStatus>>()
        .response::<401, Json<UnauthorizedResponse>>()
}

/// Returns a [`Router`] with all health monitoring routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/health", get_with(health, health_docs))
        .api_route("/health/auth", get_with(health_auth, health_auth_docs))
        .with_path_items(|item| item.tag("Monitors"))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use super::*;
    use crate::handler::response::ServiceHealth;
    use crate::handler::test::{auth_header, create_test_server};

    #[tokio::test]
    async fn test_health_answers_without_token() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server.get("/api/health").await;
        response.assert_status_ok();

        let status = response.json::<HealthStatus>();
        assert_eq!(status.status, ServiceHealth::Ok);
        assert_eq!(status.database, DatabaseHealth::Connected);

        let age = jiff::Timestamp::now().as_second() - status.checked_at.as_second();
        assert!(age < 60);

        Ok(())
    }

    #[tokio::test]
    async fn test_health_auth_requires_token() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server.get("/api/health/auth").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.json::<Value>(),
            json!({ "message": "No token provided" })
        );

        let response = server
            .get("/api/health/auth")
            .add_header("Authorization", "Bearer not-a-token")
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.json::<Value>(),
            json!({ "message": "Invalid token" })
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_health_auth_reports_authorization() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server
            .get("/api/health/auth")
            .add_header("Authorization", auth_header()?)
            .await;
        response.assert_status_ok();

        let status = response.json::<AuthHealthStatus>();
        assert_eq!(status.status, ServiceHealth::Ok);
        assert_eq!(status.authorization, ServiceHealth::Ok);
        assert_eq!(status.database, DatabaseHealth::Connected);

        Ok(())
    }
}
