//! Template management handlers.
//!
//! Templates define the field layout submissions are validated against.
//! A layout is immutable once created; revising one means creating a
//! replacement template and deleting the old one.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use geoform_core::Template;
use geoform_store::DocumentStore;
use uuid::Uuid;

use crate::extract::{Json, Path, ValidateJson};
use crate::handler::request::CreateTemplate;
use crate::handler::response::{ErrorResponse, TemplateView, TemplateViews, UnauthorizedResponse};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for template operations.
const TRACING_TARGET: &str = "geoform_server::handler::templates";

/// Creates a new template.
#[tracing::instrument(skip_all, fields(name = %request.name))]
async fn create_template(
    State(templates): State<DocumentStore<Template>>,
    ValidateJson(request): ValidateJson<CreateTemplate>,
) -> Result<(StatusCode, Json<TemplateView>)> {
    tracing::debug!(target: TRACING_TARGET, "Creating template");

    let template = request.into_model();
    templates.insert(&template).await.map_err(|err| {
        tracing::error!(target: TRACING_TARGET, error = %err, "failed to insert template");
        ErrorKind::InternalServerError.with_message("Failed to create template")
    })?;

    tracing::info!(
        target: TRACING_TARGET,
        template_id = %template.id,
        "Template created",
    );

    Ok((StatusCode::CREATED, Json(TemplateView::from_model(template))))
}

fn create_template_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create template")
        .description(
            "Creates a template. The fixed location field is injected ahead \
            of the declared fields.",
        )
        .response::<201, Json<TemplateView>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<401, Json<UnauthorizedResponse>>()
}

/// Returns all templates, oldest first.
#[tracing::instrument(skip_all)]
async fn list_templates(
    State(templates): State<DocumentStore<Template>>,
) -> Result<Response> {
    tracing::debug!(target: TRACING_TARGET, "Listing templates");

    let templates = templates.find_all().await.map_err(|err| {
        tracing::error!(target: TRACING_TARGET, error = %err, "failed to list templates");
        ErrorKind::InternalServerError.with_message("Failed to list templates")
    })?;

    if templates.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let views: TemplateViews = templates.into_iter().map(TemplateView::from_model).collect();

    tracing::debug!(
        target: TRACING_TARGET,
        template_count = views.len(),
        "Templates listed",
    );

    Ok((StatusCode::OK, Json(views)).into_response())
}

fn list_templates_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List templates")
        .description("Returns all templates, oldest first.")
        .response::<200, Json<TemplateViews>>()
        .response_with::<204, (), _>(|res| res.description("No templates exist."))
        .response::<401, Json<UnauthorizedResponse>>()
}

/// Deletes a template by ID.
///
/// Forms referencing the template are left in place; they render raw
/// afterwards and no longer accept updates.
#[tracing::instrument(skip_all, fields(template_id = %id))]
async fn delete_template(
    State(templates): State<DocumentStore<Template>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    tracing::debug!(target: TRACING_TARGET, "Deleting template");

    let Ok(id) = id.parse::<Uuid>() else {
        return Err(ErrorKind::NotFound
            .with_message("Invalid Template ID")
            .with_context(format!("malformed template id: {id}")));
    };

    let removed = templates.remove(id).await.map_err(|err| {
        tracing::error!(target: TRACING_TARGET, error = %err, "failed to remove template");
        ErrorKind::InternalServerError.with_message("Failed to delete template")
    })?;

    if !removed {
        return Err(ErrorKind::NotFound.with_message("Template not found"));
    }

    tracing::info!(target: TRACING_TARGET, "Template deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn delete_template_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete template")
        .description("Deletes a template by ID. Forms referencing it are kept.")
        .response_with::<204, (), _>(|res| res.description("Template deleted."))
        .response::<401, Json<UnauthorizedResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all template-related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/template/create",
            post_with(create_template, create_template_docs),
        )
        .api_route(
            "/template/list",
            get_with(list_templates, list_templates_docs),
        )
        .api_route(
            "/template/{id}",
            delete_with(delete_template, delete_template_docs),
        )
        .with_path_items(|item| item.tag("Templates"))
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::handler::test::{auth_header, create_test_server};

    fn event_template_body() -> Value {
        json!({
            "name": "Event",
            "markerIcon": "calendar-star",
            "fields": [
                { "key": "title", "label": "Title", "type": "text", "required": true },
                { "key": "photo", "label": "Photo", "type": "image" }
            ]
        })
    }

    #[tokio::test]
    async fn test_create_template_injects_place_field() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server
            .post("/api/template/create")
            .add_header("Authorization", auth_header()?)
            .json(&event_template_body())
            .await;
        response.assert_status(StatusCode::CREATED);

        let view = response.json::<TemplateView>();
        assert_eq!(view.name, "Event");
        assert_eq!(view.marker_icon, "calendar-star");
        assert_eq!(view.fixed_fields.len(), 1);
        assert_eq!(view.fixed_fields[0].key, "place");
        assert_eq!(view.dynamic_fields.len(), 2);
        assert!(view.dynamic_fields[0].required);
        assert!(!view.dynamic_fields[1].required);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_template_rejects_short_name() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let mut body = event_template_body();
        body["name"] = json!("Ev");

        let response = server
            .post("/api/template/create")
            .add_header("Authorization", auth_header()?)
            .json(&body)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({ "error": "Field 'name' must be at least 3 characters long" })
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_create_template_rejects_bad_marker_icon() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        for icon in ["Calendar", "star icon", ""] {
            let mut body = event_template_body();
            body["markerIcon"] = json!(icon);

            let response = server
                .post("/api/template/create")
                .add_header("Authorization", auth_header()?)
                .json(&body)
                .await;
            response.assert_status(StatusCode::BAD_REQUEST);
            assert!(response.text().contains("marker_icon"));
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_create_template_rejects_reserved_place_key() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let mut body = event_template_body();
        body["fields"] = json!([
            { "key": "place", "label": "Place", "type": "text" }
        ]);

        let response = server
            .post("/api/template/create")
            .add_header("Authorization", auth_header()?)
            .json(&body)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("reserved"));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_templates_empty_is_no_content() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server
            .get("/api/template/list")
            .add_header("Authorization", auth_header()?)
            .await;
        response.assert_status(StatusCode::NO_CONTENT);

        Ok(())
    }

    #[tokio::test]
    async fn test_template_round_trip() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server
            .post("/api/template/create")
            .add_header("Authorization", auth_header()?)
            .json(&event_template_body())
            .await;
        response.assert_status(StatusCode::CREATED);
        let created = response.json::<TemplateView>();

        let response = server
            .get("/api/template/list")
            .add_header("Authorization", auth_header()?)
            .await;
        response.assert_status_ok();
        let listed = response.json::<TemplateViews>();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);

        let response = server
            .delete(&format!("/api/template/{}", created.id))
            .add_header("Authorization", auth_header()?)
            .await;
        response.assert_status(StatusCode::NO_CONTENT);

        let response = server
            .get("/api/template/list")
            .add_header("Authorization", auth_header()?)
            .await;
        response.assert_status(StatusCode::NO_CONTENT);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_template_rejects_malformed_id() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server
            .delete("/api/template/not-a-uuid")
            .add_header("Authorization", auth_header()?)
            .await;
        response.assert_status_not_found();
        assert_eq!(
            response.json::<Value>(),
            json!({ "error": "Invalid Template ID" })
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_template_is_not_found() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server
            .delete(&format!("/api/template/{}", Uuid::new_v4()))
            .add_header("Authorization", auth_header()?)
            .await;
        response.assert_status_not_found();
        assert_eq!(
            response.json::<Value>(),
            json!({ "error": "Template not found" })
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_template_routes_require_authentication() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server.get("/api/template/list").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.json::<Value>(),
            json!({ "message": "No token provided" })
        );

        let response = server
            .get("/api/template/list")
            .add_header("Authorization", "Bearer not-a-real-token")
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.json::<Value>(),
            json!({ "message": "Invalid token" })
        );

        Ok(())
    }
}
