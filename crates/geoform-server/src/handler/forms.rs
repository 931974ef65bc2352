//! Form submission handlers.
//!
//! Submissions arrive as `multipart/form-data` with dot-notation part
//! names, get validated against their template's schema, and are stored
//! with uploads swapped for file handles. Responses render those handles
//! back into download descriptors.

use std::collections::{HashMap, HashSet};

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use geoform_core::{Form, Issue, JsonObject, PathSegment, Template, UnknownKeys, decode_parts};
use geoform_store::{DocumentStore, FileStore};
use uuid::Uuid;

use crate::extract::{Json, Multipart, Path};
use crate::handler::response::{
    ErrorResponse, FormView, FormViews, UnauthorizedResponse, ValidationErrorResponse,
};
use crate::handler::{Error, ErrorKind, Result};
use crate::pipeline::{
    STATUS_PART, materialize_uploads, read_parts, take_template_id, validate_submission,
};
use crate::service::ServiceState;

/// Tracing target for form operations.
const TRACING_TARGET: &str = "geoform_server::handler::forms";

/// Creates a form from a multipart submission.
///
/// The body routes itself: the `templateId` part names the template the
/// remaining parts are validated against. `status` is required here and
/// immutable afterwards.
#[tracing::instrument(skip_all)]
async fn create_form(
    State(templates): State<DocumentStore<Template>>,
    State(forms): State<DocumentStore<Form>>,
    State(files): State<FileStore>,
    State(unknown_keys): State<UnknownKeys>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<FormView>)> {
    tracing::debug!(target: TRACING_TARGET, "Creating form");

    let parts = read_parts(multipart.into_inner()).await?;
    let mut candidate = decode_parts(parts);

    let template_id = take_template_id(&mut candidate).ok_or_else(|| {
        ErrorKind::NotFound
            .with_message("Invalid Template ID")
            .with_context("submission carries no templateId part")
    })?;
    let Ok(template_id) = template_id.parse::<Uuid>() else {
        return Err(ErrorKind::NotFound
            .with_message("Invalid Template ID")
            .with_context(format!("malformed template id: {template_id}")));
    };

    let template = templates.find(template_id).await.map_err(|err| {
        tracing::error!(target: TRACING_TARGET, error = %err, "failed to load template");
        ErrorKind::InternalServerError.with_message("Failed to create form")
    })?;
    let Some(template) = template else {
        return Err(ErrorKind::NotFound.with_message("Template not found"));
    };

    let submission =
        validate_submission(&template, candidate, unknown_keys).map_err(Error::validation)?;
    let Some(status) = submission.status else {
        return Err(Error::validation(vec![Issue::missing([PathSegment::key(
            STATUS_PART,
        )])]));
    };

    let data = materialize_uploads(&files, submission.data).await?;
    let data: JsonObject = data
        .into_iter()
        .map(|(key, value)| (key, value.into_json()))
        .collect();

    let form = Form::new(template.id, status, data);
    forms.insert(&form).await.map_err(|err| {
        tracing::error!(target: TRACING_TARGET, error = %err, "failed to insert form");
        ErrorKind::InternalServerError.with_message("Failed to create form")
    })?;

    tracing::info!(
        target: TRACING_TARGET,
        form_id = %form.id,
        template_id = %form.template_id,
        "Form created",
    );

    Ok((StatusCode::CREATED, Json(FormView::rendered(form, &template))))
}

fn create_form_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create form")
        .description(
            "Creates a form from a multipart submission. Parts are decoded \
            from dot notation and validated against the template named by \
            the templateId part.",
        )
        .response::<201, Json<FormView>>()
        .response::<400, Json<ValidationErrorResponse>>()
        .response::<401, Json<UnauthorizedResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns all forms, oldest first.
///
/// Each form renders against its owning template; forms whose template
/// was deleted fall back to the stored data as-is.
#[tracing::instrument(skip_all)]
async fn list_forms(
    State(templates): State<DocumentStore<Template>>,
    State(forms): State<DocumentStore<Form>>,
) -> Result<Response> {
    tracing::debug!(target: TRACING_TARGET, "Listing forms");

    let forms = forms.find_all().await.map_err(|err| {
        tracing::error!(target: TRACING_TARGET, error = %err, "failed to list forms");
        ErrorKind::InternalServerError.with_message("Failed to list forms")
    })?;

    if forms.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let referenced: HashSet<Uuid> = forms.iter().map(|form| form.template_id).collect();
    let templates: HashMap<Uuid, Template> = templates
        .find_where(|template| referenced.contains(&template.id))
        .await
        .map_err(|err| {
            tracing::error!(target: TRACING_TARGET, error = %err, "failed to load templates");
            ErrorKind::InternalServerError.with_message("Failed to list forms")
        })?
        .into_iter()
        .map(|template| (template.id, template))
        .collect();

    let views: FormViews = forms
        .into_iter()
        .map(|form| match templates.get(&form.template_id) {
            Some(template) => FormView::rendered(form, template),
            None => FormView::from_model(form),
        })
        .collect();

    tracing::debug!(
        target: TRACING_TARGET,
        form_count = views.len(),
        "Forms listed",
    );

    Ok((StatusCode::OK, Json(views)).into_response())
}

fn list_forms_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List forms")
        .description(
            "Returns all forms, oldest first. Attachment fields render as \
            download descriptors; forms whose template was deleted carry \
            their stored data as-is.",
        )
        .response::<200, Json<FormViews>>()
        .response_with::<204, (), _>(|res| res.description("No forms exist."))
        .response::<401, Json<UnauthorizedResponse>>()
}

/// Returns all forms submitted against one template.
#[tracing::instrument(skip_all, fields(template_id = %id))]
async fn forms_by_template(
    State(templates): State<DocumentStore<Template>>,
    State(forms): State<DocumentStore<Form>>,
    Path(id): Path<String>,
) -> Result<Response> {
    tracing::debug!(target: TRACING_TARGET, "Listing forms by template");

    let Ok(id) = id.parse::<Uuid>() else {
        return Err(ErrorKind::NotFound
            .with_message("Invalid Template ID")
            .with_context(format!("malformed template id: {id}")));
    };

    let template = templates
        .find(id)
        .await
        .map_err(|err| {
            tracing::error!(target: TRACING_TARGET, error = %err, "failed to load template");
            ErrorKind::InternalServerError.with_message("Failed to list forms by template")
        })?
        .ok_or_else(|| ErrorKind::NotFound.with_message("Template not found"))?;

    let forms = forms
        .find_where(|form| form.template_id == template.id)
        .await
        .map_err(|err| {
            tracing::error!(target: TRACING_TARGET, error = %err, "failed to list forms");
            ErrorKind::InternalServerError.with_message("Failed to list forms by template")
        })?;

    if forms.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let views: FormViews = forms
        .into_iter()
        .map(|form| FormView::rendered(form, &template))
        .collect();

    tracing::debug!(
        target: TRACING_TARGET,
        form_count = views.len(),
        "Forms listed by template",
    );

    Ok((StatusCode::OK, Json(views)).into_response())
}

fn forms_by_template_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List forms by template")
        .description("Returns all forms submitted against the given template, oldest first.")
        .response::<200, Json<FormViews>>()
        .response_with::<204, (), _>(|res| res.description("No forms reference this template."))
        .response::<401, Json<UnauthorizedResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Replaces a form's data from a new multipart submission.
///
/// The body is validated against the owning template. The lifecycle
/// status is fixed at create time, so a `status` part here is dropped.
#[tracing::instrument(skip_all, fields(form_id = %id))]
async fn update_form(
    State(templates): State<DocumentStore<Template>>,
    State(forms): State<DocumentStore<Form>>,
    State(files): State<FileStore>,
    State(unknown_keys): State<UnknownKeys>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<FormView>> {
    tracing::debug!(target: TRACING_TARGET, "Updating form");

    let Ok(id) = id.parse::<Uuid>() else {
        return Err(ErrorKind::NotFound
            .with_message("Invalid Form ID")
            .with_context(format!("malformed form id: {id}")));
    };

    let form = forms.find(id).await.map_err(|err| {
        tracing::error!(target: TRACING_TARGET, error = %err, "failed to load form");
        ErrorKind::InternalServerError.with_message("Failed to update form")
    })?;
    let Some(mut form) = form else {
        return Err(ErrorKind::NotFound.with_message("Form not found"));
    };

    let template = templates
        .find(form.template_id)
        .await
        .map_err(|err| {
            tracing::error!(target: TRACING_TARGET, error = %err, "failed to load template");
            ErrorKind::InternalServerError.with_message("Failed to update form")
        })?
        .ok_or_else(|| ErrorKind::NotFound.with_message("Template not found"))?;

    let parts = read_parts(multipart.into_inner()).await?;
    let submission = validate_submission(&template, decode_parts(parts), unknown_keys)
        .map_err(Error::validation)?;

    let data = materialize_uploads(&files, submission.data).await?;
    let data: JsonObject = data
        .into_iter()
        .map(|(key, value)| (key, value.into_json()))
        .collect();

    form.replace_data(data);
    forms.replace(&form).await.map_err(|err| {
        if err.is_not_found() {
            return ErrorKind::NotFound.with_message("Form not found");
        }
        tracing::error!(target: TRACING_TARGET, error = %err, "failed to replace form");
        ErrorKind::InternalServerError.with_message("Failed to update form")
    })?;

    tracing::info!(target: TRACING_TARGET, "Form updated");

    Ok(Json(FormView::rendered(form, &template)))
}

fn update_form_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update form")
        .description(
            "Replaces a form's data from a new multipart submission validated \
            against the owning template. The lifecycle status is kept.",
        )
        .response::<200, Json<FormView>>()
        .response::<400, Json<ValidationErrorResponse>>()
        .response::<401, Json<UnauthorizedResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Deletes a form by ID.
#[tracing::instrument(skip_all, fields(form_id = %id))]
async fn delete_form(
    State(forms): State<DocumentStore<Form>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    tracing::debug!(target: TRACING_TARGET, "Deleting form");

    let Ok(id) = id.parse::<Uuid>() else {
        return Err(ErrorKind::NotFound
            .with_message("Invalid Form ID")
            .with_context(format!("malformed form id: {id}")));
    };

    let removed = forms.remove(id).await.map_err(|err| {
        tracing::error!(target: TRACING_TARGET, error = %err, "failed to remove form");
        ErrorKind::InternalServerError.with_message("Failed to delete form")
    })?;

    if !removed {
        return Err(ErrorKind::NotFound.with_message("Form not found"));
    }

    tracing::info!(target: TRACING_TARGET, "Form deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn delete_form_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete form")
        .description("Deletes a form by ID. Files it references stay in storage.")
        .response_with::<204, (), _>(|res| res.description("Form deleted."))
        .response::<401, Json<UnauthorizedResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all form-related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/form/create", post_with(create_form, create_form_docs))
        .api_route("/form/list", get_with(list_forms, list_forms_docs))
        .api_route(
            "/form/template/{template_id}",
            get_with(forms_by_template, forms_by_template_docs),
        )
        .api_route(
            "/form/{id}",
            put_with(update_form, update_form_docs).delete_with(delete_form, delete_form_docs),
        )
        .with_path_items(|item| item.tag("Forms"))
}
