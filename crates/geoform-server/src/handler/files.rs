//! Stored file serving handlers.
//!
//! Rendered form responses point at these routes through the download
//! descriptors' `url` field. Handles are server-generated, so routes here
//! stay public and never see client-supplied path components.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use geoform_store::{FileStore, StoreError, content_type_for};

use crate::extract::{Json, Path};
use crate::handler::response::ErrorResponse;
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for file serving.
const TRACING_TARGET: &str = "geoform_server::handler::files";

/// Serves a stored file by handle.
#[tracing::instrument(skip_all, fields(file_name = %file_name))]
async fn download_file(
    State(files): State<FileStore>,
    Path(file_name): Path<String>,
) -> Result<Response> {
    tracing::debug!(target: TRACING_TARGET, "Serving file");

    let bytes = files
        .open(&file_name)
        .await
        .map_err(|err| {
            if matches!(err, StoreError::InvalidHandle(_)) {
                return ErrorKind::NotFound
                    .with_message("File not found")
                    .with_context(err.to_string());
            }
            tracing::error!(target: TRACING_TARGET, error = %err, "failed to read file");
            ErrorKind::InternalServerError.with_message("Failed to read file")
        })?
        .ok_or_else(|| ErrorKind::NotFound.with_message("File not found"))?;

    let content_type = content_type_for(&file_name);

    tracing::debug!(
        target: TRACING_TARGET,
        content_type = %content_type,
        size = bytes.len(),
        "File served",
    );

    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

fn download_file_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Download file")
        .description(
            "Returns a stored file by its handle. The content type is \
            inferred from the handle's extension.",
        )
        .response_with::<200, Vec<u8>, _>(|res| {
            res.description("File bytes with inferred content type.")
        })
        .response::<404, Json<ErrorResponse>>()
}

/// Returns a [`Router`] with all file-serving routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/files/{file_name}",
            get_with(download_file, download_file_docs),
        )
        .with_path_items(|item| item.tag("Files"))
}
