//! File materialization for validated submissions.

use geoform_core::{FieldValue, FormData};
use geoform_store::FileStore;

use crate::handler::Result;

const TRACING_TARGET: &str = "geoform_server::pipeline";

/// Writes every pending upload to file storage and swaps it for its handle.
///
/// Uploads within one submission are independent, so they are written
/// concurrently; entry order is preserved. A field either lands fully
/// written with a handle in its place or the whole stage fails. Files
/// already written when a later one fails stay behind as orphans, and the
/// caller must not persist the submission.
pub async fn materialize_uploads(files: &FileStore, data: FormData) -> Result<FormData> {
    let uploads = data.values().filter(|value| value.is_upload()).count();

    let futures: Vec<_> = data
        .into_iter()
        .map(|(key, value)| save_field(files, key, value))
        .collect();
    let results = futures::future::join_all(futures).await;

    let mut materialized = FormData::with_capacity(results.len());
    for result in results {
        let (key, value) = result?;
        materialized.insert(key, value);
    }

    if uploads > 0 {
        tracing::debug!(
            target: TRACING_TARGET,
            uploads,
            "materialized submission uploads"
        );
    }

    Ok(materialized)
}

async fn save_field(
    files: &FileStore,
    key: String,
    value: FieldValue,
) -> Result<(String, FieldValue)> {
    match value {
        FieldValue::Upload(upload) => {
            let handle = files.save(&upload.file_name, &upload.bytes).await?;
            Ok((key, FieldValue::FileRef(handle)))
        }
        other => Ok((key, other)),
    }
}
