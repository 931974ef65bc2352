//! Flat file storage for submission uploads.

use bytes::Bytes;
use uuid::Uuid;

use crate::TRACING_TARGET;
use crate::backend::StorageBackend;
use crate::error::{StoreError, StoreResult};

/// Prefix uploads live under within the backend.
const FILES_PREFIX: &str = "files";

/// Longest extension carried over from a client file name.
const MAX_EXTENSION_LEN: usize = 16;

/// Flat storage for uploaded files, keyed by generated handles.
///
/// A handle is a fresh UUID with the client file name's extension
/// appended, so `report.pdf` is stored under something like
/// `8f8e6f1e-….pdf`. Client names never reach the backend.
#[derive(Debug, Clone)]
pub struct FileStore {
    backend: StorageBackend,
}

impl FileStore {
    /// Creates a file store over the given backend.
    #[must_use]
    pub fn new(backend: StorageBackend) -> Self {
        Self { backend }
    }

    /// Saves a payload under a fresh handle and returns the handle.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> StoreResult<String> {
        let handle = Self::handle_for(original_name);
        let path = format!("{FILES_PREFIX}/{handle}");
        self.backend.write(&path, data).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            handle = %handle,
            size = data.len(),
            "file saved"
        );

        Ok(handle)
    }

    /// Reads a file back by handle, `None` when absent.
    pub async fn open(&self, handle: &str) -> StoreResult<Option<Bytes>> {
        validate_handle(handle)?;
        let path = format!("{FILES_PREFIX}/{handle}");
        match self.backend.read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Whether a handle resolves to a stored file.
    pub async fn exists(&self, handle: &str) -> StoreResult<bool> {
        validate_handle(handle)?;
        self.backend.exists(&format!("{FILES_PREFIX}/{handle}")).await
    }

    fn handle_for(original_name: &str) -> String {
        let id = Uuid::new_v4();
        let extension = std::path::Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| {
                ext.len() <= MAX_EXTENSION_LEN
                    && ext.chars().all(|ch| ch.is_ascii_alphanumeric())
            });
        match extension {
            Some(ext) => format!("{id}.{ext}"),
            None => id.to_string(),
        }
    }
}

/// Rejects handles that could escape the flat namespace.
fn validate_handle(handle: &str) -> StoreResult<()> {
    if handle.is_empty()
        || handle.contains('/')
        || handle.contains('\\')
        || handle.contains("..")
        || handle.starts_with('.')
    {
        return Err(StoreError::invalid_handle(handle));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;

    fn store() -> FileStore {
        FileStore::new(StorageBackend::new(StorageConfig::memory()).unwrap())
    }

    #[tokio::test]
    async fn test_save_then_open_round_trip() {
        let store = store();
        let handle = store.save("photo.png", b"\x89PNG....").await.unwrap();

        let data = store.open(&handle).await.unwrap().unwrap();
        assert_eq!(&data[..], b"\x89PNG....");
        assert!(store.exists(&handle).await.unwrap());
    }

    #[tokio::test]
    async fn test_handle_keeps_extension_only() {
        let store = store();
        let handle = store.save("trip report.pdf", b"%PDF").await.unwrap();

        assert!(handle.ends_with(".pdf"));
        assert_eq!(handle.len(), 36 + ".pdf".len());
        assert!(!handle.contains("trip"));
    }

    #[tokio::test]
    async fn test_handle_without_extension_is_bare_uuid() {
        let store = store();
        let handle = store.save("README", b"hi").await.unwrap();
        assert_eq!(handle.len(), 36);
        assert!(!handle.contains('.'));
    }

    #[tokio::test]
    async fn test_two_saves_never_collide() {
        let store = store();
        let first = store.save("a.txt", b"1").await.unwrap();
        let second = store.save("a.txt", b"2").await.unwrap();
        assert_ne!(first, second);
        assert_eq!(&store.open(&first).await.unwrap().unwrap()[..], b"1");
    }

    #[tokio::test]
    async fn test_open_missing_is_none() {
        let store = store();
        let handle = FileStore::handle_for("ghost.txt");
        assert!(store.open(&handle).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_traversal_handles_are_rejected() {
        let store = store();
        for handle in ["../secret", "a/b.txt", "..", ".hidden", ""] {
            assert!(store.open(handle).await.is_err(), "accepted {handle:?}");
        }
    }

    #[tokio::test]
    async fn test_suspicious_extension_is_dropped() {
        let store = store();
        let handle = store.save("weird.a\\b", b"x").await.unwrap();
        assert_eq!(handle.len(), 36);
    }
}
