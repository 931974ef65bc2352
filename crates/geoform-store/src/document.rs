//! Typed JSON document collections.
//!
//! Each document is one JSON file at `{collection}/{id}.json`. Every
//! operation goes to the backend; nothing is cached. Concurrent writers
//! race at document granularity and the last write wins.

use std::marker::PhantomData;

use jiff::Timestamp;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::TRACING_TARGET;
use crate::backend::StorageBackend;
use crate::error::{StoreError, StoreResult};

/// A type persisted as one JSON document per id within a named collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    /// Collection the documents live under.
    const COLLECTION: &'static str;

    /// Identifier the document is keyed by.
    fn id(&self) -> Uuid;

    /// Creation time, used to order listings.
    fn created_at(&self) -> Timestamp;
}

/// Typed CRUD over one collection of JSON documents.
#[derive(Debug, Clone)]
pub struct DocumentStore<T> {
    backend: StorageBackend,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Document> DocumentStore<T> {
    /// Creates a store over the given backend.
    #[must_use]
    pub fn new(backend: StorageBackend) -> Self {
        Self {
            backend,
            _marker: PhantomData,
        }
    }

    fn path(id: Uuid) -> String {
        format!("{}/{id}.json", T::COLLECTION)
    }

    /// Writes a new document.
    pub async fn insert(&self, document: &T) -> StoreResult<()> {
        let path = Self::path(document.id());
        let data =
            serde_json::to_vec(document).map_err(|error| StoreError::codec(&path, error))?;
        self.backend.write(&path, &data).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            collection = T::COLLECTION,
            id = %document.id(),
            "document inserted"
        );

        Ok(())
    }

    /// Reads a document by id, `None` when absent.
    pub async fn find(&self, id: Uuid) -> StoreResult<Option<T>> {
        self.read_at(&Self::path(id)).await
    }

    /// Reads every document in the collection, oldest first.
    pub async fn find_all(&self) -> StoreResult<Vec<T>> {
        let prefix = format!("{}/", T::COLLECTION);
        let paths = match self.backend.list(&prefix).await {
            Ok(paths) => paths,
            // collection directory appears on first insert
            Err(error) if error.is_not_found() => return Ok(Vec::new()),
            Err(error) => return Err(error),
        };

        let reads = paths
            .iter()
            .filter(|path| path.ends_with(".json"))
            .map(|path| self.read_at(path));
        let mut documents: Vec<T> = futures::future::try_join_all(reads)
            .await?
            .into_iter()
            .flatten()
            .collect();

        documents.sort_by_key(|document| document.created_at());
        Ok(documents)
    }

    /// Reads every document matching the predicate, oldest first.
    pub async fn find_where<F>(&self, predicate: F) -> StoreResult<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        let mut documents = self.find_all().await?;
        documents.retain(|document| predicate(document));
        Ok(documents)
    }

    /// Overwrites an existing document.
    ///
    /// Fails with [`StoreError::NotFound`] when the document was never
    /// inserted or has been removed since.
    pub async fn replace(&self, document: &T) -> StoreResult<()> {
        let path = Self::path(document.id());
        if !self.backend.exists(&path).await? {
            return Err(StoreError::not_found(path));
        }

        let data =
            serde_json::to_vec(document).map_err(|error| StoreError::codec(&path, error))?;
        self.backend.write(&path, &data).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            collection = T::COLLECTION,
            id = %document.id(),
            "document replaced"
        );

        Ok(())
    }

    /// Deletes a document, reporting whether it existed.
    pub async fn remove(&self, id: Uuid) -> StoreResult<bool> {
        let path = Self::path(id);
        if !self.backend.exists(&path).await? {
            return Ok(false);
        }
        self.backend.delete(&path).await?;

        tracing::debug!(
            target: TRACING_TARGET,
            collection = T::COLLECTION,
            id = %id,
            "document removed"
        );

        Ok(true)
    }

    async fn read_at(&self, path: &str) -> StoreResult<Option<T>> {
        match self.backend.read(path).await {
            Ok(data) => serde_json::from_slice(&data)
                .map(Some)
                .map_err(|error| StoreError::codec(path, error)),
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(error),
        }
    }
}
