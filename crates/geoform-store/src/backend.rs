//! Storage backend implementation.

use opendal::{Operator, services};

use crate::TRACING_TARGET;
use crate::config::StorageConfig;
use crate::error::{StoreError, StoreResult};

/// Unified storage backend that wraps OpenDAL operators.
#[derive(Clone)]
pub struct StorageBackend {
    operator: Operator,
    config: StorageConfig,
}

impl StorageBackend {
    /// Creates a new storage backend from configuration.
    pub fn new(config: StorageConfig) -> StoreResult<Self> {
        let operator = Self::create_operator(&config)?;

        tracing::info!(
            target: TRACING_TARGET,
            backend = config.backend_name(),
            "storage backend initialized"
        );

        Ok(Self { operator, config })
    }

    /// Returns the configuration for this backend.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Probes the backend for basic availability.
    pub async fn check(&self) -> StoreResult<()> {
        Ok(self.operator.check().await?)
    }

    /// Reads a file from storage.
    pub async fn read(&self, path: &str) -> StoreResult<Vec<u8>> {
        tracing::debug!(
            target: TRACING_TARGET,
            path = %path,
            "reading file"
        );

        let data = self.operator.read(path).await?.to_vec();

        Ok(data)
    }

    /// Writes data to a file in storage.
    pub async fn write(&self, path: &str, data: &[u8]) -> StoreResult<()> {
        tracing::debug!(
            target: TRACING_TARGET,
            path = %path,
            size = data.len(),
            "writing file"
        );

        self.operator.write(path, data.to_vec()).await?;

        Ok(())
    }

    /// Deletes a file from storage.
    pub async fn delete(&self, path: &str) -> StoreResult<()> {
        tracing::debug!(
            target: TRACING_TARGET,
            path = %path,
            "deleting file"
        );

        self.operator.delete(path).await?;

        Ok(())
    }

    /// Checks if a file exists.
    pub async fn exists(&self, path: &str) -> StoreResult<bool> {
        Ok(self.operator.exists(path).await?)
    }

    /// Lists file paths under a prefix.
    pub async fn list(&self, path: &str) -> StoreResult<Vec<String>> {
        use futures::TryStreamExt;

        let entries: Vec<_> = self.operator.lister(path).await?.try_collect().await?;

        Ok(entries.into_iter().map(|e| e.path().to_string()).collect())
    }

    /// Creates an OpenDAL operator based on configuration.
    fn create_operator(config: &StorageConfig) -> StoreResult<Operator> {
        match config {
            StorageConfig::Fs(fs) => {
                let builder = services::Fs::default().root(&fs.root.to_string_lossy());

                Operator::new(builder)
                    .map(|op| op.finish())
                    .map_err(|e| StoreError::init(e.to_string()))
            }
            StorageConfig::Memory => {
                let builder = services::Memory::default();

                Operator::new(builder)
                    .map(|op| op.finish())
                    .map_err(|e| StoreError::init(e.to_string()))
            }
        }
    }
}

impl std::fmt::Debug for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageBackend")
            .field("backend", &self.config.backend_name())
            .finish()
    }
}
