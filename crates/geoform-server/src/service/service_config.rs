use std::path::PathBuf;

use geoform_core::UnknownKeys;
use geoform_store::{StorageBackend, StorageConfig};
use serde::{Deserialize, Serialize};

use crate::service::auth_keys::AuthKeys;
use crate::service::{Result, ServiceError};

/// App [`state`] configuration.
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Root directory for persisted documents and uploaded files.
    pub data_dir: PathBuf,

    /// Shared secret used to sign and verify session tokens.
    pub auth_secret: String,

    /// Rejects submission keys the owning template does not declare.
    pub reject_unknown_fields: bool,
}

impl ServiceConfig {
    /// Validates all configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid:
    /// - Data directory must not be empty
    /// - Auth secret must not be empty
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ServiceError::config("data directory cannot be empty"));
        }

        if self.auth_secret.is_empty() {
            return Err(ServiceError::config("auth secret cannot be empty"));
        }

        if self.auth_secret.len() < 16 {
            tracing::warn!("auth secret is shorter than 16 bytes");
        }

        Ok(())
    }

    /// Opens the storage backend rooted at the configured data directory.
    ///
    /// The backend is probed once so a missing or unwritable directory
    /// fails at startup instead of on the first request.
    pub async fn connect_storage(&self) -> Result<StorageBackend> {
        let config = StorageConfig::fs(&self.data_dir);
        let backend = StorageBackend::new(config)
            .map_err(|e| ServiceError::storage_with_source("failed to open data directory", e))?;

        backend
            .check()
            .await
            .map_err(|e| ServiceError::storage_with_source("data directory is not usable", e))?;

        Ok(backend)
    }

    /// Derives the session signing keys from the configured secret.
    pub fn load_auth_keys(&self) -> Result<AuthKeys> {
        let keys = AuthKeys::from_secret(&self.auth_secret)?;
        keys.validate_keys()?;
        Ok(keys)
    }

    /// Returns the configured unknown-submission-key policy.
    #[inline]
    pub const fn unknown_keys(&self) -> UnknownKeys {
        if self.reject_unknown_fields {
            UnknownKeys::Reject
        } else {
            UnknownKeys::Allow
        }
    }
}

#[cfg(debug_assertions)]
impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".into(),
            auth_secret: "insecure-development-secret".to_owned(),
            reject_unknown_fields: false,
        }
    }
}
