//! Application state and dependency injection.

use geoform_core::{Form, Template, UnknownKeys};
use geoform_store::{DocumentStore, FileStore, StorageBackend};

use crate::service::auth_keys::AuthKeys;
use crate::service::{Result, ServiceConfig};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection). All fields
/// share one storage backend; cloning the state is cheap.
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    storage_backend: StorageBackend,
    template_store: DocumentStore<Template>,
    form_store: DocumentStore<Form>,
    file_store: FileStore,

    auth_keys: AuthKeys,
    unknown_keys: UnknownKeys,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Opens the storage backend and loads required resources.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;
        let storage_backend = config.connect_storage().await?;

        let service_state = Self {
            template_store: DocumentStore::new(storage_backend.clone()),
            form_store: DocumentStore::new(storage_backend.clone()),
            file_store: FileStore::new(storage_backend.clone()),
            storage_backend,

            auth_keys: config.load_auth_keys()?,
            unknown_keys: config.unknown_keys(),
        };

        Ok(service_state)
    }
}

#[cfg(test)]
impl Default for ServiceState {
    /// Builds a memory-backed state for handler tests.
    fn default() -> Self {
        use geoform_store::StorageConfig;

        let storage_backend =
            StorageBackend::new(StorageConfig::memory()).expect("memory backend is infallible");

        Self {
            template_store: DocumentStore::new(storage_backend.clone()),
            form_store: DocumentStore::new(storage_backend.clone()),
            file_store: FileStore::new(storage_backend.clone()),
            storage_backend,

            auth_keys: AuthKeys::from_secret("handler-test-secret").expect("non-empty secret"),
            unknown_keys: UnknownKeys::Allow,
        }
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(storage_backend: StorageBackend);
impl_di!(template_store: DocumentStore<Template>);
impl_di!(form_store: DocumentStore<Form>);
impl_di!(file_store: FileStore);

impl_di!(auth_keys: AuthKeys);
impl_di!(unknown_keys: UnknownKeys);
