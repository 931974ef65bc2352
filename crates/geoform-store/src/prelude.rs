//! Prelude module for convenient imports.

pub use crate::backend::StorageBackend;
pub use crate::config::{FsConfig, StorageConfig};
pub use crate::content_type::content_type_for;
pub use crate::document::{Document, DocumentStore};
pub use crate::error::{StoreError, StoreResult};
pub use crate::files::FileStore;
