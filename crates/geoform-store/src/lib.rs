#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod backend;
mod collections;
mod config;
mod content_type;
mod document;
mod error;
mod files;

#[doc(hidden)]
pub mod prelude;

pub use backend::StorageBackend;
pub use config::{FsConfig, StorageConfig};
pub use content_type::content_type_for;
pub use document::{Document, DocumentStore};
pub use error::{StoreError, StoreResult};
pub use files::FileStore;

/// Tracing target for store operations.
pub const TRACING_TARGET: &str = "geoform_store";
