//! Storage configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Storage backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Local filesystem rooted at a directory.
    Fs(FsConfig),
    /// In-memory storage, scoped to the process. Backs tests.
    Memory,
}

/// Filesystem backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FsConfig {
    /// Directory documents and uploaded files live under.
    pub root: PathBuf,
}

impl StorageConfig {
    /// Filesystem storage rooted at the given directory.
    #[must_use]
    pub fn fs(root: impl Into<PathBuf>) -> Self {
        Self::Fs(FsConfig { root: root.into() })
    }

    /// In-memory storage.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory
    }

    /// Returns the backend name as a static string.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Fs(_) => "fs",
            Self::Memory => "memory",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_names() {
        assert_eq!(StorageConfig::fs("/tmp/geoform").backend_name(), "fs");
        assert_eq!(StorageConfig::memory().backend_name(), "memory");
    }

    #[test]
    fn test_config_serde_tagging() {
        let config = StorageConfig::fs("/var/lib/geoform");
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["type"], "fs");
        assert_eq!(json["root"], "/var/lib/geoform");

        let memory: StorageConfig = serde_json::from_value(serde_json::json!({
            "type": "memory"
        }))
        .unwrap();
        assert_eq!(memory, StorageConfig::Memory);
    }
}
