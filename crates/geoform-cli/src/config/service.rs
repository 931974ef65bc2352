//! Service configuration with CLI argument parsing.
//!
//! This module provides a CLI-friendly configuration struct with clap
//! attributes that converts to the plain server configuration type.
//!
//! # Usage Examples
//!
//! ```bash
//! # Basic usage with a custom data directory
//! geoform-cli --data-dir /var/lib/geoform
//!
//! # Strict schema validation for form submissions
//! geoform-cli --reject-unknown-fields
//! ```
//!
//! ```bash
//! export DATA_DIR="/var/lib/geoform"
//! export AUTH_SECRET="a-long-random-secret"
//!
//! geoform-cli
//! ```

use std::path::PathBuf;

use clap::Args;
use geoform_server::service::ServiceConfig as ServerServiceConfig;
use serde::{Deserialize, Serialize};

/// CLI service configuration with command-line argument parsing.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Directory where uploaded files are stored.
    #[arg(short = 'd', long, env = "DATA_DIR")]
    #[arg(default_value = "./data")]
    pub data_dir: PathBuf,

    /// Secret used to verify JWT bearer tokens (HS256).
    ///
    /// The default is only suitable for local development. Production
    /// deployments must provide their own secret of at least 16 bytes.
    #[arg(long, env = "AUTH_SECRET")]
    #[arg(default_value = "insecure-development-secret")]
    pub auth_secret: String,

    /// Rejects form submissions containing fields not defined by the template.
    ///
    /// By default unknown fields are stripped from the submission.
    #[arg(long, env = "REJECT_UNKNOWN_FIELDS")]
    pub reject_unknown_fields: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".into(),
            auth_secret: "insecure-development-secret".to_owned(),
            reject_unknown_fields: false,
        }
    }
}

impl From<ServiceConfig> for ServerServiceConfig {
    fn from(cli_config: ServiceConfig) -> Self {
        Self {
            data_dir: cli_config.data_dir,
            auth_secret: cli_config.auth_secret,
            reject_unknown_fields: cli_config.reject_unknown_fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_service_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert!(!config.reject_unknown_fields);
    }

    #[test]
    fn service_config_conversion() {
        let cli_config = ServiceConfig {
            data_dir: "/var/lib/geoform".into(),
            auth_secret: "a-long-random-secret".to_owned(),
            reject_unknown_fields: true,
        };

        let server_config: ServerServiceConfig = cli_config.into();
        assert_eq!(server_config.data_dir, PathBuf::from("/var/lib/geoform"));
        assert_eq!(server_config.auth_secret, "a-long-random-secret");
        assert!(server_config.reject_unknown_fields);
    }

    #[test]
    fn converted_default_passes_validation() {
        let server_config: ServerServiceConfig = ServiceConfig::default().into();
        assert!(server_config.validate().is_ok());
    }
}
