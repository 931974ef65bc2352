//! Application state and the services it is assembled from.

mod auth_keys;
mod error;
mod service_config;
mod service_state;

pub use crate::service::auth_keys::AuthKeys;
pub use crate::service::error::{Result, ServiceError};
pub use crate::service::service_config::ServiceConfig;
pub use crate::service::service_state::ServiceState;
