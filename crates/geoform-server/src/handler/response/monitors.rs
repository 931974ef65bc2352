//! Monitor response types.

use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Overall service health.
///
/// The health route itself answering is what "ok" attests; a degraded
/// dependency shows up in its own field, not here.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[derive(AsRefStr, Display, Serialize, Deserialize, JsonSchema)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ServiceHealth {
    /// The service is up and answering.
    #[default]
    Ok,
    /// The service is up but impaired.
    Error,
}

/// Reachability of the storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(AsRefStr, Display, Serialize, Deserialize, JsonSchema)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DatabaseHealth {
    /// The backend answered a probe.
    Connected,
    /// The probe failed.
    Disconnected,
}

impl DatabaseHealth {
    /// Collapses a probe result into a health label.
    pub fn from_probe<T, E>(probe: &Result<T, E>) -> Self {
        match probe {
            Ok(_) => Self::Connected,
            Err(_) => Self::Disconnected,
        }
    }
}

/// Service health response.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// Overall service health.
    pub status: ServiceHealth,
    /// Timestamp when this status was generated.
    pub checked_at: Timestamp,
    /// Reachability of the storage backend.
    pub database: DatabaseHealth,
}

impl HealthStatus {
    /// Creates a new instance of [`HealthStatus`] checked now.
    pub fn new(database: DatabaseHealth) -> Self {
        Self {
            status: ServiceHealth::Ok,
            checked_at: Timestamp::now(),
            database,
        }
    }
}

/// Service health response for authenticated callers.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthHealthStatus {
    /// Overall service health.
    pub status: ServiceHealth,
    /// Health of the caller's authentication token.
    pub authorization: ServiceHealth,
    /// Timestamp when this status was generated.
    pub checked_at: Timestamp,
    /// Reachability of the storage backend.
    pub database: DatabaseHealth,
}

impl AuthHealthStatus {
    /// Creates a new instance of [`AuthHealthStatus`] checked now.
    ///
    /// Reaching this constructor means the token already verified, so the
    /// authorization field is always healthy.
    pub fn new(database: DatabaseHealth) -> Self {
        Self {
            status: ServiceHealth::Ok,
            authorization: ServiceHealth::Ok,
            checked_at: Timestamp::now(),
            database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_wire_shape() {
        let json = serde_json::to_value(HealthStatus::new(DatabaseHealth::Connected)).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["database"], "connected");
        assert!(json.get("checkedAt").is_some());
    }

    #[test]
    fn test_auth_health_adds_authorization() {
        let json =
            serde_json::to_value(AuthHealthStatus::new(DatabaseHealth::Disconnected)).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["authorization"], "ok");
        assert_eq!(json["database"], "disconnected");
    }

    #[test]
    fn test_probe_mapping() {
        assert_eq!(
            DatabaseHealth::from_probe::<(), &str>(&Ok(())),
            DatabaseHealth::Connected
        );
        assert_eq!(
            DatabaseHealth::from_probe::<(), &str>(&Err("storage offline")),
            DatabaseHealth::Disconnected
        );
    }
}
