use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// An application in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Application {
    /// Unique identifier
    pub id: Uuid,
    /// Application name (unique across the catalog)
    pub name: String,
    /// Optional human-readable description
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// A numbered version of an application.
///
/// Versions are immutable after creation; there is no update operation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationVersion {
    pub id: Uuid,
    pub application_id: Uuid,
    /// Version number, positive and unique per application
    pub version: i32,
    pub created_at: DateTime<Utc>,
}

/// A connector attached to an application version.
///
/// Immutable after creation; its embedding index row is written in the
/// same transaction.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Connector {
    pub id: Uuid,
    pub version_id: Uuid,
    /// Connector name, unique within its version
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a new application
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateApplication {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating an existing application
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateApplication {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// DTO for creating a version.
///
/// With `version` set, that exact number is inserted (conflict if taken).
/// Without it, the next free number is allocated.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateVersion {
    #[validate(range(min = 1))]
    pub version: Option<i32>,
}

/// DTO for creating a connector
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateConnector {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
}

/// Query parameters for listing applications, ordered by name ascending
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ListApplicationsQuery {
    /// Page size, 1 to 100 (default 20)
    pub limit: Option<u64>,
    /// Return applications whose name sorts strictly after this value
    pub last_name: Option<String>,
}

/// Query parameters for listing versions, ordered by version descending
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ListVersionsQuery {
    /// Page size, 1 to 100 (default 20)
    pub limit: Option<u64>,
    /// Return versions strictly lower than this value
    pub last_version: Option<i32>,
}

/// Query parameters for listing connectors of a version, by name ascending
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ListConnectorsQuery {
    /// Page size, 1 to 100 (default 20)
    pub limit: Option<u64>,
    /// Return connectors whose name sorts strictly after this value
    pub last_name: Option<String>,
}

/// Query parameters for listing same-named connectors across versions,
/// by version number descending
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ListConnectorsByNameQuery {
    /// Page size, 1 to 100 (default 20)
    pub limit: Option<u64>,
    /// Return connectors of versions strictly lower than this value
    pub last_version: Option<i32>,
}
