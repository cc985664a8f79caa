use async_trait::async_trait;
use domain_semantic::Embedding;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{
    Application, ApplicationVersion, Connector, CreateApplication, CreateConnector,
    UpdateApplication,
};

/// Repository trait for application persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Create a new application; duplicate name is a conflict
    async fn create(&self, input: CreateApplication) -> CatalogResult<Application>;

    /// List applications by name ascending, starting strictly after the cursor
    async fn list(&self, limit: u64, last_name: Option<String>)
        -> CatalogResult<Vec<Application>>;

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Application>>;

    async fn get_by_name(&self, name: &str) -> CatalogResult<Option<Application>>;

    async fn update(&self, id: Uuid, input: UpdateApplication) -> CatalogResult<Application>;

    /// Delete an application; returns false when it does not exist.
    /// Deleting an application that still has versions is a conflict.
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}

/// Repository trait for version persistence.
///
/// Separates the two insert disciplines so the allocator's retry loop can
/// be tested against a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VersionRepository: Send + Sync {
    /// Insert a version with an explicit number.
    ///
    /// Duplicate `(application, version)` is a conflict; a missing
    /// application is not found. Never retried.
    async fn insert_explicit(
        &self,
        application_id: Uuid,
        version: i32,
    ) -> CatalogResult<ApplicationVersion>;

    /// Insert the next free version number for an application.
    ///
    /// Runs `MAX(version) + 1` and the insert as one statement inside a
    /// serializable transaction. Fails with
    /// [`CatalogError::SerializationConflict`](crate::error::CatalogError)
    /// when a concurrent allocation wins.
    async fn insert_next(&self, application_id: Uuid) -> CatalogResult<ApplicationVersion>;

    /// List versions of an application by number descending, starting
    /// strictly below the cursor
    async fn list(
        &self,
        application_id: Uuid,
        limit: u64,
        last_version: Option<i32>,
    ) -> CatalogResult<Vec<ApplicationVersion>>;

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<ApplicationVersion>>;

    async fn get_by_number(
        &self,
        application_id: Uuid,
        version: i32,
    ) -> CatalogResult<Option<ApplicationVersion>>;

    /// Highest version number of an application, if any versions exist
    async fn get_latest(&self, application_id: Uuid)
        -> CatalogResult<Option<ApplicationVersion>>;

    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}

/// Repository trait for connector persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectorRepository: Send + Sync {
    /// Create a connector together with its embedding index row, atomically.
    ///
    /// `indexed_text` is the text the embedding was computed from.
    async fn create(
        &self,
        version_id: Uuid,
        input: CreateConnector,
        indexed_text: String,
        embedding: Embedding,
    ) -> CatalogResult<Connector>;

    /// List connectors of a version by name ascending
    async fn list_by_version(
        &self,
        version_id: Uuid,
        limit: u64,
        last_name: Option<String>,
    ) -> CatalogResult<Vec<Connector>>;

    /// List same-named connectors across all versions, by version number
    /// descending
    async fn list_by_name(
        &self,
        name: &str,
        limit: u64,
        last_version: Option<i32>,
    ) -> CatalogResult<Vec<Connector>>;

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Connector>>;

    async fn get_by_name(&self, version_id: Uuid, name: &str)
        -> CatalogResult<Option<Connector>>;

    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}
