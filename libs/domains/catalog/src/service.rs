use std::sync::Arc;

use domain_semantic::{Embedder, InputKind};
use uuid::Uuid;
use validator::Validate;

use crate::allocator::VersionAllocator;
use crate::error::{CatalogError, CatalogResult};
use crate::keyset::page_size;
use crate::models::{
    Application, ApplicationVersion, Connector, CreateApplication, CreateConnector, CreateVersion,
    UpdateApplication,
};
use crate::repository::{ApplicationRepository, ConnectorRepository, VersionRepository};

/// Service layer for application business logic
#[derive(Clone)]
pub struct ApplicationService<R: ApplicationRepository> {
    repository: Arc<R>,
}

impl<R: ApplicationRepository> ApplicationService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn create_application(&self, input: CreateApplication) -> CatalogResult<Application> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    pub async fn list_applications(
        &self,
        limit: Option<u64>,
        last_name: Option<String>,
    ) -> CatalogResult<Vec<Application>> {
        let limit = page_size(limit)?;
        self.repository.list(limit, last_name).await
    }

    pub async fn get_application(&self, id: Uuid) -> CatalogResult<Application> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("application {} not found", id)))
    }

    pub async fn get_application_by_name(&self, name: &str) -> CatalogResult<Application> {
        self.repository
            .get_by_name(name)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("application '{}' not found", name)))
    }

    pub async fn update_application(
        &self,
        id: Uuid,
        input: UpdateApplication,
    ) -> CatalogResult<Application> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    pub async fn delete_application(&self, id: Uuid) -> CatalogResult<()> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(CatalogError::NotFound(format!(
                "application {} not found",
                id
            )));
        }
        Ok(())
    }
}

/// Service layer for version business logic.
///
/// Creation goes through the [`VersionAllocator`] so both the explicit and
/// the auto-allocated path share its conflict discipline.
#[derive(Clone)]
pub struct VersionService<R: VersionRepository> {
    repository: Arc<R>,
    allocator: VersionAllocator<R>,
}

impl<R: VersionRepository> VersionService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        let allocator = VersionAllocator::new(repository.clone());
        Self {
            repository,
            allocator,
        }
    }

    pub async fn create_version(
        &self,
        application_id: Uuid,
        input: CreateVersion,
    ) -> CatalogResult<ApplicationVersion> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        self.allocator.allocate(application_id, input.version).await
    }

    pub async fn list_versions(
        &self,
        application_id: Uuid,
        limit: Option<u64>,
        last_version: Option<i32>,
    ) -> CatalogResult<Vec<ApplicationVersion>> {
        let limit = page_size(limit)?;
        self.repository
            .list(application_id, limit, last_version)
            .await
    }

    pub async fn get_version(&self, id: Uuid) -> CatalogResult<ApplicationVersion> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("version {} not found", id)))
    }

    pub async fn get_version_by_number(
        &self,
        application_id: Uuid,
        version: i32,
    ) -> CatalogResult<ApplicationVersion> {
        self.repository
            .get_by_number(application_id, version)
            .await?
            .ok_or_else(|| {
                CatalogError::NotFound(format!(
                    "version {} not found for application {}",
                    version, application_id
                ))
            })
    }

    pub async fn get_latest_version(
        &self,
        application_id: Uuid,
    ) -> CatalogResult<ApplicationVersion> {
        self.repository
            .get_latest(application_id)
            .await?
            .ok_or_else(|| {
                CatalogError::NotFound(format!(
                    "application {} has no versions",
                    application_id
                ))
            })
    }

    pub async fn delete_version(&self, id: Uuid) -> CatalogResult<()> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(CatalogError::NotFound(format!("version {} not found", id)));
        }
        Ok(())
    }
}

/// Service layer for connector business logic.
///
/// Creation embeds the connector's description (or its name when no
/// description is given) before the insert transaction opens, then stores
/// the connector and its index row atomically.
#[derive(Clone)]
pub struct ConnectorService<R: ConnectorRepository, E: Embedder> {
    repository: Arc<R>,
    embedder: Arc<E>,
}

impl<R: ConnectorRepository, E: Embedder> ConnectorService<R, E> {
    pub fn new(repository: Arc<R>, embedder: Arc<E>) -> Self {
        Self {
            repository,
            embedder,
        }
    }

    pub async fn create_connector(
        &self,
        version_id: Uuid,
        input: CreateConnector,
    ) -> CatalogResult<Connector> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let indexed_text = input
            .description
            .clone()
            .unwrap_or_else(|| input.name.clone());

        let embedding = self
            .embedder
            .embed(&indexed_text, InputKind::Document)
            .await?;

        self.repository
            .create(version_id, input, indexed_text, embedding)
            .await
    }

    pub async fn list_connectors(
        &self,
        version_id: Uuid,
        limit: Option<u64>,
        last_name: Option<String>,
    ) -> CatalogResult<Vec<Connector>> {
        let limit = page_size(limit)?;
        self.repository
            .list_by_version(version_id, limit, last_name)
            .await
    }

    pub async fn list_connectors_by_name(
        &self,
        name: &str,
        limit: Option<u64>,
        last_version: Option<i32>,
    ) -> CatalogResult<Vec<Connector>> {
        let limit = page_size(limit)?;
        self.repository.list_by_name(name, limit, last_version).await
    }

    pub async fn get_connector(&self, id: Uuid) -> CatalogResult<Connector> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("connector {} not found", id)))
    }

    pub async fn get_connector_by_name(
        &self,
        version_id: Uuid,
        name: &str,
    ) -> CatalogResult<Connector> {
        self.repository
            .get_by_name(version_id, name)
            .await?
            .ok_or_else(|| {
                CatalogError::NotFound(format!(
                    "connector '{}' not found for version {}",
                    name, version_id
                ))
            })
    }

    pub async fn delete_connector(&self, id: Uuid) -> CatalogResult<()> {
        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(CatalogError::NotFound(format!(
                "connector {} not found",
                id
            )));
        }
        Ok(())
    }
}
