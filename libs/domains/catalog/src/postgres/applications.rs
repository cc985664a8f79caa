use async_trait::async_trait;
use database::{classify_db_err, SqlViolation};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect,
};
use uuid::Uuid;

use crate::entity::applications;
use crate::error::{CatalogError, CatalogResult};
use crate::keyset::{apply_cursor, SortDirection};
use crate::models::{Application, CreateApplication, UpdateApplication};
use crate::repository::ApplicationRepository;

pub struct PgApplicationRepository {
    db: DatabaseConnection,
}

impl PgApplicationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    async fn create(&self, input: CreateApplication) -> CatalogResult<Application> {
        let name = input.name.clone();
        let now = chrono::Utc::now();

        let active_model = applications::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            description: Set(input.description),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| match classify_db_err(&e) {
                SqlViolation::Unique => {
                    CatalogError::Conflict(format!("application name '{}' already exists", name))
                }
                _ => CatalogError::Database(e),
            })?;

        tracing::info!(application_id = %model.id, "Created application");
        Ok(model.into())
    }

    async fn list(
        &self,
        limit: u64,
        last_name: Option<String>,
    ) -> CatalogResult<Vec<Application>> {
        let query = apply_cursor(
            applications::Entity::find(),
            applications::Column::Name,
            SortDirection::Asc,
            last_name,
        )
        .limit(limit);

        let models = query.all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Application>> {
        let model = applications::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn get_by_name(&self, name: &str) -> CatalogResult<Option<Application>> {
        let model = applications::Entity::find()
            .filter(applications::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn update(&self, id: Uuid, input: UpdateApplication) -> CatalogResult<Application> {
        let model = applications::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("application {} not found", id)))?;

        let mut active_model: applications::ActiveModel = model.into();
        if let Some(name) = input.name {
            active_model.name = Set(name);
        }
        if let Some(description) = input.description {
            active_model.description = Set(Some(description));
        }
        active_model.updated_at = Set(chrono::Utc::now().into());

        let model = active_model
            .update(&self.db)
            .await
            .map_err(|e| match classify_db_err(&e) {
                SqlViolation::Unique => {
                    CatalogError::Conflict("application name already exists".to_string())
                }
                _ => CatalogError::Database(e),
            })?;

        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = applications::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| match classify_db_err(&e) {
                SqlViolation::ForeignKey => CatalogError::Conflict(format!(
                    "application {} still has versions; delete them first",
                    id
                )),
                _ => CatalogError::Database(e),
            })?;

        Ok(result.rows_affected > 0)
    }
}
