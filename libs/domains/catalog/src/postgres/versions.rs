use async_trait::async_trait;
use database::{classify_db_err, SqlViolation};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, FromQueryResult, IsolationLevel, QueryFilter, QueryOrder, QuerySelect, Statement,
    TransactionTrait,
};
use uuid::Uuid;

use crate::entity::versions;
use crate::error::{CatalogError, CatalogResult};
use crate::keyset::{apply_cursor, SortDirection};
use crate::models::ApplicationVersion;
use crate::repository::VersionRepository;

pub struct PgVersionRepository {
    db: DatabaseConnection,
}

impl PgVersionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn map_insert_err(e: DbErr, application_id: Uuid) -> CatalogError {
    match classify_db_err(&e) {
        SqlViolation::Serialization => CatalogError::SerializationConflict,
        SqlViolation::ForeignKey => {
            CatalogError::NotFound(format!("application {} not found", application_id))
        }
        _ => CatalogError::Database(e),
    }
}

#[async_trait]
impl VersionRepository for PgVersionRepository {
    async fn insert_explicit(
        &self,
        application_id: Uuid,
        version: i32,
    ) -> CatalogResult<ApplicationVersion> {
        let active_model = versions::ActiveModel {
            id: Set(Uuid::now_v7()),
            application_id: Set(application_id),
            version: Set(version),
            created_at: Set(chrono::Utc::now().into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| match classify_db_err(&e) {
                SqlViolation::Unique => CatalogError::Conflict(format!(
                    "version {} already exists for application {}",
                    version, application_id
                )),
                SqlViolation::ForeignKey => {
                    CatalogError::NotFound(format!("application {} not found", application_id))
                }
                _ => CatalogError::Database(e),
            })?;

        tracing::info!(version_id = %model.id, version, "Created version");
        Ok(model.into())
    }

    async fn insert_next(&self, application_id: Uuid) -> CatalogResult<ApplicationVersion> {
        // MAX + 1 and the insert are one statement, so the serializable
        // transaction covers the whole read-compute-write cycle.
        let txn = self
            .db
            .begin_with_config(Some(IsolationLevel::Serializable), None)
            .await?;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            INSERT INTO application_versions (id, application_id, version, created_at)
            SELECT $1, $2, COALESCE(MAX(version), 0) + 1, $3
            FROM application_versions
            WHERE application_id = $2
            RETURNING id, application_id, version, created_at
            "#,
            [
                Uuid::now_v7().into(),
                application_id.into(),
                chrono::Utc::now().into(),
            ],
        );

        let row = match txn.query_one_raw(stmt).await {
            Ok(row) => row,
            Err(e) => return Err(map_insert_err(e, application_id)),
        };

        let row = row.ok_or_else(|| {
            CatalogError::Database(DbErr::Custom(
                "version allocation returned no row".to_string(),
            ))
        })?;
        let model = versions::Model::from_query_result(&row, "")?;

        // A racing allocation can also surface at commit
        if let Err(e) = txn.commit().await {
            return Err(map_insert_err(e, application_id));
        }

        tracing::info!(version_id = %model.id, version = model.version, "Allocated version");
        Ok(model.into())
    }

    async fn list(
        &self,
        application_id: Uuid,
        limit: u64,
        last_version: Option<i32>,
    ) -> CatalogResult<Vec<ApplicationVersion>> {
        let query = apply_cursor(
            versions::Entity::find().filter(versions::Column::ApplicationId.eq(application_id)),
            versions::Column::Version,
            SortDirection::Desc,
            last_version,
        )
        .limit(limit);

        let models = query.all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<ApplicationVersion>> {
        let model = versions::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn get_by_number(
        &self,
        application_id: Uuid,
        version: i32,
    ) -> CatalogResult<Option<ApplicationVersion>> {
        let model = versions::Entity::find()
            .filter(versions::Column::ApplicationId.eq(application_id))
            .filter(versions::Column::Version.eq(version))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn get_latest(
        &self,
        application_id: Uuid,
    ) -> CatalogResult<Option<ApplicationVersion>> {
        let model = versions::Entity::find()
            .filter(versions::Column::ApplicationId.eq(application_id))
            .order_by_desc(versions::Column::Version)
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = versions::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
