use async_trait::async_trait;
use database::{classify_db_err, SqlViolation};
use domain_semantic::Embedding;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, QueryFilter, QuerySelect, Statement, TransactionTrait,
};
use uuid::Uuid;

use crate::entity::{connectors, versions};
use crate::error::{CatalogError, CatalogResult};
use crate::keyset::{apply_cursor, SortDirection};
use crate::models::{Connector, CreateConnector};
use crate::repository::ConnectorRepository;

pub struct PgConnectorRepository {
    db: DatabaseConnection,
}

impl PgConnectorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn map_create_err(e: DbErr, version_id: Uuid, name: &str) -> CatalogError {
    match classify_db_err(&e) {
        SqlViolation::Unique => CatalogError::Conflict(format!(
            "connector '{}' already exists for version {}",
            name, version_id
        )),
        SqlViolation::ForeignKey => {
            CatalogError::NotFound(format!("application version {} not found", version_id))
        }
        _ => CatalogError::Database(e),
    }
}

#[async_trait]
impl ConnectorRepository for PgConnectorRepository {
    async fn create(
        &self,
        version_id: Uuid,
        input: CreateConnector,
        indexed_text: String,
        embedding: Embedding,
    ) -> CatalogResult<Connector> {
        let name = input.name.clone();
        let txn = self.db.begin().await?;

        let active_model = connectors::ActiveModel {
            id: Set(Uuid::now_v7()),
            version_id: Set(version_id),
            name: Set(input.name),
            description: Set(input.description),
            created_at: Set(chrono::Utc::now().into()),
        };

        let model = match active_model.insert(&txn).await {
            Ok(model) => model,
            Err(e) => return Err(map_create_err(e, version_id, &name)),
        };

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            INSERT INTO connector_indexes (connector_id, indexed_text, embedding)
            VALUES ($1, $2, $3::vector)
            "#,
            [
                model.id.into(),
                indexed_text.into(),
                embedding.to_pgvector_literal().into(),
            ],
        );

        if let Err(e) = txn.execute_raw(stmt).await {
            return Err(map_create_err(e, version_id, &name));
        }

        txn.commit().await?;

        tracing::info!(connector_id = %model.id, "Created connector with embedding index");
        Ok(model.into())
    }

    async fn list_by_version(
        &self,
        version_id: Uuid,
        limit: u64,
        last_name: Option<String>,
    ) -> CatalogResult<Vec<Connector>> {
        let query = apply_cursor(
            connectors::Entity::find().filter(connectors::Column::VersionId.eq(version_id)),
            connectors::Column::Name,
            SortDirection::Asc,
            last_name,
        )
        .limit(limit);

        let models = query.all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_by_name(
        &self,
        name: &str,
        limit: u64,
        last_version: Option<i32>,
    ) -> CatalogResult<Vec<Connector>> {
        let query = apply_cursor(
            connectors::Entity::find()
                .inner_join(versions::Entity)
                .filter(connectors::Column::Name.eq(name)),
            versions::Column::Version,
            SortDirection::Desc,
            last_version,
        )
        .limit(limit);

        let models = query.all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Connector>> {
        let model = connectors::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn get_by_name(
        &self,
        version_id: Uuid,
        name: &str,
    ) -> CatalogResult<Option<Connector>> {
        let model = connectors::Entity::find()
            .filter(connectors::Column::VersionId.eq(version_id))
            .filter(connectors::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        // The index row goes with it via ON DELETE CASCADE
        let result = connectors::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
