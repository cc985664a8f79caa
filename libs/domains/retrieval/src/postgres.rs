use async_trait::async_trait;
use domain_catalog::entity::{applications, versions};
use domain_semantic::Embedding;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait,
    QueryFilter, QuerySelect, Statement,
};
use uuid::Uuid;

use crate::error::RetrievalResult;
use crate::models::{ApplicationSelector, RetrievalFilter};
use crate::repository::{RankedConnector, RetrievalRepository};

pub struct PgRetrievalRepository {
    db: DatabaseConnection,
}

impl PgRetrievalRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RetrievalRepository for PgRetrievalRepository {
    async fn resolve_version_ids(&self, filter: &RetrievalFilter) -> RetrievalResult<Vec<Uuid>> {
        let mut condition = Condition::any();
        for selector in &filter.applications {
            let selector_condition = match selector {
                ApplicationSelector::ById { id, version } => {
                    let mut all = Condition::all().add(versions::Column::ApplicationId.eq(*id));
                    if let Some(version) = version {
                        all = all.add(versions::Column::Version.eq(*version));
                    }
                    all
                }
                ApplicationSelector::ByName { name, version } => {
                    let mut all = Condition::all().add(applications::Column::Name.eq(name.clone()));
                    if let Some(version) = version {
                        all = all.add(versions::Column::Version.eq(*version));
                    }
                    all
                }
            };
            condition = condition.add(selector_condition);
        }

        let ids: Vec<Uuid> = versions::Entity::find()
            .inner_join(applications::Entity)
            .filter(condition)
            .select_only()
            .column(versions::Column::Id)
            .distinct()
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(ids)
    }

    async fn rank_connectors(
        &self,
        embedding: &Embedding,
        version_ids: Option<Vec<Uuid>>,
        limit: u64,
    ) -> RetrievalResult<Vec<RankedConnector>> {
        // A connector owns one index row today, but MIN keeps the ranking
        // well-defined under join multiplicity. GROUP BY c.id is enough:
        // the remaining columns are functionally dependent on the PK.
        let query_vector = embedding.to_pgvector_literal();
        let stmt = match version_ids {
            Some(ids) => Statement::from_sql_and_values(
                DbBackend::Postgres,
                r#"
                SELECT c.id, c.version_id, c.name, c.description, c.created_at,
                       MIN(i.embedding <=> $1::vector) AS distance
                FROM application_connectors AS c
                INNER JOIN connector_indexes AS i ON i.connector_id = c.id
                WHERE c.version_id = ANY($2)
                GROUP BY c.id
                ORDER BY distance ASC, c.id ASC
                LIMIT $3
                "#,
                [query_vector.into(), ids.into(), (limit as i64).into()],
            ),
            None => Statement::from_sql_and_values(
                DbBackend::Postgres,
                r#"
                SELECT c.id, c.version_id, c.name, c.description, c.created_at,
                       MIN(i.embedding <=> $1::vector) AS distance
                FROM application_connectors AS c
                INNER JOIN connector_indexes AS i ON i.connector_id = c.id
                GROUP BY c.id
                ORDER BY distance ASC, c.id ASC
                LIMIT $2
                "#,
                [query_vector.into(), (limit as i64).into()],
            ),
        };

        let rows = self.db.query_all_raw(stmt).await?;

        let mut ranked = Vec::with_capacity(rows.len());
        for row in rows {
            let created_at: chrono::DateTime<chrono::FixedOffset> =
                row.try_get("", "created_at")?;
            ranked.push(RankedConnector {
                id: row.try_get("", "id")?,
                version_id: row.try_get("", "version_id")?,
                name: row.try_get("", "name")?,
                description: row.try_get("", "description")?,
                created_at: created_at.into(),
                distance: row.try_get("", "distance")?,
            });
        }

        Ok(ranked)
    }
}
