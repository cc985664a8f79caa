use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // sea-query has no vector column type, so this table is raw SQL.
        // One index row per connector, written atomically with it.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE connector_indexes (
                    connector_id UUID PRIMARY KEY
                        REFERENCES application_connectors (id) ON DELETE CASCADE,
                    indexed_text TEXT NOT NULL,
                    embedding vector(384) NOT NULL
                )
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_connector_indexes_embedding
                    ON connector_indexes
                    USING hnsw (embedding vector_cosine_ops)
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS connector_indexes")
            .await?;

        Ok(())
    }
}
