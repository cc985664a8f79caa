use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create applications table
        manager
            .create_table(
                Table::create()
                    .table(Applications::Table)
                    .if_not_exists()
                    .col(pk_uuid(Applications::Id))
                    .col(string(Applications::Name))
                    .col(text_null(Applications::Description))
                    .col(
                        timestamp_with_time_zone(Applications::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Applications::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_applications_name")
                    .table(Applications::Table)
                    .col(Applications::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create application_versions table
        manager
            .create_table(
                Table::create()
                    .table(ApplicationVersions::Table)
                    .if_not_exists()
                    .col(pk_uuid(ApplicationVersions::Id))
                    .col(uuid(ApplicationVersions::ApplicationId))
                    .col(integer(ApplicationVersions::Version))
                    .col(
                        timestamp_with_time_zone(ApplicationVersions::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_versions_application_id")
                            .from(ApplicationVersions::Table, ApplicationVersions::ApplicationId)
                            .to(Applications::Table, Applications::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_application_versions_application_id_version")
                    .table(ApplicationVersions::Table)
                    .col(ApplicationVersions::ApplicationId)
                    .col(ApplicationVersions::Version)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create application_connectors table
        manager
            .create_table(
                Table::create()
                    .table(ApplicationConnectors::Table)
                    .if_not_exists()
                    .col(pk_uuid(ApplicationConnectors::Id))
                    .col(uuid(ApplicationConnectors::VersionId))
                    .col(string(ApplicationConnectors::Name))
                    .col(text_null(ApplicationConnectors::Description))
                    .col(
                        timestamp_with_time_zone(ApplicationConnectors::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_application_connectors_version_id")
                            .from(ApplicationConnectors::Table, ApplicationConnectors::VersionId)
                            .to(ApplicationVersions::Table, ApplicationVersions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_application_connectors_version_id_name")
                    .table(ApplicationConnectors::Table)
                    .col(ApplicationConnectors::VersionId)
                    .col(ApplicationConnectors::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Listings by name across versions filter on name alone
        manager
            .create_index(
                Index::create()
                    .name("idx_application_connectors_name")
                    .table(ApplicationConnectors::Table)
                    .col(ApplicationConnectors::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ApplicationConnectors::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ApplicationVersions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Applications::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Applications {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ApplicationVersions {
    Table,
    Id,
    ApplicationId,
    Version,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ApplicationConnectors {
    Table,
    Id,
    VersionId,
    Name,
    Description,
    CreatedAt,
}
