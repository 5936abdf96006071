use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CatalogItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CatalogItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CatalogItems::Title).string().not_null())
                    .col(
                        ColumnDef::new(CatalogItems::Status)
                            .string()
                            .not_null()
                            .default("airing"),
                    )
                    .col(ColumnDef::new(CatalogItems::SeasonId).integer())
                    .col(ColumnDef::new(CatalogItems::MalId).integer())
                    .col(ColumnDef::new(CatalogItems::AnilistId).integer())
                    .col(ColumnDef::new(CatalogItems::Broadcast).text())
                    .col(ColumnDef::new(CatalogItems::BroadcastOverride).text())
                    .col(
                        ColumnDef::new(CatalogItems::ScheduleActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(CatalogItems::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(CatalogItems::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_catalog_items_season")
                    .table(CatalogItems::Table)
                    .col(CatalogItems::SeasonId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_catalog_items_sort")
                    .table(CatalogItems::Table)
                    .col(CatalogItems::SortOrder)
                    .col(CatalogItems::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CatalogItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CatalogItems {
    Table,
    Id,
    Title,
    Status,
    SeasonId,
    MalId,
    AnilistId,
    Broadcast,
    BroadcastOverride,
    ScheduleActive,
    SortOrder,
    CreatedAt,
}
