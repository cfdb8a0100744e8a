use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ArchiveTasks::Table)
                    .if_not_exists()
                    .col(pk_auto(ArchiveTasks::Id))
                    .col(string(ArchiveTasks::TaskType))
                    .col(string(ArchiveTasks::Status).default("pending"))
                    .col(timestamp_with_time_zone(ArchiveTasks::DateRangeStart))
                    .col(timestamp_with_time_zone(ArchiveTasks::DateRangeEnd))
                    .col(string_uniq(ArchiveTasks::BatchId))
                    .col(big_integer(ArchiveTasks::TotalRecords).default(0))
                    .col(big_integer(ArchiveTasks::ArchivedRecords).default(0))
                    .col(text_null(ArchiveTasks::ErrorMessage))
                    .col(integer_null(ArchiveTasks::CreatedBy))
                    .col(
                        timestamp_with_time_zone(ArchiveTasks::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(ArchiveTasks::StartedAt))
                    .col(timestamp_with_time_zone_null(ArchiveTasks::CompletedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ArchiveTasks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ArchiveTasks {
    Table,
    Id,
    TaskType,
    Status,
    DateRangeStart,
    DateRangeEnd,
    BatchId,
    TotalRecords,
    ArchivedRecords,
    ErrorMessage,
    CreatedBy,
    CreatedAt,
    StartedAt,
    CompletedAt,
}
