use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DroneCommandsArchive::Table)
                    .if_not_exists()
                    .col(pk_auto(DroneCommandsArchive::Id))
                    .col(integer(DroneCommandsArchive::OriginalId))
                    .col(integer(DroneCommandsArchive::DroneId))
                    .col(string(DroneCommandsArchive::CommandType))
                    .col(json_null(DroneCommandsArchive::CommandData))
                    .col(string(DroneCommandsArchive::Status))
                    .col(integer_null(DroneCommandsArchive::IssuedBy))
                    .col(timestamp_with_time_zone(DroneCommandsArchive::IssuedAt))
                    .col(timestamp_with_time_zone_null(DroneCommandsArchive::ExecutedAt))
                    .col(timestamp_with_time_zone_null(DroneCommandsArchive::CompletedAt))
                    .col(text_null(DroneCommandsArchive::ErrorMessage))
                    .col(timestamp_with_time_zone(DroneCommandsArchive::ArchivedAt))
                    .col(string(DroneCommandsArchive::ArchiveBatchId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_drone_commands_archive_batch")
                    .table(DroneCommandsArchive::Table)
                    .col(DroneCommandsArchive::ArchiveBatchId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DroneCommandsArchive::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DroneCommandsArchive {
    Table,
    Id,
    OriginalId,
    DroneId,
    CommandType,
    CommandData,
    Status,
    IssuedBy,
    IssuedAt,
    ExecutedAt,
    CompletedAt,
    ErrorMessage,
    ArchivedAt,
    ArchiveBatchId,
}
