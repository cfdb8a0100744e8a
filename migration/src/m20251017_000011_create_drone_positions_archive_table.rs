use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DronePositionsArchive::Table)
                    .if_not_exists()
                    .col(pk_auto(DronePositionsArchive::Id))
                    .col(integer(DronePositionsArchive::OriginalId))
                    .col(integer(DronePositionsArchive::DroneId))
                    .col(double(DronePositionsArchive::Latitude))
                    .col(double(DronePositionsArchive::Longitude))
                    .col(double(DronePositionsArchive::Altitude))
                    .col(double_null(DronePositionsArchive::Speed))
                    .col(double_null(DronePositionsArchive::Heading))
                    .col(double_null(DronePositionsArchive::BatteryLevel))
                    .col(double_null(DronePositionsArchive::SignalStrength))
                    .col(timestamp_with_time_zone(DronePositionsArchive::RecordedAt))
                    .col(timestamp_with_time_zone(DronePositionsArchive::ArchivedAt))
                    .col(string(DronePositionsArchive::ArchiveBatchId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_drone_positions_archive_batch")
                    .table(DronePositionsArchive::Table)
                    .col(DronePositionsArchive::ArchiveBatchId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DronePositionsArchive::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DronePositionsArchive {
    Table,
    Id,
    OriginalId,
    DroneId,
    Latitude,
    Longitude,
    Altitude,
    Speed,
    Heading,
    BatteryLevel,
    SignalStrength,
    RecordedAt,
    ArchivedAt,
    ArchiveBatchId,
}
