use sea_orm_migration::{prelude::*, schema::*};

use super::m20251017_000007_create_drones_table::Drones;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DroneStatusArchive::Table)
                    .if_not_exists()
                    .col(pk_auto(DroneStatusArchive::Id))
                    .col(integer(DroneStatusArchive::DroneId))
                    .col(string(DroneStatusArchive::Status))
                    .col(string_null(DroneStatusArchive::PreviousStatus))
                    .col(text_null(DroneStatusArchive::Reason))
                    .col(integer_null(DroneStatusArchive::ChangedBy))
                    .col(
                        timestamp_with_time_zone(DroneStatusArchive::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_drone_status_archive_drone_id")
                            .from(DroneStatusArchive::Table, DroneStatusArchive::DroneId)
                            .to(Drones::Table, Drones::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_drone_status_archive_drone_created")
                    .table(DroneStatusArchive::Table)
                    .col(DroneStatusArchive::DroneId)
                    .col(DroneStatusArchive::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DroneStatusArchive::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DroneStatusArchive {
    Table,
    Id,
    DroneId,
    Status,
    PreviousStatus,
    Reason,
    ChangedBy,
    CreatedAt,
}
