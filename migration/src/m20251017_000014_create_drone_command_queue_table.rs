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
                    .table(DroneCommandQueue::Table)
                    .if_not_exists()
                    .col(pk_auto(DroneCommandQueue::Id))
                    .col(integer(DroneCommandQueue::DroneId))
                    .col(string(DroneCommandQueue::CommandType))
                    .col(json_null(DroneCommandQueue::CommandData))
                    .col(integer(DroneCommandQueue::Priority).default(5))
                    .col(string(DroneCommandQueue::Status).default("pending"))
                    .col(integer_null(DroneCommandQueue::CreatedBy))
                    .col(
                        timestamp_with_time_zone(DroneCommandQueue::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(DroneCommandQueue::StartedAt))
                    .col(timestamp_with_time_zone_null(DroneCommandQueue::CompletedAt))
                    .col(text_null(DroneCommandQueue::ErrorMessage))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_drone_command_queue_drone_id")
                            .from(DroneCommandQueue::Table, DroneCommandQueue::DroneId)
                            .to(Drones::Table, Drones::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Serves the dequeue ordering: status filter, then priority DESC, created_at ASC.
        manager
            .create_index(
                Index::create()
                    .name("idx_drone_command_queue_dequeue")
                    .table(DroneCommandQueue::Table)
                    .col(DroneCommandQueue::Status)
                    .col(DroneCommandQueue::Priority)
                    .col(DroneCommandQueue::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DroneCommandQueue::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DroneCommandQueue {
    Table,
    Id,
    DroneId,
    CommandType,
    CommandData,
    Priority,
    Status,
    CreatedBy,
    CreatedAt,
    StartedAt,
    CompletedAt,
    ErrorMessage,
}
