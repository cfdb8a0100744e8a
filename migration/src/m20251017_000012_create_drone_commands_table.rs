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
                    .table(DroneCommands::Table)
                    .if_not_exists()
                    .col(pk_auto(DroneCommands::Id))
                    .col(integer(DroneCommands::DroneId))
                    .col(string(DroneCommands::CommandType))
                    .col(json_null(DroneCommands::CommandData))
                    .col(string(DroneCommands::Status).default("pending"))
                    .col(integer_null(DroneCommands::IssuedBy))
                    .col(
                        timestamp_with_time_zone(DroneCommands::IssuedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(DroneCommands::ExecutedAt))
                    .col(timestamp_with_time_zone_null(DroneCommands::CompletedAt))
                    .col(text_null(DroneCommands::ErrorMessage))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_drone_commands_drone_id")
                            .from(DroneCommands::Table, DroneCommands::DroneId)
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
                    .name("idx_drone_commands_drone_status")
                    .table(DroneCommands::Table)
                    .col(DroneCommands::DroneId)
                    .col(DroneCommands::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DroneCommands::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DroneCommands {
    Table,
    Id,
    DroneId,
    CommandType,
    CommandData,
    Status,
    IssuedBy,
    IssuedAt,
    ExecutedAt,
    CompletedAt,
    ErrorMessage,
}
