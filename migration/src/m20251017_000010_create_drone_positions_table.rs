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
                    .table(DronePositions::Table)
                    .if_not_exists()
                    .col(pk_auto(DronePositions::Id))
                    .col(integer(DronePositions::DroneId))
                    .col(double(DronePositions::Latitude))
                    .col(double(DronePositions::Longitude))
                    .col(double(DronePositions::Altitude))
                    .col(double_null(DronePositions::Speed))
                    .col(double_null(DronePositions::Heading))
                    .col(double_null(DronePositions::BatteryLevel))
                    .col(double_null(DronePositions::SignalStrength))
                    .col(timestamp_with_time_zone(DronePositions::RecordedAt))
                    .col(
                        timestamp_with_time_zone(DronePositions::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_drone_positions_drone_id")
                            .from(DronePositions::Table, DronePositions::DroneId)
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
                    .name("idx_drone_positions_drone_recorded")
                    .table(DronePositions::Table)
                    .col(DronePositions::DroneId)
                    .col(DronePositions::RecordedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DronePositions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DronePositions {
    Table,
    Id,
    DroneId,
    Latitude,
    Longitude,
    Altitude,
    Speed,
    Heading,
    BatteryLevel,
    SignalStrength,
    RecordedAt,
    CreatedAt,
}
