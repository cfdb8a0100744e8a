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
                    .table(DroneRealTimeStatus::Table)
                    .if_not_exists()
                    .col(pk_auto(DroneRealTimeStatus::Id))
                    .col(integer_uniq(DroneRealTimeStatus::DroneId))
                    .col(string(DroneRealTimeStatus::CurrentStatus))
                    .col(double(DroneRealTimeStatus::BatteryLevel))
                    .col(double_null(DroneRealTimeStatus::SignalStrength))
                    .col(double_null(DroneRealTimeStatus::Altitude))
                    .col(double_null(DroneRealTimeStatus::Speed))
                    .col(double_null(DroneRealTimeStatus::Heading))
                    .col(boolean(DroneRealTimeStatus::IsConnected).default(false))
                    .col(text_null(DroneRealTimeStatus::ErrorMessage))
                    .col(timestamp_with_time_zone(DroneRealTimeStatus::LastSeen))
                    .col(
                        timestamp_with_time_zone(DroneRealTimeStatus::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_drone_real_time_status_drone_id")
                            .from(DroneRealTimeStatus::Table, DroneRealTimeStatus::DroneId)
                            .to(Drones::Table, Drones::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DroneRealTimeStatus::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum DroneRealTimeStatus {
    Table,
    Id,
    DroneId,
    CurrentStatus,
    BatteryLevel,
    SignalStrength,
    Altitude,
    Speed,
    Heading,
    IsConnected,
    ErrorMessage,
    LastSeen,
    UpdatedAt,
}
