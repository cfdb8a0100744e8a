use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Drones::Table)
                    .if_not_exists()
                    .col(pk_auto(Drones::Id))
                    .col(string_uniq(Drones::Serial))
                    .col(string(Drones::Name))
                    .col(string(Drones::Model))
                    .col(string(Drones::Manufacturer))
                    .col(string(Drones::Status).default("inactive"))
                    .col(integer_null(Drones::OwnerUserId))
                    .col(integer_null(Drones::ManufactureYear))
                    .col(timestamp_with_time_zone(Drones::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Drones::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Drones::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Drones {
    Table,
    Id,
    Serial,
    Name,
    Model,
    Manufacturer,
    Status,
    OwnerUserId,
    ManufactureYear,
    CreatedAt,
    UpdatedAt,
}
