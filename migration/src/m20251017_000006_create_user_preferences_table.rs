use sea_orm_migration::{prelude::*, schema::*};

use super::m20251017_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserPreferences::Table)
                    .if_not_exists()
                    .col(pk_auto(UserPreferences::Id))
                    .col(integer_uniq(UserPreferences::UserId))
                    .col(string(UserPreferences::Theme).default("auto"))
                    .col(string(UserPreferences::Language).default("zh-TW"))
                    .col(string(UserPreferences::Timezone).default("Asia/Taipei"))
                    .col(boolean(UserPreferences::AutoSave).default(true))
                    .col(boolean(UserPreferences::Notifications).default(true))
                    .col(boolean(UserPreferences::EmailNotifications).default(false))
                    .col(
                        timestamp_with_time_zone(UserPreferences::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(UserPreferences::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_preferences_user_id")
                            .from(UserPreferences::Table, UserPreferences::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserPreferences::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserPreferences {
    Table,
    Id,
    UserId,
    Theme,
    Language,
    Timezone,
    AutoSave,
    Notifications,
    EmailNotifications,
    CreatedAt,
    UpdatedAt,
}
