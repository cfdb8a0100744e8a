pub use sea_orm_migration::prelude::*;

mod m20251017_000001_create_users_table;
mod m20251017_000002_create_roles_table;
mod m20251017_000003_create_permissions_table;
mod m20251017_000004_create_user_roles_table;
mod m20251017_000005_create_role_permissions_table;
mod m20251017_000006_create_user_preferences_table;
mod m20251017_000007_create_drones_table;
mod m20251017_000008_create_drone_status_archive_table;
mod m20251017_000009_create_drone_real_time_status_table;
mod m20251017_000010_create_drone_positions_table;
mod m20251017_000011_create_drone_positions_archive_table;
mod m20251017_000012_create_drone_commands_table;
mod m20251017_000013_create_drone_commands_archive_table;
mod m20251017_000014_create_drone_command_queue_table;
mod m20251017_000015_create_archive_tasks_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251017_000001_create_users_table::Migration),
            Box::new(m20251017_000002_create_roles_table::Migration),
            Box::new(m20251017_000003_create_permissions_table::Migration),
            Box::new(m20251017_000004_create_user_roles_table::Migration),
            Box::new(m20251017_000005_create_role_permissions_table::Migration),
            Box::new(m20251017_000006_create_user_preferences_table::Migration),
            Box::new(m20251017_000007_create_drones_table::Migration),
            Box::new(m20251017_000008_create_drone_status_archive_table::Migration),
            Box::new(m20251017_000009_create_drone_real_time_status_table::Migration),
            Box::new(m20251017_000010_create_drone_positions_table::Migration),
            Box::new(m20251017_000011_create_drone_positions_archive_table::Migration),
            Box::new(m20251017_000012_create_drone_commands_table::Migration),
            Box::new(m20251017_000013_create_drone_commands_archive_table::Migration),
            Box::new(m20251017_000014_create_drone_command_queue_table::Migration),
            Box::new(m20251017_000015_create_archive_tasks_table::Migration),
        ]
    }
}
