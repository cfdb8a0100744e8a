use sea_orm::entity::prelude::*;

/// Historical copy of a finished `drone_commands` row moved out by an archive task.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "drone_commands_archive")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub original_id: i32,
    pub drone_id: i32,
    pub command_type: String,
    pub command_data: Option<Json>,
    pub status: String,
    pub issued_by: Option<i32>,
    pub issued_at: DateTimeUtc,
    pub executed_at: Option<DateTimeUtc>,
    pub completed_at: Option<DateTimeUtc>,
    pub error_message: Option<String>,
    pub archived_at: DateTimeUtc,
    pub archive_batch_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
