use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "archive_tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// `positions` or `commands`.
    pub task_type: String,
    /// One of `pending`, `running`, `completed`, `failed`.
    pub status: String,
    pub date_range_start: DateTimeUtc,
    pub date_range_end: DateTimeUtc,
    #[sea_orm(unique)]
    pub batch_id: String,
    pub total_records: i64,
    pub archived_records: i64,
    pub error_message: Option<String>,
    pub created_by: Option<i32>,
    pub created_at: DateTimeUtc,
    pub started_at: Option<DateTimeUtc>,
    pub completed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
