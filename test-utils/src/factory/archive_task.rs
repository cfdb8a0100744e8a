//! Archive task factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating `archive_tasks` rows.
///
/// Defaults to a pending `positions` task covering the thirty days before now.
pub struct ArchiveTaskFactory<'a> {
    db: &'a DatabaseConnection,
    task_type: String,
    status: String,
    date_range_start: DateTime<Utc>,
    date_range_end: DateTime<Utc>,
}

impl<'a> ArchiveTaskFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let now = Utc::now();
        Self {
            db,
            task_type: "positions".to_string(),
            status: "pending".to_string(),
            date_range_start: now - Duration::days(30),
            date_range_end: now,
        }
    }

    pub fn task_type(mut self, task_type: impl Into<String>) -> Self {
        self.task_type = task_type.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn date_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.date_range_start = start;
        self.date_range_end = end;
        self
    }

    pub async fn build(self) -> Result<entity::archive_task::Model, DbErr> {
        entity::archive_task::ActiveModel {
            id: ActiveValue::NotSet,
            task_type: ActiveValue::Set(self.task_type),
            status: ActiveValue::Set(self.status),
            date_range_start: ActiveValue::Set(self.date_range_start),
            date_range_end: ActiveValue::Set(self.date_range_end),
            batch_id: ActiveValue::Set(format!("TEST_BATCH_{}", next_id())),
            total_records: ActiveValue::Set(0),
            archived_records: ActiveValue::Set(0),
            error_message: ActiveValue::Set(None),
            created_by: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            started_at: ActiveValue::Set(None),
            completed_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending positions archive task.
pub async fn create_archive_task(
    db: &DatabaseConnection,
) -> Result<entity::archive_task::Model, DbErr> {
    ArchiveTaskFactory::new(db).build().await
}
