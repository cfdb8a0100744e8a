//! Command queue entry factory.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating `drone_command_queue` rows.
///
/// Defaults to a pending `hover` entry with priority 5 created now. Tests that depend on
/// FIFO ordering inside a priority should set `created_at` explicitly.
pub struct QueueEntryFactory<'a> {
    db: &'a DatabaseConnection,
    drone_id: i32,
    command_type: String,
    command_data: Option<serde_json::Value>,
    priority: i32,
    status: String,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl<'a> QueueEntryFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, drone_id: i32) -> Self {
        Self {
            db,
            drone_id,
            command_type: "hover".to_string(),
            command_data: None,
            priority: 5,
            status: "pending".to_string(),
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn command_type(mut self, command_type: impl Into<String>) -> Self {
        self.command_type = command_type.into();
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn completed_at(mut self, completed_at: Option<DateTime<Utc>>) -> Self {
        self.completed_at = completed_at;
        self
    }

    pub async fn build(self) -> Result<entity::drone_command_queue::Model, DbErr> {
        entity::drone_command_queue::ActiveModel {
            id: ActiveValue::NotSet,
            drone_id: ActiveValue::Set(self.drone_id),
            command_type: ActiveValue::Set(self.command_type),
            command_data: ActiveValue::Set(self.command_data),
            priority: ActiveValue::Set(self.priority),
            status: ActiveValue::Set(self.status),
            created_by: ActiveValue::Set(None),
            created_at: ActiveValue::Set(self.created_at),
            started_at: ActiveValue::Set(None),
            completed_at: ActiveValue::Set(self.completed_at),
            error_message: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending queue entry with the given priority.
pub async fn create_queue_entry(
    db: &DatabaseConnection,
    drone_id: i32,
    priority: i32,
) -> Result<entity::drone_command_queue::Model, DbErr> {
    QueueEntryFactory::new(db, drone_id)
        .priority(priority)
        .build()
        .await
}
