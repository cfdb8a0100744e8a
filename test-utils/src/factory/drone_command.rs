//! Drone command factory.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating drone command rows.
///
/// Defaults to a `pending` `takeoff` command issued now with no payload.
pub struct DroneCommandFactory<'a> {
    db: &'a DatabaseConnection,
    drone_id: i32,
    command_type: String,
    command_data: Option<serde_json::Value>,
    status: String,
    issued_by: Option<i32>,
    issued_at: DateTime<Utc>,
    executed_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    error_message: Option<String>,
}

impl<'a> DroneCommandFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, drone_id: i32) -> Self {
        Self {
            db,
            drone_id,
            command_type: "takeoff".to_string(),
            command_data: None,
            status: "pending".to_string(),
            issued_by: None,
            issued_at: Utc::now(),
            executed_at: None,
            completed_at: None,
            error_message: None,
        }
    }

    pub fn command_type(mut self, command_type: impl Into<String>) -> Self {
        self.command_type = command_type.into();
        self
    }

    pub fn command_data(mut self, command_data: Option<serde_json::Value>) -> Self {
        self.command_data = command_data;
        self
    }

    /// Sets the status; terminal statuses also stamp `completed_at`.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        if matches!(self.status.as_str(), "completed" | "failed" | "cancelled") {
            self.completed_at = Some(self.issued_at);
        }
        self
    }

    pub fn issued_by(mut self, issued_by: Option<i32>) -> Self {
        self.issued_by = issued_by;
        self
    }

    pub fn issued_at(mut self, issued_at: DateTime<Utc>) -> Self {
        self.issued_at = issued_at;
        self
    }

    pub fn error_message(mut self, error_message: Option<String>) -> Self {
        self.error_message = error_message;
        self
    }

    pub async fn build(self) -> Result<entity::drone_command::Model, DbErr> {
        entity::drone_command::ActiveModel {
            id: ActiveValue::NotSet,
            drone_id: ActiveValue::Set(self.drone_id),
            command_type: ActiveValue::Set(self.command_type),
            command_data: ActiveValue::Set(self.command_data),
            status: ActiveValue::Set(self.status),
            issued_by: ActiveValue::Set(self.issued_by),
            issued_at: ActiveValue::Set(self.issued_at),
            executed_at: ActiveValue::Set(self.executed_at),
            completed_at: ActiveValue::Set(self.completed_at),
            error_message: ActiveValue::Set(self.error_message),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending takeoff command for the drone.
pub async fn create_command(
    db: &DatabaseConnection,
    drone_id: i32,
) -> Result<entity::drone_command::Model, DbErr> {
    DroneCommandFactory::new(db, drone_id).build().await
}
