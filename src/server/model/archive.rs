use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use serde_json::Value;

use crate::{
    model::{
        archive::{
            ArchiveTaskDto, ArchiveTaskStatus, ArchiveTaskType, CreateArchiveTaskDto,
            DroneCommandArchiveDto, DronePositionArchiveDto,
        },
        drone_command::{CommandStatus, CommandType},
    },
    server::{error::validation::ValidationError, model::parse_stored},
};

/// A request to move one time window of live rows into an archive table.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveTask {
    pub id: i32,
    /// Which live table the task drains.
    pub task_type: ArchiveTaskType,
    /// `pending` until run, then `running` and finally `completed` or `failed`.
    pub status: ArchiveTaskStatus,
    /// Inclusive start of the archived window.
    pub date_range_start: DateTime<Utc>,
    /// Exclusive end of the archived window.
    pub date_range_end: DateTime<Utc>,
    /// Tag written to every row this task archives.
    pub batch_id: String,
    /// Rows selected by the run; zero until it completes.
    pub total_records: i64,
    /// Rows copied into the archive table by the run.
    pub archived_records: i64,
    /// Why the run failed, set only when `status` is `failed`.
    pub error_message: Option<String>,
    /// User who requested the task; `None` for scheduled runs.
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ArchiveTask {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The archive task entity from the database
    ///
    /// # Returns
    /// - `Ok(ArchiveTask)` - Converted domain model
    /// - `Err(DbErr::Type)` - Stored task type or status is not a known value
    pub fn from_entity(entity: entity::archive_task::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            task_type: parse_stored(&entity.task_type)?,
            status: parse_stored(&entity.status)?,
            date_range_start: entity.date_range_start,
            date_range_end: entity.date_range_end,
            batch_id: entity.batch_id,
            total_records: entity.total_records,
            archived_records: entity.archived_records,
            error_message: entity.error_message,
            created_by: entity.created_by,
            created_at: entity.created_at,
            started_at: entity.started_at,
            completed_at: entity.completed_at,
        })
    }

    /// Converts to the wire representation.
    pub fn into_dto(self) -> ArchiveTaskDto {
        ArchiveTaskDto {
            id: self.id,
            task_type: self.task_type,
            status: self.status,
            date_range_start: self.date_range_start,
            date_range_end: self.date_range_end,
            batch_id: self.batch_id,
            total_records: self.total_records,
            archived_records: self.archived_records,
            error_message: self.error_message,
            created_by: self.created_by,
            created_at: self.created_at,
            started_at: self.started_at,
            completed_at: self.completed_at,
        }
    }
}

/// Parameters for creating an archive task.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateArchiveTaskParams {
    pub task_type: ArchiveTaskType,
    pub date_range_start: DateTime<Utc>,
    pub date_range_end: DateTime<Utc>,
    pub created_by: Option<i32>,
}

impl CreateArchiveTaskParams {
    /// Builds parameters from a request body; call `validate` before use.
    pub fn from_dto(dto: CreateArchiveTaskDto) -> Self {
        Self {
            task_type: dto.task_type,
            date_range_start: dto.date_range_start,
            date_range_end: dto.date_range_end,
            created_by: dto.created_by,
        }
    }

    /// Checks the window is non-empty.
    ///
    /// # Returns
    /// - `Ok(Self)` - `date_range_start` is before `date_range_end`
    /// - `Err(ValidationError)` - Empty or inverted window, reported on `date_range_start`
    pub fn validate(self) -> Result<Self, ValidationError> {
        if self.date_range_start >= self.date_range_end {
            return Err(ValidationError::new(
                "date_range_start",
                "must be earlier than date_range_end",
            ));
        }
        Ok(self)
    }
}

/// Builds a batch id unique to one archive run, e.g. `positions_20251017T030000_9f1c2a7b`.
pub fn new_batch_id(task_type: ArchiveTaskType, now: DateTime<Utc>) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}_{}",
        task_type.as_str(),
        now.format("%Y%m%dT%H%M%S"),
        &suffix[..8]
    )
}

/// Optional filters for listing archive tasks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArchiveTaskFilter {
    pub status: Option<ArchiveTaskStatus>,
    pub task_type: Option<ArchiveTaskType>,
}

/// Counts recorded on a finished archive run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveOutcome {
    pub total_records: u64,
    pub archived_records: u64,
}

/// A position moved out of the live table.
#[derive(Debug, Clone, PartialEq)]
pub struct DronePositionArchive {
    pub id: i32,
    /// Id the row had in `drone_positions`.
    pub original_id: i32,
    pub drone_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
    pub battery_level: Option<f64>,
    pub signal_strength: Option<f64>,
    pub recorded_at: DateTime<Utc>,
    /// When the archive run moved the row.
    pub archived_at: DateTime<Utc>,
    /// Batch id of the task that moved the row.
    pub archive_batch_id: String,
}

impl DronePositionArchive {
    /// Converts an entity model to a domain model.
    pub fn from_entity(entity: entity::drone_position_archive::Model) -> Self {
        Self {
            id: entity.id,
            original_id: entity.original_id,
            drone_id: entity.drone_id,
            latitude: entity.latitude,
            longitude: entity.longitude,
            altitude: entity.altitude,
            speed: entity.speed,
            heading: entity.heading,
            battery_level: entity.battery_level,
            signal_strength: entity.signal_strength,
            recorded_at: entity.recorded_at,
            archived_at: entity.archived_at,
            archive_batch_id: entity.archive_batch_id,
        }
    }

    pub fn into_dto(self) -> DronePositionArchiveDto {
        DronePositionArchiveDto {
            id: self.id,
            original_id: self.original_id,
            drone_id: self.drone_id,
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
            speed: self.speed,
            heading: self.heading,
            battery_level: self.battery_level,
            signal_strength: self.signal_strength,
            recorded_at: self.recorded_at,
            archived_at: self.archived_at,
            archive_batch_id: self.archive_batch_id,
        }
    }
}

/// A finished command moved out of the live table.
#[derive(Debug, Clone, PartialEq)]
pub struct DroneCommandArchive {
    pub id: i32,
    /// Id the row had in `drone_commands`.
    pub original_id: i32,
    pub drone_id: i32,
    pub command_type: CommandType,
    pub command_data: Option<Value>,
    /// Always a terminal status: completed, failed or cancelled.
    pub status: CommandStatus,
    pub issued_by: Option<i32>,
    pub issued_at: DateTime<Utc>,
    pub executed_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub archived_at: DateTime<Utc>,
    pub archive_batch_id: String,
}

impl DroneCommandArchive {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(DroneCommandArchive)` - Converted domain model
    /// - `Err(DbErr::Type)` - Stored command type or status is not a known value
    pub fn from_entity(entity: entity::drone_command_archive::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            original_id: entity.original_id,
            drone_id: entity.drone_id,
            command_type: parse_stored(&entity.command_type)?,
            command_data: entity.command_data,
            status: parse_stored(&entity.status)?,
            issued_by: entity.issued_by,
            issued_at: entity.issued_at,
            executed_at: entity.executed_at,
            completed_at: entity.completed_at,
            error_message: entity.error_message,
            archived_at: entity.archived_at,
            archive_batch_id: entity.archive_batch_id,
        })
    }

    pub fn into_dto(self) -> DroneCommandArchiveDto {
        DroneCommandArchiveDto {
            id: self.id,
            original_id: self.original_id,
            drone_id: self.drone_id,
            command_type: self.command_type,
            command_data: self.command_data,
            status: self.status,
            issued_by: self.issued_by,
            issued_at: self.issued_at,
            executed_at: self.executed_at,
            completed_at: self.completed_at,
            error_message: self.error_message,
            archived_at: self.archived_at,
            archive_batch_id: self.archive_batch_id,
        }
    }
}

/// Filter shared by both archive tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArchiveFilter {
    pub drone_id: Option<i32>,
    pub archive_batch_id: Option<String>,
    /// Inclusive lower bound on the row's own timestamp (`recorded_at` or `issued_at`).
    pub start_time: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the same timestamp.
    pub end_time: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn rejects_inverted_range() {
        let now = Utc::now();
        let err = CreateArchiveTaskParams {
            task_type: ArchiveTaskType::Positions,
            date_range_start: now,
            date_range_end: now - Duration::days(1),
            created_by: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field, "date_range_start");
    }

    #[test]
    fn batch_ids_are_prefixed_and_unique() {
        let now = Utc::now();
        let a = new_batch_id(ArchiveTaskType::Commands, now);
        let b = new_batch_id(ArchiveTaskType::Commands, now);
        assert!(a.starts_with("commands_"));
        assert_ne!(a, b);
    }
}
