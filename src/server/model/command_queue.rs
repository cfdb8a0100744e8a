use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use serde_json::Value;

use crate::{
    model::{
        command_queue::{EnqueueCommandDto, QueueEntryDto, QueueStatisticsDto},
        drone_command::{CommandStatus, CommandType},
    },
    server::{
        error::validation::ValidationError,
        model::{drone_command::validate_command_data, parse_stored},
        util::validate,
    },
};

pub const MIN_PRIORITY: i32 = 1;
pub const MAX_PRIORITY: i32 = 10;
pub const DEFAULT_PRIORITY: i32 = 5;

/// A command waiting in (or drained from) a drone's queue.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueEntry {
    pub id: i32,
    pub drone_id: i32,
    pub command_type: CommandType,
    pub command_data: Option<Value>,
    /// Higher runs first; ties drain in insertion order.
    pub priority: i32,
    /// Only `pending` entries are eligible for dispatch.
    pub status: CommandStatus,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    /// Set when the entry is taken for execution.
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
}

impl QueueEntry {
    /// Converts a queue row into the domain model.
    ///
    /// # Arguments
    /// - `entity` - Row loaded from the `drone_command_queue` table
    ///
    /// # Returns
    /// - `Ok(QueueEntry)` - Row with its stored command type and status parsed
    /// - `Err(DbErr)` - Stored command type or status is not a known value
    pub fn from_entity(entity: entity::drone_command_queue::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            drone_id: entity.drone_id,
            command_type: parse_stored(&entity.command_type)?,
            command_data: entity.command_data,
            priority: entity.priority,
            status: parse_stored(&entity.status)?,
            created_by: entity.created_by,
            created_at: entity.created_at,
            started_at: entity.started_at,
            completed_at: entity.completed_at,
            error_message: entity.error_message,
        })
    }

    pub fn into_dto(self) -> QueueEntryDto {
        QueueEntryDto {
            id: self.id,
            drone_id: self.drone_id,
            command_type: self.command_type,
            command_data: self.command_data,
            priority: self.priority,
            status: self.status,
            created_by: self.created_by,
            created_at: self.created_at,
            started_at: self.started_at,
            completed_at: self.completed_at,
            error_message: self.error_message,
        }
    }
}

/// A command to place on a drone's queue.
#[derive(Debug, Clone, PartialEq)]
pub struct EnqueueParams {
    pub drone_id: i32,
    pub command_type: CommandType,
    pub command_data: Option<Value>,
    pub priority: i32,
    pub created_by: Option<i32>,
}

impl EnqueueParams {
    pub fn from_dto(dto: EnqueueCommandDto) -> Self {
        Self {
            drone_id: dto.drone_id,
            command_type: dto.command_type,
            command_data: dto.command_data,
            priority: dto.priority.unwrap_or(DEFAULT_PRIORITY),
            created_by: dto.created_by,
        }
    }

    /// Checks the drone id, priority range and command payload shape.
    pub fn validate(self) -> Result<Self, ValidationError> {
        validate::positive_id("drone_id", self.drone_id)?;
        validate_priority(self.priority)?;
        validate_command_data(self.command_type, self.command_data.as_ref())?;
        Ok(self)
    }
}

/// Rejects priorities outside `MIN_PRIORITY..=MAX_PRIORITY`.
pub fn validate_priority(priority: i32) -> Result<i32, ValidationError> {
    if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
        return Err(ValidationError::new(
            "priority",
            format!("must be between {} and {}", MIN_PRIORITY, MAX_PRIORITY),
        ));
    }
    Ok(priority)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueFilter {
    pub drone_id: Option<i32>,
    pub status: Option<CommandStatus>,
}

/// Queue entry counts per status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueueStatistics {
    pub pending: u64,
    pub executing: u64,
    pub completed: u64,
    pub failed: u64,
    pub cancelled: u64,
}

impl QueueStatistics {
    /// Adds `count` entries to the bucket for `status`.
    pub fn record(&mut self, status: CommandStatus, count: u64) {
        match status {
            CommandStatus::Pending => self.pending += count,
            CommandStatus::Executing => self.executing += count,
            CommandStatus::Completed => self.completed += count,
            CommandStatus::Failed => self.failed += count,
            CommandStatus::Cancelled => self.cancelled += count,
        }
    }

    pub fn total(&self) -> u64 {
        self.pending + self.executing + self.completed + self.failed + self.cancelled
    }

    pub fn into_dto(self) -> QueueStatisticsDto {
        QueueStatisticsDto {
            total: self.total(),
            pending: self.pending,
            executing: self.executing,
            completed: self.completed,
            failed: self.failed,
            cancelled: self.cancelled,
        }
    }
}
