use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::{IntoParams, ToSchema};

use crate::model::{
    api::UnknownVariant,
    drone_command::{CommandStatus, CommandType},
};

/// Which live table an archive task drains.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveTaskType {
    Positions,
    Commands,
}

impl ArchiveTaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positions => "positions",
            Self::Commands => "commands",
        }
    }
}

impl fmt::Display for ArchiveTaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchiveTaskType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "positions" => Ok(Self::Positions),
            "commands" => Ok(Self::Commands),
            _ => Err(UnknownVariant::new("archive task type", s)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveTaskStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl ArchiveTaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ArchiveTaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArchiveTaskStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "running" => Ok(Self::Running),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(UnknownVariant::new("archive task status", s)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ArchiveTaskDto {
    pub id: i32,
    pub task_type: ArchiveTaskType,
    pub status: ArchiveTaskStatus,
    pub date_range_start: DateTime<Utc>,
    pub date_range_end: DateTime<Utc>,
    pub batch_id: String,
    pub total_records: i64,
    pub archived_records: i64,
    pub error_message: Option<String>,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CreateArchiveTaskDto {
    pub task_type: ArchiveTaskType,
    pub date_range_start: DateTime<Utc>,
    pub date_range_end: DateTime<Utc>,
    pub created_by: Option<i32>,
}

#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ArchiveTaskFilterQuery {
    pub status: Option<ArchiveTaskStatus>,
    pub task_type: Option<ArchiveTaskType>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DronePositionArchiveDto {
    pub id: i32,
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
    pub archived_at: DateTime<Utc>,
    pub archive_batch_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DroneCommandArchiveDto {
    pub id: i32,
    pub original_id: i32,
    pub drone_id: i32,
    pub command_type: CommandType,
    #[schema(value_type = Option<Object>)]
    pub command_data: Option<serde_json::Value>,
    pub status: CommandStatus,
    pub issued_by: Option<i32>,
    pub issued_at: DateTime<Utc>,
    pub executed_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub archived_at: DateTime<Utc>,
    pub archive_batch_id: String,
}

/// Shared filter for both archive tables; the time range applies to the
/// original `recorded_at` / `issued_at` column.
#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ArchiveFilterQuery {
    pub drone_id: Option<i32>,
    pub archive_batch_id: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}
