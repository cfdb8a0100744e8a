use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};
use utoipa::{IntoParams, ToSchema};

use crate::model::api::UnknownVariant;

/// Instruction kinds a drone understands.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CommandType {
    Takeoff,
    Land,
    Hover,
    FlyTo,
    ReturnHome,
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    RotateLeft,
    RotateRight,
    Emergency,
}

impl CommandType {
    pub const ALL: [CommandType; 12] = [
        CommandType::Takeoff,
        CommandType::Land,
        CommandType::Hover,
        CommandType::FlyTo,
        CommandType::ReturnHome,
        CommandType::MoveForward,
        CommandType::MoveBackward,
        CommandType::MoveLeft,
        CommandType::MoveRight,
        CommandType::RotateLeft,
        CommandType::RotateRight,
        CommandType::Emergency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Takeoff => "takeoff",
            Self::Land => "land",
            Self::Hover => "hover",
            Self::FlyTo => "fly_to",
            Self::ReturnHome => "return_home",
            Self::MoveForward => "move_forward",
            Self::MoveBackward => "move_backward",
            Self::MoveLeft => "move_left",
            Self::MoveRight => "move_right",
            Self::RotateLeft => "rotate_left",
            Self::RotateRight => "rotate_right",
            Self::Emergency => "emergency",
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(
            self,
            Self::MoveForward | Self::MoveBackward | Self::MoveLeft | Self::MoveRight
        )
    }

    pub fn is_rotate(&self) -> bool {
        matches!(self, Self::RotateLeft | Self::RotateRight)
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| UnknownVariant::new("command type", s))
    }
}

/// Lifecycle state shared by issued commands and queue entries.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CommandStatus {
    Pending,
    Executing,
    Completed,
    Failed,
    Cancelled,
}

impl CommandStatus {
    pub const ALL: [CommandStatus; 5] = [
        CommandStatus::Pending,
        CommandStatus::Executing,
        CommandStatus::Completed,
        CommandStatus::Failed,
        CommandStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Executing => "executing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| UnknownVariant::new("command status", s))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DroneCommandDto {
    pub id: i32,
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
}

/// `drone_id` and `command_type` are kept loose so that a bad item in a batch
/// is reported per index instead of failing the whole request body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CreateDroneCommandDto {
    #[schema(value_type = i32)]
    pub drone_id: serde_json::Value,
    pub command_type: String,
    #[schema(value_type = Option<Object>)]
    pub command_data: Option<serde_json::Value>,
    pub issued_by: Option<i32>,
}

/// Only `command_data` may change, and only while the command is pending.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct UpdateDroneCommandDto {
    #[schema(value_type = Option<Object>)]
    pub command_data: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct UpdateCommandStatusDto {
    pub status: CommandStatus,
    pub error_message: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DroneCommandFilterQuery {
    pub drone_id: Option<i32>,
    pub status: Option<CommandStatus>,
    pub command_type: Option<CommandType>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DroneCommandStatisticsDto {
    pub total: u64,
    pub by_status: BTreeMap<String, u64>,
    pub by_type: BTreeMap<String, u64>,
}
