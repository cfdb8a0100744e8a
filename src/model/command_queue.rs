use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::drone_command::{CommandStatus, CommandType};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct QueueEntryDto {
    pub id: i32,
    pub drone_id: i32,
    pub command_type: CommandType,
    #[schema(value_type = Option<Object>)]
    pub command_data: Option<serde_json::Value>,
    pub priority: i32,
    pub status: CommandStatus,
    pub created_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct EnqueueCommandDto {
    pub drone_id: i32,
    pub command_type: CommandType,
    #[schema(value_type = Option<Object>)]
    pub command_data: Option<serde_json::Value>,
    /// 1 (lowest) through 10 (highest); defaults to 5.
    pub priority: Option<i32>,
    pub created_by: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, ToSchema)]
pub struct DequeueDto {
    /// Restrict the claim to one drone's queue.
    pub drone_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct FailQueueEntryDto {
    pub error_message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CleanupQueueDto {
    /// Terminal entries completed before this instant are removed.
    pub older_than: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CleanupResultDto {
    pub deleted: u64,
}

#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct QueueFilterQuery {
    pub drone_id: Option<i32>,
    pub status: Option<CommandStatus>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, ToSchema)]
pub struct QueueStatisticsDto {
    pub pending: u64,
    pub executing: u64,
    pub completed: u64,
    pub failed: u64,
    pub cancelled: u64,
    pub total: u64,
}
