use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::drone::DroneStatus;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DroneStatusArchiveDto {
    pub id: i32,
    pub drone_id: i32,
    pub status: DroneStatus,
    pub previous_status: Option<DroneStatus>,
    pub reason: Option<String>,
    pub changed_by: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DroneStatusArchiveFilterQuery {
    pub drone_id: Option<i32>,
    pub status: Option<DroneStatus>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}
