use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};
use utoipa::{IntoParams, ToSchema};

use crate::model::api::UnknownVariant;

/// Operational status of a registered drone.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DroneStatus {
    Active,
    Inactive,
    Maintenance,
    Flying,
}

impl DroneStatus {
    pub const ALL: [DroneStatus; 4] = [
        DroneStatus::Active,
        DroneStatus::Inactive,
        DroneStatus::Maintenance,
        DroneStatus::Flying,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Maintenance => "maintenance",
            Self::Flying => "flying",
        }
    }
}

impl fmt::Display for DroneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DroneStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "maintenance" => Ok(Self::Maintenance),
            "flying" => Ok(Self::Flying),
            _ => Err(UnknownVariant::new("drone status", s)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DroneDto {
    pub id: i32,
    pub serial: String,
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub status: DroneStatus,
    pub owner_user_id: Option<i32>,
    pub manufacture_year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CreateDroneDto {
    pub serial: String,
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    /// Defaults to `inactive`.
    pub status: Option<DroneStatus>,
    pub owner_user_id: Option<i32>,
    pub manufacture_year: Option<i32>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default, ToSchema)]
pub struct UpdateDroneDto {
    pub name: Option<String>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    /// Subject to the same transition rules as `PUT /status`.
    pub status: Option<DroneStatus>,
    pub owner_user_id: Option<i32>,
    pub manufacture_year: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct UpdateDroneStatusDto {
    pub status: DroneStatus,
    pub reason: Option<String>,
    pub changed_by: Option<i32>,
}

#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DroneFilterQuery {
    pub status: Option<DroneStatus>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DroneStatisticsDto {
    pub total: u64,
    /// Count per status; every status is present, zero included.
    pub by_status: BTreeMap<String, u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_case_insensitively() {
        assert_eq!("FLYING".parse::<DroneStatus>(), Ok(DroneStatus::Flying));
        assert_eq!("active".parse::<DroneStatus>(), Ok(DroneStatus::Active));
    }

    #[test]
    fn rejects_unknown_status() {
        let err = "crashed".parse::<DroneStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown drone status 'crashed'");
    }

    #[test]
    fn serializes_status_lowercase() {
        let json = serde_json::to_string(&DroneStatus::Maintenance).unwrap();
        assert_eq!(json, "\"maintenance\"");
    }
}
