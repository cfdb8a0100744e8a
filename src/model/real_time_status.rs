use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::{IntoParams, ToSchema};

use crate::model::api::UnknownVariant;

/// Live operating state reported by a drone.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RealTimeStatus {
    Idle,
    Flying,
    Charging,
    Maintenance,
    Offline,
    Error,
}

impl RealTimeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Flying => "flying",
            Self::Charging => "charging",
            Self::Maintenance => "maintenance",
            Self::Offline => "offline",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for RealTimeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RealTimeStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "idle" => Ok(Self::Idle),
            "flying" => Ok(Self::Flying),
            "charging" => Ok(Self::Charging),
            "maintenance" => Ok(Self::Maintenance),
            "offline" => Ok(Self::Offline),
            "error" => Ok(Self::Error),
            _ => Err(UnknownVariant::new("real-time status", s)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DroneRealTimeStatusDto {
    pub id: i32,
    pub drone_id: i32,
    pub current_status: RealTimeStatus,
    pub battery_level: f64,
    pub signal_strength: Option<f64>,
    pub altitude: Option<f64>,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
    pub is_connected: bool,
    pub error_message: Option<String>,
    pub last_seen: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full snapshot pushed by a drone; replaces whatever was stored before.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct UpsertRealTimeStatusDto {
    pub current_status: RealTimeStatus,
    pub battery_level: f64,
    pub signal_strength: Option<f64>,
    pub altitude: Option<f64>,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
    #[serde(default = "default_connected")]
    pub is_connected: bool,
    pub error_message: Option<String>,
}

fn default_connected() -> bool {
    true
}

#[derive(Deserialize, Debug, Clone, Default, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RealTimeStatusFilterQuery {
    pub current_status: Option<RealTimeStatus>,
    pub is_connected: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct MarkOfflineResultDto {
    pub updated: u64,
}
