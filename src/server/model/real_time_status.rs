use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::real_time_status::{DroneRealTimeStatusDto, RealTimeStatus, UpsertRealTimeStatusDto},
    server::{error::validation::ValidationError, model::parse_stored, util::validate},
};

/// Latest telemetry snapshot for one drone.
#[derive(Debug, Clone, PartialEq)]
pub struct DroneRealTimeStatus {
    pub id: i32,
    pub drone_id: i32,
    pub current_status: RealTimeStatus,
    /// Percent, 0 to 100.
    pub battery_level: f64,
    pub signal_strength: Option<f64>,
    pub altitude: Option<f64>,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
    pub is_connected: bool,
    pub error_message: Option<String>,
    /// Time of the last report; connection sweeps compare against this.
    pub last_seen: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DroneRealTimeStatus {
    /// Converts a real-time status row into the domain model.
    ///
    /// # Arguments
    /// - `entity` - Row loaded from the `drone_real_time_status` table
    ///
    /// # Returns
    /// - `Ok(DroneRealTimeStatus)` - Row with its stored status parsed
    /// - `Err(DbErr)` - Stored status is not a known value
    pub fn from_entity(entity: entity::drone_real_time_status::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            drone_id: entity.drone_id,
            current_status: parse_stored(&entity.current_status)?,
            battery_level: entity.battery_level,
            signal_strength: entity.signal_strength,
            altitude: entity.altitude,
            speed: entity.speed,
            heading: entity.heading,
            is_connected: entity.is_connected,
            error_message: entity.error_message,
            last_seen: entity.last_seen,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> DroneRealTimeStatusDto {
        DroneRealTimeStatusDto {
            id: self.id,
            drone_id: self.drone_id,
            current_status: self.current_status,
            battery_level: self.battery_level,
            signal_strength: self.signal_strength,
            altitude: self.altitude,
            speed: self.speed,
            heading: self.heading,
            is_connected: self.is_connected,
            error_message: self.error_message,
            last_seen: self.last_seen,
            updated_at: self.updated_at,
        }
    }
}

/// A telemetry report that replaces the drone's current snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertRealTimeStatusParams {
    pub drone_id: i32,
    pub current_status: RealTimeStatus,
    pub battery_level: f64,
    pub signal_strength: Option<f64>,
    pub altitude: Option<f64>,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
    pub is_connected: bool,
    pub error_message: Option<String>,
}

impl UpsertRealTimeStatusParams {
    pub fn from_dto(drone_id: i32, dto: UpsertRealTimeStatusDto) -> Self {
        Self {
            drone_id,
            current_status: dto.current_status,
            battery_level: dto.battery_level,
            signal_strength: dto.signal_strength,
            altitude: dto.altitude,
            speed: dto.speed,
            heading: dto.heading,
            is_connected: dto.is_connected,
            error_message: dto.error_message,
        }
    }

    pub fn validate(self) -> Result<Self, ValidationError> {
        validate::positive_id("drone_id", self.drone_id)?;
        validate::in_range("battery_level", self.battery_level, 0.0, 100.0)?;
        validate::opt_percentage("signal_strength", self.signal_strength)?;
        validate::opt_non_negative("speed", self.speed)?;
        validate::opt_heading("heading", self.heading)?;
        Ok(self)
    }
}

/// Optional filters for listing snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RealTimeStatusFilter {
    pub current_status: Option<RealTimeStatus>,
    pub is_connected: Option<bool>,
}
