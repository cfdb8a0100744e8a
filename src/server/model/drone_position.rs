use chrono::{DateTime, Utc};

use crate::{
    model::drone_position::{CreateDronePositionDto, DronePositionDto, UpdateDronePositionDto},
    server::{error::validation::ValidationError, util::validate},
};

pub const MIN_ALTITUDE: f64 = -500.0;
pub const MAX_ALTITUDE: f64 = 10_000.0;

/// A single reported position of a drone.
#[derive(Debug, Clone, PartialEq)]
pub struct DronePosition {
    pub id: i32,
    pub drone_id: i32,
    /// Degrees, -90 to 90.
    pub latitude: f64,
    /// Degrees, -180 to 180.
    pub longitude: f64,
    /// Metres above takeoff.
    pub altitude: f64,
    pub speed: Option<f64>,
    /// Degrees clockwise from north, 0 to 360.
    pub heading: Option<f64>,
    pub battery_level: Option<f64>,
    pub signal_strength: Option<f64>,
    /// When the drone took the reading, as opposed to when it was stored.
    pub recorded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl DronePosition {
    /// Converts a `drone_position` row into the domain model.
    ///
    /// # Arguments
    /// - `entity` - Row loaded from the `drone_positions` table
    ///
    /// # Returns
    /// - `DronePosition` - Domain model with identical fields
    pub fn from_entity(entity: entity::drone_position::Model) -> Self {
        Self {
            id: entity.id,
            drone_id: entity.drone_id,
            latitude: entity.latitude,
            longitude: entity.longitude,
            altitude: entity.altitude,
            speed: entity.speed,
            heading: entity.heading,
            battery_level: entity.battery_level,
            signal_strength: entity.signal_strength,
            recorded_at: entity.recorded_at,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> DronePositionDto {
        DronePositionDto {
            id: self.id,
            drone_id: self.drone_id,
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
            speed: self.speed,
            heading: self.heading,
            battery_level: self.battery_level,
            signal_strength: self.signal_strength,
            recorded_at: self.recorded_at,
            created_at: self.created_at,
        }
    }
}

/// A position report ready to store.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDronePositionParams {
    pub drone_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
    pub battery_level: Option<f64>,
    pub signal_strength: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

impl CreateDronePositionParams {
    /// `recorded_at` falls back to `now` when the report does not carry one.
    pub fn from_dto(dto: CreateDronePositionDto, now: DateTime<Utc>) -> Self {
        Self {
            drone_id: dto.drone_id,
            latitude: dto.latitude,
            longitude: dto.longitude,
            altitude: dto.altitude,
            speed: dto.speed,
            heading: dto.heading,
            battery_level: dto.battery_level,
            signal_strength: dto.signal_strength,
            recorded_at: dto.recorded_at.unwrap_or(now),
        }
    }

    /// Checks coordinate, battery, signal, speed and heading ranges.
    ///
    /// # Returns
    /// - `Ok(Self)` - Every field within range
    /// - `Err(ValidationError)` - First field found out of range
    pub fn validate(self) -> Result<Self, ValidationError> {
        validate::positive_id("drone_id", self.drone_id)?;
        validate::in_range("latitude", self.latitude, -90.0, 90.0)?;
        validate::in_range("longitude", self.longitude, -180.0, 180.0)?;
        validate::in_range("altitude", self.altitude, MIN_ALTITUDE, MAX_ALTITUDE)?;
        validate_telemetry(
            self.speed,
            self.heading,
            self.battery_level,
            self.signal_strength,
        )?;
        Ok(self)
    }
}

/// Partial correction of a stored position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateDronePositionParams {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    pub speed: Option<f64>,
    pub heading: Option<f64>,
    pub battery_level: Option<f64>,
    pub signal_strength: Option<f64>,
}

impl UpdateDronePositionParams {
    pub fn from_dto(dto: UpdateDronePositionDto) -> Self {
        Self {
            latitude: dto.latitude,
            longitude: dto.longitude,
            altitude: dto.altitude,
            speed: dto.speed,
            heading: dto.heading,
            battery_level: dto.battery_level,
            signal_strength: dto.signal_strength,
        }
    }

    pub fn validate(self) -> Result<Self, ValidationError> {
        validate::opt_in_range("latitude", self.latitude, -90.0, 90.0)?;
        validate::opt_in_range("longitude", self.longitude, -180.0, 180.0)?;
        validate::opt_in_range("altitude", self.altitude, MIN_ALTITUDE, MAX_ALTITUDE)?;
        validate_telemetry(
            self.speed,
            self.heading,
            self.battery_level,
            self.signal_strength,
        )?;
        Ok(self)
    }
}

fn validate_telemetry(
    speed: Option<f64>,
    heading: Option<f64>,
    battery_level: Option<f64>,
    signal_strength: Option<f64>,
) -> Result<(), ValidationError> {
    validate::opt_non_negative("speed", speed)?;
    validate::opt_heading("heading", heading)?;
    validate::opt_percentage("battery_level", battery_level)?;
    validate::opt_percentage("signal_strength", signal_strength)?;
    Ok(())
}

/// Restricts a position listing to one drone and an inclusive time window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DronePositionFilter {
    pub drone_id: Option<i32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}
