use chrono::{DateTime, Datelike, Utc};
use sea_orm::DbErr;

use crate::{
    model::drone::{CreateDroneDto, DroneDto, DroneStatisticsDto, DroneStatus, UpdateDroneDto},
    server::{error::validation::ValidationError, model::parse_stored, util::validate},
};

pub const MAX_SERIAL_LEN: usize = 100;
pub const MAX_NAME_LEN: usize = 100;
pub const MIN_MANUFACTURE_YEAR: i32 = 1900;

/// A registered drone.
#[derive(Debug, Clone, PartialEq)]
pub struct Drone {
    pub id: i32,
    /// Manufacturer serial number, unique across the fleet.
    pub serial: String,
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    /// Lifecycle status; changes are recorded in the status archive.
    pub status: DroneStatus,
    /// User responsible for the drone, if any.
    pub owner_user_id: Option<i32>,
    /// Year of manufacture, between 1900 and next year.
    pub manufacture_year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Drone {
    /// Converts an entity model to a drone.
    ///
    /// This conversion happens at the data layer boundary to ensure entity models
    /// never leak into service or controller layers.
    pub fn from_entity(entity: entity::drone::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            status: parse_stored(&entity.status)?,
            serial: entity.serial,
            name: entity.name,
            model: entity.model,
            manufacturer: entity.manufacturer,
            owner_user_id: entity.owner_user_id,
            manufacture_year: entity.manufacture_year,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Converts to the wire representation.
    pub fn into_dto(self) -> DroneDto {
        DroneDto {
            id: self.id,
            serial: self.serial,
            name: self.name,
            model: self.model,
            manufacturer: self.manufacturer,
            status: self.status,
            owner_user_id: self.owner_user_id,
            manufacture_year: self.manufacture_year,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Statuses a drone may move to from `from`.
///
/// Staying in the same status is handled by callers as a no-op and is not listed.
pub fn allowed_transitions(from: DroneStatus) -> &'static [DroneStatus] {
    use DroneStatus::*;

    match from {
        Active => &[Flying, Maintenance, Inactive],
        Flying => &[Active, Maintenance],
        Maintenance => &[Active, Inactive],
        Inactive => &[Active, Maintenance],
    }
}

/// Whether the whitelist allows moving from `from` to `to`.
pub fn can_transition(from: DroneStatus, to: DroneStatus) -> bool {
    allowed_transitions(from).contains(&to)
}

/// Parameters for registering a drone.
///
/// Text fields are trimmed by `validate`; the service calls it before touching the database.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDroneParams {
    pub serial: String,
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    /// Initial status, `inactive` unless the request names one.
    pub status: DroneStatus,
    pub owner_user_id: Option<i32>,
    pub manufacture_year: Option<i32>,
}

impl CreateDroneParams {
    /// Builds parameters from a request body, defaulting the status.
    pub fn from_dto(dto: CreateDroneDto) -> Self {
        Self {
            serial: dto.serial,
            name: dto.name,
            model: dto.model,
            manufacturer: dto.manufacturer,
            status: dto.status.unwrap_or(DroneStatus::Inactive),
            owner_user_id: dto.owner_user_id,
            manufacture_year: dto.manufacture_year,
        }
    }

    /// Trims text fields and checks required values and ranges.
    ///
    /// # Returns
    /// - `Ok(Self)` - Normalized parameters
    /// - `Err(ValidationError)` - Blank or over-long text, non-positive owner id, or a
    ///   manufacture year outside 1900..=next year
    pub fn validate(self) -> Result<Self, ValidationError> {
        Ok(Self {
            serial: validate::bounded_text("serial", &self.serial, MAX_SERIAL_LEN)?,
            name: validate::bounded_text("name", &self.name, MAX_NAME_LEN)?,
            model: validate::bounded_text("model", &self.model, MAX_NAME_LEN)?,
            manufacturer: validate::bounded_text(
                "manufacturer",
                &self.manufacturer,
                MAX_NAME_LEN,
            )?,
            owner_user_id: self
                .owner_user_id
                .map(|id| validate::positive_id("owner_user_id", id))
                .transpose()?,
            manufacture_year: validate_year(self.manufacture_year)?,
            status: self.status,
        })
    }
}

/// Partial update of a drone's descriptive fields; status changes travel separately.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateDroneParams {
    pub name: Option<String>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub owner_user_id: Option<i32>,
    pub manufacture_year: Option<i32>,
}

impl UpdateDroneParams {
    /// Splits the DTO into field updates and an optional status change.
    pub fn from_dto(dto: UpdateDroneDto) -> (Self, Option<DroneStatus>) {
        (
            Self {
                name: dto.name,
                model: dto.model,
                manufacturer: dto.manufacturer,
                owner_user_id: dto.owner_user_id,
                manufacture_year: dto.manufacture_year,
            },
            dto.status,
        )
    }

    /// Applies the create-time checks to the fields that are present.
    pub fn validate(self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: self
                .name
                .map(|v| validate::bounded_text("name", &v, MAX_NAME_LEN))
                .transpose()?,
            model: self
                .model
                .map(|v| validate::bounded_text("model", &v, MAX_NAME_LEN))
                .transpose()?,
            manufacturer: self
                .manufacturer
                .map(|v| validate::bounded_text("manufacturer", &v, MAX_NAME_LEN))
                .transpose()?,
            owner_user_id: self
                .owner_user_id
                .map(|id| validate::positive_id("owner_user_id", id))
                .transpose()?,
            manufacture_year: validate_year(self.manufacture_year)?,
        })
    }

    /// Whether the update carries no field at all.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn validate_year(year: Option<i32>) -> Result<Option<i32>, ValidationError> {
    let max = Utc::now().year() + 1;
    match year {
        Some(y) if !(MIN_MANUFACTURE_YEAR..=max).contains(&y) => Err(ValidationError::new(
            "manufacture_year",
            format!("must be between {} and {}", MIN_MANUFACTURE_YEAR, max),
        )),
        other => Ok(other),
    }
}

/// A requested status change with its audit details.
#[derive(Debug, Clone, PartialEq)]
pub struct DroneStatusChange {
    pub drone_id: i32,
    pub status: DroneStatus,
    /// Free-text reason stored on the archive row.
    pub reason: Option<String>,
    /// User who requested the change.
    pub changed_by: Option<i32>,
}

/// Optional filters for listing drones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DroneFilter {
    pub status: Option<DroneStatus>,
}

/// Drone counts for every status, zero included.
#[derive(Debug, Clone, PartialEq)]
pub struct DroneStatistics {
    pub by_status: Vec<(DroneStatus, u64)>,
}

impl DroneStatistics {
    /// Fills in zero for every status missing from `counts`.
    pub fn from_counts(counts: &[(DroneStatus, u64)]) -> Self {
        let by_status = DroneStatus::ALL
            .iter()
            .map(|status| {
                let count = counts
                    .iter()
                    .filter(|(s, _)| s == status)
                    .map(|(_, n)| n)
                    .sum();
                (*status, count)
            })
            .collect();

        Self { by_status }
    }

    pub fn total(&self) -> u64 {
        self.by_status.iter().map(|(_, n)| n).sum()
    }

    pub fn into_dto(self) -> DroneStatisticsDto {
        DroneStatisticsDto {
            total: self.total(),
            by_status: self
                .by_status
                .into_iter()
                .map(|(status, n)| (status.as_str().to_string(), n))
                .collect(),
        }
    }
}
