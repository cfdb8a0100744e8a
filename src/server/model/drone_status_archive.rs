use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::{
    model::{drone::DroneStatus, drone_status_archive::DroneStatusArchiveDto},
    server::model::parse_stored,
};

/// Audit row written whenever a drone's status actually changes.
#[derive(Debug, Clone, PartialEq)]
pub struct DroneStatusArchive {
    pub id: i32,
    pub drone_id: i32,
    pub status: DroneStatus,
    /// `None` for the first recorded status of a drone.
    pub previous_status: Option<DroneStatus>,
    pub reason: Option<String>,
    /// User who made the change, when known.
    pub changed_by: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl DroneStatusArchive {
    /// Converts a status archive row into the domain model.
    ///
    /// # Returns
    /// - `Ok(DroneStatusArchive)` - Row with both statuses parsed
    /// - `Err(DbErr)` - A stored status is not a known value
    pub fn from_entity(entity: entity::drone_status_archive::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            drone_id: entity.drone_id,
            status: parse_stored(&entity.status)?,
            previous_status: entity
                .previous_status
                .as_deref()
                .map(parse_stored)
                .transpose()?,
            reason: entity.reason,
            changed_by: entity.changed_by,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> DroneStatusArchiveDto {
        DroneStatusArchiveDto {
            id: self.id,
            drone_id: self.drone_id,
            status: self.status,
            previous_status: self.previous_status,
            reason: self.reason,
            changed_by: self.changed_by,
            created_at: self.created_at,
        }
    }
}

/// Fields for a new audit row.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateStatusArchiveParams {
    pub drone_id: i32,
    pub status: DroneStatus,
    pub previous_status: Option<DroneStatus>,
    pub reason: Option<String>,
    pub changed_by: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusArchiveFilter {
    pub drone_id: Option<i32>,
    pub status: Option<DroneStatus>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}
