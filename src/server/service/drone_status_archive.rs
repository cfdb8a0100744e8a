use sea_orm::DatabaseConnection;

use crate::server::{
    data::{drone::DroneRepository, drone_status_archive::DroneStatusArchiveRepository},
    error::AppError,
    model::{
        drone_status_archive::{DroneStatusArchive, StatusArchiveFilter},
        pagination::{PageRequest, Paginated},
    },
    service::drone::drone_not_found,
};

/// Read side of the drone status history.
pub struct DroneStatusArchiveService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DroneStatusArchiveService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<DroneStatusArchive, AppError> {
        DroneStatusArchiveRepository::new(self.db)
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Status archive {} not found", id)))
    }

    pub async fn get_paginated(
        &self,
        filter: &StatusArchiveFilter,
        page: &PageRequest,
    ) -> Result<Paginated<DroneStatusArchive>, AppError> {
        let (rows, total) = DroneStatusArchiveRepository::new(self.db)
            .get_paginated(filter, page)
            .await?;

        Ok(Paginated::new(rows, total, page))
    }

    /// Gets a drone's status history, newest first
    pub async fn get_by_drone(&self, drone_id: i32) -> Result<Vec<DroneStatusArchive>, AppError> {
        if !DroneRepository::new(self.db).exists(drone_id).await? {
            return Err(drone_not_found(drone_id));
        }

        Ok(DroneStatusArchiveRepository::new(self.db)
            .get_by_drone(drone_id)
            .await?)
    }
}
