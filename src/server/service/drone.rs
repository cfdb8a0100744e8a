use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::drone::DroneStatus,
    server::{
        data::{drone::DroneRepository, drone_status_archive::DroneStatusArchiveRepository},
        error::{transition::TransitionError, AppError},
        model::{
            drone::{
                can_transition, CreateDroneParams, Drone, DroneFilter, DroneStatistics,
                DroneStatusChange, UpdateDroneParams,
            },
            drone_status_archive::CreateStatusArchiveParams,
            pagination::{PageRequest, Paginated},
        },
    },
};

/// Drone registry and lifecycle status.
pub struct DroneService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DroneService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a drone; the serial must not be taken
    pub async fn create(&self, params: CreateDroneParams) -> Result<Drone, AppError> {
        let params = params.validate()?;
        let repo = DroneRepository::new(self.db);

        if repo.get_by_serial(&params.serial).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Drone with serial '{}' already exists",
                params.serial
            )));
        }

        let drone = repo.create(params).await?;
        tracing::info!(drone_id = drone.id, serial = %drone.serial, "drone registered");

        Ok(drone)
    }

    /// Gets a drone, or `NotFound`
    pub async fn get_by_id(&self, id: i32) -> Result<Drone, AppError> {
        DroneRepository::new(self.db)
            .get_by_id(id)
            .await?
            .ok_or_else(|| drone_not_found(id))
    }

    pub async fn get_by_serial(&self, serial: &str) -> Result<Drone, AppError> {
        DroneRepository::new(self.db)
            .get_by_serial(serial.trim())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Drone with serial '{}' not found", serial)))
    }

    pub async fn get_paginated(
        &self,
        filter: &DroneFilter,
        page: &PageRequest,
    ) -> Result<Paginated<Drone>, AppError> {
        let (drones, total) = DroneRepository::new(self.db)
            .get_paginated(filter, page)
            .await?;

        Ok(Paginated::new(drones, total, page))
    }

    /// Updates descriptive fields and, when requested, the status
    ///
    /// A status change goes through the same whitelist and archive-on-write as
    /// `update_status`, in the same transaction as the field update.
    pub async fn update(
        &self,
        id: i32,
        params: UpdateDroneParams,
        status: Option<DroneStatus>,
    ) -> Result<Drone, AppError> {
        let params = params.validate()?;
        let txn = self.db.begin().await?;
        let repo = DroneRepository::new(&txn);

        let mut drone = repo.get_by_id(id).await?.ok_or_else(|| drone_not_found(id))?;

        if !params.is_empty() {
            drone = repo.update(id, params).await?;
        }
        if let Some(status) = status {
            drone = apply_status_change(
                &txn,
                drone,
                DroneStatusChange {
                    drone_id: id,
                    status,
                    reason: None,
                    changed_by: None,
                },
            )
            .await?;
        }

        txn.commit().await?;

        Ok(drone)
    }

    /// Changes a drone's status and records the change in the status archive
    ///
    /// Requesting the current status is a no-op and writes no archive row.
    pub async fn update_status(&self, change: DroneStatusChange) -> Result<Drone, AppError> {
        let txn = self.db.begin().await?;

        let drone = DroneRepository::new(&txn)
            .get_by_id(change.drone_id)
            .await?
            .ok_or_else(|| drone_not_found(change.drone_id))?;
        let drone = apply_status_change(&txn, drone, change).await?;

        txn.commit().await?;

        Ok(drone)
    }

    /// Deletes a drone; its telemetry, commands and history cascade
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let deleted = DroneRepository::new(self.db).delete(id).await?;
        if deleted == 0 {
            return Err(drone_not_found(id));
        }

        tracing::info!(drone_id = id, "drone deleted");

        Ok(())
    }

    /// Counts drones per status, including statuses with no drones
    pub async fn statistics(&self) -> Result<DroneStatistics, AppError> {
        let counts = DroneRepository::new(self.db).count_by_status().await?;

        Ok(DroneStatistics::from_counts(&counts))
    }
}

pub(crate) fn drone_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Drone {} not found", id))
}

/// Writes a whitelisted status change plus its archive row on `db`
async fn apply_status_change<C: ConnectionTrait>(
    db: &C,
    drone: Drone,
    change: DroneStatusChange,
) -> Result<Drone, AppError> {
    let from = drone.status;
    let to = change.status;

    if from == to {
        return Ok(drone);
    }
    if !can_transition(from, to) {
        return Err(TransitionError::new("drone", from, to).into());
    }

    let updated = DroneRepository::new(db).set_status(drone.id, to).await?;
    DroneStatusArchiveRepository::new(db)
        .create(CreateStatusArchiveParams {
            drone_id: drone.id,
            status: to,
            previous_status: Some(from),
            reason: change
                .reason
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
            changed_by: change.changed_by,
        })
        .await?;

    tracing::info!(drone_id = drone.id, %from, %to, "drone status changed");

    Ok(updated)
}
