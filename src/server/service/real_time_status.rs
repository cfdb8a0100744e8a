use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{drone::DroneRepository, real_time_status::RealTimeStatusRepository},
    error::AppError,
    model::{
        pagination::{PageRequest, Paginated},
        real_time_status::{DroneRealTimeStatus, RealTimeStatusFilter, UpsertRealTimeStatusParams},
    },
    service::drone::drone_not_found,
};

/// Latest telemetry snapshot of each drone.
pub struct RealTimeStatusService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RealTimeStatusService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Replaces the live snapshot of an existing drone
    pub async fn upsert(
        &self,
        params: UpsertRealTimeStatusParams,
    ) -> Result<DroneRealTimeStatus, AppError> {
        let params = params.validate()?;

        if !DroneRepository::new(self.db).exists(params.drone_id).await? {
            return Err(drone_not_found(params.drone_id));
        }

        Ok(RealTimeStatusRepository::new(self.db)
            .upsert(params, Utc::now())
            .await?)
    }

    /// Gets the snapshot of a drone, or `NotFound` when it has never reported
    pub async fn get_by_drone(&self, drone_id: i32) -> Result<DroneRealTimeStatus, AppError> {
        RealTimeStatusRepository::new(self.db)
            .get_by_drone(drone_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No real-time status for drone {}", drone_id))
            })
    }

    pub async fn get_paginated(
        &self,
        filter: &RealTimeStatusFilter,
        page: &PageRequest,
    ) -> Result<Paginated<DroneRealTimeStatus>, AppError> {
        let (rows, total) = RealTimeStatusRepository::new(self.db)
            .get_paginated(filter, page)
            .await?;

        Ok(Paginated::new(rows, total, page))
    }

    pub async fn delete_by_drone(&self, drone_id: i32) -> Result<(), AppError> {
        let deleted = RealTimeStatusRepository::new(self.db)
            .delete_by_drone(drone_id)
            .await?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!(
                "No real-time status for drone {}",
                drone_id
            )));
        }

        Ok(())
    }

    /// Marks connected drones not heard from within `threshold` as offline
    pub async fn mark_offline_stale(&self, threshold: Duration) -> Result<u64, AppError> {
        let now = Utc::now();
        let updated = RealTimeStatusRepository::new(self.db)
            .mark_offline_stale(now - threshold, now)
            .await?;

        if updated > 0 {
            tracing::info!(updated, "marked stale drones offline");
        }

        Ok(updated)
    }
}
