use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    model::drone_position::CreateDronePositionDto,
    server::{
        data::{drone::DroneRepository, drone_position::DronePositionRepository},
        error::AppError,
        model::{
            batch::BatchOutcome,
            drone_position::{
                CreateDronePositionParams, DronePosition, DronePositionFilter,
                UpdateDronePositionParams,
            },
            pagination::{PageRequest, Paginated},
        },
        service::{drone::drone_not_found, run_batch},
    },
};

/// Position reports sent by drones.
pub struct DronePositionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DronePositionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a position report for an existing drone
    pub async fn create(&self, params: CreateDronePositionParams) -> Result<DronePosition, AppError> {
        let params = params.validate()?;

        if !DroneRepository::new(self.db).exists(params.drone_id).await? {
            return Err(drone_not_found(params.drone_id));
        }

        Ok(DronePositionRepository::new(self.db).create(params).await?)
    }

    /// Stores each report independently
    pub async fn create_batch(
        &self,
        items: Vec<CreateDronePositionDto>,
    ) -> Result<BatchOutcome<DronePosition>, AppError> {
        let now = Utc::now();

        run_batch(items, move |dto| {
            self.create(CreateDronePositionParams::from_dto(dto, now))
        })
        .await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<DronePosition, AppError> {
        DronePositionRepository::new(self.db)
            .get_by_id(id)
            .await?
            .ok_or_else(|| position_not_found(id))
    }

    pub async fn get_paginated(
        &self,
        filter: &DronePositionFilter,
        page: &PageRequest,
    ) -> Result<Paginated<DronePosition>, AppError> {
        let (positions, total) = DronePositionRepository::new(self.db)
            .get_paginated(filter, page)
            .await?;

        Ok(Paginated::new(positions, total, page))
    }

    /// Gets the most recent position of a drone, or `NotFound` when it has reported none
    pub async fn get_latest_by_drone(&self, drone_id: i32) -> Result<DronePosition, AppError> {
        DronePositionRepository::new(self.db)
            .get_latest_by_drone(drone_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No positions for drone {}", drone_id)))
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateDronePositionParams,
    ) -> Result<DronePosition, AppError> {
        let params = params.validate()?;
        let repo = DronePositionRepository::new(self.db);

        if repo.get_by_id(id).await?.is_none() {
            return Err(position_not_found(id));
        }

        Ok(repo.update(id, params).await?)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let deleted = DronePositionRepository::new(self.db).delete(id).await?;
        if deleted == 0 {
            return Err(position_not_found(id));
        }

        Ok(())
    }
}

fn position_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Position {} not found", id))
}
