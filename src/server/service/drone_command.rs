use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde_json::Value;

use crate::{
    model::drone_command::{CommandStatus, CreateDroneCommandDto},
    server::{
        data::{drone::DroneRepository, drone_command::DroneCommandRepository},
        error::{transition::TransitionError, AppError},
        model::{
            batch::BatchOutcome,
            drone_command::{
                can_transition, validate_command_data, CommandStatistics, CreateDroneCommandParams,
                DroneCommand, DroneCommandFilter, StatusStamp,
            },
            pagination::{PageRequest, Paginated},
        },
        service::{drone::drone_not_found, run_batch},
    },
};

/// Commands issued to drones and their execution lifecycle.
pub struct DroneCommandService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DroneCommandService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Issues a command to an existing drone
    pub async fn create(&self, params: CreateDroneCommandParams) -> Result<DroneCommand, AppError> {
        if !DroneRepository::new(self.db).exists(params.drone_id).await? {
            return Err(drone_not_found(params.drone_id));
        }

        let command = DroneCommandRepository::new(self.db)
            .create(params, Utc::now())
            .await?;
        tracing::info!(
            command_id = command.id,
            drone_id = command.drone_id,
            command_type = %command.command_type,
            "command issued"
        );

        Ok(command)
    }

    /// Issues each command independently, collecting per-item failures
    pub async fn create_batch(
        &self,
        items: Vec<CreateDroneCommandDto>,
    ) -> Result<BatchOutcome<DroneCommand>, AppError> {
        run_batch(items, move |dto| self.create_from_dto(dto)).await
    }

    async fn create_from_dto(&self, dto: CreateDroneCommandDto) -> Result<DroneCommand, AppError> {
        self.create(CreateDroneCommandParams::from_dto(dto)?).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<DroneCommand, AppError> {
        DroneCommandRepository::new(self.db)
            .get_by_id(id)
            .await?
            .ok_or_else(|| command_not_found(id))
    }

    pub async fn get_paginated(
        &self,
        filter: &DroneCommandFilter,
        page: &PageRequest,
    ) -> Result<Paginated<DroneCommand>, AppError> {
        let (commands, total) = DroneCommandRepository::new(self.db)
            .get_paginated(filter, page)
            .await?;

        Ok(Paginated::new(commands, total, page))
    }

    /// Every command of an existing drone, newest first
    pub async fn get_by_drone(&self, drone_id: i32) -> Result<Vec<DroneCommand>, AppError> {
        if !DroneRepository::new(self.db).exists(drone_id).await? {
            return Err(drone_not_found(drone_id));
        }

        Ok(DroneCommandRepository::new(self.db)
            .get_by_drone(drone_id)
            .await?)
    }

    /// Replaces the payload of a command that has not started yet
    pub async fn update_data(
        &self,
        id: i32,
        command_data: Option<Value>,
    ) -> Result<DroneCommand, AppError> {
        let txn = self.db.begin().await?;
        let repo = DroneCommandRepository::new(&txn);

        let command = repo.get_by_id(id).await?.ok_or_else(|| command_not_found(id))?;
        if command.status != CommandStatus::Pending {
            return Err(AppError::BadRequest(format!(
                "Command {} is {} and can no longer be edited",
                id, command.status
            )));
        }
        validate_command_data(command.command_type, command_data.as_ref())?;

        let command = repo.update_data(id, command_data).await?;
        txn.commit().await?;

        Ok(command)
    }

    /// Moves a command along the status whitelist, stamping execution times
    ///
    /// # Arguments
    /// - `id`: Command to move
    /// - `status`: Target status
    /// - `error_message`: Recorded when the target is `failed`
    ///
    /// # Returns
    /// - `Ok(DroneCommand)`: The updated command
    /// - `Err(AppError::NotFound)`: Command does not exist
    /// - `Err(AppError::Transition)`: The change is not on the whitelist
    pub async fn update_status(
        &self,
        id: i32,
        status: CommandStatus,
        error_message: Option<String>,
    ) -> Result<DroneCommand, AppError> {
        let txn = self.db.begin().await?;
        let repo = DroneCommandRepository::new(&txn);

        let command = repo.get_by_id(id).await?.ok_or_else(|| command_not_found(id))?;
        if !can_transition(command.status, status) {
            return Err(TransitionError::new("command", command.status, status).into());
        }

        let command = repo
            .update_status(id, StatusStamp::new(status, error_message, Utc::now()))
            .await?;
        txn.commit().await?;

        tracing::info!(command_id = id, %status, "command status changed");

        Ok(command)
    }

    /// Deletes a command unless it is currently executing
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        let repo = DroneCommandRepository::new(&txn);

        let command = repo.get_by_id(id).await?.ok_or_else(|| command_not_found(id))?;
        if command.status == CommandStatus::Executing {
            return Err(AppError::BadRequest(format!(
                "Command {} is executing and cannot be deleted",
                id
            )));
        }

        repo.delete(id).await?;
        txn.commit().await?;

        Ok(())
    }

    /// Counts commands per status and per type
    pub async fn statistics(&self) -> Result<CommandStatistics, AppError> {
        let repo = DroneCommandRepository::new(self.db);
        let by_status = repo.count_by_status().await?;
        let by_type = repo.count_by_type().await?;

        Ok(CommandStatistics::from_counts(&by_status, &by_type))
    }
}

fn command_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Command {} not found", id))
}
