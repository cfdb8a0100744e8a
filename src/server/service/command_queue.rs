use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::drone_command::CommandStatus,
    server::{
        data::{command_queue::CommandQueueRepository, drone::DroneRepository},
        error::{internal::InternalError, transition::TransitionError, AppError},
        model::{
            command_queue::{validate_priority, EnqueueParams, QueueEntry, QueueFilter, QueueStatistics},
            drone_command::{can_transition, StatusStamp},
            pagination::{PageRequest, Paginated},
        },
        service::drone::drone_not_found,
    },
};

/// How many times a dequeue retries after losing a claim to another dequeuer.
const MAX_CLAIM_ATTEMPTS: u32 = 3;

/// Priority queue of commands waiting to be handed to drones.
pub struct CommandQueueService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommandQueueService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a command to the queue for an existing drone
    ///
    /// # Arguments
    /// - `params`: Entry to queue; priority must be within 1..=10
    ///
    /// # Returns
    /// - `Ok(QueueEntry)`: The pending entry
    /// - `Err(AppError::Validation)`: Priority out of range or payload invalid for the type
    /// - `Err(AppError::NotFound)`: Drone does not exist
    pub async fn enqueue(&self, params: EnqueueParams) -> Result<QueueEntry, AppError> {
        let params = params.validate()?;

        if !DroneRepository::new(self.db).exists(params.drone_id).await? {
            return Err(drone_not_found(params.drone_id));
        }

        let entry = CommandQueueRepository::new(self.db)
            .enqueue(params, Utc::now())
            .await?;
        tracing::debug!(
            entry_id = entry.id,
            drone_id = entry.drone_id,
            priority = entry.priority,
            "command queued"
        );

        Ok(entry)
    }

    /// Gets a queue entry, or `NotFound`
    pub async fn get_by_id(&self, id: i32) -> Result<QueueEntry, AppError> {
        CommandQueueRepository::new(self.db)
            .get_by_id(id)
            .await?
            .ok_or_else(|| entry_not_found(id))
    }

    /// Pending entries of one priority, oldest first
    pub async fn find_by_priority(&self, priority: i32) -> Result<Vec<QueueEntry>, AppError> {
        let priority = validate_priority(priority)?;

        Ok(CommandQueueRepository::new(self.db)
            .get_pending_by_priority(priority)
            .await?)
    }

    /// Every entry of a drone in dequeue order
    pub async fn find_by_drone(&self, drone_id: i32) -> Result<Vec<QueueEntry>, AppError> {
        if !DroneRepository::new(self.db).exists(drone_id).await? {
            return Err(drone_not_found(drone_id));
        }

        Ok(CommandQueueRepository::new(self.db)
            .get_by_drone(drone_id)
            .await?)
    }

    pub async fn get_paginated(
        &self,
        filter: &QueueFilter,
        page: &PageRequest,
    ) -> Result<Paginated<QueueEntry>, AppError> {
        let (entries, total) = CommandQueueRepository::new(self.db)
            .get_paginated(filter, page)
            .await?;

        Ok(Paginated::new(entries, total, page))
    }

    /// Claims the next pending entry and marks it executing
    ///
    /// The candidate is the oldest entry of the highest pending priority. The claim is a
    /// conditional update on `status = pending`, so an entry is handed out at most once;
    /// losing the race to another dequeuer moves on to the next candidate.
    ///
    /// # Returns
    /// - `Ok(Some(QueueEntry))`: The claimed entry, now `executing`
    /// - `Ok(None)`: Nothing pending
    /// - `Err(InternalError::ClaimRetriesExhausted)`: Lost the claim on every attempt
    pub async fn dequeue_next(&self, drone_id: Option<i32>) -> Result<Option<QueueEntry>, AppError> {
        let txn = self.db.begin().await?;
        let repo = CommandQueueRepository::new(&txn);

        for attempt in 1..=MAX_CLAIM_ATTEMPTS {
            let Some(candidate) = repo.next_pending(drone_id).await? else {
                txn.commit().await?;
                return Ok(None);
            };

            let stamp = StatusStamp::new(CommandStatus::Executing, None, Utc::now());
            if repo.transition(candidate.id, CommandStatus::Pending, stamp).await? == 1 {
                let entry = repo
                    .get_by_id(candidate.id)
                    .await?
                    .ok_or_else(|| entry_not_found(candidate.id))?;
                txn.commit().await?;

                tracing::info!(entry_id = entry.id, drone_id = entry.drone_id, "queue entry claimed");
                return Ok(Some(entry));
            }

            tracing::debug!(entry_id = candidate.id, attempt, "lost queue claim, retrying");
        }

        Err(InternalError::ClaimRetriesExhausted {
            attempts: MAX_CLAIM_ATTEMPTS,
        }
        .into())
    }

    /// Moves a pending entry to executing, stamping `started_at`
    pub async fn mark_as_executing(&self, id: i32) -> Result<QueueEntry, AppError> {
        self.move_entry(id, CommandStatus::Executing, None).await
    }

    /// Moves an executing entry to completed, stamping `completed_at`
    pub async fn mark_completed(&self, id: i32) -> Result<QueueEntry, AppError> {
        self.move_entry(id, CommandStatus::Completed, None).await
    }

    /// Moves a pending or executing entry to failed, recording the error
    pub async fn mark_failed(&self, id: i32, error_message: String) -> Result<QueueEntry, AppError> {
        self.move_entry(id, CommandStatus::Failed, Some(error_message))
            .await
    }

    /// Cancels an entry that has not started
    pub async fn cancel(&self, id: i32) -> Result<QueueEntry, AppError> {
        self.move_entry(id, CommandStatus::Cancelled, None).await
    }

    /// Deletes finished entries completed before `older_than`
    pub async fn cleanup(&self, older_than: DateTime<Utc>) -> Result<u64, AppError> {
        let deleted = CommandQueueRepository::new(self.db)
            .delete_finished_before(older_than)
            .await?;

        if deleted > 0 {
            tracing::info!(deleted, "cleaned up finished queue entries");
        }

        Ok(deleted)
    }

    /// Counts entries per status
    pub async fn statistics(&self) -> Result<QueueStatistics, AppError> {
        let counts = CommandQueueRepository::new(self.db).count_by_status().await?;

        let mut statistics = QueueStatistics::default();
        for (status, count) in counts {
            statistics.record(status, count);
        }

        Ok(statistics)
    }

    async fn move_entry(
        &self,
        id: i32,
        to: CommandStatus,
        error_message: Option<String>,
    ) -> Result<QueueEntry, AppError> {
        let txn = self.db.begin().await?;
        let repo = CommandQueueRepository::new(&txn);

        let entry = repo.get_by_id(id).await?.ok_or_else(|| entry_not_found(id))?;
        if !can_transition(entry.status, to) {
            return Err(TransitionError::new("queue entry", entry.status, to).into());
        }

        let stamp = StatusStamp::new(to, error_message, Utc::now());
        if repo.transition(id, entry.status, stamp).await? == 0 {
            let current = repo.get_by_id(id).await?.ok_or_else(|| entry_not_found(id))?;
            return Err(TransitionError::new("queue entry", current.status, to).into());
        }

        let entry = repo.get_by_id(id).await?.ok_or_else(|| entry_not_found(id))?;
        txn.commit().await?;

        Ok(entry)
    }
}

fn entry_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Queue entry {} not found", id))
}
