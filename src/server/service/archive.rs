//! Archive tasks and the read side of both archive tables.
//!
//! Running a task moves every live row of its window into the matching archive table
//! inside one transaction: rows are copied in chunks, the copied originals deleted, and
//! the copy and delete counts compared before commit. The task row itself is updated
//! outside that transaction so a failed run still records why it failed.

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::archive::{ArchiveTaskStatus, ArchiveTaskType},
    server::{
        data::archive::{
            command::CommandArchiveRepository, position::PositionArchiveRepository,
            task::ArchiveTaskRepository, MovedRows,
        },
        error::{internal::InternalError, AppError},
        model::{
            archive::{
                new_batch_id, ArchiveFilter, ArchiveOutcome, ArchiveTask, ArchiveTaskFilter,
                CreateArchiveTaskParams, DroneCommandArchive, DronePositionArchive,
            },
            pagination::{PageRequest, Paginated},
        },
    },
};

/// Archive tasks and archived rows.
pub struct ArchiveService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ArchiveService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a pending task for a validated window
    ///
    /// # Arguments
    /// - `params`: Task type and `[start, end)` window; `start` must be before `end`
    ///
    /// # Returns
    /// - `Ok(ArchiveTask)`: The pending task with a fresh batch id
    /// - `Err(AppError::Validation)`: Inverted or empty window
    pub async fn create_task(&self, params: CreateArchiveTaskParams) -> Result<ArchiveTask, AppError> {
        let params = params.validate()?;
        let now = Utc::now();
        let batch_id = new_batch_id(params.task_type, now);

        let task = ArchiveTaskRepository::new(self.db)
            .create(params, batch_id, now)
            .await?;
        tracing::info!(task_id = task.id, batch_id = %task.batch_id, "archive task created");

        Ok(task)
    }

    /// Gets a task, or `NotFound`
    pub async fn get_task(&self, id: i32) -> Result<ArchiveTask, AppError> {
        ArchiveTaskRepository::new(self.db)
            .get_by_id(id)
            .await?
            .ok_or_else(|| task_not_found(id))
    }

    pub async fn get_tasks_paginated(
        &self,
        filter: &ArchiveTaskFilter,
        page: &PageRequest,
    ) -> Result<Paginated<ArchiveTask>, AppError> {
        let (tasks, total) = ArchiveTaskRepository::new(self.db)
            .get_paginated(filter, page)
            .await?;

        Ok(Paginated::new(tasks, total, page))
    }

    /// Runs a pending task to completion
    ///
    /// Returns the task as it was left: `completed` with its counts, or `failed` with
    /// the error. A task that is not pending is rejected without being touched.
    ///
    /// # Returns
    /// - `Ok(ArchiveTask)`: The finished task, completed or failed
    /// - `Err(AppError::NotFound)`: Task does not exist
    /// - `Err(AppError::BadRequest)`: Task is not pending
    pub async fn run_task(&self, id: i32) -> Result<ArchiveTask, AppError> {
        let repo = ArchiveTaskRepository::new(self.db);
        let task = repo.get_by_id(id).await?.ok_or_else(|| task_not_found(id))?;

        if repo.mark_running(id, Utc::now()).await? == 0 {
            return Err(AppError::BadRequest(format!(
                "Archive task {} is {} and cannot be run",
                id, task.status
            )));
        }

        match self.move_rows(&task).await {
            Ok(outcome) => {
                repo.mark_completed(id, outcome, Utc::now()).await?;
                tracing::info!(
                    task_id = id,
                    batch_id = %task.batch_id,
                    archived = outcome.archived_records,
                    "archive task completed"
                );
            }
            Err(err) => {
                tracing::error!(task_id = id, batch_id = %task.batch_id, "archive task failed: {}", err);
                repo.mark_failed(id, err.to_string(), Utc::now()).await?;
            }
        }

        self.get_task(id).await
    }

    /// Creates a task for `[start, end)` and runs it straight away
    pub async fn archive_window(
        &self,
        task_type: ArchiveTaskType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<ArchiveTask, AppError> {
        let task = self
            .create_task(CreateArchiveTaskParams {
                task_type,
                date_range_start: start,
                date_range_end: end,
                created_by: None,
            })
            .await?;

        self.run_task(task.id).await
    }

    /// Counts live rows a task of `task_type` over `[start, end)` would move
    ///
    /// # Arguments
    /// - `task_type`: Which live table to count
    /// - `start`: Inclusive lower bound
    /// - `end`: Exclusive upper bound
    ///
    /// # Returns
    /// - `Ok(u64)`: Positions recorded, or finished commands issued, in the window
    /// - `Err(AppError)`: Database error
    pub async fn count_archivable(
        &self,
        task_type: ArchiveTaskType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let count = match task_type {
            ArchiveTaskType::Positions => {
                PositionArchiveRepository::new(self.db)
                    .count_in_range(start, end)
                    .await?
            }
            ArchiveTaskType::Commands => {
                CommandArchiveRepository::new(self.db)
                    .count_in_range(start, end)
                    .await?
            }
        };

        Ok(count)
    }

    /// Deletes a task record; archived rows stay where they are
    pub async fn delete_task(&self, id: i32) -> Result<(), AppError> {
        let repo = ArchiveTaskRepository::new(self.db);
        let task = repo.get_by_id(id).await?.ok_or_else(|| task_not_found(id))?;

        if task.status == ArchiveTaskStatus::Running {
            return Err(AppError::BadRequest(format!(
                "Archive task {} is running and cannot be deleted",
                id
            )));
        }

        repo.delete(id).await?;

        Ok(())
    }

    pub async fn get_position_archive(&self, id: i32) -> Result<DronePositionArchive, AppError> {
        PositionArchiveRepository::new(self.db)
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Archived position {} not found", id)))
    }

    /// Gets a page of archived positions
    pub async fn get_position_archives_paginated(
        &self,
        filter: &ArchiveFilter,
        page: &PageRequest,
    ) -> Result<Paginated<DronePositionArchive>, AppError> {
        let (rows, total) = PositionArchiveRepository::new(self.db)
            .get_paginated(filter, page)
            .await?;

        Ok(Paginated::new(rows, total, page))
    }

    pub async fn get_command_archive(&self, id: i32) -> Result<DroneCommandArchive, AppError> {
        CommandArchiveRepository::new(self.db)
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Archived command {} not found", id)))
    }

    /// Gets a page of archived commands
    pub async fn get_command_archives_paginated(
        &self,
        filter: &ArchiveFilter,
        page: &PageRequest,
    ) -> Result<Paginated<DroneCommandArchive>, AppError> {
        let (rows, total) = CommandArchiveRepository::new(self.db)
            .get_paginated(filter, page)
            .await?;

        Ok(Paginated::new(rows, total, page))
    }

    async fn move_rows(&self, task: &ArchiveTask) -> Result<ArchiveOutcome, AppError> {
        let (start, end) = (task.date_range_start, task.date_range_end);
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let (total, moved): (u64, MovedRows) = match task.task_type {
            ArchiveTaskType::Positions => {
                let repo = PositionArchiveRepository::new(&txn);
                let total = repo.count_in_range(start, end).await?;
                (total, repo.archive_range(start, end, &task.batch_id, now).await?)
            }
            ArchiveTaskType::Commands => {
                let repo = CommandArchiveRepository::new(&txn);
                let total = repo.count_in_range(start, end).await?;
                (total, repo.archive_range(start, end, &task.batch_id, now).await?)
            }
        };

        if moved.copied != moved.deleted || moved.copied != total {
            txn.rollback().await?;
            return Err(InternalError::ArchiveCountMismatch {
                batch_id: task.batch_id.clone(),
                copied: moved.copied,
                deleted: moved.deleted,
            }
            .into());
        }

        txn.commit().await?;

        Ok(ArchiveOutcome {
            total_records: total,
            archived_records: moved.copied,
        })
    }
}

fn task_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Archive task {} not found", id))
}
