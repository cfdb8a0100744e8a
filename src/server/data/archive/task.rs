use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::archive::ArchiveTaskStatus,
    server::{
        data::sort_column,
        model::{
            archive::{ArchiveOutcome, ArchiveTask, ArchiveTaskFilter, CreateArchiveTaskParams},
            pagination::PageRequest,
        },
    },
};

pub const SORTABLE_COLUMNS: &[&str] = &[
    "created_at",
    "id",
    "date_range_start",
    "date_range_end",
    "status",
    "completed_at",
];

/// Repository for `archive_tasks`, one row per archive run.
pub struct ArchiveTaskRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ArchiveTaskRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a pending task
    ///
    /// # Arguments
    /// - `params`: Task type and validated `[start, end)` window
    /// - `batch_id`: Identifier stamped on every row the task archives
    /// - `now`: Value for `created_at`
    ///
    /// # Returns
    /// - `Ok(ArchiveTask)`: The created task with zero counts
    /// - `Err(DbErr)`: Database error, including a unique violation on `batch_id`
    pub async fn create(
        &self,
        params: CreateArchiveTaskParams,
        batch_id: String,
        now: DateTime<Utc>,
    ) -> Result<ArchiveTask, DbErr> {
        let task = entity::archive_task::ActiveModel {
            task_type: ActiveValue::Set(params.task_type.as_str().to_string()),
            status: ActiveValue::Set(ArchiveTaskStatus::Pending.as_str().to_string()),
            date_range_start: ActiveValue::Set(params.date_range_start),
            date_range_end: ActiveValue::Set(params.date_range_end),
            batch_id: ActiveValue::Set(batch_id),
            total_records: ActiveValue::Set(0),
            archived_records: ActiveValue::Set(0),
            error_message: ActiveValue::Set(None),
            created_by: ActiveValue::Set(params.created_by),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        ArchiveTask::from_entity(task)
    }

    /// Finds a task by id
    pub async fn get_by_id(&self, id: i32) -> Result<Option<ArchiveTask>, DbErr> {
        entity::prelude::ArchiveTask::find_by_id(id)
            .one(self.db)
            .await?
            .map(ArchiveTask::from_entity)
            .transpose()
    }

    /// Gets a page of tasks filtered by status and type, searching batch ids
    ///
    /// # Returns
    /// - `Ok((Vec<ArchiveTask>, u64))`: Tasks on the page and the total matching count
    /// - `Err(DbErr)`: Database error or an unknown stored status or type
    pub async fn get_paginated(
        &self,
        filter: &ArchiveTaskFilter,
        page: &PageRequest,
    ) -> Result<(Vec<ArchiveTask>, u64), DbErr> {
        let mut query = entity::prelude::ArchiveTask::find();

        if let Some(status) = filter.status {
            query = query.filter(entity::archive_task::Column::Status.eq(status.as_str()));
        }
        if let Some(task_type) = filter.task_type {
            query = query.filter(entity::archive_task::Column::TaskType.eq(task_type.as_str()));
        }
        if let Some(term) = &page.search {
            query = query.filter(entity::archive_task::Column::BatchId.contains(term));
        }

        let paginator = query
            .order_by(
                sort_column::<entity::archive_task::Column>(page.sort_by)?,
                page.order(),
            )
            .order_by(entity::archive_task::Column::Id, page.order())
            .paginate(self.db, page.page_size);

        let total = paginator.num_items().await?;
        let tasks = paginator
            .fetch_page(page.page_index())
            .await?
            .into_iter()
            .map(ArchiveTask::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((tasks, total))
    }

    /// Moves a pending task to running
    ///
    /// Returns 0 when the task is missing or no longer pending.
    pub async fn mark_running(&self, id: i32, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::ArchiveTask::update_many()
            .col_expr(
                entity::archive_task::Column::Status,
                Expr::value(ArchiveTaskStatus::Running.as_str()),
            )
            .col_expr(entity::archive_task::Column::StartedAt, Expr::value(now))
            .filter(entity::archive_task::Column::Id.eq(id))
            .filter(entity::archive_task::Column::Status.eq(ArchiveTaskStatus::Pending.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Records a successful run with its counts
    ///
    /// # Arguments
    /// - `id`: Task to update
    /// - `outcome`: Rows selected and rows archived
    /// - `now`: Value for `completed_at`
    ///
    /// # Returns
    /// - `Ok(u64)`: Rows changed, 0 when the task no longer exists
    /// - `Err(DbErr)`: Database error
    pub async fn mark_completed(
        &self,
        id: i32,
        outcome: ArchiveOutcome,
        now: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::ArchiveTask::update_many()
            .col_expr(
                entity::archive_task::Column::Status,
                Expr::value(ArchiveTaskStatus::Completed.as_str()),
            )
            .col_expr(
                entity::archive_task::Column::TotalRecords,
                Expr::value(outcome.total_records as i64),
            )
            .col_expr(
                entity::archive_task::Column::ArchivedRecords,
                Expr::value(outcome.archived_records as i64),
            )
            .col_expr(entity::archive_task::Column::CompletedAt, Expr::value(now))
            .filter(entity::archive_task::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Records a failed run with the error text
    ///
    /// Sets `completed_at` too, so a failed task still shows when it stopped.
    pub async fn mark_failed(
        &self,
        id: i32,
        error_message: String,
        now: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::ArchiveTask::update_many()
            .col_expr(
                entity::archive_task::Column::Status,
                Expr::value(ArchiveTaskStatus::Failed.as_str()),
            )
            .col_expr(
                entity::archive_task::Column::ErrorMessage,
                Expr::value(error_message),
            )
            .col_expr(entity::archive_task::Column::CompletedAt, Expr::value(now))
            .filter(entity::archive_task::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes a task record, returning the number of rows removed
    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::ArchiveTask::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
