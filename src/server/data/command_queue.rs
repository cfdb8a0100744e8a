use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::drone_command::CommandStatus,
    server::{
        data::sort_column,
        model::{
            command_queue::{EnqueueParams, QueueEntry, QueueFilter},
            drone_command::StatusStamp,
            pagination::PageRequest,
            parse_stored,
        },
    },
};

pub const SORTABLE_COLUMNS: &[&str] = &[
    "created_at",
    "id",
    "priority",
    "drone_id",
    "status",
    "started_at",
    "completed_at",
];

const TERMINAL_STATUSES: [CommandStatus; 3] = [
    CommandStatus::Completed,
    CommandStatus::Failed,
    CommandStatus::Cancelled,
];

/// Repository for the `drone_command_queue` table.
///
/// Generic over the connection so the dequeue claim can run on a transaction.
pub struct CommandQueueRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CommandQueueRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Adds a pending entry created at `now`
    ///
    /// # Arguments
    /// - `params`: Validated entry with priority already in 1..=10
    /// - `now`: Value for `created_at`, which orders entries of equal priority
    ///
    /// # Returns
    /// - `Ok(QueueEntry)`: The stored entry with status `pending`
    /// - `Err(DbErr)`: Database error, including a foreign key violation for an unknown drone
    pub async fn enqueue(
        &self,
        params: EnqueueParams,
        now: DateTime<Utc>,
    ) -> Result<QueueEntry, DbErr> {
        let entry = entity::drone_command_queue::ActiveModel {
            drone_id: ActiveValue::Set(params.drone_id),
            command_type: ActiveValue::Set(params.command_type.as_str().to_string()),
            command_data: ActiveValue::Set(params.command_data),
            priority: ActiveValue::Set(params.priority),
            status: ActiveValue::Set(CommandStatus::Pending.as_str().to_string()),
            created_by: ActiveValue::Set(params.created_by),
            created_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        QueueEntry::from_entity(entry)
    }

    /// Finds a queue entry by id
    ///
    /// # Returns
    /// - `Ok(Some(QueueEntry))`: Entry found
    /// - `Ok(None)`: No entry with that id
    /// - `Err(DbErr)`: Database error or an unknown stored status
    pub async fn get_by_id(&self, id: i32) -> Result<Option<QueueEntry>, DbErr> {
        entity::prelude::DroneCommandQueue::find_by_id(id)
            .one(self.db)
            .await?
            .map(QueueEntry::from_entity)
            .transpose()
    }

    /// Gets pending entries of one priority, oldest first
    pub async fn get_pending_by_priority(&self, priority: i32) -> Result<Vec<QueueEntry>, DbErr> {
        entity::prelude::DroneCommandQueue::find()
            .filter(entity::drone_command_queue::Column::Priority.eq(priority))
            .filter(entity::drone_command_queue::Column::Status.eq(CommandStatus::Pending.as_str()))
            .order_by_asc(entity::drone_command_queue::Column::CreatedAt)
            .order_by_asc(entity::drone_command_queue::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(QueueEntry::from_entity)
            .collect()
    }

    /// Gets every entry for a drone in dequeue order
    pub async fn get_by_drone(&self, drone_id: i32) -> Result<Vec<QueueEntry>, DbErr> {
        entity::prelude::DroneCommandQueue::find()
            .filter(entity::drone_command_queue::Column::DroneId.eq(drone_id))
            .order_by_desc(entity::drone_command_queue::Column::Priority)
            .order_by_asc(entity::drone_command_queue::Column::CreatedAt)
            .order_by_asc(entity::drone_command_queue::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(QueueEntry::from_entity)
            .collect()
    }

    /// Gets a page of queue entries
    ///
    /// Filters by drone and status when set; the search term matches the command type.
    ///
    /// # Arguments
    /// - `filter`: Optional drone and status filters
    /// - `page`: Validated page, sort column and search term
    ///
    /// # Returns
    /// - `Ok((Vec<QueueEntry>, u64))`: Entries on the requested page and the total matching count
    /// - `Err(DbErr)`: Database error
    pub async fn get_paginated(
        &self,
        filter: &QueueFilter,
        page: &PageRequest,
    ) -> Result<(Vec<QueueEntry>, u64), DbErr> {
        let mut query = entity::prelude::DroneCommandQueue::find();

        if let Some(drone_id) = filter.drone_id {
            query = query.filter(entity::drone_command_queue::Column::DroneId.eq(drone_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::drone_command_queue::Column::Status.eq(status.as_str()));
        }
        if let Some(term) = &page.search {
            query = query.filter(entity::drone_command_queue::Column::CommandType.contains(term));
        }

        let paginator = query
            .order_by(
                sort_column::<entity::drone_command_queue::Column>(page.sort_by)?,
                page.order(),
            )
            .order_by(entity::drone_command_queue::Column::Id, page.order())
            .paginate(self.db, page.page_size);

        let total = paginator.num_items().await?;
        let entries = paginator
            .fetch_page(page.page_index())
            .await?
            .into_iter()
            .map(QueueEntry::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((entries, total))
    }

    /// Finds the next entry to hand out: highest priority, then oldest, then lowest id
    ///
    /// Only reads; the caller claims the entry with `transition` so two workers cannot both
    /// take it.
    ///
    /// # Arguments
    /// - `drone_id`: Restrict to one drone, or `None` for any drone
    ///
    /// # Returns
    /// - `Ok(Some(QueueEntry))`: Next pending entry
    /// - `Ok(None)`: Nothing pending
    /// - `Err(DbErr)`: Database error
    pub async fn next_pending(&self, drone_id: Option<i32>) -> Result<Option<QueueEntry>, DbErr> {
        let mut query = entity::prelude::DroneCommandQueue::find()
            .filter(entity::drone_command_queue::Column::Status.eq(CommandStatus::Pending.as_str()));

        if let Some(drone_id) = drone_id {
            query = query.filter(entity::drone_command_queue::Column::DroneId.eq(drone_id));
        }

        query
            .order_by_desc(entity::drone_command_queue::Column::Priority)
            .order_by_asc(entity::drone_command_queue::Column::CreatedAt)
            .order_by_asc(entity::drone_command_queue::Column::Id)
            .one(self.db)
            .await?
            .map(QueueEntry::from_entity)
            .transpose()
    }

    /// Moves an entry from `from` to the stamped status only if it is still in `from`
    ///
    /// Returns the number of rows changed: 1 when this caller won, 0 when the entry was
    /// missing or already moved by someone else.
    pub async fn transition(
        &self,
        id: i32,
        from: CommandStatus,
        stamp: StatusStamp,
    ) -> Result<u64, DbErr> {
        let mut update = entity::prelude::DroneCommandQueue::update_many().col_expr(
            entity::drone_command_queue::Column::Status,
            Expr::value(stamp.status.as_str()),
        );

        if let Some(started_at) = stamp.executed_at {
            update = update.col_expr(
                entity::drone_command_queue::Column::StartedAt,
                Expr::value(started_at),
            );
        }
        if let Some(completed_at) = stamp.completed_at {
            update = update.col_expr(
                entity::drone_command_queue::Column::CompletedAt,
                Expr::value(completed_at),
            );
        }
        if let Some(error_message) = stamp.error_message {
            update = update.col_expr(
                entity::drone_command_queue::Column::ErrorMessage,
                Expr::value(error_message),
            );
        }

        let result = update
            .filter(entity::drone_command_queue::Column::Id.eq(id))
            .filter(entity::drone_command_queue::Column::Status.eq(from.as_str()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes terminal entries completed before `cutoff`
    ///
    /// Pending and executing entries are never removed, however old.
    ///
    /// # Returns
    /// - `Ok(u64)`: Number of entries deleted
    /// - `Err(DbErr)`: Database error
    pub async fn delete_finished_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::DroneCommandQueue::delete_many()
            .filter(
                entity::drone_command_queue::Column::Status
                    .is_in(TERMINAL_STATUSES.iter().map(|s| s.as_str())),
            )
            .filter(entity::drone_command_queue::Column::CompletedAt.lt(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Counts entries grouped by status; statuses with no entries are omitted
    pub async fn count_by_status(&self) -> Result<Vec<(CommandStatus, u64)>, DbErr> {
        let rows: Vec<(String, i64)> = entity::prelude::DroneCommandQueue::find()
            .select_only()
            .column(entity::drone_command_queue::Column::Status)
            .column_as(entity::drone_command_queue::Column::Id.count(), "count")
            .group_by(entity::drone_command_queue::Column::Status)
            .into_tuple()
            .all(self.db)
            .await?;

        rows.into_iter()
            .map(|(status, count)| Ok((parse_stored(&status)?, count.max(0) as u64)))
            .collect()
    }
}
