use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
};

use crate::{
    model::drone_command::CommandStatus,
    server::{
        data::{
            archive::{MovedRows, CHUNK_SIZE},
            sort_column, within_time_range,
        },
        model::{
            archive::{ArchiveFilter, DroneCommandArchive},
            pagination::PageRequest,
        },
    },
};

pub const SORTABLE_COLUMNS: &[&str] = &[
    "archived_at",
    "issued_at",
    "id",
    "drone_id",
    "command_type",
    "status",
];

const ARCHIVABLE_STATUSES: [CommandStatus; 3] = [
    CommandStatus::Completed,
    CommandStatus::Failed,
    CommandStatus::Cancelled,
];

/// Repository for `drone_commands_archive` and the move of finished commands into it.
pub struct CommandArchiveRepository<'a, C> {
    db: &'a C,
}

/// Finished commands issued in `[start, end)`.
fn finished_in_range(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Select<entity::prelude::DroneCommand> {
    entity::prelude::DroneCommand::find()
        .filter(entity::drone_command::Column::IssuedAt.gte(start))
        .filter(entity::drone_command::Column::IssuedAt.lt(end))
        .filter(
            entity::drone_command::Column::Status
                .is_in(ARCHIVABLE_STATUSES.iter().map(|s| s.as_str())),
        )
}

impl<'a, C: ConnectionTrait> CommandArchiveRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Counts finished commands issued in `[start, end)`
    pub async fn count_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        finished_in_range(start, end).count(self.db).await
    }

    /// Copies finished commands issued in `[start, end)` into the archive table tagged with
    /// `batch_id`, then deletes the copied originals
    ///
    /// Pending and executing commands are left in place.
    pub async fn archive_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        batch_id: &str,
        now: DateTime<Utc>,
    ) -> Result<MovedRows, DbErr> {
        let mut moved = MovedRows::default();
        let mut last_id = 0;

        loop {
            let chunk = finished_in_range(start, end)
                .filter(entity::drone_command::Column::Id.gt(last_id))
                .order_by_asc(entity::drone_command::Column::Id)
                .limit(CHUNK_SIZE)
                .all(self.db)
                .await?;

            let Some(last) = chunk.last() else {
                break;
            };
            last_id = last.id;

            let archived = chunk
                .iter()
                .map(|row| entity::drone_command_archive::ActiveModel {
                    original_id: ActiveValue::Set(row.id),
                    drone_id: ActiveValue::Set(row.drone_id),
                    command_type: ActiveValue::Set(row.command_type.clone()),
                    command_data: ActiveValue::Set(row.command_data.clone()),
                    status: ActiveValue::Set(row.status.clone()),
                    issued_by: ActiveValue::Set(row.issued_by),
                    issued_at: ActiveValue::Set(row.issued_at),
                    executed_at: ActiveValue::Set(row.executed_at),
                    completed_at: ActiveValue::Set(row.completed_at),
                    error_message: ActiveValue::Set(row.error_message.clone()),
                    archived_at: ActiveValue::Set(now),
                    archive_batch_id: ActiveValue::Set(batch_id.to_string()),
                    ..Default::default()
                })
                .collect::<Vec<_>>();

            entity::prelude::DroneCommandArchive::insert_many(archived)
                .exec(self.db)
                .await?;
            moved.copied += chunk.len() as u64;

            let ids = chunk.iter().map(|row| row.id).collect::<Vec<_>>();
            let result = entity::prelude::DroneCommand::delete_many()
                .filter(entity::drone_command::Column::Id.is_in(ids))
                .exec(self.db)
                .await?;
            moved.deleted += result.rows_affected;
        }

        Ok(moved)
    }

    /// Finds an archived command by id
    pub async fn get_by_id(&self, id: i32) -> Result<Option<DroneCommandArchive>, DbErr> {
        entity::prelude::DroneCommandArchive::find_by_id(id)
            .one(self.db)
            .await?
            .map(DroneCommandArchive::from_entity)
            .transpose()
    }

    /// Gets a page of archived commands filtered by drone, batch and `issued_at` range
    ///
    /// # Returns
    /// - `Ok((Vec<DroneCommandArchive>, u64))`: Rows on the page and the total matching count
    /// - `Err(DbErr)`: Database error
    pub async fn get_paginated(
        &self,
        filter: &ArchiveFilter,
        page: &PageRequest,
    ) -> Result<(Vec<DroneCommandArchive>, u64), DbErr> {
        let mut query = entity::prelude::DroneCommandArchive::find();

        if let Some(drone_id) = filter.drone_id {
            query = query.filter(entity::drone_command_archive::Column::DroneId.eq(drone_id));
        }
        if let Some(batch_id) = &filter.archive_batch_id {
            query = query.filter(
                entity::drone_command_archive::Column::ArchiveBatchId.eq(batch_id.as_str()),
            );
        }
        if let Some(term) = &page.search {
            query = query.filter(entity::drone_command_archive::Column::CommandType.contains(term));
        }
        query = within_time_range(
            query,
            entity::drone_command_archive::Column::IssuedAt,
            filter.start_time,
            filter.end_time,
        );

        let paginator = query
            .order_by(
                sort_column::<entity::drone_command_archive::Column>(page.sort_by)?,
                page.order(),
            )
            .order_by(entity::drone_command_archive::Column::Id, page.order())
            .paginate(self.db, page.page_size);

        let total = paginator.num_items().await?;
        let rows = paginator
            .fetch_page(page.page_index())
            .await?
            .into_iter()
            .map(DroneCommandArchive::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((rows, total))
    }
}
