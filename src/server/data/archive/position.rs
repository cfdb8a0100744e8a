use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::server::{
    data::{
        archive::{MovedRows, CHUNK_SIZE},
        sort_column, within_time_range,
    },
    model::{
        archive::{ArchiveFilter, DronePositionArchive},
        pagination::PageRequest,
    },
};

pub const SORTABLE_COLUMNS: &[&str] = &["archived_at", "recorded_at", "id", "drone_id"];

/// Repository for `drone_positions_archive` and the move of old positions into it.
pub struct PositionArchiveRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PositionArchiveRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Counts live positions recorded in `[start, end)`
    pub async fn count_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        entity::prelude::DronePosition::find()
            .filter(entity::drone_position::Column::RecordedAt.gte(start))
            .filter(entity::drone_position::Column::RecordedAt.lt(end))
            .count(self.db)
            .await
    }

    /// Copies live positions recorded in `[start, end)` into the archive table tagged with
    /// `batch_id`, then deletes the copied originals
    ///
    /// Run on a transaction; a partial copy must never be committed.
    ///
    /// # Arguments
    /// - `start`: Inclusive lower bound on `recorded_at`
    /// - `end`: Exclusive upper bound on `recorded_at`
    /// - `batch_id`: Tag written to every archived row
    /// - `now`: Value for `archived_at`
    ///
    /// # Returns
    /// - `Ok(MovedRows)`: Rows copied into the archive and rows deleted from the live table
    /// - `Err(DbErr)`: Database error; the caller's transaction must be rolled back
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
            let chunk = entity::prelude::DronePosition::find()
                .filter(entity::drone_position::Column::RecordedAt.gte(start))
                .filter(entity::drone_position::Column::RecordedAt.lt(end))
                .filter(entity::drone_position::Column::Id.gt(last_id))
                .order_by_asc(entity::drone_position::Column::Id)
                .limit(CHUNK_SIZE)
                .all(self.db)
                .await?;

            let Some(last) = chunk.last() else {
                break;
            };
            last_id = last.id;

            let archived = chunk
                .iter()
                .map(|row| entity::drone_position_archive::ActiveModel {
                    original_id: ActiveValue::Set(row.id),
                    drone_id: ActiveValue::Set(row.drone_id),
                    latitude: ActiveValue::Set(row.latitude),
                    longitude: ActiveValue::Set(row.longitude),
                    altitude: ActiveValue::Set(row.altitude),
                    speed: ActiveValue::Set(row.speed),
                    heading: ActiveValue::Set(row.heading),
                    battery_level: ActiveValue::Set(row.battery_level),
                    signal_strength: ActiveValue::Set(row.signal_strength),
                    recorded_at: ActiveValue::Set(row.recorded_at),
                    archived_at: ActiveValue::Set(now),
                    archive_batch_id: ActiveValue::Set(batch_id.to_string()),
                    ..Default::default()
                })
                .collect::<Vec<_>>();

            entity::prelude::DronePositionArchive::insert_many(archived)
                .exec(self.db)
                .await?;
            moved.copied += chunk.len() as u64;

            let ids = chunk.iter().map(|row| row.id).collect::<Vec<_>>();
            let result = entity::prelude::DronePosition::delete_many()
                .filter(entity::drone_position::Column::Id.is_in(ids))
                .exec(self.db)
                .await?;
            moved.deleted += result.rows_affected;
        }

        Ok(moved)
    }

    /// Finds an archived position by id
    pub async fn get_by_id(&self, id: i32) -> Result<Option<DronePositionArchive>, DbErr> {
        let row = entity::prelude::DronePositionArchive::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(row.map(DronePositionArchive::from_entity))
    }

    /// Gets a page of archived positions filtered by drone, batch and `recorded_at` range
    pub async fn get_paginated(
        &self,
        filter: &ArchiveFilter,
        page: &PageRequest,
    ) -> Result<(Vec<DronePositionArchive>, u64), DbErr> {
        let mut query = entity::prelude::DronePositionArchive::find();

        if let Some(drone_id) = filter.drone_id {
            query = query.filter(entity::drone_position_archive::Column::DroneId.eq(drone_id));
        }
        if let Some(batch_id) = &filter.archive_batch_id {
            query = query.filter(
                entity::drone_position_archive::Column::ArchiveBatchId.eq(batch_id.as_str()),
            );
        }
        query = within_time_range(
            query,
            entity::drone_position_archive::Column::RecordedAt,
            filter.start_time,
            filter.end_time,
        );

        let paginator = query
            .order_by(
                sort_column::<entity::drone_position_archive::Column>(page.sort_by)?,
                page.order(),
            )
            .order_by(entity::drone_position_archive::Column::Id, page.order())
            .paginate(self.db, page.page_size);

        let total = paginator.num_items().await?;
        let rows = paginator
            .fetch_page(page.page_index())
            .await?
            .into_iter()
            .map(DronePositionArchive::from_entity)
            .collect();

        Ok((rows, total))
    }
}
