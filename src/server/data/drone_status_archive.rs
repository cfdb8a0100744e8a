use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::{sort_column, within_time_range},
    model::{
        drone_status_archive::{
            CreateStatusArchiveParams, DroneStatusArchive, StatusArchiveFilter,
        },
        pagination::PageRequest,
    },
};

pub const SORTABLE_COLUMNS: &[&str] = &["created_at", "id", "drone_id", "status"];

/// Repository for `drone_status_archive`, the append-only history of drone status changes.
pub struct DroneStatusArchiveRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DroneStatusArchiveRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records one status change
    ///
    /// Written in the same transaction as the drone's status update.
    ///
    /// # Arguments
    /// - `params`: Drone, new and previous status, optional reason and actor
    ///
    /// # Returns
    /// - `Ok(DroneStatusArchive)`: The stored history row
    /// - `Err(DbErr)`: Database error
    pub async fn create(
        &self,
        params: CreateStatusArchiveParams,
    ) -> Result<DroneStatusArchive, DbErr> {
        let archive = entity::drone_status_archive::ActiveModel {
            drone_id: ActiveValue::Set(params.drone_id),
            status: ActiveValue::Set(params.status.as_str().to_string()),
            previous_status: ActiveValue::Set(
                params.previous_status.map(|s| s.as_str().to_string()),
            ),
            reason: ActiveValue::Set(params.reason),
            changed_by: ActiveValue::Set(params.changed_by),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        DroneStatusArchive::from_entity(archive)
    }

    /// Finds a history row by id
    pub async fn get_by_id(&self, id: i32) -> Result<Option<DroneStatusArchive>, DbErr> {
        entity::prelude::DroneStatusArchive::find_by_id(id)
            .one(self.db)
            .await?
            .map(DroneStatusArchive::from_entity)
            .transpose()
    }

    /// Gets a page of status history filtered by drone, status and `created_at` range
    ///
    /// The search term matches the recorded reason.
    ///
    /// # Returns
    /// - `Ok((Vec<DroneStatusArchive>, u64))`: Rows on the page and the total matching count
    /// - `Err(DbErr)`: Database error or an unknown stored status
    pub async fn get_paginated(
        &self,
        filter: &StatusArchiveFilter,
        page: &PageRequest,
    ) -> Result<(Vec<DroneStatusArchive>, u64), DbErr> {
        let mut query = entity::prelude::DroneStatusArchive::find();

        if let Some(drone_id) = filter.drone_id {
            query = query.filter(entity::drone_status_archive::Column::DroneId.eq(drone_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::drone_status_archive::Column::Status.eq(status.as_str()));
        }
        if let Some(term) = &page.search {
            query = query.filter(entity::drone_status_archive::Column::Reason.contains(term));
        }
        query = within_time_range(
            query,
            entity::drone_status_archive::Column::CreatedAt,
            filter.start_time,
            filter.end_time,
        );

        let paginator = query
            .order_by(
                sort_column::<entity::drone_status_archive::Column>(page.sort_by)?,
                page.order(),
            )
            .order_by(entity::drone_status_archive::Column::Id, page.order())
            .paginate(self.db, page.page_size);

        let total = paginator.num_items().await?;
        let rows = paginator
            .fetch_page(page.page_index())
            .await?
            .into_iter()
            .map(DroneStatusArchive::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((rows, total))
    }

    /// Gets a drone's status history, newest first
    pub async fn get_by_drone(&self, drone_id: i32) -> Result<Vec<DroneStatusArchive>, DbErr> {
        entity::prelude::DroneStatusArchive::find()
            .filter(entity::drone_status_archive::Column::DroneId.eq(drone_id))
            .order_by_desc(entity::drone_status_archive::Column::CreatedAt)
            .order_by_desc(entity::drone_status_archive::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(DroneStatusArchive::from_entity)
            .collect()
    }
}
