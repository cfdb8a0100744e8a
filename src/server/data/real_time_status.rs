use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::real_time_status::RealTimeStatus,
    server::{
        data::sort_column,
        model::{
            pagination::PageRequest,
            real_time_status::{
                DroneRealTimeStatus, RealTimeStatusFilter, UpsertRealTimeStatusParams,
            },
        },
    },
};

pub const SORTABLE_COLUMNS: &[&str] = &[
    "last_seen",
    "updated_at",
    "id",
    "drone_id",
    "current_status",
    "battery_level",
];

/// Repository for `drone_real_time_status`, holding at most one snapshot per drone.
pub struct RealTimeStatusRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RealTimeStatusRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates or replaces the snapshot for a drone in one statement
    ///
    /// Conflicts on the unique `drone_id` column overwrite every telemetry field, so
    /// concurrent first reports for the same drone both succeed.
    ///
    /// # Arguments
    /// - `params`: Validated telemetry for the drone
    /// - `now`: Timestamp written to `last_seen` and `updated_at`
    ///
    /// # Returns
    /// - `Ok(DroneRealTimeStatus)`: The stored snapshot
    /// - `Err(DbErr)`: Database error, including a foreign key violation for an unknown drone
    pub async fn upsert(
        &self,
        params: UpsertRealTimeStatusParams,
        now: DateTime<Utc>,
    ) -> Result<DroneRealTimeStatus, DbErr> {
        use entity::drone_real_time_status::Column;

        let model = entity::prelude::DroneRealTimeStatus::insert(
            entity::drone_real_time_status::ActiveModel {
                drone_id: ActiveValue::Set(params.drone_id),
                current_status: ActiveValue::Set(params.current_status.as_str().to_string()),
                battery_level: ActiveValue::Set(params.battery_level),
                signal_strength: ActiveValue::Set(params.signal_strength),
                altitude: ActiveValue::Set(params.altitude),
                speed: ActiveValue::Set(params.speed),
                heading: ActiveValue::Set(params.heading),
                is_connected: ActiveValue::Set(params.is_connected),
                error_message: ActiveValue::Set(params.error_message),
                last_seen: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            },
        )
        .on_conflict(
            OnConflict::column(Column::DroneId)
                .update_columns([
                    Column::CurrentStatus,
                    Column::BatteryLevel,
                    Column::SignalStrength,
                    Column::Altitude,
                    Column::Speed,
                    Column::Heading,
                    Column::IsConnected,
                    Column::ErrorMessage,
                    Column::LastSeen,
                    Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        DroneRealTimeStatus::from_entity(model)
    }

    /// Finds the snapshot of a drone
    pub async fn get_by_drone(&self, drone_id: i32) -> Result<Option<DroneRealTimeStatus>, DbErr> {
        entity::prelude::DroneRealTimeStatus::find()
            .filter(entity::drone_real_time_status::Column::DroneId.eq(drone_id))
            .one(self.db)
            .await?
            .map(DroneRealTimeStatus::from_entity)
            .transpose()
    }

    /// Gets a page of snapshots filtered by status and connection, searching error messages
    ///
    /// # Returns
    /// - `Ok((Vec<DroneRealTimeStatus>, u64))`: Snapshots on the page and the total matching count
    /// - `Err(DbErr)`: Database error or an unknown stored status
    pub async fn get_paginated(
        &self,
        filter: &RealTimeStatusFilter,
        page: &PageRequest,
    ) -> Result<(Vec<DroneRealTimeStatus>, u64), DbErr> {
        let mut query = entity::prelude::DroneRealTimeStatus::find();

        if let Some(status) = filter.current_status {
            query = query
                .filter(entity::drone_real_time_status::Column::CurrentStatus.eq(status.as_str()));
        }
        if let Some(connected) = filter.is_connected {
            query = query.filter(entity::drone_real_time_status::Column::IsConnected.eq(connected));
        }
        if let Some(term) = &page.search {
            query = query.filter(entity::drone_real_time_status::Column::ErrorMessage.contains(term));
        }

        let paginator = query
            .order_by(
                sort_column::<entity::drone_real_time_status::Column>(page.sort_by)?,
                page.order(),
            )
            .order_by(entity::drone_real_time_status::Column::Id, page.order())
            .paginate(self.db, page.page_size);

        let total = paginator.num_items().await?;
        let rows = paginator
            .fetch_page(page.page_index())
            .await?
            .into_iter()
            .map(DroneRealTimeStatus::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((rows, total))
    }

    /// Deletes the snapshot of a drone, returning the number of rows removed
    pub async fn delete_by_drone(&self, drone_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::DroneRealTimeStatus::delete_many()
            .filter(entity::drone_real_time_status::Column::DroneId.eq(drone_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Marks every connected snapshot last seen before `cutoff` as offline
    ///
    /// Returns the number of snapshots changed.
    pub async fn mark_offline_stale(
        &self,
        cutoff: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::DroneRealTimeStatus::update_many()
            .col_expr(
                entity::drone_real_time_status::Column::CurrentStatus,
                Expr::value(RealTimeStatus::Offline.as_str()),
            )
            .col_expr(
                entity::drone_real_time_status::Column::IsConnected,
                Expr::value(false),
            )
            .col_expr(
                entity::drone_real_time_status::Column::UpdatedAt,
                Expr::value(now),
            )
            .filter(entity::drone_real_time_status::Column::IsConnected.eq(true))
            .filter(entity::drone_real_time_status::Column::LastSeen.lt(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
