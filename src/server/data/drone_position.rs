use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::{sort_column, within_time_range},
    model::{
        drone_position::{
            CreateDronePositionParams, DronePosition, DronePositionFilter,
            UpdateDronePositionParams,
        },
        pagination::PageRequest,
    },
};

pub const SORTABLE_COLUMNS: &[&str] = &[
    "recorded_at",
    "created_at",
    "id",
    "drone_id",
    "altitude",
    "speed",
    "battery_level",
];

/// Repository for the live `drone_positions` table.
///
/// Rows older than the archive retention are moved out by the archive repositories.
pub struct DronePositionRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DronePositionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a position report
    ///
    /// # Arguments
    /// - `params`: Validated coordinates and telemetry with `recorded_at` already resolved
    ///
    /// # Returns
    /// - `Ok(DronePosition)`: The stored position
    /// - `Err(DbErr)`: Database error, including a foreign key violation for an unknown drone
    pub async fn create(&self, params: CreateDronePositionParams) -> Result<DronePosition, DbErr> {
        let position = entity::drone_position::ActiveModel {
            drone_id: ActiveValue::Set(params.drone_id),
            latitude: ActiveValue::Set(params.latitude),
            longitude: ActiveValue::Set(params.longitude),
            altitude: ActiveValue::Set(params.altitude),
            speed: ActiveValue::Set(params.speed),
            heading: ActiveValue::Set(params.heading),
            battery_level: ActiveValue::Set(params.battery_level),
            signal_strength: ActiveValue::Set(params.signal_strength),
            recorded_at: ActiveValue::Set(params.recorded_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(DronePosition::from_entity(position))
    }

    /// Finds a position by id
    pub async fn get_by_id(&self, id: i32) -> Result<Option<DronePosition>, DbErr> {
        let position = entity::prelude::DronePosition::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(position.map(DronePosition::from_entity))
    }

    /// Gets a page of positions filtered by drone and `recorded_at` range
    ///
    /// # Arguments
    /// - `filter`: Optional drone id and inclusive `recorded_at` bounds
    /// - `page`: Validated page and sort column
    ///
    /// # Returns
    /// - `Ok((Vec<DronePosition>, u64))`: Positions on the page and the total matching count
    /// - `Err(DbErr)`: Database error
    pub async fn get_paginated(
        &self,
        filter: &DronePositionFilter,
        page: &PageRequest,
    ) -> Result<(Vec<DronePosition>, u64), DbErr> {
        let mut query = entity::prelude::DronePosition::find();

        if let Some(drone_id) = filter.drone_id {
            query = query.filter(entity::drone_position::Column::DroneId.eq(drone_id));
        }
        query = within_time_range(
            query,
            entity::drone_position::Column::RecordedAt,
            filter.start_time,
            filter.end_time,
        );

        let paginator = query
            .order_by(
                sort_column::<entity::drone_position::Column>(page.sort_by)?,
                page.order(),
            )
            .order_by(entity::drone_position::Column::Id, page.order())
            .paginate(self.db, page.page_size);

        let total = paginator.num_items().await?;
        let positions = paginator
            .fetch_page(page.page_index())
            .await?
            .into_iter()
            .map(DronePosition::from_entity)
            .collect();

        Ok((positions, total))
    }

    /// Gets the most recently recorded position of a drone
    pub async fn get_latest_by_drone(&self, drone_id: i32) -> Result<Option<DronePosition>, DbErr> {
        let position = entity::prelude::DronePosition::find()
            .filter(entity::drone_position::Column::DroneId.eq(drone_id))
            .order_by_desc(entity::drone_position::Column::RecordedAt)
            .order_by_desc(entity::drone_position::Column::Id)
            .one(self.db)
            .await?;

        Ok(position.map(DronePosition::from_entity))
    }

    /// Corrects the fields of a position present in `params`
    ///
    /// `drone_id` and `recorded_at` are never changed.
    ///
    /// # Returns
    /// - `Ok(DronePosition)`: The updated position
    /// - `Err(DbErr::RecordNotFound)`: No position with that id
    pub async fn update(
        &self,
        id: i32,
        params: UpdateDronePositionParams,
    ) -> Result<DronePosition, DbErr> {
        let position = entity::prelude::DronePosition::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!("Position {} not found", id)))?;

        let mut active_model: entity::drone_position::ActiveModel = position.into();
        if let Some(latitude) = params.latitude {
            active_model.latitude = ActiveValue::Set(latitude);
        }
        if let Some(longitude) = params.longitude {
            active_model.longitude = ActiveValue::Set(longitude);
        }
        if let Some(altitude) = params.altitude {
            active_model.altitude = ActiveValue::Set(altitude);
        }
        if params.speed.is_some() {
            active_model.speed = ActiveValue::Set(params.speed);
        }
        if params.heading.is_some() {
            active_model.heading = ActiveValue::Set(params.heading);
        }
        if params.battery_level.is_some() {
            active_model.battery_level = ActiveValue::Set(params.battery_level);
        }
        if params.signal_strength.is_some() {
            active_model.signal_strength = ActiveValue::Set(params.signal_strength);
        }

        Ok(DronePosition::from_entity(active_model.update(self.db).await?))
    }

    /// Deletes a position, returning the number of rows removed
    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::DronePosition::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
