use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::drone::DroneStatus,
    server::{
        data::sort_column,
        model::{
            drone::{CreateDroneParams, Drone, DroneFilter, UpdateDroneParams},
            pagination::PageRequest,
            parse_stored,
        },
    },
};

/// Columns the drone list may be sorted by; the first is the default.
pub const SORTABLE_COLUMNS: &[&str] = &[
    "created_at",
    "updated_at",
    "id",
    "serial",
    "name",
    "model",
    "manufacturer",
    "status",
];

/// Repository for the `drones` table.
pub struct DroneRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DroneRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new drone
    ///
    /// Sets `created_at` and `updated_at` to the current time.
    ///
    /// # Arguments
    /// - `params`: Validated drone fields, including the initial status
    ///
    /// # Returns
    /// - `Ok(Drone)`: The created drone
    /// - `Err(DbErr)`: Database error, including a unique violation on `serial`
    pub async fn create(&self, params: CreateDroneParams) -> Result<Drone, DbErr> {
        let now = Utc::now();

        let drone = entity::drone::ActiveModel {
            serial: ActiveValue::Set(params.serial),
            name: ActiveValue::Set(params.name),
            model: ActiveValue::Set(params.model),
            manufacturer: ActiveValue::Set(params.manufacturer),
            status: ActiveValue::Set(params.status.as_str().to_string()),
            owner_user_id: ActiveValue::Set(params.owner_user_id),
            manufacture_year: ActiveValue::Set(params.manufacture_year),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Drone::from_entity(drone)
    }

    /// Finds a drone by id
    ///
    /// # Returns
    /// - `Ok(Some(Drone))`: Drone found
    /// - `Ok(None)`: No drone with that id
    /// - `Err(DbErr)`: Database error or an unknown stored status
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Drone>, DbErr> {
        entity::prelude::Drone::find_by_id(id)
            .one(self.db)
            .await?
            .map(Drone::from_entity)
            .transpose()
    }

    /// Finds a drone by its exact serial number
    pub async fn get_by_serial(&self, serial: &str) -> Result<Option<Drone>, DbErr> {
        entity::prelude::Drone::find()
            .filter(entity::drone::Column::Serial.eq(serial))
            .one(self.db)
            .await?
            .map(Drone::from_entity)
            .transpose()
    }

    /// Checks whether a drone with `id` exists without loading it
    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Drone::find_by_id(id).count(self.db).await?;

        Ok(count > 0)
    }

    /// Gets a page of drones, searching serial, name, model and manufacturer
    ///
    /// # Arguments
    /// - `filter`: Optional status filter
    /// - `page`: Validated page, sort column and search term
    ///
    /// # Returns
    /// - `Ok((Vec<Drone>, u64))`: Drones on the requested page and the total matching count
    /// - `Err(DbErr)`: Database error
    pub async fn get_paginated(
        &self,
        filter: &DroneFilter,
        page: &PageRequest,
    ) -> Result<(Vec<Drone>, u64), DbErr> {
        let mut query = entity::prelude::Drone::find();

        if let Some(status) = filter.status {
            query = query.filter(entity::drone::Column::Status.eq(status.as_str()));
        }

        if let Some(term) = &page.search {
            query = query.filter(
                Condition::any()
                    .add(entity::drone::Column::Serial.contains(term))
                    .add(entity::drone::Column::Name.contains(term))
                    .add(entity::drone::Column::Model.contains(term))
                    .add(entity::drone::Column::Manufacturer.contains(term)),
            );
        }

        let paginator = query
            .order_by(
                sort_column::<entity::drone::Column>(page.sort_by)?,
                page.order(),
            )
            .order_by(entity::drone::Column::Id, page.order())
            .paginate(self.db, page.page_size);

        let total = paginator.num_items().await?;
        let drones = paginator
            .fetch_page(page.page_index())
            .await?
            .into_iter()
            .map(Drone::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((drones, total))
    }

    /// Updates the descriptive fields present in `params`
    ///
    /// Status is not touched here; status changes go through `set_status` so they can be
    /// archived.
    ///
    /// # Returns
    /// - `Ok(Drone)`: The updated drone
    /// - `Err(DbErr::RecordNotFound)`: No drone with that id
    /// - `Err(DbErr)`: Database error, including a unique violation on `serial`
    pub async fn update(&self, id: i32, params: UpdateDroneParams) -> Result<Drone, DbErr> {
        let drone = entity::prelude::Drone::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!("Drone {} not found", id)))?;

        let mut active_model: entity::drone::ActiveModel = drone.into();
        if let Some(name) = params.name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(model) = params.model {
            active_model.model = ActiveValue::Set(model);
        }
        if let Some(manufacturer) = params.manufacturer {
            active_model.manufacturer = ActiveValue::Set(manufacturer);
        }
        if let Some(owner_user_id) = params.owner_user_id {
            active_model.owner_user_id = ActiveValue::Set(Some(owner_user_id));
        }
        if let Some(year) = params.manufacture_year {
            active_model.manufacture_year = ActiveValue::Set(Some(year));
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        Drone::from_entity(active_model.update(self.db).await?)
    }

    /// Writes a new status without any transition check
    pub async fn set_status(&self, id: i32, status: DroneStatus) -> Result<Drone, DbErr> {
        let drone = entity::prelude::Drone::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!("Drone {} not found", id)))?;

        let mut active_model: entity::drone::ActiveModel = drone.into();
        active_model.status = ActiveValue::Set(status.as_str().to_string());
        active_model.updated_at = ActiveValue::Set(Utc::now());

        Drone::from_entity(active_model.update(self.db).await?)
    }

    /// Deletes a drone, returning the number of rows removed
    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Drone::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Counts drones grouped by status; statuses without drones are omitted
    pub async fn count_by_status(&self) -> Result<Vec<(DroneStatus, u64)>, DbErr> {
        let rows: Vec<(String, i64)> = entity::prelude::Drone::find()
            .select_only()
            .column(entity::drone::Column::Status)
            .column_as(entity::drone::Column::Id.count(), "count")
            .group_by(entity::drone::Column::Status)
            .into_tuple()
            .all(self.db)
            .await?;

        rows.into_iter()
            .map(|(status, count)| Ok((parse_stored(&status)?, count.max(0) as u64)))
            .collect()
    }
}
