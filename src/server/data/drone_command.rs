use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde_json::Value;

use crate::{
    model::drone_command::{CommandStatus, CommandType},
    server::{
        data::sort_column,
        model::{
            drone_command::{
                CreateDroneCommandParams, DroneCommand, DroneCommandFilter, StatusStamp,
            },
            pagination::PageRequest,
            parse_stored,
        },
    },
};

pub const SORTABLE_COLUMNS: &[&str] = &[
    "issued_at",
    "id",
    "drone_id",
    "command_type",
    "status",
    "executed_at",
    "completed_at",
];

/// Repository for the `drone_commands` table.
pub struct DroneCommandRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DroneCommandRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a pending command issued at `now`
    ///
    /// # Arguments
    /// - `params`: Validated command with payload checked against its type
    /// - `now`: Value for `issued_at`
    ///
    /// # Returns
    /// - `Ok(DroneCommand)`: The stored command
    /// - `Err(DbErr)`: Database error, including a foreign key violation for an unknown drone
    pub async fn create(
        &self,
        params: CreateDroneCommandParams,
        now: DateTime<Utc>,
    ) -> Result<DroneCommand, DbErr> {
        let command = entity::drone_command::ActiveModel {
            drone_id: ActiveValue::Set(params.drone_id),
            command_type: ActiveValue::Set(params.command_type.as_str().to_string()),
            command_data: ActiveValue::Set(params.command_data),
            status: ActiveValue::Set(CommandStatus::Pending.as_str().to_string()),
            issued_by: ActiveValue::Set(params.issued_by),
            issued_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        DroneCommand::from_entity(command)
    }

    /// Finds a command by id
    pub async fn get_by_id(&self, id: i32) -> Result<Option<DroneCommand>, DbErr> {
        entity::prelude::DroneCommand::find_by_id(id)
            .one(self.db)
            .await?
            .map(DroneCommand::from_entity)
            .transpose()
    }

    /// Gets a page of commands, searching command type and error message
    ///
    /// # Arguments
    /// - `filter`: Optional drone, status and command type filters
    /// - `page`: Validated page, sort column and search term
    ///
    /// # Returns
    /// - `Ok((Vec<DroneCommand>, u64))`: Commands on the page and the total matching count
    /// - `Err(DbErr)`: Database error
    pub async fn get_paginated(
        &self,
        filter: &DroneCommandFilter,
        page: &PageRequest,
    ) -> Result<(Vec<DroneCommand>, u64), DbErr> {
        let mut query = entity::prelude::DroneCommand::find();

        if let Some(drone_id) = filter.drone_id {
            query = query.filter(entity::drone_command::Column::DroneId.eq(drone_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::drone_command::Column::Status.eq(status.as_str()));
        }
        if let Some(command_type) = filter.command_type {
            query =
                query.filter(entity::drone_command::Column::CommandType.eq(command_type.as_str()));
        }
        if let Some(term) = &page.search {
            query = query.filter(
                Condition::any()
                    .add(entity::drone_command::Column::CommandType.contains(term))
                    .add(entity::drone_command::Column::ErrorMessage.contains(term)),
            );
        }

        let paginator = query
            .order_by(
                sort_column::<entity::drone_command::Column>(page.sort_by)?,
                page.order(),
            )
            .order_by(entity::drone_command::Column::Id, page.order())
            .paginate(self.db, page.page_size);

        let total = paginator.num_items().await?;
        let commands = paginator
            .fetch_page(page.page_index())
            .await?
            .into_iter()
            .map(DroneCommand::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((commands, total))
    }

    /// Gets every command for a drone, newest first
    pub async fn get_by_drone(&self, drone_id: i32) -> Result<Vec<DroneCommand>, DbErr> {
        entity::prelude::DroneCommand::find()
            .filter(entity::drone_command::Column::DroneId.eq(drone_id))
            .order_by_desc(entity::drone_command::Column::IssuedAt)
            .order_by_desc(entity::drone_command::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(DroneCommand::from_entity)
            .collect()
    }

    /// Replaces the payload of a command
    ///
    /// Does not check the command's status; callers only allow this while it is pending.
    ///
    /// # Arguments
    /// - `id`: Command to update
    /// - `command_data`: New payload, or `None` to clear it
    ///
    /// # Returns
    /// - `Ok(DroneCommand)`: The updated command
    /// - `Err(DbErr::RecordNotFound)`: No command with that id
    pub async fn update_data(
        &self,
        id: i32,
        command_data: Option<Value>,
    ) -> Result<DroneCommand, DbErr> {
        let command = entity::prelude::DroneCommand::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!("Command {} not found", id)))?;

        let mut active_model: entity::drone_command::ActiveModel = command.into();
        active_model.command_data = ActiveValue::Set(command_data);

        DroneCommand::from_entity(active_model.update(self.db).await?)
    }

    /// Applies a status change, keeping timestamps already stamped by earlier transitions
    ///
    /// The transition itself is validated by the caller.
    ///
    /// # Arguments
    /// - `id`: Command to update
    /// - `stamp`: New status plus whichever timestamps and error message the change sets
    ///
    /// # Returns
    /// - `Ok(DroneCommand)`: The updated command
    /// - `Err(DbErr::RecordNotFound)`: No command with that id
    pub async fn update_status(&self, id: i32, stamp: StatusStamp) -> Result<DroneCommand, DbErr> {
        let command = entity::prelude::DroneCommand::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!("Command {} not found", id)))?;

        let mut active_model: entity::drone_command::ActiveModel = command.into();
        active_model.status = ActiveValue::Set(stamp.status.as_str().to_string());
        if stamp.executed_at.is_some() {
            active_model.executed_at = ActiveValue::Set(stamp.executed_at);
        }
        if stamp.completed_at.is_some() {
            active_model.completed_at = ActiveValue::Set(stamp.completed_at);
        }
        if stamp.error_message.is_some() {
            active_model.error_message = ActiveValue::Set(stamp.error_message);
        }

        DroneCommand::from_entity(active_model.update(self.db).await?)
    }

    /// Deletes a command, returning the number of rows removed
    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::DroneCommand::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Counts commands grouped by status
    ///
    /// # Returns
    /// - `Ok(Vec<(CommandStatus, u64)>)`: One pair per status that has commands
    /// - `Err(DbErr)`: Database error or an unknown stored status
    pub async fn count_by_status(&self) -> Result<Vec<(CommandStatus, u64)>, DbErr> {
        let rows: Vec<(String, i64)> = entity::prelude::DroneCommand::find()
            .select_only()
            .column(entity::drone_command::Column::Status)
            .column_as(entity::drone_command::Column::Id.count(), "count")
            .group_by(entity::drone_command::Column::Status)
            .into_tuple()
            .all(self.db)
            .await?;

        rows.into_iter()
            .map(|(status, count)| Ok((parse_stored(&status)?, count.max(0) as u64)))
            .collect()
    }

    /// Counts commands grouped by command type
    pub async fn count_by_type(&self) -> Result<Vec<(CommandType, u64)>, DbErr> {
        let rows: Vec<(String, i64)> = entity::prelude::DroneCommand::find()
            .select_only()
            .column(entity::drone_command::Column::CommandType)
            .column_as(entity::drone_command::Column::Id.count(), "count")
            .group_by(entity::drone_command::Column::CommandType)
            .into_tuple()
            .all(self.db)
            .await?;

        rows.into_iter()
            .map(|(command_type, count)| Ok((parse_stored(&command_type)?, count.max(0) as u64)))
            .collect()
    }
}
