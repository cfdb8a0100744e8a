use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::sort_column,
    model::{
        pagination::PageRequest,
        rbac::{CreateRoleParams, Role, UpdateRoleParams},
    },
};

pub const SORTABLE_COLUMNS: &[&str] = &["created_at", "id", "name", "updated_at"];

/// Repository for the `roles` table.
pub struct RoleRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RoleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a role
    ///
    /// # Returns
    /// - `Ok(Role)`: The created role
    /// - `Err(DbErr)`: Database error, including a unique violation on `name`
    pub async fn create(&self, params: CreateRoleParams) -> Result<Role, DbErr> {
        let now = Utc::now();
        let role = entity::role::ActiveModel {
            name: ActiveValue::Set(params.name),
            display_name: ActiveValue::Set(params.display_name),
            description: ActiveValue::Set(params.description),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Role::from_entity(role))
    }

    /// Finds a role by id
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Role>, DbErr> {
        let role = entity::prelude::Role::find_by_id(id).one(self.db).await?;

        Ok(role.map(Role::from_entity))
    }

    /// Checks whether a role with `id` exists
    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Role::find_by_id(id).count(self.db).await?;

        Ok(count > 0)
    }

    /// Gets a page of roles, searching name, display name and description
    ///
    /// # Arguments
    /// - `page`: Validated page, sort column and search term
    ///
    /// # Returns
    /// - `Ok((Vec<Role>, u64))`: Roles on the page and the total matching count
    /// - `Err(DbErr)`: Database error
    pub async fn get_paginated(&self, page: &PageRequest) -> Result<(Vec<Role>, u64), DbErr> {
        let mut query = entity::prelude::Role::find();

        if let Some(term) = &page.search {
            query = query.filter(
                Condition::any()
                    .add(entity::role::Column::Name.contains(term))
                    .add(entity::role::Column::DisplayName.contains(term))
                    .add(entity::role::Column::Description.contains(term)),
            );
        }

        let paginator = query
            .order_by(sort_column::<entity::role::Column>(page.sort_by)?, page.order())
            .order_by(entity::role::Column::Id, page.order())
            .paginate(self.db, page.page_size);

        let total = paginator.num_items().await?;
        let roles = paginator
            .fetch_page(page.page_index())
            .await?
            .into_iter()
            .map(Role::from_entity)
            .collect();

        Ok((roles, total))
    }

    /// Gets the roles assigned to a user, sorted by name
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<Role>, DbErr> {
        let roles = entity::prelude::Role::find()
            .inner_join(entity::prelude::UserRole)
            .filter(entity::user_role::Column::UserId.eq(user_id))
            .order_by_asc(entity::role::Column::Name)
            .all(self.db)
            .await?;

        Ok(roles.into_iter().map(Role::from_entity).collect())
    }

    /// Updates the fields present in `params`
    ///
    /// # Returns
    /// - `Ok(Role)`: The updated role
    /// - `Err(DbErr::RecordNotFound)`: No role with that id
    pub async fn update(&self, id: i32, params: UpdateRoleParams) -> Result<Role, DbErr> {
        let role = entity::prelude::Role::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!("Role {} not found", id)))?;

        let mut active_model: entity::role::ActiveModel = role.into();
        if let Some(name) = params.name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(display_name) = params.display_name {
            active_model.display_name = ActiveValue::Set(Some(display_name));
        }
        if let Some(description) = params.description {
            active_model.description = ActiveValue::Set(Some(description));
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        Ok(Role::from_entity(active_model.update(self.db).await?))
    }

    /// Deletes a role along with its user and permission assignments
    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Role::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected)
    }
}
