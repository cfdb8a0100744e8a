use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};

use crate::server::{
    data::sort_column,
    model::{
        pagination::PageRequest,
        rbac::{CreatePermissionParams, Permission, UpdatePermissionParams},
    },
};

pub const SORTABLE_COLUMNS: &[&str] = &["created_at", "id", "name", "updated_at"];

/// Repository for the `permissions` table and permission lookups through roles.
pub struct PermissionRepository<'a, C> {
    db: &'a C,
}

/// Permissions reachable from a user through any of their roles.
fn granted_to_user(user_id: i32) -> Select<entity::prelude::Permission> {
    entity::prelude::Permission::find()
        .inner_join(entity::prelude::RolePermission)
        .join(JoinType::InnerJoin, entity::role_permission::Relation::Role.def())
        .join(JoinType::InnerJoin, entity::role::Relation::UserRole.def())
        .filter(entity::user_role::Column::UserId.eq(user_id))
}

impl<'a, C: ConnectionTrait> PermissionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a permission
    ///
    /// # Arguments
    /// - `params`: `resource:action` name plus resource, action and description
    ///
    /// # Returns
    /// - `Ok(Permission)`: The created permission
    /// - `Err(DbErr)`: Database error, including a unique violation on `name`
    pub async fn create(&self, params: CreatePermissionParams) -> Result<Permission, DbErr> {
        let now = Utc::now();
        let permission = entity::permission::ActiveModel {
            name: ActiveValue::Set(params.name),
            description: ActiveValue::Set(params.description),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Permission::from_entity(permission))
    }

    /// Finds a permission by id
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Permission>, DbErr> {
        let permission = entity::prelude::Permission::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(permission.map(Permission::from_entity))
    }

    /// Checks whether a permission with `id` exists
    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::Permission::find_by_id(id)
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets a page of permissions, searching name and description
    ///
    /// # Returns
    /// - `Ok((Vec<Permission>, u64))`: Permissions on the page and the total matching count
    /// - `Err(DbErr)`: Database error
    pub async fn get_paginated(
        &self,
        page: &PageRequest,
    ) -> Result<(Vec<Permission>, u64), DbErr> {
        let mut query = entity::prelude::Permission::find();

        if let Some(term) = &page.search {
            query = query.filter(
                Condition::any()
                    .add(entity::permission::Column::Name.contains(term))
                    .add(entity::permission::Column::Description.contains(term)),
            );
        }

        let paginator = query
            .order_by(
                sort_column::<entity::permission::Column>(page.sort_by)?,
                page.order(),
            )
            .order_by(entity::permission::Column::Id, page.order())
            .paginate(self.db, page.page_size);

        let total = paginator.num_items().await?;
        let permissions = paginator
            .fetch_page(page.page_index())
            .await?
            .into_iter()
            .map(Permission::from_entity)
            .collect();

        Ok((permissions, total))
    }

    /// Gets the permissions granted to a role, sorted by name
    pub async fn get_by_role(&self, role_id: i32) -> Result<Vec<Permission>, DbErr> {
        let permissions = entity::prelude::Permission::find()
            .inner_join(entity::prelude::RolePermission)
            .filter(entity::role_permission::Column::RoleId.eq(role_id))
            .order_by_asc(entity::permission::Column::Name)
            .all(self.db)
            .await?;

        Ok(permissions.into_iter().map(Permission::from_entity).collect())
    }

    /// Gets every permission a user holds through their roles, deduplicated and sorted by name
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<Permission>, DbErr> {
        let permissions = granted_to_user(user_id)
            .distinct()
            .order_by_asc(entity::permission::Column::Name)
            .all(self.db)
            .await?;

        Ok(permissions.into_iter().map(Permission::from_entity).collect())
    }

    /// Checks whether an active user holds the named permission through any role
    pub async fn user_has_permission(&self, user_id: i32, name: &str) -> Result<bool, DbErr> {
        let count = granted_to_user(user_id)
            .join(JoinType::InnerJoin, entity::user_role::Relation::User.def())
            .filter(entity::user::Column::IsActive.eq(true))
            .filter(entity::permission::Column::Name.eq(name))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Updates the fields present in `params`
    ///
    /// # Returns
    /// - `Ok(Permission)`: The updated permission
    /// - `Err(DbErr::RecordNotFound)`: No permission with that id
    /// - `Err(DbErr)`: Database error, including a unique violation on `name`
    pub async fn update(
        &self,
        id: i32,
        params: UpdatePermissionParams,
    ) -> Result<Permission, DbErr> {
        let permission = entity::prelude::Permission::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!("Permission {} not found", id)))?;

        let mut active_model: entity::permission::ActiveModel = permission.into();
        if let Some(name) = params.name {
            active_model.name = ActiveValue::Set(name);
        }
        if let Some(description) = params.description {
            active_model.description = ActiveValue::Set(Some(description));
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        Ok(Permission::from_entity(active_model.update(self.db).await?))
    }

    /// Deletes a permission; its role grants go with it through the foreign key cascade
    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Permission::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
