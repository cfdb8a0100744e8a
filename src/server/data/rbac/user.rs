use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::sort_column,
    model::{
        pagination::PageRequest,
        rbac::{CreateUserParams, UpdateUserParams, User, UserFilter},
    },
};

pub const SORTABLE_COLUMNS: &[&str] = &["created_at", "id", "username", "email", "updated_at"];

/// Repository for the `users` table.
pub struct UserRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a user
    ///
    /// # Arguments
    /// - `params`: Validated username, email, display name and active flag
    ///
    /// # Returns
    /// - `Ok(User)`: The created user
    /// - `Err(DbErr)`: Database error, including a unique violation on username or email
    pub async fn create(&self, params: CreateUserParams) -> Result<User, DbErr> {
        let now = Utc::now();
        let user = entity::user::ActiveModel {
            username: ActiveValue::Set(params.username),
            email: ActiveValue::Set(params.email),
            display_name: ActiveValue::Set(params.display_name),
            is_active: ActiveValue::Set(params.is_active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(user))
    }

    /// Finds a user by id
    pub async fn get_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        let user = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(user.map(User::from_entity))
    }

    /// Checks whether a user with `id` exists
    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find_by_id(id).count(self.db).await?;

        Ok(count > 0)
    }

    /// Gets a page of users, searching username, email and display name
    pub async fn get_paginated(
        &self,
        filter: &UserFilter,
        page: &PageRequest,
    ) -> Result<(Vec<User>, u64), DbErr> {
        let mut query = entity::prelude::User::find();

        if let Some(is_active) = filter.is_active {
            query = query.filter(entity::user::Column::IsActive.eq(is_active));
        }
        if let Some(term) = &page.search {
            query = query.filter(
                Condition::any()
                    .add(entity::user::Column::Username.contains(term))
                    .add(entity::user::Column::Email.contains(term))
                    .add(entity::user::Column::DisplayName.contains(term)),
            );
        }

        let paginator = query
            .order_by(sort_column::<entity::user::Column>(page.sort_by)?, page.order())
            .order_by(entity::user::Column::Id, page.order())
            .paginate(self.db, page.page_size);

        let total = paginator.num_items().await?;
        let users = paginator
            .fetch_page(page.page_index())
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect();

        Ok((users, total))
    }

    /// Updates the fields present in `params`
    ///
    /// # Returns
    /// - `Ok(User)`: The updated user
    /// - `Err(DbErr::RecordNotFound)`: No user with that id
    /// - `Err(DbErr)`: Database error, including a unique violation on username or email
    pub async fn update(&self, id: i32, params: UpdateUserParams) -> Result<User, DbErr> {
        let user = entity::prelude::User::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!("User {} not found", id)))?;

        let mut active_model: entity::user::ActiveModel = user.into();
        if let Some(username) = params.username {
            active_model.username = ActiveValue::Set(username);
        }
        if let Some(email) = params.email {
            active_model.email = ActiveValue::Set(email);
        }
        if let Some(display_name) = params.display_name {
            active_model.display_name = ActiveValue::Set(Some(display_name));
        }
        if let Some(is_active) = params.is_active {
            active_model.is_active = ActiveValue::Set(is_active);
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        Ok(User::from_entity(active_model.update(self.db).await?))
    }

    /// Deletes a user; role assignments and preferences cascade
    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::User::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected)
    }
}
