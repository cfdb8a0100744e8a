use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::sort_column,
    model::{
        pagination::PageRequest,
        user_preference::{
            CreateUserPreferenceParams, UpdateUserPreferenceParams, UserPreference,
            UserPreferenceFilter,
        },
    },
};

pub const SORTABLE_COLUMNS: &[&str] = &["created_at", "id", "user_id", "updated_at", "language"];

/// Repository for `user_preferences`, holding at most one row per user.
pub struct UserPreferenceRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserPreferenceRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a preference row
    ///
    /// # Arguments
    /// - `params`: Every preference value, typically defaults overlaid with the request
    ///
    /// # Returns
    /// - `Ok(UserPreference)`: The created row
    /// - `Err(DbErr)`: Database error, including a unique violation when the user already has one
    pub async fn create(
        &self,
        params: CreateUserPreferenceParams,
    ) -> Result<UserPreference, DbErr> {
        let now = Utc::now();
        let preference = entity::user_preference::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            theme: ActiveValue::Set(params.theme.as_str().to_string()),
            language: ActiveValue::Set(params.language),
            timezone: ActiveValue::Set(params.timezone),
            auto_save: ActiveValue::Set(params.auto_save),
            notifications: ActiveValue::Set(params.notifications),
            email_notifications: ActiveValue::Set(params.email_notifications),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        UserPreference::from_entity(preference)
    }

    /// Finds a preference row by id
    pub async fn get_by_id(&self, id: i32) -> Result<Option<UserPreference>, DbErr> {
        entity::prelude::UserPreference::find_by_id(id)
            .one(self.db)
            .await?
            .map(UserPreference::from_entity)
            .transpose()
    }

    /// Finds the preference row of a user
    pub async fn get_by_user(&self, user_id: i32) -> Result<Option<UserPreference>, DbErr> {
        entity::prelude::UserPreference::find()
            .filter(entity::user_preference::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
            .map(UserPreference::from_entity)
            .transpose()
    }

    /// Gets a page of preference rows filtered by theme and language, searching timezones
    pub async fn get_paginated(
        &self,
        filter: &UserPreferenceFilter,
        page: &PageRequest,
    ) -> Result<(Vec<UserPreference>, u64), DbErr> {
        let mut query = entity::prelude::UserPreference::find();

        if let Some(theme) = filter.theme {
            query = query.filter(entity::user_preference::Column::Theme.eq(theme.as_str()));
        }
        if let Some(language) = &filter.language {
            query = query.filter(entity::user_preference::Column::Language.eq(language.as_str()));
        }
        if let Some(term) = &page.search {
            query = query.filter(entity::user_preference::Column::Timezone.contains(term));
        }

        let paginator = query
            .order_by(
                sort_column::<entity::user_preference::Column>(page.sort_by)?,
                page.order(),
            )
            .order_by(entity::user_preference::Column::Id, page.order())
            .paginate(self.db, page.page_size);

        let total = paginator.num_items().await?;
        let preferences = paginator
            .fetch_page(page.page_index())
            .await?
            .into_iter()
            .map(UserPreference::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((preferences, total))
    }

    /// Applies the present fields of `params` to the preference row with `id`
    ///
    /// # Returns
    /// - `Ok(UserPreference)`: The updated row
    /// - `Err(DbErr::RecordNotFound)`: No row with that id
    pub async fn update(
        &self,
        id: i32,
        params: UpdateUserPreferenceParams,
    ) -> Result<UserPreference, DbErr> {
        let preference = entity::prelude::UserPreference::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "User preference {} not found",
                id
            )))?;

        let mut active_model: entity::user_preference::ActiveModel = preference.into();
        if let Some(theme) = params.theme {
            active_model.theme = ActiveValue::Set(theme.as_str().to_string());
        }
        if let Some(language) = params.language {
            active_model.language = ActiveValue::Set(language);
        }
        if let Some(timezone) = params.timezone {
            active_model.timezone = ActiveValue::Set(timezone);
        }
        if let Some(auto_save) = params.auto_save {
            active_model.auto_save = ActiveValue::Set(auto_save);
        }
        if let Some(notifications) = params.notifications {
            active_model.notifications = ActiveValue::Set(notifications);
        }
        if let Some(email_notifications) = params.email_notifications {
            active_model.email_notifications = ActiveValue::Set(email_notifications);
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        UserPreference::from_entity(active_model.update(self.db).await?)
    }

    /// Writes the user's preferences in one statement, inserting defaults when absent
    ///
    /// A new row takes the present fields of `params` over the defaults. An existing row
    /// only has its present fields overwritten; `updated_at` is always refreshed.
    ///
    /// # Arguments
    /// - `user_id`: Owner of the preference row
    /// - `params`: Partial update to apply
    ///
    /// # Returns
    /// - `Ok(UserPreference)`: The stored row
    /// - `Err(DbErr)`: Database error, including a foreign key violation for an unknown user
    pub async fn upsert_by_user(
        &self,
        user_id: i32,
        params: UpdateUserPreferenceParams,
    ) -> Result<UserPreference, DbErr> {
        use entity::user_preference::Column;

        let mut update_columns = vec![Column::UpdatedAt];
        if params.theme.is_some() {
            update_columns.push(Column::Theme);
        }
        if params.language.is_some() {
            update_columns.push(Column::Language);
        }
        if params.timezone.is_some() {
            update_columns.push(Column::Timezone);
        }
        if params.auto_save.is_some() {
            update_columns.push(Column::AutoSave);
        }
        if params.notifications.is_some() {
            update_columns.push(Column::Notifications);
        }
        if params.email_notifications.is_some() {
            update_columns.push(Column::EmailNotifications);
        }

        let values = CreateUserPreferenceParams::defaults(user_id).apply(params);
        let now = Utc::now();

        let preference = entity::prelude::UserPreference::insert(entity::user_preference::ActiveModel {
            user_id: ActiveValue::Set(values.user_id),
            theme: ActiveValue::Set(values.theme.as_str().to_string()),
            language: ActiveValue::Set(values.language),
            timezone: ActiveValue::Set(values.timezone),
            auto_save: ActiveValue::Set(values.auto_save),
            notifications: ActiveValue::Set(values.notifications),
            email_notifications: ActiveValue::Set(values.email_notifications),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(Column::UserId)
                .update_columns(update_columns)
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        UserPreference::from_entity(preference)
    }

    /// Deletes a preference row, returning the number of rows removed
    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::UserPreference::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
