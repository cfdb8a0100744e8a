use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::user_preference::CreateUserPreferenceDto,
    server::{
        data::{rbac::user::UserRepository, user_preference::UserPreferenceRepository},
        error::AppError,
        model::{
            batch::BatchOutcome,
            pagination::{PageRequest, Paginated},
            user_preference::{
                CreateUserPreferenceParams, UpdateUserPreferenceParams, UserPreference,
                UserPreferenceFilter,
            },
        },
        service::{rbac::user_not_found, run_batch},
    },
};

/// Per-user preferences, at most one row per user.
pub struct UserPreferenceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserPreferenceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates the preference row of a user who has none yet
    pub async fn create(
        &self,
        params: CreateUserPreferenceParams,
    ) -> Result<UserPreference, AppError> {
        if !UserRepository::new(self.db).exists(params.user_id).await? {
            return Err(user_not_found(params.user_id));
        }

        let repo = UserPreferenceRepository::new(self.db);
        if repo.get_by_user(params.user_id).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Preferences for user {} already exist",
                params.user_id
            )));
        }

        Ok(repo.create(params).await?)
    }

    /// Creates each preference row independently, collecting per-item failures
    pub async fn create_batch(
        &self,
        items: Vec<CreateUserPreferenceDto>,
    ) -> Result<BatchOutcome<UserPreference>, AppError> {
        run_batch(items, move |dto| self.create_from_dto(dto)).await
    }

    async fn create_from_dto(
        &self,
        dto: CreateUserPreferenceDto,
    ) -> Result<UserPreference, AppError> {
        self.create(CreateUserPreferenceParams::from_dto(dto)?).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<UserPreference, AppError> {
        UserPreferenceRepository::new(self.db)
            .get_by_id(id)
            .await?
            .ok_or_else(|| preference_not_found(id))
    }

    /// Gets the preferences of a user, or `NotFound` when none are stored
    pub async fn get_by_user(&self, user_id: i32) -> Result<UserPreference, AppError> {
        UserPreferenceRepository::new(self.db)
            .get_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No preferences for user {}", user_id)))
    }

    pub async fn get_paginated(
        &self,
        filter: &UserPreferenceFilter,
        page: &PageRequest,
    ) -> Result<Paginated<UserPreference>, AppError> {
        let (preferences, total) = UserPreferenceRepository::new(self.db)
            .get_paginated(filter, page)
            .await?;

        Ok(Paginated::new(preferences, total, page))
    }

    /// Applies a partial update to an existing preference row
    pub async fn update(
        &self,
        id: i32,
        params: UpdateUserPreferenceParams,
    ) -> Result<UserPreference, AppError> {
        let repo = UserPreferenceRepository::new(self.db);

        if repo.get_by_id(id).await?.is_none() {
            return Err(preference_not_found(id));
        }

        Ok(repo.update(id, params).await?)
    }

    /// Updates the user's preferences, creating them from defaults when absent
    ///
    /// The write is a single conflict-tolerant insert, so concurrent first writes for the
    /// same user never collide on the unique index.
    ///
    /// # Arguments
    /// - `user_id`: Owner of the preferences
    /// - `params`: Partial update; absent fields keep their stored or default value
    ///
    /// # Returns
    /// - `Ok((UserPreference, true))`: Row was created
    /// - `Ok((UserPreference, false))`: Existing row was updated
    /// - `Err(AppError::NotFound)`: User does not exist
    pub async fn upsert_by_user(
        &self,
        user_id: i32,
        params: UpdateUserPreferenceParams,
    ) -> Result<(UserPreference, bool), AppError> {
        if !UserRepository::new(self.db).exists(user_id).await? {
            return Err(user_not_found(user_id));
        }

        let txn = self.db.begin().await?;
        let repo = UserPreferenceRepository::new(&txn);
        let created = repo.get_by_user(user_id).await?.is_none();
        let preference = repo.upsert_by_user(user_id, params).await?;
        txn.commit().await?;

        Ok((preference, created))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if UserPreferenceRepository::new(self.db).delete(id).await? == 0 {
            return Err(preference_not_found(id));
        }

        Ok(())
    }
}

fn preference_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Preference {} not found", id))
}
