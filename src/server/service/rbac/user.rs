use sea_orm::DatabaseConnection;

use crate::server::{
    data::rbac::user::UserRepository,
    error::AppError,
    model::{
        pagination::{PageRequest, Paginated},
        rbac::{CreateUserParams, UpdateUserParams, User, UserFilter},
    },
    service::rbac::user_not_found,
};

/// User CRUD.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a user; a taken username or email surfaces as a conflict
    pub async fn create(&self, params: CreateUserParams) -> Result<User, AppError> {
        let params = params.validate()?;
        let user = UserRepository::new(self.db).create(params).await?;

        tracing::info!(user_id = user.id, username = %user.username, "user created");

        Ok(user)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .get_by_id(id)
            .await?
            .ok_or_else(|| user_not_found(id))
    }

    pub async fn get_paginated(
        &self,
        filter: &UserFilter,
        page: &PageRequest,
    ) -> Result<Paginated<User>, AppError> {
        let (users, total) = UserRepository::new(self.db)
            .get_paginated(filter, page)
            .await?;

        Ok(Paginated::new(users, total, page))
    }

    /// Updates the fields present in `params`, or `NotFound`
    pub async fn update(&self, id: i32, params: UpdateUserParams) -> Result<User, AppError> {
        let params = params.validate()?;
        let repo = UserRepository::new(self.db);

        if !repo.exists(id).await? {
            return Err(user_not_found(id));
        }

        Ok(repo.update(id, params).await?)
    }

    /// Deletes a user along with their role assignments and preferences
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if UserRepository::new(self.db).delete(id).await? == 0 {
            return Err(user_not_found(id));
        }

        tracing::info!(user_id = id, "user deleted");

        Ok(())
    }
}
