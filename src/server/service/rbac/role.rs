use sea_orm::DatabaseConnection;

use crate::server::{
    data::rbac::role::RoleRepository,
    error::AppError,
    model::{
        pagination::{PageRequest, Paginated},
        rbac::{CreateRoleParams, Role, UpdateRoleParams},
    },
    service::rbac::role_not_found,
};

/// Role CRUD.
pub struct RoleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a role; a taken name surfaces as a conflict
    pub async fn create(&self, params: CreateRoleParams) -> Result<Role, AppError> {
        let params = params.validate()?;

        Ok(RoleRepository::new(self.db).create(params).await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Role, AppError> {
        RoleRepository::new(self.db)
            .get_by_id(id)
            .await?
            .ok_or_else(|| role_not_found(id))
    }

    pub async fn get_paginated(&self, page: &PageRequest) -> Result<Paginated<Role>, AppError> {
        let (roles, total) = RoleRepository::new(self.db).get_paginated(page).await?;

        Ok(Paginated::new(roles, total, page))
    }

    pub async fn update(&self, id: i32, params: UpdateRoleParams) -> Result<Role, AppError> {
        let params = params.validate()?;
        let repo = RoleRepository::new(self.db);

        if !repo.exists(id).await? {
            return Err(role_not_found(id));
        }

        Ok(repo.update(id, params).await?)
    }

    /// Deletes a role along with its assignments and grants
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if RoleRepository::new(self.db).delete(id).await? == 0 {
            return Err(role_not_found(id));
        }

        Ok(())
    }
}
