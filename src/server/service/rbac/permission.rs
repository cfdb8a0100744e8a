use sea_orm::DatabaseConnection;

use crate::server::{
    data::rbac::permission::PermissionRepository,
    error::AppError,
    model::{
        pagination::{PageRequest, Paginated},
        rbac::{CreatePermissionParams, Permission, UpdatePermissionParams},
    },
    service::rbac::permission_not_found,
};

/// Permission CRUD.
pub struct PermissionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PermissionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a permission; the name must be `resource:action` and unused
    pub async fn create(&self, params: CreatePermissionParams) -> Result<Permission, AppError> {
        let params = params.validate()?;

        Ok(PermissionRepository::new(self.db).create(params).await?)
    }

    /// Gets a permission, or `NotFound`
    pub async fn get_by_id(&self, id: i32) -> Result<Permission, AppError> {
        PermissionRepository::new(self.db)
            .get_by_id(id)
            .await?
            .ok_or_else(|| permission_not_found(id))
    }

    pub async fn get_paginated(&self, page: &PageRequest) -> Result<Paginated<Permission>, AppError> {
        let (permissions, total) = PermissionRepository::new(self.db)
            .get_paginated(page)
            .await?;

        Ok(Paginated::new(permissions, total, page))
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdatePermissionParams,
    ) -> Result<Permission, AppError> {
        let params = params.validate()?;
        let repo = PermissionRepository::new(self.db);

        if !repo.exists(id).await? {
            return Err(permission_not_found(id));
        }

        Ok(repo.update(id, params).await?)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if PermissionRepository::new(self.db).delete(id).await? == 0 {
            return Err(permission_not_found(id));
        }

        Ok(())
    }
}
