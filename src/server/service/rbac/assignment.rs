//! Role and permission assignments and the lookups built on them.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::rbac::{
        permission::PermissionRepository, role::RoleRepository,
        role_permission::RolePermissionRepository, user::UserRepository,
        user_role::UserRoleRepository,
    },
    error::AppError,
    model::rbac::{validate_permission_name, Permission, Role},
    service::rbac::{permission_not_found, role_not_found, user_not_found},
};

/// Role assignments, permission grants and permission checks.
pub struct AssignmentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AssignmentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Assigns a role to a user
    ///
    /// # Returns
    /// - `Ok(())`: Role assigned
    /// - `Err(AppError::NotFound)`: User or role does not exist
    /// - `Err(AppError::Conflict)`: User already has the role
    pub async fn assign_role(&self, user_id: i32, role_id: i32) -> Result<(), AppError> {
        self.require_user(user_id).await?;
        self.require_role(role_id).await?;

        let repo = UserRoleRepository::new(self.db);
        if repo.exists(user_id, role_id).await? {
            return Err(AppError::Conflict(format!(
                "User {} already has role {}",
                user_id, role_id
            )));
        }
        repo.assign(user_id, role_id).await?;

        tracing::info!(user_id, role_id, "role assigned");

        Ok(())
    }

    /// Removes a role from a user, or `NotFound` when it was not assigned
    pub async fn remove_role(&self, user_id: i32, role_id: i32) -> Result<(), AppError> {
        if UserRoleRepository::new(self.db)
            .remove(user_id, role_id)
            .await?
            == 0
        {
            return Err(AppError::NotFound(format!(
                "User {} does not have role {}",
                user_id, role_id
            )));
        }

        Ok(())
    }

    /// Grants a permission to a role
    ///
    /// # Returns
    /// - `Ok(())`: Permission granted
    /// - `Err(AppError::NotFound)`: Role or permission does not exist
    /// - `Err(AppError::Conflict)`: Role already has the permission
    pub async fn assign_permission(&self, role_id: i32, permission_id: i32) -> Result<(), AppError> {
        self.require_role(role_id).await?;
        if !PermissionRepository::new(self.db).exists(permission_id).await? {
            return Err(permission_not_found(permission_id));
        }

        let repo = RolePermissionRepository::new(self.db);
        if repo.exists(role_id, permission_id).await? {
            return Err(AppError::Conflict(format!(
                "Role {} already has permission {}",
                role_id, permission_id
            )));
        }
        repo.assign(role_id, permission_id).await?;

        tracing::info!(role_id, permission_id, "permission granted");

        Ok(())
    }

    /// Revokes a permission from a role, or `NotFound` when it was not granted
    pub async fn remove_permission(&self, role_id: i32, permission_id: i32) -> Result<(), AppError> {
        if RolePermissionRepository::new(self.db)
            .remove(role_id, permission_id)
            .await?
            == 0
        {
            return Err(AppError::NotFound(format!(
                "Role {} does not have permission {}",
                role_id, permission_id
            )));
        }

        Ok(())
    }

    /// Roles of an existing user, sorted by name
    pub async fn get_user_roles(&self, user_id: i32) -> Result<Vec<Role>, AppError> {
        self.require_user(user_id).await?;

        Ok(RoleRepository::new(self.db).get_by_user(user_id).await?)
    }

    /// Permissions of an existing role, sorted by name
    pub async fn get_role_permissions(&self, role_id: i32) -> Result<Vec<Permission>, AppError> {
        self.require_role(role_id).await?;

        Ok(PermissionRepository::new(self.db)
            .get_by_role(role_id)
            .await?)
    }

    /// Distinct permissions granted through any of the user's roles
    pub async fn get_user_permissions(&self, user_id: i32) -> Result<Vec<Permission>, AppError> {
        self.require_user(user_id).await?;

        Ok(PermissionRepository::new(self.db)
            .get_by_user(user_id)
            .await?)
    }

    /// Inactive users hold no permissions
    pub async fn check_user_permission(
        &self,
        user_id: i32,
        permission: &str,
    ) -> Result<bool, AppError> {
        let permission = validate_permission_name(permission)?;
        self.require_user(user_id).await?;

        Ok(PermissionRepository::new(self.db)
            .user_has_permission(user_id, &permission)
            .await?)
    }

    async fn require_user(&self, user_id: i32) -> Result<(), AppError> {
        if !UserRepository::new(self.db).exists(user_id).await? {
            return Err(user_not_found(user_id));
        }
        Ok(())
    }

    async fn require_role(&self, role_id: i32) -> Result<(), AppError> {
        if !RoleRepository::new(self.db).exists(role_id).await? {
            return Err(role_not_found(role_id));
        }
        Ok(())
    }
}
