use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter,
};

/// Repository for the `role_permissions` join table.
pub struct RolePermissionRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RolePermissionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Grants a permission to a role
    ///
    /// # Returns
    /// - `Ok(())`: Grant stored
    /// - `Err(DbErr)`: Database error, including a unique violation when already granted or a
    ///   foreign key violation for an unknown role or permission
    pub async fn assign(&self, role_id: i32, permission_id: i32) -> Result<(), DbErr> {
        entity::role_permission::ActiveModel {
            role_id: ActiveValue::Set(role_id),
            permission_id: ActiveValue::Set(permission_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    /// Checks whether the role already holds the permission
    pub async fn exists(&self, role_id: i32, permission_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::RolePermission::find()
            .filter(entity::role_permission::Column::RoleId.eq(role_id))
            .filter(entity::role_permission::Column::PermissionId.eq(permission_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Revokes a grant, returning the number of rows deleted
    pub async fn remove(&self, role_id: i32, permission_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::RolePermission::delete_many()
            .filter(entity::role_permission::Column::RoleId.eq(role_id))
            .filter(entity::role_permission::Column::PermissionId.eq(permission_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
