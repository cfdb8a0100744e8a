use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter,
};

/// Repository for the `user_roles` join table.
pub struct UserRoleRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRoleRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Assigns a role to a user
    ///
    /// # Returns
    /// - `Ok(())`: Assignment stored
    /// - `Err(DbErr)`: Database error, including a unique violation when already assigned
    pub async fn assign(&self, user_id: i32, role_id: i32) -> Result<(), DbErr> {
        entity::user_role::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            role_id: ActiveValue::Set(role_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    /// Checks whether the user already has the role
    pub async fn exists(&self, user_id: i32, role_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::UserRole::find()
            .filter(entity::user_role::Column::UserId.eq(user_id))
            .filter(entity::user_role::Column::RoleId.eq(role_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Removes an assignment, returning the number of rows deleted
    pub async fn remove(&self, user_id: i32, role_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::UserRole::delete_many()
            .filter(entity::user_role::Column::UserId.eq(user_id))
            .filter(entity::user_role::Column::RoleId.eq(role_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
