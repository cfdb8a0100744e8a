//! Shared helper utilities for factory methods.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Counter for generating unique values in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// Provides monotonically increasing values for unique serials, usernames and names
/// across all factories.
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a user holding one role which grants the given permission.
///
/// Inserts the user, role, permission and both join rows.
///
/// # Returns
/// - `Ok((user, role, permission))` - All created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_user_with_permission(
    db: &DatabaseConnection,
    permission_name: &str,
) -> Result<
    (
        entity::user::Model,
        entity::role::Model,
        entity::permission::Model,
    ),
    DbErr,
> {
    let user = crate::factory::user::create_user(db).await?;
    let role = crate::factory::role::create_role(db).await?;
    let permission = crate::factory::permission::PermissionFactory::new(db)
        .name(permission_name)
        .build()
        .await?;

    assign_role(db, user.id, role.id).await?;
    grant_permission(db, role.id, permission.id).await?;

    Ok((user, role, permission))
}

/// Inserts a `user_roles` row.
pub async fn assign_role(
    db: &DatabaseConnection,
    user_id: i32,
    role_id: i32,
) -> Result<entity::user_role::Model, DbErr> {
    entity::user_role::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        role_id: ActiveValue::Set(role_id),
        created_at: ActiveValue::Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Inserts a `role_permissions` row.
pub async fn grant_permission(
    db: &DatabaseConnection,
    role_id: i32,
    permission_id: i32,
) -> Result<entity::role_permission::Model, DbErr> {
    entity::role_permission::ActiveModel {
        role_id: ActiveValue::Set(role_id),
        permission_id: ActiveValue::Set(permission_id),
        created_at: ActiveValue::Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
