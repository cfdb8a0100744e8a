use test_utils::{
    builder::TestBuilder,
    factory::{self, helpers, permission::PermissionFactory, role::RoleFactory, user::UserFactory},
};

use super::db;
use crate::server::{
    error::AppError,
    model::rbac::CreateUserParams,
    service::rbac::{assignment::AssignmentService, user::UserService},
};

/// Tests creating a user whose username is taken.
///
/// Expected: Err whose status is 409 Conflict
#[tokio::test]
async fn create_user_conflicts_on_username() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = db(&test);

    UserFactory::new(db).username("pilot").build().await?;

    let result = UserService::new(db)
        .create(CreateUserParams {
            username: "pilot".to_string(),
            email: "other@example.com".to_string(),
            display_name: None,
            is_active: true,
        })
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);

    Ok(())
}

/// Tests assigning a role twice.
///
/// Expected: first Ok, second Err(AppError::Conflict)
#[tokio::test]
async fn assign_role_rejects_duplicate() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = db(&test);

    let user = factory::create_user(db).await?;
    let role = factory::create_role(db).await?;

    let service = AssignmentService::new(db);
    service.assign_role(user.id, role.id).await?;
    let result = service.assign_role(user.id, role.id).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests assigning a role that does not exist.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn assign_role_requires_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = db(&test);

    let user = factory::create_user(db).await?;

    let result = AssignmentService::new(db).assign_role(user.id, 404).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests removing an assignment that does not exist.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn remove_permission_requires_assignment() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = db(&test);

    let role = factory::create_role(db).await?;
    let permission = factory::create_permission(db).await?;

    let result = AssignmentService::new(db)
        .remove_permission(role.id, permission.id)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests collecting a user's permissions across roles.
///
/// Verifies that a permission granted by two roles is listed once and the list is
/// sorted by name.
///
/// Expected: ["drone:read", "drone:write"]
#[tokio::test]
async fn user_permissions_are_distinct_and_sorted() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = db(&test);

    let (user, first_role, read) = helpers::create_user_with_permission(db, "drone:read").await?;
    let second_role = RoleFactory::new(db).name("operator").build().await?;
    let write = PermissionFactory::new(db).name("drone:write").build().await?;

    let service = AssignmentService::new(db);
    service.assign_role(user.id, second_role.id).await?;
    service.assign_permission(second_role.id, read.id).await?;
    service.assign_permission(second_role.id, write.id).await?;

    let names: Vec<String> = service
        .get_user_permissions(user.id)
        .await?
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["drone:read", "drone:write"]);

    let roles = service.get_user_roles(user.id).await?;
    assert_eq!(roles.len(), 2);
    assert!(roles.iter().any(|r| r.id == first_role.id));

    Ok(())
}

/// Tests permission checks for active and inactive users.
///
/// Expected: granted for the active holder, denied once deactivated
#[tokio::test]
async fn check_permission_ignores_inactive_users() -> Result<(), AppError> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = db(&test);

    let (user, _, _) = helpers::create_user_with_permission(db, "drone:read").await?;

    let service = AssignmentService::new(db);
    assert!(service.check_user_permission(user.id, "drone:read").await?);
    assert!(!service.check_user_permission(user.id, "drone:write").await?);

    UserService::new(db)
        .update(
            user.id,
            crate::server::model::rbac::UpdateUserParams {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await?;
    assert!(!service.check_user_permission(user.id, "drone:read").await?);

    Ok(())
}
