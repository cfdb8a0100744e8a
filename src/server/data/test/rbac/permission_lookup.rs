use super::*;

/// Tests resolving a user's permissions through several roles.
///
/// Verifies a permission granted by two roles is listed once.
///
/// Expected: Ok with distinct permissions sorted by name
#[tokio::test]
async fn lists_distinct_permissions_for_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let pilot = factory::create_role(db).await?;
    let operator = factory::create_role(db).await?;
    let read = factory::permission::PermissionFactory::new(db)
        .name("drone:read")
        .build()
        .await?;
    let command = factory::permission::PermissionFactory::new(db)
        .name("command:create")
        .build()
        .await?;

    factory::helpers::assign_role(db, user.id, pilot.id).await?;
    factory::helpers::assign_role(db, user.id, operator.id).await?;
    factory::helpers::grant_permission(db, pilot.id, read.id).await?;
    factory::helpers::grant_permission(db, operator.id, read.id).await?;
    factory::helpers::grant_permission(db, operator.id, command.id).await?;

    let names = PermissionRepository::new(db)
        .get_by_user(user.id)
        .await?
        .into_iter()
        .map(|p| p.name)
        .collect::<Vec<_>>();

    assert_eq!(names, vec!["command:create", "drone:read"]);

    Ok(())
}

/// Tests checking a held permission.
///
/// Expected: Ok(true) for the granted name and Ok(false) for another
#[tokio::test]
async fn checks_permission() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _, _) = factory::helpers::create_user_with_permission(db, "drone:read").await?;

    let repo = PermissionRepository::new(db);
    assert!(repo.user_has_permission(user.id, "drone:read").await?);
    assert!(!repo.user_has_permission(user.id, "drone:delete").await?);

    Ok(())
}

/// Tests that inactive users hold no permissions.
///
/// Expected: Ok(false) even though a role grants the permission
#[tokio::test]
async fn inactive_user_has_no_permission() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _, _) = factory::helpers::create_user_with_permission(db, "drone:read").await?;
    UserRepository::new(db)
        .update(
            user.id,
            UpdateUserParams {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await?;

    let repo = PermissionRepository::new(db);
    assert!(!repo.user_has_permission(user.id, "drone:read").await?);

    Ok(())
}
