use super::*;

/// Tests assigning and removing a role.
///
/// Expected: Ok with the assignment visible, then Ok(1) on removal and Ok(0) after
#[tokio::test]
async fn assigns_and_removes_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let role = factory::create_role(db).await?;

    let repo = UserRoleRepository::new(db);
    repo.assign(user.id, role.id).await?;
    assert!(repo.exists(user.id, role.id).await?);

    let roles = RoleRepository::new(db).get_by_user(user.id).await?;
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].id, role.id);

    assert_eq!(repo.remove(user.id, role.id).await?, 1);
    assert_eq!(repo.remove(user.id, role.id).await?, 0);

    Ok(())
}

/// Tests granting a permission to a role.
///
/// Expected: Ok with the permission listed for the role, sorted by name
#[tokio::test]
async fn grants_permissions_to_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let role = factory::create_role(db).await?;
    let write = factory::permission::PermissionFactory::new(db)
        .name("drone:write")
        .build()
        .await?;
    let read = factory::permission::PermissionFactory::new(db)
        .name("drone:read")
        .build()
        .await?;

    let repo = RolePermissionRepository::new(db);
    repo.assign(role.id, write.id).await?;
    repo.assign(role.id, read.id).await?;

    let names = PermissionRepository::new(db)
        .get_by_role(role.id)
        .await?
        .into_iter()
        .map(|p| p.name)
        .collect::<Vec<_>>();

    assert_eq!(names, vec!["drone:read", "drone:write"]);

    Ok(())
}

/// Tests deleting a role removes its assignments.
///
/// Expected: Ok with no roles left for the user
#[tokio::test]
async fn deleting_role_drops_assignments() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let role = factory::create_role(db).await?;
    factory::helpers::assign_role(db, user.id, role.id).await?;

    let roles = RoleRepository::new(db);
    assert_eq!(roles.delete(role.id).await?, 1);
    assert!(roles.get_by_user(user.id).await?.is_empty());

    let (remaining, _) = roles.get_paginated(&first_page(role::SORTABLE_COLUMNS)).await?;
    assert!(remaining.is_empty());

    Ok(())
}
