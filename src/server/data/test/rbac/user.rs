use super::*;

/// Tests creating and updating a user.
///
/// Expected: Ok with the update applied on top of the stored fields
#[tokio::test]
async fn creates_and_updates_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(CreateUserParams {
            username: "pilot".to_string(),
            email: "pilot@example.com".to_string(),
            display_name: None,
            is_active: true,
        })
        .await?;

    let updated = repo
        .update(
            user.id,
            UpdateUserParams {
                display_name: Some("Chief Pilot".to_string()),
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.username, "pilot");
    assert_eq!(updated.display_name.as_deref(), Some("Chief Pilot"));
    assert!(!updated.is_active);

    Ok(())
}

/// Tests the unique email constraint.
///
/// Expected: Err on the second insert
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let params = |username: &str| CreateUserParams {
        username: username.to_string(),
        email: "shared@example.com".to_string(),
        display_name: None,
        is_active: true,
    };
    repo.create(params("first")).await?;

    assert!(repo.create(params("second")).await.is_err());

    Ok(())
}

/// Tests filtering by active flag and searching by email.
///
/// Expected: Ok with only the matching active user
#[tokio::test]
async fn filters_and_searches_users() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_rbac_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let wanted = factory::user::UserFactory::new(db)
        .email("ops-lead@fleet.test")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .email("ops-night@fleet.test")
        .active(false)
        .build()
        .await?;
    factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    let filter = UserFilter {
        is_active: Some(true),
    };
    let (users, total) = repo
        .get_paginated(&filter, &page_of(USER_COLUMNS, 1, 20, Some("ops-")))
        .await?;

    assert_eq!(total, 1);
    assert_eq!(users[0].id, wanted.id);

    Ok(())
}
