use super::*;

/// Tests creating a preference row with defaults.
///
/// Expected: Ok with default theme, language and timezone
#[tokio::test]
async fn creates_default_preferences() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_preference_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = UserPreferenceRepository::new(db);
    repo.create(CreateUserPreferenceParams::defaults(user.id))
        .await?;

    let stored = repo.get_by_user(user.id).await?.unwrap();
    assert_eq!(stored.theme, Theme::Auto);
    assert_eq!(stored.language, "zh-TW");
    assert_eq!(stored.timezone, "Asia/Taipei");
    assert!(!stored.email_notifications);

    Ok(())
}

/// Tests the one-row-per-user constraint.
///
/// Expected: Err on the second insert for the same user
#[tokio::test]
async fn rejects_second_row_for_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_preference_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::create_preference(db, user.id).await?;

    let repo = UserPreferenceRepository::new(db);
    let result = repo
        .create(CreateUserPreferenceParams::defaults(user.id))
        .await;

    assert!(result.is_err());

    Ok(())
}

/// Tests a partial update.
///
/// Expected: Ok with only the theme changed
#[tokio::test]
async fn updates_theme_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_preference_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let preference = factory::create_preference(db, user.id).await?;

    let repo = UserPreferenceRepository::new(db);
    let updated = repo
        .update(
            preference.id,
            UpdateUserPreferenceParams {
                theme: Some(Theme::Dark),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.theme, Theme::Dark);
    assert_eq!(updated.language, preference.language);

    Ok(())
}

/// Tests filtering preferences by theme.
///
/// Expected: Ok with only dark-theme rows
#[tokio::test]
async fn filters_by_theme() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_preference_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;
    factory::user_preference::UserPreferenceFactory::new(db, first.id)
        .theme("dark")
        .build()
        .await?;
    factory::user_preference::UserPreferenceFactory::new(db, second.id)
        .theme("light")
        .build()
        .await?;

    let repo = UserPreferenceRepository::new(db);
    let filter = UserPreferenceFilter {
        theme: Some(Theme::Dark),
        language: None,
    };
    let (rows, total) = repo
        .get_paginated(&filter, &first_page(SORTABLE_COLUMNS))
        .await?;

    assert_eq!(total, 1);
    assert_eq!(rows[0].user_id, first.id);

    Ok(())
}

/// Tests the conflict-tolerant upsert.
///
/// Verifies the first call inserts defaults overlaid with the present fields, and the
/// second call only overwrites the fields it carries.
///
/// Expected: Ok with one row holding the merged values
#[tokio::test]
async fn upsert_merges_present_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_preference_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = UserPreferenceRepository::new(db);
    let inserted = repo
        .upsert_by_user(
            user.id,
            UpdateUserPreferenceParams {
                theme: Some(Theme::Dark),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(inserted.theme, Theme::Dark);
    assert_eq!(inserted.language, "zh-TW");

    let updated = repo
        .upsert_by_user(
            user.id,
            UpdateUserPreferenceParams {
                language: Some("en-US".to_string()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.id, inserted.id);
    assert_eq!(updated.theme, Theme::Dark);
    assert_eq!(updated.language, "en-US");
    assert_eq!(updated.timezone, "Asia/Taipei");

    Ok(())
}
