use test_utils::{builder::TestBuilder, factory};

use super::db;
use crate::{
    model::user_preference::{CreateUserPreferenceDto, Theme},
    server::{
        error::AppError,
        model::user_preference::{CreateUserPreferenceParams, UpdateUserPreferenceParams},
        service::user_preference::UserPreferenceService,
    },
};

fn create_dto(user_id: i32, theme: Option<&str>) -> CreateUserPreferenceDto {
    CreateUserPreferenceDto {
        user_id,
        theme: theme.map(str::to_string),
        language: None,
        timezone: None,
        auto_save: None,
        notifications: None,
        email_notifications: None,
    }
}

/// Tests creating a second preference row for the same user.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn create_rejects_second_row() -> Result<(), AppError> {
    let test = TestBuilder::new().with_preference_tables().build().await.unwrap();
    let db = db(&test);

    let user = factory::create_user(db).await?;
    factory::create_preference(db, user.id).await?;

    let result = UserPreferenceService::new(db)
        .create(CreateUserPreferenceParams::defaults(user.id))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests creating preferences for a missing user.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn create_requires_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_preference_tables().build().await.unwrap();
    let db = db(&test);

    let result = UserPreferenceService::new(db)
        .create(CreateUserPreferenceParams::defaults(404))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests the per-user upsert.
///
/// Verifies that the first call creates from defaults and the second updates in place.
///
/// Expected: created then updated, same row id
#[tokio::test]
async fn upsert_creates_then_updates() -> Result<(), AppError> {
    let test = TestBuilder::new().with_preference_tables().build().await.unwrap();
    let db = db(&test);

    let user = factory::create_user(db).await?;
    let service = UserPreferenceService::new(db);

    let (created, was_created) = service
        .upsert_by_user(
            user.id,
            UpdateUserPreferenceParams {
                theme: Some(Theme::Dark),
                ..Default::default()
            },
        )
        .await?;
    assert!(was_created);
    assert_eq!(created.theme, Theme::Dark);
    assert_eq!(created.language, "zh-TW");
    assert_eq!(created.timezone, "Asia/Taipei");

    let (updated, was_created) = service
        .upsert_by_user(
            user.id,
            UpdateUserPreferenceParams {
                language: Some("en-US".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert!(!was_created);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.theme, Theme::Dark);
    assert_eq!(updated.language, "en-US");

    Ok(())
}

/// Tests batch creation with an invalid theme and a duplicate user.
///
/// Expected: one success, failures at indexes 1 and 2
#[tokio::test]
async fn create_batch_reports_each_failure() -> Result<(), AppError> {
    let test = TestBuilder::new().with_preference_tables().build().await.unwrap();
    let db = db(&test);

    let first = factory::create_user(db).await?;
    let second = factory::create_user(db).await?;

    let outcome = UserPreferenceService::new(db)
        .create_batch(vec![
            create_dto(first.id, Some("light")),
            create_dto(second.id, Some("neon")),
            create_dto(first.id, None),
        ])
        .await?;

    assert_eq!(outcome.successful.len(), 1);
    let failed: Vec<usize> = outcome.failed.iter().map(|f| f.index).collect();
    assert_eq!(failed, vec![1, 2]);

    Ok(())
}
