use chrono::{Duration, Utc};
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};

use super::{db, drone_context, first_page};
use crate::{
    model::archive::{ArchiveTaskStatus, ArchiveTaskType},
    server::{
        data::archive::{command, position},
        error::AppError,
        model::archive::{ArchiveFilter, CreateArchiveTaskParams},
        service::archive::ArchiveService,
    },
};
use test_utils::factory::{
    self, archive_task::ArchiveTaskFactory, drone_command::DroneCommandFactory,
    drone_position::DronePositionFactory,
};

/// Tests creating a task with an inverted date range.
///
/// Expected: Err(AppError::Validation)
#[tokio::test]
async fn create_task_rejects_inverted_range() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let now = Utc::now();
    let result = ArchiveService::new(db)
        .create_task(CreateArchiveTaskParams {
            task_type: ArchiveTaskType::Positions,
            date_range_start: now,
            date_range_end: now - Duration::days(1),
            created_by: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}

/// Tests running a positions archive task.
///
/// Verifies that positions inside the window move to the archive under the task's batch
/// id while newer positions stay live.
///
/// Expected: completed task with counts 2/2, one live position left
#[tokio::test]
async fn run_task_moves_positions() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let drone = factory::create_drone(db).await?;
    let now = Utc::now();
    for days in [40, 35] {
        DronePositionFactory::new(db, drone.id)
            .recorded_at(now - Duration::days(days))
            .build()
            .await?;
    }
    DronePositionFactory::new(db, drone.id)
        .recorded_at(now - Duration::days(1))
        .build()
        .await?;

    let service = ArchiveService::new(db);
    let task = service
        .archive_window(
            ArchiveTaskType::Positions,
            now - Duration::days(60),
            now - Duration::days(30),
        )
        .await?;

    assert_eq!(task.status, ArchiveTaskStatus::Completed);
    assert_eq!(task.total_records, 2);
    assert_eq!(task.archived_records, 2);
    assert!(task.completed_at.is_some());

    assert_eq!(entity::prelude::DronePosition::find().count(db).await?, 1);
    let archived = service
        .get_position_archives_paginated(
            &ArchiveFilter {
                archive_batch_id: Some(task.batch_id.clone()),
                ..Default::default()
            },
            &first_page(position::SORTABLE_COLUMNS),
        )
        .await?;
    assert_eq!(archived.total, 2);

    Ok(())
}

/// Tests running a commands archive task.
///
/// Expected: only finished commands in the window are archived
#[tokio::test]
async fn run_task_moves_only_finished_commands() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let drone = factory::create_drone(db).await?;
    let issued_at = Utc::now() - Duration::days(45);
    for status in ["completed", "failed", "pending"] {
        DroneCommandFactory::new(db, drone.id)
            .status(status)
            .issued_at(issued_at)
            .build()
            .await?;
    }

    let service = ArchiveService::new(db);
    let task = service
        .archive_window(
            ArchiveTaskType::Commands,
            issued_at - Duration::days(1),
            issued_at + Duration::days(1),
        )
        .await?;

    assert_eq!(task.status, ArchiveTaskStatus::Completed);
    assert_eq!(task.archived_records, 2);
    assert_eq!(entity::prelude::DroneCommand::find().count(db).await?, 1);

    let archived = service
        .get_command_archives_paginated(
            &ArchiveFilter {
                drone_id: Some(drone.id),
                ..Default::default()
            },
            &first_page(command::SORTABLE_COLUMNS),
        )
        .await?;
    assert_eq!(archived.total, 2);

    Ok(())
}

/// Tests a run whose copy step fails.
///
/// Verifies the task is left `failed` with the database error recorded and the live rows
/// untouched, and that the failed task is returned rather than an error.
///
/// Expected: Ok with a failed task carrying an error message, 1 live position
#[tokio::test]
async fn run_task_records_failure() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let drone = factory::create_drone(db).await?;
    let now = Utc::now();
    DronePositionFactory::new(db, drone.id)
        .recorded_at(now - Duration::days(40))
        .build()
        .await?;
    db.execute_unprepared("DROP TABLE drone_positions_archive")
        .await?;

    let task = ArchiveService::new(db)
        .archive_window(
            ArchiveTaskType::Positions,
            now - Duration::days(60),
            now - Duration::days(30),
        )
        .await?;

    assert_eq!(task.status, ArchiveTaskStatus::Failed);
    assert!(task.error_message.is_some_and(|message| !message.is_empty()));
    assert!(task.completed_at.is_some());
    assert_eq!(entity::prelude::DronePosition::find().count(db).await?, 1);

    Ok(())
}

/// Tests running a task that already finished.
///
/// Expected: Err(AppError::BadRequest) and the task left as it was
#[tokio::test]
async fn run_task_requires_pending() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let task = ArchiveTaskFactory::new(db).status("completed").build().await?;

    let service = ArchiveService::new(db);
    let result = service.run_task(task.id).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(
        service.get_task(task.id).await?.status,
        ArchiveTaskStatus::Completed
    );

    Ok(())
}

/// Tests deleting tasks by status.
///
/// Expected: running tasks refused, pending ones removed
#[tokio::test]
async fn delete_task_refuses_running() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let running = ArchiveTaskFactory::new(db).status("running").build().await?;
    let pending = factory::create_archive_task(db).await?;

    let service = ArchiveService::new(db);
    assert!(matches!(
        service.delete_task(running.id).await,
        Err(AppError::BadRequest(_))
    ));
    service.delete_task(pending.id).await?;
    assert!(matches!(
        service.get_task(pending.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}
