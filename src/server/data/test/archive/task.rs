use super::*;

/// Tests creating an archive task.
///
/// Expected: Ok with a pending task and zeroed counts
#[tokio::test]
async fn creates_pending_task() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let repo = ArchiveTaskRepository::new(db);
    let task = repo
        .create(
            CreateArchiveTaskParams {
                task_type: ArchiveTaskType::Commands,
                date_range_start: now - Duration::days(60),
                date_range_end: now - Duration::days(30),
                created_by: Some(1),
            },
            "commands_batch_1".to_string(),
            now,
        )
        .await?;

    assert_eq!(task.status, ArchiveTaskStatus::Pending);
    assert_eq!(task.total_records, 0);
    assert_eq!(task.batch_id, "commands_batch_1");

    Ok(())
}

/// Tests the pending guard on `mark_running`.
///
/// Expected: Ok(1) the first time and Ok(0) once the task is running
#[tokio::test]
async fn marks_running_only_from_pending() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let task = factory::create_archive_task(db).await?;

    let repo = ArchiveTaskRepository::new(db);
    assert_eq!(repo.mark_running(task.id, Utc::now()).await?, 1);
    assert_eq!(repo.mark_running(task.id, Utc::now()).await?, 0);

    let running = repo.get_by_id(task.id).await?.unwrap();
    assert_eq!(running.status, ArchiveTaskStatus::Running);
    assert!(running.started_at.is_some());

    Ok(())
}

/// Tests recording a finished run.
///
/// Expected: Ok with completed status and the recorded counts
#[tokio::test]
async fn records_completion_counts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let task = factory::create_archive_task(db).await?;

    let repo = ArchiveTaskRepository::new(db);
    repo.mark_completed(
        task.id,
        ArchiveOutcome {
            total_records: 12,
            archived_records: 12,
        },
        Utc::now(),
    )
    .await?;

    let done = repo.get_by_id(task.id).await?.unwrap();
    assert_eq!(done.status, ArchiveTaskStatus::Completed);
    assert_eq!(done.archived_records, 12);
    assert!(done.completed_at.is_some());

    Ok(())
}

/// Tests filtering tasks by status.
///
/// Expected: Ok with only failed tasks
#[tokio::test]
async fn filters_tasks_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_archive_task(db).await?;
    let failed = factory::archive_task::ArchiveTaskFactory::new(db)
        .status("failed")
        .build()
        .await?;

    let repo = ArchiveTaskRepository::new(db);
    let filter = ArchiveTaskFilter {
        status: Some(ArchiveTaskStatus::Failed),
        task_type: None,
    };
    let (tasks, total) = repo.get_paginated(&filter, &first_page(TASK_COLUMNS)).await?;

    assert_eq!(total, 1);
    assert_eq!(tasks[0].id, failed.id);

    Ok(())
}
