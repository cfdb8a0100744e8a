use super::*;

/// Tests claiming a pending entry.
///
/// Expected: Ok(1) and the entry executing with `started_at` set
#[tokio::test]
async fn claims_pending_entry() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    let entry = factory::create_queue_entry(db, drone.id, 5).await?;

    let repo = CommandQueueRepository::new(db);
    let changed = repo
        .transition(
            entry.id,
            CommandStatus::Pending,
            StatusStamp::new(CommandStatus::Executing, None, Utc::now()),
        )
        .await?;

    assert_eq!(changed, 1);
    let claimed = repo.get_by_id(entry.id).await?.unwrap();
    assert_eq!(claimed.status, CommandStatus::Executing);
    assert!(claimed.started_at.is_some());

    Ok(())
}

/// Tests that a second claim of the same entry loses.
///
/// Expected: Ok(0) on the second attempt
#[tokio::test]
async fn second_claim_changes_nothing() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    let entry = factory::create_queue_entry(db, drone.id, 5).await?;

    let repo = CommandQueueRepository::new(db);
    let stamp = StatusStamp::new(CommandStatus::Executing, None, Utc::now());
    repo.transition(entry.id, CommandStatus::Pending, stamp.clone())
        .await?;
    let second = repo
        .transition(entry.id, CommandStatus::Pending, stamp)
        .await?;

    assert_eq!(second, 0);

    Ok(())
}

/// Tests failing an executing entry.
///
/// Expected: Ok(1) with the error message and completion time stored
#[tokio::test]
async fn fails_executing_entry() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    let entry = factory::drone_command_queue::QueueEntryFactory::new(db, drone.id)
        .status("executing")
        .build()
        .await?;

    let repo = CommandQueueRepository::new(db);
    let changed = repo
        .transition(
            entry.id,
            CommandStatus::Executing,
            StatusStamp::new(
                CommandStatus::Failed,
                Some("link lost".to_string()),
                Utc::now(),
            ),
        )
        .await?;

    assert_eq!(changed, 1);
    let failed = repo.get_by_id(entry.id).await?.unwrap();
    assert_eq!(failed.status, CommandStatus::Failed);
    assert_eq!(failed.error_message.as_deref(), Some("link lost"));
    assert!(failed.completed_at.is_some());

    Ok(())
}
