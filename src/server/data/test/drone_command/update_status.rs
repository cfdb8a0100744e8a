use super::*;

/// Tests stamping a command through executing then completed.
///
/// Verifies `executed_at` survives the later completion stamp.
///
/// Expected: Ok with both timestamps set
#[tokio::test]
async fn keeps_earlier_stamps() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    let command = factory::create_command(db, drone.id).await?;

    let repo = DroneCommandRepository::new(db);
    let started = Utc::now();
    repo.update_status(
        command.id,
        StatusStamp::new(CommandStatus::Executing, None, started),
    )
    .await?;
    let done = repo
        .update_status(
            command.id,
            StatusStamp::new(CommandStatus::Completed, None, Utc::now()),
        )
        .await?;

    assert_eq!(done.status, CommandStatus::Completed);
    assert_eq!(done.executed_at, Some(started));
    assert!(done.completed_at.is_some());

    Ok(())
}

/// Tests that a failure keeps its error message.
///
/// Expected: Ok with status failed and the message stored
#[tokio::test]
async fn stores_failure_message() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    let command = factory::create_command(db, drone.id).await?;

    let repo = DroneCommandRepository::new(db);
    let failed = repo
        .update_status(
            command.id,
            StatusStamp::new(
                CommandStatus::Failed,
                Some("gps lost".to_string()),
                Utc::now(),
            ),
        )
        .await?;

    assert_eq!(failed.error_message.as_deref(), Some("gps lost"));

    Ok(())
}
