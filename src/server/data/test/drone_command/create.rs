use super::*;

/// Tests creating a command.
///
/// Verifies the command starts pending with `issued_at` set and no execution stamps.
///
/// Expected: Ok with a pending command
#[tokio::test]
async fn creates_pending_command() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    let now = Utc::now();

    let repo = DroneCommandRepository::new(db);
    let command = repo
        .create(
            CreateDroneCommandParams {
                drone_id: drone.id,
                command_type: CommandType::Takeoff,
                command_data: Some(json!({ "altitude": 30 })),
                issued_by: Some(7),
            },
            now,
        )
        .await?;

    assert_eq!(command.status, CommandStatus::Pending);
    assert_eq!(command.issued_at, now);
    assert_eq!(command.executed_at, None);
    assert_eq!(command.command_data, Some(json!({ "altitude": 30 })));

    Ok(())
}

/// Tests the drone foreign key.
///
/// Expected: Err for a command referencing a missing drone
#[tokio::test]
async fn rejects_unknown_drone() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DroneCommandRepository::new(db);
    let result = repo
        .create(
            CreateDroneCommandParams {
                drone_id: 4242,
                command_type: CommandType::Land,
                command_data: None,
                issued_by: None,
            },
            Utc::now(),
        )
        .await;

    assert!(result.is_err());

    Ok(())
}
