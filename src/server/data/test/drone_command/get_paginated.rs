use super::*;

/// Tests filtering commands by drone, status and type together.
///
/// Expected: Ok with only the matching command
#[tokio::test]
async fn filters_commands() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    let other = factory::create_drone(db).await?;
    let wanted = factory::drone_command::DroneCommandFactory::new(db, drone.id)
        .command_type("land")
        .build()
        .await?;
    factory::drone_command::DroneCommandFactory::new(db, drone.id)
        .command_type("land")
        .status("completed")
        .build()
        .await?;
    factory::drone_command::DroneCommandFactory::new(db, other.id)
        .command_type("land")
        .build()
        .await?;

    let repo = DroneCommandRepository::new(db);
    let filter = DroneCommandFilter {
        drone_id: Some(drone.id),
        status: Some(CommandStatus::Pending),
        command_type: Some(CommandType::Land),
    };
    let (commands, total) = repo
        .get_paginated(&filter, &page_of(SORTABLE_COLUMNS, 1, 20, None))
        .await?;

    assert_eq!(total, 1);
    assert_eq!(commands[0].id, wanted.id);

    Ok(())
}

/// Tests searching error messages.
///
/// Expected: Ok with the failed command whose message matches
#[tokio::test]
async fn searches_error_message() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    factory::drone_command::DroneCommandFactory::new(db, drone.id)
        .status("failed")
        .error_message(Some("motor overheat".to_string()))
        .build()
        .await?;
    factory::create_command(db, drone.id).await?;

    let repo = DroneCommandRepository::new(db);
    let (commands, total) = repo
        .get_paginated(
            &DroneCommandFilter::default(),
            &page_of(SORTABLE_COLUMNS, 1, 20, Some("overheat")),
        )
        .await?;

    assert_eq!(total, 1);
    assert_eq!(commands[0].status, CommandStatus::Failed);

    Ok(())
}
