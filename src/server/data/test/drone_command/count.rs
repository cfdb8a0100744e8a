use super::*;

/// Tests grouping commands by status and by type.
///
/// Expected: Ok with counts matching the inserted commands
#[tokio::test]
async fn counts_by_status_and_type() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    factory::drone_command::DroneCommandFactory::new(db, drone.id)
        .command_type("hover")
        .build()
        .await?;
    factory::drone_command::DroneCommandFactory::new(db, drone.id)
        .command_type("hover")
        .status("completed")
        .build()
        .await?;
    factory::drone_command::DroneCommandFactory::new(db, drone.id)
        .command_type("land")
        .status("completed")
        .build()
        .await?;

    let repo = DroneCommandRepository::new(db);

    let mut by_status = repo.count_by_status().await?;
    by_status.sort_by_key(|(status, _)| status.as_str());
    assert_eq!(
        by_status,
        vec![(CommandStatus::Completed, 2), (CommandStatus::Pending, 1)]
    );

    let mut by_type = repo.count_by_type().await?;
    by_type.sort_by_key(|(command_type, _)| command_type.as_str());
    assert_eq!(
        by_type,
        vec![(CommandType::Hover, 2), (CommandType::Land, 1)]
    );

    Ok(())
}
