use super::*;

/// Tests a partial update.
///
/// Verifies that only the supplied fields change.
///
/// Expected: Ok with new name and untouched model
#[tokio::test]
async fn updates_supplied_fields_only() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;

    let repo = DroneRepository::new(db);
    let updated = repo
        .update(
            drone.id,
            UpdateDroneParams {
                name: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.model, drone.model);

    Ok(())
}

/// Tests updating a missing drone.
///
/// Expected: Err(DbErr::RecordNotFound)
#[tokio::test]
async fn fails_for_missing_drone() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DroneRepository::new(db);
    let result = repo.update(404, UpdateDroneParams::default()).await;

    assert!(matches!(result, Err(DbErr::RecordNotFound(_))));

    Ok(())
}

/// Tests writing a status directly.
///
/// Expected: Ok with the stored status replaced
#[tokio::test]
async fn sets_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;

    let repo = DroneRepository::new(db);
    let updated = repo.set_status(drone.id, DroneStatus::Maintenance).await?;

    assert_eq!(updated.status, DroneStatus::Maintenance);

    Ok(())
}
