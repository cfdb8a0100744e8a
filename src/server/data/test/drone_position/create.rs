use super::*;

/// Tests storing a position report.
///
/// Expected: Ok with coordinates and telemetry preserved
#[tokio::test]
async fn creates_position() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    let recorded_at = Utc::now() - Duration::minutes(2);

    let repo = DronePositionRepository::new(db);
    let position = repo
        .create(CreateDronePositionParams {
            drone_id: drone.id,
            latitude: 25.033,
            longitude: 121.5654,
            altitude: 150.0,
            speed: Some(12.0),
            heading: Some(270.0),
            battery_level: Some(64.0),
            signal_strength: None,
            recorded_at,
        })
        .await?;

    let fetched = repo.get_by_id(position.id).await?.unwrap();
    assert_eq!(fetched.latitude, 25.033);
    assert_eq!(fetched.heading, Some(270.0));
    assert_eq!(fetched.recorded_at, recorded_at);

    Ok(())
}

/// Tests fetching the latest position of a drone.
///
/// Expected: Ok(Some) with the most recently recorded position
#[tokio::test]
async fn gets_latest_position() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    let now = Utc::now();
    let latest = factory::drone_position::DronePositionFactory::new(db, drone.id)
        .recorded_at(now)
        .build()
        .await?;
    factory::drone_position::DronePositionFactory::new(db, drone.id)
        .recorded_at(now - Duration::hours(1))
        .build()
        .await?;

    let repo = DronePositionRepository::new(db);
    let found = repo.get_latest_by_drone(drone.id).await?.unwrap();

    assert_eq!(found.id, latest.id);

    Ok(())
}
