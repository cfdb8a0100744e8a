use super::*;

/// Tests that upserting twice keeps one row per drone.
///
/// Expected: Ok with the second snapshot replacing the first
#[tokio::test]
async fn replaces_existing_snapshot() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;

    let repo = RealTimeStatusRepository::new(db);
    let first = repo
        .upsert(snapshot(drone.id, RealTimeStatus::Idle, 95.0), Utc::now())
        .await?;
    let second = repo
        .upsert(snapshot(drone.id, RealTimeStatus::Flying, 70.0), Utc::now())
        .await?;

    assert_eq!(first.id, second.id);
    let current = repo.get_by_drone(drone.id).await?.unwrap();
    assert_eq!(current.current_status, RealTimeStatus::Flying);
    assert_eq!(current.battery_level, 70.0);

    Ok(())
}

/// Tests deleting a drone's snapshot.
///
/// Expected: Ok(1) then no snapshot
#[tokio::test]
async fn deletes_snapshot() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;

    let repo = RealTimeStatusRepository::new(db);
    repo.upsert(snapshot(drone.id, RealTimeStatus::Charging, 20.0), Utc::now())
        .await?;

    assert_eq!(repo.delete_by_drone(drone.id).await?, 1);
    assert!(repo.get_by_drone(drone.id).await?.is_none());

    Ok(())
}

/// Tests that repeated reports overwrite every telemetry field in place.
///
/// Verifies the conflict path clears an optional field the new report omits and
/// leaves a single snapshot row.
///
/// Expected: Ok with one row holding the latest values
#[tokio::test]
async fn overwrites_fields_on_conflict() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;

    let repo = RealTimeStatusRepository::new(db);
    let mut faulted = snapshot(drone.id, RealTimeStatus::Error, 40.0);
    faulted.error_message = Some("gps lost".to_string());
    repo.upsert(faulted, Utc::now()).await?;

    let mut recovered = snapshot(drone.id, RealTimeStatus::Charging, 39.0);
    recovered.altitude = None;
    let stored = repo.upsert(recovered, Utc::now()).await?;

    assert_eq!(stored.current_status, RealTimeStatus::Charging);
    assert_eq!(stored.error_message, None);
    assert_eq!(stored.altitude, None);
    assert_eq!(
        entity::prelude::DroneRealTimeStatus::find().count(db).await?,
        1
    );

    Ok(())
}

/// Tests reporting telemetry for a drone that does not exist.
///
/// Expected: Err from the foreign key
#[tokio::test]
async fn rejects_unknown_drone() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = RealTimeStatusRepository::new(db)
        .upsert(snapshot(9999, RealTimeStatus::Idle, 100.0), Utc::now())
        .await;

    assert!(result.is_err());

    Ok(())
}
