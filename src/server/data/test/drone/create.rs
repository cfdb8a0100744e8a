use super::*;

/// Tests creating a drone.
///
/// Verifies that every submitted field is stored and read back through `get_by_id`.
///
/// Expected: Ok with matching drone
#[tokio::test]
async fn creates_drone() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DroneRepository::new(db);
    let created = repo.create(params("SN-CREATE-1")).await?;

    let fetched = repo.get_by_id(created.id).await?.unwrap();
    assert_eq!(fetched.serial, "SN-CREATE-1");
    assert_eq!(fetched.status, DroneStatus::Inactive);
    assert_eq!(fetched.manufacture_year, Some(2024));

    Ok(())
}

/// Tests the unique serial constraint.
///
/// Expected: Err with a unique constraint violation on the second insert
#[tokio::test]
async fn rejects_duplicate_serial() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DroneRepository::new(db);
    repo.create(params("SN-DUP")).await?;
    let result = repo.create(params("SN-DUP")).await;

    assert!(result.is_err());

    Ok(())
}

/// Tests looking a drone up by serial.
///
/// Expected: Ok(Some) for a known serial, Ok(None) otherwise
#[tokio::test]
async fn gets_drone_by_serial() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::drone::DroneFactory::new(db)
        .serial("SN-LOOKUP")
        .build()
        .await?;

    let repo = DroneRepository::new(db);
    assert_eq!(repo.get_by_serial("SN-LOOKUP").await?.unwrap().id, drone.id);
    assert!(repo.get_by_serial("SN-MISSING").await?.is_none());

    Ok(())
}
