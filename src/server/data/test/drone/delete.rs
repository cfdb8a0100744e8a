use super::*;

/// Tests deleting a drone cascades to its positions and commands.
///
/// Expected: Ok(1) and no dependent rows left
#[tokio::test]
async fn deletes_drone_and_dependents() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    factory::create_position(db, drone.id).await?;
    factory::create_command(db, drone.id).await?;

    let repo = DroneRepository::new(db);
    let deleted = repo.delete(drone.id).await?;

    assert_eq!(deleted, 1);
    assert!(entity::prelude::DronePosition::find()
        .all(db)
        .await?
        .is_empty());
    assert!(entity::prelude::DroneCommand::find()
        .all(db)
        .await?
        .is_empty());

    Ok(())
}

/// Tests deleting a missing drone.
///
/// Expected: Ok(0)
#[tokio::test]
async fn reports_zero_for_missing_drone() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = DroneRepository::new(db);
    assert_eq!(repo.delete(999).await?, 0);

    Ok(())
}
