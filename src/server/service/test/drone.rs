use super::{db, drone_context};
use crate::{
    model::drone::DroneStatus,
    server::{
        data::drone_status_archive::DroneStatusArchiveRepository,
        error::AppError,
        model::drone::{CreateDroneParams, DroneStatusChange, UpdateDroneParams},
        service::drone::DroneService,
    },
};
use test_utils::factory::{self, drone::DroneFactory};

fn change(drone_id: i32, status: DroneStatus) -> DroneStatusChange {
    DroneStatusChange {
        drone_id,
        status,
        reason: Some("pre-flight check".to_string()),
        changed_by: Some(7),
    }
}

/// Tests registering a drone with a serial already in use.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn create_rejects_duplicate_serial() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    DroneFactory::new(db).serial("SN-DUP").build().await?;

    let result = DroneService::new(db)
        .create(CreateDroneParams {
            serial: " SN-DUP ".to_string(),
            name: "Scout".to_string(),
            model: "Mavic 3".to_string(),
            manufacturer: "DJI".to_string(),
            status: DroneStatus::Inactive,
            owner_user_id: None,
            manufacture_year: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests an allowed status change.
///
/// Verifies that the drone row and the status archive are written together.
///
/// Expected: Ok with the new status and one archive row naming the previous status
#[tokio::test]
async fn update_status_archives_change() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let drone = factory::create_drone(db).await?;

    let updated = DroneService::new(db)
        .update_status(change(drone.id, DroneStatus::Flying))
        .await?;
    assert_eq!(updated.status, DroneStatus::Flying);

    let history = DroneStatusArchiveRepository::new(db)
        .get_by_drone(drone.id)
        .await?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, DroneStatus::Flying);
    assert_eq!(history[0].previous_status, Some(DroneStatus::Active));
    assert_eq!(history[0].reason.as_deref(), Some("pre-flight check"));

    Ok(())
}

/// Tests requesting the status a drone already has.
///
/// Expected: Ok and no archive row
#[tokio::test]
async fn update_status_same_status_is_noop() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let drone = factory::create_drone(db).await?;

    let updated = DroneService::new(db)
        .update_status(change(drone.id, DroneStatus::Active))
        .await?;
    assert_eq!(updated.status, DroneStatus::Active);

    let history = DroneStatusArchiveRepository::new(db)
        .get_by_drone(drone.id)
        .await?;
    assert!(history.is_empty());

    Ok(())
}

/// Tests a transition outside the whitelist.
///
/// Verifies that flying drones cannot be switched off directly and nothing is written.
///
/// Expected: Err(AppError::Transition)
#[tokio::test]
async fn update_status_rejects_disallowed_transition() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let drone = DroneFactory::new(db).status("flying").build().await?;

    let service = DroneService::new(db);
    let result = service
        .update_status(change(drone.id, DroneStatus::Inactive))
        .await;
    assert!(matches!(result, Err(AppError::Transition(_))));

    assert_eq!(service.get_by_id(drone.id).await?.status, DroneStatus::Flying);
    let history = DroneStatusArchiveRepository::new(db)
        .get_by_drone(drone.id)
        .await?;
    assert!(history.is_empty());

    Ok(())
}

/// Tests that the generic update applies the same transition check.
///
/// Expected: Err(AppError::Transition) and the name left unchanged
#[tokio::test]
async fn update_checks_status_transition() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let drone = DroneFactory::new(db).status("inactive").build().await?;

    let service = DroneService::new(db);
    let result = service
        .update(
            drone.id,
            UpdateDroneParams {
                name: Some("Renamed".to_string()),
                ..Default::default()
            },
            Some(DroneStatus::Flying),
        )
        .await;
    assert!(matches!(result, Err(AppError::Transition(_))));

    assert_eq!(service.get_by_id(drone.id).await?.name, drone.name);

    Ok(())
}

/// Tests the generic update with an allowed status.
///
/// Expected: Ok with both the field and the status changed, plus an archive row
#[tokio::test]
async fn update_applies_fields_and_status() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let drone = factory::create_drone(db).await?;

    let updated = DroneService::new(db)
        .update(
            drone.id,
            UpdateDroneParams {
                name: Some("Renamed".to_string()),
                ..Default::default()
            },
            Some(DroneStatus::Maintenance),
        )
        .await?;

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.status, DroneStatus::Maintenance);
    assert_eq!(
        DroneStatusArchiveRepository::new(db)
            .get_by_drone(drone.id)
            .await?
            .len(),
        1
    );

    Ok(())
}

/// Tests deleting a drone that does not exist.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn delete_missing_drone() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let result = DroneService::new(db).delete(404).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests drone statistics.
///
/// Expected: every status listed, zero included
#[tokio::test]
async fn statistics_count_every_status() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    factory::create_drone(db).await?;
    factory::create_drone(db).await?;
    DroneFactory::new(db).status("maintenance").build().await?;

    let statistics = DroneService::new(db).statistics().await?;

    assert_eq!(statistics.total(), 3);
    assert!(statistics
        .by_status
        .contains(&(DroneStatus::Active, 2)));
    assert!(statistics
        .by_status
        .contains(&(DroneStatus::Flying, 0)));

    Ok(())
}
