use chrono::{Duration, Utc};

use super::{db, drone_context};
use crate::{
    model::drone_position::CreateDronePositionDto,
    server::{error::AppError, service::drone_position::DronePositionService},
};
use test_utils::factory::{self, drone_position::DronePositionFactory};

fn report(drone_id: i32, latitude: f64) -> CreateDronePositionDto {
    CreateDronePositionDto {
        drone_id,
        latitude,
        longitude: 121.5,
        altitude: 100.0,
        speed: None,
        heading: None,
        battery_level: Some(75.0),
        signal_strength: None,
        recorded_at: None,
    }
}

/// Tests batch position reports.
///
/// Verifies that an out-of-range latitude and an unknown drone fail individually.
///
/// Expected: one success, failures at indexes 1 and 2
#[tokio::test]
async fn create_batch_partitions_reports() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let drone = factory::create_drone(db).await?;

    let outcome = DronePositionService::new(db)
        .create_batch(vec![
            report(drone.id, 25.03),
            report(drone.id, 95.0),
            report(404, 25.03),
        ])
        .await?;

    assert_eq!(outcome.successful.len(), 1);
    assert_eq!(outcome.failed.len(), 2);
    assert!(outcome.failed[0].error.contains("latitude"));
    assert_eq!(outcome.failed[1].index, 2);

    Ok(())
}

/// Tests an empty batch.
///
/// Expected: Err(AppError::Validation)
#[tokio::test]
async fn create_batch_rejects_empty() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let result = DronePositionService::new(db).create_batch(Vec::new()).await;

    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}

/// Tests the latest-position lookup.
///
/// Expected: the most recently recorded position, not the most recently inserted
#[tokio::test]
async fn latest_uses_recorded_at() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let drone = factory::create_drone(db).await?;
    let now = Utc::now();
    let latest = DronePositionFactory::new(db, drone.id)
        .recorded_at(now)
        .build()
        .await?;
    DronePositionFactory::new(db, drone.id)
        .recorded_at(now - Duration::hours(1))
        .build()
        .await?;

    let found = DronePositionService::new(db)
        .get_latest_by_drone(drone.id)
        .await?;

    assert_eq!(found.id, latest.id);

    Ok(())
}
