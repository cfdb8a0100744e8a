use chrono::Duration;

use super::{db, drone_context};
use crate::{
    model::real_time_status::RealTimeStatus,
    server::{
        error::AppError, model::real_time_status::UpsertRealTimeStatusParams,
        service::real_time_status::RealTimeStatusService,
    },
};
use test_utils::factory;

fn snapshot(drone_id: i32, battery_level: f64) -> UpsertRealTimeStatusParams {
    UpsertRealTimeStatusParams {
        drone_id,
        current_status: RealTimeStatus::Flying,
        battery_level,
        signal_strength: Some(80.0),
        altitude: Some(120.0),
        speed: Some(8.5),
        heading: Some(270.0),
        is_connected: true,
        error_message: None,
    }
}

/// Tests pushing a snapshot for a drone that does not exist.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn upsert_requires_drone() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let result = RealTimeStatusService::new(db)
        .upsert(snapshot(404, 90.0))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests a snapshot with an out-of-range battery level.
///
/// Expected: Err(AppError::Validation)
#[tokio::test]
async fn upsert_validates_ranges() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let drone = factory::create_drone(db).await?;

    let result = RealTimeStatusService::new(db)
        .upsert(snapshot(drone.id, 120.0))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}

/// Tests that a second snapshot replaces the first.
///
/// Expected: one row per drone holding the latest values
#[tokio::test]
async fn upsert_replaces_snapshot() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let drone = factory::create_drone(db).await?;

    let service = RealTimeStatusService::new(db);
    let first = service.upsert(snapshot(drone.id, 90.0)).await?;
    let second = service.upsert(snapshot(drone.id, 60.0)).await?;

    assert_eq!(first.id, second.id);
    assert_eq!(service.get_by_drone(drone.id).await?.battery_level, 60.0);

    Ok(())
}

/// Tests marking stale drones offline.
///
/// Expected: a fresh snapshot is untouched by a one-minute threshold
#[tokio::test]
async fn mark_offline_stale_skips_fresh_rows() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let drone = factory::create_drone(db).await?;

    let service = RealTimeStatusService::new(db);
    service.upsert(snapshot(drone.id, 90.0)).await?;

    assert_eq!(service.mark_offline_stale(Duration::minutes(1)).await?, 0);
    let status = service.get_by_drone(drone.id).await?;
    assert!(status.is_connected);

    assert_eq!(service.mark_offline_stale(Duration::seconds(-1)).await?, 1);
    let status = service.get_by_drone(drone.id).await?;
    assert!(!status.is_connected);
    assert_eq!(status.current_status, RealTimeStatus::Offline);

    Ok(())
}
