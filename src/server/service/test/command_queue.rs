use chrono::{Duration, Utc};

use super::{db, drone_context};
use crate::{
    model::drone_command::{CommandStatus, CommandType},
    server::{
        error::AppError, model::command_queue::EnqueueParams,
        service::command_queue::CommandQueueService,
    },
};
use test_utils::factory::{self, drone_command_queue::QueueEntryFactory};

/// Tests enqueueing with a priority outside 1..=10.
///
/// Expected: Err(AppError::Validation)
#[tokio::test]
async fn enqueue_rejects_out_of_range_priority() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let drone = factory::create_drone(db).await?;

    let result = CommandQueueService::new(db)
        .enqueue(EnqueueParams {
            drone_id: drone.id,
            command_type: CommandType::Hover,
            command_data: None,
            priority: 11,
            created_by: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}

/// Tests dequeue ordering.
///
/// Verifies that the highest priority wins and ties go to the oldest entry.
///
/// Expected: the older priority-9 entry, now executing with started_at
#[tokio::test]
async fn dequeue_takes_highest_priority_then_oldest() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let drone = factory::create_drone(db).await?;
    let now = Utc::now();
    factory::create_queue_entry(db, drone.id, 3).await?;
    let oldest_urgent = QueueEntryFactory::new(db, drone.id)
        .priority(9)
        .created_at(now - Duration::minutes(10))
        .build()
        .await?;
    QueueEntryFactory::new(db, drone.id)
        .priority(9)
        .created_at(now - Duration::minutes(1))
        .build()
        .await?;

    let claimed = CommandQueueService::new(db)
        .dequeue_next(Some(drone.id))
        .await?
        .unwrap();

    assert_eq!(claimed.id, oldest_urgent.id);
    assert_eq!(claimed.status, CommandStatus::Executing);
    assert!(claimed.started_at.is_some());

    Ok(())
}

/// Tests that a claimed entry is never handed out twice.
///
/// Expected: two different entries, then nothing
#[tokio::test]
async fn dequeue_never_repeats_an_entry() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let drone = factory::create_drone(db).await?;
    factory::create_queue_entry(db, drone.id, 5).await?;
    factory::create_queue_entry(db, drone.id, 5).await?;

    let service = CommandQueueService::new(db);
    let first = service.dequeue_next(None).await?.unwrap();
    let second = service.dequeue_next(None).await?.unwrap();

    assert_ne!(first.id, second.id);
    assert!(service.dequeue_next(None).await?.is_none());

    Ok(())
}

/// Tests completing an entry that never started.
///
/// Expected: Err(AppError::Transition)
#[tokio::test]
async fn mark_completed_requires_executing() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let drone = factory::create_drone(db).await?;
    let entry = factory::create_queue_entry(db, drone.id, 5).await?;

    let result = CommandQueueService::new(db).mark_completed(entry.id).await;

    assert!(matches!(result, Err(AppError::Transition(_))));

    Ok(())
}

/// Tests failing an executing entry.
///
/// Expected: status failed with the error message and completed_at
#[tokio::test]
async fn mark_failed_records_error() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let drone = factory::create_drone(db).await?;
    let entry = factory::create_queue_entry(db, drone.id, 5).await?;

    let service = CommandQueueService::new(db);
    service.mark_as_executing(entry.id).await?;
    let failed = service
        .mark_failed(entry.id, "motor fault".to_string())
        .await?;

    assert_eq!(failed.status, CommandStatus::Failed);
    assert_eq!(failed.error_message.as_deref(), Some("motor fault"));
    assert!(failed.completed_at.is_some());

    Ok(())
}

/// Tests cancelling a missing entry.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn cancel_missing_entry() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let result = CommandQueueService::new(db).cancel(404).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests queue cleanup.
///
/// Verifies that only terminal entries finished before the cutoff are removed.
///
/// Expected: Ok(1), pending and recent entries kept
#[tokio::test]
async fn cleanup_removes_old_finished_entries() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let drone = factory::create_drone(db).await?;
    let now = Utc::now();
    QueueEntryFactory::new(db, drone.id)
        .status("completed")
        .completed_at(Some(now - Duration::days(10)))
        .build()
        .await?;
    QueueEntryFactory::new(db, drone.id)
        .status("cancelled")
        .completed_at(Some(now - Duration::hours(1)))
        .build()
        .await?;
    factory::create_queue_entry(db, drone.id, 5).await?;

    let service = CommandQueueService::new(db);
    let deleted = service.cleanup(now - Duration::days(7)).await?;

    assert_eq!(deleted, 1);
    let statistics = service.statistics().await?;
    assert_eq!(statistics.total(), 2);
    assert_eq!(statistics.pending, 1);
    assert_eq!(statistics.cancelled, 1);

    Ok(())
}

/// Tests the priority lookup.
///
/// Expected: only pending entries of that priority; invalid priorities rejected
#[tokio::test]
async fn find_by_priority_filters_pending() -> Result<(), AppError> {
    let test = drone_context().await;
    let db = db(&test);

    let drone = factory::create_drone(db).await?;
    factory::create_queue_entry(db, drone.id, 8).await?;
    QueueEntryFactory::new(db, drone.id)
        .priority(8)
        .status("executing")
        .build()
        .await?;
    factory::create_queue_entry(db, drone.id, 2).await?;

    let service = CommandQueueService::new(db);
    assert_eq!(service.find_by_priority(8).await?.len(), 1);
    assert!(matches!(
        service.find_by_priority(0).await,
        Err(AppError::Validation(_))
    ));

    Ok(())
}
