use super::*;

/// Tests enqueueing a command.
///
/// Expected: Ok with a pending entry carrying the requested priority
#[tokio::test]
async fn enqueues_pending_entry() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;

    let repo = CommandQueueRepository::new(db);
    let entry = repo
        .enqueue(
            EnqueueParams {
                drone_id: drone.id,
                command_type: CommandType::ReturnHome,
                command_data: None,
                priority: 8,
                created_by: None,
            },
            Utc::now(),
        )
        .await?;

    assert_eq!(entry.status, CommandStatus::Pending);
    assert_eq!(entry.priority, 8);
    assert_eq!(entry.started_at, None);

    Ok(())
}

/// Tests listing a drone's queue in dequeue order.
///
/// Expected: Ok with higher priority first, then oldest first
#[tokio::test]
async fn lists_drone_queue_in_dequeue_order() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    let now = Utc::now();
    let low = factory::drone_command_queue::QueueEntryFactory::new(db, drone.id)
        .priority(2)
        .created_at(now - Duration::minutes(10))
        .build()
        .await?;
    let high_new = factory::drone_command_queue::QueueEntryFactory::new(db, drone.id)
        .priority(9)
        .created_at(now)
        .build()
        .await?;
    let high_old = factory::drone_command_queue::QueueEntryFactory::new(db, drone.id)
        .priority(9)
        .created_at(now - Duration::minutes(5))
        .build()
        .await?;

    let repo = CommandQueueRepository::new(db);
    let ids = repo
        .get_by_drone(drone.id)
        .await?
        .into_iter()
        .map(|e| e.id)
        .collect::<Vec<_>>();

    assert_eq!(ids, vec![high_old.id, high_new.id, low.id]);

    Ok(())
}

/// Tests selecting pending entries of one priority.
///
/// Expected: Ok with only pending entries at that priority
#[tokio::test]
async fn finds_pending_by_priority() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    let wanted = factory::create_queue_entry(db, drone.id, 7).await?;
    factory::create_queue_entry(db, drone.id, 3).await?;
    factory::drone_command_queue::QueueEntryFactory::new(db, drone.id)
        .priority(7)
        .status("completed")
        .build()
        .await?;

    let repo = CommandQueueRepository::new(db);
    let entries = repo.get_pending_by_priority(7).await?;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, wanted.id);

    Ok(())
}
