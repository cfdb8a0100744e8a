use super::*;

/// Tests picking the next entry across drones.
///
/// Verifies priority wins over age, and age breaks priority ties.
///
/// Expected: Ok(Some) with the oldest highest-priority entry
#[tokio::test]
async fn picks_highest_priority_then_oldest() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    let now = Utc::now();
    factory::drone_command_queue::QueueEntryFactory::new(db, drone.id)
        .priority(3)
        .created_at(now - Duration::hours(1))
        .build()
        .await?;
    factory::drone_command_queue::QueueEntryFactory::new(db, drone.id)
        .priority(6)
        .created_at(now)
        .build()
        .await?;
    let expected = factory::drone_command_queue::QueueEntryFactory::new(db, drone.id)
        .priority(6)
        .created_at(now - Duration::minutes(1))
        .build()
        .await?;

    let repo = CommandQueueRepository::new(db);
    let next = repo.next_pending(None).await?.unwrap();

    assert_eq!(next.id, expected.id);

    Ok(())
}

/// Tests restricting the pick to one drone.
///
/// Expected: Ok(Some) from the requested drone even when another holds a higher priority
#[tokio::test]
async fn restricts_to_drone() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    let other = factory::create_drone(db).await?;
    factory::create_queue_entry(db, other.id, 10).await?;
    let mine = factory::create_queue_entry(db, drone.id, 1).await?;

    let repo = CommandQueueRepository::new(db);
    let next = repo.next_pending(Some(drone.id)).await?.unwrap();

    assert_eq!(next.id, mine.id);

    Ok(())
}

/// Tests an empty queue.
///
/// Expected: Ok(None) when nothing is pending
#[tokio::test]
async fn returns_none_when_nothing_pending() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    factory::drone_command_queue::QueueEntryFactory::new(db, drone.id)
        .status("executing")
        .build()
        .await?;

    let repo = CommandQueueRepository::new(db);
    assert!(repo.next_pending(None).await?.is_none());

    Ok(())
}
