use super::*;

/// Tests queue cleanup.
///
/// Verifies only terminal entries completed before the cutoff are removed.
///
/// Expected: Ok(1) with pending and recent entries kept
#[tokio::test]
async fn deletes_old_terminal_entries_only() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    let now = Utc::now();
    factory::drone_command_queue::QueueEntryFactory::new(db, drone.id)
        .status("completed")
        .completed_at(Some(now - Duration::days(10)))
        .build()
        .await?;
    let recent = factory::drone_command_queue::QueueEntryFactory::new(db, drone.id)
        .status("failed")
        .completed_at(Some(now - Duration::hours(1)))
        .build()
        .await?;
    let pending = factory::create_queue_entry(db, drone.id, 5).await?;

    let repo = CommandQueueRepository::new(db);
    let deleted = repo
        .delete_finished_before(now - Duration::days(7))
        .await?;

    assert_eq!(deleted, 1);
    assert!(repo.get_by_id(recent.id).await?.is_some());
    assert!(repo.get_by_id(pending.id).await?.is_some());

    Ok(())
}
