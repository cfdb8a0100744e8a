use super::*;

/// Tests moving positions into the archive table.
///
/// Verifies rows inside `[start, end)` move with the batch id while rows on the end bound
/// and later stay live.
///
/// Expected: Ok with 2 copied, 2 deleted and 1 live row left
#[tokio::test]
async fn moves_positions_in_range() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    let end = Utc::now() - Duration::days(30);
    let start = end - Duration::days(1);
    for recorded_at in [start, start + Duration::hours(3), end] {
        factory::drone_position::DronePositionFactory::new(db, drone.id)
            .recorded_at(recorded_at)
            .build()
            .await?;
    }

    let txn = db.begin().await?;
    let moved = PositionArchiveRepository::new(&txn)
        .archive_range(start, end, "positions_test_batch", Utc::now())
        .await?;
    txn.commit().await?;

    assert_eq!(moved.copied, 2);
    assert_eq!(moved.deleted, 2);
    assert_eq!(entity::prelude::DronePosition::find().count(db).await?, 1);

    let repo = PositionArchiveRepository::new(db);
    let filter = ArchiveFilter {
        archive_batch_id: Some("positions_test_batch".to_string()),
        ..Default::default()
    };
    let (rows, total) = repo
        .get_paginated(&filter, &first_page(position_archive::SORTABLE_COLUMNS))
        .await?;
    assert_eq!(total, 2);
    assert!(rows.iter().all(|r| r.drone_id == drone.id));

    Ok(())
}

/// Tests a range spanning several chunks.
///
/// Verifies rows are moved round by round until the range is drained, and that rows
/// outside the range interleaved by id are skipped rather than re-read.
///
/// Expected: Ok with every in-range row moved and the out-of-range rows left live
#[tokio::test]
async fn moves_range_larger_than_one_chunk() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    let end = Utc::now() - Duration::days(30);
    let start = end - Duration::days(1);
    for i in 0..1_100 {
        let recorded_at = if i % 100 == 0 {
            end
        } else {
            start + Duration::minutes(i)
        };
        factory::drone_position::DronePositionFactory::new(db, drone.id)
            .recorded_at(recorded_at)
            .build()
            .await?;
    }

    let txn = db.begin().await?;
    let moved = PositionArchiveRepository::new(&txn)
        .archive_range(start, end, "positions_chunked_batch", Utc::now())
        .await?;
    txn.commit().await?;

    assert_eq!(moved.copied, 1_089);
    assert_eq!(moved.deleted, 1_089);
    assert_eq!(entity::prelude::DronePosition::find().count(db).await?, 11);
    assert_eq!(
        entity::prelude::DronePositionArchive::find().count(db).await?,
        1_089
    );

    Ok(())
}

/// Tests that only finished commands are archived.
///
/// Expected: Ok with the completed command moved and the pending one left in place
#[tokio::test]
async fn moves_only_finished_commands() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    let issued_at = Utc::now() - Duration::days(40);
    let done = factory::drone_command::DroneCommandFactory::new(db, drone.id)
        .issued_at(issued_at)
        .status("completed")
        .build()
        .await?;
    factory::drone_command::DroneCommandFactory::new(db, drone.id)
        .issued_at(issued_at)
        .build()
        .await?;

    let repo = CommandArchiveRepository::new(db);
    let start = issued_at - Duration::days(1);
    let end = issued_at + Duration::days(1);
    assert_eq!(repo.count_in_range(start, end).await?, 1);

    let moved = repo
        .archive_range(start, end, "commands_test_batch", Utc::now())
        .await?;

    assert_eq!(moved.copied, 1);
    assert_eq!(entity::prelude::DroneCommand::find().count(db).await?, 1);

    let (rows, _) = repo
        .get_paginated(
            &ArchiveFilter::default(),
            &page_of(command_archive::SORTABLE_COLUMNS, 1, 20, None),
        )
        .await?;
    assert_eq!(rows[0].original_id, done.id);
    assert_eq!(rows[0].archive_batch_id, "commands_test_batch");

    Ok(())
}

/// Tests an empty range.
///
/// Expected: Ok with nothing copied or deleted
#[tokio::test]
async fn handles_empty_range() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let moved = PositionArchiveRepository::new(db)
        .archive_range(now - Duration::days(2), now - Duration::days(1), "empty", now)
        .await?;

    assert_eq!(moved.copied, 0);
    assert_eq!(moved.deleted, 0);

    Ok(())
}
