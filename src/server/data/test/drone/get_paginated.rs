use super::*;

/// Tests paging through drones.
///
/// Verifies that the total reflects every row while the page holds only `page_size`.
///
/// Expected: Ok with 2 drones on the page and a total of 5
#[tokio::test]
async fn pages_drones() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..5 {
        factory::create_drone(db).await?;
    }

    let repo = DroneRepository::new(db);
    let (drones, total) = repo
        .get_paginated(&DroneFilter::default(), &page_of(SORTABLE_COLUMNS, 1, 2, None))
        .await?;

    assert_eq!(drones.len(), 2);
    assert_eq!(total, 5);

    Ok(())
}

/// Tests a page past the end.
///
/// Expected: Ok with no drones but the full total
#[tokio::test]
async fn returns_empty_page_past_end() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_drone(db).await?;

    let repo = DroneRepository::new(db);
    let (drones, total) = repo
        .get_paginated(&DroneFilter::default(), &page_of(SORTABLE_COLUMNS, 3, 20, None))
        .await?;

    assert!(drones.is_empty());
    assert_eq!(total, 1);

    Ok(())
}

/// Tests filtering by status and searching by name.
///
/// Expected: Ok with only the matching drone
#[tokio::test]
async fn filters_by_status_and_search() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::drone::DroneFactory::new(db)
        .name("Harbor Patrol")
        .status("flying")
        .build()
        .await?;
    factory::drone::DroneFactory::new(db)
        .name("Harbor Survey")
        .status("maintenance")
        .build()
        .await?;
    factory::drone::DroneFactory::new(db)
        .name("Field Patrol")
        .status("flying")
        .build()
        .await?;

    let repo = DroneRepository::new(db);
    let filter = DroneFilter {
        status: Some(DroneStatus::Flying),
    };
    let (drones, total) = repo
        .get_paginated(&filter, &page_of(SORTABLE_COLUMNS, 1, 20, Some("Harbor")))
        .await?;

    assert_eq!(total, 1);
    assert_eq!(drones[0].name, "Harbor Patrol");

    Ok(())
}

/// Tests that the default sort is newest first.
///
/// Expected: Ok with the most recently created drone first
#[tokio::test]
async fn defaults_to_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_drone(db).await?;
    let second = factory::create_drone(db).await?;

    let repo = DroneRepository::new(db);
    let (drones, _) = repo
        .get_paginated(&DroneFilter::default(), &first_page(SORTABLE_COLUMNS))
        .await?;

    let ids = drones.iter().map(|d| d.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![second.id, first.id]);

    Ok(())
}
