use super::*;

/// Tests the `recorded_at` time window.
///
/// Expected: Ok with only positions inside the window
#[tokio::test]
async fn filters_by_time_range() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let drone = factory::create_drone(db).await?;
    let now = Utc::now();
    for hours in [1, 5, 48] {
        factory::drone_position::DronePositionFactory::new(db, drone.id)
            .recorded_at(now - Duration::hours(hours))
            .build()
            .await?;
    }

    let repo = DronePositionRepository::new(db);
    let filter = DronePositionFilter {
        drone_id: Some(drone.id),
        start_time: Some(now - Duration::hours(6)),
        end_time: Some(now),
    };
    let (positions, total) = repo
        .get_paginated(&filter, &first_page(SORTABLE_COLUMNS))
        .await?;

    assert_eq!(total, 2);
    assert_eq!(positions.len(), 2);

    Ok(())
}
