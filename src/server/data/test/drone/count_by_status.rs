use super::*;

/// Tests grouping drones by status.
///
/// Expected: Ok with one entry per status present
#[tokio::test]
async fn counts_drones_per_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for status in ["active", "active", "flying"] {
        factory::drone::DroneFactory::new(db)
            .status(status)
            .build()
            .await?;
    }

    let repo = DroneRepository::new(db);
    let mut counts = repo.count_by_status().await?;
    counts.sort_by_key(|(status, _)| status.as_str());

    assert_eq!(
        counts,
        vec![(DroneStatus::Active, 2), (DroneStatus::Flying, 1)]
    );

    Ok(())
}
