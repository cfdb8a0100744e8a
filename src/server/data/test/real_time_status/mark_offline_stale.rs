use super::*;

/// Tests marking silent drones offline.
///
/// Verifies only connected snapshots last seen before the cutoff change.
///
/// Expected: Ok(1) with the stale drone offline and disconnected
#[tokio::test]
async fn marks_only_stale_snapshots() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_drone_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let stale = factory::create_drone(db).await?;
    let fresh = factory::create_drone(db).await?;
    let now = Utc::now();

    let repo = RealTimeStatusRepository::new(db);
    repo.upsert(
        snapshot(stale.id, RealTimeStatus::Flying, 50.0),
        now - Duration::minutes(30),
    )
    .await?;
    repo.upsert(snapshot(fresh.id, RealTimeStatus::Flying, 50.0), now)
        .await?;

    let changed = repo
        .mark_offline_stale(now - Duration::minutes(5), now)
        .await?;

    assert_eq!(changed, 1);
    let offline = repo.get_by_drone(stale.id).await?.unwrap();
    assert_eq!(offline.current_status, RealTimeStatus::Offline);
    assert!(!offline.is_connected);
    let online = repo.get_by_drone(fresh.id).await?.unwrap();
    assert!(online.is_connected);

    Ok(())
}
