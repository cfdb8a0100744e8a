use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    model::archive::ArchiveTaskType,
    server::{
        config::Config,
        error::AppError,
        service::{
            archive::ArchiveService, command_queue::CommandQueueService,
            real_time_status::RealTimeStatusService,
        },
    },
};

/// Retention windows applied on every maintenance run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceSettings {
    pub archive_retention: Duration,
    pub queue_retention: Duration,
    pub stale_status: Duration,
}

impl MaintenanceSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            archive_retention: Duration::days(config.archive_retention_days),
            queue_retention: Duration::days(config.queue_retention_days),
            stale_status: Duration::seconds(config.stale_status_seconds),
        }
    }
}

/// Starts the hourly maintenance scheduler
///
/// Each run archives positions and finished commands older than the archive retention,
/// drops finished queue entries older than the queue retention and marks drones whose
/// telemetry went quiet as offline.
pub async fn start_scheduler(
    db: DatabaseConnection,
    settings: MaintenanceSettings,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 0 * * * *", move |_uuid, _lock| {
        let db = db.clone();

        Box::pin(async move {
            run_maintenance(&db, settings, Utc::now()).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Maintenance scheduler started");

    Ok(scheduler)
}

/// Runs every maintenance step; a failing step is logged and the rest still run
///
/// # Arguments
/// - `db`: Database connection
/// - `settings`: Retention windows
/// - `now`: Reference time the archive and queue cutoffs are measured from
pub async fn run_maintenance(
    db: &DatabaseConnection,
    settings: MaintenanceSettings,
    now: DateTime<Utc>,
) {
    let cutoff = now - settings.archive_retention;

    for task_type in [ArchiveTaskType::Positions, ArchiveTaskType::Commands] {
        if let Err(e) = archive_before(db, task_type, cutoff).await {
            tracing::error!("Error archiving {}: {}", task_type.as_str(), e);
        }
    }

    match CommandQueueService::new(db)
        .cleanup(now - settings.queue_retention)
        .await
    {
        Ok(deleted) => tracing::debug!(deleted, "queue cleanup finished"),
        Err(e) => tracing::error!("Error cleaning up command queue: {}", e),
    }

    match RealTimeStatusService::new(db)
        .mark_offline_stale(settings.stale_status)
        .await
    {
        Ok(updated) => tracing::debug!(updated, "stale status sweep finished"),
        Err(e) => tracing::error!("Error marking stale drones offline: {}", e),
    }
}

/// Archives everything of `task_type` older than `cutoff`
///
/// No task row is created when nothing falls in the window.
async fn archive_before(
    db: &DatabaseConnection,
    task_type: ArchiveTaskType,
    cutoff: DateTime<Utc>,
) -> Result<(), AppError> {
    let service = ArchiveService::new(db);
    let start = DateTime::<Utc>::UNIX_EPOCH;

    if service.count_archivable(task_type, start, cutoff).await? == 0 {
        tracing::debug!("no {} to archive", task_type.as_str());
        return Ok(());
    }

    let task = service.archive_window(task_type, start, cutoff).await?;

    tracing::info!(
        task_id = task.id,
        status = task.status.as_str(),
        archived = task.archived_records,
        "{} archive run finished",
        task_type.as_str()
    );

    Ok(())
}
