mod model;
mod server;

use tokio::net::TcpListener;

use crate::server::{
    config::Config,
    error::AppError,
    router,
    scheduler::maintenance::{self, MaintenanceSettings},
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;
    let db = startup::connect_to_database(&config).await?;

    // Held for the lifetime of the server so the jobs keep running.
    let _scheduler = if config.enable_scheduler {
        Some(
            maintenance::start_scheduler(db.clone(), MaintenanceSettings::from_config(&config))
                .await?,
        )
    } else {
        tracing::info!("Maintenance scheduler disabled");
        None
    };

    let state = AppState::new(db, config.stale_status_seconds);
    let app = router::router(state, &config);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
