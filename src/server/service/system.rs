use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::model::system::{HealthDto, InfoDto};

pub const SERVICE_NAME: &str = "aiot-backend";

/// API areas reported by `/api/info`.
pub const SERVICE_AREAS: &[&str] = &[
    "drones",
    "drone-status-archive",
    "drone-realtime-status",
    "drone-positions",
    "drone-commands",
    "command-queue",
    "archive-tasks",
    "archive",
    "rbac",
    "user-preferences",
];

/// Health and service information.
pub struct SystemService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SystemService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Pings the database; a failed ping reports the service unhealthy
    pub async fn health(&self) -> HealthDto {
        let database_up = match self.db.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Database ping failed: {}", e);
                false
            }
        };

        HealthDto {
            status: if database_up { "healthy" } else { "unhealthy" }.to_string(),
            database: if database_up { "up" } else { "down" }.to_string(),
            timestamp: Utc::now(),
        }
    }

    /// Describes the running service: name, version, uptime and API areas
    pub fn info(started_at: DateTime<Utc>) -> InfoDto {
        let now = Utc::now();

        InfoDto {
            name: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at,
            uptime_seconds: (now - started_at).num_seconds().max(0),
            services: SERVICE_AREAS.iter().map(|s| s.to_string()).collect(),
            docs_url: "/api/docs".to_string(),
        }
    }
}
