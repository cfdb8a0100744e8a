//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each request
//! handler through Axum's state extraction.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

/// Application state containing shared resources.
///
/// `DatabaseConnection` is a connection pool, so clones share the pool.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// When the server process started, reported by `/api/info`.
    pub started_at: DateTime<Utc>,

    /// Threshold used by the on-demand mark-offline endpoint.
    pub stale_status_seconds: i64,
}

impl AppState {
    pub fn new(db: DatabaseConnection, stale_status_seconds: i64) -> Self {
        Self {
            db,
            started_at: Utc::now(),
            stale_status_seconds,
        }
    }
}
