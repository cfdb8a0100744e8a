use std::str::FromStr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3052";
const DEFAULT_ARCHIVE_RETENTION_DAYS: i64 = 30;
const DEFAULT_QUEUE_RETENTION_DAYS: i64 = 7;
const DEFAULT_STALE_STATUS_SECONDS: i64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,

    /// Positions and finished commands older than this are moved to the archive tables.
    pub archive_retention_days: i64,
    /// Finished queue entries older than this are deleted.
    pub queue_retention_days: i64,
    /// Connected real-time statuses not refreshed within this window are marked offline.
    pub stale_status_seconds: i64,
    pub enable_scheduler: bool,

    /// Allowed CORS origins; empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::from_lookup(|name| std::env::var(name).ok())?)
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            archive_retention_days: parse_or(
                &lookup,
                "ARCHIVE_RETENTION_DAYS",
                DEFAULT_ARCHIVE_RETENTION_DAYS,
            )?,
            queue_retention_days: parse_or(
                &lookup,
                "QUEUE_RETENTION_DAYS",
                DEFAULT_QUEUE_RETENTION_DAYS,
            )?,
            stale_status_seconds: parse_or(
                &lookup,
                "STALE_STATUS_SECONDS",
                DEFAULT_STALE_STATUS_SECONDS,
            )?,
            enable_scheduler: parse_or(&lookup, "ENABLE_SCHEDULER", true)?,
            cors_origins: lookup("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value: value.clone(),
                reason: e.to_string(),
            }),
    }
}
