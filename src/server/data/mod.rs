//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and business logic layer.
//!
//! Repositories are generic over `ConnectionTrait` so the same code runs against the
//! connection pool or inside a transaction.

pub mod archive;
pub mod command_queue;
pub mod drone;
pub mod drone_command;
pub mod drone_position;
pub mod drone_status_archive;
pub mod rbac;
pub mod real_time_status;
pub mod user_preference;

#[cfg(test)]
mod test;

use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DbErr, EntityTrait, QueryFilter, Select};
use std::str::FromStr;

/// Resolves a whitelisted sort column name to the entity's column.
pub(crate) fn sort_column<C: FromStr>(name: &str) -> Result<C, DbErr> {
    C::from_str(name).map_err(|_| DbErr::Custom(format!("Unknown sort column '{}'", name)))
}

/// Restricts `column` to `start..=end`, either bound optional.
pub(crate) fn within_time_range<E, C>(
    query: Select<E>,
    column: C,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Select<E>
where
    E: EntityTrait,
    C: ColumnTrait,
{
    match (start, end) {
        (Some(start), Some(end)) => query.filter(column.between(start, end)),
        (Some(start), None) => query.filter(column.gte(start)),
        (None, Some(end)) => query.filter(column.lte(end)),
        (None, None) => query,
    }
}
