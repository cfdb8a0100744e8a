//! Domain models and operation-specific parameter types.
//!
//! Repositories convert SeaORM entity models into the domain types defined here so that
//! entity models never leak into service or controller layers. Parameter types carry the
//! input of create/update operations from controllers to services; services validate them
//! before anything touches the database.

pub mod archive;
pub mod batch;
pub mod command_queue;
pub mod drone;
pub mod drone_command;
pub mod drone_position;
pub mod drone_status_archive;
pub mod pagination;
pub mod rbac;
pub mod real_time_status;
pub mod user_preference;

use sea_orm::DbErr;
use std::str::FromStr;

use crate::model::api::UnknownVariant;

/// Parses an enumerated column value stored as text.
///
/// A value that fails to parse means the row was written outside this application, so
/// it surfaces as a database type error rather than a client error.
pub(crate) fn parse_stored<T>(value: &str) -> Result<T, DbErr>
where
    T: FromStr<Err = UnknownVariant>,
{
    value
        .parse::<T>()
        .map_err(|e| DbErr::Type(format!("Invalid stored value: {}", e)))
}
