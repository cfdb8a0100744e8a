//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Status-transition whitelists, range checks and batch partitioning
//! - **Orchestration**: Coordinating multiple repository calls
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Archive-on-write, queue claims and archive runs

pub mod archive;
pub mod command_queue;
pub mod drone;
pub mod drone_command;
pub mod drone_position;
pub mod drone_status_archive;
pub mod rbac;
pub mod real_time_status;
pub mod system;
pub mod user_preference;

#[cfg(test)]
mod test;

use std::future::Future;

use crate::server::{
    error::AppError,
    model::batch::{BatchFailure, BatchOutcome},
    util::validate,
};

/// Runs `create` for every item independently and partitions the results.
///
/// The batch itself is rejected only when its size is outside `1..=MAX_BATCH_SIZE`;
/// a failing item is recorded with its index and never stops the others.
pub(crate) async fn run_batch<I, T, F, Fut>(
    items: Vec<I>,
    mut create: F,
) -> Result<BatchOutcome<T>, AppError>
where
    F: FnMut(I) -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    validate::batch_size(items.len())?;

    let mut outcome = BatchOutcome::default();
    for (index, item) in items.into_iter().enumerate() {
        match create(item).await {
            Ok(created) => outcome.successful.push(created),
            Err(err) => {
                if err.status_code().is_server_error() {
                    tracing::error!(index, "batch item failed: {}", err);
                }
                outcome.failed.push(BatchFailure {
                    index,
                    error: err.client_message(),
                });
            }
        }
    }

    Ok(outcome)
}
