use axum::{extract::State, response::IntoResponse};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        command_queue::{
            CleanupQueueDto, CleanupResultDto, DequeueDto, EnqueueCommandDto,
            FailQueueEntryDto, QueueEntryDto, QueueFilterQuery, QueueStatisticsDto,
        },
        pagination::{PaginatedDto, PaginationQuery},
    },
    server::{
        data::command_queue::SORTABLE_COLUMNS,
        error::AppError,
        model::{
            command_queue::{EnqueueParams, QueueFilter},
            pagination::PageRequest,
        },
        service::command_queue::CommandQueueService,
        state::AppState,
        util::{
            extract::{AppJson, AppPath, AppQuery},
            response::{created, ok},
        },
    },
};

pub static QUEUE_TAG: &str = "command-queue";

/// Queue a command for a drone.
///
/// Entries are claimed highest priority first, oldest first within a priority.
///
/// # Returns
/// - `201 Created` - The pending entry
/// - `400 Bad Request` - Priority outside 1..=10 or invalid payload
/// - `404 Not Found` - Drone not found
#[utoipa::path(
    post,
    path = "/api/command-queue",
    tag = QUEUE_TAG,
    request_body = EnqueueCommandDto,
    responses(
        (status = 201, description = "Command queued", body = ApiResponse<QueueEntryDto>),
        (status = 400, description = "Invalid entry", body = ErrorDto),
        (status = 404, description = "Drone not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn enqueue_command(
    State(state): State<AppState>,
    AppJson(payload): AppJson<EnqueueCommandDto>,
) -> Result<impl IntoResponse, AppError> {
    let entry = CommandQueueService::new(&state.db)
        .enqueue(EnqueueParams::from_dto(payload))
        .await?;

    Ok(created("Command queued", entry.into_dto()))
}

#[utoipa::path(
    get,
    path = "/api/command-queue",
    tag = QUEUE_TAG,
    params(PaginationQuery, QueueFilterQuery),
    responses(
        (status = 200, description = "Page of queue entries", body = ApiResponse<PaginatedDto<QueueEntryDto>>),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_queue(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaginationQuery>,
    AppQuery(filter): AppQuery<QueueFilterQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest::from_query(query, SORTABLE_COLUMNS)?;
    let filter = QueueFilter {
        drone_id: filter.drone_id,
        status: filter.status,
    };

    let entries = CommandQueueService::new(&state.db)
        .get_paginated(&filter, &page)
        .await?;

    Ok(ok("Queue entries retrieved", entries.into_dto(|e| e.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/command-queue/statistics",
    tag = QUEUE_TAG,
    responses(
        (status = 200, description = "Entry counts per status", body = ApiResponse<QueueStatisticsDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_queue_statistics(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let statistics = CommandQueueService::new(&state.db).statistics().await?;

    Ok(ok("Queue statistics retrieved", statistics.into_dto()))
}

/// Pending entries at one priority, oldest first.
#[utoipa::path(
    get,
    path = "/api/command-queue/priority/{priority}",
    tag = QUEUE_TAG,
    params(("priority" = i32, Path, description = "Priority from 1 to 10")),
    responses(
        (status = 200, description = "Pending entries", body = ApiResponse<Vec<QueueEntryDto>>),
        (status = 400, description = "Priority out of range", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_queue_by_priority(
    State(state): State<AppState>,
    AppPath(priority): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let entries = CommandQueueService::new(&state.db)
        .find_by_priority(priority)
        .await?;

    Ok(ok(
        "Queue entries retrieved",
        entries.into_iter().map(|e| e.into_dto()).collect::<Vec<_>>(),
    ))
}

/// Every entry queued for a drone in claim order.
#[utoipa::path(
    get,
    path = "/api/command-queue/drone/{drone_id}",
    tag = QUEUE_TAG,
    params(("drone_id" = i32, Path, description = "Drone ID")),
    responses(
        (status = 200, description = "Entries of the drone", body = ApiResponse<Vec<QueueEntryDto>>),
        (status = 404, description = "Drone not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_queue_by_drone(
    State(state): State<AppState>,
    AppPath(drone_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let entries = CommandQueueService::new(&state.db)
        .find_by_drone(drone_id)
        .await?;

    Ok(ok(
        "Queue entries retrieved",
        entries.into_iter().map(|e| e.into_dto()).collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/command-queue/{id}",
    tag = QUEUE_TAG,
    params(("id" = i32, Path, description = "Queue entry ID")),
    responses(
        (status = 200, description = "Queue entry found", body = ApiResponse<QueueEntryDto>),
        (status = 404, description = "Queue entry not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_queue_entry(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let entry = CommandQueueService::new(&state.db).get_by_id(id).await?;

    Ok(ok("Queue entry retrieved", entry.into_dto()))
}

/// Claim the next pending entry.
///
/// The claimed entry moves to `executing`. `data` is null when nothing is pending.
/// Send `{}` to claim from any drone's queue.
///
/// # Returns
/// - `200 OK` - The claimed entry, or null
/// - `500 Internal Server Error` - The claim kept losing to concurrent workers
#[utoipa::path(
    post,
    path = "/api/command-queue/dequeue",
    tag = QUEUE_TAG,
    request_body = DequeueDto,
    responses(
        (status = 200, description = "Claimed entry or null", body = ApiResponse<QueueEntryDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn dequeue_command(
    State(state): State<AppState>,
    AppJson(payload): AppJson<DequeueDto>,
) -> Result<impl IntoResponse, AppError> {
    let entry = CommandQueueService::new(&state.db)
        .dequeue_next(payload.drone_id)
        .await?;

    let message = if entry.is_some() {
        "Queue entry claimed"
    } else {
        "No pending queue entries"
    };

    Ok(ok(message, entry.map(|e| e.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/command-queue/{id}/executing",
    tag = QUEUE_TAG,
    params(("id" = i32, Path, description = "Queue entry ID")),
    responses(
        (status = 200, description = "Entry executing", body = ApiResponse<QueueEntryDto>),
        (status = 400, description = "Entry is not pending", body = ErrorDto),
        (status = 404, description = "Queue entry not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_queue_executing(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let entry = CommandQueueService::new(&state.db)
        .mark_as_executing(id)
        .await?;

    Ok(ok("Queue entry executing", entry.into_dto()))
}

#[utoipa::path(
    put,
    path = "/api/command-queue/{id}/complete",
    tag = QUEUE_TAG,
    params(("id" = i32, Path, description = "Queue entry ID")),
    responses(
        (status = 200, description = "Entry completed", body = ApiResponse<QueueEntryDto>),
        (status = 400, description = "Entry is not executing", body = ErrorDto),
        (status = 404, description = "Queue entry not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn complete_queue_entry(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let entry = CommandQueueService::new(&state.db).mark_completed(id).await?;

    Ok(ok("Queue entry completed", entry.into_dto()))
}

#[utoipa::path(
    put,
    path = "/api/command-queue/{id}/fail",
    tag = QUEUE_TAG,
    params(("id" = i32, Path, description = "Queue entry ID")),
    request_body = FailQueueEntryDto,
    responses(
        (status = 200, description = "Entry failed", body = ApiResponse<QueueEntryDto>),
        (status = 400, description = "Entry already finished", body = ErrorDto),
        (status = 404, description = "Queue entry not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn fail_queue_entry(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<FailQueueEntryDto>,
) -> Result<impl IntoResponse, AppError> {
    let entry = CommandQueueService::new(&state.db)
        .mark_failed(id, payload.error_message)
        .await?;

    Ok(ok("Queue entry failed", entry.into_dto()))
}

#[utoipa::path(
    put,
    path = "/api/command-queue/{id}/cancel",
    tag = QUEUE_TAG,
    params(("id" = i32, Path, description = "Queue entry ID")),
    responses(
        (status = 200, description = "Entry cancelled", body = ApiResponse<QueueEntryDto>),
        (status = 400, description = "Entry is not pending", body = ErrorDto),
        (status = 404, description = "Queue entry not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_queue_entry(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let entry = CommandQueueService::new(&state.db).cancel(id).await?;

    Ok(ok("Queue entry cancelled", entry.into_dto()))
}

/// Delete finished entries completed before `older_than`.
#[utoipa::path(
    post,
    path = "/api/command-queue/cleanup",
    tag = QUEUE_TAG,
    request_body = CleanupQueueDto,
    responses(
        (status = 200, description = "Finished entries removed", body = ApiResponse<CleanupResultDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cleanup_queue(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CleanupQueueDto>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = CommandQueueService::new(&state.db)
        .cleanup(payload.older_than)
        .await?;

    Ok(ok("Queue cleaned up", CleanupResultDto { deleted }))
}
