use axum::{extract::State, response::IntoResponse};

use crate::{
    model::{
        api::{ApiResponse, DeletedDto, ErrorDto},
        archive::{
            ArchiveFilterQuery, ArchiveTaskDto, ArchiveTaskFilterQuery, CreateArchiveTaskDto,
            DroneCommandArchiveDto, DronePositionArchiveDto,
        },
        pagination::{PaginatedDto, PaginationQuery},
    },
    server::{
        data::archive::{command, position, task},
        error::AppError,
        model::{
            archive::{ArchiveFilter, ArchiveTaskFilter, CreateArchiveTaskParams},
            pagination::PageRequest,
        },
        service::archive::ArchiveService,
        state::AppState,
        util::{
            extract::{AppJson, AppPath, AppQuery},
            response::{created, ok},
        },
    },
};

pub static ARCHIVE_TAG: &str = "archive";

fn archive_filter(query: ArchiveFilterQuery) -> ArchiveFilter {
    ArchiveFilter {
        drone_id: query.drone_id,
        archive_batch_id: query.archive_batch_id,
        start_time: query.start_time,
        end_time: query.end_time,
    }
}

/// Create a pending archive task.
///
/// The task covers `[date_range_start, date_range_end)` and does nothing until it is run.
///
/// # Returns
/// - `201 Created` - The pending task with its generated batch id
/// - `400 Bad Request` - Empty or inverted range
#[utoipa::path(
    post,
    path = "/api/archive-tasks",
    tag = ARCHIVE_TAG,
    request_body = CreateArchiveTaskDto,
    responses(
        (status = 201, description = "Task created", body = ApiResponse<ArchiveTaskDto>),
        (status = 400, description = "Invalid range", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_archive_task(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateArchiveTaskDto>,
) -> Result<impl IntoResponse, AppError> {
    let task = ArchiveService::new(&state.db)
        .create_task(CreateArchiveTaskParams::from_dto(payload))
        .await?;

    Ok(created("Archive task created", task.into_dto()))
}

#[utoipa::path(
    get,
    path = "/api/archive-tasks",
    tag = ARCHIVE_TAG,
    params(PaginationQuery, ArchiveTaskFilterQuery),
    responses(
        (status = 200, description = "Page of archive tasks", body = ApiResponse<PaginatedDto<ArchiveTaskDto>>),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_archive_tasks(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaginationQuery>,
    AppQuery(filter): AppQuery<ArchiveTaskFilterQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest::from_query(query, task::SORTABLE_COLUMNS)?;
    let filter = ArchiveTaskFilter {
        status: filter.status,
        task_type: filter.task_type,
    };

    let tasks = ArchiveService::new(&state.db)
        .get_tasks_paginated(&filter, &page)
        .await?;

    Ok(ok("Archive tasks retrieved", tasks.into_dto(|t| t.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/archive-tasks/{id}",
    tag = ARCHIVE_TAG,
    params(("id" = i32, Path, description = "Archive task ID")),
    responses(
        (status = 200, description = "Task found", body = ApiResponse<ArchiveTaskDto>),
        (status = 404, description = "Task not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_archive_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let task = ArchiveService::new(&state.db).get_task(id).await?;

    Ok(ok("Archive task retrieved", task.into_dto()))
}

/// Run a pending archive task.
///
/// Matching rows are copied into the archive table and removed from the live table in
/// one transaction. A run that fails leaves the live rows untouched and the task
/// `failed` with the error recorded; that task is still returned with 200.
///
/// # Returns
/// - `200 OK` - The finished task
/// - `400 Bad Request` - Task is not pending
/// - `404 Not Found` - Task not found
#[utoipa::path(
    post,
    path = "/api/archive-tasks/{id}/run",
    tag = ARCHIVE_TAG,
    params(("id" = i32, Path, description = "Archive task ID")),
    responses(
        (status = 200, description = "Task finished", body = ApiResponse<ArchiveTaskDto>),
        (status = 400, description = "Task is not pending", body = ErrorDto),
        (status = 404, description = "Task not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn run_archive_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let task = ArchiveService::new(&state.db).run_task(id).await?;

    Ok(ok("Archive task finished", task.into_dto()))
}

#[utoipa::path(
    delete,
    path = "/api/archive-tasks/{id}",
    tag = ARCHIVE_TAG,
    params(("id" = i32, Path, description = "Archive task ID")),
    responses(
        (status = 200, description = "Task deleted", body = ApiResponse<DeletedDto>),
        (status = 400, description = "Task is running", body = ErrorDto),
        (status = 404, description = "Task not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_archive_task(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    ArchiveService::new(&state.db).delete_task(id).await?;

    Ok(ok("Archive task deleted", DeletedDto { id }))
}

#[utoipa::path(
    get,
    path = "/api/archive/positions",
    tag = ARCHIVE_TAG,
    params(PaginationQuery, ArchiveFilterQuery),
    responses(
        (status = 200, description = "Page of archived positions", body = ApiResponse<PaginatedDto<DronePositionArchiveDto>>),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_position_archives(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaginationQuery>,
    AppQuery(filter): AppQuery<ArchiveFilterQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest::from_query(query, position::SORTABLE_COLUMNS)?;

    let rows = ArchiveService::new(&state.db)
        .get_position_archives_paginated(&archive_filter(filter), &page)
        .await?;

    Ok(ok("Archived positions retrieved", rows.into_dto(|r| r.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/archive/positions/{id}",
    tag = ARCHIVE_TAG,
    params(("id" = i32, Path, description = "Archived position ID")),
    responses(
        (status = 200, description = "Archived position found", body = ApiResponse<DronePositionArchiveDto>),
        (status = 404, description = "Archived position not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_position_archive(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let row = ArchiveService::new(&state.db)
        .get_position_archive(id)
        .await?;

    Ok(ok("Archived position retrieved", row.into_dto()))
}

#[utoipa::path(
    get,
    path = "/api/archive/commands",
    tag = ARCHIVE_TAG,
    params(PaginationQuery, ArchiveFilterQuery),
    responses(
        (status = 200, description = "Page of archived commands", body = ApiResponse<PaginatedDto<DroneCommandArchiveDto>>),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_command_archives(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaginationQuery>,
    AppQuery(filter): AppQuery<ArchiveFilterQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest::from_query(query, command::SORTABLE_COLUMNS)?;

    let rows = ArchiveService::new(&state.db)
        .get_command_archives_paginated(&archive_filter(filter), &page)
        .await?;

    Ok(ok("Archived commands retrieved", rows.into_dto(|r| r.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/archive/commands/{id}",
    tag = ARCHIVE_TAG,
    params(("id" = i32, Path, description = "Archived command ID")),
    responses(
        (status = 200, description = "Archived command found", body = ApiResponse<DroneCommandArchiveDto>),
        (status = 404, description = "Archived command not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_command_archive(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let row = ArchiveService::new(&state.db).get_command_archive(id).await?;

    Ok(ok("Archived command retrieved", row.into_dto()))
}
