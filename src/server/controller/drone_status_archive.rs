use axum::{extract::State, response::IntoResponse};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        drone_status_archive::{DroneStatusArchiveDto, DroneStatusArchiveFilterQuery},
        pagination::{PaginatedDto, PaginationQuery},
    },
    server::{
        data::drone_status_archive::SORTABLE_COLUMNS,
        error::AppError,
        model::{drone_status_archive::StatusArchiveFilter, pagination::PageRequest},
        service::drone_status_archive::DroneStatusArchiveService,
        state::AppState,
        util::{
            extract::{AppPath, AppQuery},
            response::ok,
        },
    },
};

pub static STATUS_ARCHIVE_TAG: &str = "drone-status-archive";

/// List status history rows.
///
/// Filterable by drone, status and a `startTime`/`endTime` window on `created_at`.
#[utoipa::path(
    get,
    path = "/api/drone-status-archive",
    tag = STATUS_ARCHIVE_TAG,
    params(PaginationQuery, DroneStatusArchiveFilterQuery),
    responses(
        (status = 200, description = "Page of status changes", body = ApiResponse<PaginatedDto<DroneStatusArchiveDto>>),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_status_archive(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaginationQuery>,
    AppQuery(filter): AppQuery<DroneStatusArchiveFilterQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest::from_query(query, SORTABLE_COLUMNS)?;
    let filter = StatusArchiveFilter {
        drone_id: filter.drone_id,
        status: filter.status,
        start_time: filter.start_time,
        end_time: filter.end_time,
    };

    let rows = DroneStatusArchiveService::new(&state.db)
        .get_paginated(&filter, &page)
        .await?;

    Ok(ok("Status archive retrieved", rows.into_dto(|r| r.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/drone-status-archive/{id}",
    tag = STATUS_ARCHIVE_TAG,
    params(("id" = i32, Path, description = "Archive row ID")),
    responses(
        (status = 200, description = "Status change found", body = ApiResponse<DroneStatusArchiveDto>),
        (status = 404, description = "Row not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_status_archive(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let row = DroneStatusArchiveService::new(&state.db).get_by_id(id).await?;

    Ok(ok("Status archive entry retrieved", row.into_dto()))
}

/// Get a drone's status history, newest first.
#[utoipa::path(
    get,
    path = "/api/drone-status-archive/drone/{drone_id}",
    tag = STATUS_ARCHIVE_TAG,
    params(("drone_id" = i32, Path, description = "Drone ID")),
    responses(
        (status = 200, description = "Status history", body = ApiResponse<Vec<DroneStatusArchiveDto>>),
        (status = 404, description = "Drone not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_status_archive_by_drone(
    State(state): State<AppState>,
    AppPath(drone_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let rows = DroneStatusArchiveService::new(&state.db)
        .get_by_drone(drone_id)
        .await?;

    Ok(ok(
        "Status history retrieved",
        rows.into_iter().map(|r| r.into_dto()).collect::<Vec<_>>(),
    ))
}
