use axum::{extract::State, response::IntoResponse};
use chrono::Duration;

use crate::{
    model::{
        api::{ApiResponse, DeletedDto, ErrorDto},
        pagination::{PaginatedDto, PaginationQuery},
        real_time_status::{
            DroneRealTimeStatusDto, MarkOfflineResultDto, RealTimeStatusFilterQuery,
            UpsertRealTimeStatusDto,
        },
    },
    server::{
        data::real_time_status::SORTABLE_COLUMNS,
        error::AppError,
        model::{
            pagination::PageRequest,
            real_time_status::{RealTimeStatusFilter, UpsertRealTimeStatusParams},
        },
        service::real_time_status::RealTimeStatusService,
        state::AppState,
        util::{
            extract::{AppJson, AppPath, AppQuery},
            response::ok,
        },
    },
};

pub static REAL_TIME_STATUS_TAG: &str = "drone-realtime-status";

/// Replace a drone's live snapshot.
///
/// Creates the row on first report; `last_seen` is set to the time of the request.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `drone_id` - Drone the snapshot belongs to
/// - `payload` - Full snapshot
///
/// # Returns
/// - `200 OK` - The stored snapshot
/// - `400 Bad Request` - Battery, signal, speed or heading out of range
/// - `404 Not Found` - Drone not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/drone-realtime-status/{drone_id}",
    tag = REAL_TIME_STATUS_TAG,
    params(("drone_id" = i32, Path, description = "Drone ID")),
    request_body = UpsertRealTimeStatusDto,
    responses(
        (status = 200, description = "Snapshot stored", body = ApiResponse<DroneRealTimeStatusDto>),
        (status = 400, description = "Invalid snapshot", body = ErrorDto),
        (status = 404, description = "Drone not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upsert_real_time_status(
    State(state): State<AppState>,
    AppPath(drone_id): AppPath<i32>,
    AppJson(payload): AppJson<UpsertRealTimeStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let status = RealTimeStatusService::new(&state.db)
        .upsert(UpsertRealTimeStatusParams::from_dto(drone_id, payload))
        .await?;

    Ok(ok("Real-time status updated", status.into_dto()))
}

#[utoipa::path(
    get,
    path = "/api/drone-realtime-status",
    tag = REAL_TIME_STATUS_TAG,
    params(PaginationQuery, RealTimeStatusFilterQuery),
    responses(
        (status = 200, description = "Page of snapshots", body = ApiResponse<PaginatedDto<DroneRealTimeStatusDto>>),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_real_time_status(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaginationQuery>,
    AppQuery(filter): AppQuery<RealTimeStatusFilterQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest::from_query(query, SORTABLE_COLUMNS)?;
    let filter = RealTimeStatusFilter {
        current_status: filter.current_status,
        is_connected: filter.is_connected,
    };

    let rows = RealTimeStatusService::new(&state.db)
        .get_paginated(&filter, &page)
        .await?;

    Ok(ok("Real-time statuses retrieved", rows.into_dto(|r| r.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/drone-realtime-status/{drone_id}",
    tag = REAL_TIME_STATUS_TAG,
    params(("drone_id" = i32, Path, description = "Drone ID")),
    responses(
        (status = 200, description = "Current snapshot", body = ApiResponse<DroneRealTimeStatusDto>),
        (status = 404, description = "No snapshot for this drone", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_real_time_status(
    State(state): State<AppState>,
    AppPath(drone_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let status = RealTimeStatusService::new(&state.db)
        .get_by_drone(drone_id)
        .await?;

    Ok(ok("Real-time status retrieved", status.into_dto()))
}

#[utoipa::path(
    delete,
    path = "/api/drone-realtime-status/{drone_id}",
    tag = REAL_TIME_STATUS_TAG,
    params(("drone_id" = i32, Path, description = "Drone ID")),
    responses(
        (status = 200, description = "Snapshot deleted", body = ApiResponse<DeletedDto>),
        (status = 404, description = "No snapshot for this drone", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_real_time_status(
    State(state): State<AppState>,
    AppPath(drone_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    RealTimeStatusService::new(&state.db)
        .delete_by_drone(drone_id)
        .await?;

    Ok(ok("Real-time status deleted", DeletedDto { id: drone_id }))
}

/// Mark connected drones that stopped reporting as offline.
///
/// Uses the configured stale threshold.
#[utoipa::path(
    post,
    path = "/api/drone-realtime-status/mark-offline",
    tag = REAL_TIME_STATUS_TAG,
    responses(
        (status = 200, description = "Number of drones marked offline", body = ApiResponse<MarkOfflineResultDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_offline_stale(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let updated = RealTimeStatusService::new(&state.db)
        .mark_offline_stale(Duration::seconds(state.stale_status_seconds))
        .await?;

    Ok(ok("Stale drones marked offline", MarkOfflineResultDto { updated }))
}
