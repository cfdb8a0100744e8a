use axum::{extract::State, response::IntoResponse};
use chrono::Utc;

use crate::{
    model::{
        api::{ApiResponse, BatchResultDto, DeletedDto, ErrorDto},
        drone_position::{
            CreateDronePositionDto, DronePositionDto, DronePositionFilterQuery,
            UpdateDronePositionDto,
        },
        pagination::{PaginatedDto, PaginationQuery},
    },
    server::{
        data::drone_position::SORTABLE_COLUMNS,
        error::AppError,
        model::{
            drone_position::{
                CreateDronePositionParams, DronePositionFilter, UpdateDronePositionParams,
            },
            pagination::PageRequest,
        },
        service::drone_position::DronePositionService,
        state::AppState,
        util::{
            extract::{AppJson, AppPath, AppQuery},
            response::{batch, created, ok},
        },
    },
};

pub static POSITION_TAG: &str = "drone-positions";

/// Record a position report.
///
/// `recorded_at` defaults to the time the request arrives.
///
/// # Returns
/// - `201 Created` - The stored position
/// - `400 Bad Request` - Coordinates or telemetry out of range
/// - `404 Not Found` - Drone not found
#[utoipa::path(
    post,
    path = "/api/drone-positions",
    tag = POSITION_TAG,
    request_body = CreateDronePositionDto,
    responses(
        (status = 201, description = "Position recorded", body = ApiResponse<DronePositionDto>),
        (status = 400, description = "Invalid position", body = ErrorDto),
        (status = 404, description = "Drone not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_position(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateDronePositionDto>,
) -> Result<impl IntoResponse, AppError> {
    let position = DronePositionService::new(&state.db)
        .create(CreateDronePositionParams::from_dto(payload, Utc::now()))
        .await?;

    Ok(created("Position recorded", position.into_dto()))
}

/// Record up to 100 position reports.
///
/// Each report is stored or rejected on its own.
///
/// # Returns
/// - `201 Created` - Every report stored
/// - `207 Multi-Status` - Some reports rejected
/// - `400 Bad Request` - Every report rejected, or the batch size is out of range
#[utoipa::path(
    post,
    path = "/api/drone-positions/batch",
    tag = POSITION_TAG,
    request_body = Vec<CreateDronePositionDto>,
    responses(
        (status = 201, description = "All positions recorded", body = ApiResponse<BatchResultDto<DronePositionDto>>),
        (status = 207, description = "Some positions rejected", body = ApiResponse<BatchResultDto<DronePositionDto>>),
        (status = 400, description = "All positions rejected", body = ApiResponse<BatchResultDto<DronePositionDto>>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_positions_batch(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Vec<CreateDronePositionDto>>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = DronePositionService::new(&state.db)
        .create_batch(payload)
        .await?;

    Ok(batch(outcome.into_dto(|p| p.into_dto())))
}

/// List positions.
///
/// Filterable by drone and a `startTime`/`endTime` window on `recorded_at`.
#[utoipa::path(
    get,
    path = "/api/drone-positions",
    tag = POSITION_TAG,
    params(PaginationQuery, DronePositionFilterQuery),
    responses(
        (status = 200, description = "Page of positions", body = ApiResponse<PaginatedDto<DronePositionDto>>),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_positions(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaginationQuery>,
    AppQuery(filter): AppQuery<DronePositionFilterQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest::from_query(query, SORTABLE_COLUMNS)?;
    let filter = DronePositionFilter {
        drone_id: filter.drone_id,
        start_time: filter.start_time,
        end_time: filter.end_time,
    };

    let positions = DronePositionService::new(&state.db)
        .get_paginated(&filter, &page)
        .await?;

    Ok(ok("Positions retrieved", positions.into_dto(|p| p.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/drone-positions/drone/{drone_id}/latest",
    tag = POSITION_TAG,
    params(("drone_id" = i32, Path, description = "Drone ID")),
    responses(
        (status = 200, description = "Latest position", body = ApiResponse<DronePositionDto>),
        (status = 404, description = "No positions for this drone", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_latest_position(
    State(state): State<AppState>,
    AppPath(drone_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let position = DronePositionService::new(&state.db)
        .get_latest_by_drone(drone_id)
        .await?;

    Ok(ok("Latest position retrieved", position.into_dto()))
}

#[utoipa::path(
    get,
    path = "/api/drone-positions/{id}",
    tag = POSITION_TAG,
    params(("id" = i32, Path, description = "Position ID")),
    responses(
        (status = 200, description = "Position found", body = ApiResponse<DronePositionDto>),
        (status = 404, description = "Position not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_position(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let position = DronePositionService::new(&state.db).get_by_id(id).await?;

    Ok(ok("Position retrieved", position.into_dto()))
}

#[utoipa::path(
    put,
    path = "/api/drone-positions/{id}",
    tag = POSITION_TAG,
    params(("id" = i32, Path, description = "Position ID")),
    request_body = UpdateDronePositionDto,
    responses(
        (status = 200, description = "Position updated", body = ApiResponse<DronePositionDto>),
        (status = 400, description = "Invalid position", body = ErrorDto),
        (status = 404, description = "Position not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_position(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateDronePositionDto>,
) -> Result<impl IntoResponse, AppError> {
    let position = DronePositionService::new(&state.db)
        .update(id, UpdateDronePositionParams::from_dto(payload))
        .await?;

    Ok(ok("Position updated", position.into_dto()))
}

#[utoipa::path(
    delete,
    path = "/api/drone-positions/{id}",
    tag = POSITION_TAG,
    params(("id" = i32, Path, description = "Position ID")),
    responses(
        (status = 200, description = "Position deleted", body = ApiResponse<DeletedDto>),
        (status = 404, description = "Position not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_position(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    DronePositionService::new(&state.db).delete(id).await?;

    Ok(ok("Position deleted", DeletedDto { id }))
}
