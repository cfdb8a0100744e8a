use axum::{extract::State, response::IntoResponse};

use crate::{
    model::{
        api::{ApiResponse, DeletedDto, ErrorDto},
        drone::{
            CreateDroneDto, DroneDto, DroneFilterQuery, DroneStatisticsDto, UpdateDroneDto,
            UpdateDroneStatusDto,
        },
        pagination::{PaginatedDto, PaginationQuery},
    },
    server::{
        data::drone::SORTABLE_COLUMNS,
        error::AppError,
        model::{
            drone::{CreateDroneParams, DroneFilter, DroneStatusChange, UpdateDroneParams},
            pagination::PageRequest,
        },
        service::drone::DroneService,
        state::AppState,
        util::{
            extract::{AppJson, AppPath, AppQuery},
            response::{created, ok},
        },
    },
};

/// Tag for grouping drone endpoints in OpenAPI documentation
pub static DRONE_TAG: &str = "drones";

/// Register a new drone.
///
/// The serial must be unique. Status defaults to `inactive`.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `payload` - Drone registration data
///
/// # Returns
/// - `201 Created` - The registered drone
/// - `400 Bad Request` - Missing or invalid fields
/// - `409 Conflict` - Serial already registered
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/drones",
    tag = DRONE_TAG,
    request_body = CreateDroneDto,
    responses(
        (status = 201, description = "Drone registered", body = ApiResponse<DroneDto>),
        (status = 400, description = "Invalid drone data", body = ErrorDto),
        (status = 409, description = "Serial already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_drone(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateDroneDto>,
) -> Result<impl IntoResponse, AppError> {
    let drone = DroneService::new(&state.db)
        .create(CreateDroneParams::from_dto(payload))
        .await?;

    Ok(created("Drone created", drone.into_dto()))
}

/// List drones.
///
/// Searches serial, name, model and manufacturer. Filterable by status.
///
/// # Returns
/// - `200 OK` - One page of drones
/// - `400 Bad Request` - Invalid pagination or filter values
#[utoipa::path(
    get,
    path = "/api/drones",
    tag = DRONE_TAG,
    params(PaginationQuery, DroneFilterQuery),
    responses(
        (status = 200, description = "Page of drones", body = ApiResponse<PaginatedDto<DroneDto>>),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_drones(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaginationQuery>,
    AppQuery(filter): AppQuery<DroneFilterQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest::from_query(query, SORTABLE_COLUMNS)?;
    let filter = DroneFilter {
        status: filter.status,
    };

    let drones = DroneService::new(&state.db)
        .get_paginated(&filter, &page)
        .await?;

    Ok(ok("Drones retrieved", drones.into_dto(|d| d.into_dto())))
}

/// Get drone counts per status.
#[utoipa::path(
    get,
    path = "/api/drones/statistics",
    tag = DRONE_TAG,
    responses(
        (status = 200, description = "Drone statistics", body = ApiResponse<DroneStatisticsDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_drone_statistics(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let statistics = DroneService::new(&state.db).statistics().await?;

    Ok(ok("Drone statistics retrieved", statistics.into_dto()))
}

#[utoipa::path(
    get,
    path = "/api/drones/serial/{serial}",
    tag = DRONE_TAG,
    params(("serial" = String, Path, description = "Drone serial number")),
    responses(
        (status = 200, description = "Drone found", body = ApiResponse<DroneDto>),
        (status = 404, description = "No drone with this serial", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_drone_by_serial(
    State(state): State<AppState>,
    AppPath(serial): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let drone = DroneService::new(&state.db).get_by_serial(&serial).await?;

    Ok(ok("Drone retrieved", drone.into_dto()))
}

#[utoipa::path(
    get,
    path = "/api/drones/{id}",
    tag = DRONE_TAG,
    params(("id" = i32, Path, description = "Drone ID")),
    responses(
        (status = 200, description = "Drone found", body = ApiResponse<DroneDto>),
        (status = 404, description = "Drone not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_drone(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let drone = DroneService::new(&state.db).get_by_id(id).await?;

    Ok(ok("Drone retrieved", drone.into_dto()))
}

/// Update a drone.
///
/// Absent fields are left unchanged. A `status` field is checked against the same
/// transition table as the status endpoint and archived the same way.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `id` - Drone ID
/// - `payload` - Fields to change
///
/// # Returns
/// - `200 OK` - The updated drone
/// - `400 Bad Request` - Invalid field or disallowed status transition
/// - `404 Not Found` - Drone not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/drones/{id}",
    tag = DRONE_TAG,
    params(("id" = i32, Path, description = "Drone ID")),
    request_body = UpdateDroneDto,
    responses(
        (status = 200, description = "Drone updated", body = ApiResponse<DroneDto>),
        (status = 400, description = "Invalid update", body = ErrorDto),
        (status = 404, description = "Drone not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_drone(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateDroneDto>,
) -> Result<impl IntoResponse, AppError> {
    let (params, status) = UpdateDroneParams::from_dto(payload);

    let drone = DroneService::new(&state.db)
        .update(id, params, status)
        .await?;

    Ok(ok("Drone updated", drone.into_dto()))
}

/// Change a drone's status.
///
/// Allowed changes are written together with a status archive row. Requesting the
/// current status changes nothing.
///
/// # Returns
/// - `200 OK` - The drone with its new status
/// - `400 Bad Request` - Transition not allowed from the current status
/// - `404 Not Found` - Drone not found
#[utoipa::path(
    put,
    path = "/api/drones/{id}/status",
    tag = DRONE_TAG,
    params(("id" = i32, Path, description = "Drone ID")),
    request_body = UpdateDroneStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<DroneDto>),
        (status = 400, description = "Transition not allowed", body = ErrorDto),
        (status = 404, description = "Drone not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_drone_status(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateDroneStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let drone = DroneService::new(&state.db)
        .update_status(DroneStatusChange {
            drone_id: id,
            status: payload.status,
            reason: payload.reason,
            changed_by: payload.changed_by,
        })
        .await?;

    Ok(ok("Drone status updated", drone.into_dto()))
}

/// Delete a drone.
///
/// Its history, positions, commands, queue entries and live status go with it.
#[utoipa::path(
    delete,
    path = "/api/drones/{id}",
    tag = DRONE_TAG,
    params(("id" = i32, Path, description = "Drone ID")),
    responses(
        (status = 200, description = "Drone deleted", body = ApiResponse<DeletedDto>),
        (status = 404, description = "Drone not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_drone(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    DroneService::new(&state.db).delete(id).await?;

    Ok(ok("Drone deleted", DeletedDto { id }))
}
