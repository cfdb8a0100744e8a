use axum::{extract::State, response::IntoResponse};

use crate::{
    model::{
        api::{ApiResponse, BatchResultDto, DeletedDto, ErrorDto},
        drone_command::{
            CreateDroneCommandDto, DroneCommandDto, DroneCommandFilterQuery,
            DroneCommandStatisticsDto, UpdateCommandStatusDto, UpdateDroneCommandDto,
        },
        pagination::{PaginatedDto, PaginationQuery},
    },
    server::{
        data::drone_command::SORTABLE_COLUMNS,
        error::AppError,
        model::{
            drone_command::{CreateDroneCommandParams, DroneCommandFilter},
            pagination::PageRequest,
        },
        service::drone_command::DroneCommandService,
        state::AppState,
        util::{
            extract::{AppJson, AppPath, AppQuery},
            response::{batch, created, ok},
        },
    },
};

pub static COMMAND_TAG: &str = "drone-commands";

/// Issue a command to a drone.
///
/// `command_data` is checked against what the command type needs: `fly_to` takes a
/// target latitude, longitude and altitude, `takeoff` an optional altitude, moves a
/// `distance` and rotations `degrees`.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `payload` - Target drone, command type and payload
///
/// # Returns
/// - `201 Created` - The pending command
/// - `400 Bad Request` - Unknown command type or invalid payload
/// - `404 Not Found` - Drone not found
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/drone-commands",
    tag = COMMAND_TAG,
    request_body = CreateDroneCommandDto,
    responses(
        (status = 201, description = "Command issued", body = ApiResponse<DroneCommandDto>),
        (status = 400, description = "Invalid command", body = ErrorDto),
        (status = 404, description = "Drone not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_command(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateDroneCommandDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = CreateDroneCommandParams::from_dto(payload)?;

    let command = DroneCommandService::new(&state.db).create(params).await?;

    Ok(created("Command issued", command.into_dto()))
}

#[utoipa::path(
    post,
    path = "/api/drone-commands/batch",
    tag = COMMAND_TAG,
    request_body = Vec<CreateDroneCommandDto>,
    responses(
        (status = 201, description = "All commands issued", body = ApiResponse<BatchResultDto<DroneCommandDto>>),
        (status = 207, description = "Some commands rejected", body = ApiResponse<BatchResultDto<DroneCommandDto>>),
        (status = 400, description = "All commands rejected", body = ApiResponse<BatchResultDto<DroneCommandDto>>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_commands_batch(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Vec<CreateDroneCommandDto>>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = DroneCommandService::new(&state.db)
        .create_batch(payload)
        .await?;

    Ok(batch(outcome.into_dto(|c| c.into_dto())))
}

/// List commands.
///
/// Filterable by drone, status and command type; searches command type and error text.
#[utoipa::path(
    get,
    path = "/api/drone-commands",
    tag = COMMAND_TAG,
    params(PaginationQuery, DroneCommandFilterQuery),
    responses(
        (status = 200, description = "Page of commands", body = ApiResponse<PaginatedDto<DroneCommandDto>>),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_commands(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaginationQuery>,
    AppQuery(filter): AppQuery<DroneCommandFilterQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest::from_query(query, SORTABLE_COLUMNS)?;
    let filter = DroneCommandFilter {
        drone_id: filter.drone_id,
        status: filter.status,
        command_type: filter.command_type,
    };

    let commands = DroneCommandService::new(&state.db)
        .get_paginated(&filter, &page)
        .await?;

    Ok(ok("Commands retrieved", commands.into_dto(|c| c.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/drone-commands/statistics",
    tag = COMMAND_TAG,
    responses(
        (status = 200, description = "Command counts per status and type", body = ApiResponse<DroneCommandStatisticsDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_command_statistics(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let statistics = DroneCommandService::new(&state.db).statistics().await?;

    Ok(ok("Command statistics retrieved", statistics.into_dto()))
}

/// Get every command issued to a drone, newest first.
#[utoipa::path(
    get,
    path = "/api/drone-commands/drone/{drone_id}",
    tag = COMMAND_TAG,
    params(("drone_id" = i32, Path, description = "Drone ID")),
    responses(
        (status = 200, description = "Commands of the drone", body = ApiResponse<Vec<DroneCommandDto>>),
        (status = 404, description = "Drone not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_commands_by_drone(
    State(state): State<AppState>,
    AppPath(drone_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let commands = DroneCommandService::new(&state.db)
        .get_by_drone(drone_id)
        .await?;

    Ok(ok(
        "Commands retrieved",
        commands.into_iter().map(|c| c.into_dto()).collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/drone-commands/{id}",
    tag = COMMAND_TAG,
    params(("id" = i32, Path, description = "Command ID")),
    responses(
        (status = 200, description = "Command found", body = ApiResponse<DroneCommandDto>),
        (status = 404, description = "Command not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_command(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let command = DroneCommandService::new(&state.db).get_by_id(id).await?;

    Ok(ok("Command retrieved", command.into_dto()))
}

/// Replace the payload of a pending command.
#[utoipa::path(
    put,
    path = "/api/drone-commands/{id}",
    tag = COMMAND_TAG,
    params(("id" = i32, Path, description = "Command ID")),
    request_body = UpdateDroneCommandDto,
    responses(
        (status = 200, description = "Command updated", body = ApiResponse<DroneCommandDto>),
        (status = 400, description = "Command no longer pending or invalid payload", body = ErrorDto),
        (status = 404, description = "Command not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_command(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateDroneCommandDto>,
) -> Result<impl IntoResponse, AppError> {
    let command = DroneCommandService::new(&state.db)
        .update_data(id, payload.command_data)
        .await?;

    Ok(ok("Command updated", command.into_dto()))
}

/// Move a command to a new status.
///
/// pending may become executing, cancelled or failed; executing may become completed or
/// failed. Finished commands do not change.
#[utoipa::path(
    put,
    path = "/api/drone-commands/{id}/status",
    tag = COMMAND_TAG,
    params(("id" = i32, Path, description = "Command ID")),
    request_body = UpdateCommandStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<DroneCommandDto>),
        (status = 400, description = "Transition not allowed", body = ErrorDto),
        (status = 404, description = "Command not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_command_status(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateCommandStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let command = DroneCommandService::new(&state.db)
        .update_status(id, payload.status, payload.error_message)
        .await?;

    Ok(ok("Command status updated", command.into_dto()))
}

#[utoipa::path(
    delete,
    path = "/api/drone-commands/{id}",
    tag = COMMAND_TAG,
    params(("id" = i32, Path, description = "Command ID")),
    responses(
        (status = 200, description = "Command deleted", body = ApiResponse<DeletedDto>),
        (status = 400, description = "Command is executing", body = ErrorDto),
        (status = 404, description = "Command not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_command(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    DroneCommandService::new(&state.db).delete(id).await?;

    Ok(ok("Command deleted", DeletedDto { id }))
}
