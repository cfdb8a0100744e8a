use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    model::{
        api::ApiResponse,
        system::{HealthDto, InfoDto},
    },
    server::{
        service::system::SystemService,
        state::AppState,
        util::response::{ok, respond},
    },
};

pub static SYSTEM_TAG: &str = "system";

/// Report service and database health.
///
/// # Returns
/// - `200 OK` - Database reachable
/// - `503 Service Unavailable` - Database ping failed
#[utoipa::path(
    get,
    path = "/api/health",
    tag = SYSTEM_TAG,
    responses(
        (status = 200, description = "Service healthy", body = ApiResponse<HealthDto>),
        (status = 503, description = "Database unreachable", body = ApiResponse<HealthDto>)
    ),
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let health = SystemService::new(&state.db).health().await;

    if health.database == "up" {
        ok("Service healthy", health)
    } else {
        respond(StatusCode::SERVICE_UNAVAILABLE, "Service unhealthy", health)
    }
}

#[utoipa::path(
    get,
    path = "/api/info",
    tag = SYSTEM_TAG,
    responses(
        (status = 200, description = "Service name, version and areas", body = ApiResponse<InfoDto>)
    ),
)]
pub async fn info(State(state): State<AppState>) -> impl IntoResponse {
    ok("Service info", SystemService::info(state.started_at))
}
