use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    config::Config,
    controller::{
        archive, command_queue, drone, drone_command, drone_position, drone_status_archive,
        rbac, real_time_status, system, user_preference,
    },
    startup,
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AIOT Backend",
        description = "Drone fleet management: registry, telemetry, commands, archiving and access control"
    ),
    tags(
        (name = "drones", description = "Drone registry and lifecycle status"),
        (name = "drone-status-archive", description = "History of drone status changes"),
        (name = "drone-realtime-status", description = "Latest telemetry snapshot per drone"),
        (name = "drone-positions", description = "Position reports"),
        (name = "drone-commands", description = "Commands issued to drones"),
        (name = "command-queue", description = "Prioritized command queue"),
        (name = "archive", description = "Archive tasks and archived rows"),
        (name = "rbac", description = "Users, roles and permissions"),
        (name = "user-preferences", description = "Per-user preferences"),
        (name = "system", description = "Health and service information")
    )
)]
pub struct ApiDoc;

fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(system::health))
        .routes(routes!(system::info))
        // drones
        .routes(routes!(drone::create_drone, drone::list_drones))
        .routes(routes!(drone::get_drone_statistics))
        .routes(routes!(drone::get_drone_by_serial))
        .routes(routes!(drone::get_drone, drone::update_drone, drone::delete_drone))
        .routes(routes!(drone::update_drone_status))
        .routes(routes!(drone_status_archive::list_status_archive))
        .routes(routes!(drone_status_archive::get_status_archive))
        .routes(routes!(drone_status_archive::get_status_archive_by_drone))
        .routes(routes!(real_time_status::list_real_time_status))
        .routes(routes!(real_time_status::mark_offline_stale))
        .routes(routes!(
            real_time_status::get_real_time_status,
            real_time_status::upsert_real_time_status,
            real_time_status::delete_real_time_status
        ))
        // positions
        .routes(routes!(
            drone_position::create_position,
            drone_position::list_positions
        ))
        .routes(routes!(drone_position::create_positions_batch))
        .routes(routes!(drone_position::get_latest_position))
        .routes(routes!(
            drone_position::get_position,
            drone_position::update_position,
            drone_position::delete_position
        ))
        // commands
        .routes(routes!(
            drone_command::create_command,
            drone_command::list_commands
        ))
        .routes(routes!(drone_command::create_commands_batch))
        .routes(routes!(drone_command::get_command_statistics))
        .routes(routes!(drone_command::get_commands_by_drone))
        .routes(routes!(
            drone_command::get_command,
            drone_command::update_command,
            drone_command::delete_command
        ))
        .routes(routes!(drone_command::update_command_status))
        // queue
        .routes(routes!(
            command_queue::enqueue_command,
            command_queue::list_queue
        ))
        .routes(routes!(command_queue::get_queue_statistics))
        .routes(routes!(command_queue::get_queue_by_priority))
        .routes(routes!(command_queue::get_queue_by_drone))
        .routes(routes!(command_queue::dequeue_command))
        .routes(routes!(command_queue::cleanup_queue))
        .routes(routes!(command_queue::get_queue_entry))
        .routes(routes!(command_queue::mark_queue_executing))
        .routes(routes!(command_queue::complete_queue_entry))
        .routes(routes!(command_queue::fail_queue_entry))
        .routes(routes!(command_queue::cancel_queue_entry))
        // archive
        .routes(routes!(
            archive::create_archive_task,
            archive::list_archive_tasks
        ))
        .routes(routes!(
            archive::get_archive_task,
            archive::delete_archive_task
        ))
        .routes(routes!(archive::run_archive_task))
        .routes(routes!(archive::list_position_archives))
        .routes(routes!(archive::get_position_archive))
        .routes(routes!(archive::list_command_archives))
        .routes(routes!(archive::get_command_archive))
        // rbac
        .routes(routes!(rbac::create_user, rbac::list_users))
        .routes(routes!(rbac::get_user, rbac::update_user, rbac::delete_user))
        .routes(routes!(rbac::create_role, rbac::list_roles))
        .routes(routes!(rbac::get_role, rbac::update_role, rbac::delete_role))
        .routes(routes!(rbac::create_permission, rbac::list_permissions))
        .routes(routes!(
            rbac::get_permission,
            rbac::update_permission,
            rbac::delete_permission
        ))
        .routes(routes!(rbac::assign_role, rbac::get_user_roles))
        .routes(routes!(rbac::remove_role))
        .routes(routes!(
            rbac::assign_permission,
            rbac::get_role_permissions
        ))
        .routes(routes!(rbac::remove_permission))
        .routes(routes!(rbac::get_user_permissions))
        .routes(routes!(rbac::check_user_permission))
        // preferences
        .routes(routes!(
            user_preference::create_preference,
            user_preference::list_preferences
        ))
        .routes(routes!(user_preference::create_preferences_batch))
        .routes(routes!(
            user_preference::get_preference_by_user,
            user_preference::upsert_preference_by_user
        ))
        .routes(routes!(
            user_preference::get_preference,
            user_preference::update_preference,
            user_preference::delete_preference
        ))
}

/// Builds the full application router with docs, CORS and request tracing.
pub fn router(state: AppState, config: &Config) -> Router {
    let (router, api) = api_routes().split_for_parts();

    router
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
        .layer(startup::cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
