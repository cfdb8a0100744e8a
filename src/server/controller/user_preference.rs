use axum::{extract::State, response::IntoResponse};

use crate::{
    model::{
        api::{ApiResponse, BatchResultDto, DeletedDto, ErrorDto},
        pagination::{PaginatedDto, PaginationQuery},
        user_preference::{
            CreateUserPreferenceDto, UpdateUserPreferenceDto, UserPreferenceDto,
            UserPreferenceFilterQuery,
        },
    },
    server::{
        data::user_preference::SORTABLE_COLUMNS,
        error::AppError,
        model::{
            pagination::PageRequest,
            user_preference::{
                CreateUserPreferenceParams, UpdateUserPreferenceParams, UserPreferenceFilter,
            },
        },
        service::user_preference::UserPreferenceService,
        state::AppState,
        util::{
            extract::{AppJson, AppPath, AppQuery},
            response::{batch, created, ok},
        },
    },
};

pub static PREFERENCE_TAG: &str = "user-preferences";

/// Create preferences for a user.
///
/// Unset fields take the defaults: `auto` theme, `zh-TW`, `Asia/Taipei`, auto-save and
/// notifications on, email notifications off.
///
/// # Returns
/// - `201 Created` - The new preferences
/// - `400 Bad Request` - Unknown theme or malformed language/timezone
/// - `404 Not Found` - User not found
/// - `409 Conflict` - The user already has preferences
#[utoipa::path(
    post,
    path = "/api/user-preferences",
    tag = PREFERENCE_TAG,
    request_body = CreateUserPreferenceDto,
    responses(
        (status = 201, description = "Preferences created", body = ApiResponse<UserPreferenceDto>),
        (status = 400, description = "Invalid preferences", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 409, description = "Preferences already exist", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_preference(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUserPreferenceDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = CreateUserPreferenceParams::from_dto(payload)?;

    let preference = UserPreferenceService::new(&state.db).create(params).await?;

    Ok(created("Preferences created", preference.into_dto()))
}

#[utoipa::path(
    post,
    path = "/api/user-preferences/batch",
    tag = PREFERENCE_TAG,
    request_body = Vec<CreateUserPreferenceDto>,
    responses(
        (status = 201, description = "All preferences created", body = ApiResponse<BatchResultDto<UserPreferenceDto>>),
        (status = 207, description = "Some preferences rejected", body = ApiResponse<BatchResultDto<UserPreferenceDto>>),
        (status = 400, description = "All preferences rejected", body = ApiResponse<BatchResultDto<UserPreferenceDto>>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_preferences_batch(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Vec<CreateUserPreferenceDto>>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = UserPreferenceService::new(&state.db)
        .create_batch(payload)
        .await?;

    Ok(batch(outcome.into_dto(|p| p.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/user-preferences",
    tag = PREFERENCE_TAG,
    params(PaginationQuery, UserPreferenceFilterQuery),
    responses(
        (status = 200, description = "Page of preferences", body = ApiResponse<PaginatedDto<UserPreferenceDto>>),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_preferences(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaginationQuery>,
    AppQuery(filter): AppQuery<UserPreferenceFilterQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest::from_query(query, SORTABLE_COLUMNS)?;
    let filter = UserPreferenceFilter {
        theme: filter.theme,
        language: filter.language,
    };

    let preferences = UserPreferenceService::new(&state.db)
        .get_paginated(&filter, &page)
        .await?;

    Ok(ok("Preferences retrieved", preferences.into_dto(|p| p.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/user-preferences/user/{user_id}",
    tag = PREFERENCE_TAG,
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Preferences of the user", body = ApiResponse<UserPreferenceDto>),
        (status = 404, description = "No preferences for this user", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_preference_by_user(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let preference = UserPreferenceService::new(&state.db)
        .get_by_user(user_id)
        .await?;

    Ok(ok("Preferences retrieved", preference.into_dto()))
}

/// Update a user's preferences, creating them from defaults when missing.
///
/// # Returns
/// - `200 OK` - Existing preferences updated
/// - `201 Created` - Preferences created
/// - `400 Bad Request` - Invalid preferences
/// - `404 Not Found` - User not found
#[utoipa::path(
    put,
    path = "/api/user-preferences/user/{user_id}",
    tag = PREFERENCE_TAG,
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = UpdateUserPreferenceDto,
    responses(
        (status = 200, description = "Preferences updated", body = ApiResponse<UserPreferenceDto>),
        (status = 201, description = "Preferences created", body = ApiResponse<UserPreferenceDto>),
        (status = 400, description = "Invalid preferences", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upsert_preference_by_user(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateUserPreferenceDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = UpdateUserPreferenceParams::from_dto(payload)?;

    let (preference, was_created) = UserPreferenceService::new(&state.db)
        .upsert_by_user(user_id, params)
        .await?;

    if was_created {
        Ok(created("Preferences created", preference.into_dto()))
    } else {
        Ok(ok("Preferences updated", preference.into_dto()))
    }
}

#[utoipa::path(
    get,
    path = "/api/user-preferences/{id}",
    tag = PREFERENCE_TAG,
    params(("id" = i32, Path, description = "Preference ID")),
    responses(
        (status = 200, description = "Preferences found", body = ApiResponse<UserPreferenceDto>),
        (status = 404, description = "Preferences not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_preference(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let preference = UserPreferenceService::new(&state.db).get_by_id(id).await?;

    Ok(ok("Preferences retrieved", preference.into_dto()))
}

#[utoipa::path(
    put,
    path = "/api/user-preferences/{id}",
    tag = PREFERENCE_TAG,
    params(("id" = i32, Path, description = "Preference ID")),
    request_body = UpdateUserPreferenceDto,
    responses(
        (status = 200, description = "Preferences updated", body = ApiResponse<UserPreferenceDto>),
        (status = 400, description = "Invalid preferences", body = ErrorDto),
        (status = 404, description = "Preferences not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_preference(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateUserPreferenceDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = UpdateUserPreferenceParams::from_dto(payload)?;

    let preference = UserPreferenceService::new(&state.db)
        .update(id, params)
        .await?;

    Ok(ok("Preferences updated", preference.into_dto()))
}

#[utoipa::path(
    delete,
    path = "/api/user-preferences/{id}",
    tag = PREFERENCE_TAG,
    params(("id" = i32, Path, description = "Preference ID")),
    responses(
        (status = 200, description = "Preferences deleted", body = ApiResponse<DeletedDto>),
        (status = 404, description = "Preferences not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_preference(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    UserPreferenceService::new(&state.db).delete(id).await?;

    Ok(ok("Preferences deleted", DeletedDto { id }))
}
