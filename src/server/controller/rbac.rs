use axum::{extract::State, response::IntoResponse};

use crate::{
    model::{
        api::{ApiResponse, DeletedDto, ErrorDto},
        pagination::{PaginatedDto, PaginationQuery},
        rbac::{
            AssignPermissionDto, AssignRoleDto, CreatePermissionDto, CreateRoleDto,
            CreateUserDto, PermissionCheckDto, PermissionCheckQuery, PermissionDto, RoleDto,
            UpdatePermissionDto, UpdateRoleDto, UpdateUserDto, UserDto, UserFilterQuery,
        },
    },
    server::{
        data::rbac::{permission, role, user},
        error::AppError,
        model::{
            pagination::PageRequest,
            rbac::{
                CreatePermissionParams, CreateRoleParams, CreateUserParams, Permission, Role,
                UpdatePermissionParams, UpdateRoleParams, UpdateUserParams, UserFilter,
            },
        },
        service::rbac::{
            assignment::AssignmentService, permission::PermissionService, role::RoleService,
            user::UserService,
        },
        state::AppState,
        util::{
            extract::{AppJson, AppPath, AppQuery},
            response::{created, ok},
        },
    },
};

pub static RBAC_TAG: &str = "rbac";

fn role_dtos(roles: Vec<Role>) -> Vec<RoleDto> {
    roles.into_iter().map(|r| r.into_dto()).collect()
}

fn permission_dtos(permissions: Vec<Permission>) -> Vec<PermissionDto> {
    permissions.into_iter().map(|p| p.into_dto()).collect()
}

/// Create a user.
///
/// Usernames are 3 to 50 characters of letters, digits, `_`, `.` and `-`.
///
/// # Returns
/// - `201 Created` - The new user
/// - `400 Bad Request` - Invalid username or email
/// - `409 Conflict` - Username or email already taken
#[utoipa::path(
    post,
    path = "/api/rbac/users",
    tag = RBAC_TAG,
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid user", body = ErrorDto),
        (status = 409, description = "Username or email taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::new(&state.db)
        .create(CreateUserParams::from_dto(payload))
        .await?;

    Ok(created("User created", user.into_dto()))
}

#[utoipa::path(
    get,
    path = "/api/rbac/users",
    tag = RBAC_TAG,
    params(PaginationQuery, UserFilterQuery),
    responses(
        (status = 200, description = "Page of users", body = ApiResponse<PaginatedDto<UserDto>>),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_users(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaginationQuery>,
    AppQuery(filter): AppQuery<UserFilterQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest::from_query(query, user::SORTABLE_COLUMNS)?;
    let filter = UserFilter {
        is_active: filter.is_active,
    };

    let users = UserService::new(&state.db)
        .get_paginated(&filter, &page)
        .await?;

    Ok(ok("Users retrieved", users.into_dto(|u| u.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/rbac/users/{id}",
    tag = RBAC_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = ApiResponse<UserDto>),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::new(&state.db).get_by_id(id).await?;

    Ok(ok("User retrieved", user.into_dto()))
}

#[utoipa::path(
    put,
    path = "/api/rbac/users/{id}",
    tag = RBAC_TAG,
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 400, description = "Invalid user", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 409, description = "Username or email taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::new(&state.db)
        .update(id, UpdateUserParams::from_dto(payload))
        .await?;

    Ok(ok("User updated", user.into_dto()))
}

/// Delete a user along with their role assignments and preferences.
#[utoipa::path(
    delete,
    path = "/api/rbac/users/{id}",
    tag = RBAC_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<DeletedDto>),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    UserService::new(&state.db).delete(id).await?;

    Ok(ok("User deleted", DeletedDto { id }))
}

#[utoipa::path(
    post,
    path = "/api/rbac/roles",
    tag = RBAC_TAG,
    request_body = CreateRoleDto,
    responses(
        (status = 201, description = "Role created", body = ApiResponse<RoleDto>),
        (status = 400, description = "Invalid role", body = ErrorDto),
        (status = 409, description = "Role name taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_role(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let role = RoleService::new(&state.db)
        .create(CreateRoleParams::from_dto(payload))
        .await?;

    Ok(created("Role created", role.into_dto()))
}

#[utoipa::path(
    get,
    path = "/api/rbac/roles",
    tag = RBAC_TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of roles", body = ApiResponse<PaginatedDto<RoleDto>>),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_roles(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest::from_query(query, role::SORTABLE_COLUMNS)?;

    let roles = RoleService::new(&state.db).get_paginated(&page).await?;

    Ok(ok("Roles retrieved", roles.into_dto(|r| r.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/rbac/roles/{id}",
    tag = RBAC_TAG,
    params(("id" = i32, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role found", body = ApiResponse<RoleDto>),
        (status = 404, description = "Role not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_role(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let role = RoleService::new(&state.db).get_by_id(id).await?;

    Ok(ok("Role retrieved", role.into_dto()))
}

#[utoipa::path(
    put,
    path = "/api/rbac/roles/{id}",
    tag = RBAC_TAG,
    params(("id" = i32, Path, description = "Role ID")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Role updated", body = ApiResponse<RoleDto>),
        (status = 400, description = "Invalid role", body = ErrorDto),
        (status = 404, description = "Role not found", body = ErrorDto),
        (status = 409, description = "Role name taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_role(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let role = RoleService::new(&state.db)
        .update(id, UpdateRoleParams::from_dto(payload))
        .await?;

    Ok(ok("Role updated", role.into_dto()))
}

#[utoipa::path(
    delete,
    path = "/api/rbac/roles/{id}",
    tag = RBAC_TAG,
    params(("id" = i32, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role deleted", body = ApiResponse<DeletedDto>),
        (status = 404, description = "Role not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_role(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    RoleService::new(&state.db).delete(id).await?;

    Ok(ok("Role deleted", DeletedDto { id }))
}

/// Create a permission.
///
/// Names take the `resource:action` form, e.g. `drone:write`.
#[utoipa::path(
    post,
    path = "/api/rbac/permissions",
    tag = RBAC_TAG,
    request_body = CreatePermissionDto,
    responses(
        (status = 201, description = "Permission created", body = ApiResponse<PermissionDto>),
        (status = 400, description = "Invalid permission name", body = ErrorDto),
        (status = 409, description = "Permission name taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_permission(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreatePermissionDto>,
) -> Result<impl IntoResponse, AppError> {
    let permission = PermissionService::new(&state.db)
        .create(CreatePermissionParams::from_dto(payload))
        .await?;

    Ok(created("Permission created", permission.into_dto()))
}

#[utoipa::path(
    get,
    path = "/api/rbac/permissions",
    tag = RBAC_TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of permissions", body = ApiResponse<PaginatedDto<PermissionDto>>),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_permissions(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = PageRequest::from_query(query, permission::SORTABLE_COLUMNS)?;

    let permissions = PermissionService::new(&state.db)
        .get_paginated(&page)
        .await?;

    Ok(ok("Permissions retrieved", permissions.into_dto(|p| p.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/rbac/permissions/{id}",
    tag = RBAC_TAG,
    params(("id" = i32, Path, description = "Permission ID")),
    responses(
        (status = 200, description = "Permission found", body = ApiResponse<PermissionDto>),
        (status = 404, description = "Permission not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_permission(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let permission = PermissionService::new(&state.db).get_by_id(id).await?;

    Ok(ok("Permission retrieved", permission.into_dto()))
}

#[utoipa::path(
    put,
    path = "/api/rbac/permissions/{id}",
    tag = RBAC_TAG,
    params(("id" = i32, Path, description = "Permission ID")),
    request_body = UpdatePermissionDto,
    responses(
        (status = 200, description = "Permission updated", body = ApiResponse<PermissionDto>),
        (status = 400, description = "Invalid permission name", body = ErrorDto),
        (status = 404, description = "Permission not found", body = ErrorDto),
        (status = 409, description = "Permission name taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_permission(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<UpdatePermissionDto>,
) -> Result<impl IntoResponse, AppError> {
    let permission = PermissionService::new(&state.db)
        .update(id, UpdatePermissionParams::from_dto(payload))
        .await?;

    Ok(ok("Permission updated", permission.into_dto()))
}

#[utoipa::path(
    delete,
    path = "/api/rbac/permissions/{id}",
    tag = RBAC_TAG,
    params(("id" = i32, Path, description = "Permission ID")),
    responses(
        (status = 200, description = "Permission deleted", body = ApiResponse<DeletedDto>),
        (status = 404, description = "Permission not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_permission(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    PermissionService::new(&state.db).delete(id).await?;

    Ok(ok("Permission deleted", DeletedDto { id }))
}

/// Assign a role to a user.
///
/// # Returns
/// - `201 Created` - Every role the user now holds
/// - `404 Not Found` - User or role not found
/// - `409 Conflict` - The user already holds the role
#[utoipa::path(
    post,
    path = "/api/rbac/users/{id}/roles",
    tag = RBAC_TAG,
    params(("id" = i32, Path, description = "User ID")),
    request_body = AssignRoleDto,
    responses(
        (status = 201, description = "Role assigned", body = ApiResponse<Vec<RoleDto>>),
        (status = 404, description = "User or role not found", body = ErrorDto),
        (status = 409, description = "Role already assigned", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn assign_role(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i32>,
    AppJson(payload): AppJson<AssignRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AssignmentService::new(&state.db);
    service.assign_role(user_id, payload.role_id).await?;
    let roles = service.get_user_roles(user_id).await?;

    Ok(created("Role assigned", role_dtos(roles)))
}

#[utoipa::path(
    get,
    path = "/api/rbac/users/{id}/roles",
    tag = RBAC_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Roles of the user", body = ApiResponse<Vec<RoleDto>>),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_roles(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let roles = AssignmentService::new(&state.db)
        .get_user_roles(user_id)
        .await?;

    Ok(ok("User roles retrieved", role_dtos(roles)))
}

#[utoipa::path(
    delete,
    path = "/api/rbac/users/{id}/roles/{role_id}",
    tag = RBAC_TAG,
    params(
        ("id" = i32, Path, description = "User ID"),
        ("role_id" = i32, Path, description = "Role ID")
    ),
    responses(
        (status = 200, description = "Role removed, remaining roles returned", body = ApiResponse<Vec<RoleDto>>),
        (status = 404, description = "Assignment not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_role(
    State(state): State<AppState>,
    AppPath((user_id, role_id)): AppPath<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let service = AssignmentService::new(&state.db);
    service.remove_role(user_id, role_id).await?;
    let roles = service.get_user_roles(user_id).await?;

    Ok(ok("Role removed", role_dtos(roles)))
}

#[utoipa::path(
    post,
    path = "/api/rbac/roles/{id}/permissions",
    tag = RBAC_TAG,
    params(("id" = i32, Path, description = "Role ID")),
    request_body = AssignPermissionDto,
    responses(
        (status = 201, description = "Permission granted", body = ApiResponse<Vec<PermissionDto>>),
        (status = 404, description = "Role or permission not found", body = ErrorDto),
        (status = 409, description = "Permission already granted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn assign_permission(
    State(state): State<AppState>,
    AppPath(role_id): AppPath<i32>,
    AppJson(payload): AppJson<AssignPermissionDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = AssignmentService::new(&state.db);
    service
        .assign_permission(role_id, payload.permission_id)
        .await?;
    let permissions = service.get_role_permissions(role_id).await?;

    Ok(created("Permission granted", permission_dtos(permissions)))
}

#[utoipa::path(
    get,
    path = "/api/rbac/roles/{id}/permissions",
    tag = RBAC_TAG,
    params(("id" = i32, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Permissions of the role", body = ApiResponse<Vec<PermissionDto>>),
        (status = 404, description = "Role not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_role_permissions(
    State(state): State<AppState>,
    AppPath(role_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let permissions = AssignmentService::new(&state.db)
        .get_role_permissions(role_id)
        .await?;

    Ok(ok("Role permissions retrieved", permission_dtos(permissions)))
}

#[utoipa::path(
    delete,
    path = "/api/rbac/roles/{id}/permissions/{permission_id}",
    tag = RBAC_TAG,
    params(
        ("id" = i32, Path, description = "Role ID"),
        ("permission_id" = i32, Path, description = "Permission ID")
    ),
    responses(
        (status = 200, description = "Permission revoked, remaining permissions returned", body = ApiResponse<Vec<PermissionDto>>),
        (status = 404, description = "Grant not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_permission(
    State(state): State<AppState>,
    AppPath((role_id, permission_id)): AppPath<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let service = AssignmentService::new(&state.db);
    service.remove_permission(role_id, permission_id).await?;
    let permissions = service.get_role_permissions(role_id).await?;

    Ok(ok("Permission revoked", permission_dtos(permissions)))
}

/// Every distinct permission granted to a user through their roles.
#[utoipa::path(
    get,
    path = "/api/rbac/users/{id}/permissions",
    tag = RBAC_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Effective permissions", body = ApiResponse<Vec<PermissionDto>>),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_permissions(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let permissions = AssignmentService::new(&state.db)
        .get_user_permissions(user_id)
        .await?;

    Ok(ok("User permissions retrieved", permission_dtos(permissions)))
}

/// Check whether a user holds a permission.
///
/// Inactive users hold none.
#[utoipa::path(
    get,
    path = "/api/rbac/users/{id}/permissions/check",
    tag = RBAC_TAG,
    params(("id" = i32, Path, description = "User ID"), PermissionCheckQuery),
    responses(
        (status = 200, description = "Check result", body = ApiResponse<PermissionCheckDto>),
        (status = 400, description = "Malformed permission name", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_user_permission(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i32>,
    AppQuery(query): AppQuery<PermissionCheckQuery>,
) -> Result<impl IntoResponse, AppError> {
    let granted = AssignmentService::new(&state.db)
        .check_user_permission(user_id, &query.permission)
        .await?;

    Ok(ok(
        "Permission checked",
        PermissionCheckDto {
            user_id,
            permission: query.permission,
            granted,
        },
    ))
}
