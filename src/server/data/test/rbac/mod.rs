use super::{first_page, page_of};
use crate::server::{
    data::rbac::{
        permission::PermissionRepository,
        role::{self, RoleRepository},
        role_permission::RolePermissionRepository,
        user::{UserRepository, SORTABLE_COLUMNS as USER_COLUMNS},
        user_role::UserRoleRepository,
    },
    model::rbac::{CreateUserParams, UpdateUserParams, UserFilter},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod assignment;
mod permission_lookup;
mod user;
