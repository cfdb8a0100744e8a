pub mod assignment;
pub mod permission;
pub mod role;
pub mod user;

use crate::server::error::AppError;

pub(crate) fn user_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("User {} not found", id))
}

pub(crate) fn role_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Role {} not found", id))
}

pub(crate) fn permission_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Permission {} not found", id))
}
