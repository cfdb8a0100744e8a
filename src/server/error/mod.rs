//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into enveloped HTTP responses. The `AppError` enum serves as the
//! top-level error type that wraps domain-specific errors and implements `IntoResponse`
//! for automatic error handling in API endpoints.

pub mod config;
pub mod internal;
pub mod transition;
pub mod validation;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        config::ConfigError, internal::InternalError, transition::TransitionError,
        validation::ValidationError,
    },
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Most variants use `#[from]` for automatic
/// error conversion.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    ///
    /// Always results in 500 Internal Server Error as configuration issues
    /// prevent normal application operation.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    ///
    /// Constraint violations are mapped to client errors: unique violations to
    /// 409 Conflict and foreign key violations to 400 Bad Request. A missing record
    /// maps to 404. Anything else is a 500 with details logged server-side.
    #[error(transparent)]
    DbErr(#[from] DbErr),

    /// Cron scheduler error.
    ///
    /// Results in 500 Internal Server Error when scheduled job operations fail.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Socket or listener failure while binding or serving.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Unexpected internal state.
    ///
    /// Results in 500 Internal Server Error with a generic message.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Field-level validation failure. Results in 400 Bad Request.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Disallowed status transition. Results in 400 Bad Request.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// Malformed JSON body. Results in 400 Bad Request.
    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),

    /// Malformed query string. Results in 400 Bad Request.
    #[error(transparent)]
    QueryRejection(#[from] QueryRejection),

    /// Malformed path parameter. Results in 400 Bad Request.
    #[error(transparent)]
    PathRejection(#[from] PathRejection),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    BadRequest(String),

    /// Duplicate resource error.
    ///
    /// Results in 409 Conflict with the provided error message.
    #[error("{0}")]
    Conflict(String),

    /// Internal server error with custom message.
    ///
    /// Results in 500 Internal Server Error. The provided message is logged
    /// but a generic message is returned to the client.
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    /// HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::Transition(_)
            | Self::JsonRejection(_)
            | Self::QueryRejection(_)
            | Self::PathRejection(_)
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::DbErr(err) => db_err_status(err),
            Self::ConfigErr(_)
            | Self::SchedulerErr(_)
            | Self::IoErr(_)
            | Self::InternalErr(_)
            | Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl AppError {
    /// Message safe to show a client.
    ///
    /// Server errors collapse to a generic message; their details only go to the log.
    pub fn client_message(&self) -> String {
        if self.status_code().is_server_error() {
            return "Internal server error".to_string();
        }

        match self {
            Self::DbErr(err) => db_err_message(err),
            Self::JsonRejection(rejection) => rejection.body_text(),
            Self::QueryRejection(rejection) => rejection.body_text(),
            Self::PathRejection(rejection) => rejection.body_text(),
            err => err.to_string(),
        }
    }
}

fn db_err_status(err: &DbErr) -> StatusCode {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StatusCode::CONFLICT,
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => StatusCode::BAD_REQUEST,
        _ => match err {
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

fn db_err_message(err: &DbErr) -> String {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => "Resource already exists".to_string(),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            "Referenced resource does not exist".to_string()
        }
        _ => match err {
            DbErr::RecordNotFound(msg) => msg.clone(),
            _ => "Resource not found".to_string(),
        },
    }
}

/// Converts application errors into enveloped HTTP responses.
///
/// Client errors carry their message. Server errors are logged with full details but
/// return a generic message to avoid information leakage.
///
/// # Returns
/// - 400 Bad Request - Validation, transition, rejection and `BadRequest` variants
/// - 404 Not Found - `NotFound` and missing records
/// - 409 Conflict - `Conflict` and unique constraint violations
/// - 500 Internal Server Error - For all other error types
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            return InternalServerError(self).into_response();
        }

        let message = self.client_message();

        tracing::debug!(status = status.as_u16(), "{}", message);

        (status, Json(ErrorDto::new(status.as_u16(), message))).into_response()
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// This struct logs the error message and returns a generic "Internal server error" message
/// to the client to avoid leaking implementation details. Used as a fallback for errors that
/// don't have specific HTTP response mappings.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        let status = StatusCode::INTERNAL_SERVER_ERROR;
        (
            status,
            Json(ErrorDto::new(status.as_u16(), "Internal server error")),
        )
            .into_response()
    }
}
