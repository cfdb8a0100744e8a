use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::model::api::{ApiResponse, BatchResultDto};

/// Wraps `data` in the standard `{ status, message, data }` envelope.
pub fn respond<T: Serialize>(status: StatusCode, message: &str, data: T) -> Response {
    (status, Json(ApiResponse::new(status.as_u16(), message, data))).into_response()
}

/// 200 OK envelope.
pub fn ok<T: Serialize>(message: &str, data: T) -> Response {
    respond(StatusCode::OK, message, data)
}

/// 201 Created envelope.
pub fn created<T: Serialize>(message: &str, data: T) -> Response {
    respond(StatusCode::CREATED, message, data)
}

/// Status code for a batch create outcome.
///
/// 201 when every item succeeded, 207 Multi-Status when some failed and 400 when
/// none succeeded.
pub fn batch_status<T>(result: &BatchResultDto<T>) -> StatusCode {
    if result.failure_count == 0 {
        StatusCode::CREATED
    } else if result.success_count == 0 {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::MULTI_STATUS
    }
}

/// Enveloped batch response using `batch_status`.
pub fn batch<T: Serialize>(result: BatchResultDto<T>) -> Response {
    let status = batch_status(&result);
    let message = match status {
        StatusCode::CREATED => "All items created",
        StatusCode::MULTI_STATUS => "Some items failed",
        _ => "All items failed",
    };
    respond(status, message, result)
}
