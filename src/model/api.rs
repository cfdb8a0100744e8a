use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response envelope wrapped around every successful payload.
///
/// `status` mirrors the HTTP status code so clients that only look at the body still
/// see the outcome.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(status: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            status,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// Error body; same shape as `ApiResponse` with `data` always `null`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ErrorDto {
    pub status: u16,
    pub message: String,
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
}

impl ErrorDto {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
        }
    }
}

/// Payload returned by delete endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DeletedDto {
    pub id: i32,
}

/// One rejected item of a batch request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct BatchFailureDto {
    /// Zero-based position of the item in the submitted array.
    pub index: usize,
    pub error: String,
}

/// Outcome of a batch create: every item is attempted independently.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct BatchResultDto<T> {
    pub successful: Vec<T>,
    pub failed: Vec<BatchFailureDto>,
    pub total: usize,
    pub success_count: usize,
    pub failure_count: usize,
}

/// Returned when a string does not name any variant of one of the wire enums.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
