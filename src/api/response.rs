//! Response types for the calendar API.
//!
//! This module defines the success payloads that are not engine types
//! themselves, the error response structure, and the single mapping from
//! [`CalendarError`] to HTTP status and error code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Response body for `POST /working-days/count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingDayCountResponse {
    /// The organization the count was computed for.
    pub organization_id: String,
    /// First day of the range (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the range (inclusive).
    pub end_date: NaiveDate,
    /// Calendar days in the range.
    pub calendar_days: u32,
    /// Working days in the range.
    pub working_days: u32,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<CalendarError> for ApiErrorResponse {
    fn from(error: CalendarError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            CalendarError::InvalidDate { .. } => (StatusCode::BAD_REQUEST, "INVALID_DATE"),
            CalendarError::InvalidRange { .. } => (StatusCode::BAD_REQUEST, "INVALID_RANGE"),
            CalendarError::RangeTooLong { .. } => (StatusCode::BAD_REQUEST, "RANGE_TOO_LONG"),
            CalendarError::OrganizationNotFound { .. } => {
                (StatusCode::NOT_FOUND, "ORGANIZATION_NOT_FOUND")
            }
            CalendarError::PolicyOverlap { .. } => (StatusCode::CONFLICT, "POLICY_OVERLAP"),
            CalendarError::AmbiguousScope { .. } => (StatusCode::CONFLICT, "AMBIGUOUS_SCOPE"),
            CalendarError::EmptyScope { .. } => (StatusCode::CONFLICT, "EMPTY_SCOPE"),
            CalendarError::InvalidPolicy { .. } => (StatusCode::CONFLICT, "INVALID_POLICY"),
            CalendarError::DuplicateRecord { .. } => (StatusCode::CONFLICT, "DUPLICATE_RECORD"),
            CalendarError::InvalidLeaveAllocation { .. } => {
                (StatusCode::CONFLICT, "INVALID_LEAVE_ALLOCATION")
            }
            CalendarError::ConfigNotFound { .. } | CalendarError::ConfigParseError { .. } => {
                return ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                };
            }
        };

        ApiErrorResponse {
            status,
            error: ApiError::new(code, message),
        }
    }
}
