//! Response types for the payroll API.
//!
//! This module defines the error body returned by every endpoint, the
//! mapping from [`PayrollError`] to HTTP status codes, and the summary
//! bodies returned by the attendance, leave and team endpoints.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::PayrollError;
use crate::models::{AttendanceRecord, EmployeeId, LeaveRequest, LeaveRequestId};

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
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        let message = error.to_string();
        match error {
            PayrollError::DuplicateIdentifier { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("DUPLICATE_IDENTIFIER", message),
            },
            PayrollError::EmployeeNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("EMPLOYEE_NOT_FOUND", message),
            },
            PayrollError::InvalidLeaveRange { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_LEAVE_RANGE",
                    message,
                    "The end date must be on or after the start date",
                ),
            ),
            PayrollError::InvalidEmployee { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_EMPLOYEE",
                    message,
                    "The employee data contains invalid information",
                ),
            ),
            PayrollError::InvalidPayPeriod { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_PAY_PERIOD",
                    message,
                    "The month must be between 1 and 12",
                ),
            ),
            PayrollError::NotAManager { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("NOT_A_MANAGER", message))
            }
            PayrollError::CapabilityMissing { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("CAPABILITY_MISSING", message))
            }
            PayrollError::PersistenceFailure { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "PERSISTENCE_FAILURE",
                    "Failed to save employee data",
                    message,
                ),
            },
            PayrollError::ConfigNotFound { .. } | PayrollError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
        }
    }
}

/// Attendance summary for one employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// The employee.
    pub employee_id: EmployeeId,
    /// Days marked present.
    pub present_days: usize,
    /// Days marked absent.
    pub absent_days: usize,
    /// Every record, ordered by date.
    pub records: Vec<AttendanceRecord>,
}

/// Leave summary for one employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveSummary {
    /// The employee.
    pub employee_id: EmployeeId,
    /// Remaining days under the annual allowance.
    pub available_balance: i64,
    /// Every request in filing order.
    pub requests: Vec<LeaveRequest>,
}

/// Outcome of approving or rejecting a leave request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveDecision {
    /// The employee.
    pub employee_id: EmployeeId,
    /// The request acted on.
    pub request_id: LeaveRequestId,
    /// False when no request had this identifier.
    pub changed: bool,
    /// Remaining days after the decision.
    pub available_balance: i64,
}

/// A manager's team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamResponse {
    /// The manager.
    pub manager_id: EmployeeId,
    /// Direct reports in identifier order.
    pub subordinates: Vec<EmployeeId>,
}
