//! HTTP API module for the payroll engine.
//!
//! This module exposes the directory over REST: employee management,
//! attendance, leave, manager teams, payslips and the payroll report.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AssignSubordinateRequest, AttendanceRequest, CompensationRequest, CreateEmployeeRequest,
    LeaveApplicationRequest, PeriodQuery, VariableHoursRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, AttendanceSummary, LeaveDecision, LeaveSummary, TeamResponse,
};
pub use state::AppState;
