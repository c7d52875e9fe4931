//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints. Every
//! request is tagged with a correlation id that appears in its log lines.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post, put},
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::directory::PayrollDirectory;
use crate::error::PayrollError;
use crate::models::{Employee, EmployeeId, LeaveRequestId, PayPeriod, ProfileUpdate};

use super::request::{
    AssignSubordinateRequest, AttendanceRequest, CreateEmployeeRequest, LeaveApplicationRequest,
    PeriodQuery, VariableHoursRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, AttendanceSummary, LeaveDecision, LeaveSummary, TeamResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/:id", get(get_employee).delete(delete_employee))
        .route("/employees/:id/profile", patch(update_profile))
        .route("/employees/:id/hours", put(set_variable_hours))
        .route(
            "/employees/:id/subordinates",
            get(list_team).post(assign_subordinate),
        )
        .route(
            "/employees/:id/subordinates/:subordinate_id",
            delete(unassign_subordinate),
        )
        .route(
            "/employees/:id/attendance",
            get(get_attendance).post(mark_attendance),
        )
        .route("/employees/:id/leave", get(get_leave).post(request_leave))
        .route(
            "/employees/:id/leave/:request_id/approve",
            post(approve_leave),
        )
        .route("/employees/:id/leave/:request_id/reject", post(reject_leave))
        .route("/leave/pending", get(pending_leave))
        .route("/payslips/:id", get(get_payslip))
        .route("/reports/payroll", get(payroll_report))
        .with_state(state)
}

fn ok<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, Json(body)).into_response()
}

fn failure(correlation_id: Uuid, err: PayrollError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    ApiErrorResponse::from(err).into_response()
}

fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}

fn query_rejection(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %rejection,
        "Query string error"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
        .into_response()
}

fn resolve_period(query: &PeriodQuery) -> Result<(PayPeriod, NaiveDate), PayrollError> {
    let period = PayPeriod::new(query.month, query.year)?;
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
    Ok((period, as_of))
}

/// Handler for `GET /employees`.
async fn list_employees(State(state): State<AppState>) -> Response {
    let directory = state.read().await;
    ok(StatusCode::OK, directory.employees())
}

/// Handler for `POST /employees`.
async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create employee request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let employee: Employee = request.into();
    let created = employee.clone();
    match state.mutate(move |d| d.add(employee)).await {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %created.id(),
                category = created.category().label(),
                "Employee created"
            );
            ok(StatusCode::CREATED, created)
        }
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `GET /employees/:id`.
async fn get_employee(State(state): State<AppState>, Path(id): Path<u32>) -> Response {
    let id = EmployeeId::new(id);
    let directory = state.read().await;
    match directory.find(id) {
        Some(employee) => ok(StatusCode::OK, employee),
        None => failure(Uuid::new_v4(), PayrollError::EmployeeNotFound { id }),
    }
}

/// Handler for `DELETE /employees/:id`.
async fn delete_employee(State(state): State<AppState>, Path(id): Path<u32>) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = EmployeeId::new(id);

    match state
        .mutate(|d| d.remove(id).ok_or(PayrollError::EmployeeNotFound { id }))
        .await
    {
        Ok(removed) => {
            info!(correlation_id = %correlation_id, employee_id = %id, "Employee deleted");
            ok(StatusCode::OK, removed)
        }
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `PATCH /employees/:id/profile`.
async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let update = match payload {
        Ok(Json(update)) => update,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let id = EmployeeId::new(id);
    match state
        .mutate(|d| d.update_profile(id, update).cloned())
        .await
    {
        Ok(employee) => ok(StatusCode::OK, employee),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `PUT /employees/:id/hours`.
async fn set_variable_hours(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    payload: Result<Json<VariableHoursRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let id = EmployeeId::new(id);
    let result = state
        .mutate(|d| {
            d.set_variable_hours(id, request.hours)?;
            d.find(id)
                .cloned()
                .ok_or(PayrollError::EmployeeNotFound { id })
        })
        .await;

    match result {
        Ok(employee) => ok(StatusCode::OK, employee),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `GET /employees/:id/subordinates`.
async fn list_team(State(state): State<AppState>, Path(id): Path<u32>) -> Response {
    let manager_id = EmployeeId::new(id);
    let directory = state.read().await;
    match directory.team_members(manager_id) {
        Ok(team) => ok(
            StatusCode::OK,
            TeamResponse {
                manager_id,
                subordinates: team.iter().map(|e| e.id()).collect(),
            },
        ),
        Err(err) => failure(Uuid::new_v4(), err),
    }
}

/// Handler for `POST /employees/:id/subordinates`.
async fn assign_subordinate(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    payload: Result<Json<AssignSubordinateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let manager_id = EmployeeId::new(id);
    let subordinate_id = EmployeeId::new(request.subordinate_id);
    let result = state
        .mutate(|d| {
            d.assign_subordinate(manager_id, subordinate_id)?;
            team_of(d, manager_id)
        })
        .await;

    match result {
        Ok(team) => ok(StatusCode::OK, team),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `DELETE /employees/:id/subordinates/:subordinate_id`.
async fn unassign_subordinate(
    State(state): State<AppState>,
    Path((id, subordinate_id)): Path<(u32, u32)>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let manager_id = EmployeeId::new(id);
    let subordinate_id = EmployeeId::new(subordinate_id);

    let result = state
        .mutate(|d| {
            d.unassign_subordinate(manager_id, subordinate_id)?;
            team_of(d, manager_id)
        })
        .await;

    match result {
        Ok(team) => ok(StatusCode::OK, team),
        Err(err) => failure(correlation_id, err),
    }
}

fn team_of(
    directory: &PayrollDirectory,
    manager_id: EmployeeId,
) -> Result<TeamResponse, PayrollError> {
    Ok(TeamResponse {
        manager_id,
        subordinates: directory
            .team_members(manager_id)?
            .iter()
            .map(|e| e.id())
            .collect(),
    })
}

/// Handler for `GET /employees/:id/attendance`.
async fn get_attendance(State(state): State<AppState>, Path(id): Path<u32>) -> Response {
    let id = EmployeeId::new(id);
    let directory = state.read().await;
    match directory.find(id) {
        Some(employee) => ok(
            StatusCode::OK,
            AttendanceSummary {
                employee_id: id,
                present_days: employee.attendance.present_days(),
                absent_days: employee.attendance.absent_days(),
                records: employee.attendance.records(),
            },
        ),
        None => failure(Uuid::new_v4(), PayrollError::EmployeeNotFound { id }),
    }
}

/// Handler for `POST /employees/:id/attendance`.
async fn mark_attendance(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    payload: Result<Json<AttendanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    if let Err(message) = request.validate() {
        warn!(
            correlation_id = %correlation_id,
            error = %message,
            "Attendance hours out of range"
        );
        return ApiErrorResponse::bad_request(ApiError::validation_error(message)).into_response();
    }

    let id = EmployeeId::new(id);
    let result = state
        .mutate(|d| {
            d.mark_attendance(id, request.date, request.present, request.hours)?;
            d.find(id)
                .and_then(|e| e.attendance.get(request.date).cloned())
                .ok_or(PayrollError::EmployeeNotFound { id })
        })
        .await;

    match result {
        Ok(record) => ok(StatusCode::OK, record),
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `GET /employees/:id/leave`.
async fn get_leave(State(state): State<AppState>, Path(id): Path<u32>) -> Response {
    let id = EmployeeId::new(id);
    let directory = state.read().await;
    let summary = directory.available_leave(id).and_then(|available_balance| {
        let employee = directory
            .find(id)
            .ok_or(PayrollError::EmployeeNotFound { id })?;
        Ok(LeaveSummary {
            employee_id: id,
            available_balance,
            requests: employee.leave.history(),
        })
    });

    match summary {
        Ok(summary) => ok(StatusCode::OK, summary),
        Err(err) => failure(Uuid::new_v4(), err),
    }
}

/// Handler for `POST /employees/:id/leave`.
async fn request_leave(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    payload: Result<Json<LeaveApplicationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let id = EmployeeId::new(id);
    let result = state
        .mutate(|d| {
            let request_id =
                d.request_leave(id, request.start_date, request.end_date, request.reason)?;
            d.find(id)
                .and_then(|e| e.leave.get(request_id).cloned())
                .ok_or(PayrollError::EmployeeNotFound { id })
        })
        .await;

    match result {
        Ok(leave) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %id,
                request_id = %leave.id,
                days = leave.leave_days(),
                "Leave request filed"
            );
            ok(StatusCode::CREATED, leave)
        }
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `POST /employees/:id/leave/:request_id/approve`.
async fn approve_leave(
    State(state): State<AppState>,
    Path((id, request_id)): Path<(u32, u32)>,
) -> Response {
    decide_leave(state, id, request_id, true).await
}

/// Handler for `POST /employees/:id/leave/:request_id/reject`.
async fn reject_leave(
    State(state): State<AppState>,
    Path((id, request_id)): Path<(u32, u32)>,
) -> Response {
    decide_leave(state, id, request_id, false).await
}

async fn decide_leave(state: AppState, id: u32, request_id: u32, approve: bool) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = EmployeeId::new(id);
    let request_id = LeaveRequestId::new(request_id);

    let result = state
        .mutate_if(
            |d| {
                let changed = if approve {
                    d.approve_leave_request(id, request_id)?
                } else {
                    d.reject_leave_request(id, request_id)?
                };
                Ok(LeaveDecision {
                    employee_id: id,
                    request_id,
                    changed,
                    available_balance: d.available_leave(id)?,
                })
            },
            |decision| decision.changed,
        )
        .await;

    match result {
        Ok(decision) => {
            if !decision.changed {
                warn!(
                    correlation_id = %correlation_id,
                    employee_id = %id,
                    request_id = %request_id,
                    "No leave request with this id"
                );
            }
            ok(StatusCode::OK, decision)
        }
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `GET /leave/pending`.
async fn pending_leave(State(state): State<AppState>) -> Response {
    let directory = state.read().await;
    ok(StatusCode::OK, directory.pending_leave_applications())
}

/// Handler for `GET /payslips/:id`.
async fn get_payslip(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };

    let id = EmployeeId::new(id);
    let directory = state.read().await;
    let payslip = resolve_period(&query)
        .and_then(|(period, as_of)| directory.generate_payslip(id, period, as_of));

    match payslip {
        Ok(payslip) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %id,
                net_salary = %payslip.breakdown.net_salary,
                duration_us = payslip.audit_trace.duration_us,
                "Payslip served"
            );
            ok(StatusCode::OK, payslip)
        }
        Err(err) => failure(correlation_id, err),
    }
}

/// Handler for `GET /reports/payroll`.
async fn payroll_report(
    State(state): State<AppState>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };

    let directory = state.read().await;
    match resolve_period(&query) {
        Ok((period, as_of)) => {
            let report = directory.payroll_report(period, as_of);
            info!(
                correlation_id = %correlation_id,
                pay_period = %period,
                employees = report.lines.len(),
                net_payout = %report.totals.net_payout,
                "Payroll report served"
            );
            ok(StatusCode::OK, report)
        }
        Err(err) => failure(correlation_id, err),
    }
}
