//! HTTP request handlers for the calendar API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    DayClassification, LeaveDaysResult, WorkingDayCalendar, calculate_leave_days, parse_date,
};
use crate::error::{CalendarError, CalendarResult};

use super::request::{DayCheckRequest, LeaveDaysRequest, RangeCountRequest};
use super::response::{ApiError, ApiErrorResponse, WorkingDayCountResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/working-days/check", post(check_day_handler))
        .route("/working-days/count", post(count_days_handler))
        .route("/leave/days", post(leave_days_handler))
        .with_state(state)
}

/// Handler for POST /working-days/check.
///
/// Classifies a single date for an organization and optional class.
async fn check_day_handler(
    State(state): State<AppState>,
    payload: Result<Json<DayCheckRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing working-day check");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match check_day(&state, &request) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                organization_id = %request.organization_id,
                date = %result.date,
                is_working_day = result.is_working_day,
                "Working-day check completed"
            );
            json_response(StatusCode::OK, &result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /working-days/count.
///
/// Counts working days over an inclusive date range.
async fn count_days_handler(
    State(state): State<AppState>,
    payload: Result<Json<RangeCountRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing working-day count");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match count_days(&state, &request) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                organization_id = %result.organization_id,
                calendar_days = result.calendar_days,
                working_days = result.working_days,
                duration_us = start_time.elapsed().as_micros(),
                "Working-day count completed"
            );
            json_response(StatusCode::OK, &result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /leave/days.
///
/// Computes the chargeable duration of a leave request.
async fn leave_days_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveDaysRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing leave-day calculation");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match leave_days(&state, &request) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                organization_id = %request.organization_id,
                leave_type = %result.leave_type,
                chargeable_days = %result.chargeable_days,
                "Leave-day calculation completed"
            );
            json_response(StatusCode::OK, &result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

fn check_day(state: &AppState, request: &DayCheckRequest) -> CalendarResult<DayClassification> {
    let date = parse_date(&request.date)?;
    let snapshot = state.calendar(&request.organization_id)?;
    let calendar = WorkingDayCalendar::from_snapshot(snapshot)?;
    calendar.classify_day(date, request.class_id.as_ref())
}

fn count_days(
    state: &AppState,
    request: &RangeCountRequest,
) -> CalendarResult<WorkingDayCountResponse> {
    let (start_date, end_date) = request.parse_range()?;
    let snapshot = state.calendar(&request.organization_id)?;
    let calendar = WorkingDayCalendar::from_snapshot(snapshot)?;
    let working_days =
        calendar.count_working_days(start_date, end_date, request.class_id.as_ref())?;

    Ok(WorkingDayCountResponse {
        organization_id: snapshot.id().to_string(),
        start_date,
        end_date,
        calendar_days: ((end_date - start_date).num_days() + 1) as u32,
        working_days,
    })
}

fn leave_days(state: &AppState, request: &LeaveDaysRequest) -> CalendarResult<LeaveDaysResult> {
    let leave_request = request.leave_request.to_leave_request()?;
    let snapshot = state.calendar(&request.organization_id)?;
    let calendar = WorkingDayCalendar::from_snapshot(snapshot)?;
    calculate_leave_days(&leave_request, &calendar, request.class_id.as_ref())
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: CalendarError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calendar request failed"
    );
    ApiErrorResponse::from(err).into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
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
    json_response(StatusCode::BAD_REQUEST, &error)
}
