//! HTTP API module for the Working-Day Calendar Engine.
//!
//! This module exposes working-day classification, range counting and
//! leave-day calculation to the calendar UI and the leave-request validator.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    DayCheckRequest, LeaveDaysRequest, LeaveRequestBody, MAX_RANGE_DAYS, RangeCountRequest,
};
pub use response::{ApiError, ApiErrorResponse, WorkingDayCountResponse};
pub use state::AppState;
