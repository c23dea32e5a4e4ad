//! Request types for the calendar API.
//!
//! Dates are accepted as strings and parsed with [`parse_date`] so that a
//! malformed date is reported as `INVALID_DATE` rather than a generic JSON
//! error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::parse_date;
use crate::error::{CalendarError, CalendarResult};
use crate::models::{ClassId, LeaveRequest};

/// Longest inclusive range, in days, a single request may cover.
pub const MAX_RANGE_DAYS: i64 = 3_660;

fn check_range_length(start: NaiveDate, end: NaiveDate) -> CalendarResult<()> {
    // Inverted ranges pass through; the engine reports them as InvalidRange.
    if (end - start).num_days() >= MAX_RANGE_DAYS {
        return Err(CalendarError::RangeTooLong {
            start,
            end,
            max_days: MAX_RANGE_DAYS,
        });
    }
    Ok(())
}

/// Request body for `POST /working-days/check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayCheckRequest {
    /// The organization whose calendar to consult.
    pub organization_id: String,
    /// The date to classify (`YYYY-MM-DD`).
    pub date: String,
    /// The class to classify for; organization-wide when absent.
    #[serde(default)]
    pub class_id: Option<ClassId>,
}

/// Request body for `POST /working-days/count`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeCountRequest {
    /// The organization whose calendar to consult.
    pub organization_id: String,
    /// First day of the range (inclusive, `YYYY-MM-DD`).
    pub start_date: String,
    /// Last day of the range (inclusive, `YYYY-MM-DD`).
    pub end_date: String,
    /// The class to count for; organization-wide when absent.
    #[serde(default)]
    pub class_id: Option<ClassId>,
}

impl RangeCountRequest {
    /// Parses both range endpoints and enforces [`MAX_RANGE_DAYS`].
    pub fn parse_range(&self) -> CalendarResult<(NaiveDate, NaiveDate)> {
        let start = parse_date(&self.start_date)?;
        let end = parse_date(&self.end_date)?;
        check_range_length(start, end)?;
        Ok((start, end))
    }
}

/// A leave request as it arrives over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequestBody {
    /// The leave type code.
    pub leave_type: String,
    /// First day of leave (`YYYY-MM-DD`).
    pub start_date: String,
    /// Last day of leave (`YYYY-MM-DD`).
    pub end_date: String,
    /// Whether the first day is a half day.
    #[serde(default)]
    pub half_day_start: bool,
    /// Whether the last day is a half day.
    #[serde(default)]
    pub half_day_end: bool,
}

impl LeaveRequestBody {
    /// Converts the body into a domain leave request.
    pub fn to_leave_request(&self) -> CalendarResult<LeaveRequest> {
        let start_date = parse_date(&self.start_date)?;
        let end_date = parse_date(&self.end_date)?;
        check_range_length(start_date, end_date)?;
        Ok(LeaveRequest {
            leave_type: self.leave_type.clone(),
            start_date,
            end_date,
            half_day_start: self.half_day_start,
            half_day_end: self.half_day_end,
        })
    }
}

/// Request body for `POST /leave/days`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveDaysRequest {
    /// The organization whose calendar to consult.
    pub organization_id: String,
    /// The class whose calendar applies; organization-wide when absent.
    #[serde(default)]
    pub class_id: Option<ClassId>,
    /// The leave being requested.
    pub leave_request: LeaveRequestBody,
}
