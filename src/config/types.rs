//! Configuration file shapes.
//!
//! This module contains the strongly-typed structures each YAML file in an
//! organization's configuration directory deserializes into.

use serde::Deserialize;

use crate::models::{CalendarException, Holiday, LeaveAllocation, WeeklyOffPolicy};

/// `weekly_off_policies.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PoliciesConfig {
    /// Policies in any order; the loader sorts them.
    pub policies: Vec<WeeklyOffPolicy>,
}

/// One file under `holidays/`, holding a single year's holidays.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayYearConfig {
    /// The calendar year every holiday in the file must fall in.
    pub year: i32,
    /// The holidays of that year.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

/// `calendar_exceptions.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExceptionsConfig {
    /// Per-date overrides.
    #[serde(default)]
    pub exceptions: Vec<CalendarException>,
}

/// `leave_allocations.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveAllocationsConfig {
    /// Leave entitlements by type and role.
    #[serde(default)]
    pub allocations: Vec<LeaveAllocation>,
}
