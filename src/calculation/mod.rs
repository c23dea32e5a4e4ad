//! Calculation logic for the Working-Day Calendar Engine.
//!
//! This module contains day detection and date parsing, weekly-off policy
//! evaluation, layered working-day classification and counting, chargeable
//! leave-day calculation, and leave allocation rules.

mod day_detection;
mod leave_allocation;
mod leave_days;
mod weekly_off;
mod working_day;

pub use day_detection::{DATE_FORMAT, DayType, get_day_type, nth_weekday_of_month, parse_date};
pub use leave_allocation::{
    LeaveBalance, MAX_ALLOCATION_DAYS, MIN_ALLOCATION_DAYS, calculate_leave_balance,
    find_allocation, validate_leave_allocation,
};
pub use leave_days::{HALF_DAY, LeaveDaysResult, calculate_leave_days};
pub use weekly_off::{PolicyVerdict, effective_policy, evaluate_policy, validate_policies};
pub use working_day::{
    DayClassification, DayReason, WorkingDayCalendar, classify_day, count_working_days,
    is_working_day, validate_exceptions, validate_holidays,
};
