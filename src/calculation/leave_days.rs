//! Chargeable leave-day calculation.
//!
//! A leave request is charged only for working days in its range, with half a
//! day taken off for each half-day endpoint that falls on a working day.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};
use crate::models::{ClassId, LeaveRequest};

use super::working_day::WorkingDayCalendar;

/// Half a day.
pub const HALF_DAY: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Result of charging a leave request against the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDaysResult {
    /// The leave type of the request.
    pub leave_type: String,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Calendar days in the range.
    pub calendar_days: u32,
    /// Working days in the range.
    pub working_days: u32,
    /// Days to deduct from the leave balance.
    pub chargeable_days: Decimal,
}

/// Calculates the chargeable duration of a leave request.
///
/// # Errors
///
/// [`CalendarError::InvalidRange`] if the request ends before it starts;
/// any calendar error aborts the calculation.
///
/// # Example
///
/// ```
/// use school_calendar::calculation::{calculate_leave_days, WorkingDayCalendar};
/// use school_calendar::models::{LeaveRequest, SaturdayPattern, WeeklyOffPolicy};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// let policies = vec![WeeklyOffPolicy {
///     sunday_off: true,
///     saturday_pattern: SaturdayPattern::All,
///     effective_from: date(2024, 1, 1),
///     effective_to: None,
/// }];
/// let calendar = WorkingDayCalendar::new(&policies, &[], &[]).unwrap();
///
/// // Thursday to the following Tuesday, finishing at midday on Tuesday
/// let request = LeaveRequest {
///     leave_type: "CASUAL".to_string(),
///     start_date: date(2024, 3, 7),
///     end_date: date(2024, 3, 12),
///     half_day_start: false,
///     half_day_end: true,
/// };
///
/// let result = calculate_leave_days(&request, &calendar, None).unwrap();
/// assert_eq!(result.working_days, 4);
/// assert_eq!(result.chargeable_days, Decimal::new(35, 1));
/// ```
pub fn calculate_leave_days(
    request: &LeaveRequest,
    calendar: &WorkingDayCalendar<'_>,
    class_id: Option<&ClassId>,
) -> CalendarResult<LeaveDaysResult> {
    let (start, end) = (request.start_date, request.end_date);
    if end < start {
        return Err(CalendarError::InvalidRange { start, end });
    }

    let working_days = calendar.count_working_days(start, end, class_id)?;
    let calendar_days = ((end - start).num_days() + 1) as u32;

    let mut chargeable_days = Decimal::from(working_days);
    if start == end {
        if (request.half_day_start || request.half_day_end) && working_days == 1 {
            chargeable_days = HALF_DAY;
        }
    } else {
        if request.half_day_start && calendar.is_working_day(start, class_id)? {
            chargeable_days -= HALF_DAY;
        }
        if request.half_day_end && calendar.is_working_day(end, class_id)? {
            chargeable_days -= HALF_DAY;
        }
    }

    Ok(LeaveDaysResult {
        leave_type: request.leave_type.clone(),
        start_date: start,
        end_date: end,
        calendar_days,
        working_days,
        chargeable_days,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassScope, Holiday, HolidayType, SaturdayPattern, WeeklyOffPolicy};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn policies() -> Vec<WeeklyOffPolicy> {
        vec![WeeklyOffPolicy {
            sunday_off: true,
            saturday_pattern: SaturdayPattern::SecondAndFourth,
            effective_from: date(2024, 1, 1),
            effective_to: None,
        }]
    }

    fn request(start: NaiveDate, end: NaiveDate, half_start: bool, half_end: bool) -> LeaveRequest {
        LeaveRequest {
            leave_type: "CASUAL".to_string(),
            start_date: start,
            end_date: end,
            half_day_start: half_start,
            half_day_end: half_end,
        }
    }

    #[test]
    fn test_full_week_excludes_weekly_off() {
        let policies = policies();
        let calendar = WorkingDayCalendar::new(&policies, &[], &[]).unwrap();

        // Mon 4th to Sun 10th March 2024: Sat 9th (2nd) and Sun 10th are off
        let leave = request(date(2024, 3, 4), date(2024, 3, 10), false, false);
        let result = calculate_leave_days(&leave, &calendar, None).unwrap();
        assert_eq!(result.calendar_days, 7);
        assert_eq!(result.working_days, 5);
        assert_eq!(result.chargeable_days, dec("5"));
    }

    #[test]
    fn test_holiday_not_charged() {
        let policies = policies();
        let holidays = vec![Holiday {
            date: date(2024, 3, 25),
            holiday_type: HolidayType::Festival,
            name: "Holi".to_string(),
            scope: ClassScope::all(),
        }];
        let calendar = WorkingDayCalendar::new(&policies, &holidays, &[]).unwrap();

        let leave = request(date(2024, 3, 25), date(2024, 3, 27), false, false);
        let result = calculate_leave_days(&leave, &calendar, None).unwrap();
        assert_eq!(result.chargeable_days, dec("2"));
    }

    #[test]
    fn test_half_day_endpoints() {
        let policies = policies();
        let calendar = WorkingDayCalendar::new(&policies, &[], &[]).unwrap();

        let leave = request(date(2024, 3, 4), date(2024, 3, 6), true, true);
        let result = calculate_leave_days(&leave, &calendar, None).unwrap();
        assert_eq!(result.working_days, 3);
        assert_eq!(result.chargeable_days, dec("2"));
    }

    #[test]
    fn test_half_day_on_non_working_endpoint_not_deducted() {
        let policies = policies();
        let calendar = WorkingDayCalendar::new(&policies, &[], &[]).unwrap();

        // Ends on Sunday 10th, which is already off
        let leave = request(date(2024, 3, 7), date(2024, 3, 10), false, true);
        let result = calculate_leave_days(&leave, &calendar, None).unwrap();
        assert_eq!(result.working_days, 2);
        assert_eq!(result.chargeable_days, dec("2"));
    }

    #[test]
    fn test_single_half_day() {
        let policies = policies();
        let calendar = WorkingDayCalendar::new(&policies, &[], &[]).unwrap();

        let leave = request(date(2024, 3, 5), date(2024, 3, 5), true, true);
        let both = calculate_leave_days(&leave, &calendar, None).unwrap();
        assert_eq!(both.chargeable_days, dec("0.5"));

        let leave = request(date(2024, 3, 5), date(2024, 3, 5), false, true);
        let one = calculate_leave_days(&leave, &calendar, None).unwrap();
        assert_eq!(one.chargeable_days, dec("0.5"));
    }

    #[test]
    fn test_single_day_on_sunday_charges_nothing() {
        let policies = policies();
        let calendar = WorkingDayCalendar::new(&policies, &[], &[]).unwrap();

        let leave = request(date(2024, 3, 10), date(2024, 3, 10), true, false);
        let result = calculate_leave_days(&leave, &calendar, None).unwrap();
        assert_eq!(result.chargeable_days, Decimal::ZERO);
    }

    #[test]
    fn test_inverted_request_rejected() {
        let policies = policies();
        let calendar = WorkingDayCalendar::new(&policies, &[], &[]).unwrap();

        let leave = request(date(2024, 3, 6), date(2024, 3, 4), false, false);
        assert!(matches!(
            calculate_leave_days(&leave, &calendar, None),
            Err(CalendarError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_leave_days_serialization() {
        let policies = policies();
        let calendar = WorkingDayCalendar::new(&policies, &[], &[]).unwrap();

        let leave = request(date(2024, 3, 4), date(2024, 3, 5), false, true);
        let result = calculate_leave_days(&leave, &calendar, None).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"chargeable_days\":\"1.5\""));
    }
}
