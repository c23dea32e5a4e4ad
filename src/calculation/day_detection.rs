//! Day detection and date parsing.
//!
//! This module provides utilities for determining the day type (weekday,
//! Saturday, Sunday) of a date, the ordinal of a weekday within its month,
//! and strict parsing of caller-supplied date strings.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};

/// The date format accepted from callers.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Represents the type of day for weekly-off evaluation.
///
/// # Example
///
/// ```
/// use school_calendar::calculation::DayType;
///
/// let day_type = DayType::Saturday;
/// assert_eq!(format!("{:?}", day_type), "Saturday");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Monday through Friday.
    Weekday,
    /// Saturday - subject to the policy's Saturday pattern.
    Saturday,
    /// Sunday - subject to the policy's `sunday_off` flag.
    Sunday,
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayType::Weekday => write!(f, "Weekday"),
            DayType::Saturday => write!(f, "Saturday"),
            DayType::Sunday => write!(f, "Sunday"),
        }
    }
}

/// Determines the day type for a given date.
///
/// # Example
///
/// ```
/// use school_calendar::calculation::{get_day_type, DayType};
/// use chrono::NaiveDate;
///
/// // 2024-03-09 is a Saturday
/// let saturday = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
/// assert_eq!(get_day_type(saturday), DayType::Saturday);
///
/// // 2024-03-10 is a Sunday
/// let sunday = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
/// assert_eq!(get_day_type(sunday), DayType::Sunday);
///
/// // 2024-03-11 is a Monday
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
/// assert_eq!(get_day_type(monday), DayType::Weekday);
/// ```
pub fn get_day_type(date: NaiveDate) -> DayType {
    match date.weekday() {
        Weekday::Sat => DayType::Saturday,
        Weekday::Sun => DayType::Sunday,
        _ => DayType::Weekday,
    }
}

/// Returns the 1-based ordinal of `date`'s weekday within its month.
///
/// The first seven days of a month each hold the 1st occurrence of their
/// weekday, the next seven the 2nd, and so on, so the ordinal depends only
/// on the day of the month.
///
/// # Example
///
/// ```
/// use school_calendar::calculation::nth_weekday_of_month;
/// use chrono::NaiveDate;
///
/// // Saturdays in March 2024: 2, 9, 16, 23, 30
/// assert_eq!(nth_weekday_of_month(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()), 1);
/// assert_eq!(nth_weekday_of_month(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()), 2);
/// assert_eq!(nth_weekday_of_month(NaiveDate::from_ymd_opt(2024, 3, 23).unwrap()), 4);
/// assert_eq!(nth_weekday_of_month(NaiveDate::from_ymd_opt(2024, 3, 30).unwrap()), 5);
/// ```
pub fn nth_weekday_of_month(date: NaiveDate) -> u32 {
    date.day0() / 7 + 1
}

/// Parses a `YYYY-MM-DD` date string.
///
/// Returns [`CalendarError::InvalidDate`] for anything that is not a real
/// calendar date, including impossible days such as February 30th.
///
/// # Example
///
/// ```
/// use school_calendar::calculation::parse_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_date("2024-02-29").unwrap(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert!(parse_date("2023-02-29").is_err());
/// assert!(parse_date("29/02/2024").is_err());
/// ```
pub fn parse_date(input: &str) -> CalendarResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| CalendarError::InvalidDate {
        input: input.to_string(),
    })
}
