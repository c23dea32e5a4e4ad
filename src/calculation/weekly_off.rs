//! Weekly-off policy lookup and evaluation.
//!
//! Finds the policy effective on a date, rejects overlapping policy sets,
//! and evaluates the Sunday / Saturday rules of a single policy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};
use crate::models::{SaturdayPattern, WeeklyOffPolicy};

use super::day_detection::{DayType, get_day_type, nth_weekday_of_month};

/// The outcome of evaluating a weekly-off policy for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyVerdict {
    /// The date is a working day under the policy.
    Working,
    /// The date is a Sunday and Sundays are off.
    SundayOff,
    /// The date is a Saturday that the pattern marks as off.
    SaturdayOff {
        /// The pattern that applied.
        pattern: SaturdayPattern,
        /// The Saturday's 1-based ordinal within its month.
        ordinal: u32,
    },
}

impl PolicyVerdict {
    /// Whether the verdict makes the date a working day.
    pub fn is_working(self) -> bool {
        matches!(self, PolicyVerdict::Working)
    }
}

/// Evaluates `policy` for `date`, ignoring its effective interval.
///
/// # Example
///
/// ```
/// use school_calendar::calculation::{evaluate_policy, PolicyVerdict};
/// use school_calendar::models::{SaturdayPattern, WeeklyOffPolicy};
/// use chrono::NaiveDate;
///
/// let policy = WeeklyOffPolicy {
///     sunday_off: true,
///     saturday_pattern: SaturdayPattern::SecondOnly,
///     effective_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     effective_to: None,
/// };
///
/// // 2024-03-09 is the 2nd Saturday of March
/// let verdict = evaluate_policy(&policy, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
/// assert_eq!(
///     verdict,
///     PolicyVerdict::SaturdayOff { pattern: SaturdayPattern::SecondOnly, ordinal: 2 }
/// );
/// ```
pub fn evaluate_policy(policy: &WeeklyOffPolicy, date: NaiveDate) -> PolicyVerdict {
    match get_day_type(date) {
        DayType::Sunday if policy.sunday_off => PolicyVerdict::SundayOff,
        DayType::Saturday => {
            let ordinal = nth_weekday_of_month(date);
            if policy.saturday_pattern.is_off(ordinal) {
                PolicyVerdict::SaturdayOff {
                    pattern: policy.saturday_pattern,
                    ordinal,
                }
            } else {
                PolicyVerdict::Working
            }
        }
        _ => PolicyVerdict::Working,
    }
}

/// Finds the single policy effective on `date`.
///
/// Returns `Ok(None)` for a coverage gap. If more than one policy claims the
/// date, the set is corrupt and [`CalendarError::PolicyOverlap`] is returned
/// instead of picking one.
pub fn effective_policy(
    policies: &[WeeklyOffPolicy],
    date: NaiveDate,
) -> CalendarResult<Option<&WeeklyOffPolicy>> {
    let mut covering = policies.iter().filter(|p| p.contains_date(date));
    let found = covering.next();
    if let (Some(first), Some(second)) = (found, covering.next()) {
        return Err(overlap_error(first, second));
    }
    Ok(found)
}

/// Checks a policy set for invalid intervals and pairwise overlaps.
///
/// # Example
///
/// ```
/// use school_calendar::calculation::validate_policies;
/// use school_calendar::error::CalendarError;
/// use school_calendar::models::{SaturdayPattern, WeeklyOffPolicy};
/// use chrono::NaiveDate;
///
/// let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// let policies = vec![
///     WeeklyOffPolicy {
///         sunday_off: true,
///         saturday_pattern: SaturdayPattern::All,
///         effective_from: date(2024, 1, 1),
///         effective_to: Some(date(2024, 6, 1)),
///     },
///     WeeklyOffPolicy {
///         sunday_off: true,
///         saturday_pattern: SaturdayPattern::None,
///         effective_from: date(2024, 3, 1),
///         effective_to: Some(date(2024, 12, 1)),
///     },
/// ];
///
/// assert!(matches!(
///     validate_policies(&policies),
///     Err(CalendarError::PolicyOverlap { .. })
/// ));
/// ```
pub fn validate_policies(policies: &[WeeklyOffPolicy]) -> CalendarResult<()> {
    for policy in policies {
        policy.validate()?;
    }

    let mut sorted: Vec<&WeeklyOffPolicy> = policies.iter().collect();
    sorted.sort_by_key(|p| p.effective_from);

    // Once sorted by start, any overlap shows up between neighbours.
    for pair in sorted.windows(2) {
        if pair[0].overlaps(pair[1]) {
            return Err(overlap_error(pair[0], pair[1]));
        }
    }
    Ok(())
}

fn overlap_error(a: &WeeklyOffPolicy, b: &WeeklyOffPolicy) -> CalendarError {
    let (first, second) = if a.effective_from <= b.effective_from {
        (a, b)
    } else {
        (b, a)
    };
    CalendarError::PolicyOverlap {
        first_from: first.effective_from,
        second_from: second.effective_from,
    }
}
