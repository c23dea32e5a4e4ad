//! Working-day classification and counting.
//!
//! A date's status is decided by layered rules, highest precedence first:
//!
//! 1. a calendar exception for the date (class-specific beats organization-wide)
//! 2. a holiday for the date
//! 3. the weekly-off policy effective on the date
//! 4. no policy at all, which leaves the date a working day
//!
//! [`WorkingDayCalendar`] validates a snapshot once and indexes it by date;
//! the free functions build a calendar per call for callers holding raw slices.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CalendarError, CalendarResult};
use crate::models::{
    CalendarException, ClassId, ClassScope, Holiday, HolidayType, OrganizationCalendar,
    OverrideType, SaturdayPattern, ScopeMatch, WeeklyOffPolicy,
};

use super::day_detection::{DayType, get_day_type};
use super::weekly_off::{PolicyVerdict, effective_policy, evaluate_policy, validate_policies};

/// The rule that decided a date's status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DayReason {
    /// A calendar exception forced the date to be working.
    ForcedWorking {
        /// The exception's reason text.
        reason: String,
        /// How specifically the exception matched.
        scope: ScopeMatch,
    },
    /// A calendar exception forced the date to be non-working.
    ForcedHoliday {
        /// The exception's reason text.
        reason: String,
        /// How specifically the exception matched.
        scope: ScopeMatch,
    },
    /// A holiday falls on the date.
    Holiday {
        /// The holiday's name.
        name: String,
        /// The holiday's category.
        holiday_type: HolidayType,
        /// How specifically the holiday matched.
        scope: ScopeMatch,
    },
    /// Sundays are off under the effective policy.
    SundayOff,
    /// The Saturday is off under the effective policy's pattern.
    SaturdayOff {
        /// The pattern that applied.
        pattern: SaturdayPattern,
        /// The Saturday's 1-based ordinal within its month.
        ordinal: u32,
    },
    /// The effective policy makes the date a working day.
    RegularDay,
    /// No policy covers the date.
    NoPolicy,
}

impl From<PolicyVerdict> for DayReason {
    fn from(verdict: PolicyVerdict) -> Self {
        match verdict {
            PolicyVerdict::Working => DayReason::RegularDay,
            PolicyVerdict::SundayOff => DayReason::SundayOff,
            PolicyVerdict::SaturdayOff { pattern, ordinal } => {
                DayReason::SaturdayOff { pattern, ordinal }
            }
        }
    }
}

/// The classification of a single date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayClassification {
    /// The classified date.
    pub date: NaiveDate,
    /// Weekday, Saturday or Sunday.
    pub day_type: DayType,
    /// Whether the date is a working day.
    pub is_working_day: bool,
    /// The rule that decided.
    pub reason: DayReason,
}

/// A validated, date-indexed view over one organization's calendar records.
///
/// # Example
///
/// ```
/// use school_calendar::calculation::WorkingDayCalendar;
/// use school_calendar::models::{SaturdayPattern, WeeklyOffPolicy};
/// use chrono::NaiveDate;
///
/// let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// let policies = vec![WeeklyOffPolicy {
///     sunday_off: true,
///     saturday_pattern: SaturdayPattern::SecondAndFourth,
///     effective_from: date(2024, 1, 1),
///     effective_to: None,
/// }];
///
/// let calendar = WorkingDayCalendar::new(&policies, &[], &[]).unwrap();
/// assert!(!calendar.is_working_day(date(2024, 3, 9), None).unwrap());
/// assert!(calendar.is_working_day(date(2024, 3, 16), None).unwrap());
/// assert_eq!(calendar.count_working_days(date(2024, 3, 1), date(2024, 3, 31), None).unwrap(), 24);
/// ```
#[derive(Debug, Clone)]
pub struct WorkingDayCalendar<'a> {
    policies: &'a [WeeklyOffPolicy],
    holidays: BTreeMap<NaiveDate, Vec<&'a Holiday>>,
    exceptions: BTreeMap<NaiveDate, Vec<&'a CalendarException>>,
}

impl<'a> WorkingDayCalendar<'a> {
    /// Validates the records and indexes them by date.
    ///
    /// # Errors
    ///
    /// - [`CalendarError::InvalidPolicy`] / [`CalendarError::PolicyOverlap`] for a
    ///   broken policy set
    /// - [`CalendarError::DuplicateRecord`] when two holidays, or two agreeing
    ///   exceptions, claim the same date and scope
    /// - [`CalendarError::AmbiguousScope`] when two exceptions claim the same date
    ///   and scope with opposite overrides
    pub fn new(
        policies: &'a [WeeklyOffPolicy],
        holidays: &'a [Holiday],
        exceptions: &'a [CalendarException],
    ) -> CalendarResult<Self> {
        validate_policies(policies)?;
        validate_holidays(holidays)?;
        validate_exceptions(exceptions)?;

        let mut holiday_index: BTreeMap<NaiveDate, Vec<&'a Holiday>> = BTreeMap::new();
        for holiday in holidays {
            holiday_index.entry(holiday.date).or_default().push(holiday);
        }
        let mut exception_index: BTreeMap<NaiveDate, Vec<&'a CalendarException>> = BTreeMap::new();
        for exception in exceptions {
            exception_index
                .entry(exception.date)
                .or_default()
                .push(exception);
        }

        Ok(Self {
            policies,
            holidays: holiday_index,
            exceptions: exception_index,
        })
    }

    /// Builds a calendar over an organization snapshot.
    pub fn from_snapshot(snapshot: &'a OrganizationCalendar) -> CalendarResult<Self> {
        Self::new(&snapshot.policies, &snapshot.holidays, &snapshot.exceptions)
    }

    /// Classifies `date` for `class_id`, or organization-wide when `None`.
    pub fn classify_day(
        &self,
        date: NaiveDate,
        class_id: Option<&ClassId>,
    ) -> CalendarResult<DayClassification> {
        let day_type = get_day_type(date);
        let classification = |is_working_day, reason| DayClassification {
            date,
            day_type,
            is_working_day,
            reason,
        };

        let exception = self
            .exceptions
            .get(&date)
            .and_then(|records| most_specific(records, |e| e.applies_to(class_id)));
        if let Some((exception, scope)) = exception {
            let reason = exception.reason.clone();
            return Ok(match exception.override_type {
                OverrideType::ForceWorking => {
                    classification(true, DayReason::ForcedWorking { reason, scope })
                }
                OverrideType::ForceHoliday => {
                    classification(false, DayReason::ForcedHoliday { reason, scope })
                }
            });
        }

        let holiday = self
            .holidays
            .get(&date)
            .and_then(|records| most_specific(records, |h| h.applies_to(class_id)));
        if let Some((holiday, scope)) = holiday {
            return Ok(classification(
                false,
                DayReason::Holiday {
                    name: holiday.name.clone(),
                    holiday_type: holiday.holiday_type,
                    scope,
                },
            ));
        }

        match effective_policy(self.policies, date)? {
            Some(policy) => {
                let verdict = evaluate_policy(policy, date);
                Ok(classification(verdict.is_working(), verdict.into()))
            }
            None => {
                debug!(date = %date, "No weekly-off policy effective; treating as working day");
                Ok(classification(true, DayReason::NoPolicy))
            }
        }
    }

    /// Returns whether `date` is a working day.
    pub fn is_working_day(
        &self,
        date: NaiveDate,
        class_id: Option<&ClassId>,
    ) -> CalendarResult<bool> {
        Ok(self.classify_day(date, class_id)?.is_working_day)
    }

    /// Counts working days in `[start, end]`.
    ///
    /// # Errors
    ///
    /// [`CalendarError::InvalidRange`] if `end` precedes `start`; any error from
    /// classifying a day aborts the whole count.
    pub fn count_working_days(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        class_id: Option<&ClassId>,
    ) -> CalendarResult<u32> {
        let mut count = 0;
        for date in days_in_range(start, end)? {
            if self.is_working_day(date, class_id)? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Lists the working days in `[start, end]` in chronological order.
    pub fn working_dates(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        class_id: Option<&ClassId>,
    ) -> CalendarResult<Vec<NaiveDate>> {
        let mut dates = Vec::new();
        for date in days_in_range(start, end)? {
            if self.is_working_day(date, class_id)? {
                dates.push(date);
            }
        }
        Ok(dates)
    }
}

/// Classifies `date` against raw record slices.
pub fn classify_day(
    date: NaiveDate,
    policies: &[WeeklyOffPolicy],
    holidays: &[Holiday],
    exceptions: &[CalendarException],
    class_id: Option<&ClassId>,
) -> CalendarResult<DayClassification> {
    WorkingDayCalendar::new(policies, holidays, exceptions)?.classify_day(date, class_id)
}

/// Returns whether `date` is a working day.
///
/// # Example
///
/// ```
/// use school_calendar::calculation::is_working_day;
/// use school_calendar::models::{
///     CalendarException, ClassScope, OverrideType, SaturdayPattern, WeeklyOffPolicy,
/// };
/// use chrono::NaiveDate;
///
/// let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// let policies = vec![WeeklyOffPolicy {
///     sunday_off: true,
///     saturday_pattern: SaturdayPattern::None,
///     effective_from: date(2024, 1, 1),
///     effective_to: None,
/// }];
/// let exceptions = vec![CalendarException {
///     date: date(2024, 3, 10),
///     override_type: OverrideType::ForceWorking,
///     reason: "Sports day".to_string(),
///     scope: ClassScope::all(),
/// }];
///
/// // 2024-03-10 is a Sunday
/// assert!(is_working_day(date(2024, 3, 10), &policies, &[], &exceptions, None).unwrap());
/// assert!(!is_working_day(date(2024, 3, 17), &policies, &[], &exceptions, None).unwrap());
/// ```
pub fn is_working_day(
    date: NaiveDate,
    policies: &[WeeklyOffPolicy],
    holidays: &[Holiday],
    exceptions: &[CalendarException],
    class_id: Option<&ClassId>,
) -> CalendarResult<bool> {
    WorkingDayCalendar::new(policies, holidays, exceptions)?.is_working_day(date, class_id)
}

/// Counts working days in the inclusive range `[start, end]`.
pub fn count_working_days(
    start: NaiveDate,
    end: NaiveDate,
    policies: &[WeeklyOffPolicy],
    holidays: &[Holiday],
    exceptions: &[CalendarException],
    class_id: Option<&ClassId>,
) -> CalendarResult<u32> {
    WorkingDayCalendar::new(policies, holidays, exceptions)?.count_working_days(
        start, end, class_id,
    )
}

/// Rejects holidays that share a date and an overlapping class scope.
pub fn validate_holidays(holidays: &[Holiday]) -> CalendarResult<()> {
    reject_empty_scopes("holiday", holidays.iter().map(|h| (h.date, &h.scope)))?;
    for_each_collision(holidays.iter().map(|h| (h.date, &h.scope, h)), |date, _, _| {
        Err(CalendarError::DuplicateRecord {
            kind: "holiday".to_string(),
            date,
        })
    })
}

/// Rejects calendar exceptions that share a date and an overlapping class scope.
///
/// Agreeing duplicates are [`CalendarError::DuplicateRecord`]; disagreeing
/// ones cannot be resolved and are [`CalendarError::AmbiguousScope`].
pub fn validate_exceptions(exceptions: &[CalendarException]) -> CalendarResult<()> {
    reject_empty_scopes(
        "calendar exception",
        exceptions.iter().map(|e| (e.date, &e.scope)),
    )?;
    for_each_collision(
        exceptions.iter().map(|e| (e.date, &e.scope, e)),
        |date, a, b| {
            if a.override_type == b.override_type {
                Err(CalendarError::DuplicateRecord {
                    kind: "calendar exception".to_string(),
                    date,
                })
            } else {
                Err(CalendarError::AmbiguousScope {
                    kind: "calendar exception".to_string(),
                    date,
                    message: format!(
                        "'{}' and '{}' override the same classes in opposite directions",
                        a.reason, b.reason
                    ),
                })
            }
        },
    )
}

fn reject_empty_scopes<'r>(
    kind: &str,
    mut scopes: impl Iterator<Item = (NaiveDate, &'r ClassScope)>,
) -> CalendarResult<()> {
    match scopes.find(|(_, scope)| scope.is_empty()) {
        Some((date, _)) => Err(CalendarError::EmptyScope {
            kind: kind.to_string(),
            date,
        }),
        None => Ok(()),
    }
}

fn for_each_collision<'r, T: 'r>(
    records: impl Iterator<Item = (NaiveDate, &'r ClassScope, &'r T)>,
    mut on_collision: impl FnMut(NaiveDate, &T, &T) -> CalendarResult<()>,
) -> CalendarResult<()> {
    let mut by_date: BTreeMap<NaiveDate, Vec<(&ClassScope, &T)>> = BTreeMap::new();
    for (date, scope, record) in records {
        by_date.entry(date).or_default().push((scope, record));
    }
    for (date, records) in by_date {
        for (i, (scope_a, a)) in records.iter().enumerate() {
            for (scope_b, b) in &records[i + 1..] {
                if scope_a.collides_with(scope_b) {
                    on_collision(date, *a, *b)?;
                }
            }
        }
    }
    Ok(())
}

fn most_specific<'r, T>(
    records: &[&'r T],
    matcher: impl Fn(&T) -> Option<ScopeMatch>,
) -> Option<(&'r T, ScopeMatch)> {
    records
        .iter()
        .filter_map(|record| matcher(record).map(|scope| (*record, scope)))
        .max_by_key(|(_, scope)| *scope)
}

fn days_in_range(
    start: NaiveDate,
    end: NaiveDate,
) -> CalendarResult<impl Iterator<Item = NaiveDate>> {
    if end < start {
        return Err(CalendarError::InvalidRange { start, end });
    }
    // `iter_days` stops short of `NaiveDate::MAX`
    Ok(std::iter::successors(Some(start), |date| date.succ_opt())
        .take_while(move |date| *date <= end))
}
