//! Weekly-off policy model.
//!
//! A [`WeeklyOffPolicy`] defines which weekdays are non-working by default
//! over a half-open effective interval.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};

/// Which Saturdays of a month are non-working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaturdayPattern {
    /// Every Saturday is off.
    All,
    /// Only the 2nd Saturday of the month is off.
    SecondOnly,
    /// The 2nd and 4th Saturdays of the month are off.
    SecondAndFourth,
    /// Saturdays are working days.
    None,
}

impl SaturdayPattern {
    /// Returns true if the Saturday with the given 1-based ordinal within
    /// its month is off under this pattern.
    ///
    /// # Example
    ///
    /// ```
    /// use school_calendar::models::SaturdayPattern;
    ///
    /// assert!(SaturdayPattern::SecondAndFourth.is_off(4));
    /// assert!(!SaturdayPattern::SecondAndFourth.is_off(5));
    /// assert!(!SaturdayPattern::None.is_off(2));
    /// ```
    pub fn is_off(self, ordinal: u32) -> bool {
        match self {
            SaturdayPattern::All => true,
            SaturdayPattern::SecondOnly => ordinal == 2,
            SaturdayPattern::SecondAndFourth => ordinal == 2 || ordinal == 4,
            SaturdayPattern::None => false,
        }
    }
}

impl std::fmt::Display for SaturdayPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaturdayPattern::All => write!(f, "ALL"),
            SaturdayPattern::SecondOnly => write!(f, "SECOND_ONLY"),
            SaturdayPattern::SecondAndFourth => write!(f, "SECOND_AND_FOURTH"),
            SaturdayPattern::None => write!(f, "NONE"),
        }
    }
}

/// A recurring weekly-off rule effective over `[effective_from, effective_to)`.
///
/// # Example
///
/// ```
/// use school_calendar::models::{SaturdayPattern, WeeklyOffPolicy};
/// use chrono::NaiveDate;
///
/// let policy = WeeklyOffPolicy {
///     sunday_off: true,
///     saturday_pattern: SaturdayPattern::SecondAndFourth,
///     effective_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     effective_to: None,
/// };
///
/// assert!(policy.contains_date(NaiveDate::from_ymd_opt(2030, 6, 1).unwrap()));
/// assert!(!policy.contains_date(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyOffPolicy {
    /// Whether Sundays are non-working.
    pub sunday_off: bool,
    /// Which Saturdays are non-working.
    pub saturday_pattern: SaturdayPattern,
    /// First day the policy applies (inclusive).
    pub effective_from: NaiveDate,
    /// First day the policy no longer applies (exclusive); open-ended if absent.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
}

impl WeeklyOffPolicy {
    /// Checks whether the policy is effective on `date`.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.effective_from && self.effective_to.is_none_or(|to| date < to)
    }

    /// Checks whether two policies' effective intervals share any day.
    pub fn overlaps(&self, other: &WeeklyOffPolicy) -> bool {
        let self_starts_before_other_ends = other
            .effective_to
            .is_none_or(|to| self.effective_from < to);
        let other_starts_before_self_ends = self
            .effective_to
            .is_none_or(|to| other.effective_from < to);
        self_starts_before_other_ends && other_starts_before_self_ends
    }

    /// Rejects policies whose interval is empty or inverted.
    pub fn validate(&self) -> CalendarResult<()> {
        match self.effective_to {
            Some(to) if to <= self.effective_from => Err(CalendarError::InvalidPolicy {
                effective_from: self.effective_from,
                message: format!("effective_to {} must be after effective_from", to),
            }),
            _ => Ok(()),
        }
    }
}
