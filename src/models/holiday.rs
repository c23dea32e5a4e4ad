//! Holiday and calendar exception models.
//!
//! A [`Holiday`] is a named non-working date. A [`CalendarException`] is an
//! explicit override that forces a date to be working or non-working,
//! regardless of the weekly-off policy and the holiday list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::scope::{ClassId, ClassScope, ScopeMatch};

/// The category of a holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HolidayType {
    /// A Sunday recorded explicitly as a holiday.
    Sunday,
    /// A Saturday recorded explicitly as a holiday.
    Saturday,
    /// A second Saturday recorded explicitly as a holiday.
    SecondSaturday,
    /// A national public holiday.
    NationalHoliday,
    /// A festival.
    Festival,
    /// A holiday declared by the organization.
    OrganizationHoliday,
    /// Any other holiday.
    Other,
}

/// A named non-working date.
///
/// # Example
///
/// ```
/// use school_calendar::models::{ClassScope, Holiday, HolidayType};
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2024, 8, 15).unwrap(),
///     holiday_type: HolidayType::NationalHoliday,
///     name: "Independence Day".to_string(),
///     scope: ClassScope::all(),
/// };
/// assert!(holiday.applies_to(None).is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The holiday category.
    #[serde(rename = "type")]
    pub holiday_type: HolidayType,
    /// The display name of the holiday.
    pub name: String,
    /// The classes the holiday applies to.
    #[serde(flatten)]
    pub scope: ClassScope,
}

impl Holiday {
    /// Reports whether the holiday applies to a query for `class_id`.
    pub fn applies_to(&self, class_id: Option<&ClassId>) -> Option<ScopeMatch> {
        self.scope.matches(class_id)
    }
}

/// The direction of a calendar exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverrideType {
    /// The date is a working day.
    ForceWorking,
    /// The date is a non-working day.
    ForceHoliday,
}

/// A per-date override that beats both the weekly-off policy and holidays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarException {
    /// The overridden date.
    pub date: NaiveDate,
    /// Whether the date is forced working or forced off.
    pub override_type: OverrideType,
    /// Why the override exists (e.g. "Compensatory working day").
    pub reason: String,
    /// The classes the override applies to.
    #[serde(flatten)]
    pub scope: ClassScope,
}

impl CalendarException {
    /// Reports whether the exception applies to a query for `class_id`.
    pub fn applies_to(&self, class_id: Option<&ClassId>) -> Option<ScopeMatch> {
        self.scope.matches(class_id)
    }
}
