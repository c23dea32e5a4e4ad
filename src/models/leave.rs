//! Leave allocation and leave request models.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::scope::RoleId;

/// How many days of a leave type a role is entitled to per period.
///
/// # Example
///
/// ```
/// use school_calendar::models::{LeaveAllocation, RoleId};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let allocation = LeaveAllocation {
///     leave_type: "CASUAL".to_string(),
///     total_days: Decimal::new(12, 0),
///     max_carry_forward_days: Decimal::new(5, 0),
///     applies_to_all_roles: false,
///     role_ids: [RoleId::new("teacher")].into_iter().collect(),
///     effective_from: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
///     effective_to: Some(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()),
/// };
///
/// assert!(allocation.applies_to_role(&RoleId::new("teacher")));
/// assert!(!allocation.applies_to_role(&RoleId::new("accountant")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveAllocation {
    /// The leave type code (e.g. "CASUAL", "SICK").
    pub leave_type: String,
    /// Days granted per period.
    pub total_days: Decimal,
    /// Maximum unused days that may roll into the next period.
    pub max_carry_forward_days: Decimal,
    /// Whether the allocation applies to every role.
    #[serde(default)]
    pub applies_to_all_roles: bool,
    /// Roles the allocation applies to when it is not organization-wide.
    #[serde(default)]
    pub role_ids: BTreeSet<RoleId>,
    /// First day the allocation applies (inclusive).
    pub effective_from: NaiveDate,
    /// First day the allocation no longer applies (exclusive); open-ended if absent.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
}

impl LeaveAllocation {
    /// Checks whether the allocation is effective on `date`.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.effective_from && self.effective_to.is_none_or(|to| date < to)
    }

    /// Checks whether the allocation covers `role`.
    pub fn applies_to_role(&self, role: &RoleId) -> bool {
        self.applies_to_all_roles || self.role_ids.contains(role)
    }
}

/// A request for leave over an inclusive date range.
///
/// Half-day flags mark that only the second half of the first day, or the
/// first half of the last day, is taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// The leave type code.
    pub leave_type: String,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Whether the first day is a half day.
    #[serde(default)]
    pub half_day_start: bool,
    /// Whether the last day is a half day.
    #[serde(default)]
    pub half_day_end: bool,
}
