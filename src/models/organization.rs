//! Organization calendar snapshot.
//!
//! An [`OrganizationCalendar`] bundles everything the engine reads for one
//! tenant. It is built once (usually by the configuration loader) and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

use super::holiday::{CalendarException, Holiday};
use super::leave::LeaveAllocation;
use super::weekly_off_policy::WeeklyOffPolicy;

/// Identifying information about an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// The tenant identifier.
    pub id: String,
    /// The display name.
    pub name: String,
}

/// The immutable calendar snapshot of one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationCalendar {
    /// The organization the snapshot belongs to.
    pub organization: Organization,
    /// Weekly-off policies, sorted by `effective_from`.
    pub policies: Vec<WeeklyOffPolicy>,
    /// Holidays, sorted by date.
    pub holidays: Vec<Holiday>,
    /// Calendar exceptions, sorted by date.
    pub exceptions: Vec<CalendarException>,
    /// Leave allocations.
    pub leave_allocations: Vec<LeaveAllocation>,
}

impl OrganizationCalendar {
    /// Creates a snapshot with records sorted chronologically.
    pub fn new(
        organization: Organization,
        policies: Vec<WeeklyOffPolicy>,
        holidays: Vec<Holiday>,
        exceptions: Vec<CalendarException>,
        leave_allocations: Vec<LeaveAllocation>,
    ) -> Self {
        let mut policies = policies;
        policies.sort_by(|a, b| a.effective_from.cmp(&b.effective_from));
        let mut holidays = holidays;
        holidays.sort_by(|a, b| a.date.cmp(&b.date));
        let mut exceptions = exceptions;
        exceptions.sort_by(|a, b| a.date.cmp(&b.date));
        Self {
            organization,
            policies,
            holidays,
            exceptions,
            leave_allocations,
        }
    }

    /// Returns the organization id.
    pub fn id(&self) -> &str {
        &self.organization.id
    }
}
