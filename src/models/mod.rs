//! Core data models for the Working-Day Calendar Engine.
//!
//! This module contains the calendar records the engine reads: weekly-off
//! policies, holidays, calendar exceptions, leave allocations, and the
//! per-organization snapshot that bundles them.

mod holiday;
mod leave;
mod organization;
mod scope;
mod weekly_off_policy;

pub use holiday::{CalendarException, Holiday, HolidayType, OverrideType};
pub use leave::{LeaveAllocation, LeaveRequest};
pub use organization::{Organization, OrganizationCalendar};
pub use scope::{ClassId, ClassScope, RoleId, ScopeMatch};
pub use weekly_off_policy::{SaturdayPattern, WeeklyOffPolicy};
