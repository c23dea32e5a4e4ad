//! Leave allocation rules.
//!
//! Validates allocation records, finds the allocation that governs a role's
//! leave of a given type on a date, and computes balances with the
//! carry-forward cap applied.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};
use crate::models::{LeaveAllocation, RoleId};

/// Upper bound on days granted by a single allocation.
pub const MAX_ALLOCATION_DAYS: Decimal = Decimal::from_parts(365, 0, 0, false, 0);

/// Lower bound on days granted by a single allocation (half a day).
pub const MIN_ALLOCATION_DAYS: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Checks the invariants of a leave allocation.
///
/// - `total_days` lies within 0.5 to 365
/// - `max_carry_forward_days` lies within 0 to `total_days`
/// - the allocation applies to all roles or names at least one role
/// - `effective_to`, if present, is after `effective_from`
///
/// # Example
///
/// ```
/// use school_calendar::calculation::validate_leave_allocation;
/// use school_calendar::models::LeaveAllocation;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut allocation = LeaveAllocation {
///     leave_type: "CASUAL".to_string(),
///     total_days: Decimal::new(12, 0),
///     max_carry_forward_days: Decimal::new(5, 0),
///     applies_to_all_roles: true,
///     role_ids: Default::default(),
///     effective_from: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
///     effective_to: None,
/// };
/// assert!(validate_leave_allocation(&allocation).is_ok());
///
/// allocation.max_carry_forward_days = Decimal::new(13, 0);
/// assert!(validate_leave_allocation(&allocation).is_err());
/// ```
pub fn validate_leave_allocation(allocation: &LeaveAllocation) -> CalendarResult<()> {
    let invalid = |message: String| CalendarError::InvalidLeaveAllocation {
        leave_type: allocation.leave_type.clone(),
        message,
    };

    if allocation.total_days < MIN_ALLOCATION_DAYS || allocation.total_days > MAX_ALLOCATION_DAYS {
        return Err(invalid(format!(
            "total_days must be between {} and {}, got {}",
            MIN_ALLOCATION_DAYS, MAX_ALLOCATION_DAYS, allocation.total_days
        )));
    }
    if allocation.max_carry_forward_days < Decimal::ZERO
        || allocation.max_carry_forward_days > allocation.total_days
    {
        return Err(invalid(format!(
            "max_carry_forward_days must be between 0 and total_days ({}), got {}",
            allocation.total_days, allocation.max_carry_forward_days
        )));
    }
    if !allocation.applies_to_all_roles && allocation.role_ids.is_empty() {
        return Err(invalid(
            "allocation must apply to all roles or list at least one role".to_string(),
        ));
    }
    if let Some(to) = allocation.effective_to {
        if to <= allocation.effective_from {
            return Err(invalid(format!(
                "effective_to {} must be after effective_from {}",
                to, allocation.effective_from
            )));
        }
    }
    Ok(())
}

/// Finds the allocation of `leave_type` that covers `role` on `date`.
///
/// An allocation naming the role beats one that applies to all roles. Two
/// candidates at the same specificity cannot be resolved and are reported as
/// [`CalendarError::AmbiguousScope`].
pub fn find_allocation<'a>(
    allocations: &'a [LeaveAllocation],
    leave_type: &str,
    role: &RoleId,
    date: NaiveDate,
) -> CalendarResult<Option<&'a LeaveAllocation>> {
    let (specific, general): (Vec<&LeaveAllocation>, Vec<&LeaveAllocation>) = allocations
        .iter()
        .filter(|a| a.leave_type == leave_type && a.contains_date(date) && a.applies_to_role(role))
        .partition(|a| a.role_ids.contains(role));

    let tier = if specific.is_empty() { general } else { specific };
    match tier.as_slice() {
        [] => Ok(None),
        [only] => Ok(Some(*only)),
        _ => Err(CalendarError::AmbiguousScope {
            kind: "leave allocation".to_string(),
            date,
            message: format!(
                "more than one '{}' allocation applies to role '{}'",
                leave_type, role
            ),
        }),
    }
}

/// A role's leave position for one allocation period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The leave type.
    pub leave_type: String,
    /// Days granted for the period.
    pub entitled: Decimal,
    /// Days carried in from the previous period, after the cap.
    pub carried_forward: Decimal,
    /// Days already taken.
    pub used: Decimal,
    /// Days still available; negative when overdrawn.
    pub remaining: Decimal,
    /// Days that would carry into the next period.
    pub next_carry_forward: Decimal,
}

/// Computes the balance for an allocation period.
///
/// Carried-in days are capped at the allocation's `max_carry_forward_days`,
/// and so is the amount that rolls into the next period.
///
/// # Example
///
/// ```
/// use school_calendar::calculation::calculate_leave_balance;
/// use school_calendar::models::LeaveAllocation;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let allocation = LeaveAllocation {
///     leave_type: "EARNED".to_string(),
///     total_days: Decimal::new(15, 0),
///     max_carry_forward_days: Decimal::new(5, 0),
///     applies_to_all_roles: true,
///     role_ids: Default::default(),
///     effective_from: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
///     effective_to: None,
/// };
///
/// let balance = calculate_leave_balance(&allocation, Decimal::new(8, 0), Decimal::new(35, 1));
/// assert_eq!(balance.carried_forward, Decimal::new(5, 0));
/// assert_eq!(balance.remaining, Decimal::new(165, 1));
/// assert_eq!(balance.next_carry_forward, Decimal::new(5, 0));
/// ```
pub fn calculate_leave_balance(
    allocation: &LeaveAllocation,
    carried_in: Decimal,
    used: Decimal,
) -> LeaveBalance {
    let carried_forward = carried_in
        .max(Decimal::ZERO)
        .min(allocation.max_carry_forward_days);
    let remaining = allocation.total_days + carried_forward - used;
    let next_carry_forward = remaining
        .max(Decimal::ZERO)
        .min(allocation.max_carry_forward_days);

    LeaveBalance {
        leave_type: allocation.leave_type.clone(),
        entitled: allocation.total_days,
        carried_forward,
        used,
        remaining,
        next_carry_forward,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn allocation(leave_type: &str, roles: &[&str]) -> LeaveAllocation {
        LeaveAllocation {
            leave_type: leave_type.to_string(),
            total_days: dec("12"),
            max_carry_forward_days: dec("5"),
            applies_to_all_roles: roles.is_empty(),
            role_ids: roles.iter().map(|r| RoleId::new(*r)).collect::<BTreeSet<_>>(),
            effective_from: date(2024, 4, 1),
            effective_to: Some(date(2025, 4, 1)),
        }
    }

    #[test]
    fn test_constants() {
        assert_eq!(MAX_ALLOCATION_DAYS, dec("365"));
        assert_eq!(MIN_ALLOCATION_DAYS, dec("0.5"));
    }

    #[test]
    fn test_valid_allocation() {
        assert!(validate_leave_allocation(&allocation("CASUAL", &[])).is_ok());
        assert!(validate_leave_allocation(&allocation("CASUAL", &["teacher"])).is_ok());
    }

    #[test]
    fn test_total_days_bounds() {
        let mut a = allocation("CASUAL", &[]);
        a.max_carry_forward_days = Decimal::ZERO;

        a.total_days = dec("0.5");
        assert!(validate_leave_allocation(&a).is_ok());
        a.total_days = dec("365");
        assert!(validate_leave_allocation(&a).is_ok());
        a.total_days = dec("0.25");
        assert!(validate_leave_allocation(&a).is_err());
        a.total_days = dec("365.5");
        assert!(validate_leave_allocation(&a).is_err());
    }

    #[test]
    fn test_carry_forward_cannot_exceed_total() {
        let mut a = allocation("CASUAL", &[]);
        a.max_carry_forward_days = dec("12");
        assert!(validate_leave_allocation(&a).is_ok());
        a.max_carry_forward_days = dec("12.5");
        assert!(validate_leave_allocation(&a).is_err());
        a.max_carry_forward_days = dec("-1");
        assert!(validate_leave_allocation(&a).is_err());
    }

    #[test]
    fn test_allocation_needs_roles() {
        let mut a = allocation("CASUAL", &[]);
        a.applies_to_all_roles = false;
        match validate_leave_allocation(&a) {
            Err(CalendarError::InvalidLeaveAllocation { leave_type, .. }) => {
                assert_eq!(leave_type, "CASUAL");
            }
            other => panic!("Expected InvalidLeaveAllocation, got {:?}", other),
        }
    }

    #[test]
    fn test_effective_to_must_follow_from() {
        let mut a = allocation("CASUAL", &[]);
        a.effective_to = Some(a.effective_from);
        assert!(validate_leave_allocation(&a).is_err());
    }

    #[test]
    fn test_find_allocation_prefers_role_specific() {
        let allocations = vec![
            allocation("CASUAL", &[]),
            LeaveAllocation {
                total_days: dec("15"),
                ..allocation("CASUAL", &["teacher"])
            },
        ];
        let found = find_allocation(
            &allocations,
            "CASUAL",
            &RoleId::new("teacher"),
            date(2024, 6, 1),
        )
        .unwrap()
        .unwrap();
        assert_eq!(found.total_days, dec("15"));

        let found = find_allocation(
            &allocations,
            "CASUAL",
            &RoleId::new("clerk"),
            date(2024, 6, 1),
        )
        .unwrap()
        .unwrap();
        assert_eq!(found.total_days, dec("12"));
    }

    #[test]
    fn test_find_allocation_specific_listed_first() {
        let allocations = vec![
            LeaveAllocation {
                total_days: dec("15"),
                ..allocation("CASUAL", &["teacher"])
            },
            allocation("CASUAL", &[]),
        ];
        let found = find_allocation(
            &allocations,
            "CASUAL",
            &RoleId::new("teacher"),
            date(2024, 6, 1),
        )
        .unwrap()
        .unwrap();
        assert_eq!(found.total_days, dec("15"));
    }

    #[test]
    fn test_find_allocation_respects_type_and_interval() {
        let allocations = vec![allocation("CASUAL", &[])];
        let role = RoleId::new("teacher");
        assert!(find_allocation(&allocations, "SICK", &role, date(2024, 6, 1))
            .unwrap()
            .is_none());
        assert!(find_allocation(&allocations, "CASUAL", &role, date(2025, 4, 1))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_find_allocation_ambiguous() {
        let allocations = vec![
            allocation("CASUAL", &["teacher"]),
            allocation("CASUAL", &["teacher"]),
        ];
        assert!(matches!(
            find_allocation(&allocations, "CASUAL", &RoleId::new("teacher"), date(2024, 6, 1)),
            Err(CalendarError::AmbiguousScope { .. })
        ));
    }

    #[test]
    fn test_balance_without_carry_forward() {
        let balance =
            calculate_leave_balance(&allocation("CASUAL", &[]), Decimal::ZERO, dec("4.5"));
        assert_eq!(balance.entitled, dec("12"));
        assert_eq!(balance.carried_forward, Decimal::ZERO);
        assert_eq!(balance.remaining, dec("7.5"));
        assert_eq!(balance.next_carry_forward, dec("5"));
    }

    #[test]
    fn test_balance_caps_carried_in_days() {
        let balance = calculate_leave_balance(&allocation("CASUAL", &[]), dec("9"), Decimal::ZERO);
        assert_eq!(balance.carried_forward, dec("5"));
        assert_eq!(balance.remaining, dec("17"));
    }

    #[test]
    fn test_overdrawn_balance_carries_nothing() {
        let balance = calculate_leave_balance(&allocation("CASUAL", &[]), Decimal::ZERO, dec("14"));
        assert_eq!(balance.remaining, dec("-2"));
        assert_eq!(balance.next_carry_forward, Decimal::ZERO);
    }

    #[test]
    fn test_negative_carry_in_treated_as_zero() {
        let balance = calculate_leave_balance(&allocation("CASUAL", &[]), dec("-3"), Decimal::ZERO);
        assert_eq!(balance.carried_forward, Decimal::ZERO);
    }
}
