//! Property tests for working-day classification and counting.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use school_calendar::calculation::{WorkingDayCalendar, nth_weekday_of_month};
use school_calendar::models::{
    CalendarException, ClassId, ClassScope, Holiday, HolidayType, OverrideType, SaturdayPattern,
    WeeklyOffPolicy,
};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn pattern_strategy() -> impl Strategy<Value = SaturdayPattern> {
    prop_oneof![
        Just(SaturdayPattern::All),
        Just(SaturdayPattern::SecondOnly),
        Just(SaturdayPattern::SecondAndFourth),
        Just(SaturdayPattern::None),
    ]
}

/// Two back-to-back policies split at a random day of 2024.
fn policies_strategy() -> impl Strategy<Value = Vec<WeeklyOffPolicy>> {
    (any::<bool>(), pattern_strategy(), any::<bool>(), pattern_strategy(), 1i64..365).prop_map(
        |(sun_a, sat_a, sun_b, sat_b, split)| {
            let split_date = base_date() + Duration::days(split);
            vec![
                WeeklyOffPolicy {
                    sunday_off: sun_a,
                    saturday_pattern: sat_a,
                    effective_from: base_date(),
                    effective_to: Some(split_date),
                },
                WeeklyOffPolicy {
                    sunday_off: sun_b,
                    saturday_pattern: sat_b,
                    effective_from: split_date,
                    effective_to: None,
                },
            ]
        },
    )
}

/// Holidays on distinct days of 2024.
fn holidays_strategy() -> impl Strategy<Value = Vec<Holiday>> {
    prop::collection::btree_set(0i64..366, 0..20).prop_map(|offsets| {
        offsets
            .into_iter()
            .map(|offset| Holiday {
                date: base_date() + Duration::days(offset),
                holiday_type: HolidayType::Other,
                name: format!("Holiday {}", offset),
                scope: ClassScope::all(),
            })
            .collect()
    })
}

/// Exceptions on distinct days of 2024.
fn exceptions_strategy() -> impl Strategy<Value = Vec<CalendarException>> {
    prop::collection::btree_map(0i64..366, any::<bool>(), 0..20).prop_map(|days| {
        days.into_iter()
            .map(|(offset, working)| CalendarException {
                date: base_date() + Duration::days(offset),
                override_type: if working {
                    OverrideType::ForceWorking
                } else {
                    OverrideType::ForceHoliday
                },
                reason: format!("Exception {}", offset),
                scope: ClassScope::all(),
            })
            .collect()
    })
}

fn date_in_2024() -> impl Strategy<Value = NaiveDate> {
    (0i64..366).prop_map(|offset| base_date() + Duration::days(offset))
}

proptest! {
    #[test]
    fn classification_is_deterministic(
        policies in policies_strategy(),
        holidays in holidays_strategy(),
        exceptions in exceptions_strategy(),
        date in date_in_2024(),
    ) {
        let calendar = WorkingDayCalendar::new(&policies, &holidays, &exceptions).unwrap();
        let first = calendar.classify_day(date, None).unwrap();
        let second = calendar.classify_day(date, None).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn single_day_count_matches_classification(
        policies in policies_strategy(),
        holidays in holidays_strategy(),
        exceptions in exceptions_strategy(),
        date in date_in_2024(),
    ) {
        let calendar = WorkingDayCalendar::new(&policies, &holidays, &exceptions).unwrap();
        let expected = u32::from(calendar.is_working_day(date, None).unwrap());
        prop_assert_eq!(calendar.count_working_days(date, date, None).unwrap(), expected);
    }

    #[test]
    fn range_count_is_additive(
        policies in policies_strategy(),
        holidays in holidays_strategy(),
        exceptions in exceptions_strategy(),
        start_offset in 0i64..300,
        mid_len in 0i64..30,
        tail_len in 1i64..30,
    ) {
        let calendar = WorkingDayCalendar::new(&policies, &holidays, &exceptions).unwrap();
        let start = base_date() + Duration::days(start_offset);
        let mid = start + Duration::days(mid_len);
        let end = mid + Duration::days(tail_len);

        let whole = calendar.count_working_days(start, end, None).unwrap();
        let left = calendar.count_working_days(start, mid, None).unwrap();
        let right = calendar.count_working_days(mid + Duration::days(1), end, None).unwrap();
        prop_assert_eq!(whole, left + right);
    }

    #[test]
    fn exceptions_always_win(
        policies in policies_strategy(),
        holidays in holidays_strategy(),
        date in date_in_2024(),
        working in any::<bool>(),
    ) {
        let exceptions = vec![CalendarException {
            date,
            override_type: if working {
                OverrideType::ForceWorking
            } else {
                OverrideType::ForceHoliday
            },
            reason: "override".to_string(),
            scope: ClassScope::all(),
        }];
        let calendar = WorkingDayCalendar::new(&policies, &holidays, &exceptions).unwrap();
        prop_assert_eq!(calendar.is_working_day(date, None).unwrap(), working);
        prop_assert_eq!(
            calendar.is_working_day(date, Some(&ClassId::new("grade-1"))).unwrap(),
            working
        );
    }

    #[test]
    fn count_never_exceeds_calendar_days(
        policies in policies_strategy(),
        holidays in holidays_strategy(),
        start_offset in 0i64..300,
        len in 0i64..60,
    ) {
        let calendar = WorkingDayCalendar::new(&policies, &holidays, &[]).unwrap();
        let start = base_date() + Duration::days(start_offset);
        let end = start + Duration::days(len);
        let count = calendar.count_working_days(start, end, None).unwrap();
        prop_assert!(i64::from(count) <= len + 1);
    }

    #[test]
    fn weekday_ordinal_is_within_month(date in date_in_2024()) {
        let ordinal = nth_weekday_of_month(date);
        prop_assert!((1..=5).contains(&ordinal));
    }
}
