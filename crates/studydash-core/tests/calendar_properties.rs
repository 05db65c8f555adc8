//! Property tests for month grid layout.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use studydash_core::calendar::{days_in_month, month_grid, shift_month, GridCell};

fn gregorian_days(year: i32, month: u32) -> u32 {
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if leap => 29,
        _ => 28,
    }
}

proptest! {
    #[test]
    fn leading_blanks_match_first_weekday(year in 1900i32..2200, month in 1u32..=12) {
        let today = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let grid = month_grid(year, month, today, |_| ()).unwrap();
        let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        prop_assert_eq!(
            grid.leading_blanks() as u32,
            first.weekday().num_days_from_sunday()
        );
        prop_assert!(grid.weeks().len() <= 6);
    }

    #[test]
    fn day_cells_follow_the_gregorian_calendar(year in 1900i32..2200, month in 1u32..=12) {
        let today = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let grid = month_grid(year, month, today, |_| ()).unwrap();
        let expected = gregorian_days(year, month);

        prop_assert_eq!(days_in_month(year, month).unwrap(), expected);
        prop_assert_eq!(grid.days().count() as u32, expected);
        for (n, day) in grid.days().enumerate() {
            prop_assert_eq!(day.date.day(), n as u32 + 1);
        }
        // Blanks only lead; nothing pads the last week.
        let mut trailing = grid.cells().iter().skip(grid.leading_blanks());
        prop_assert!(trailing.all(|c| matches!(c, GridCell::Day(_))));
    }

    #[test]
    fn exactly_one_today(year in 1990i32..2060, month in 1u32..=12, day in 1u32..=28) {
        let today = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let grid = month_grid(year, month, today, |_| ()).unwrap();
        let marked: Vec<_> = grid.days().filter(|d| d.is_today).map(|d| d.date).collect();
        prop_assert_eq!(marked, vec![today]);
    }

    #[test]
    fn grid_is_deterministic(year in 1900i32..2200, month in 1u32..=12) {
        let today = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        let a = month_grid(year, month, today, |d| d.ordinal()).unwrap();
        let b = month_grid(year, month, today, |d| d.ordinal()).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn shifting_forward_then_back_is_identity(
        year in 1900i32..2200,
        month in 1u32..=12,
        delta in -60i32..60,
    ) {
        let (y, m) = shift_month(year, month, delta).unwrap();
        prop_assert!((1..=12).contains(&m));
        prop_assert_eq!(shift_month(y, m, -delta).unwrap(), (year, month));
    }
}
