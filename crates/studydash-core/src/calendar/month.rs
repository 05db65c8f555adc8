use chrono::{Datelike, NaiveDate};

use crate::error::ValidationError;

fn invalid(year: i32, month: u32) -> ValidationError {
    ValidationError::InvalidMonth { year, month }
}

/// Day 1 of the month, or an error for month 0/13+ and out-of-range years.
pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, ValidationError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| invalid(year, month))
}

/// Gregorian day count, leap years included.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, ValidationError> {
    let first = first_of_month(year, month)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let next = first_of_month(next_year, next_month).map_err(|_| invalid(year, month))?;
    Ok(next.signed_duration_since(first).num_days() as u32)
}

/// Weekday of day 1, 0 = Sunday.
pub fn first_weekday(year: i32, month: u32) -> Result<u32, ValidationError> {
    Ok(first_of_month(year, month)?.weekday().num_days_from_sunday())
}

/// Move `delta` months forward (or back when negative).
pub fn shift_month(year: i32, month: u32, delta: i32) -> Result<(i32, u32), ValidationError> {
    first_of_month(year, month)?;
    let index = i64::from(year) * 12 + i64::from(month - 1) + i64::from(delta);
    let new_year = i32::try_from(index.div_euclid(12)).map_err(|_| invalid(year, month))?;
    let new_month = index.rem_euclid(12) as u32 + 1;
    first_of_month(new_year, new_month)?;
    Ok((new_year, new_month))
}

/// e.g. `February 2024`.
pub fn month_title(year: i32, month: u32) -> Result<String, ValidationError> {
    Ok(first_of_month(year, month)?.format("%B %Y").to_string())
}
