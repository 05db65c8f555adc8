use chrono::Datelike;
use studydash_core::calendar::{first_of_month, month_grid};
use studydash_core::{Clock, SystemClock, ValidationError};

use crate::render;

pub fn run(month: Option<&str>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let today = SystemClock.today();
    let (year, month) = match month {
        Some(raw) => parse_month(raw)?,
        None => (today.year(), today.month()),
    };
    let grid = month_grid(year, month, today, |_| ())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
    } else {
        print!("{}", render::calendar(&grid, |_| String::new()));
    }
    Ok(())
}

/// Parse `YYYY-MM`.
pub fn parse_month(raw: &str) -> Result<(i32, u32), ValidationError> {
    let invalid = || ValidationError::InvalidValue {
        field: "month".into(),
        message: format!("expected YYYY-MM, got '{raw}'"),
    };
    let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    first_of_month(year, month)?;
    Ok((year, month))
}
