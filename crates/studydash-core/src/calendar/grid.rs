//! Month grid computation.
//!
//! A grid is a flat run of cells laid out Sunday-first: blank cells up to
//! the weekday of day 1, then one cell per day. Nothing pads the last week.
//! The result depends only on its inputs, so hosts can rebuild it on every
//! render.

use chrono::NaiveDate;
use serde::Serialize;

use super::month::{days_in_month, first_of_month, first_weekday, month_title};
use crate::error::ValidationError;

pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell<D> {
    pub date: NaiveDate,
    pub is_today: bool,
    pub decoration: D,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GridCell<D> {
    Blank,
    Day(DayCell<D>),
}

impl<D> GridCell<D> {
    pub fn as_day(&self) -> Option<&DayCell<D>> {
        match self {
            GridCell::Day(day) => Some(day),
            GridCell::Blank => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid<D> {
    year: i32,
    month: u32,
    cells: Vec<GridCell<D>>,
}

impl<D> MonthGrid<D> {
    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn cells(&self) -> &[GridCell<D>] {
        &self.cells
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|c| matches!(c, GridCell::Blank))
            .count()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell<D>> {
        self.cells.iter().filter_map(GridCell::as_day)
    }

    /// Day `n` of the month (1-based).
    pub fn day(&self, n: u32) -> Option<&DayCell<D>> {
        let n = usize::try_from(n).ok()?.checked_sub(1)?;
        self.cells.get(self.leading_blanks() + n)?.as_day()
    }

    /// Rows of seven cells; the last row may be short. Never more than six.
    pub fn weeks(&self) -> Vec<&[GridCell<D>]> {
        self.cells.chunks(7).collect()
    }

    pub fn title(&self) -> String {
        month_title(self.year, self.month).unwrap_or_default()
    }
}

/// Build the grid for `(year, month)`.
///
/// `today` marks the matching day cell; `decorate` is called once per day in
/// order and its result is stored on that day's cell.
pub fn month_grid<D, F>(
    year: i32,
    month: u32,
    today: NaiveDate,
    mut decorate: F,
) -> Result<MonthGrid<D>, ValidationError>
where
    F: FnMut(NaiveDate) -> D,
{
    let first = first_of_month(year, month)?;
    let blanks = first_weekday(year, month)? as usize;
    let days = days_in_month(year, month)?;

    let mut cells = Vec::with_capacity(blanks + days as usize);
    cells.extend((0..blanks).map(|_| GridCell::Blank));
    for date in first.iter_days().take(days as usize) {
        cells.push(GridCell::Day(DayCell {
            date,
            is_today: date == today,
            decoration: decorate(date),
        }));
    }

    Ok(MonthGrid { year, month, cells })
}
