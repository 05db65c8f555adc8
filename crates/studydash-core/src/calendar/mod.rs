//! Calendar month grids and month arithmetic.

mod grid;
mod month;

pub use grid::{month_grid, DayCell, GridCell, MonthGrid, WEEKDAY_HEADERS};
pub use month::{days_in_month, first_of_month, first_weekday, month_title, shift_month};
