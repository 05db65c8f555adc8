//! Per-day check/cross marks for the progress tracker.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    #[default]
    Check,
    Cross,
}

impl Mark {
    pub fn symbol(self) -> char {
        match self {
            Mark::Check => '✓',
            Mark::Cross => '✗',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mark::Check => "check",
            Mark::Cross => "cross",
        })
    }
}

impl FromStr for Mark {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "check" | "✓" => Ok(Mark::Check),
            "cross" | "✗" => Ok(Mark::Cross),
            other => Err(ValidationError::InvalidValue {
                field: "mark".into(),
                message: format!("unknown mark '{other}' (expected check or cross)"),
            }),
        }
    }
}

/// Check/cross counts for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub checks: usize,
    pub crosses: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    marks: BTreeMap<NaiveDate, Mark>,
    /// Mark applied by [`ProgressTracker::mark_selected`].
    brush: Mark,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_on(&self, date: NaiveDate) -> Option<Mark> {
        self.marks.get(&date).copied()
    }

    pub fn selected_mark(&self) -> Mark {
        self.brush
    }

    pub fn select_mark(&mut self, mark: Mark) {
        self.brush = mark;
    }

    /// Apply `mark` to `date`.
    ///
    /// The same mark twice clears the day; a different mark replaces it.
    /// Returns what the day carries afterwards.
    pub fn mark(&mut self, date: NaiveDate, mark: Mark) -> Option<Mark> {
        if self.marks.get(&date) == Some(&mark) {
            self.marks.remove(&date);
            None
        } else {
            self.marks.insert(date, mark);
            Some(mark)
        }
    }

    pub fn mark_selected(&mut self, date: NaiveDate) -> Option<Mark> {
        self.mark(date, self.brush)
    }

    pub fn month_summary(&self, year: i32, month: u32) -> MonthSummary {
        self.marks
            .iter()
            .filter(|(d, _)| d.year() == year && d.month() == month)
            .fold(MonthSummary::default(), |mut acc, (_, mark)| {
                match mark {
                    Mark::Check => acc.checks += 1,
                    Mark::Cross => acc.crosses += 1,
                }
                acc
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    #[test]
    fn same_mark_twice_clears() {
        let mut tracker = ProgressTracker::new();
        assert_eq!(tracker.mark(date(1), Mark::Check), Some(Mark::Check));
        assert_eq!(tracker.mark(date(1), Mark::Check), None);
        assert_eq!(tracker.mark_on(date(1)), None);
    }

    #[test]
    fn other_mark_overwrites() {
        let mut tracker = ProgressTracker::new();
        tracker.mark(date(1), Mark::Check);
        assert_eq!(tracker.mark(date(1), Mark::Cross), Some(Mark::Cross));
        assert_eq!(tracker.mark_on(date(1)), Some(Mark::Cross));
    }

    #[test]
    fn brush_defaults_to_check() {
        let mut tracker = ProgressTracker::new();
        tracker.mark_selected(date(2));
        tracker.select_mark(Mark::Cross);
        tracker.mark_selected(date(3));
        assert_eq!(tracker.mark_on(date(2)), Some(Mark::Check));
        assert_eq!(tracker.mark_on(date(3)), Some(Mark::Cross));
    }

    #[test]
    fn summary_counts_only_that_month() {
        let mut tracker = ProgressTracker::new();
        tracker.mark(date(1), Mark::Check);
        tracker.mark(date(2), Mark::Check);
        tracker.mark(date(3), Mark::Cross);
        tracker.mark(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), Mark::Check);
        assert_eq!(
            tracker.month_summary(2024, 4),
            MonthSummary {
                checks: 2,
                crosses: 1
            }
        );
    }

    #[test]
    fn parses_marks() {
        assert_eq!("Cross".parse::<Mark>().unwrap(), Mark::Cross);
        assert!("maybe".parse::<Mark>().is_err());
    }
}
