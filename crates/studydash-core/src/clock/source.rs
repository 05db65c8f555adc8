use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Local wall-clock source. No timezone conversion happens anywhere.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    fn time_of_day(&self) -> NaiveTime {
        self.now().time()
    }
}

/// Reads the system local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a settable instant, for tests and simulations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Convenience constructor from `(y, m, d)` and `(h, min)`.
    /// Falls back to the Unix epoch date/midnight for out-of-range parts.
    pub fn at(date: (i32, u32, u32), time: (u32, u32)) -> Self {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap_or_default();
        let time = NaiveTime::from_hms_opt(time.0, time.1, 0).unwrap_or_default();
        Self::new(date.and_time(time))
    }

    pub fn set(&mut self, now: NaiveDateTime) {
        self.now = now;
    }

    pub fn advance(&mut self, by: chrono::Duration) {
        self.now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}
