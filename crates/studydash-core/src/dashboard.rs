//! The tabbed dashboard: one of each feature plus the shared alert sink.
//!
//! The dashboard is the only place the two timer-like features meet the
//! sink. Engines return events; [`Dashboard::poll`] forwards the ringing
//! ones to [`AlertSink::notify`], so neither engine holds a reference to
//! the sink.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::alarm::AlarmScheduler;
use crate::alert::AlertSink;
use crate::calendar::{month_grid, shift_month, MonthGrid};
use crate::clock::Clock;
use crate::error::ValidationError;
use crate::events::Event;
use crate::pomodoro::PomodoroEngine;
use crate::progress::{Mark, ProgressTracker};
use crate::storage::Config;
use crate::task::DailyTasks;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Daily,
    Progress,
    Pomodoro,
    Alarms,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Daily, Tab::Progress, Tab::Pomodoro, Tab::Alarms];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Daily => "Daily Tasks",
            Tab::Progress => "Progress Tracker",
            Tab::Pomodoro => "Pomodoro Timer",
            Tab::Alarms => "Alarms",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tab::Daily => "daily",
            Tab::Progress => "progress",
            Tab::Pomodoro => "pomodoro",
            Tab::Alarms => "alarms",
        })
    }
}

impl FromStr for Tab {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "tab".into(),
                message: format!("unknown tab '{}'", s.trim()),
            })
    }
}

#[derive(Debug)]
pub struct Dashboard {
    tab: Tab,
    tasks: DailyTasks,
    progress: ProgressTracker,
    pomodoro: PomodoroEngine,
    alarms: AlarmScheduler,
    alerts: AlertSink,
    /// Month shown on the task calendar.
    task_month: (i32, u32),
    /// Month shown on the progress calendar.
    progress_month: (i32, u32),
}

impl Dashboard {
    /// Build a dashboard opened on the daily tab with the alarm poller armed.
    pub fn new(today: NaiveDate, alerts: AlertSink, alarm_poll: Duration, now: Instant) -> Self {
        let mut alarms = AlarmScheduler::with_poll_period(alarm_poll);
        alarms.start(now);
        let month = (today.year(), today.month());
        Self {
            tab: Tab::Daily,
            tasks: DailyTasks::new(today),
            progress: ProgressTracker::new(),
            pomodoro: PomodoroEngine::new(),
            alarms,
            alerts,
            task_month: month,
            progress_month: month,
        }
    }

    pub fn from_config(config: &Config, alerts: AlertSink, today: NaiveDate, now: Instant) -> Self {
        let mut dashboard = Self::new(today, alerts, config.alarm_poll_period(), now);
        dashboard.tab = config.ui.default_tab;
        dashboard
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn tasks(&self) -> &DailyTasks {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut DailyTasks {
        &mut self.tasks
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut ProgressTracker {
        &mut self.progress
    }

    pub fn pomodoro(&self) -> &PomodoroEngine {
        &self.pomodoro
    }

    pub fn pomodoro_mut(&mut self) -> &mut PomodoroEngine {
        &mut self.pomodoro
    }

    pub fn alarms(&self) -> &AlarmScheduler {
        &self.alarms
    }

    pub fn alarms_mut(&mut self) -> &mut AlarmScheduler {
        &mut self.alarms
    }

    pub fn alerts(&self) -> &AlertSink {
        &self.alerts
    }

    pub fn alerts_mut(&mut self) -> &mut AlertSink {
        &mut self.alerts
    }

    pub fn dismiss_alert(&mut self) -> Option<Event> {
        self.alerts.dismiss()
    }

    // ── Calendars ────────────────────────────────────────────────────

    pub fn task_month(&self) -> (i32, u32) {
        self.task_month
    }

    pub fn progress_month(&self) -> (i32, u32) {
        self.progress_month
    }

    pub fn shift_task_month(&mut self, delta: i32) -> Result<(), ValidationError> {
        self.task_month = shift_month(self.task_month.0, self.task_month.1, delta)?;
        Ok(())
    }

    pub fn shift_progress_month(&mut self, delta: i32) -> Result<(), ValidationError> {
        self.progress_month = shift_month(self.progress_month.0, self.progress_month.1, delta)?;
        Ok(())
    }

    /// Task calendar, each day decorated with its dot count.
    pub fn task_calendar(&self, today: NaiveDate) -> Result<MonthGrid<usize>, ValidationError> {
        let (year, month) = self.task_month;
        month_grid(year, month, today, |date| self.tasks.dot_count(date))
    }

    /// Progress calendar, each day decorated with its mark.
    pub fn progress_calendar(
        &self,
        today: NaiveDate,
    ) -> Result<MonthGrid<Option<Mark>>, ValidationError> {
        let (year, month) = self.progress_month;
        month_grid(year, month, today, |date| self.progress.mark_on(date))
    }

    // ── Polling ──────────────────────────────────────────────────────

    /// Earliest instant at which [`Dashboard::poll`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.pomodoro.next_deadline(), self.alarms.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Sleep until the earliest poller deadline.
    ///
    /// Pending forever when neither poller is armed, so a host loop can
    /// `select!` on it unconditionally.
    pub async fn wait(&self) {
        let pomodoro = self.pomodoro.poller();
        let alarms = self.alarms.poller();
        let earliest = match (pomodoro.next_deadline(), alarms.next_deadline()) {
            (Some(p), Some(a)) if a < p => alarms,
            (Some(_), _) => pomodoro,
            _ => alarms,
        };
        earliest.wait().await
    }

    /// Drive both engines and ring the sink for every completion or fire.
    ///
    /// Returns the engine events followed, for each ringing one, by the
    /// matching `AlertRaised`.
    pub fn poll(&mut self, now: Instant, clock: &dyn Clock) -> Vec<Event> {
        let mut events: Vec<Event> = self.pomodoro.poll(now).into_iter().collect();
        events.extend(self.alarms.poll(now, clock));

        let rings: Vec<String> = events
            .iter()
            .filter_map(|e| e.ring_description().map(str::to_owned))
            .collect();
        for description in rings {
            events.push(self.alerts.notify(description));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::DEFAULT_POLL_PERIOD;
    use crate::clock::FixedClock;
    use crate::pomodoro::PomodoroMode;

    fn dashboard(clock: &FixedClock, now: Instant) -> Dashboard {
        Dashboard::new(clock.today(), AlertSink::silent(), DEFAULT_POLL_PERIOD, now)
    }

    #[test]
    fn alarm_fire_rings_the_sink() {
        let clock = FixedClock::at((2024, 3, 1), (9, 0));
        let t0 = Instant::now();
        let mut dash = dashboard(&clock, t0);
        dash.alarms_mut().add("Study", "09:00", false).unwrap();

        let events = dash.poll(t0 + DEFAULT_POLL_PERIOD, &clock);
        assert!(events.iter().any(|e| matches!(e, Event::AlarmFired { .. })));
        assert!(events.iter().any(|e| matches!(e, Event::AlertRaised { .. })));
        assert_eq!(dash.alerts().current_alert(), Some("Study"));
        assert!(dash.alarms().is_empty());
    }

    #[test]
    fn pomodoro_completion_rings_the_sink() {
        let clock = FixedClock::at((2024, 3, 1), (8, 0));
        let t0 = Instant::now();
        let mut dash = dashboard(&clock, t0);
        dash.pomodoro_mut().select_mode(PomodoroMode::ShortBreak);
        dash.pomodoro_mut().toggle(t0);

        dash.poll(t0 + Duration::from_secs(300), &clock);
        assert_eq!(
            dash.alerts().current_alert(),
            Some("Pomodoro short session complete!")
        );
        assert!(!dash.pomodoro().is_running());
    }

    #[test]
    fn later_ring_overwrites_earlier() {
        let clock = FixedClock::at((2024, 3, 1), (9, 0));
        let t0 = Instant::now();
        let mut dash = dashboard(&clock, t0);
        dash.alarms_mut().add("First", "09:00", false).unwrap();
        dash.alarms_mut().add("Second", "09:00", false).unwrap();

        dash.poll(t0 + DEFAULT_POLL_PERIOD, &clock);
        assert_eq!(dash.alerts().current_alert(), Some("Second"));
        assert!(dash.dismiss_alert().is_some());
        assert_eq!(dash.alerts().current_alert(), None);
    }

    #[test]
    fn next_deadline_prefers_the_running_pomodoro() {
        let clock = FixedClock::at((2024, 3, 1), (9, 0));
        let t0 = Instant::now();
        let mut dash = dashboard(&clock, t0);
        assert_eq!(dash.next_deadline(), Some(t0 + DEFAULT_POLL_PERIOD));
        dash.pomodoro_mut().toggle(t0);
        assert_eq!(dash.next_deadline(), Some(t0 + Duration::from_secs(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_wakes_at_the_earliest_deadline() {
        let clock = FixedClock::at((2024, 3, 1), (9, 0));
        let start = tokio::time::Instant::now();
        let t0 = start.into_std();
        let mut dash = dashboard(&clock, t0);

        dash.wait().await;
        assert_eq!(start.elapsed(), DEFAULT_POLL_PERIOD);

        let restart = tokio::time::Instant::now();
        dash.pomodoro_mut().toggle(restart.into_std());
        dash.wait().await;
        assert_eq!(restart.elapsed(), Duration::from_secs(1));
    }

    #[test]
    fn task_calendar_carries_dot_counts() {
        let clock = FixedClock::at((2024, 2, 10), (9, 0));
        let mut dash = dashboard(&clock, Instant::now());
        dash.tasks_mut().add_to_selected("a").unwrap();
        dash.tasks_mut().add_to_selected("b").unwrap();

        let grid = dash.task_calendar(clock.today()).unwrap();
        let cell = grid.day(10).unwrap();
        assert!(cell.is_today);
        assert_eq!(cell.decoration, 2);
    }

    #[test]
    fn progress_calendar_navigates_independently() {
        let clock = FixedClock::at((2024, 12, 5), (9, 0));
        let mut dash = dashboard(&clock, Instant::now());
        dash.shift_progress_month(1).unwrap();
        assert_eq!(dash.progress_month(), (2025, 1));
        assert_eq!(dash.task_month(), (2024, 12));

        let jan_2 = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        dash.progress_mut().mark(jan_2, Mark::Cross);
        let grid = dash.progress_calendar(clock.today()).unwrap();
        assert_eq!(grid.day(2).unwrap().decoration, Some(Mark::Cross));
        assert!(grid.days().all(|d| !d.is_today));
    }

    #[test]
    fn tab_parses_and_displays() {
        assert_eq!("Alarms".parse::<Tab>().unwrap(), Tab::Alarms);
        assert!("settings".parse::<Tab>().is_err());
        assert_eq!(Tab::Pomodoro.label(), "Pomodoro Timer");
    }

    #[test]
    fn from_config_applies_tab_and_poll_period() {
        let mut config = Config::default();
        config.apply("ui.default_tab", "pomodoro").unwrap();
        config.apply("alarms.poll_interval_secs", "10").unwrap();
        let t0 = Instant::now();
        let dash = Dashboard::from_config(
            &config,
            AlertSink::silent(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            t0,
        );
        assert_eq!(dash.tab(), Tab::Pomodoro);
        assert_eq!(dash.alarms().poll_period(), Duration::from_secs(10));
    }
}
