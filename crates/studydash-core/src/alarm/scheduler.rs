//! Daily time-of-day alarms.
//!
//! Firing is a level-triggered comparison of the current minute against
//! each alarm's `HH:MM`. With the default 30 second poll two polls can land
//! in the same matching minute, so a repeating alarm may ring twice in that
//! minute; a one-shot alarm cannot, because it is removed on the first fire.
//! There is no catch-up for minutes no poll landed in.

use chrono::{Local, NaiveTime};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

use super::hhmm;
use crate::clock::{Clock, ClockPoller};
use crate::error::ValidationError;
use crate::events::Event;

/// Poll cadence. Must stay at or below one minute to bound missed fires.
pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: Uuid,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub description: String,
    pub repeat: bool,
}

impl Alarm {
    pub fn time_label(&self) -> String {
        hhmm::format(self.time)
    }

    pub fn repeat_label(&self) -> &'static str {
        if self.repeat {
            "Daily"
        } else {
            "One Time"
        }
    }
}

#[derive(Debug, Clone)]
pub struct AlarmScheduler {
    /// Sorted by `time`; equal times keep insertion order.
    alarms: Vec<Alarm>,
    poller: ClockPoller,
}

impl Default for AlarmScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl AlarmScheduler {
    pub fn new() -> Self {
        Self::with_poll_period(DEFAULT_POLL_PERIOD)
    }

    pub fn with_poll_period(period: Duration) -> Self {
        Self {
            alarms: Vec::new(),
            poller: ClockPoller::new(period),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Alarms in display order.
    pub fn alarms(&self) -> &[Alarm] {
        &self.alarms
    }

    pub fn get(&self, id: Uuid) -> Option<&Alarm> {
        self.alarms.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_active()
    }

    pub fn poll_period(&self) -> Duration {
        self.poller.period()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.poller.next_deadline()
    }

    pub(crate) fn poller(&self) -> &ClockPoller {
        &self.poller
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Add an alarm from raw form input.
    ///
    /// Rejected input leaves the set untouched.
    pub fn add(
        &mut self,
        description: &str,
        time: &str,
        repeat: bool,
    ) -> Result<Uuid, ValidationError> {
        let time = hhmm::parse(time)?;
        self.add_at(description, time, repeat)
    }

    /// Add an alarm with an already parsed time. Seconds are discarded.
    pub fn add_at(
        &mut self,
        description: &str,
        time: NaiveTime,
        repeat: bool,
    ) -> Result<Uuid, ValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::Empty {
                field: "description",
            });
        }

        let alarm = Alarm {
            id: Uuid::new_v4(),
            time: hhmm::truncate(time),
            description: description.to_string(),
            repeat,
        };
        let id = alarm.id;
        let idx = self.alarms.partition_point(|a| a.time <= alarm.time);
        debug!(%id, time = %alarm.time_label(), repeat, "alarm added");
        self.alarms.insert(idx, alarm);
        Ok(id)
    }

    /// Remove by id. Returns `false` when no such alarm exists.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.alarms.len();
        self.alarms.retain(|a| a.id != id);
        let removed = self.alarms.len() != before;
        if removed {
            debug!(%id, "alarm removed");
        }
        removed
    }

    pub fn start(&mut self, now: Instant) {
        self.poller.start(now);
    }

    pub fn stop(&mut self) {
        self.poller.stop();
    }

    /// Compare every alarm against `now` truncated to the minute.
    ///
    /// Each match yields one `AlarmFired`; non-repeating matches are removed.
    pub fn check(&mut self, now: NaiveTime) -> Vec<Event> {
        let minute = hhmm::truncate(now);
        let mut fired = Vec::new();
        self.alarms.retain(|alarm| {
            if alarm.time != minute {
                return true;
            }
            info!(id = %alarm.id, time = %alarm.time_label(), "alarm fired");
            fired.push(Event::AlarmFired {
                alarm_id: alarm.id,
                description: alarm.description.clone(),
                time: alarm.time,
                repeat: alarm.repeat,
                at: Local::now(),
            });
            alarm.repeat
        });
        fired
    }

    /// Run one check if the poller is due at `now`.
    ///
    /// Several overdue periods collapse into a single check of the current
    /// minute: the comparison has no memory of the minutes it missed.
    pub fn poll(&mut self, now: Instant, clock: &dyn Clock) -> Vec<Event> {
        if self.poller.poll(now) == 0 {
            return Vec::new();
        }
        self.check(clock.time_of_day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn times(scheduler: &AlarmScheduler) -> Vec<String> {
        scheduler.alarms().iter().map(Alarm::time_label).collect()
    }

    #[test]
    fn one_shot_alarm_fires_once_and_is_removed() {
        let mut scheduler = AlarmScheduler::new();
        scheduler.add("Study", "09:00", false).unwrap();

        let fired = scheduler.check(at(9, 0));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].ring_description(), Some("Study"));
        assert!(scheduler.is_empty());

        assert!(scheduler.check(at(9, 0)).is_empty());
    }

    #[test]
    fn repeating_alarm_fires_and_stays_unchanged() {
        let mut scheduler = AlarmScheduler::new();
        let id = scheduler.add("Study", "09:00", true).unwrap();
        let before = scheduler.get(id).cloned().unwrap();

        let fired = scheduler.check(at(9, 0));
        assert_eq!(fired.len(), 1);
        assert_eq!(scheduler.get(id), Some(&before));
    }

    #[test]
    fn check_ignores_seconds() {
        let mut scheduler = AlarmScheduler::new();
        scheduler.add("Stretch", "14:30", false).unwrap();
        let fired = scheduler.check(NaiveTime::from_hms_opt(14, 30, 45).unwrap());
        assert_eq!(fired.len(), 1);
    }

    #[test]
    fn non_matching_minute_does_nothing() {
        let mut scheduler = AlarmScheduler::new();
        scheduler.add("Study", "09:00", false).unwrap();
        assert!(scheduler.check(at(9, 1)).is_empty());
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn keeps_alarms_sorted_by_time() {
        let mut scheduler = AlarmScheduler::new();
        scheduler.add("c", "10:00", false).unwrap();
        scheduler.add("a", "08:00", false).unwrap();
        scheduler.add("b", "09:00", false).unwrap();
        assert_eq!(times(&scheduler), vec!["08:00", "09:00", "10:00"]);
    }

    #[test]
    fn equal_times_keep_insertion_order() {
        let mut scheduler = AlarmScheduler::new();
        scheduler.add("first", "09:00", false).unwrap();
        scheduler.add("early", "07:00", false).unwrap();
        scheduler.add("second", "09:00", false).unwrap();
        let names: Vec<&str> = scheduler
            .alarms()
            .iter()
            .map(|a| a.description.as_str())
            .collect();
        assert_eq!(names, vec!["early", "first", "second"]);
    }

    #[test]
    fn rejects_bad_input_without_mutation() {
        let mut scheduler = AlarmScheduler::new();
        assert_eq!(
            scheduler.add("   ", "09:00", false),
            Err(ValidationError::Empty {
                field: "description"
            })
        );
        assert!(matches!(
            scheduler.add("Study", "9am", false),
            Err(ValidationError::InvalidTime(_))
        ));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn description_is_trimmed() {
        let mut scheduler = AlarmScheduler::new();
        let id = scheduler.add("  Review notes ", "18:00", false).unwrap();
        assert_eq!(scheduler.get(id).unwrap().description, "Review notes");
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut scheduler = AlarmScheduler::new();
        let id = scheduler.add("Study", "09:00", false).unwrap();
        assert!(!scheduler.remove(Uuid::new_v4()));
        assert!(scheduler.remove(id));
        assert!(!scheduler.remove(id));
    }

    #[test]
    fn poll_checks_only_when_due() {
        let mut scheduler = AlarmScheduler::new();
        scheduler.add("Study", "09:00", true).unwrap();
        let clock = FixedClock::at((2024, 3, 1), (9, 0));
        let t0 = Instant::now();
        scheduler.start(t0);

        assert!(scheduler.poll(t0 + Duration::from_secs(10), &clock).is_empty());
        assert_eq!(scheduler.poll(t0 + Duration::from_secs(30), &clock).len(), 1);
        // Second poll in the same minute rings a repeating alarm again.
        assert_eq!(scheduler.poll(t0 + Duration::from_secs(60), &clock).len(), 1);
    }

    #[test]
    fn stopped_scheduler_never_fires() {
        let mut scheduler = AlarmScheduler::new();
        scheduler.add("Study", "09:00", false).unwrap();
        let clock = FixedClock::at((2024, 3, 1), (9, 0));
        let t0 = Instant::now();
        scheduler.start(t0);
        scheduler.stop();
        assert!(scheduler.poll(t0 + Duration::from_secs(600), &clock).is_empty());
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn alarm_serializes_time_as_hhmm() {
        let mut scheduler = AlarmScheduler::new();
        scheduler.add("Study", "07:05", true).unwrap();
        let json = serde_json::to_value(&scheduler.alarms()[0]).unwrap();
        assert_eq!(json["time"], "07:05");
        assert_eq!(scheduler.alarms()[0].repeat_label(), "Daily");
    }

    #[test]
    fn fired_event_is_tagged() {
        let mut scheduler = AlarmScheduler::new();
        scheduler.add("Study", "09:00", false).unwrap();
        let fired = scheduler.check(at(9, 0));
        let json = serde_json::to_value(&fired[0]).unwrap();
        assert_eq!(json["type"], "AlarmFired");
        assert_eq!(json["time"], "09:00");
    }
}
