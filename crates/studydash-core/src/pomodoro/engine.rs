//! Pomodoro countdown engine.
//!
//! A two-dimensional state machine: the selected [`PomodoroMode`] crossed with
//! whether the countdown is running. Running is not a stored flag; it is
//! exactly "the one-second poller is armed", so there is no way for the
//! engine to believe it is paused while a poller still ticks.
//!
//! ## State Transitions
//!
//! ```text
//! Paused --toggle--> Running --toggle--> Paused
//! Running --tick (remaining hits 0)--> Paused + PomodoroCompleted
//! any --select_mode / reset--> Paused (full duration)
//! ```

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::mode::{format_mmss, PomodoroMode};
use crate::clock::ClockPoller;
use crate::events::Event;

/// Countdown granularity.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Serializable view of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroState {
    pub mode: PomodoroMode,
    pub remaining_secs: u32,
    pub running: bool,
}

#[derive(Debug, Clone)]
pub struct PomodoroEngine {
    mode: PomodoroMode,
    remaining_secs: u32,
    poller: ClockPoller,
}

impl Default for PomodoroEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PomodoroEngine {
    /// Paused in Focus mode with the full 25 minutes.
    pub fn new() -> Self {
        Self {
            mode: PomodoroMode::Focus,
            remaining_secs: PomodoroMode::Focus.duration_secs(),
            poller: ClockPoller::new(TICK_PERIOD),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> PomodoroMode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.poller.is_active()
    }

    pub fn state(&self) -> PomodoroState {
        PomodoroState {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            running: self.is_running(),
        }
    }

    /// Remaining time as `MM:SS`.
    pub fn display(&self) -> String {
        format_mmss(self.remaining_secs)
    }

    pub fn status_text(&self) -> &'static str {
        if self.is_running() {
            self.mode.running_status()
        } else {
            "Ready to focus!"
        }
    }

    /// 0.0 .. 1.0 progress through the current mode.
    pub fn progress(&self) -> f64 {
        let total = self.mode.duration_secs();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs as f64 / total as f64)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.poller.next_deadline()
    }

    pub(crate) fn poller(&self) -> &ClockPoller {
        &self.poller
    }

    /// Sleep until the next tick is due. Pending forever while paused.
    pub async fn wait(&self) {
        self.poller.wait().await
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Switch preset. Always legal; stops any countdown first.
    pub fn select_mode(&mut self, mode: PomodoroMode) -> Event {
        self.poller.stop();
        self.mode = mode;
        self.remaining_secs = mode.duration_secs();
        debug!(%mode, "pomodoro mode selected");
        Event::ModeSelected {
            mode,
            remaining_secs: self.remaining_secs,
            at: Local::now(),
        }
    }

    /// Start when paused, pause when running.
    ///
    /// Returns `None` when asked to start a finished countdown: a session
    /// that reached zero must be reset or replaced by a mode change first.
    pub fn toggle(&mut self, now: Instant) -> Option<Event> {
        if self.is_running() {
            Some(self.pause())
        } else {
            self.start(now)
        }
    }

    pub fn start(&mut self, now: Instant) -> Option<Event> {
        if self.is_running() || self.remaining_secs == 0 {
            return None;
        }
        self.poller.start(now);
        debug!(mode = %self.mode, remaining = self.remaining_secs, "pomodoro started");
        Some(Event::PomodoroStarted {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Local::now(),
        })
    }

    pub fn pause(&mut self) -> Event {
        self.poller.stop();
        debug!(mode = %self.mode, remaining = self.remaining_secs, "pomodoro paused");
        Event::PomodoroPaused {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Local::now(),
        }
    }

    pub fn reset(&mut self) -> Event {
        self.poller.stop();
        self.remaining_secs = self.mode.duration_secs();
        debug!(mode = %self.mode, "pomodoro reset");
        Event::PomodoroReset {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Local::now(),
        }
    }

    /// One countdown second. Returns `Some(Event::PomodoroCompleted)` on the
    /// tick that reaches zero; ignored while paused.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running() || self.remaining_secs == 0 {
            return None;
        }

        self.remaining_secs -= 1;
        if self.remaining_secs > 0 {
            return None;
        }

        self.poller.stop();
        let description = self.mode.completion_message();
        info!(mode = %self.mode, "pomodoro session complete");
        Some(Event::PomodoroCompleted {
            mode: self.mode,
            description,
            at: Local::now(),
        })
    }

    /// Deliver every tick the poller owes at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<Event> {
        let due = self.poller.poll(now);
        for _ in 0..due {
            if let Some(event) = self.tick() {
                return Some(event);
            }
        }
        None
    }
}
