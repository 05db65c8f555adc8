use chrono::{DateTime, Local, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::alarm::hhmm;
use crate::pomodoro::PomodoroMode;

/// Every state change in the system produces an Event.
/// Hosts render from them; the dashboard routes the ringing ones into the
/// alert sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    PomodoroStarted {
        mode: PomodoroMode,
        remaining_secs: u32,
        at: DateTime<Local>,
    },
    PomodoroPaused {
        mode: PomodoroMode,
        remaining_secs: u32,
        at: DateTime<Local>,
    },
    PomodoroReset {
        mode: PomodoroMode,
        remaining_secs: u32,
        at: DateTime<Local>,
    },
    ModeSelected {
        mode: PomodoroMode,
        remaining_secs: u32,
        at: DateTime<Local>,
    },
    /// Countdown reached zero. Emitted once per session.
    PomodoroCompleted {
        mode: PomodoroMode,
        description: String,
        at: DateTime<Local>,
    },
    /// An alarm matched the current minute.
    AlarmFired {
        alarm_id: Uuid,
        description: String,
        #[serde(with = "hhmm")]
        time: NaiveTime,
        repeat: bool,
        at: DateTime<Local>,
    },
    AlertRaised {
        description: String,
        at: DateTime<Local>,
    },
    AlertDismissed {
        description: String,
        at: DateTime<Local>,
    },
    AmbientToggled {
        playing: bool,
        at: DateTime<Local>,
    },
}

impl Event {
    /// Description to ring for events that raise an alert.
    pub fn ring_description(&self) -> Option<&str> {
        match self {
            Event::PomodoroCompleted { description, .. } | Event::AlarmFired { description, .. } => {
                Some(description)
            }
            _ => None,
        }
    }
}
