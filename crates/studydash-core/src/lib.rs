//! # Studydash Core Library
//!
//! This library provides the core logic for the Studydash study dashboard.
//! Every feature is a plain owned value driven by the host: the CLI session
//! loop, a test, or any other frontend decides when time advances.
//!
//! ## Architecture
//!
//! - **Clock**: A re-armable periodic deadline ([`ClockPoller`]) plus a
//!   swappable wall clock ([`Clock`])
//! - **Calendar**: Pure month-grid computation shared by the task and
//!   progress views
//! - **Pomodoro**: A one-second countdown with focus/short/long modes
//! - **Alarms**: Time-of-day alarms checked on a coarse poll
//! - **Alerts**: A single-slot alert sink with audio cues
//!
//! ## Key Components
//!
//! - [`Dashboard`]: Owns one of every feature and routes completions to alerts
//! - [`PomodoroEngine`]: Countdown state machine
//! - [`AlarmScheduler`]: Sorted alarm collection
//! - [`Config`]: Application configuration management

pub mod alarm;
pub mod alert;
pub mod calendar;
pub mod clock;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod pomodoro;
pub mod progress;
pub mod storage;
pub mod task;

pub use alarm::{Alarm, AlarmScheduler};
pub use alert::{AlertSink, AudioCue, SilentCue};
pub use calendar::{month_grid, DayCell, GridCell, MonthGrid};
pub use clock::{Clock, ClockPoller, FixedClock, SystemClock};
pub use dashboard::{Dashboard, Tab};
pub use error::{AudioError, ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use pomodoro::{PomodoroEngine, PomodoroMode, PomodoroState};
pub use progress::{Mark, ProgressTracker};
pub use storage::Config;
pub use task::{DailyTasks, Task};
