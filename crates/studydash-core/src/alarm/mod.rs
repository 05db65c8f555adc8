pub mod hhmm;
mod scheduler;

pub use scheduler::{Alarm, AlarmScheduler, DEFAULT_POLL_PERIOD};
