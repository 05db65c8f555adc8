pub mod calendar;
pub mod completions;
pub mod config;
pub mod pomodoro;
pub mod session;
