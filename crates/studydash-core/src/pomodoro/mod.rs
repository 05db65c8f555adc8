mod engine;
mod mode;

pub use engine::{PomodoroEngine, PomodoroState, TICK_PERIOD};
pub use mode::{format_mmss, PomodoroMode};
