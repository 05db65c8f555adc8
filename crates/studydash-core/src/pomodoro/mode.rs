use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// One of the three fixed-duration countdown presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PomodoroMode {
    #[default]
    #[serde(rename = "focus")]
    Focus,
    #[serde(rename = "short")]
    ShortBreak,
    #[serde(rename = "long")]
    LongBreak,
}

impl PomodoroMode {
    pub const ALL: [PomodoroMode; 3] = [
        PomodoroMode::Focus,
        PomodoroMode::ShortBreak,
        PomodoroMode::LongBreak,
    ];

    /// Fixed countdown length in seconds.
    pub fn duration_secs(self) -> u32 {
        match self {
            PomodoroMode::Focus => 25 * 60,
            PomodoroMode::ShortBreak => 5 * 60,
            PomodoroMode::LongBreak => 15 * 60,
        }
    }

    /// Short key used in completion messages and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            PomodoroMode::Focus => "focus",
            PomodoroMode::ShortBreak => "short",
            PomodoroMode::LongBreak => "long",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PomodoroMode::Focus => "Focus",
            PomodoroMode::ShortBreak => "Short Break",
            PomodoroMode::LongBreak => "Long Break",
        }
    }

    /// Label with the preset length, e.g. `Focus (25m)`.
    pub fn button_label(self) -> String {
        format!("{} ({}m)", self.label(), self.duration_secs() / 60)
    }

    /// Status line shown while this mode is counting down.
    pub fn running_status(self) -> &'static str {
        match self {
            PomodoroMode::Focus => "Focus time!",
            PomodoroMode::ShortBreak => "Short break",
            PomodoroMode::LongBreak => "Long break",
        }
    }

    pub fn completion_message(self) -> String {
        format!("Pomodoro {} session complete!", self.key())
    }
}

impl fmt::Display for PomodoroMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PomodoroMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" => Ok(PomodoroMode::Focus),
            "short" | "short-break" | "short_break" => Ok(PomodoroMode::ShortBreak),
            "long" | "long-break" | "long_break" => Ok(PomodoroMode::LongBreak),
            other => Err(ValidationError::InvalidValue {
                field: "mode".into(),
                message: format!("unknown pomodoro mode '{other}' (expected focus, short or long)"),
            }),
        }
    }
}

/// Render seconds as `MM:SS`, both fields zero padded to two digits.
pub fn format_mmss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_match_presets() {
        assert_eq!(PomodoroMode::Focus.duration_secs(), 1500);
        assert_eq!(PomodoroMode::ShortBreak.duration_secs(), 300);
        assert_eq!(PomodoroMode::LongBreak.duration_secs(), 900);
    }

    #[test]
    fn completion_message_uses_short_key() {
        assert_eq!(
            PomodoroMode::Focus.completion_message(),
            "Pomodoro focus session complete!"
        );
        assert_eq!(
            PomodoroMode::ShortBreak.completion_message(),
            "Pomodoro short session complete!"
        );
    }

    #[test]
    fn parses_keys_and_aliases() {
        assert_eq!("focus".parse::<PomodoroMode>().unwrap(), PomodoroMode::Focus);
        assert_eq!("Short".parse::<PomodoroMode>().unwrap(), PomodoroMode::ShortBreak);
        assert_eq!("long-break".parse::<PomodoroMode>().unwrap(), PomodoroMode::LongBreak);
        assert!("nap".parse::<PomodoroMode>().is_err());
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_mmss(1500), "25:00");
        assert_eq!(format_mmss(61), "01:01");
        assert_eq!(format_mmss(0), "00:00");
    }

    #[test]
    fn button_label_includes_minutes() {
        assert_eq!(PomodoroMode::LongBreak.button_label(), "Long Break (15m)");
    }
}
