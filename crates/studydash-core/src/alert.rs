//! The side-effect boundary shared by the Pomodoro timer and the alarms.
//!
//! At most one alert rings at a time. A new `notify` overwrites the current
//! description instead of queueing. The visual alert is the source of truth:
//! audio failures are logged and never change alert state.
//!
//! Ambient sound is an unrelated on/off toggle living next to the alert for
//! convenience. It has no timer and is not touched by `notify`/`dismiss`.

use chrono::Local;
use std::fmt;
use tracing::{debug, warn};

use crate::error::AudioError;
use crate::events::Event;

/// Volume the ambient cue plays at unless configured otherwise.
pub const DEFAULT_AMBIENT_VOLUME: f32 = 0.3;

/// A looping audio source the sink can drive.
pub trait AudioCue {
    /// Start (or continue) looping playback from the current position.
    fn play(&mut self) -> Result<(), AudioError>;

    /// Halt playback, keeping the current position.
    fn pause(&mut self) -> Result<(), AudioError>;

    /// Move the playback position back to the start.
    fn rewind(&mut self) -> Result<(), AudioError>;

    /// 0.0 ..= 1.0
    fn set_volume(&mut self, volume: f32) -> Result<(), AudioError>;
}

/// Cue that plays nothing. Used when audio is disabled and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCue;

impl AudioCue for SilentCue {
    fn play(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn pause(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn rewind(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn set_volume(&mut self, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }
}

pub struct AlertSink {
    current: Option<String>,
    ambient_playing: bool,
    alarm_cue: Box<dyn AudioCue>,
    ambient_cue: Box<dyn AudioCue>,
}

impl fmt::Debug for AlertSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertSink")
            .field("current", &self.current)
            .field("ambient_playing", &self.ambient_playing)
            .finish_non_exhaustive()
    }
}

impl Default for AlertSink {
    fn default() -> Self {
        Self::silent()
    }
}

impl AlertSink {
    pub fn new(
        alarm_cue: Box<dyn AudioCue>,
        ambient_cue: Box<dyn AudioCue>,
        ambient_volume: f32,
    ) -> Self {
        let mut sink = Self {
            current: None,
            ambient_playing: false,
            alarm_cue,
            ambient_cue,
        };
        let volume = ambient_volume.clamp(0.0, 1.0);
        report("ambient", "set_volume", sink.ambient_cue.set_volume(volume));
        sink
    }

    pub fn silent() -> Self {
        Self::new(
            Box::new(SilentCue),
            Box::new(SilentCue),
            DEFAULT_AMBIENT_VOLUME,
        )
    }

    /// Description of the ringing alert, if any.
    pub fn current_alert(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_ringing(&self) -> bool {
        self.current.is_some()
    }

    /// Ring `description`, replacing whatever was ringing.
    pub fn notify(&mut self, description: impl Into<String>) -> Event {
        let description = description.into();
        debug!(%description, replaced = self.current.is_some(), "alert raised");
        self.current = Some(description.clone());
        report("alarm", "rewind", self.alarm_cue.rewind());
        report("alarm", "play", self.alarm_cue.play());
        Event::AlertRaised {
            description,
            at: Local::now(),
        }
    }

    /// Clear the alert and silence the alarm cue. `None` if nothing rang.
    pub fn dismiss(&mut self) -> Option<Event> {
        let description = self.current.take()?;
        report("alarm", "pause", self.alarm_cue.pause());
        report("alarm", "rewind", self.alarm_cue.rewind());
        debug!(%description, "alert dismissed");
        Some(Event::AlertDismissed {
            description,
            at: Local::now(),
        })
    }

    pub fn ambient_playing(&self) -> bool {
        self.ambient_playing
    }

    pub fn play_ambient(&mut self) -> Event {
        report("ambient", "play", self.ambient_cue.play());
        self.ambient_playing = true;
        self.ambient_event()
    }

    pub fn pause_ambient(&mut self) -> Event {
        report("ambient", "pause", self.ambient_cue.pause());
        self.ambient_playing = false;
        self.ambient_event()
    }

    pub fn toggle_ambient(&mut self) -> Event {
        if self.ambient_playing {
            self.pause_ambient()
        } else {
            self.play_ambient()
        }
    }

    fn ambient_event(&self) -> Event {
        Event::AmbientToggled {
            playing: self.ambient_playing,
            at: Local::now(),
        }
    }
}

fn report(cue: &str, op: &str, result: Result<(), AudioError>) {
    if let Err(error) = result {
        warn!(cue, op, %error, "audio cue failed");
    }
}
