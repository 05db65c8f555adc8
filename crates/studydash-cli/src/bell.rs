//! Terminal audio: the alert cue is the terminal bell.

use std::io::{self, Write};

use studydash_core::{AlertSink, AudioCue, AudioError, Config, SilentCue};

/// Rings the terminal bell on `play`. Volume zero mutes it.
pub struct BellCue<W: Write> {
    out: W,
    volume: f32,
}

impl BellCue<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> BellCue<W> {
    pub fn new(out: W) -> Self {
        Self { out, volume: 1.0 }
    }
}

impl<W: Write> AudioCue for BellCue<W> {
    fn play(&mut self) -> Result<(), AudioError> {
        if self.volume <= 0.0 {
            return Ok(());
        }
        self.out.write_all(b"\x07")?;
        self.out.flush()?;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn rewind(&mut self) -> Result<(), AudioError> {
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), AudioError> {
        self.volume = volume;
        Ok(())
    }
}

/// Alert sink wired for the terminal. The ambient loop has no terminal
/// rendition, so it stays silent and only its on/off state is shown.
pub fn alert_sink(config: &Config) -> AlertSink {
    let alarm: Box<dyn AudioCue> = if config.audio.enabled {
        Box::new(BellCue::stderr())
    } else {
        Box::new(SilentCue)
    };
    AlertSink::new(alarm, Box::new(SilentCue), config.audio.ambient_volume as f32)
}
