//! Arrival alerts.
//!
//! The tracking loop calls [`AlertSink::trigger`] at most once per cycle,
//! when at least one aircraft entered the region. Sinks never block the
//! loop: failures are logged and dropped.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

/// Sample rate of the generated tone.
pub const SAMPLE_RATE: u32 = 44_100;

/// Default tone length in seconds.
pub const DEFAULT_BEEP_SECS: f64 = 0.5;

/// Default tone pitch.
pub const DEFAULT_BEEP_HZ: f64 = 1000.0;

/// File name used by [`write_default_beep`].
pub const DEFAULT_BEEP_FILE: &str = "beep.wav";

/// Errors raised while setting up an alert sink.
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("Sound file not found: {0}")]
    SoundFileMissing(PathBuf),

    #[error("Failed to write sound file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Something that can announce an arrival.
pub trait AlertSink: Send + Sync {
    /// Fire the alert. Must return without waiting for playback.
    fn trigger(&self);
}

/// Writes the ASCII bell to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl AlertSink for TerminalBell {
    fn trigger(&self) {
        let mut stdout = io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            warn!(error = %e, "Failed to ring terminal bell");
        }
    }
}

/// Does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAlert;

impl AlertSink for SilentAlert {
    fn trigger(&self) {}
}

/// Plays a WAV file through an external player such as `aplay` or `afplay`.
///
/// A new trigger stops a tone that is still playing.
pub struct CommandAlert {
    program: String,
    sound_file: PathBuf,
    playing: Mutex<Option<Child>>,
}

impl CommandAlert {
    /// Creates the sink, checking that `sound_file` exists.
    pub fn new(program: impl Into<String>, sound_file: impl Into<PathBuf>) -> Result<Self, AlertError> {
        let sound_file = sound_file.into();
        if !sound_file.is_file() {
            return Err(AlertError::SoundFileMissing(sound_file));
        }

        Ok(Self {
            program: program.into(),
            sound_file,
            playing: Mutex::new(None),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn sound_file(&self) -> &Path {
        &self.sound_file
    }
}

impl AlertSink for CommandAlert {
    fn trigger(&self) {
        let mut playing = self.playing.lock();

        if let Some(mut previous) = playing.take() {
            // Reap finished players, cut off running ones
            if let Ok(None) = previous.try_wait() {
                let _ = previous.kill();
                let _ = previous.wait();
            }
        }

        match Command::new(&self.program)
            .arg(&self.sound_file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => {
                debug!(program = %self.program, pid = child.id(), "Alert player started");
                *playing = Some(child);
            }
            Err(e) => warn!(program = %self.program, error = %e, "Failed to start alert player"),
        }
    }
}

impl Drop for CommandAlert {
    fn drop(&mut self) {
        if let Some(mut child) = self.playing.get_mut().take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Synthesizes a sine tone as an 8-bit unsigned mono PCM WAV file.
pub fn beep_wav(duration_secs: f64, frequency_hz: f64) -> Vec<u8> {
    let count = (duration_secs.max(0.0) * f64::from(SAMPLE_RATE)) as u32;
    let step = 2.0 * std::f64::consts::PI * frequency_hz / f64::from(SAMPLE_RATE);

    let mut wav = Vec::with_capacity(44 + count as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + count).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes()); // byte rate
    wav.extend_from_slice(&1u16.to_le_bytes()); // block align
    wav.extend_from_slice(&8u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&count.to_le_bytes());

    wav.extend((0..count).map(|i| (127.0 + 127.0 * (step * f64::from(i)).sin()) as u8));
    wav
}

/// Writes the default tone into `dir` and returns its path.
pub fn write_default_beep(dir: &Path) -> Result<PathBuf, AlertError> {
    let path = dir.join(DEFAULT_BEEP_FILE);
    fs::create_dir_all(dir)
        .and_then(|_| fs::write(&path, beep_wav(DEFAULT_BEEP_SECS, DEFAULT_BEEP_HZ)))
        .map_err(|source| AlertError::Write {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}
