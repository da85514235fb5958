/// Audio surface: fire-and-forget cue requests from the game
use std::io::{stdout, Write};

use tracing::{debug, warn};

/// One-off sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Correct,
    GameOver,
}

/// Playback collaborator. None of these may fail or block from the caller's
/// point of view; a sink that cannot play something just drops it.
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
    fn start_ambient(&mut self);
    fn stop_ambient(&mut self);
}

/// Terminal playback: cues ring the bell, the ambient track is a looping flag
#[derive(Debug, Default)]
pub struct TerminalAudio {
    ambient_playing: bool,
}

impl TerminalAudio {
    pub const CUE_VOLUME: f32 = 0.7;
    pub const AMBIENT_VOLUME: f32 = 0.3;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn ambient_playing(&self) -> bool {
        self.ambient_playing
    }

    fn bell() -> std::io::Result<()> {
        let mut out = stdout();
        out.write_all(b"\x07")?;
        out.flush()
    }
}

impl AudioSink for TerminalAudio {
    fn play(&mut self, cue: Cue) {
        debug!(?cue, volume = Self::CUE_VOLUME, "play cue");
        if let Err(e) = Self::bell() {
            warn!(error = ?e, ?cue, "failed to play cue");
        }
    }

    fn start_ambient(&mut self) {
        // Restarting a playing loop is a no-op
        if !self.ambient_playing {
            debug!(volume = Self::AMBIENT_VOLUME, "ambient track started");
        }
        self.ambient_playing = true;
    }

    fn stop_ambient(&mut self) {
        if self.ambient_playing {
            debug!("ambient track stopped");
        }
        self.ambient_playing = false;
    }
}
