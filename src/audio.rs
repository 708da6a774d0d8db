//! One-shot sound cues.
//!
//! Playback is fire-and-forget: nothing in the timeline waits on a sound.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// A sound triggered by a beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// The shot.
    Gunshot,
    /// The final scream.
    Scream,
}

impl Cue {
    /// Every cue.
    pub const ALL: [Cue; 2] = [Cue::Gunshot, Cue::Scream];

    /// Sound file, relative to the asset root.
    #[must_use]
    pub fn asset_path(self) -> &'static str {
        match self {
            Cue::Gunshot => "sounds/gunshot.mp3",
            Cue::Scream => "sounds/scream.mp3",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cue::Gunshot => f.write_str("gunshot"),
            Cue::Scream => f.write_str("scream"),
        }
    }
}

/// Plays cues.
pub trait AudioSink {
    /// Start playing `cue` at simulated time `at`.
    fn play(&mut self, cue: Cue, at: Duration);
}

/// Logs cues instead of playing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: Cue, at: Duration) {
        log::info!("[{:>7.3}s] cue: {cue} ({})", at.as_secs_f32(), cue.asset_path());
    }
}

/// Records cues into a shared list, for inspection after playback.
#[derive(Debug, Clone, Default)]
pub struct CueRecorder {
    played: Rc<RefCell<Vec<(Cue, Duration)>>>,
}

impl CueRecorder {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues played so far, with their times.
    #[must_use]
    pub fn played(&self) -> Vec<(Cue, Duration)> {
        self.played.borrow().clone()
    }
}

impl AudioSink for CueRecorder {
    fn play(&mut self, cue: Cue, at: Duration) {
        self.played.borrow_mut().push((cue, at));
    }
}
