//! Crate-level error types.

use std::fmt;

/// Errors produced by the cutscene crate.
///
/// Playback itself never fails: missing assets, unresolved tween targets and
/// refused transform writes are logged and degrade to visual absence. These
/// variants cover the operations whose failure the caller has to see.
#[derive(Debug)]
pub enum CutsceneError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Frame trace serialization failure.
    Trace(String),
}

impl fmt::Display for CutsceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Trace(msg) => write!(f, "frame trace error: {msg}"),
        }
    }
}

impl std::error::Error for CutsceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CutsceneError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for CutsceneError {
    fn from(e: serde_json::Error) -> Self {
        Self::Trace(e.to_string())
    }
}
