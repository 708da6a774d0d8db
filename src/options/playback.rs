use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the cinematic is driven.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Playback", inline)]
#[serde(default)]
pub struct PlaybackOptions {
    /// Frames per second; also the fixed timestep of headless playback.
    #[schemars(title = "FPS", range(min = 1, max = 240))]
    pub fps: u32,
    /// Pace frames against the wall clock instead of running flat out.
    #[schemars(title = "Real Time")]
    pub realtime: bool,
    /// Stop after this much simulated time even if the timeline stalls.
    #[schemars(title = "Max Duration (s)", range(min = 1.0, max = 3600.0))]
    pub max_duration_secs: f32,
    /// Simulated time to keep running after the last beat, so the finale
    /// settles in the trace.
    #[schemars(skip)]
    pub tail_secs: f32,
    /// Write every n-th frame to the trace.
    #[schemars(skip)]
    pub trace_stride: u32,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            realtime: false,
            max_duration_secs: 180.0,
            tail_secs: 0.5,
            trace_stride: 6,
        }
    }
}
