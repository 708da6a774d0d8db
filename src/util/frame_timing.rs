//! Frame pacing for real-time playback.

use web_time::{Duration, Instant};

/// Wall-clock pacing for real-time playback with a smoothed FPS readout.
pub struct FrameTiming {
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            min_frame_duration,
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Time left until the next frame is due (zero when already due).
    #[must_use]
    pub fn until_next_frame(&self) -> Duration {
        self.min_frame_duration
            .saturating_sub(self.last_frame.elapsed())
    }

    /// Returns true if enough time has passed to produce a frame.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.until_next_frame().is_zero()
    }

    /// Block the calling thread until the next frame is due.
    pub fn wait_for_frame(&self) {
        let remaining = self.until_next_frame();
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }

    /// Mark the end of a frame. Returns the wall-clock time since the previous
    /// frame, which real-time playback feeds to the engine as its timestep.
    pub fn end_frame(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        elapsed
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}
