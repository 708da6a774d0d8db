//! Running the engine to the end.

use std::time::Duration;

use super::CutsceneEngine;
use crate::options::PlaybackOptions;
use crate::util::frame_timing::FrameTiming;

/// What a playback run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSummary {
    /// Frames ticked.
    pub frames: u64,
    /// Simulated time covered.
    pub simulated: Duration,
    /// Whether the timeline reached its end before the time limit.
    pub finished: bool,
    /// Beats entered.
    pub beats_entered: usize,
}

impl CutsceneEngine {
    /// Tick until the timeline finishes (plus the configured tail) or the
    /// simulated time limit is reached, then flush the frame sink.
    ///
    /// Headless playback uses a fixed step of `1 / fps`. Real-time playback
    /// sleeps between frames and feeds the measured wall-clock delta.
    pub fn run_to_end(&mut self, playback: &PlaybackOptions) -> PlaybackSummary {
        let fps = playback.fps.max(1);
        let fixed_dt = Duration::from_secs_f64(1.0 / f64::from(fps));
        let limit = Duration::from_secs_f32(playback.max_duration_secs.max(0.0));
        let tail = Duration::from_secs_f32(playback.tail_secs.max(0.0));
        let mut timing = playback.realtime.then(|| FrameTiming::new(fps));
        let mut finished_at = None;

        while self.now() < limit {
            let dt = match &mut timing {
                Some(timing) => {
                    timing.wait_for_frame();
                    timing.end_frame()
                }
                None => fixed_dt,
            };
            self.tick(dt);

            if self.is_finished() {
                let done = *finished_at.get_or_insert(self.now());
                if self.now().saturating_sub(done) >= tail {
                    break;
                }
            }
        }

        if let Some(timing) = &timing {
            log::debug!("playback averaged {:.1} fps", timing.fps());
        }
        if let Err(e) = self.sink.finish() {
            log::error!("frame sink: {e}");
        }

        let summary = PlaybackSummary {
            frames: self.frame(),
            simulated: self.now(),
            finished: self.is_finished(),
            beats_entered: self.timeline().history().len(),
        };
        if summary.finished {
            log::info!(
                "playback finished: {} frames, {:.2}s simulated",
                summary.frames,
                summary.simulated.as_secs_f32()
            );
        } else {
            log::warn!(
                "playback stopped at the {:.0}s limit in beat {:?}",
                limit.as_secs_f32(),
                self.timeline().current_beat()
            );
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::PhysicsOptions;
    use crate::physics::PhysicsStepper;
    use crate::scene::Stage;
    use crate::timeline::Beat;

    fn engine(beats: Vec<Beat>) -> CutsceneEngine {
        CutsceneEngine::from_parts(
            Stage::default(),
            PhysicsStepper::new(&PhysicsOptions::default()),
            beats,
        )
    }

    #[test]
    fn stops_after_tail() {
        let mut engine = engine(vec![Beat::wait("hold", Duration::from_secs(1))]);
        let playback = PlaybackOptions {
            fps: 10,
            tail_secs: 0.5,
            ..PlaybackOptions::default()
        };
        let summary = engine.run_to_end(&playback);
        assert!(summary.finished);
        assert_eq!(summary.beats_entered, 1);
        // 1s of beat plus 0.5s of tail at 10 fps.
        assert!(summary.frames >= 15 && summary.frames <= 16);
    }

    #[test]
    fn time_limit_stops_a_long_timeline() {
        let mut engine = engine(vec![Beat::wait("forever", Duration::from_secs(600))]);
        let playback = PlaybackOptions {
            fps: 10,
            max_duration_secs: 2.0,
            ..PlaybackOptions::default()
        };
        let summary = engine.run_to_end(&playback);
        assert!(!summary.finished);
        assert!(summary.simulated >= Duration::from_secs(2));
        assert!(summary.simulated < Duration::from_millis(2200));
    }
}
