//! Per-frame update.

use std::time::Duration;

use super::CutsceneEngine;
use crate::render::FrameInfo;
use crate::scene::assets;
use crate::timeline::{BeatContext, TimelineState};

impl CutsceneEngine {
    /// Advance simulated time by `dt`.
    ///
    /// Order within a tick: resolved assets are attached, physics steps and
    /// writes back, tweens advance, the timeline consumes completions, and
    /// the frame is presented. The first tick also enters the first beat.
    pub fn tick(&mut self, dt: Duration) {
        if self.timeline.state() == TimelineState::Idle {
            let mut ctx = BeatContext::new(
                &mut self.stage,
                &mut self.physics,
                &mut self.tweens,
                self.audio.as_mut(),
                self.clock,
            );
            self.timeline.start(&mut ctx);
        }

        if let Some(loader) = &mut self.assets {
            for report in loader.poll() {
                assets::attach(&mut self.stage, &report);
            }
            if loader.pending() == 0 {
                self.assets = None;
            }
        }

        self.clock += dt;
        self.physics.step(dt.as_secs_f32(), &mut self.stage);
        let completed = self.tweens.update(self.clock, &mut self.stage);

        let mut ctx = BeatContext::new(
            &mut self.stage,
            &mut self.physics,
            &mut self.tweens,
            self.audio.as_mut(),
            self.clock,
        );
        self.timeline.advance(&completed, &mut ctx);

        let info = FrameInfo {
            index: self.frame,
            time: self.clock,
            dt,
            beat: self.timeline.current_beat().map(str::to_owned),
        };
        if let Err(e) = self.sink.present(&info, &self.stage) {
            log::error!("frame {}: {e}", self.frame);
        }
        self.frame += 1;
    }
}
