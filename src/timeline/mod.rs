//! Timeline orchestrator: an ordered table of beats with a single cursor.
//!
//! Tween completion is the only thing that moves the cursor. A beat is
//! entered by running its setup, which declares the tweens that gate it; once
//! every gate has completed the next beat is entered in the same tick. A beat
//! that gates on nothing completes as soon as it is entered.

mod beat;

use std::collections::VecDeque;
use std::time::Duration;

pub use beat::{Beat, BeatContext, BeatSetup};
use rustc_hash::FxHashSet;

use crate::animation::TweenId;

/// Where the timeline is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimelineState {
    /// Not started.
    #[default]
    Idle,
    /// A beat is current.
    Playing,
    /// Every beat has completed.
    Finished,
}

/// Entry and completion times of one beat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeatRecord {
    /// Beat label.
    pub label: String,
    /// Simulated time the beat was entered.
    pub entered_at: Duration,
    /// Simulated time its last gate completed.
    pub completed_at: Option<Duration>,
}

impl BeatRecord {
    /// Time between entry and completion.
    #[must_use]
    pub fn length(&self) -> Option<Duration> {
        self.completed_at
            .map(|done| done.saturating_sub(self.entered_at))
    }
}

/// Ordered beats, the gates of the current one and a record of past ones.
#[derive(Debug, Default)]
pub struct Timeline {
    pending: VecDeque<Beat>,
    gates: FxHashSet<TweenId>,
    state: TimelineState,
    history: Vec<BeatRecord>,
}

impl Timeline {
    /// Timeline over `beats`, in order.
    #[must_use]
    pub fn new(beats: Vec<Beat>) -> Self {
        Self {
            pending: beats.into(),
            ..Self::default()
        }
    }

    /// Append a beat after the last one.
    pub fn push(&mut self, beat: Beat) {
        self.pending.push_back(beat);
    }

    /// Enter the first beat. Does nothing unless idle.
    pub fn start(&mut self, ctx: &mut BeatContext<'_>) {
        if self.state != TimelineState::Idle {
            return;
        }
        log::info!("timeline: {} beats", self.pending.len());
        self.state = TimelineState::Playing;
        self.enter_ready(ctx);
    }

    /// Clear completed gates and enter following beats while the current one
    /// has nothing left to wait for.
    pub fn advance(&mut self, completed: &[TweenId], ctx: &mut BeatContext<'_>) {
        if self.state != TimelineState::Playing {
            return;
        }
        for id in completed {
            let _ = self.gates.remove(id);
        }
        if self.gates.is_empty() {
            self.complete_current(ctx.now());
            self.enter_ready(ctx);
        }
    }

    fn complete_current(&mut self, now: Duration) {
        if let Some(record) = self.history.last_mut() {
            if record.completed_at.is_none() {
                record.completed_at = Some(now);
                log::debug!(
                    "beat '{}' done after {:.3}s",
                    record.label,
                    record.length().unwrap_or_default().as_secs_f32()
                );
            }
        }
    }

    fn enter_ready(&mut self, ctx: &mut BeatContext<'_>) {
        while self.gates.is_empty() {
            let Some(beat) = self.pending.pop_front() else {
                self.state = TimelineState::Finished;
                log::info!(
                    "[{:>7.3}s] timeline finished",
                    ctx.now().as_secs_f32()
                );
                return;
            };
            let (label, setup) = beat.into_parts();
            log::info!("[{:>7.3}s] beat: {label}", ctx.now().as_secs_f32());
            self.history.push(BeatRecord {
                label,
                entered_at: ctx.now(),
                completed_at: None,
            });

            setup(ctx);
            self.gates.extend(ctx.take_gates());
            if self.gates.is_empty() {
                self.complete_current(ctx.now());
            }
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> TimelineState {
        self.state
    }

    /// Whether every beat has completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == TimelineState::Finished
    }

    /// Label of the beat being played.
    #[must_use]
    pub fn current_beat(&self) -> Option<&str> {
        if self.state != TimelineState::Playing {
            return None;
        }
        self.history.last().map(|r| r.label.as_str())
    }

    /// Beats not yet entered.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Every entered beat, in order.
    #[must_use]
    pub fn history(&self) -> &[BeatRecord] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::animation::{Tween, TweenSet};
    use crate::audio::CueRecorder;
    use crate::options::PhysicsOptions;
    use crate::physics::PhysicsStepper;
    use crate::scene::Stage;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    struct Rig {
        stage: Stage,
        physics: PhysicsStepper,
        tweens: TweenSet,
        audio: CueRecorder,
        now: Duration,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                stage: Stage::default(),
                physics: PhysicsStepper::new(&PhysicsOptions::default()),
                tweens: TweenSet::new(),
                audio: CueRecorder::new(),
                now: Duration::ZERO,
            }
        }

        fn start(&mut self, timeline: &mut Timeline) {
            let mut ctx = BeatContext::new(
                &mut self.stage,
                &mut self.physics,
                &mut self.tweens,
                &mut self.audio,
                self.now,
            );
            timeline.start(&mut ctx);
        }

        fn tick(&mut self, timeline: &mut Timeline, dt: Duration) {
            self.now += dt;
            let done = self.tweens.update(self.now, &mut self.stage);
            let mut ctx = BeatContext::new(
                &mut self.stage,
                &mut self.physics,
                &mut self.tweens,
                &mut self.audio,
                self.now,
            );
            timeline.advance(&done, &mut ctx);
        }
    }

    #[test]
    fn beats_without_gates_complete_immediately() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let beats = ["a", "b", "c"]
            .into_iter()
            .map(|label| {
                let log = Rc::clone(&log);
                Beat::new(label, move |_| log.borrow_mut().push(label))
            })
            .collect();
        let mut timeline = Timeline::new(beats);
        let mut rig = Rig::new();
        rig.start(&mut timeline);

        assert!(timeline.is_finished());
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert!(timeline
            .history()
            .iter()
            .all(|r| r.completed_at == Some(Duration::ZERO)));
    }

    #[test]
    fn gated_beat_holds_until_its_wait_completes() {
        let mut timeline = Timeline::new(vec![
            Beat::wait("hold", ms(500)),
            Beat::new("after", |_| {}),
        ]);
        let mut rig = Rig::new();
        rig.start(&mut timeline);
        assert_eq!(timeline.current_beat(), Some("hold"));

        rig.tick(&mut timeline, ms(400));
        assert_eq!(timeline.current_beat(), Some("hold"));
        rig.tick(&mut timeline, ms(100));
        assert!(timeline.is_finished());

        let history = timeline.history();
        assert_eq!(history[0].length(), Some(ms(500)));
        assert_eq!(history[1].entered_at, ms(500));
    }

    #[test]
    fn fire_and_forget_tweens_do_not_gate() {
        let mut timeline = Timeline::new(vec![
            Beat::new("launch", |ctx| {
                let _ = ctx.launch(Tween::timer(ms(10_000)));
            }),
            Beat::wait("short", ms(100)),
        ]);
        let mut rig = Rig::new();
        rig.start(&mut timeline);
        assert_eq!(timeline.current_beat(), Some("short"));

        rig.tick(&mut timeline, ms(100));
        assert!(timeline.is_finished());
        assert_eq!(rig.tweens.active_count(), 1);
    }

    #[test]
    fn advance_before_start_is_ignored() {
        let mut timeline = Timeline::new(vec![Beat::wait("only", ms(10))]);
        let mut rig = Rig::new();
        rig.tick(&mut timeline, ms(20));
        assert_eq!(timeline.state(), TimelineState::Idle);
        assert!(timeline.history().is_empty());
        assert_eq!(timeline.remaining(), 1);
    }
}
