//! Beat descriptors and the context their setup runs in.

use std::fmt;
use std::time::Duration;

use crate::animation::{Tween, TweenId, TweenSet};
use crate::audio::{AudioSink, Cue};
use crate::physics::PhysicsStepper;
use crate::scene::Stage;

/// Setup of one beat. Runs once, when the beat is entered.
pub type BeatSetup = Box<dyn FnOnce(&mut BeatContext<'_>)>;

/// One step of the narrative.
pub struct Beat {
    label: String,
    setup: BeatSetup,
}

impl Beat {
    /// Beat running `setup` when entered.
    pub fn new(
        label: impl Into<String>,
        setup: impl FnOnce(&mut BeatContext<'_>) + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            setup: Box::new(setup),
        }
    }

    /// Beat that only holds for `duration`.
    pub fn wait(label: impl Into<String>, duration: Duration) -> Self {
        Self::new(label, move |ctx| {
            let _ = ctx.wait(duration);
        })
    }

    /// Log label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn into_parts(self) -> (String, BeatSetup) {
        (self.label, self.setup)
    }
}

impl fmt::Debug for Beat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Beat")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// What a beat's setup may touch.
///
/// Tweens started with [`gate`](Self::gate) or [`wait`](Self::wait) hold the
/// timeline on this beat until they complete; tweens started with
/// [`launch`](Self::launch) run alongside without holding anything.
pub struct BeatContext<'a> {
    stage: &'a mut Stage,
    physics: &'a mut PhysicsStepper,
    tweens: &'a mut TweenSet,
    audio: &'a mut dyn AudioSink,
    now: Duration,
    gates: Vec<TweenId>,
}

impl<'a> BeatContext<'a> {
    /// Context over the engine's parts at simulated time `now`.
    pub fn new(
        stage: &'a mut Stage,
        physics: &'a mut PhysicsStepper,
        tweens: &'a mut TweenSet,
        audio: &'a mut dyn AudioSink,
        now: Duration,
    ) -> Self {
        Self {
            stage,
            physics,
            tweens,
            audio,
            now,
            gates: Vec::new(),
        }
    }

    /// Simulated time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// The stage.
    #[must_use]
    pub fn stage(&self) -> &Stage {
        self.stage
    }

    /// The stage, mutably.
    pub fn stage_mut(&mut self) -> &mut Stage {
        self.stage
    }

    /// Stage and physics together, for operations that need both.
    pub fn world_mut(&mut self) -> (&mut Stage, &mut PhysicsStepper) {
        (self.stage, self.physics)
    }

    /// Start a tween the beat does not wait for.
    pub fn launch(&mut self, tween: Tween) -> TweenId {
        self.tweens.start(tween, self.stage, self.now)
    }

    /// Start several fire-and-forget tweens.
    pub fn launch_all(&mut self, tweens: impl IntoIterator<Item = Tween>) {
        for tween in tweens {
            let _ = self.launch(tween);
        }
    }

    /// Start a tween the beat waits for.
    pub fn gate(&mut self, tween: Tween) -> TweenId {
        let id = self.launch(tween);
        self.gates.push(id);
        id
    }

    /// Hold the beat for `duration`.
    pub fn wait(&mut self, duration: Duration) -> TweenId {
        self.gate(Tween::timer(duration))
    }

    /// Play a sound cue.
    pub fn play(&mut self, cue: Cue) {
        self.audio.play(cue, self.now);
    }

    pub(crate) fn take_gates(&mut self) -> Vec<TweenId> {
        std::mem::take(&mut self.gates)
    }
}

impl fmt::Debug for BeatContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeatContext")
            .field("now", &self.now)
            .field("gates", &self.gates)
            .finish_non_exhaustive()
    }
}
