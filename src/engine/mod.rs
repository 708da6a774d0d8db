//! The cutscene engine: owns the stage, physics, tweens and timeline and
//! advances them together once per frame.
//!
//! Construction order is fixed: camera, physics world, scene, script, then
//! the background asset loader. After that everything happens in
//! [`CutsceneEngine::tick`].

mod frame;
mod playback;

use std::path::PathBuf;
use std::time::Duration;

pub use playback::PlaybackSummary;

use crate::animation::TweenSet;
use crate::audio::{AudioSink, LogAudio};
use crate::camera::CameraRig;
use crate::error::CutsceneError;
use crate::options::Options;
use crate::physics::PhysicsStepper;
use crate::render::{FrameSink, NullSink};
use crate::scene::assets::{AssetLoader, AssetManifest};
use crate::scene::{alley, Lighting, Stage};
use crate::script;
use crate::timeline::{Beat, Timeline};

/// Plays one cinematic from start to finish.
pub struct CutsceneEngine {
    stage: Stage,
    physics: PhysicsStepper,
    tweens: TweenSet,
    timeline: Timeline,
    audio: Box<dyn AudioSink>,
    sink: Box<dyn FrameSink>,
    assets: Option<AssetLoader>,
    clock: Duration,
    frame: u64,
    options: Options,
}

impl CutsceneEngine {
    /// Build the alley, its cast and the full narrative.
    ///
    /// # Errors
    ///
    /// [`CutsceneError::ThreadSpawn`] if the asset loader cannot start.
    pub fn new(options: Options) -> Result<Self, CutsceneError> {
        let camera = CameraRig::new(&options.camera);
        let mut physics = PhysicsStepper::new(&options.physics);
        let mut stage =
            Stage::new(camera, Lighting::from_options(&options.lighting));
        let cast = alley::build(&options, &mut stage, &mut physics);
        let beats = script::narrative(cast, &options);

        let manifest = AssetManifest::for_stage(&stage);
        log::info!(
            "cutscene: {} beats, {} props, {} assets",
            beats.len(),
            stage.props().count(),
            manifest.len()
        );
        let loader = AssetLoader::spawn(
            PathBuf::from(&options.assets.root),
            manifest,
        )?;

        let mut engine = Self::from_parts(stage, physics, beats);
        engine.assets = Some(loader);
        engine.options = options;
        Ok(engine)
    }

    /// Engine over a prepared stage and an arbitrary beat table. No assets
    /// are loaded.
    #[must_use]
    pub fn from_parts(
        stage: Stage,
        physics: PhysicsStepper,
        beats: Vec<Beat>,
    ) -> Self {
        Self {
            stage,
            physics,
            tweens: TweenSet::new(),
            timeline: Timeline::new(beats),
            audio: Box::new(LogAudio),
            sink: Box::new(NullSink),
            assets: None,
            clock: Duration::ZERO,
            frame: 0,
            options: Options::default(),
        }
    }

    /// Replace the audio sink.
    #[must_use]
    pub fn with_audio(mut self, audio: impl AudioSink + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    /// Replace the frame sink.
    #[must_use]
    pub fn with_sink(mut self, sink: impl FrameSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Viewport resized: update the camera aspect.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.stage.camera.resize(width, height);
    }

    // ── Accessors ──

    /// The stage.
    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// The timeline.
    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// The physics stepper.
    #[must_use]
    pub fn physics(&self) -> &PhysicsStepper {
        &self.physics
    }

    /// Live tweens.
    #[must_use]
    pub fn tweens(&self) -> &TweenSet {
        &self.tweens
    }

    /// Options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Simulated time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock
    }

    /// Frames ticked so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Whether the last beat has completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.timeline.is_finished()
    }
}
