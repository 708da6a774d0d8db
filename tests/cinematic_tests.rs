//! The full narrative, played headless.

use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use cutscene::audio::{Cue, CueRecorder};
use cutscene::character::Authority;
use cutscene::engine::CutsceneEngine;
use cutscene::options::Options;
use cutscene::render::TraceSink;
use glam::Vec3;

fn options() -> Options {
    let mut options = Options::default();
    options.playback.fps = 20;
    options.assets.root = "/nonexistent-cutscene-assets".to_owned();
    options
}

#[test]
fn narrative_plays_to_the_end() {
    let options = options();
    let playback = options.playback.clone();
    let recorder = CueRecorder::new();
    let mut engine = CutsceneEngine::new(options)
        .unwrap()
        .with_audio(recorder.clone());

    let summary = engine.run_to_end(&playback);
    assert!(summary.finished, "stalled in {:?}", engine.timeline().current_beat());
    assert_eq!(summary.beats_entered, 24);

    // Beats never overlap.
    let history = engine.timeline().history();
    for pair in history.windows(2) {
        assert!(pair[0].completed_at.unwrap() <= pair[1].entered_at);
    }

    let cues: Vec<Cue> = recorder.played().into_iter().map(|(cue, _)| cue).collect();
    assert_eq!(cues, [Cue::Gunshot, Cue::Scream]);

    let stage = engine.stage();
    let takaya = stage.find_character("Takaya").unwrap();
    let aragaki = stage.find_character("Aragaki").unwrap();
    let ken = stage.find_character("Ken").unwrap();

    // Takaya's walks sum to a net displacement of (0, 0, -2).
    assert_eq!(
        stage.character(takaya).unwrap().position,
        Vec3::new(4.0, 1.95, -15.0)
    );

    let aragaki = stage.character(aragaki).unwrap();
    assert_eq!(aragaki.authority(), Authority::Animated);
    assert_eq!(aragaki.position.y, 0.5);
    assert_eq!(aragaki.position.z, 13.0);
    assert_eq!(aragaki.rotation.x, -FRAC_PI_2);

    assert!(stage.character(ken).is_some());
    assert_eq!(stage.lighting.ambient_intensity, 0.05);
    assert_eq!(
        stage.end_card.message.as_deref(),
        Some("Incidente del 4/10\nNéstor Déniz González")
    );
    assert_eq!(stage.end_card.opacity, 0.0);
    assert!(engine.tweens().is_empty());
}

#[test]
fn shot_hands_aragaki_to_physics() {
    let options = options();
    let step = Duration::from_millis(50);
    let mut engine = CutsceneEngine::new(options).unwrap();

    let mut saw_physics = false;
    while !engine.is_finished() && engine.now() < Duration::from_secs(120) {
        engine.tick(step);
        if engine.timeline().current_beat() == Some("shot") {
            let stage = engine.stage();
            let aragaki = stage.find_character("Aragaki").unwrap();
            if matches!(
                stage.character(aragaki).unwrap().authority(),
                Authority::PhysicsDriven(_)
            ) {
                saw_physics = true;
                assert!(stage.props().any(|(_, p)| p.name == "projectile"));
            }
        }
    }
    assert!(saw_physics);
    assert!(engine.is_finished());
}

#[test]
fn trace_records_frames() {
    let mut options = options();
    options.playback.max_duration_secs = 2.0;
    let playback = options.playback.clone();
    let mut engine = CutsceneEngine::new(options)
        .unwrap()
        .with_sink(TraceSink::new(Vec::new(), 1));

    let summary = engine.run_to_end(&playback);
    assert!(!summary.finished);
    assert_eq!(summary.frames, 40);
    assert_eq!(engine.timeline().current_beat(), Some("establishing pan"));
}
