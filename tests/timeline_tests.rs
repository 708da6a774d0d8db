//! Beat sequencing through the engine's tick.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use cutscene::animation::{FieldGoals, Tween, TweenTarget};
use cutscene::engine::CutsceneEngine;
use cutscene::options::PhysicsOptions;
use cutscene::physics::PhysicsStepper;
use cutscene::scene::Stage;
use cutscene::timeline::Beat;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn engine(beats: Vec<Beat>) -> CutsceneEngine {
    CutsceneEngine::from_parts(
        Stage::default(),
        PhysicsStepper::new(&PhysicsOptions::default()),
        beats,
    )
}

#[test]
fn chained_beats_complete_in_order() {
    let mut engine = engine(vec![
        Beat::wait("A", ms(1000)),
        Beat::wait("B", ms(500)),
        Beat::wait("C", ms(2000)),
    ]);
    while !engine.is_finished() && engine.now() < ms(10_000) {
        engine.tick(ms(16));
    }
    assert!(engine.is_finished());

    let history = engine.timeline().history();
    let labels: Vec<&str> = history.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["A", "B", "C"]);

    for pair in history.windows(2) {
        let done = pair[0].completed_at.unwrap();
        assert!(done <= pair[1].entered_at);
    }
    let c_done = history[2].completed_at.unwrap();
    assert!(c_done >= ms(3500), "C finished at {c_done:?}");
}

#[test]
fn completion_callback_runs_once_after_last_update() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let on_update = Rc::clone(&events);
    let on_complete = Rc::clone(&events);

    let mut engine = engine(vec![Beat::new("fade", move |ctx| {
        let _ = ctx.gate(
            Tween::new(
                TweenTarget::AmbientIntensity,
                FieldGoals::scalar(1.0),
                ms(100),
            )
            .on_update(move |stage| {
                on_update
                    .borrow_mut()
                    .push(("update", stage.lighting.ambient_intensity));
            })
            .on_complete(move |stage| {
                on_complete
                    .borrow_mut()
                    .push(("complete", stage.lighting.ambient_intensity));
            }),
        );
    })]);

    for _ in 0..6 {
        engine.tick(ms(30));
    }
    let events = events.borrow();
    let completions: Vec<_> =
        events.iter().filter(|(kind, _)| *kind == "complete").collect();
    assert_eq!(completions.len(), 1);
    assert_eq!(events.last().copied(), Some(("complete", 1.0)));
    assert_eq!(events[events.len() - 2], ("update", 1.0));
}

#[test]
fn delayed_tween_holds_its_start_value() {
    let mut stage = Stage::default();
    stage.lighting.ambient_intensity = 0.2;
    let mut engine = CutsceneEngine::from_parts(
        stage,
        PhysicsStepper::new(&PhysicsOptions::default()),
        vec![Beat::new("later", |ctx| {
            let _ = ctx.gate(
                Tween::new(
                    TweenTarget::AmbientIntensity,
                    FieldGoals::scalar(0.6),
                    ms(200),
                )
                .delay(ms(300)),
            );
        })],
    );

    engine.tick(ms(200));
    assert_eq!(engine.stage().lighting.ambient_intensity, 0.2);
    engine.tick(ms(200));
    let mid = engine.stage().lighting.ambient_intensity;
    assert!(mid > 0.2 && mid < 0.6);
    engine.tick(ms(200));
    assert_eq!(engine.stage().lighting.ambient_intensity, 0.6);
    assert!(engine.is_finished());
}
