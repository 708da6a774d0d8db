//! The set of live tweens, advanced once per frame.
//!
//! Entries are kept in start order, so when two tweens write the same field in
//! one frame the later-started one wins. Finished tweens are dropped right
//! after their completion callback runs.

use std::fmt;
use std::time::Duration;

use super::runner::{lerp, TweenRunner, TweenState};
use super::tween::{
    CompleteCallback, Field, FieldGoals, Tween, TweenId, TweenTarget,
    UpdateCallback,
};
use crate::scene::Stage;

/// Captured start and goal for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    /// Field written.
    pub field: Field,
    /// Value read from the stage when interpolation began.
    pub start: f32,
    /// Goal value.
    pub end: f32,
}

struct ActiveTween {
    id: TweenId,
    name: &'static str,
    target: TweenTarget,
    goals: FieldGoals,
    runner: TweenRunner,
    ranges: Option<Vec<FieldRange>>,
    on_update: Option<UpdateCallback>,
    on_complete: Option<CompleteCallback>,
    finished: bool,
}

impl ActiveTween {
    fn capture(&mut self, stage: &Stage) {
        let ranges: Vec<FieldRange> = self
            .goals
            .iter()
            .filter_map(|(field, end)| {
                stage.read_field(self.target, field).map(|start| FieldRange {
                    field,
                    start,
                    end,
                })
            })
            .collect();
        if ranges.len() < self.goals.iter().count() {
            log::warn!(
                "{} '{}': target {:?} not reachable, running as a timer",
                self.id,
                self.name,
                self.target
            );
        }
        self.ranges = Some(ranges);
    }

    fn apply(&self, stage: &mut Stage, t: f32, done: bool) {
        let Some(ranges) = &self.ranges else {
            return;
        };
        for range in ranges {
            let value = if done {
                range.end
            } else if t == 0.0 {
                range.start
            } else {
                lerp(t, range.start, range.end)
            };
            let _ = stage.write_field(self.target, range.field, value);
        }
    }
}

/// All started, unfinished tweens.
pub struct TweenSet {
    entries: Vec<ActiveTween>,
    next_id: u64,
}

impl TweenSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(16),
            next_id: 0,
        }
    }

    /// Start a tween at simulated time `now`.
    ///
    /// Without a delay the start values are read from `stage` immediately;
    /// with one they are read on the first update after the delay.
    pub fn start(
        &mut self,
        tween: Tween,
        stage: &Stage,
        now: Duration,
    ) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;

        let Tween {
            target,
            goals,
            duration,
            delay,
            easing,
            name,
            on_update,
            on_complete,
        } = tween;

        let mut entry = ActiveTween {
            id,
            name,
            target,
            goals,
            runner: TweenRunner::new(now, delay, duration, easing),
            ranges: None,
            on_update,
            on_complete,
            finished: false,
        };
        if delay.is_zero() {
            entry.capture(stage);
        }

        log::debug!(
            "{id} '{name}' started at {:.3}s: {:?} over {:?}",
            now.as_secs_f32(),
            target,
            duration
        );
        self.entries.push(entry);
        id
    }

    /// Advance every tween to simulated time `now`.
    ///
    /// Writes interpolated fields, runs update callbacks, and for tweens that
    /// reached their end runs the completion callback once. Returns the ids
    /// that completed during this call, in start order.
    pub fn update(&mut self, now: Duration, stage: &mut Stage) -> Vec<TweenId> {
        let mut completed = Vec::new();

        for entry in &mut self.entries {
            if entry.runner.is_pending(now) {
                continue;
            }
            if entry.ranges.is_none() {
                entry.capture(stage);
            }

            let done = entry.runner.is_complete(now);
            let t = entry.runner.eased_t(now);
            entry.apply(stage, t, done);

            if let Some(on_update) = entry.on_update.as_mut() {
                on_update(stage);
            }

            if done {
                if let Some(on_complete) = entry.on_complete.take() {
                    on_complete(stage);
                }
                entry.finished = true;
                completed.push(entry.id);
            }
        }

        if !completed.is_empty() {
            self.entries.retain(|e| !e.finished);
        }
        completed
    }

    /// Lifecycle state of a tween started by this set.
    #[must_use]
    pub fn state(&self, id: TweenId, now: Duration) -> TweenState {
        match self.entries.iter().find(|e| e.id == id) {
            Some(e) if e.runner.is_pending(now) => TweenState::Pending,
            Some(_) => TweenState::Running,
            None => TweenState::Finished,
        }
    }

    /// Whether the tween is still live.
    #[must_use]
    pub fn is_active(&self, id: TweenId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Captured field ranges of a live tween (`None` before capture).
    #[must_use]
    pub fn ranges(&self, id: TweenId) -> Option<&[FieldRange]> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .and_then(|e| e.ranges.as_deref())
    }

    /// Number of live tweens.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.entries.len()
    }

    /// No live tweens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TweenSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TweenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenSet")
            .field("active_count", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec3;

    use super::*;
    use crate::util::easing::EasingFunction;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn eye_tween(goal: Vec3, duration: Duration) -> Tween {
        Tween::new(TweenTarget::CameraEye, FieldGoals::xyz(goal), duration)
    }

    #[test]
    fn starts_at_start_value_and_lands_on_goal() {
        let mut stage = Stage::default();
        stage.camera.camera.eye = Vec3::new(1.0, 2.0, 3.0);
        let mut set = TweenSet::new();
        let goal = Vec3::new(-4.0, 0.5, 9.0);
        let _ = set.start(
            eye_tween(goal, ms(300)).easing(EasingFunction::QuadraticOut),
            &stage,
            ms(0),
        );

        let done = set.update(ms(0), &mut stage);
        assert!(done.is_empty());
        assert_eq!(stage.camera.camera.eye, Vec3::new(1.0, 2.0, 3.0));

        let _ = set.update(ms(150), &mut stage);
        assert_ne!(stage.camera.camera.eye, goal);

        let done = set.update(ms(1000), &mut stage);
        assert_eq!(done.len(), 1);
        assert_eq!(stage.camera.camera.eye, goal);
        assert!(set.is_empty());
    }

    #[test]
    fn completion_fires_once_after_last_update() {
        let mut stage = Stage::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        let update_log = Rc::clone(&log);
        let complete_log = Rc::clone(&log);
        let mut set = TweenSet::new();
        let id = set.start(
            eye_tween(Vec3::ONE, ms(100))
                .on_update(move |_| update_log.borrow_mut().push("update"))
                .on_complete(move |_| complete_log.borrow_mut().push("done")),
            &stage,
            ms(0),
        );

        for t in [50, 100, 150, 200] {
            let _ = set.update(ms(t), &mut stage);
        }
        assert_eq!(*log.borrow(), vec!["update", "update", "done"]);
        assert_eq!(set.state(id, ms(200)), TweenState::Finished);
    }

    #[test]
    fn disjoint_fields_tween_independently() {
        let mut stage = Stage::default();
        stage.camera.camera.eye = Vec3::ZERO;
        let mut set = TweenSet::new();
        let _ = set.start(
            Tween::new(TweenTarget::CameraEye, FieldGoals::x(10.0), ms(100)),
            &stage,
            ms(0),
        );
        let _ = set.start(
            Tween::new(TweenTarget::CameraEye, FieldGoals::y(4.0), ms(200)),
            &stage,
            ms(0),
        );

        let done = set.update(ms(100), &mut stage);
        assert_eq!(done.len(), 1);
        assert_eq!(stage.camera.camera.eye.x, 10.0);
        assert!((stage.camera.camera.eye.y - 2.0).abs() < 1e-5);
        assert_eq!(stage.camera.camera.eye.z, 0.0);

        let _ = set.update(ms(200), &mut stage);
        assert_eq!(stage.camera.camera.eye, Vec3::new(10.0, 4.0, 0.0));
    }

    #[test]
    fn delayed_tween_captures_start_when_delay_ends() {
        let mut stage = Stage::default();
        stage.camera.camera.eye = Vec3::ZERO;
        let mut set = TweenSet::new();
        let delayed = set.start(
            eye_tween(Vec3::ZERO, ms(100)).delay(ms(500)),
            &stage,
            ms(0),
        );
        let _ = set.start(eye_tween(Vec3::splat(2.0), ms(200)), &stage, ms(0));

        let _ = set.update(ms(200), &mut stage);
        assert_eq!(set.state(delayed, ms(200)), TweenState::Pending);
        assert_eq!(stage.camera.camera.eye, Vec3::splat(2.0));

        let _ = set.update(ms(500), &mut stage);
        let ranges = set.ranges(delayed).map(<[FieldRange]>::to_vec);
        assert_eq!(ranges.map(|r| r[0].start), Some(2.0));

        let done = set.update(ms(600), &mut stage);
        assert_eq!(done, vec![delayed]);
        assert_eq!(stage.camera.camera.eye, Vec3::ZERO);
    }

    #[test]
    fn zero_duration_completes_on_first_update() {
        let mut stage = Stage::default();
        let mut set = TweenSet::new();
        let id = set.start(Tween::timer(Duration::ZERO), &stage, ms(10));
        assert_eq!(set.update(ms(10), &mut stage), vec![id]);
    }

    #[test]
    fn unreachable_target_still_completes() {
        use crate::character::CharacterId;

        let mut stage = Stage::default();
        let mut set = TweenSet::new();
        let target = TweenTarget::CharacterPosition(CharacterId(42));
        let id = set.start(
            Tween::new(target, FieldGoals::xyz(Vec3::ONE), ms(50)),
            &stage,
            ms(0),
        );
        assert_eq!(set.ranges(id).map(<[FieldRange]>::len), Some(0));
        assert_eq!(set.update(ms(50), &mut stage), vec![id]);
    }
}
