//! Camera director: pans, dollies and tracking shots as tweens.
//!
//! The director only builds tweens. A beat that must wait for a camera move
//! gates on its own wait of the beat duration, which may differ from the
//! visual duration of the move.

use std::time::Duration;

use glam::Vec3;

use crate::animation::{FieldGoals, Tween, TweenTarget};
use crate::character::CharacterId;
use crate::scene::Stage;
use crate::util::easing::EasingFunction;

/// The tweens of one camera move.
#[derive(Debug)]
pub struct CameraMove {
    /// Eye position tween.
    pub position: Tween,
    /// Focus tween, present when the move has a look-at point.
    pub focus: Option<Tween>,
}

impl CameraMove {
    /// All tweens of the move, position first.
    #[must_use]
    pub fn into_tweens(self) -> Vec<Tween> {
        let mut tweens = vec![self.position];
        tweens.extend(self.focus);
        tweens
    }
}

/// Builds camera tweens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraDirector {
    /// Easing for [`move_to`](Self::move_to).
    pub easing: EasingFunction,
}

impl Default for CameraDirector {
    fn default() -> Self {
        Self {
            easing: EasingFunction::QuadraticOut,
        }
    }
}

impl CameraDirector {
    /// Move the eye to `position`. With `look_at`, the focus moves there over
    /// the same duration and the camera is re-aimed every frame.
    #[must_use]
    pub fn move_to(
        &self,
        position: Vec3,
        look_at: Option<Vec3>,
        duration: Duration,
    ) -> CameraMove {
        let position_tween = Tween::new(
            TweenTarget::CameraEye,
            FieldGoals::xyz(position),
            duration,
        )
        .easing(self.easing)
        .named("camera-move");

        let focus = look_at.map(|point| {
            Tween::new(
                TweenTarget::CameraFocus,
                FieldGoals::xyz(point),
                duration,
            )
            .easing(self.easing)
            .named("camera-focus")
            .on_update(|stage| stage.camera.sync())
        });

        CameraMove {
            position: position_tween,
            focus,
        }
    }

    /// Linear dolly of the eye by `offset` that keeps the camera aimed at the
    /// subject's current position every frame.
    #[must_use]
    pub fn tracking_dolly(
        &self,
        stage: &Stage,
        offset: Vec3,
        subject: CharacterId,
        duration: Duration,
    ) -> Tween {
        Tween::new(
            TweenTarget::CameraEye,
            FieldGoals::xyz(stage.camera.camera.eye + offset),
            duration,
        )
        .easing(EasingFunction::Linear)
        .named("camera-dolly")
        .on_update(move |stage| {
            if let Some(position) = stage.character(subject).map(|c| c.position)
            {
                stage.camera.look_at(position);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::TweenSet;
    use crate::character::Character;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn move_with_look_at_keeps_camera_aimed_at_focus() {
        let mut stage = Stage::default();
        let director = CameraDirector::default();
        let mut tweens = TweenSet::new();
        let goal = Vec3::new(5.0, 4.0, 12.0);
        let look = Vec3::new(-20.0, 1.95, 13.0);
        for tween in director.move_to(goal, Some(look), ms(1000)).into_tweens()
        {
            let _ = tweens.start(tween, &stage, ms(0));
        }

        let _ = tweens.update(ms(400), &mut stage);
        assert_eq!(stage.camera.camera.target, stage.camera.focus);

        let done = tweens.update(ms(1000), &mut stage);
        assert_eq!(done.len(), 2);
        assert_eq!(stage.camera.camera.eye, goal);
        assert_eq!(stage.camera.camera.target, look);
    }

    #[test]
    fn move_without_look_at_leaves_focus() {
        let director = CameraDirector::default();
        let mv = director.move_to(Vec3::ONE, None, ms(10));
        assert!(mv.focus.is_none());
        assert_eq!(mv.position.easing_function(), EasingFunction::QuadraticOut);
    }

    #[test]
    fn tracking_dolly_follows_subject() {
        let mut stage = Stage::default();
        let subject =
            stage.add_character(Character::new("ken", Vec3::new(5.0, 1.0, 13.0)));
        let start_eye = stage.camera.camera.eye;
        let director = CameraDirector::default();
        let mut tweens = TweenSet::new();
        let dolly = director.tracking_dolly(
            &stage,
            Vec3::new(-11.0, 0.0, 0.0),
            subject,
            ms(16_000),
        );
        let _ = tweens.start(dolly, &stage, ms(0));

        stage.character_mut(subject).unwrap().position.y = 3.0;
        let _ = tweens.update(ms(8000), &mut stage);
        assert!((stage.camera.camera.eye.x - (start_eye.x - 5.5)).abs() < 1e-4);
        assert_eq!(stage.camera.camera.target, Vec3::new(5.0, 3.0, 13.0));
    }
}
