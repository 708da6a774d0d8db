//! Character motor: semantic actions built from tweens.
//!
//! Every action returns unstarted [`Tween`]s; the caller decides whether a
//! beat waits for them. Attaching and detaching physics are the only
//! immediate operations, since they switch transform authority.

use std::f32::consts::{PI, TAU};
use std::time::Duration;

use glam::Vec3;

use super::rig::{HumanoidRig, Joint, Side};
use super::{Authority, CharacterId};
use crate::animation::{FieldGoals, Tween, TweenTarget};
use crate::physics::{BodyDesc, BodyId, BodyShape, PhysicsStepper};
use crate::scene::{Proxy, Stage};
use crate::util::easing::EasingFunction;

/// Peak limb swing in radians.
pub const GAIT_AMPLITUDE: f32 = 0.5;

/// Limb swing angles (rotation about x) for one gait phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaitPose {
    /// Right arm swing.
    pub right_arm: f32,
    /// Left arm swing.
    pub left_arm: f32,
    /// Right leg swing.
    pub right_leg: f32,
    /// Left leg swing.
    pub left_leg: f32,
}

impl GaitPose {
    /// Write the swing angles onto the rig's x rotations.
    pub fn apply(&self, rig: &mut HumanoidRig) {
        rig.rotation_mut(Joint::RightArm).x = self.right_arm;
        rig.rotation_mut(Joint::LeftArm).x = self.left_arm;
        rig.rotation_mut(Joint::RightLeg).x = self.right_leg;
        rig.rotation_mut(Joint::LeftLeg).x = self.left_leg;
    }
}

/// Gait phase for `travelled` out of `total` distance: one full stride cycle
/// per walk. Zero-length walks stay at phase 0.
#[must_use]
pub fn gait_phase(travelled: f32, total: f32) -> f32 {
    if total <= f32::EPSILON {
        return 0.0;
    }
    (travelled / total) * TAU
}

/// Limb angles at `phase`. Opposite arm and leg swing together.
#[must_use]
pub fn gait_pose(phase: f32) -> GaitPose {
    GaitPose {
        right_arm: phase.sin() * GAIT_AMPLITUDE,
        left_arm: (phase + PI).sin() * GAIT_AMPLITUDE,
        right_leg: (phase + PI).sin() * GAIT_AMPLITUDE,
        left_leg: phase.sin() * GAIT_AMPLITUDE,
    }
}

/// Left arm goal of the crying pose.
pub const CRY_LEFT_ARM: Vec3 = Vec3::new(-1.3, 0.9, -0.8);
/// Right arm goal of the crying pose.
pub const CRY_RIGHT_ARM: Vec3 = Vec3::new(-1.3, -0.9, 0.8);
/// Duration of the crying pose.
pub const CRY_DURATION: Duration = Duration::from_millis(1500);

/// Produces character tweens and switches physics authority.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterMotor {
    /// Easing for [`turn`](Self::turn).
    pub turn_easing: EasingFunction,
    /// Friction of bodies created by [`attach_physics`](Self::attach_physics).
    pub body_friction: f32,
}

impl Default for CharacterMotor {
    fn default() -> Self {
        Self {
            turn_easing: EasingFunction::QuadraticOut,
            body_friction: 0.5,
        }
    }
}

impl CharacterMotor {
    /// Linear walk by `displacement` over `duration`, with the gait driven by
    /// the fraction of distance covered rather than by time.
    #[must_use]
    pub fn walk(
        &self,
        stage: &Stage,
        character: CharacterId,
        displacement: Vec3,
        duration: Duration,
    ) -> Tween {
        let start = stage
            .character(character)
            .map_or(Vec3::ZERO, |c| c.position);
        let total = displacement.length();

        Tween::new(
            TweenTarget::CharacterPosition(character),
            FieldGoals::xyz(start + displacement),
            duration,
        )
        .named("walk")
        .on_update(move |stage| {
            if let Some(c) = stage.character_mut(character) {
                let travelled = c.position.distance(start);
                gait_pose(gait_phase(travelled, total)).apply(&mut c.rig);
            }
        })
    }

    /// Rotate one arm to the declared goals.
    #[must_use]
    pub fn pose_arm(
        &self,
        character: CharacterId,
        side: Side,
        goals: FieldGoals,
        duration: Duration,
        easing: EasingFunction,
    ) -> Tween {
        Tween::new(TweenTarget::Joint(character, side.arm()), goals, duration)
            .easing(easing)
            .named("pose-arm")
    }

    /// Both arms raised to the face. Fire and forget.
    #[must_use]
    pub fn cry_pose(&self, character: CharacterId) -> [Tween; 2] {
        [
            self.pose_arm(
                character,
                Side::Left,
                FieldGoals::xyz(CRY_LEFT_ARM),
                CRY_DURATION,
                EasingFunction::QuadraticOut,
            ),
            self.pose_arm(
                character,
                Side::Right,
                FieldGoals::xyz(CRY_RIGHT_ARM),
                CRY_DURATION,
                EasingFunction::QuadraticOut,
            ),
        ]
    }

    /// Turn about the vertical axis by `delta_yaw` radians.
    #[must_use]
    pub fn turn(
        &self,
        stage: &Stage,
        character: CharacterId,
        delta_yaw: f32,
        duration: Duration,
    ) -> Tween {
        let yaw = stage.character(character).map_or(0.0, |c| c.rotation.y);
        Tween::new(
            TweenTarget::CharacterRotation(character),
            FieldGoals::y(yaw + delta_yaw),
            duration,
        )
        .easing(self.turn_easing)
        .named("turn")
    }

    /// Face `point` in the ground plane immediately. Returns false if the
    /// character is missing or physics-driven.
    pub fn look_at(
        &self,
        stage: &mut Stage,
        character: CharacterId,
        point: Vec3,
    ) -> bool {
        let Some(c) = stage.character_mut(character) else {
            return false;
        };
        if c.is_physics_driven() {
            log::trace!("{character} is physics-driven, look-at ignored");
            return false;
        }
        let to = point - c.position;
        if to.x.abs() <= f32::EPSILON && to.z.abs() <= f32::EPSILON {
            return true;
        }
        c.rotation = Vec3::new(0.0, to.x.atan2(to.z), 0.0);
        true
    }

    /// Hand the character's transform to a new dynamic box body sized to the
    /// rig's current world bounds. No-op if a body is already attached.
    pub fn attach_physics(
        &self,
        stage: &mut Stage,
        physics: &mut PhysicsStepper,
        character: CharacterId,
        mass: f32,
    ) -> Option<BodyId> {
        let c = stage.character(character)?;
        if let Authority::PhysicsDriven(body) = c.authority() {
            log::debug!("{character} already owns {body}");
            return Some(body);
        }

        let (min, max) = c.world_bounds();
        let desc = BodyDesc::new(BodyShape::cuboid(max - min), mass)
            .at(c.position)
            .rotated(c.world_quat())
            .with_friction(self.body_friction);
        let body =
            physics.add_body(&desc, Some(Proxy::Character(character)));

        if let Some(c) = stage.character_mut(character) {
            c.set_authority(Authority::PhysicsDriven(body));
            log::debug!("{} ({character}) now driven by {body}", c.name);
        }
        Some(body)
    }

    /// Remove the character's body and return the transform to direct
    /// assignment. Returns false (no-op) when nothing was attached.
    pub fn detach_physics(
        &self,
        stage: &mut Stage,
        physics: &mut PhysicsStepper,
        character: CharacterId,
    ) -> bool {
        let Some(c) = stage.character_mut(character) else {
            return false;
        };
        let Authority::PhysicsDriven(body) = c.authority() else {
            log::debug!("{character} has no body to detach");
            return false;
        };
        c.set_authority(Authority::Animated);
        let _ = physics.remove_body(body);
        log::debug!("{character} detached from {body}");
        true
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::animation::TweenSet;
    use crate::character::Character;
    use crate::options::PhysicsOptions;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn stage_with_walker() -> (Stage, CharacterId) {
        let mut stage = Stage::default();
        let id = stage.add_character(Character::new("walker", Vec3::ZERO));
        (stage, id)
    }

    #[test]
    fn test_gait_pose_quarter_phase() {
        let pose = gait_pose(FRAC_PI_2);
        assert!((pose.right_arm - 0.5).abs() < 1e-6);
        assert!((pose.left_leg - 0.5).abs() < 1e-6);
        assert!((pose.left_arm + 0.5).abs() < 1e-6);
        assert!((pose.right_leg + 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_gait_phase_zero_distance() {
        assert_eq!(gait_phase(0.0, 0.0), 0.0);
        assert!((gait_phase(7.5, 15.0) - PI).abs() < 1e-6);
    }

    #[test]
    fn test_walk_quarter_distance_swings_right_arm_forward() {
        let (mut stage, id) = stage_with_walker();
        let motor = CharacterMotor::default();
        let mut tweens = TweenSet::new();
        let walk = motor.walk(&stage, id, Vec3::new(0.0, 0.0, 15.0), ms(3000));
        let _ = tweens.start(walk, &stage, ms(0));

        let _ = tweens.update(ms(750), &mut stage);
        let c = stage.character(id).unwrap();
        assert!((c.position.z - 3.75).abs() < 1e-5);
        assert!((c.rig.rotation(Joint::RightArm).x - 0.5).abs() < 1e-5);

        let done = tweens.update(ms(3000), &mut stage);
        assert_eq!(done.len(), 1);
        let c = stage.character(id).unwrap();
        assert_eq!(c.position, Vec3::new(0.0, 0.0, 15.0));
    }

    fn limb_angles(stage: &Stage, id: CharacterId) -> [f32; 4] {
        let rig = &stage.character(id).unwrap().rig;
        [
            rig.rotation(Joint::RightArm).x,
            rig.rotation(Joint::LeftArm).x,
            rig.rotation(Joint::RightLeg).x,
            rig.rotation(Joint::LeftLeg).x,
        ]
    }

    fn sample_gait(duration_ms: u64, fractions: &[f32]) -> Vec<[f32; 4]> {
        let (mut stage, id) = stage_with_walker();
        let motor = CharacterMotor::default();
        let mut tweens = TweenSet::new();
        let walk = motor.walk(&stage, id, Vec3::new(0.0, 0.0, 15.0), ms(duration_ms));
        let _ = tweens.start(walk, &stage, ms(0));

        fractions
            .iter()
            .map(|f| {
                let _ = tweens.update(ms(duration_ms).mul_f32(*f), &mut stage);
                limb_angles(&stage, id)
            })
            .collect()
    }

    #[test]
    fn test_gait_ignores_walk_duration() {
        let fractions = [0.1, 0.25, 0.5, 0.8];
        let fast = sample_gait(1000, &fractions);
        let slow = sample_gait(3000, &fractions);

        for (a, b) in fast.iter().zip(&slow) {
            for (x, y) in a.iter().zip(b) {
                assert!((x - y).abs() < 1e-4, "{a:?} vs {b:?}");
            }
        }
        assert!((fast[1][0] - 0.5).abs() < 1e-4);
        assert!((fast[3][0] + 0.4755).abs() < 1e-3);
    }

    #[test]
    fn test_turn_is_relative() {
        let (mut stage, id) = stage_with_walker();
        stage.character_mut(id).unwrap().rotation.y = 1.0;
        let motor = CharacterMotor::default();
        let mut tweens = TweenSet::new();
        let _ = tweens.start(motor.turn(&stage, id, PI, ms(200)), &stage, ms(0));
        let _ = tweens.update(ms(200), &mut stage);
        assert_eq!(stage.character(id).unwrap().rotation.y, 1.0 + PI);
    }

    #[test]
    fn test_cry_pose_targets_both_arms() {
        let (mut stage, id) = stage_with_walker();
        let motor = CharacterMotor::default();
        let mut tweens = TweenSet::new();
        for tween in motor.cry_pose(id) {
            let _ = tweens.start(tween, &stage, ms(0));
        }
        let done = tweens.update(CRY_DURATION, &mut stage);
        assert_eq!(done.len(), 2);
        let rig = stage.character(id).unwrap().rig;
        assert_eq!(rig.rotation(Joint::LeftArm), CRY_LEFT_ARM);
        assert_eq!(rig.rotation(Joint::RightArm), CRY_RIGHT_ARM);
    }

    #[test]
    fn test_look_at_faces_point() {
        let (mut stage, id) = stage_with_walker();
        let motor = CharacterMotor::default();
        assert!(motor.look_at(&mut stage, id, Vec3::new(5.0, 0.0, 0.0)));
        let yaw = stage.character(id).unwrap().rotation.y;
        assert!((yaw - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_attach_and_detach_switch_authority() {
        let (mut stage, id) = stage_with_walker();
        let mut physics = PhysicsStepper::new(&PhysicsOptions::default());
        let motor = CharacterMotor::default();

        let body = motor.attach_physics(&mut stage, &mut physics, id, 5.0);
        let body = body.unwrap();
        assert!(physics.is_tracked(body));
        assert_eq!(
            stage.character(id).unwrap().authority(),
            Authority::PhysicsDriven(body)
        );
        // Second attach keeps the same body.
        assert_eq!(
            motor.attach_physics(&mut stage, &mut physics, id, 5.0),
            Some(body)
        );
        assert_eq!(physics.body_count(), 1);

        assert!(motor.detach_physics(&mut stage, &mut physics, id));
        assert!(!physics.is_tracked(body));
        assert_eq!(physics.body_count(), 0);
        assert!(!motor.detach_physics(&mut stage, &mut physics, id));
    }
}
