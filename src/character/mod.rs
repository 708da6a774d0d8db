//! Humanoid characters and the motor that animates them.
//!
//! A [`Character`] is a rigged figure with a world transform. Who may write
//! that transform is recorded in its [`Authority`]: tweens while
//! [`Authority::Animated`], the physics stepper while
//! [`Authority::PhysicsDriven`]. Only [`CharacterMotor::attach_physics`] and
//! [`CharacterMotor::detach_physics`] switch it.

pub mod motor;
pub mod rig;

use std::fmt;

use glam::{Affine3A, Quat, Vec3};
pub use motor::{gait_phase, gait_pose, CharacterMotor, GaitPose};
pub use rig::{euler_quat, HumanoidRig, Joint, Side};

use crate::physics::BodyId;

/// Index of a character on the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharacterId(pub(crate) usize);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "character#{}", self.0)
    }
}

/// Which subsystem owns a character's transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Authority {
    /// Tweens and direct assignment write the transform.
    #[default]
    Animated,
    /// The physics stepper copies this body's transform every step.
    PhysicsDriven(BodyId),
}

/// A rigged humanoid on the stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    /// Display name, also used for lookups.
    pub name: String,
    /// World position of the rig origin.
    pub position: Vec3,
    /// XYZ Euler rotation.
    pub rotation: Vec3,
    /// Per-axis scale from model units to world units.
    pub scale: Vec3,
    /// Joint rotations.
    pub rig: HumanoidRig,
    /// Skin texture path.
    pub skin: Option<String>,
    /// Mesh path held in the right hand.
    pub held_item: Option<String>,
    /// Whether the skin has been resolved and attached.
    pub visual_loaded: bool,
    authority: Authority,
}

impl Character {
    /// Character at `position` with unit scale and a rest pose.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            rig: HumanoidRig::new(),
            skin: None,
            held_item: None,
            visual_loaded: false,
            authority: Authority::Animated,
        }
    }

    /// Set the XYZ Euler rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the scale.
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Set the skin texture path.
    #[must_use]
    pub fn with_skin(mut self, path: impl Into<String>) -> Self {
        self.skin = Some(path.into());
        self
    }

    /// Set the mesh held in the right hand.
    #[must_use]
    pub fn with_held_item(mut self, path: impl Into<String>) -> Self {
        self.held_item = Some(path.into());
        self
    }

    /// Current authority.
    #[must_use]
    pub fn authority(&self) -> Authority {
        self.authority
    }

    pub(crate) fn set_authority(&mut self, authority: Authority) {
        self.authority = authority;
    }

    /// True while a physics body owns the transform.
    #[must_use]
    pub fn is_physics_driven(&self) -> bool {
        matches!(self.authority, Authority::PhysicsDriven(_))
    }

    /// World orientation.
    #[must_use]
    pub fn world_quat(&self) -> Quat {
        euler_quat(self.rotation)
    }

    /// Model-to-world transform.
    #[must_use]
    pub fn world_transform(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(
            self.scale,
            self.world_quat(),
            self.position,
        )
    }

    /// World position of a joint's pivot.
    #[must_use]
    pub fn joint_world_position(&self, joint: Joint) -> Vec3 {
        self.world_transform().transform_point3(joint.pivot())
    }

    /// World-space axis-aligned bounds of the posed rig, as `(min, max)`.
    #[must_use]
    pub fn world_bounds(&self) -> (Vec3, Vec3) {
        self.rig.bounds(&self.world_transform())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_bounds_follow_scale_and_position() {
        let c = Character::new("a", Vec3::new(1.0, 2.0, 3.0))
            .with_scale(Vec3::splat(0.5));
        let (min, max) = c.world_bounds();
        assert!((min - Vec3::new(-3.0, -6.0, 1.0)).length() < 1e-5);
        assert!((max - Vec3::new(5.0, 10.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn joint_world_position_rotates_with_character() {
        let c = Character::new("a", Vec3::ZERO)
            .with_rotation(Vec3::new(0.0, std::f32::consts::PI, 0.0));
        let shoulder = c.joint_world_position(Joint::RightArm);
        assert!((shoulder - Vec3::new(6.0, 8.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn new_characters_are_animated() {
        let c = Character::new("a", Vec3::ZERO);
        assert_eq!(c.authority(), Authority::Animated);
        assert!(!c.is_physics_driven());
    }
}
