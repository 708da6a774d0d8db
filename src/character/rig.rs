//! Block-figure humanoid rig: four rotatable limb joints plus fixed head and
//! torso.
//!
//! Geometry is in model units (a figure 32 units tall, origin at its vertical
//! centre); the owning character's scale maps it to world units.

use glam::{Affine3A, EulerRot, Quat, Vec3};

/// A rotatable limb joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Joint {
    /// Left arm, pivoting at the shoulder.
    LeftArm,
    /// Right arm, pivoting at the shoulder.
    RightArm,
    /// Left leg, pivoting at the hip.
    LeftLeg,
    /// Right leg, pivoting at the hip.
    RightLeg,
}

impl Joint {
    /// All joints.
    pub const ALL: [Joint; 4] =
        [Joint::LeftArm, Joint::RightArm, Joint::LeftLeg, Joint::RightLeg];

    fn index(self) -> usize {
        match self {
            Joint::LeftArm => 0,
            Joint::RightArm => 1,
            Joint::LeftLeg => 2,
            Joint::RightLeg => 3,
        }
    }

    /// Pivot position in model space.
    #[must_use]
    pub const fn pivot(self) -> Vec3 {
        match self {
            Joint::LeftArm => Vec3::new(6.0, 8.0, 0.0),
            Joint::RightArm => Vec3::new(-6.0, 8.0, 0.0),
            Joint::LeftLeg => Vec3::new(2.0, -4.0, 0.0),
            Joint::RightLeg => Vec3::new(-2.0, -4.0, 0.0),
        }
    }
}

/// Body side, for the arm-posing helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Character's left.
    Left,
    /// Character's right.
    Right,
}

impl Side {
    /// Arm joint on this side.
    #[must_use]
    pub fn arm(self) -> Joint {
        match self {
            Side::Left => Joint::LeftArm,
            Side::Right => Joint::RightArm,
        }
    }

    /// Leg joint on this side.
    #[must_use]
    pub fn leg(self) -> Joint {
        match self {
            Side::Left => Joint::LeftLeg,
            Side::Right => Joint::RightLeg,
        }
    }
}

/// Quaternion of an XYZ Euler rotation.
#[inline]
#[must_use]
pub fn euler_quat(rotation: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
}

struct Part {
    joint: Option<Joint>,
    /// Pivot in model space.
    pivot: Vec3,
    /// Box centre relative to the pivot.
    offset: Vec3,
    size: Vec3,
}

// Limbs hang 12 units below their pivot.
const PARTS: [Part; 6] = [
    Part {
        joint: None,
        pivot: Vec3::new(0.0, 12.0, 0.0),
        offset: Vec3::ZERO,
        size: Vec3::new(8.0, 8.0, 8.0),
    },
    Part {
        joint: None,
        pivot: Vec3::new(0.0, 2.0, 0.0),
        offset: Vec3::ZERO,
        size: Vec3::new(8.0, 12.0, 4.0),
    },
    Part {
        joint: Some(Joint::LeftArm),
        pivot: Joint::LeftArm.pivot(),
        offset: Vec3::new(0.0, -6.0, 0.0),
        size: Vec3::new(4.0, 12.0, 4.0),
    },
    Part {
        joint: Some(Joint::RightArm),
        pivot: Joint::RightArm.pivot(),
        offset: Vec3::new(0.0, -6.0, 0.0),
        size: Vec3::new(4.0, 12.0, 4.0),
    },
    Part {
        joint: Some(Joint::LeftLeg),
        pivot: Joint::LeftLeg.pivot(),
        offset: Vec3::new(0.0, -6.0, 0.0),
        size: Vec3::new(4.0, 12.0, 4.0),
    },
    Part {
        joint: Some(Joint::RightLeg),
        pivot: Joint::RightLeg.pivot(),
        offset: Vec3::new(0.0, -6.0, 0.0),
        size: Vec3::new(4.0, 12.0, 4.0),
    },
];

/// Joint rotations of one humanoid.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HumanoidRig {
    rotations: [Vec3; 4],
}

impl HumanoidRig {
    /// Rig in its rest pose.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// XYZ Euler rotation of a joint.
    #[must_use]
    pub fn rotation(&self, joint: Joint) -> Vec3 {
        self.rotations[joint.index()]
    }

    /// Mutable rotation of a joint.
    pub fn rotation_mut(&mut self, joint: Joint) -> &mut Vec3 {
        &mut self.rotations[joint.index()]
    }

    /// Replace a joint's rotation.
    pub fn set_rotation(&mut self, joint: Joint, rotation: Vec3) {
        self.rotations[joint.index()] = rotation;
    }

    /// Axis-aligned bounds of every part after applying joint rotations and
    /// `transform`. Returns `(min, max)`.
    #[must_use]
    pub fn bounds(&self, transform: &Affine3A) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for part in &PARTS {
            let rotation = part
                .joint
                .map_or(Quat::IDENTITY, |j| euler_quat(self.rotation(j)));
            let half = part.size * 0.5;
            for corner in 0..8_u8 {
                let sign = Vec3::new(
                    if corner & 1 == 0 { -1.0 } else { 1.0 },
                    if corner & 2 == 0 { -1.0 } else { 1.0 },
                    if corner & 4 == 0 { -1.0 } else { 1.0 },
                );
                let local = part.pivot + rotation * (part.offset + half * sign);
                let world = transform.transform_point3(local);
                min = min.min(world);
                max = max.max(world);
            }
        }
        (min, max)
    }
}
