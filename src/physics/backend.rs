//! Physics collaborator interface: body descriptions and the integrator trait.

use std::fmt;

use glam::{Quat, Vec3};

/// Handle of a body owned by a [`PhysicsBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// Collision shape of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    /// Box given by half extents.
    Cuboid {
        /// Half size along each local axis.
        half_extents: Vec3,
    },
    /// Sphere.
    Ball {
        /// Sphere radius.
        radius: f32,
    },
}

impl BodyShape {
    /// Box of full size `size`.
    #[must_use]
    pub fn cuboid(size: Vec3) -> Self {
        Self::Cuboid {
            half_extents: size * 0.5,
        }
    }
}

/// Everything needed to create a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    /// Collision shape.
    pub shape: BodyShape,
    /// Mass in kilograms; `<= 0` makes the body static.
    pub mass: f32,
    /// Initial world position.
    pub position: Vec3,
    /// Initial world orientation.
    pub rotation: Quat,
    /// Coulomb friction coefficient.
    pub friction: f32,
    /// Initial linear velocity (ignored for static bodies).
    pub linear_velocity: Vec3,
}

impl BodyDesc {
    /// Body of `shape` and `mass` at the origin.
    #[must_use]
    pub fn new(shape: BodyShape, mass: f32) -> Self {
        Self {
            shape,
            mass,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            friction: 0.5,
            linear_velocity: Vec3::ZERO,
        }
    }

    /// Set the initial position.
    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the initial orientation.
    #[must_use]
    pub fn rotated(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the friction coefficient.
    #[must_use]
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Set the initial linear velocity.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.linear_velocity = velocity;
        self
    }

    /// Immovable body (mass `<= 0`).
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.mass <= 0.0
    }
}

/// Rigid-body integrator consumed by the [`PhysicsStepper`].
///
/// [`PhysicsStepper`]: super::stepper::PhysicsStepper
pub trait PhysicsBackend {
    /// Create a body. Static when `desc.mass <= 0`.
    fn add_body(&mut self, desc: &BodyDesc) -> BodyId;

    /// Remove a body. Returns false if it did not exist.
    fn remove_body(&mut self, id: BodyId) -> bool;

    /// Overwrite a body's linear velocity and wake it.
    fn set_linear_velocity(&mut self, id: BodyId, velocity: Vec3);

    /// Advance the world by `dt` seconds.
    fn step(&mut self, dt: f32);

    /// World position and orientation of a body.
    fn body_transform(&self, id: BodyId) -> Option<(Vec3, Quat)>;

    /// Number of bodies in the world, static ones included.
    fn body_count(&self) -> usize;
}
