//! Ballistic projectiles fired from a character's hand.

use glam::Vec3;

use super::backend::{BodyDesc, BodyId, BodyShape};
use super::stepper::PhysicsStepper;
use crate::character::{CharacterId, Joint};
use crate::scene::{Prop, PropId, PropShape, Proxy, Stage};

/// Projectile parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    /// Sphere radius.
    pub radius: f32,
    /// Mass in kilograms.
    pub mass: f32,
    /// Launch speed in units per second.
    pub speed: f32,
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            radius: 0.05,
            mass: 5.0,
            speed: 25.0,
        }
    }
}

impl Projectile {
    /// Projectile with the default size and mass at `speed`.
    #[must_use]
    pub fn with_speed(speed: f32) -> Self {
        Self {
            speed,
            ..Self::default()
        }
    }

    /// Spawn a sphere at the shooter's right hand moving towards `target`.
    ///
    /// The sphere becomes a stage prop whose transform is driven by physics.
    /// Returns `None` if the shooter does not exist.
    pub fn launch(
        &self,
        stage: &mut Stage,
        physics: &mut PhysicsStepper,
        shooter: CharacterId,
        target: Vec3,
    ) -> Option<(PropId, BodyId)> {
        let hand = stage
            .character(shooter)?
            .joint_world_position(Joint::RightArm);
        let velocity = (target - hand).normalize_or_zero() * self.speed;

        let prop = stage.add_prop(Prop::new(
            "projectile",
            PropShape::Sphere {
                radius: self.radius,
            },
            hand,
        ));
        let body = physics.add_body(
            &BodyDesc::new(
                BodyShape::Ball {
                    radius: self.radius,
                },
                self.mass,
            )
            .at(hand)
            .with_velocity(velocity),
            Some(Proxy::Prop(prop)),
        );
        log::debug!(
            "projectile {body} launched from {hand} with velocity {velocity}"
        );
        Some((prop, body))
    }
}
