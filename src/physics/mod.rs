//! Rigid-body simulation: backend trait, rapier3d world, per-frame stepper.

pub mod backend;
pub mod projectile;
pub mod rapier;
pub mod stepper;

pub use backend::{BodyDesc, BodyId, BodyShape, PhysicsBackend};
pub use projectile::Projectile;
pub use rapier::RapierBackend;
pub use stepper::{PhysicsStepper, TrackedBody};
