//! Per-frame physics stepping and transform read-back.

use std::fmt;

use super::backend::{BodyDesc, BodyId, PhysicsBackend};
use super::rapier::RapierBackend;
use crate::options::PhysicsOptions;
use crate::scene::{Proxy, Stage};

/// A dynamic body whose transform is copied onto a stage proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedBody {
    /// Simulated body.
    pub body: BodyId,
    /// Visual proxy receiving the read-back.
    pub proxy: Proxy,
}

/// Owns the physics backend and the read-back set.
///
/// Only dynamic bodies with a proxy are tracked. Static bodies (mass `<= 0`)
/// are added to the world but never read back.
pub struct PhysicsStepper {
    backend: Box<dyn PhysicsBackend>,
    tracked: Vec<TrackedBody>,
    max_step: f32,
    steps: u64,
}

impl PhysicsStepper {
    /// Stepper over a rapier world configured by `options`.
    #[must_use]
    pub fn new(options: &PhysicsOptions) -> Self {
        Self::with_backend(Box::new(RapierBackend::new(options)), options)
    }

    /// Stepper over any backend.
    #[must_use]
    pub fn with_backend(
        backend: Box<dyn PhysicsBackend>,
        options: &PhysicsOptions,
    ) -> Self {
        Self {
            backend,
            tracked: Vec::new(),
            max_step: options.max_step_secs,
            steps: 0,
        }
    }

    /// Add a body. It joins the read-back set when it is dynamic and has a
    /// proxy.
    pub fn add_body(&mut self, desc: &BodyDesc, proxy: Option<Proxy>) -> BodyId {
        let body = self.backend.add_body(desc);
        match proxy {
            Some(proxy) if !desc.is_static() => {
                self.tracked.push(TrackedBody { body, proxy });
            }
            _ => {}
        }
        body
    }

    /// Remove a body from the world and from the read-back set.
    pub fn remove_body(&mut self, body: BodyId) -> bool {
        self.tracked.retain(|t| t.body != body);
        self.backend.remove_body(body)
    }

    /// Overwrite a body's linear velocity.
    pub fn set_linear_velocity(&mut self, body: BodyId, velocity: glam::Vec3) {
        self.backend.set_linear_velocity(body, velocity);
    }

    /// Advance the simulation by `dt` seconds and copy every tracked body's
    /// transform onto its proxy, clearing the proxy's collided flag.
    pub fn step(&mut self, dt: f32, stage: &mut Stage) {
        if dt <= 0.0 {
            return;
        }
        let dt = if self.max_step > 0.0 {
            dt.min(self.max_step)
        } else {
            dt
        };
        self.backend.step(dt);
        self.steps += 1;

        for tracked in &self.tracked {
            if let Some((position, rotation)) =
                self.backend.body_transform(tracked.body)
            {
                stage.apply_body_transform(
                    tracked.proxy,
                    tracked.body,
                    position,
                    rotation,
                );
            }
        }
    }

    /// Whether a body is in the read-back set.
    #[must_use]
    pub fn is_tracked(&self, body: BodyId) -> bool {
        self.tracked.iter().any(|t| t.body == body)
    }

    /// The read-back set.
    #[must_use]
    pub fn tracked(&self) -> &[TrackedBody] {
        &self.tracked
    }

    /// Bodies in the world, static ones included.
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.backend.body_count()
    }

    /// World transform of a body.
    #[must_use]
    pub fn body_transform(&self, body: BodyId) -> Option<(glam::Vec3, glam::Quat)> {
        self.backend.body_transform(body)
    }

    /// Number of steps taken.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl fmt::Debug for PhysicsStepper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicsStepper")
            .field("tracked", &self.tracked.len())
            .field("bodies", &self.backend.body_count())
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}
