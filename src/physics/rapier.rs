//! [`PhysicsBackend`] backed by rapier3d.

use std::num::NonZeroUsize;

use glam::{Quat, Vec3};
use rapier3d::na::{Quaternion, UnitQuaternion};
use rapier3d::prelude::*;
use rustc_hash::FxHashMap;

use super::backend::{BodyDesc, BodyId, BodyShape, PhysicsBackend};
use crate::options::PhysicsOptions;

fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

fn to_isometry(position: Vec3, rotation: Quat) -> Isometry<Real> {
    let q = UnitQuaternion::new_normalize(Quaternion::new(
        rotation.w, rotation.x, rotation.y, rotation.z,
    ));
    Isometry::from_parts(
        Translation::new(position.x, position.y, position.z),
        q,
    )
}

/// Manages the rapier3d world.
pub struct RapierBackend {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    /// Map from our body ids to rapier handles
    handles: FxHashMap<BodyId, RigidBodyHandle>,
    next_id: u64,
}

impl RapierBackend {
    /// World with downward gravity and solver iterations from `options`.
    #[must_use]
    pub fn new(options: &PhysicsOptions) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.num_solver_iterations =
            NonZeroUsize::new(options.solver_iterations as usize)
                .unwrap_or(NonZeroUsize::MIN);

        Self {
            gravity: vector![0.0, -options.gravity, 0.0],
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            handles: FxHashMap::default(),
            next_id: 0,
        }
    }

    /// Linear velocity of a body.
    #[must_use]
    pub fn linear_velocity(&self, id: BodyId) -> Option<Vec3> {
        let body = self.bodies.get(*self.handles.get(&id)?)?;
        let v = body.linvel();
        Some(Vec3::new(v.x, v.y, v.z))
    }
}

impl PhysicsBackend for RapierBackend {
    fn add_body(&mut self, desc: &BodyDesc) -> BodyId {
        let builder = if desc.is_static() {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic()
                .linvel(to_vector(desc.linear_velocity))
                .ccd_enabled(matches!(desc.shape, BodyShape::Ball { .. }))
        };
        let body = builder
            .position(to_isometry(desc.position, desc.rotation))
            .build();
        let handle = self.bodies.insert(body);

        let collider = match desc.shape {
            BodyShape::Cuboid { half_extents } => ColliderBuilder::cuboid(
                half_extents.x,
                half_extents.y,
                half_extents.z,
            ),
            BodyShape::Ball { radius } => ColliderBuilder::ball(radius),
        };
        let collider = if desc.is_static() {
            collider.friction(desc.friction)
        } else {
            collider.friction(desc.friction).mass(desc.mass)
        };
        let _ = self.colliders.insert_with_parent(
            collider.build(),
            handle,
            &mut self.bodies,
        );

        let id = BodyId(self.next_id);
        self.next_id += 1;
        let _ = self.handles.insert(id, handle);
        id
    }

    fn remove_body(&mut self, id: BodyId) -> bool {
        let Some(handle) = self.handles.remove(&id) else {
            return false;
        };
        self.bodies
            .remove(
                handle,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    fn set_linear_velocity(&mut self, id: BodyId, velocity: Vec3) {
        let Some(handle) = self.handles.get(&id) else {
            return;
        };
        if let Some(body) = self.bodies.get_mut(*handle) {
            body.set_linvel(to_vector(velocity), true);
        }
    }

    fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }

    fn body_transform(&self, id: BodyId) -> Option<(Vec3, Quat)> {
        let body = self.bodies.get(*self.handles.get(&id)?)?;
        let t = body.translation();
        let r = body.rotation();
        Some((
            Vec3::new(t.x, t.y, t.z),
            Quat::from_xyzw(r.i, r.j, r.k, r.w),
        ))
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> RapierBackend {
        RapierBackend::new(&PhysicsOptions::default())
    }

    #[test]
    fn dynamic_body_falls_under_gravity() {
        let mut physics = backend();
        let id = physics.add_body(
            &BodyDesc::new(BodyShape::cuboid(Vec3::ONE), 1.0)
                .at(Vec3::new(0.0, 10.0, 0.0)),
        );
        for _ in 0..30 {
            physics.step(1.0 / 60.0);
        }
        let (pos, _) = physics.body_transform(id).unwrap();
        assert!(pos.y < 10.0, "body should fall, y = {}", pos.y);
    }

    #[test]
    fn static_body_stays_put() {
        let mut physics = backend();
        let id = physics.add_body(
            &BodyDesc::new(BodyShape::cuboid(Vec3::splat(2.0)), 0.0)
                .at(Vec3::new(1.0, 2.0, 3.0)),
        );
        for _ in 0..30 {
            physics.step(1.0 / 60.0);
        }
        let (pos, rot) = physics.body_transform(id).unwrap();
        assert!((pos - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
        assert!(rot.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn initial_velocity_and_removal() {
        let mut physics = backend();
        let id = physics.add_body(
            &BodyDesc::new(BodyShape::Ball { radius: 0.05 }, 5.0)
                .with_velocity(Vec3::new(25.0, 0.0, 0.0)),
        );
        let v = physics.linear_velocity(id).unwrap();
        assert!((v.x - 25.0).abs() < 1e-4);

        physics.set_linear_velocity(id, Vec3::new(0.0, 0.0, -3.0));
        let v = physics.linear_velocity(id).unwrap();
        assert!((v.z + 3.0).abs() < 1e-4);

        assert_eq!(physics.body_count(), 1);
        assert!(physics.remove_body(id));
        assert!(!physics.remove_body(id));
        assert_eq!(physics.body_count(), 0);
        assert!(physics.body_transform(id).is_none());
    }
}
