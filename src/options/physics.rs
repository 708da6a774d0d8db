use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Rigid-body simulation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Physics", inline)]
#[serde(default)]
pub struct PhysicsOptions {
    /// Downward gravitational acceleration.
    #[schemars(title = "Gravity", range(min = 0.0, max = 30.0), extend("step" = 0.1))]
    pub gravity: f32,
    /// Constraint-solver iterations per step.
    #[schemars(title = "Solver Iterations", range(min = 1, max = 50))]
    pub solver_iterations: u32,
    /// Longest step the simulation takes in one frame, in seconds
    /// (0 = unlimited).
    #[schemars(skip)]
    pub max_step_secs: f32,
    /// Friction of the loose boxes.
    #[schemars(title = "Box Friction", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub box_friction: f32,
    /// Friction of the ground and buildings.
    #[schemars(title = "Building Friction", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub building_friction: f32,
}

impl Default for PhysicsOptions {
    fn default() -> Self {
        Self {
            gravity: 7.8,
            solver_iterations: 10,
            max_step_secs: 0.1,
            box_friction: 0.5,
            building_friction: 0.8,
        }
    }
}
