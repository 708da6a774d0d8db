use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and starting placement.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Initial aspect ratio, until the first resize.
    #[schemars(skip)]
    pub aspect: f32,
    /// Eye position at the start of the cinematic.
    #[schemars(skip)]
    pub start_eye: [f32; 3],
    /// Orbit focus at the start of the cinematic.
    #[schemars(skip)]
    pub start_focus: [f32; 3],
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 60.0,
            znear: 0.2,
            zfar: 2000.0,
            aspect: 16.0 / 9.0,
            start_eye: [-15.0, 3.0, 13.0],
            start_focus: [0.0, 3.0, 13.0],
        }
    }
}
