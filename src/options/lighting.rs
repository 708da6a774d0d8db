use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Ambient and directional light, before and after the finale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
pub struct LightingOptions {
    /// Ambient colour during the narrative.
    #[schemars(skip)]
    pub ambient_color: [f32; 3],
    /// Ambient intensity during the narrative.
    #[schemars(title = "Ambient", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub ambient_intensity: f32,
    /// Ambient colour after the finale starts.
    #[schemars(skip)]
    pub final_ambient_color: [f32; 3],
    /// Ambient intensity after the finale starts.
    #[schemars(title = "Final Ambient", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub final_ambient_intensity: f32,
    /// Directional light colour.
    #[schemars(skip)]
    pub sun_color: [f32; 3],
    /// Directional light intensity.
    #[schemars(title = "Sun", range(min = 0.0, max = 2.0), extend("step" = 0.01))]
    pub sun_intensity: f32,
    /// Directional light position.
    #[schemars(skip)]
    pub sun_position: [f32; 3],
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            // #1ed643
            ambient_color: [0.118, 0.839, 0.263],
            ambient_intensity: 0.35,
            // #707070
            final_ambient_color: [0.439, 0.439, 0.439],
            final_ambient_intensity: 0.05,
            sun_color: [1.0, 1.0, 1.0],
            sun_intensity: 0.15,
            sun_position: [-125.0, 18.0, 5.0],
        }
    }
}
