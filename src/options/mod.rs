//! Centralized playback options with TOML preset support.
//!
//! Physics, camera, lighting, asset lookup, playback pacing and the
//! narrative's tunables live here. Options serialize to/from TOML; every section is
//! `#[serde(default)]` so a file overriding a single value works.

mod assets;
mod camera;
mod choreography;
mod lighting;
mod physics;
mod playback;

use std::path::Path;

pub use assets::AssetOptions;
pub use camera::CameraOptions;
pub use choreography::ChoreographyOptions;
pub use lighting::LightingOptions;
pub use physics::PhysicsOptions;
pub use playback::PlaybackOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CutsceneError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[physics]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Frame pacing, limits and trace output.
    pub playback: PlaybackOptions,
    /// Rigid-body simulation parameters.
    pub physics: PhysicsOptions,
    /// Camera projection and start placement.
    pub camera: CameraOptions,
    /// Lighting before and after the finale.
    pub lighting: LightingOptions,
    /// Narrative tunables.
    pub choreography: ChoreographyOptions,
    /// Asset lookup.
    pub assets: AssetOptions,
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// I/O failures and malformed TOML.
    pub fn load(path: &Path) -> Result<Self, CutsceneError> {
        let content = std::fs::read_to_string(path).map_err(CutsceneError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text.
    ///
    /// # Errors
    ///
    /// [`CutsceneError::OptionsParse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, CutsceneError> {
        toml::from_str(content)
            .map_err(|e| CutsceneError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Serialization and I/O failures.
    pub fn save(&self, path: &Path) -> Result<(), CutsceneError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CutsceneError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CutsceneError::Io)?;
        }
        std::fs::write(path, content).map_err(CutsceneError::Io)
    }
}
