use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where textures, meshes and sounds are looked up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Assets", inline)]
#[serde(default)]
pub struct AssetOptions {
    /// Directory manifest paths are resolved against.
    #[schemars(title = "Root")]
    pub root: String,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            root: "assets".to_owned(),
        }
    }
}
