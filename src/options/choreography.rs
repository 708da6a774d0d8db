use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tunables of the scripted narrative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Choreography", inline)]
#[serde(default)]
pub struct ChoreographyOptions {
    /// Mass of the body a character gains when shot.
    #[schemars(title = "Character Mass", range(min = 0.1, max = 100.0))]
    pub character_mass: f32,
    /// Projectile launch speed.
    #[schemars(title = "Projectile Speed", range(min = 1.0, max = 200.0))]
    pub projectile_speed: f32,
    /// Text of the closing card.
    #[schemars(title = "End Card")]
    pub end_card_message: String,
    /// How long the closing card stays up, in milliseconds.
    #[schemars(skip)]
    pub end_card_visible_ms: u64,
}

impl Default for ChoreographyOptions {
    fn default() -> Self {
        Self {
            character_mass: 5.0,
            projectile_speed: 25.0,
            end_card_message: "Incidente del 4/10\nNéstor Déniz González".to_owned(),
            end_card_visible_ms: 2500,
        }
    }
}
