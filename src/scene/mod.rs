//! The stage: every object the cinematic animates, in one context.
//!
//! The [`Stage`] replaces process-wide scene state. Tweens address it through
//! [`TweenTarget`]s, the physics stepper writes read-back through
//! [`Stage::apply_body_transform`], and beats reach it through their context.

pub mod alley;
pub mod assets;
pub mod overlay;

use glam::{Quat, Vec3};
pub use overlay::{EndCard, FADE_DURATION};

use crate::animation::{Field, TweenTarget};
use crate::camera::CameraRig;
use crate::character::{Authority, Character, CharacterId};
use crate::options::LightingOptions;
use crate::physics::BodyId;

/// Index of a prop on the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropId(pub(crate) usize);

/// Something a physics body can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Proxy {
    /// A static or loose prop.
    Prop(PropId),
    /// A character whose authority is physics-driven.
    Character(CharacterId),
}

/// Shape of a prop's visual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropShape {
    /// Box of full size `size`.
    Cuboid {
        /// Full extents.
        size: Vec3,
    },
    /// Sphere.
    Sphere {
        /// Sphere radius.
        radius: f32,
    },
}

/// Non-character scene object: ground, boxes, buildings, projectiles.
#[derive(Debug, Clone, PartialEq)]
pub struct Prop {
    /// Name used in logs and traces.
    pub name: String,
    /// Visual shape.
    pub shape: PropShape,
    /// World position.
    pub position: Vec3,
    /// World orientation.
    pub rotation: Quat,
    /// Body driving the prop, if any.
    pub body: Option<BodyId>,
    /// Set by collision response; cleared on every read-back.
    pub collided: bool,
    /// Texture path.
    pub texture: Option<String>,
    /// Whether the texture has been resolved and attached.
    pub visual_loaded: bool,
}

impl Prop {
    /// Untextured prop at `position`.
    #[must_use]
    pub fn new(name: impl Into<String>, shape: PropShape, position: Vec3) -> Self {
        Self {
            name: name.into(),
            shape,
            position,
            rotation: Quat::IDENTITY,
            body: None,
            collided: false,
            texture: None,
            visual_loaded: false,
        }
    }

    /// Set the orientation.
    #[must_use]
    pub fn rotated(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the texture path.
    #[must_use]
    pub fn with_texture(mut self, path: impl Into<String>) -> Self {
        self.texture = Some(path.into());
        self
    }
}

/// Scene lighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    /// Ambient light colour (linear RGB).
    pub ambient_color: [f32; 3],
    /// Ambient light intensity.
    pub ambient_intensity: f32,
    /// Directional light colour.
    pub sun_color: [f32; 3],
    /// Directional light intensity.
    pub sun_intensity: f32,
    /// Directional light position.
    pub sun_position: Vec3,
}

impl Lighting {
    /// Initial lighting from `options`.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        Self {
            ambient_color: options.ambient_color,
            ambient_intensity: options.ambient_intensity,
            sun_color: options.sun_color,
            sun_intensity: options.sun_intensity,
            sun_position: Vec3::from(options.sun_position),
        }
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Self::from_options(&LightingOptions::default())
    }
}

/// Everything the cinematic animates.
#[derive(Debug, Clone, Default)]
pub struct Stage {
    /// Camera and orbit focus.
    pub camera: CameraRig,
    /// Lights.
    pub lighting: Lighting,
    /// End-of-narrative text overlay.
    pub end_card: EndCard,
    characters: Vec<Character>,
    props: Vec<Prop>,
}

impl Stage {
    /// Empty stage with the given camera and lighting.
    #[must_use]
    pub fn new(camera: CameraRig, lighting: Lighting) -> Self {
        Self {
            camera,
            lighting,
            end_card: EndCard::default(),
            characters: Vec::new(),
            props: Vec::new(),
        }
    }

    // ── Characters ──

    /// Add a character.
    pub fn add_character(&mut self, character: Character) -> CharacterId {
        self.characters.push(character);
        CharacterId(self.characters.len() - 1)
    }

    /// Look up a character.
    #[must_use]
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(id.0)
    }

    /// Look up a character mutably.
    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(id.0)
    }

    /// Find a character by name.
    #[must_use]
    pub fn find_character(&self, name: &str) -> Option<CharacterId> {
        self.characters
            .iter()
            .position(|c| c.name == name)
            .map(CharacterId)
    }

    /// All characters with their ids.
    pub fn characters(&self) -> impl Iterator<Item = (CharacterId, &Character)> {
        self.characters
            .iter()
            .enumerate()
            .map(|(i, c)| (CharacterId(i), c))
    }

    // ── Props ──

    /// Add a prop.
    pub fn add_prop(&mut self, prop: Prop) -> PropId {
        self.props.push(prop);
        PropId(self.props.len() - 1)
    }

    /// Look up a prop.
    #[must_use]
    pub fn prop(&self, id: PropId) -> Option<&Prop> {
        self.props.get(id.0)
    }

    /// Look up a prop mutably.
    pub fn prop_mut(&mut self, id: PropId) -> Option<&mut Prop> {
        self.props.get_mut(id.0)
    }

    /// All props with their ids.
    pub fn props(&self) -> impl Iterator<Item = (PropId, &Prop)> {
        self.props.iter().enumerate().map(|(i, p)| (PropId(i), p))
    }

    // ── Tween access ──

    /// Current value of one field of a tween target. `None` for timers and
    /// unknown characters.
    #[must_use]
    pub fn read_field(&self, target: TweenTarget, field: Field) -> Option<f32> {
        let v = match target {
            TweenTarget::Timer => return None,
            TweenTarget::AmbientIntensity => {
                return Some(self.lighting.ambient_intensity)
            }
            TweenTarget::EndCardOpacity => return Some(self.end_card.opacity),
            TweenTarget::CameraEye => self.camera.camera.eye,
            TweenTarget::CameraFocus => self.camera.focus,
            TweenTarget::CharacterPosition(id) => self.character(id)?.position,
            TweenTarget::CharacterRotation(id) => self.character(id)?.rotation,
            TweenTarget::Joint(id, joint) => {
                self.character(id)?.rig.rotation(joint)
            }
        };
        Some(field.get(v))
    }

    /// Write one field of a tween target. Transform writes to a
    /// physics-driven character are refused. Returns whether the write
    /// happened.
    pub fn write_field(
        &mut self,
        target: TweenTarget,
        field: Field,
        value: f32,
    ) -> bool {
        let slot = match target {
            TweenTarget::Timer => return false,
            TweenTarget::AmbientIntensity => {
                self.lighting.ambient_intensity = value;
                return true;
            }
            TweenTarget::EndCardOpacity => {
                self.end_card.opacity = value;
                return true;
            }
            TweenTarget::CameraEye => &mut self.camera.camera.eye,
            TweenTarget::CameraFocus => &mut self.camera.focus,
            TweenTarget::CharacterPosition(id)
            | TweenTarget::CharacterRotation(id) => {
                let Some(c) = self.characters.get_mut(id.0) else {
                    return false;
                };
                if c.is_physics_driven() {
                    log::trace!("{id} is physics-driven, {target:?} ignored");
                    return false;
                }
                if matches!(target, TweenTarget::CharacterPosition(_)) {
                    &mut c.position
                } else {
                    &mut c.rotation
                }
            }
            TweenTarget::Joint(id, joint) => {
                let Some(c) = self.characters.get_mut(id.0) else {
                    return false;
                };
                c.rig.rotation_mut(joint)
            }
        };
        field.set(slot, value);
        true
    }

    // ── Physics read-back ──

    /// Copy a body's transform onto its proxy and clear the collided flag.
    /// Characters only accept the transform of the body they are driven by.
    pub fn apply_body_transform(
        &mut self,
        proxy: Proxy,
        body: BodyId,
        position: Vec3,
        rotation: Quat,
    ) {
        match proxy {
            Proxy::Prop(id) => {
                if let Some(prop) = self.props.get_mut(id.0) {
                    prop.position = position;
                    prop.rotation = rotation;
                    prop.collided = false;
                }
            }
            Proxy::Character(id) => {
                let Some(c) = self.characters.get_mut(id.0) else {
                    return;
                };
                if c.authority() != Authority::PhysicsDriven(body) {
                    return;
                }
                let (x, y, z) = rotation.to_euler(glam::EulerRot::XYZ);
                c.position = position;
                c.rotation = Vec3::new(x, y, z);
            }
        }
    }

    /// Set a character's transform directly. Refused while physics-driven.
    pub fn place_character(
        &mut self,
        id: CharacterId,
        position: Vec3,
        rotation: Vec3,
    ) -> bool {
        match self.character_mut(id) {
            Some(c) if !c.is_physics_driven() => {
                c.position = position;
                c.rotation = rotation;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Joint;

    #[test]
    fn read_and_write_character_fields() {
        let mut stage = Stage::default();
        let id = stage.add_character(Character::new("a", Vec3::ZERO));
        let target = TweenTarget::Joint(id, Joint::LeftArm);
        assert!(stage.write_field(target, Field::Z, 0.7));
        assert_eq!(stage.read_field(target, Field::Z), Some(0.7));
        assert_eq!(stage.find_character("a"), Some(id));
        assert_eq!(stage.find_character("b"), None);
    }

    #[test]
    fn physics_driven_transform_refuses_writes() {
        let mut stage = Stage::default();
        let id = stage.add_character(Character::new("a", Vec3::ZERO));
        stage
            .character_mut(id)
            .unwrap()
            .set_authority(Authority::PhysicsDriven(BodyId(0)));

        let pos = TweenTarget::CharacterPosition(id);
        assert!(!stage.write_field(pos, Field::X, 3.0));
        assert!(!stage.place_character(id, Vec3::ONE, Vec3::ZERO));
        // Joints stay animatable.
        assert!(stage.write_field(TweenTarget::Joint(id, Joint::RightArm), Field::X, 1.0));

        stage.apply_body_transform(
            Proxy::Character(id),
            BodyId(0),
            Vec3::new(1.0, 2.0, 3.0),
            Quat::IDENTITY,
        );
        assert_eq!(stage.character(id).unwrap().position, Vec3::new(1.0, 2.0, 3.0));

        // A stale body no longer drives the character.
        stage.apply_body_transform(
            Proxy::Character(id),
            BodyId(9),
            Vec3::ZERO,
            Quat::IDENTITY,
        );
        assert_eq!(stage.character(id).unwrap().position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn scalar_targets_ignore_field() {
        let mut stage = Stage::default();
        assert!(stage.write_field(TweenTarget::AmbientIntensity, Field::X, 0.05));
        assert_eq!(stage.lighting.ambient_intensity, 0.05);
        assert_eq!(stage.read_field(TweenTarget::Timer, Field::X), None);
        assert!(!stage.write_field(TweenTarget::Timer, Field::X, 1.0));
    }
}
