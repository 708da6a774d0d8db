//! The alley set: ground, crate stacks, building blocks and the three
//! characters.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};

use super::{Prop, PropShape, Proxy, Stage};
use crate::character::{Character, CharacterId};
use crate::options::Options;
use crate::physics::{BodyDesc, BodyShape, PhysicsStepper};

const GROUND_TEXTURE: &str = "textures/brick_pavement.jpg";
const BRICK_TEXTURE: &str = "textures/brick_building.jpg";
const RUINS_TEXTURE: &str = "textures/brick_building_ruins.jpg";
const BLOCK_TEXTURE: &str = "textures/building_block.jpg";
const GUN_MESH: &str = "models/pistol/scene.gltf";

/// The characters of the narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cast {
    /// The shooter.
    pub takaya: CharacterId,
    /// The victim.
    pub aragaki: CharacterId,
    /// The witness.
    pub ken: CharacterId,
}

/// A stack of unit crates, `count` boxes along each axis from `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrateStack {
    /// Boxes along x, y and z.
    pub count: [u32; 3],
    /// Centre of the lowest corner box.
    pub origin: Vec3,
}

/// Crate stacks at the end of the alley.
pub const CRATE_STACKS: [CrateStack; 2] = [
    CrateStack {
        count: [8, 3, 5],
        origin: Vec3::new(7.0, 0.5, 10.5),
    },
    CrateStack {
        count: [6, 6, 5],
        origin: Vec3::new(7.0, 0.5, 15.0),
    },
];

/// Mass of one crate.
pub const CRATE_MASS: f32 = 1.0;

struct Block {
    name: &'static str,
    position: Vec3,
    size: Vec3,
    quarter_turn: bool,
    texture: Option<&'static str>,
    solid: bool,
}

const fn building(
    name: &'static str,
    position: Vec3,
    size: Vec3,
    quarter_turn: bool,
    texture: &'static str,
) -> Block {
    Block {
        name,
        position,
        size,
        quarter_turn,
        texture: Some(texture),
        solid: true,
    }
}

const fn shadow(name: &'static str, position: Vec3) -> Block {
    Block {
        name,
        position,
        size: Vec3::new(4.5, 25.0, 7.0),
        quarter_turn: false,
        texture: None,
        solid: false,
    }
}

const BLOCKS: [Block; 8] = [
    building(
        "brick-1",
        Vec3::new(10.0, 1.0, -5.0),
        Vec3::new(25.0, 25.0, 7.0),
        true,
        BRICK_TEXTURE,
    ),
    building(
        "ruins-1",
        Vec3::new(-8.0, 1.0, -10.0),
        Vec3::new(20.0, 25.0, 7.0),
        false,
        RUINS_TEXTURE,
    ),
    shadow("shadow-1", Vec3::new(4.0, 1.0, -15.0)),
    building(
        "block-1",
        Vec3::new(15.0, 1.0, 12.0),
        Vec3::new(20.0, 45.0, 1.0),
        true,
        BLOCK_TEXTURE,
    ),
    building(
        "ruins-2",
        Vec3::new(5.0, 1.0, 25.0),
        Vec3::new(20.0, 25.0, 7.0),
        false,
        RUINS_TEXTURE,
    ),
    building(
        "brick-2",
        Vec3::new(-9.0, 1.0, 20.0),
        Vec3::new(25.0, 25.0, 7.0),
        false,
        BRICK_TEXTURE,
    ),
    building(
        "brick-3",
        Vec3::new(-20.0, 1.0, -3.0),
        Vec3::new(25.0, 25.0, 7.0),
        true,
        BRICK_TEXTURE,
    ),
    shadow("shadow-2", Vec3::new(-23.0, 1.0, 13.0)),
];

fn add_box(
    stage: &mut Stage,
    physics: &mut PhysicsStepper,
    prop: Prop,
    mass: f32,
    friction: f32,
) {
    let PropShape::Cuboid { size } = prop.shape else {
        return;
    };
    let desc = BodyDesc::new(BodyShape::cuboid(size), mass)
        .at(prop.position)
        .rotated(prop.rotation)
        .with_friction(friction);
    let id = stage.add_prop(prop);
    let body = physics.add_body(&desc, Some(Proxy::Prop(id)));
    if let Some(prop) = stage.prop_mut(id) {
        prop.body = Some(body);
    }
}

/// Populate `stage` and `physics` with the alley and return the cast.
pub fn build(
    options: &Options,
    stage: &mut Stage,
    physics: &mut PhysicsStepper,
) -> Cast {
    let opts = &options.physics;

    add_box(
        stage,
        physics,
        Prop::new(
            "ground",
            PropShape::Cuboid {
                size: Vec3::new(40.0, 1.0, 40.0),
            },
            Vec3::new(0.0, -0.5, 0.0),
        )
        .with_texture(GROUND_TEXTURE),
        0.0,
        opts.building_friction,
    );

    for stack in &CRATE_STACKS {
        let [nx, ny, nz] = stack.count;
        for y in 0..ny {
            for x in 0..nx {
                for z in 0..nz {
                    let offset = Vec3::new(x as f32, y as f32, z as f32);
                    add_box(
                        stage,
                        physics,
                        Prop::new(
                            "crate",
                            PropShape::Cuboid { size: Vec3::ONE },
                            stack.origin + offset,
                        ),
                        CRATE_MASS,
                        opts.box_friction,
                    );
                }
            }
        }
    }

    for block in &BLOCKS {
        let mut prop = Prop::new(
            block.name,
            PropShape::Cuboid { size: block.size },
            block.position,
        );
        if block.quarter_turn {
            prop = prop.rotated(Quat::from_rotation_y(FRAC_PI_2));
        }
        if let Some(texture) = block.texture {
            prop = prop.with_texture(texture);
        }
        if block.solid {
            add_box(stage, physics, prop, 0.0, opts.building_friction);
        } else {
            let _ = stage.add_prop(prop);
        }
    }

    let takaya = stage.add_character(
        Character::new("Takaya", Vec3::new(4.0, 1.95, -13.0))
            .with_scale(Vec3::splat(0.15))
            .with_skin("skins/takaya.png")
            .with_held_item(GUN_MESH),
    );
    let aragaki = stage.add_character(
        Character::new("Aragaki", Vec3::new(-20.0, 1.95, 13.0))
            .with_scale(Vec3::splat(0.125))
            .with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0))
            .with_skin("skins/aragaki.png"),
    );
    let ken = stage.add_character(
        Character::new("Ken", Vec3::new(5.0, 1.25, 13.0))
            .with_scale(Vec3::new(0.08, 0.085, 0.125))
            .with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0))
            .with_skin("skins/ken.png"),
    );

    log::debug!(
        "alley built: {} props, {} bodies ({} tracked)",
        stage.props().count(),
        physics.body_count(),
        physics.tracked().len()
    );

    Cast {
        takaya,
        aragaki,
        ken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crate_count() -> usize {
        CRATE_STACKS
            .iter()
            .map(|s| s.count.iter().product::<u32>() as usize)
            .sum()
    }

    #[test]
    fn only_crates_are_tracked() {
        let options = Options::default();
        let mut stage = Stage::default();
        let mut physics = PhysicsStepper::new(&options.physics);
        let _ = build(&options, &mut stage, &mut physics);

        assert_eq!(crate_count(), 120 + 180);
        assert_eq!(physics.tracked().len(), crate_count());
        // Ground plus six solid buildings are static bodies.
        assert_eq!(physics.body_count(), crate_count() + 7);
        // Shadow blocks have no body.
        let shadows: Vec<_> = stage
            .props()
            .filter(|(_, p)| p.name.starts_with("shadow"))
            .collect();
        assert_eq!(shadows.len(), 2);
        assert!(shadows.iter().all(|(_, p)| p.body.is_none()));
    }

    #[test]
    fn cast_is_placed() {
        let options = Options::default();
        let mut stage = Stage::default();
        let mut physics = PhysicsStepper::new(&options.physics);
        let cast = build(&options, &mut stage, &mut physics);

        assert_eq!(stage.find_character("Ken"), Some(cast.ken));
        let aragaki = stage.character(cast.aragaki).unwrap();
        assert_eq!(aragaki.position, Vec3::new(-20.0, 1.95, 13.0));
        assert_eq!(aragaki.rotation.y, FRAC_PI_2);
        assert!(stage.character(cast.takaya).unwrap().held_item.is_some());
    }
}
