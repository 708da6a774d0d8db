//! The narrative: one table of beats, played in order.
//!
//! Positions are read from the stage when a beat is entered, so camera moves
//! and walks chain off wherever the previous beat left everyone.

use std::cell::Cell;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::rc::Rc;
use std::time::Duration;

use glam::Vec3;

use crate::animation::{Field, FieldGoals, TweenTarget};
use crate::audio::Cue;
use crate::camera::CameraDirector;
use crate::character::{CharacterId, CharacterMotor, Joint, Side};
use crate::options::Options;
use crate::physics::Projectile;
use crate::scene::alley::Cast;
use crate::scene::Stage;
use crate::timeline::{Beat, BeatContext};
use crate::util::easing::EasingFunction;

/// Raised-arm angle for pointing and aiming.
const ARM_RAISED: f32 = -FRAC_PI_2;
/// How long an arm takes to go up or down.
const ARM_SWING: Duration = Duration::from_millis(600);
/// How long a raised arm is held.
const ARM_HOLD: Duration = Duration::from_millis(1000);

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn position_of(stage: &Stage, id: CharacterId) -> Vec3 {
    stage.character(id).map_or(Vec3::ZERO, |c| c.position)
}

fn arm_x(stage: &Stage, id: CharacterId) -> f32 {
    stage
        .read_field(TweenTarget::Joint(id, Joint::RightArm), Field::X)
        .unwrap_or_default()
}

fn set_yaw(stage: &mut Stage, id: CharacterId, yaw: f32) {
    let _ = stage.write_field(TweenTarget::CharacterRotation(id), Field::Y, yaw);
}

fn add_yaw(stage: &mut Stage, id: CharacterId, delta: f32) {
    let target = TweenTarget::CharacterRotation(id);
    if let Some(yaw) = stage.read_field(target, Field::Y) {
        let _ = stage.write_field(target, Field::Y, yaw + delta);
    }
}

/// Camera move launched alongside the beat, with the beat held for
/// `duration`.
fn camera_shot(
    ctx: &mut BeatContext<'_>,
    position: Vec3,
    look_at: Vec3,
    duration: Duration,
) {
    let shot = CameraDirector::default().move_to(position, Some(look_at), duration);
    ctx.launch_all(shot.into_tweens());
    let _ = ctx.wait(duration);
}

fn walk_beat(
    label: &str,
    who: CharacterId,
    turn_first: f32,
    displacement: Vec3,
    duration: Duration,
) -> Beat {
    Beat::new(label, move |ctx| {
        if turn_first != 0.0 {
            add_yaw(ctx.stage_mut(), who, turn_first);
        }
        let walk = CharacterMotor::default().walk(
            ctx.stage(),
            who,
            displacement,
            duration,
        );
        let _ = ctx.gate(walk);
    })
}

fn turn_beat(label: &str, who: CharacterId, delta: f32, duration: Duration) -> Beat {
    Beat::new(label, move |ctx| {
        let turn = CharacterMotor::default().turn(ctx.stage(), who, delta, duration);
        let _ = ctx.gate(turn);
    })
}

/// Aragaki crosses the alley towards Ken.
fn first_act(cast: Cast) -> Vec<Beat> {
    let Cast { aragaki, ken, .. } = cast;
    vec![
        Beat::new("establishing pan", move |ctx| {
            let focus = position_of(ctx.stage(), aragaki);
            camera_shot(ctx, Vec3::new(5.0, 4.0, 12.0), focus, ms(10_000));
        }),
        walk_beat(
            "aragaki enters",
            aragaki,
            0.0,
            Vec3::new(15.0, 0.0, 0.0),
            ms(3000),
        ),
        Beat::new("behind aragaki", move |ctx| {
            let eye = position_of(ctx.stage(), aragaki) + Vec3::new(-2.0, 1.0, -2.0);
            let focus = position_of(ctx.stage(), ken);
            camera_shot(ctx, eye, focus, ms(3000));
        }),
        turn_beat("ken turns away", ken, PI, ms(2000)),
        walk_beat("ken walks", ken, 0.0, Vec3::new(-5.0, 0.0, 0.0), ms(2000)),
        turn_beat("ken turns back", ken, PI, ms(2000)),
        Beat::new("ken points at the crates", move |ctx| {
            let motor = CharacterMotor::default();
            let rest = arm_x(ctx.stage(), ken);
            let raise = motor.pose_arm(
                ken,
                Side::Right,
                FieldGoals::x(ARM_RAISED),
                ARM_SWING,
                EasingFunction::QuadraticOut,
            );
            let lower = motor
                .pose_arm(
                    ken,
                    Side::Right,
                    FieldGoals::x(rest),
                    ARM_SWING,
                    EasingFunction::QuadraticIn,
                )
                .delay(ARM_SWING + ARM_HOLD);
            ctx.launch_all([raise, lower]);

            set_yaw(ctx.stage_mut(), aragaki, PI);
            let walk = motor.walk(ctx.stage(), aragaki, Vec3::new(0.0, 0.0, -3.0), ms(2500));
            let _ = ctx.gate(walk);
        }),
        walk_beat(
            "aragaki heads for the crates",
            aragaki,
            -FRAC_PI_2,
            Vec3::new(10.0, 0.0, 0.0),
            ms(2500),
        ),
    ]
}

/// Takaya approaches and fires.
fn second_act(cast: Cast, options: &Options) -> Vec<Beat> {
    let Cast {
        takaya,
        aragaki,
        ken,
    } = cast;
    let mass = options.choreography.character_mass;
    let speed = options.choreography.projectile_speed;
    let rest_arm = Rc::new(Cell::new(0.0_f32));
    let rest_arm_lower = Rc::clone(&rest_arm);

    vec![
        Beat::new("takaya establishing", move |ctx| {
            let at = position_of(ctx.stage(), takaya);
            camera_shot(ctx, at + Vec3::new(0.0, 3.0, 25.0), at, ms(4500));
        }),
        walk_beat(
            "takaya approaches",
            takaya,
            0.0,
            Vec3::new(0.0, 0.0, 15.0),
            ms(3000),
        ),
        Beat::new("behind takaya", move |ctx| {
            let eye = position_of(ctx.stage(), takaya) + Vec3::new(-2.0, 1.0, -2.0);
            let focus = position_of(ctx.stage(), ken);
            camera_shot(ctx, eye, focus, ms(3000));
        }),
        walk_beat(
            "takaya sidesteps",
            takaya,
            -FRAC_PI_2,
            Vec3::new(-5.0, 0.0, 0.0),
            ms(2500),
        ),
        walk_beat(
            "takaya closes in",
            takaya,
            FRAC_PI_2,
            Vec3::new(0.0, 0.0, 4.0),
            ms(2500),
        ),
        Beat::new("over the shoulder", move |ctx| {
            add_yaw(ctx.stage_mut(), takaya, FRAC_PI_4);
            let eye = position_of(ctx.stage(), takaya) + Vec3::new(-2.0, 2.0, 4.0);
            let focus = position_of(ctx.stage(), aragaki);
            camera_shot(ctx, eye, focus, ms(3000));
        }),
        Beat::new("takaya aims", move |ctx| {
            let motor = CharacterMotor::default();
            let shooter = position_of(ctx.stage(), takaya);
            let _ = motor.look_at(ctx.stage_mut(), aragaki, shooter);
            rest_arm.set(arm_x(ctx.stage(), takaya));
            let _ = ctx.gate(motor.pose_arm(
                takaya,
                Side::Right,
                FieldGoals::x(ARM_RAISED),
                ARM_SWING,
                EasingFunction::QuadraticOut,
            ));
        }),
        Beat::new("shot", move |ctx| {
            let (stage, physics) = ctx.world_mut();
            let _ = CharacterMotor::default().attach_physics(stage, physics, aragaki, mass);
            let target = position_of(stage, aragaki);
            if Projectile::with_speed(speed)
                .launch(stage, physics, takaya, target)
                .is_none()
            {
                log::warn!("shot skipped: no shooter");
            }
            ctx.play(Cue::Gunshot);
            let _ = ctx.wait(ARM_HOLD);
        }),
        Beat::new("takaya lowers the gun", move |ctx| {
            let _ = ctx.gate(CharacterMotor::default().pose_arm(
                takaya,
                Side::Right,
                FieldGoals::x(rest_arm_lower.get()),
                ARM_SWING,
                EasingFunction::QuadraticIn,
            ));
        }),
    ]
}

/// Takaya leaves, the camera settles on Ken.
fn third_act(cast: Cast, options: &Options) -> Vec<Beat> {
    let Cast {
        takaya,
        aragaki,
        ken,
    } = cast;
    let final_color = options.lighting.final_ambient_color;
    let final_intensity = options.lighting.final_ambient_intensity;
    let message = options.choreography.end_card_message.clone();
    let visible = ms(options.choreography.end_card_visible_ms);

    vec![
        Beat::new("takaya turns away", move |ctx| {
            add_yaw(ctx.stage_mut(), takaya, PI - FRAC_PI_4);
            let eye = position_of(ctx.stage(), ken) + Vec3::new(-5.0, 2.0, 4.0);
            camera_shot(ctx, eye, Vec3::new(4.0, 1.95, -13.0), ms(3000));
        }),
        Beat::new("aragaki lies still", move |ctx| {
            let (stage, physics) = ctx.world_mut();
            let _ = CharacterMotor::default().detach_physics(stage, physics, aragaki);
            let x = position_of(stage, aragaki).x;
            let _ = stage.place_character(
                aragaki,
                Vec3::new(x, 0.5, 13.0),
                Vec3::new(-FRAC_PI_2, 0.0, 0.0),
            );
            let walk = CharacterMotor::default().walk(
                ctx.stage(),
                takaya,
                Vec3::new(0.0, 0.0, -8.0),
                ms(2500),
            );
            let _ = ctx.gate(walk);
        }),
        walk_beat(
            "takaya turns the corner",
            takaya,
            -FRAC_PI_2,
            Vec3::new(5.0, 0.0, 0.0),
            ms(2500),
        ),
        walk_beat(
            "takaya exits",
            takaya,
            FRAC_PI_2,
            Vec3::new(0.0, 0.0, -13.0),
            ms(2500),
        ),
        Beat::new("close on ken", move |ctx| {
            let at = position_of(ctx.stage(), ken);
            camera_shot(ctx, at + Vec3::new(-13.0, 3.0, 0.0), at, ms(4500));
        }),
        Beat::new("ken cries", move |ctx| {
            let lighting = &mut ctx.stage_mut().lighting;
            lighting.ambient_color = final_color;
            lighting.ambient_intensity = final_intensity;

            ctx.launch_all(CharacterMotor::default().cry_pose(ken));
            ctx.play(Cue::Scream);
            let dolly = CameraDirector::default().tracking_dolly(
                ctx.stage(),
                Vec3::new(-11.0, 0.0, 0.0),
                ken,
                ms(16_000),
            );
            let _ = ctx.gate(dolly);
        }),
        Beat::new("end card", move |ctx| {
            let fades = ctx.stage_mut().end_card.show(&message, visible);
            for fade in fades {
                let _ = ctx.gate(fade);
            }
        }),
    ]
}

/// Every beat of the narrative for `cast`, in order.
#[must_use]
pub fn narrative(cast: Cast, options: &Options) -> Vec<Beat> {
    let mut beats = first_act(cast);
    beats.extend(second_act(cast, options));
    beats.extend(third_act(cast, options));
    beats
}
