//! Tween descriptors: what to interpolate, towards which goals, and how.
//!
//! A [`Tween`] is an unstarted description. Handing it to
//! [`TweenSet::start`](super::tween_set::TweenSet::start) captures the start
//! values from the [`Stage`] and returns a [`TweenId`] for completion
//! tracking.

use std::fmt;
use std::time::Duration;

use glam::Vec3;

use crate::character::{CharacterId, Joint};
use crate::scene::Stage;
use crate::util::easing::EasingFunction;

/// Handle of a started tween. Ids increase monotonically in start order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub(crate) u64);

impl TweenId {
    /// Raw id value.
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TweenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tween#{}", self.0)
    }
}

/// The stage value a tween writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenTarget {
    /// No payload. The tween only measures time.
    Timer,
    /// Camera eye position.
    CameraEye,
    /// Orbit focus point the camera looks at.
    CameraFocus,
    /// A character's world position.
    CharacterPosition(CharacterId),
    /// A character's XYZ Euler rotation.
    CharacterRotation(CharacterId),
    /// One rig joint's XYZ Euler rotation.
    Joint(CharacterId, Joint),
    /// Ambient light intensity (scalar, stored in [`Field::X`]).
    AmbientIntensity,
    /// End-card overlay opacity (scalar, stored in [`Field::X`]).
    EndCardOpacity,
}

/// One component of a vector-valued target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// X component (also the only component of scalar targets).
    X,
    /// Y component.
    Y,
    /// Z component.
    Z,
}

impl Field {
    /// All fields in declaration order.
    pub const ALL: [Field; 3] = [Field::X, Field::Y, Field::Z];

    /// Read this component from a vector.
    #[inline]
    #[must_use]
    pub fn get(self, v: Vec3) -> f32 {
        match self {
            Field::X => v.x,
            Field::Y => v.y,
            Field::Z => v.z,
        }
    }

    /// Write this component of a vector.
    #[inline]
    pub fn set(self, v: &mut Vec3, value: f32) {
        match self {
            Field::X => v.x = value,
            Field::Y => v.y = value,
            Field::Z => v.z = value,
        }
    }
}

/// Goal values for the fields a tween declares. Undeclared fields are left
/// untouched, so tweens on disjoint fields of one target can overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldGoals {
    /// Goal for the X component.
    pub x: Option<f32>,
    /// Goal for the Y component.
    pub y: Option<f32>,
    /// Goal for the Z component.
    pub z: Option<f32>,
}

impl FieldGoals {
    /// No goals (a pure timer).
    pub const NONE: FieldGoals = FieldGoals {
        x: None,
        y: None,
        z: None,
    };

    /// Goals for all three components.
    #[must_use]
    pub fn xyz(v: Vec3) -> Self {
        Self {
            x: Some(v.x),
            y: Some(v.y),
            z: Some(v.z),
        }
    }

    /// Goal for X only.
    #[must_use]
    pub fn x(value: f32) -> Self {
        Self::NONE.with(Field::X, value)
    }

    /// Goal for Y only.
    #[must_use]
    pub fn y(value: f32) -> Self {
        Self::NONE.with(Field::Y, value)
    }

    /// Goal for a scalar target.
    #[must_use]
    pub fn scalar(value: f32) -> Self {
        Self::x(value)
    }

    /// Add or replace the goal for one field.
    #[must_use]
    pub fn with(mut self, field: Field, value: f32) -> Self {
        match field {
            Field::X => self.x = Some(value),
            Field::Y => self.y = Some(value),
            Field::Z => self.z = Some(value),
        }
        self
    }

    /// Goal for one field, if declared.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<f32> {
        match field {
            Field::X => self.x,
            Field::Y => self.y,
            Field::Z => self.z,
        }
    }

    /// Declared `(field, goal)` pairs in X, Y, Z order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, f32)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|goal| (field, goal)))
    }

    /// True when no field is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none()
    }
}

/// Called after every frame's field writes.
pub type UpdateCallback = Box<dyn FnMut(&mut Stage)>;
/// Called once, after the final update.
pub type CompleteCallback = Box<dyn FnOnce(&mut Stage)>;

/// An unstarted tween.
pub struct Tween {
    pub(crate) target: TweenTarget,
    pub(crate) goals: FieldGoals,
    pub(crate) duration: Duration,
    pub(crate) delay: Duration,
    pub(crate) easing: EasingFunction,
    pub(crate) name: &'static str,
    pub(crate) on_update: Option<UpdateCallback>,
    pub(crate) on_complete: Option<CompleteCallback>,
}

impl Tween {
    /// Tween `goals` on `target` over `duration` with linear easing.
    #[must_use]
    pub fn new(
        target: TweenTarget,
        goals: FieldGoals,
        duration: Duration,
    ) -> Self {
        Self {
            target,
            goals,
            duration,
            delay: Duration::ZERO,
            easing: EasingFunction::DEFAULT,
            name: "tween",
            on_update: None,
            on_complete: None,
        }
    }

    /// A zero-payload tween that completes after `duration`.
    #[must_use]
    pub fn timer(duration: Duration) -> Self {
        Self::new(TweenTarget::Timer, FieldGoals::NONE, duration).named("wait")
    }

    /// Set the easing curve.
    #[must_use]
    pub fn easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// Delay the tween after start. Start values are captured when the delay
    /// has elapsed.
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Label used in logs.
    #[must_use]
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Per-frame callback, run after the interpolated fields are written.
    #[must_use]
    pub fn on_update(mut self, f: impl FnMut(&mut Stage) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Completion callback, run once after the final update.
    #[must_use]
    pub fn on_complete(mut self, f: impl FnOnce(&mut Stage) + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Target written by this tween.
    #[must_use]
    pub fn target(&self) -> TweenTarget {
        self.target
    }

    /// Declared field goals.
    #[must_use]
    pub fn goals(&self) -> &FieldGoals {
        &self.goals
    }

    /// Interpolation duration, excluding the delay.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Start delay.
    #[must_use]
    pub fn start_delay(&self) -> Duration {
        self.delay
    }

    /// Easing curve.
    #[must_use]
    pub fn easing_function(&self) -> EasingFunction {
        self.easing
    }

    /// Log label.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("goals", &self.goals)
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("easing", &self.easing)
            .finish_non_exhaustive()
    }
}
