//! Tween primitive: descriptors, per-tween timing and the live tween set.
//!
//! # Overview
//!
//! - [`Tween`] - an unstarted interpolation of declared fields on a
//!   [`TweenTarget`]
//! - [`TweenRunner`] - clock bookkeeping (delay, progress, easing)
//! - [`TweenSet`] - owns started tweens, advances them once per frame and
//!   reports completions

pub mod runner;
pub mod tween;
pub mod tween_set;

pub use runner::{TweenRunner, TweenState};
pub use tween::{Field, FieldGoals, Tween, TweenId, TweenTarget};
pub use tween_set::{FieldRange, TweenSet};
