//! Shared utilities: easing curves and wall-clock frame pacing.

pub mod easing;
pub mod frame_timing;
