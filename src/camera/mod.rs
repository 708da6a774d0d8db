//! Camera: projection, orbit rig and the director that animates them.

/// Core camera struct and projection matrices.
pub mod core;
/// Tween builders for camera moves.
pub mod director;
/// Camera plus orbit focus.
pub mod orbit;

pub use self::core::Camera;
pub use director::{CameraDirector, CameraMove};
pub use orbit::CameraRig;
