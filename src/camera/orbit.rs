use glam::Vec3;

use super::core::Camera;
use crate::options::CameraOptions;

/// Camera plus the orbit focus it stays aimed at.
///
/// Tweens move `focus` and the eye independently; [`sync`](Self::sync)
/// re-aims the camera at the focus, the way an orbit control's update does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    /// The camera.
    pub camera: Camera,
    /// Orbit focus point.
    pub focus: Vec3,
}

impl CameraRig {
    /// Rig at the configured start eye and focus.
    #[must_use]
    pub fn new(options: &CameraOptions) -> Self {
        let eye = Vec3::from(options.start_eye);
        let focus = Vec3::from(options.start_focus);
        Self {
            camera: Camera::from_options(options, eye, focus),
            focus,
        }
    }

    /// Aim the camera at the focus point.
    pub fn sync(&mut self) {
        self.camera.target = self.focus;
    }

    /// Move the focus and re-aim in one step.
    pub fn look_at(&mut self, point: Vec3) {
        self.focus = point;
        self.sync();
    }

    /// Distance from eye to focus.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.camera.eye.distance(self.focus)
    }

    /// Update the aspect ratio after a viewport resize. Zero-height sizes
    /// (minimised windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.aspect = width as f32 / height as f32;
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(&CameraOptions::default())
    }
}
