//! Camera pose and view-mode transitions.

use crate::view::CameraPreset;
use glam::{Mat4, Vec3};

/// Closest the camera may zoom toward its target.
pub const MIN_DISTANCE: f32 = 5.0;
/// Farthest the camera may zoom away from its target.
pub const MAX_DISTANCE: f32 = 500.0;
/// Length of a view-mode camera transition, in real seconds.
pub const TRANSITION_SECONDS: f32 = 2.0;

// Keeps orbit() away from the poles where look_at degenerates.
const MAX_PITCH: f32 = 1.5;

/// Look-at camera for viewing the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// World-space eye position.
    pub position: Vec3,
    /// Point the camera looks at and orbits around.
    pub target: Vec3,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Camera placed at a preset pose.
    pub fn from_preset(preset: CameraPreset) -> Self {
        Self::new(preset.position, preset.target)
    }

    /// Distance from the target point.
    #[inline]
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Rotate the eye about the target by `yaw` and `pitch` radians.
    ///
    /// Distance to the target is preserved and pitch stays short of the poles.
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        let offset = self.position - self.target;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return;
        }

        let current_yaw = offset.x.atan2(offset.z);
        let current_pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        let yaw = current_yaw + yaw;
        let pitch = (current_pitch + pitch).clamp(-MAX_PITCH, MAX_PITCH);

        let x = distance * pitch.cos() * yaw.sin();
        let y = distance * pitch.sin();
        let z = distance * pitch.cos() * yaw.cos();
        self.position = self.target + Vec3::new(x, y, z);
    }

    /// Scale the distance to the target by `factor`, clamped to
    /// [`MIN_DISTANCE`]..[`MAX_DISTANCE`].
    pub fn zoom(&mut self, factor: f32) {
        let offset = self.position - self.target;
        let distance = offset.length();
        if distance <= f32::EPSILON || !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let new_distance = (distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.position = self.target + offset * (new_distance / distance);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_preset(crate::view::ViewMode::Solar.camera_preset())
    }
}

/// Ease-out cubic: fast start, gentle arrival. Input is clamped to 0..1.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// An in-flight interpolation between two camera poses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTransition {
    pub start_pos: Vec3,
    pub end_pos: Vec3,
    pub start_target: Vec3,
    pub end_target: Vec3,
    pub elapsed: f32,
    pub duration: f32,
}

impl CameraTransition {
    /// Normalized progress in 0..1.
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    fn pose(&self, t: f32) -> Camera {
        let eased = ease_out_cubic(t);
        Camera::new(
            self.start_pos.lerp(self.end_pos, eased),
            self.start_target.lerp(self.end_target, eased),
        )
    }
}

/// Owns the camera and at most one transition.
#[derive(Clone, Debug, Default)]
pub struct CameraController {
    camera: Camera,
    transition: Option<CameraTransition>,
}

impl CameraController {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            transition: None,
        }
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Direct access for user manipulation. Changes made mid-transition
    /// are overwritten by the next [`update`](Self::update).
    #[inline]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[inline]
    pub fn transition(&self) -> Option<&CameraTransition> {
        self.transition.as_ref()
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Start moving toward `preset` from wherever the camera is now.
    ///
    /// Replaces any transition already in flight.
    pub fn begin(&mut self, preset: CameraPreset) {
        self.transition = Some(CameraTransition {
            start_pos: self.camera.position,
            end_pos: preset.position,
            start_target: self.camera.target,
            end_target: preset.target,
            elapsed: 0.0,
            duration: TRANSITION_SECONDS,
        });
    }

    /// Advance the transition by real (unscaled) time.
    pub fn update(&mut self, real_delta: f32) {
        let Some(transition) = self.transition.as_mut() else {
            return;
        };

        transition.elapsed += real_delta.max(0.0);
        let t = transition.progress();

        if t >= 1.0 {
            self.camera = Camera::new(transition.end_pos, transition.end_target);
            self.transition = None;
            log::debug!("camera transition complete at {:?}", self.camera.position);
        } else {
            self.camera = transition.pose(t);
        }
    }
}
