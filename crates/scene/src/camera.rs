//! Free-fly camera driven by decoded keyboard and mouse input.
//!
//! Orientation is yaw/pitch only. The `forward`/`right`/`up` basis is derived
//! from those two angles every time they change and is never edited on its
//! own, which keeps it orthonormal.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Vec2, Vec3};

use crate::error::UniformError;
use crate::uniforms::{names, UniformSink};

/// Margin kept between pitch and the poles.
pub const PITCH_EPSILON: f32 = 0.01;

/// Largest magnitude pitch may reach.
pub const PITCH_LIMIT: f32 = FRAC_PI_2 - PITCH_EPSILON;

/// Logical movement keys held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Everything the window layer decodes for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    pub keys: MovementKeys,
    /// Mouse movement since the previous sample, in pixels
    pub mouse_delta: Vec2,
    /// Whether the viewport currently owns keyboard and mouse
    pub captured: bool,
}

/// Simple first person camera used by the ray marcher
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position
    pub position: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Units per second
    pub speed: f32,
    /// Radians per pixel of mouse movement
    pub sensitivity: f32,
    yaw: f32,
    pitch: f32,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        // Yaw of pi looks down -Z toward the origin from +Z.
        Self::new(Vec3::new(0.0, 0.0, 20.0), PI, 0.0)
    }
}

impl Camera {
    /// Create a camera at `position` looking along `yaw`/`pitch`.
    #[must_use]
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            fov: 60.0,
            speed: 20.0,
            sensitivity: 0.0005,
            yaw,
            pitch: 0.0,
            forward: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        };
        camera.set_orientation(yaw, pitch);
        camera
    }

    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.right
    }

    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Sets yaw and pitch, clamping pitch away from the poles.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    fn update_vectors(&mut self) {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.forward = Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw);
        self.right = self.forward.cross(Vec3::Y).normalize();
        self.up = self.right.cross(self.forward).normalize();
    }

    /// Applies one frame of look and movement input.
    ///
    /// Does nothing unless `input_enabled`. Mouse motion turns the camera
    /// first; movement then follows the updated basis. Diagonal movement is
    /// normalized so it is no faster than a single key.
    pub fn update_from_input(&mut self, keys: MovementKeys, mouse_delta: Vec2, dt: f32, input_enabled: bool) {
        if !input_enabled {
            return;
        }

        self.set_orientation(
            self.yaw - mouse_delta.x * self.sensitivity,
            self.pitch - mouse_delta.y * self.sensitivity,
        );

        let mut direction = Vec3::ZERO;
        if keys.forward {
            direction += self.forward;
        }
        if keys.back {
            direction -= self.forward;
        }
        if keys.right {
            direction += self.right;
        }
        if keys.left {
            direction -= self.right;
        }
        if keys.up {
            direction += Vec3::Y;
        }
        if keys.down {
            direction -= Vec3::Y;
        }

        if direction.length_squared() > 0.0 {
            self.position += direction.normalize() * self.speed * dt;
        }
    }

    /// Convenience wrapper over [`Camera::update_from_input`].
    pub fn apply_input(&mut self, input: &InputFrame, dt: f32) {
        self.update_from_input(input.keys, input.mouse_delta, dt, input.captured);
    }

    /// Pushes the five values the shader builds primary rays from.
    ///
    /// # Errors
    ///
    /// Propagates the first error the sink reports.
    pub fn upload<S>(&self, sink: &mut S) -> Result<(), UniformError>
    where
        S: UniformSink + ?Sized,
    {
        sink.set_vec3(names::CAM_POS, self.position)?;
        sink.set_vec3(names::CAM_FORWARD, self.forward)?;
        sink.set_vec3(names::CAM_RIGHT, self.right)?;
        sink.set_vec3(names::CAM_UP, self.up)?;
        sink.set_float(names::FOV, self.fov)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn default_looks_down_negative_z() {
        let camera = Camera::default();
        assert!((camera.forward() - Vec3::NEG_Z).length() < EPS);
        assert!((camera.up() - Vec3::Y).length() < EPS);
    }

    #[test]
    fn disabled_input_is_ignored() {
        let mut camera = Camera::default();
        let before = camera.clone();
        let keys = MovementKeys { forward: true, ..Default::default() };
        camera.update_from_input(keys, Vec2::new(500.0, 500.0), 1.0, false);
        assert_eq!(camera, before);
    }

    #[test]
    fn diagonal_move_is_normalized() {
        let mut camera = Camera::default();
        let keys = MovementKeys { forward: true, right: true, ..Default::default() };
        camera.update_from_input(keys, Vec2::ZERO, 0.5, true);
        let moved = (camera.position - Vec3::new(0.0, 0.0, 20.0)).length();
        assert!((moved - camera.speed * 0.5).abs() < 1e-4, "moved {moved}");
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut camera = Camera::default();
        let keys = MovementKeys { up: true, down: true, ..Default::default() };
        camera.update_from_input(keys, Vec2::ZERO, 1.0, true);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 20.0));
    }

    #[test]
    fn vertical_keys_use_world_up() {
        let mut camera = Camera::default();
        camera.set_orientation(0.3, 1.2);
        let start = camera.position;
        camera.update_from_input(MovementKeys { up: true, ..Default::default() }, Vec2::ZERO, 0.1, true);
        let delta = camera.position - start;
        assert!((delta - Vec3::new(0.0, camera.speed * 0.1, 0.0)).length() < 1e-4);
    }
}
