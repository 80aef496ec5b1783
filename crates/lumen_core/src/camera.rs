//! Fly-through camera with a yaw/pitch orientation.
//!
//! Yaw 0 / pitch 0 looks down -Z with +Y up. The basis vectors are cached and
//! recomputed on every orientation change, so the renderer can read them
//! without doing any trigonometry per pixel.

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};

/// Pitch is kept away from the poles so the basis never degenerates.
const MAX_PITCH_DEGREES: f32 = 89.0;

/// Camera for ray generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    /// Vertical field of view in radians
    fov_y: f32,

    // Cached basis (set by update_vectors)
    forward: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Camera {
    /// Create a camera at `position` looking toward `target`.
    pub fn new(position: Vec3, target: Vec3) -> Self {
        let mut camera = Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            fov_y: 45.0_f32.to_radians(),
            forward: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        };
        camera.look_at(target);
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Point one unit in front of the camera.
    pub fn target(&self) -> Vec3 {
        self.position + self.forward
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in radians.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Set the vertical field of view in degrees (clamped to 1..=179).
    /// Non-finite values are ignored.
    pub fn set_fov_degrees(&mut self, degrees: f32) {
        if !degrees.is_finite() {
            return;
        }
        self.fov_y = degrees.clamp(1.0, 179.0).to_radians();
    }

    /// Move the camera without changing where it looks.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Orient the camera toward `target`.
    ///
    /// Returns false and leaves the orientation unchanged when the target
    /// coincides with the camera position.
    pub fn look_at(&mut self, target: Vec3) -> bool {
        let offset = target - self.position;
        if !offset.is_finite() || offset.length_squared() < 1e-12 {
            return false;
        }
        let direction = offset.normalize();

        self.yaw = direction.x.atan2(-direction.z);
        self.pitch = direction.y.clamp(-1.0, 1.0).asin();
        self.update_vectors();
        true
    }

    /// Move relative to the current heading.
    ///
    /// Forward and right stay in the horizontal plane so looking up or down
    /// does not change altitude; up is always world +Y.
    pub fn move_relative(&mut self, forward: f32, right: f32, up: f32) {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let forward_vec = Vec3::new(sin_yaw, 0.0, -cos_yaw);
        let right_vec = Vec3::new(cos_yaw, 0.0, sin_yaw);

        self.position += forward_vec * forward + right_vec * right + Vec3::Y * up;
    }

    /// Rotate by yaw and pitch deltas in radians.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch += pitch_delta;
        self.update_vectors();
    }

    /// World-space direction through normalized device coordinates.
    ///
    /// `ndc_x` and `ndc_y` run from -1 to 1 (left to right, bottom to top);
    /// `aspect` is width / height.
    pub fn ray_direction(&self, ndc_x: f32, ndc_y: f32, aspect: f32) -> Vec3 {
        let tan_half_fov = (self.fov_y / 2.0).tan();
        let camera_x = ndc_x * tan_half_fov * aspect;
        let camera_y = ndc_y * tan_half_fov;

        (self.forward + self.right * camera_x + self.up * camera_y).normalize()
    }

    fn update_vectors(&mut self) {
        let limit = MAX_PITCH_DEGREES.to_radians();
        self.pitch = self.pitch.clamp(-limit, limit);

        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();

        self.forward = Vec3::new(sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch).normalize();
        // Right stays horizontal: no roll
        self.right = Vec3::new(cos_yaw, 0.0, sin_yaw);
        self.up = self.right.cross(self.forward).normalize();
    }

    /// Serializable position/target/fov snapshot.
    pub fn state(&self) -> CameraState {
        CameraState {
            position: self.position,
            target: self.target(),
            fov: self.fov_y.to_degrees(),
        }
    }

    /// Rebuild a camera from a snapshot.
    pub fn from_state(state: &CameraState) -> Self {
        let mut camera = Camera::new(state.position, state.target);
        camera.set_fov_degrees(state.fov);
        camera
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new(Vec3::new(0.0, 2.0, 5.0), Vec3::ZERO)
    }
}

/// Camera fields as stored in a scene document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees
    #[serde(default = "default_fov")]
    pub fov: f32,
}

fn default_fov() -> f32 {
    45.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn test_default_orientation() {
        let camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_close(camera.forward(), Vec3::NEG_Z);
        assert_close(camera.right(), Vec3::X);
        assert_close(camera.up(), Vec3::Y);
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let camera = Camera::new(Vec3::new(0.0, 2.0, 5.0), Vec3::ZERO);
        let (f, r, u) = (camera.forward(), camera.right(), camera.up());

        assert!((f.length() - 1.0).abs() < 1e-5);
        assert!((r.length() - 1.0).abs() < 1e-5);
        assert!((u.length() - 1.0).abs() < 1e-5);
        assert!(f.dot(r).abs() < 1e-5);
        assert!(f.dot(u).abs() < 1e-5);
        assert!(r.dot(u).abs() < 1e-5);
    }

    #[test]
    fn test_look_at_points_at_target() {
        let position = Vec3::new(0.0, 2.0, 5.0);
        let camera = Camera::new(position, Vec3::ZERO);
        assert_close(camera.forward(), (Vec3::ZERO - position).normalize());
        // Centre of the image looks straight ahead
        assert_close(camera.ray_direction(0.0, 0.0, 1.5), camera.forward());
    }

    #[test]
    fn test_look_at_self_is_ignored() {
        let mut camera = Camera::default();
        let before = camera;
        assert!(!camera.look_at(camera.position()));
        assert_eq!(camera, before);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z);
        camera.rotate(0.0, 10.0);
        assert!(camera.pitch() <= 89.0_f32.to_radians() + 1e-6);
        assert!(camera.forward().y < 1.0);
    }

    #[test]
    fn test_move_relative_stays_horizontal() {
        let mut camera = Camera::new(Vec3::ZERO, Vec3::new(0.0, -1.0, -1.0));
        camera.move_relative(1.0, 0.0, 0.0);
        assert_close(camera.position(), Vec3::NEG_Z);

        camera.move_relative(0.0, 2.0, 0.5);
        assert_close(camera.position(), Vec3::new(2.0, 0.5, -1.0));
    }

    #[test]
    fn test_set_position_keeps_orientation() {
        let mut camera = Camera::default();
        let forward = camera.forward();
        camera.set_position(Vec3::new(3.0, 1.0, 0.0));
        assert_close(camera.forward(), forward);
        assert_close(camera.target(), Vec3::new(3.0, 1.0, 0.0) + forward);
    }

    #[test]
    fn test_state_roundtrip() {
        let mut camera = Camera::new(Vec3::new(1.0, 3.0, -2.0), Vec3::new(0.0, 0.5, 0.0));
        camera.set_fov_degrees(60.0);

        let restored = Camera::from_state(&camera.state());
        assert_close(restored.position(), camera.position());
        assert_close(restored.forward(), camera.forward());
        assert!((restored.fov_y() - camera.fov_y()).abs() < 1e-5);
    }
}
