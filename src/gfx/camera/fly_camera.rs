//! First-person fly camera
//!
//! Orientation is stored as yaw/pitch in degrees; `front`, `right` and `up`
//! are derived from them and `front` is always unit length.

use cgmath::{EuclideanSpace, InnerSpace, Matrix4, Point3, Vector3};

use crate::config::CameraConfig;

/// Yaw that looks down -Z.
pub const DEFAULT_YAW: f32 = -90.0;
/// Pitch never reaches straight up or down, which would flip the view.
pub const MAX_PITCH: f32 = 89.0;
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 130.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyCamera {
    pub position: Vector3<f32>,
    front: Vector3<f32>,
    up: Vector3<f32>,
    right: Vector3<f32>,
    world_up: Vector3<f32>,
    /// Degrees
    yaw: f32,
    /// Degrees, within [-MAX_PITCH, MAX_PITCH]
    pitch: f32,
    /// Vertical field of view in degrees
    zoom: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
}

impl FlyCamera {
    pub fn new(position: Vector3<f32>, front: Vector3<f32>, config: &CameraConfig) -> Self {
        let mut camera = Self {
            position,
            front: Vector3::new(0.0, 0.0, -1.0),
            up: Vector3::unit_y(),
            right: Vector3::unit_x(),
            world_up: Vector3::unit_y(),
            yaw: DEFAULT_YAW,
            pitch: 0.0,
            zoom: config.zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            movement_speed: config.movement_speed,
            mouse_sensitivity: config.mouse_sensitivity,
        };
        camera.look_along(front);
        camera
    }

    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Points the camera along `direction`, re-deriving yaw and pitch so
    /// that later mouse motion continues from here. A zero vector is ignored.
    pub fn look_along(&mut self, direction: Vector3<f32>) {
        if direction.magnitude2() <= f32::EPSILON {
            return;
        }
        let d = direction.normalize();
        self.yaw = d.z.atan2(d.x).to_degrees();
        self.pitch = d.y.clamp(-1.0, 1.0).asin().to_degrees();
        self.update_vectors();
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.position);
        Matrix4::look_at_rh(eye, eye + self.front, self.up)
    }

    /// Moves along the camera basis, `movement_speed * elapsed` units.
    pub fn process_keyboard(&mut self, direction: CameraMovement, elapsed: f32) {
        let velocity = self.movement_speed * elapsed;
        let offset = match direction {
            CameraMovement::Forward => self.front,
            CameraMovement::Backward => -self.front,
            CameraMovement::Left => -self.right,
            CameraMovement::Right => self.right,
            CameraMovement::Up => self.up,
            CameraMovement::Down => -self.up,
        };
        self.position += offset * velocity;
    }

    /// Turns by a cursor offset in pixels. Positive `y_offset` looks up.
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;
        self.update_vectors();
    }

    /// Narrows the field of view for positive wheel travel.
    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.set_zoom(self.zoom - y_offset);
    }

    fn update_vectors(&mut self) {
        self.pitch = self.pitch.clamp(-MAX_PITCH, MAX_PITCH);
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vector3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> FlyCamera {
        FlyCamera::new(
            Vector3::new(0.0, 5.0, 12.0),
            Vector3::new(0.0, -0.5, -2.0),
            &CameraConfig::default(),
        )
    }

    #[test]
    fn test_front_is_normalized_direction() {
        let camera = camera();
        let expected = Vector3::new(0.0, -0.5, -2.0).normalize();
        assert!((camera.front() - expected).magnitude() < 1e-5);
        assert!((camera.front().magnitude() - 1.0).abs() < 1e-5);
        assert!((camera.yaw() - DEFAULT_YAW).abs() < 1e-3);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut camera = camera();
        camera.process_mouse_movement(0.0, 100_000.0);
        assert_eq!(camera.pitch(), MAX_PITCH);
        assert!(camera.front().y <= MAX_PITCH.to_radians().sin() + 1e-6);

        camera.process_mouse_movement(0.0, -100_000.0);
        assert_eq!(camera.pitch(), -MAX_PITCH);
        assert!((camera.front().magnitude() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut camera = camera();
        camera.process_mouse_scroll(500.0);
        assert_eq!(camera.zoom(), MIN_ZOOM);
        camera.process_mouse_scroll(-500.0);
        assert_eq!(camera.zoom(), MAX_ZOOM);
    }

    #[test]
    fn test_movement_scales_with_time() {
        let mut camera = camera();
        let start = camera.position;
        camera.process_keyboard(CameraMovement::Forward, 0.5);
        let travelled = (camera.position - start).magnitude();
        assert!((travelled - camera.movement_speed * 0.5).abs() < 1e-4);

        camera.process_keyboard(CameraMovement::Backward, 0.5);
        assert!((camera.position - start).magnitude() < 1e-4);
    }

    #[test]
    fn test_zero_direction_ignored() {
        let mut camera = camera();
        let before = camera;
        camera.look_along(Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(camera, before);
    }
}
