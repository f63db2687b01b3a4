//! Per-frame camera control and view/projection derivation
//!
//! The [`ViewController`] owns the fly camera. Each frame it consumes the
//! input gathered since the previous frame, moves the camera, derives the
//! view and projection matrices and pushes them (together with the viewer
//! position and the camera-mounted spot light) to the shading stage.

use cgmath::{ortho, perspective, Deg, Matrix4, Vector3};

use super::fly_camera::{CameraMovement, FlyCamera};
use crate::{
    config::AppConfig,
    gfx::{lights, shading::ShadingStage},
    input::{ControlKey, InputState},
};

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;
/// Half-width of the orthographic view volume along its longer axis.
pub const ORTHO_HALF_EXTENT: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Perspective,
    Orthographic,
}

/// A fixed vantage point applied when the projection mode is switched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPreset {
    pub position: Vector3<f32>,
    pub front: Vector3<f32>,
    /// Field of view to set, if the preset overrides it.
    pub zoom: Option<f32>,
}

impl CameraPreset {
    pub const STARTUP: Self = Self {
        position: Vector3::new(0.0, 5.0, 12.0),
        front: Vector3::new(0.0, -0.5, -2.0),
        zoom: None,
    };

    pub const PERSPECTIVE: Self = Self {
        position: Vector3::new(0.0, 5.5, 8.0),
        front: Vector3::new(0.0, -0.5, -2.0),
        zoom: Some(125.0),
    };

    pub const ORTHOGRAPHIC: Self = Self {
        position: Vector3::new(-5.0, 5.0, 10.0),
        front: Vector3::new(0.0, 0.0, -1.0),
        zoom: None,
    };

    fn apply(&self, camera: &mut FlyCamera) {
        camera.position = self.position;
        camera.look_along(self.front);
        if let Some(zoom) = self.zoom {
            camera.set_zoom(zoom);
        }
    }
}

/// Turns raw pointer motion into camera offsets. The first sample after
/// start-up or a reset is discarded, since platforms often report a large
/// warp delta when the pointer is first captured.
#[derive(Debug, Clone, Copy, Default)]
struct MouseTracker {
    calibrated: bool,
}

impl MouseTracker {
    /// Offset for one motion sample, with +y meaning "pointer moved up".
    fn offset(&mut self, dx: f64, dy: f64) -> Option<(f32, f32)> {
        if !std::mem::replace(&mut self.calibrated, true) {
            return None;
        }
        Some((dx as f32, -dy as f32))
    }

    fn reset(&mut self) {
        self.calibrated = false;
    }
}

pub struct ViewController {
    camera: FlyCamera,
    mode: ProjectionMode,
    viewport: (u32, u32),
    mouse: MouseTracker,
}

impl ViewController {
    pub fn new(config: &AppConfig) -> Self {
        let preset = CameraPreset::STARTUP;
        Self {
            camera: FlyCamera::new(preset.position, preset.front, &config.camera),
            mode: ProjectionMode::Perspective,
            viewport: (config.window.width, config.window.height),
            mouse: MouseTracker::default(),
        }
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    /// Follows window resizes. Zero-sized viewports (minimised) are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.viewport = (width, height);
        }
    }

    /// Switches projection and moves the camera to that mode's preset.
    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        if self.mode != mode {
            log::info!("projection switched to {:?}", mode);
        }
        self.mode = mode;
        match mode {
            ProjectionMode::Perspective => CameraPreset::PERSPECTIVE.apply(&mut self.camera),
            ProjectionMode::Orthographic => CameraPreset::ORTHOGRAPHIC.apply(&mut self.camera),
        }
    }

    /// Advances the camera by `elapsed` seconds of input and pushes the
    /// resulting view state to `stage`.
    pub fn update(
        &mut self,
        elapsed: f32,
        input: &mut InputState,
        stage: &mut dyn ShadingStage,
    ) -> (Matrix4<f32>, Matrix4<f32>) {
        if input.take_recalibrate() {
            self.mouse.reset();
        }
        for (x, y) in input.drain_mouse_motion() {
            if let Some((dx, dy)) = self.mouse.offset(x, y) {
                self.camera.process_mouse_movement(dx, dy);
            }
        }

        let scroll = input.take_scroll();
        if scroll != 0.0 {
            self.camera.process_mouse_scroll(scroll);
        }

        const MOVES: [(ControlKey, CameraMovement); 6] = [
            (ControlKey::Forward, CameraMovement::Forward),
            (ControlKey::Backward, CameraMovement::Backward),
            (ControlKey::Left, CameraMovement::Left),
            (ControlKey::Right, CameraMovement::Right),
            (ControlKey::Up, CameraMovement::Up),
            (ControlKey::Down, CameraMovement::Down),
        ];
        for (key, movement) in MOVES {
            if input.is_held(key) {
                self.camera.process_keyboard(movement, elapsed);
            }
        }

        if input.was_pressed(ControlKey::Orthographic) {
            self.set_projection_mode(ProjectionMode::Orthographic);
        }
        if input.was_pressed(ControlKey::Perspective) {
            self.set_projection_mode(ProjectionMode::Perspective);
        }

        let view = self.camera.view_matrix();
        let projection = self.projection_matrix();

        stage.set_mat4("view", view);
        stage.set_mat4("projection", projection);
        stage.set_vec3("viewPosition", self.camera.position);
        lights::follow_viewer(stage, self.camera.position, self.camera.front());

        (view, projection)
    }

    /// Projection for the current mode and viewport, in OpenGL clip
    /// conventions (depth in [-1, 1]).
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let (width, height) = (self.viewport.0 as f32, self.viewport.1 as f32);
        match self.mode {
            ProjectionMode::Perspective => perspective(
                Deg(self.camera.zoom()),
                width / height,
                NEAR_PLANE,
                FAR_PLANE,
            ),
            ProjectionMode::Orthographic => {
                let (half_w, half_h) = if width > height {
                    (ORTHO_HALF_EXTENT, ORTHO_HALF_EXTENT * height / width)
                } else if width < height {
                    (ORTHO_HALF_EXTENT * width / height, ORTHO_HALF_EXTENT)
                } else {
                    (ORTHO_HALF_EXTENT, ORTHO_HALF_EXTENT)
                };
                ortho(-half_w, half_w, -half_h, half_h, NEAR_PLANE, FAR_PLANE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::shading::ShadingState;
    use winit::keyboard::KeyCode;

    fn controller() -> ViewController {
        ViewController::new(&AppConfig::default())
    }

    #[test]
    fn test_idle_update_keeps_pose() {
        let mut controller = controller();
        let before = *controller.camera();
        let mut input = InputState::new();
        let mut stage = ShadingState::new();

        controller.update(0.0, &mut input, &mut stage);
        assert_eq!(*controller.camera(), before);
    }

    #[test]
    fn test_first_mouse_sample_only_calibrates() {
        let mut controller = controller();
        let before = *controller.camera();
        let mut input = InputState::new();
        let mut stage = ShadingState::new();

        input.on_mouse_motion(900.0, 10.0);
        controller.update(0.0, &mut input, &mut stage);
        assert_eq!(*controller.camera(), before);

        input.on_mouse_motion(10.0, 0.0);
        controller.update(0.0, &mut input, &mut stage);
        assert!((controller.camera().yaw() - (before.yaw() + 1.0)).abs() < 1e-4);
    }

    #[test]
    fn test_motion_accumulates_across_frames() {
        let mut controller = controller();
        let before = controller.camera().yaw();
        let mut input = InputState::new();
        let mut stage = ShadingState::new();

        input.on_mouse_motion(0.0, 0.0);
        for _ in 0..3 {
            input.on_mouse_motion(50.0, 0.0);
            controller.update(0.016, &mut input, &mut stage);
        }
        // Relative motion never runs into a window edge
        assert!((controller.camera().yaw() - (before + 15.0)).abs() < 1e-3);
    }

    #[test]
    fn test_focus_loss_recalibrates_tracking() {
        let mut controller = controller();
        let mut input = InputState::new();
        let mut stage = ShadingState::new();

        input.on_mouse_motion(0.0, 0.0);
        controller.update(0.0, &mut input, &mut stage);
        let before = *controller.camera();

        input.release_all();
        input.on_mouse_motion(400.0, -300.0);
        controller.update(0.0, &mut input, &mut stage);
        assert_eq!(*controller.camera(), before);

        input.on_mouse_motion(10.0, 0.0);
        controller.update(0.0, &mut input, &mut stage);
        assert!((controller.camera().yaw() - (before.yaw() + 1.0)).abs() < 1e-4);
    }

    #[test]
    fn test_pointer_up_pitches_up() {
        let mut controller = controller();
        let before = controller.camera().pitch();
        let mut input = InputState::new();
        let mut stage = ShadingState::new();

        input.on_mouse_motion(0.0, 0.0);
        input.on_mouse_motion(0.0, -50.0);
        controller.update(0.0, &mut input, &mut stage);
        assert!(controller.camera().pitch() > before);
    }

    #[test]
    fn test_toggle_round_trip_restores_perspective_preset() {
        let mut controller = controller();
        let mut input = InputState::new();
        let mut stage = ShadingState::new();

        input.on_key(KeyCode::KeyW, true);
        controller.update(0.25, &mut input, &mut stage);
        input.on_key(KeyCode::KeyW, false);
        input.end_frame();

        controller.set_projection_mode(ProjectionMode::Orthographic);
        assert_eq!(controller.camera().position, CameraPreset::ORTHOGRAPHIC.position);
        controller.set_projection_mode(ProjectionMode::Perspective);
        let first = *controller.camera();

        controller.set_projection_mode(ProjectionMode::Orthographic);
        controller.set_projection_mode(ProjectionMode::Perspective);
        assert_eq!(*controller.camera(), first);
        assert_eq!(first.position, CameraPreset::PERSPECTIVE.position);
        assert_eq!(first.zoom(), 125.0);
    }

    #[test]
    fn test_keys_switch_modes() {
        let mut controller = controller();
        let mut input = InputState::new();
        let mut stage = ShadingState::new();

        input.on_key(KeyCode::KeyO, true);
        controller.update(0.016, &mut input, &mut stage);
        assert_eq!(controller.mode(), ProjectionMode::Orthographic);
        input.on_key(KeyCode::KeyO, false);
        input.end_frame();

        input.on_key(KeyCode::KeyP, true);
        controller.update(0.016, &mut input, &mut stage);
        assert_eq!(controller.mode(), ProjectionMode::Perspective);
    }

    #[test]
    fn test_update_pushes_view_state() {
        let mut controller = controller();
        let mut input = InputState::new();
        let mut stage = ShadingState::new();

        let (view, projection) = controller.update(0.0, &mut input, &mut stage);
        let scene = stage.scene();
        let view: [[f32; 4]; 4] = view.into();
        let projection: [[f32; 4]; 4] = projection.into();
        assert_eq!(scene.view, view);
        assert_eq!(scene.projection, projection);
        assert_eq!(scene.view_position, [0.0, 5.0, 12.0]);
        assert_eq!(scene.spot_light.position, [0.0, 5.0, 12.0]);
        let front: [f32; 3] = controller.camera().front().into();
        assert_eq!(scene.spot_light.direction, front);
    }

    #[test]
    fn test_orthographic_extents_follow_aspect() {
        let mut controller = controller();
        controller.set_projection_mode(ProjectionMode::Orthographic);

        // 1000x800: x spans [-5, 5], y spans [-4, 4].
        let wide = controller.projection_matrix();
        assert!((wide.x.x - 1.0 / 5.0).abs() < 1e-6);
        assert!((wide.y.y - 1.0 / 4.0).abs() < 1e-6);

        controller.set_viewport(400, 800);
        let tall = controller.projection_matrix();
        assert!((tall.x.x - 1.0 / 2.5).abs() < 1e-6);
        assert!((tall.y.y - 1.0 / 5.0).abs() < 1e-6);

        controller.set_viewport(600, 600);
        let square = controller.projection_matrix();
        assert!((square.x.x - square.y.y).abs() < 1e-6);
    }

    #[test]
    fn test_zero_viewport_ignored() {
        let mut controller = controller();
        let before = controller.projection_matrix();
        controller.set_viewport(0, 0);
        assert_eq!(controller.projection_matrix(), before);
    }
}
