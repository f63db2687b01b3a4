//! Keyboard and mouse input gathered between frames.
//!
//! winit events are folded into an [`InputState`] as they arrive; the view
//! controller consumes it once per frame.

use std::collections::HashSet;

use winit::keyboard::KeyCode;

/// The fixed key set the application reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKey {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    Close,
    Orthographic,
    Perspective,
}

impl ControlKey {
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        Some(match code {
            KeyCode::KeyW => Self::Forward,
            KeyCode::KeyS => Self::Backward,
            KeyCode::KeyA => Self::Left,
            KeyCode::KeyD => Self::Right,
            KeyCode::KeyQ => Self::Up,
            KeyCode::KeyE => Self::Down,
            KeyCode::Escape => Self::Close,
            KeyCode::KeyO => Self::Orthographic,
            KeyCode::KeyP => Self::Perspective,
            _ => return None,
        })
    }
}

/// Tracks the current state of keyboard and mouse input.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down
    held: HashSet<ControlKey>,
    /// Keys that went down since the last frame
    just_pressed: HashSet<ControlKey>,
    /// Relative pointer motion in arrival order, in device units
    mouse_motion: Vec<(f64, f64)>,
    /// Set when pointer tracking must start over, e.g. after focus loss
    recalibrate: bool,
    /// Accumulated wheel travel in lines
    scroll: f32,
    close_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a press or release. Unmapped keys are ignored.
    pub fn on_key(&mut self, code: KeyCode, pressed: bool) {
        let Some(key) = ControlKey::from_key_code(code) else {
            return;
        };
        if pressed {
            if self.held.insert(key) {
                self.just_pressed.insert(key);
            }
            if key == ControlKey::Close {
                self.close_requested = true;
            }
        } else {
            self.held.remove(&key);
        }
    }

    /// Records raw pointer motion. `dy` grows downwards, as winit reports it.
    pub fn on_mouse_motion(&mut self, dx: f64, dy: f64) {
        self.mouse_motion.push((dx, dy));
    }

    /// Positive values scroll up (away from the user).
    pub fn on_scroll(&mut self, lines: f32) {
        self.scroll += lines;
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    pub fn is_held(&self, key: ControlKey) -> bool {
        self.held.contains(&key)
    }

    pub fn was_pressed(&self, key: ControlKey) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Pointer motion received since the last call.
    pub fn drain_mouse_motion(&mut self) -> Vec<(f64, f64)> {
        std::mem::take(&mut self.mouse_motion)
    }

    /// Whether tracking was interrupted since the last call.
    pub fn take_recalibrate(&mut self) -> bool {
        std::mem::take(&mut self.recalibrate)
    }

    /// Wheel travel since the last call.
    pub fn take_scroll(&mut self) -> f32 {
        std::mem::take(&mut self.scroll)
    }

    /// Forgets edge-triggered presses; held keys stay held.
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }

    /// Drops all held keys and pending motion, e.g. when the window loses
    /// focus. The next motion sample only recalibrates.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
        self.mouse_motion.clear();
        self.recalibrate = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(ControlKey::from_key_code(KeyCode::KeyW), Some(ControlKey::Forward));
        assert_eq!(ControlKey::from_key_code(KeyCode::KeyQ), Some(ControlKey::Up));
        assert_eq!(ControlKey::from_key_code(KeyCode::KeyO), Some(ControlKey::Orthographic));
        assert_eq!(ControlKey::from_key_code(KeyCode::KeyZ), None);
    }

    #[test]
    fn test_press_edges_and_holds() {
        let mut input = InputState::new();
        input.on_key(KeyCode::KeyW, true);
        assert!(input.is_held(ControlKey::Forward));
        assert!(input.was_pressed(ControlKey::Forward));

        input.end_frame();
        input.on_key(KeyCode::KeyW, true); // key repeat
        assert!(input.is_held(ControlKey::Forward));
        assert!(!input.was_pressed(ControlKey::Forward));

        input.on_key(KeyCode::KeyW, false);
        assert!(!input.is_held(ControlKey::Forward));
    }

    #[test]
    fn test_escape_requests_close() {
        let mut input = InputState::new();
        assert!(!input.close_requested());
        input.on_key(KeyCode::Escape, true);
        assert!(input.close_requested());
    }

    #[test]
    fn test_motion_and_scroll_are_consumed() {
        let mut input = InputState::new();
        input.on_mouse_motion(10.0, -2.0);
        input.on_mouse_motion(2.0, 3.0);
        input.on_scroll(1.0);
        input.on_scroll(2.0);

        assert_eq!(input.drain_mouse_motion(), vec![(10.0, -2.0), (2.0, 3.0)]);
        assert!(input.drain_mouse_motion().is_empty());
        assert_eq!(input.take_scroll(), 3.0);
        assert_eq!(input.take_scroll(), 0.0);
    }

    #[test]
    fn test_focus_loss_drops_motion_and_recalibrates() {
        let mut input = InputState::new();
        assert!(!input.take_recalibrate());

        input.on_key(KeyCode::KeyA, true);
        input.on_mouse_motion(40.0, 0.0);
        input.release_all();

        assert!(!input.is_held(ControlKey::Left));
        assert!(input.drain_mouse_motion().is_empty());
        assert!(input.take_recalibrate());
        assert!(!input.take_recalibrate());
    }
}
