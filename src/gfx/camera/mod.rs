//! Camera system
//!
//! A first-person [`FlyCamera`] driven by a [`ViewController`], which
//! turns per-frame input into view and projection matrices.

pub mod camera_utils;
pub mod fly_camera;
pub mod view_controller;

// Re-export main types
pub use fly_camera::{CameraMovement, FlyCamera};
pub use view_controller::{CameraPreset, ProjectionMode, ViewController};
