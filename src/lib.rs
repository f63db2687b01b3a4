//! Diorama 3D Desk Scene
//!
//! A small Phong-lit desk scene rendered with wgpu and winit, viewed
//! through a first-person fly camera.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod input;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::DioramaApp;
pub use config::AppConfig;

/// Creates the desk scene application from environment configuration
pub fn default() -> Result<DioramaApp, error::InitError> {
    DioramaApp::new(AppConfig::from_env())
}
