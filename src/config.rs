//! Application configuration
//!
//! Defaults reproduce the desk scene exactly. The only runtime override is
//! the asset root, taken from `DIORAMA_ASSET_ROOT` when present.

use std::path::PathBuf;

/// Environment variable that relocates the `textures/` directory.
pub const ASSET_ROOT_ENV: &str = "DIORAMA_ASSET_ROOT";

#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Desk Scene".to_string(),
            width: 1000,
            height: 800,
        }
    }
}

/// Tunables for the fly camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// World units per second.
    pub movement_speed: f32,
    /// Degrees of yaw/pitch per pixel of cursor travel.
    pub mouse_sensitivity: f32,
    /// Initial vertical field of view in degrees.
    pub zoom: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            movement_speed: 20.0,
            mouse_sensitivity: 0.1,
            zoom: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    /// Directory that contains `textures/`.
    pub asset_root: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            asset_root: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Defaults, with the asset root taken from the environment if set.
    pub fn from_env() -> Self {
        Self::with_asset_root(std::env::var_os(ASSET_ROOT_ENV).map(PathBuf::from))
    }

    fn with_asset_root(root: Option<PathBuf>) -> Self {
        let mut config = Self::default();
        if let Some(root) = root.filter(|r| !r.as_os_str().is_empty()) {
            config.asset_root = root;
        }
        config
    }

    /// Aspect ratio of the configured window.
    pub fn aspect_ratio(&self) -> f32 {
        self.window.width as f32 / self.window.height.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_desk_scene() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1000);
        assert_eq!(config.window.height, 800);
        assert_eq!(config.camera.movement_speed, 20.0);
        assert_eq!(config.camera.zoom, 80.0);
        assert!((config.aspect_ratio() - 1.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_asset_root_override() {
        let config = AppConfig::with_asset_root(Some(PathBuf::from("/opt/desk")));
        assert_eq!(config.asset_root, PathBuf::from("/opt/desk"));

        let config = AppConfig::with_asset_root(Some(PathBuf::new()));
        assert_eq!(config.asset_root, PathBuf::from("."));

        let config = AppConfig::with_asset_root(None);
        assert_eq!(config.asset_root, PathBuf::from("."));
    }
}
