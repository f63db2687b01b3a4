//! # Scene Composition
//!
//! A scene is static data: which textures to load, which materials to
//! define, the lights, and an ordered list of [`DrawDescriptor`]s. The
//! [`SceneManager`] loads the resources once and then replays the object
//! list every frame against a shading stage and a mesh drawer.
//!
//! ## Usage
//!
//! ```no_run
//! use diorama::gfx::scene::{desk, SceneManager};
//!
//! let scene: SceneManager<()> = SceneManager::new(desk::desk_scene());
//! assert_eq!(scene.objects().len(), 25);
//! ```

pub mod desk;
pub mod object;
#[allow(clippy::module_inception)]
pub mod scene;

pub use object::DrawDescriptor;
pub use scene::SceneManager;

use crate::gfx::{lights::LightSet, resources::Material};

/// Static description of a scene.
#[derive(Debug, Clone)]
pub struct SceneContent {
    /// Texture tag and path relative to the asset root, in slot order.
    pub textures: &'static [(&'static str, &'static str)],
    pub materials: Vec<(&'static str, Material)>,
    pub lights: LightSet,
    /// Drawn in this order every frame.
    pub objects: &'static [DrawDescriptor],
}
