//! # Graphics Module
//!
//! Everything between the scene description and the GPU.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Fly camera and per-frame view control
//! - **Geometry** ([`geometry`]) - Procedural primitive meshes
//! - **Shading** ([`shading`], [`lights`], [`transform`]) - Named uniform
//!   pushes and the CPU mirror of the shader's uniform blocks
//! - **Resources** ([`resources`]) - Tagged textures and materials
//! - **Scene Management** ([`scene`]) - The desk scene and its per-frame replay
//! - **Rendering Pipeline** ([`rendering`]) - wgpu backend for all of the above
//!
//! ## Usage
//!
//! ```no_run
//! use diorama::gfx::{scene::{desk, SceneManager}, RenderEngine, TextureResource};
//!
//! // The render engine is created by DioramaApp once a window exists
//! // let engine = RenderEngine::new(window, width, height).await?;
//! let scene: SceneManager<TextureResource> = SceneManager::new(desk::desk_scene());
//! ```

pub mod camera;
pub mod geometry;
pub mod lights;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod shading;
pub mod transform;
pub mod vertex;

// Re-export commonly used types
pub use camera::{FlyCamera, ViewController};
pub use rendering::render_engine::RenderEngine;
pub use resources::TextureResource;
pub use shading::{MeshDrawer, ShadingStage};
