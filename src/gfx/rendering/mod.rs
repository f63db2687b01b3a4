// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Handles the scene pipeline, GPU meshes and textures, and frame rendering.

pub mod draw_queue;
pub mod mesh;
pub mod pipeline_manager;
pub mod render_engine;
pub mod texture_slots;

// Re-export main types
pub use draw_queue::{DrawCommand, DrawQueue};
pub use mesh::{DrawMesh, Mesh, PrimitiveMeshes};
pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::RenderEngine;
pub use texture_slots::TextureSlots;
