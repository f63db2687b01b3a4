// src/gfx/resources/mod.rs
//! Scene resources
//!
//! Tagged textures and materials, plus the wgpu texture objects behind them.

pub mod material;
pub mod texture_registry;
pub mod texture_resource;

// Re-export main types
pub use material::{Material, MaterialRegistry};
pub use texture_registry::{
    decode_image, DecodedImage, TextureEntry, TextureRegistry, TextureUploader, MAX_TEXTURE_SLOTS,
};
pub use texture_resource::TextureResource;
