//! # Procedural Geometry Generation
//!
//! Generates the five primitive meshes a scene is composed from. Each
//! primitive is uploaded once and drawn any number of times with different
//! transforms.
//!
//! ## Supported Primitives
//!
//! - **Plane**: 2x2 square in the XZ plane, facing +Y
//! - **Box**: unit cube centred at the origin
//! - **Cylinder**: radius 1, standing on the XZ plane from y=0 to y=1, capped
//! - **Sphere**: UV sphere of radius 1
//! - **Torus**: ring of radius 1 around the Z axis
//!
//! ## Usage
//!
//! ```rust
//! use diorama::gfx::geometry::PrimitiveKind;
//!
//! let cylinder = PrimitiveKind::Cylinder.generate();
//! assert_eq!(cylinder.vertices.len(), cylinder.tex_coords.len());
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::vertex::Vertex3D;

/// Identity of a pre-generated primitive mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Plane,
    Box,
    Cylinder,
    Sphere,
    Torus,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 5] = [
        PrimitiveKind::Plane,
        PrimitiveKind::Box,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Sphere,
        PrimitiveKind::Torus,
    ];

    /// Generates this primitive at the resolution used by the renderer.
    pub fn generate(self) -> GeometryData {
        match self {
            PrimitiveKind::Plane => generate_plane(2.0, 2.0, 1, 1),
            PrimitiveKind::Box => generate_cube(),
            PrimitiveKind::Cylinder => generate_cylinder(1.0, 1.0, 48),
            PrimitiveKind::Sphere => generate_sphere(48, 24),
            PrimitiveKind::Torus => generate_torus(1.0, 0.2, 48, 24),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Plane => "plane",
            PrimitiveKind::Box => "box",
            PrimitiveKind::Cylinder => "cylinder",
            PrimitiveKind::Sphere => "sphere",
            PrimitiveKind::Torus => "torus",
        }
    }
}

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        self.normals.push(normal);
        self.tex_coords.push(uv);
        index
    }

    /// Interleaves positions, normals and UVs into GPU vertices.
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, &position)| Vertex3D {
                position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                tex_coords: self.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect()
    }
}
