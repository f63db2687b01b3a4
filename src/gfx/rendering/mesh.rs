//! GPU meshes for the primitive set

use wgpu::util::DeviceExt;

use crate::gfx::geometry::{GeometryData, PrimitiveKind};

/// Vertex and index buffers of one uploaded primitive.
pub struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl Mesh {
    pub fn from_geometry(device: &wgpu::Device, geometry: &GeometryData, label: &str) -> Self {
        let vertices = geometry.to_vertices();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", label)),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices.len() as u32,
        }
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

/// One mesh per [`PrimitiveKind`], uploaded once at startup.
pub struct PrimitiveMeshes {
    meshes: Vec<(PrimitiveKind, Mesh)>,
}

impl PrimitiveMeshes {
    pub fn new(device: &wgpu::Device) -> Self {
        let meshes = PrimitiveKind::ALL
            .iter()
            .map(|&kind| {
                let geometry = kind.generate();
                log::debug!(
                    "uploading {} mesh: {} vertices, {} triangles",
                    kind.name(),
                    geometry.vertex_count(),
                    geometry.triangle_count()
                );
                (kind, Mesh::from_geometry(device, &geometry, kind.name()))
            })
            .collect();
        Self { meshes }
    }

    pub fn get(&self, kind: PrimitiveKind) -> Option<&Mesh> {
        self.meshes
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, mesh)| mesh)
    }
}

pub trait DrawMesh<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
}

impl<'a, 'b> DrawMesh<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}
