//! Clip-space conversion between OpenGL conventions and wgpu.
//!
//! Projections are built with cgmath, which maps depth to [-1, 1]. wgpu
//! expects [0, 1], so the renderer premultiplies with
//! [`OPENGL_TO_WGPU_MATRIX`] before upload.

use cgmath::Matrix4;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Remaps an OpenGL-style projection to wgpu's depth range.
pub fn to_wgpu_projection(projection: [[f32; 4]; 4]) -> [[f32; 4]; 4] {
    (OPENGL_TO_WGPU_MATRIX * Matrix4::from(projection)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{perspective, Deg, Vector4};

    #[test]
    fn test_depth_range_remapped() {
        let gl = perspective(Deg(80.0), 1.25, 0.1, 100.0);
        let wgpu = Matrix4::from(to_wgpu_projection(gl.into()));

        let near = wgpu * Vector4::new(0.0, 0.0, -0.1, 1.0);
        let far = wgpu * Vector4::new(0.0, 0.0, -100.0, 1.0);
        assert!((near.z / near.w).abs() < 1e-4);
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }
}
