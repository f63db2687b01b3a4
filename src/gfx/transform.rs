//! Per-draw model matrix construction
//!
//! The composition order is fixed: scale first, then rotate about X, then Y,
//! then Z, then translate.
//!
//! `M = T(position) * Rz(z) * Ry(y) * Rx(x) * S(scale)`

use cgmath::{Deg, Matrix4, Vector3};

/// Scale, rotation (degrees about X, Y, Z) and position of one draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParams {
    pub scale: Vector3<f32>,
    pub rotation_degrees: Vector3<f32>,
    pub position: Vector3<f32>,
}

impl TransformParams {
    pub const fn new(
        scale: [f32; 3],
        rotation_degrees: [f32; 3],
        position: [f32; 3],
    ) -> Self {
        Self {
            scale: Vector3::new(scale[0], scale[1], scale[2]),
            rotation_degrees: Vector3::new(
                rotation_degrees[0],
                rotation_degrees[1],
                rotation_degrees[2],
            ),
            position: Vector3::new(position[0], position[1], position[2]),
        }
    }

    /// The model matrix for these parameters.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        build_model_matrix(self.scale, self.rotation_degrees, self.position)
    }
}

impl Default for TransformParams {
    fn default() -> Self {
        Self::new([1.0; 3], [0.0; 3], [0.0; 3])
    }
}

/// Builds a model matrix from scale, XYZ rotation in degrees and position.
pub fn build_model_matrix(
    scale: Vector3<f32>,
    rotation_degrees: Vector3<f32>,
    position: Vector3<f32>,
) -> Matrix4<f32> {
    let s = Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z);
    let rx = Matrix4::from_angle_x(Deg(rotation_degrees.x));
    let ry = Matrix4::from_angle_y(Deg(rotation_degrees.y));
    let rz = Matrix4::from_angle_z(Deg(rotation_degrees.z));
    let t = Matrix4::from_translation(position);

    t * rz * ry * rx * s
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, SquareMatrix, Vector4};

    fn apply(m: Matrix4<f32>, p: [f32; 3]) -> Vector3<f32> {
        (m * Vector4::new(p[0], p[1], p[2], 1.0)).truncate()
    }

    fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_identity_params() {
        let m = TransformParams::default().model_matrix();
        assert_eq!(m, Matrix4::identity());
    }

    #[test]
    fn test_scale_only() {
        let m = TransformParams::new([2.0, 1.0, 1.0], [0.0; 3], [0.0; 3]).model_matrix();
        assert_close(apply(m, [1.0, 0.0, 0.0]), Vector3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_scale_applies_before_translation() {
        let m = TransformParams::new([3.0, 3.0, 3.0], [0.0; 3], [1.0, 2.0, 3.0]).model_matrix();
        assert_close(apply(m, [1.0, 0.0, 0.0]), Vector3::new(4.0, 2.0, 3.0));
    }

    #[test]
    fn test_x_rotation_precedes_z_rotation() {
        // Rx(90) takes +Y to +Z, then Rz(90) leaves +Z alone.
        let m = TransformParams::new([1.0; 3], [90.0, 0.0, 90.0], [0.0; 3]).model_matrix();
        assert_close(apply(m, [0.0, 1.0, 0.0]), Vector3::new(0.0, 0.0, 1.0));

        // The opposite order would have sent +Y to -X first.
        let reversed = Matrix4::from_angle_x(Deg(90.0)) * Matrix4::from_angle_z(Deg(90.0));
        assert_close(apply(reversed, [0.0, 1.0, 0.0]), Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_wall_plane_stands_upright() {
        // The wall is an XZ plane rotated 90 degrees about X.
        let m = TransformParams::new([15.0, 3.0, 15.0], [90.0, 0.0, 0.0], [0.0, 4.0, -5.5])
            .model_matrix();
        assert_close(apply(m, [0.0, 0.0, -1.0]), Vector3::new(0.0, 19.0, -5.5));
        assert_close(apply(m, [1.0, 0.0, 0.0]), Vector3::new(15.0, 4.0, -5.5));
    }

    #[test]
    fn test_deterministic() {
        let params = TransformParams::new([0.5, 7.0, 0.25], [15.0, 0.0, 60.0], [-1.0, 4.0, -5.0]);
        assert_eq!(params.model_matrix(), params.model_matrix());
    }
}
