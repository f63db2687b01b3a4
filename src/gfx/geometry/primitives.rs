//! # Primitive Shape Generation
//!
//! This module contains functions to generate common 3D primitive shapes.
//! All shapes are generated with outward normals and texture coordinates
//! in [0, 1] (before UV scaling).

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a unit cube centered at the origin
///
/// Returns a cube with vertices from -0.5 to 0.5 on all axes. Each face has
/// its own four vertices so normals stay flat and every face gets the full
/// texture.
pub fn generate_cube() -> GeometryData {
    let mut data = GeometryData::new();

    // (normal, u axis, v axis) per face; the face centre is at normal * 0.5
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];

    for (normal, u_axis, v_axis) in faces {
        let corner = |u: f32, v: f32| -> [f32; 3] {
            [
                normal[0] * 0.5 + u_axis[0] * (u - 0.5) + v_axis[0] * (v - 0.5),
                normal[1] * 0.5 + u_axis[1] * (u - 0.5) + v_axis[1] * (v - 0.5),
                normal[2] * 0.5 + u_axis[2] * (u - 0.5) + v_axis[2] * (v - 0.5),
            ]
        };

        let base = data.push_vertex(corner(0.0, 0.0), normal, [0.0, 0.0]);
        data.push_vertex(corner(1.0, 0.0), normal, [1.0, 0.0]);
        data.push_vertex(corner(1.0, 1.0), normal, [1.0, 1.0]);
        data.push_vertex(corner(0.0, 1.0), normal, [0.0, 1.0]);

        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
///
/// Returns a sphere of radius 1.0 centered at the origin, poles on the Y axis.
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let (sin_theta, cos_theta) = theta.sin_cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let (sin_phi, cos_phi) = phi.sin_cos();

            let point = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            let uv = [
                long as f32 / long_segs as f32,
                1.0 - lat as f32 / lat_segs as f32,
            ];
            // Unit sphere: the normal is the position
            data.push_vertex(point, point, uv);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, second, first + 1]);
            data.indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    data
}

/// Generate a plane in the XZ plane facing +Y
///
/// # Arguments
/// * `width` - Extent along X
/// * `depth` - Extent along Z
/// * `width_segments` - Number of subdivisions along width
/// * `depth_segments` - Number of subdivisions along depth
///
/// Returns a plane centered at the origin.
pub fn generate_plane(width: f32, depth: f32, width_segments: u32, depth_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let d_segs = depth_segments.max(1);

    for z in 0..=d_segs {
        let v = z as f32 / d_segs as f32;
        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            data.push_vertex(
                [(u - 0.5) * width, 0.0, (v - 0.5) * depth],
                [0.0, 1.0, 0.0],
                [u, 1.0 - v],
            );
        }
    }

    // Counter-clockwise when viewed from +Y
    for z in 0..d_segs {
        for x in 0..w_segs {
            let i = z * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.extend_from_slice(&[i, next_row, i + 1]);
            data.indices.extend_from_slice(&[i + 1, next_row, next_row + 1]);
        }
    }

    data
}

/// Generate a capped cylinder standing on the XZ plane
///
/// # Arguments
/// * `radius` - Radius of the cylinder
/// * `height` - Height along +Y; the base sits at y = 0
/// * `segments` - Number of circular segments
pub fn generate_cylinder(radius: f32, height: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);

    // Side: a seam column is duplicated so U can run 0..1
    for i in 0..=segs {
        let u = i as f32 / segs as f32;
        let (sin_a, cos_a) = (u * 2.0 * PI).sin_cos();
        let normal = [cos_a, 0.0, sin_a];

        data.push_vertex([radius * cos_a, 0.0, radius * sin_a], normal, [u, 0.0]);
        data.push_vertex([radius * cos_a, height, radius * sin_a], normal, [u, 1.0]);
    }

    for i in 0..segs {
        let bottom = i * 2;
        let top = bottom + 1;
        let next_bottom = bottom + 2;
        let next_top = bottom + 3;

        data.indices.extend_from_slice(&[bottom, top, next_bottom]);
        data.indices.extend_from_slice(&[top, next_top, next_bottom]);
    }

    // Caps get their own vertices so their normals face along Y
    for (y, normal_y) in [(0.0, -1.0), (height, 1.0)] {
        let normal = [0.0, normal_y, 0.0];
        let center = data.push_vertex([0.0, y, 0.0], normal, [0.5, 0.5]);

        for i in 0..=segs {
            let (sin_a, cos_a) = (i as f32 * 2.0 * PI / segs as f32).sin_cos();
            data.push_vertex(
                [radius * cos_a, y, radius * sin_a],
                normal,
                [0.5 + 0.5 * cos_a, 0.5 + 0.5 * sin_a],
            );
        }

        for i in 0..segs {
            let current = center + 1 + i;
            if normal_y > 0.0 {
                data.indices.extend_from_slice(&[center, current + 1, current]);
            } else {
                data.indices.extend_from_slice(&[center, current, current + 1]);
            }
        }
    }

    data
}

/// Generate a torus around the Z axis
///
/// # Arguments
/// * `major_radius` - Distance from the centre to the middle of the tube
/// * `minor_radius` - Radius of the tube
/// * `ring_segments` - Segments around the ring
/// * `tube_segments` - Segments around the tube
pub fn generate_torus(
    major_radius: f32,
    minor_radius: f32,
    ring_segments: u32,
    tube_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let ring_segs = ring_segments.max(3);
    let tube_segs = tube_segments.max(3);

    for ring in 0..=ring_segs {
        let u = ring as f32 / ring_segs as f32;
        let (sin_u, cos_u) = (u * 2.0 * PI).sin_cos();

        for tube in 0..=tube_segs {
            let v = tube as f32 / tube_segs as f32;
            let (sin_v, cos_v) = (v * 2.0 * PI).sin_cos();

            let distance = major_radius + minor_radius * cos_v;
            data.push_vertex(
                [distance * cos_u, distance * sin_u, minor_radius * sin_v],
                [cos_v * cos_u, cos_v * sin_u, sin_v],
                [u, v],
            );
        }
    }

    for ring in 0..ring_segs {
        for tube in 0..tube_segs {
            let a = ring * (tube_segs + 1) + tube;
            let b = a + tube_segs + 1;

            data.indices.extend_from_slice(&[a, b, a + 1]);
            data.indices.extend_from_slice(&[b, b + 1, a + 1]);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_consistent(data: &GeometryData) {
        assert_eq!(data.vertices.len(), data.normals.len());
        assert_eq!(data.vertices.len(), data.tex_coords.len());
        assert_eq!(data.indices.len() % 3, 0);
        let count = data.vertices.len() as u32;
        assert!(data.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn test_cube_generation() {
        let cube = generate_cube();
        assert_eq!(cube.vertex_count(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.triangle_count(), 12);
        assert_consistent(&cube);
        for v in &cube.vertices {
            assert!(v.iter().all(|c| c.abs() <= 0.5 + 1e-6));
        }
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(8, 6);
        assert_eq!(sphere.vertex_count(), 9 * 7);
        assert_consistent(&sphere);
        for v in &sphere.vertices {
            let r = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((r - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9); // 3x3 grid
        assert_eq!(plane.indices.len(), 24); // 4 quads * 2 triangles * 3 indices
        assert!(plane.vertices.iter().all(|v| v[1] == 0.0));
        assert!(plane.normals.iter().all(|n| *n == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_cylinder_stands_on_origin() {
        let cylinder = generate_cylinder(1.0, 1.0, 16);
        assert_consistent(&cylinder);
        let min_y = cylinder.vertices.iter().map(|v| v[1]).fold(f32::MAX, f32::min);
        let max_y = cylinder.vertices.iter().map(|v| v[1]).fold(f32::MIN, f32::max);
        assert_eq!(min_y, 0.0);
        assert_eq!(max_y, 1.0);
        // side + two caps
        assert_eq!(cylinder.triangle_count(), 16 * 2 + 16 * 2);
    }

    #[test]
    fn test_torus_generation() {
        let torus = generate_torus(1.0, 0.2, 12, 8);
        assert_consistent(&torus);
        assert_eq!(torus.triangle_count(), 12 * 8 * 2);
        for v in &torus.vertices {
            let ring = (v[0] * v[0] + v[1] * v[1]).sqrt();
            let tube = ((ring - 1.0).powi(2) + v[2] * v[2]).sqrt();
            assert!((tube - 0.2).abs() < 1e-4);
        }
    }
}
