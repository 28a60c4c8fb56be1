//! # Primitive Shape Generation
//!
//! All shapes are generated with outward normals and texture coordinates
//! laid out for wgpu (v = 0 is the top row of the image).

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a UV sphere centered at the origin
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `width_segments` - Number of longitude divisions (minimum 3)
/// * `height_segments` - Number of latitude divisions (minimum 2)
///
/// Longitude 0 starts on the -X axis and the texture seam runs along it,
/// so equirectangular planet maps wrap the usual way.
pub fn generate_sphere(radius: f32, width_segments: u32, height_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = width_segments.max(3);
    let lat_segs = height_segments.max(2);

    for lat in 0..=lat_segs {
        let v = lat as f32 / lat_segs as f32;
        let theta = v * PI; // 0 (north pole) to PI (south pole)
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let u = long as f32 / long_segs as f32;
            let phi = u * 2.0 * PI;

            let normal = [-phi.cos() * sin_theta, cos_theta, phi.sin() * sin_theta];
            data.vertices
                .push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
            data.normals.push(normal);
            data.tex_coords.push([u, v]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            // Degenerate triangles at the poles are skipped
            if lat != 0 {
                data.indices.extend_from_slice(&[first, second, first + 1]);
            }
            if lat != lat_segs - 1 {
                data.indices.extend_from_slice(&[second, second + 1, first + 1]);
            }
        }
    }

    data
}

/// Generate a flat ring (annulus) in the XY plane facing +Z
///
/// # Arguments
/// * `inner_radius` - Radius of the hole
/// * `outer_radius` - Outer edge radius
/// * `segments` - Number of angular divisions (minimum 3)
///
/// Texture coordinates are planar: the texture square is mapped onto the
/// ring's bounding square of side `2 * outer_radius`.
pub fn generate_ring(inner_radius: f32, outer_radius: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();
    let segs = segments.max(3);

    for radius in [inner_radius, outer_radius] {
        for i in 0..=segs {
            let angle = i as f32 / segs as f32 * 2.0 * PI;
            let x = radius * angle.cos();
            let y = radius * angle.sin();

            data.vertices.push([x, y, 0.0]);
            data.normals.push([0.0, 0.0, 1.0]);
            data.tex_coords.push([
                (x / outer_radius + 1.0) * 0.5,
                1.0 - (y / outer_radius + 1.0) * 0.5,
            ]);
        }
    }

    for i in 0..segs {
        let inner = i;
        let outer = i + segs + 1;
        data.indices
            .extend_from_slice(&[inner, outer, inner + 1, outer, outer + 1, inner + 1]);
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector3};

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(2.0, 8, 6);
        assert_eq!(sphere.vertex_count(), 9 * 7);
        assert_eq!(sphere.vertices.len(), sphere.normals.len());
        assert_eq!(sphere.vertices.len(), sphere.tex_coords.len());
        // Two triangles per quad, minus one per quad on each pole row
        assert_eq!(sphere.triangle_count(), 8 * 6 * 2 - 8 * 2);
    }

    #[test]
    fn test_sphere_vertices_lie_on_radius() {
        let sphere = generate_sphere(6.0, 30, 30);
        for vertex in &sphere.vertices {
            let length = (vertex[0].powi(2) + vertex[1].powi(2) + vertex[2].powi(2)).sqrt();
            assert!((length - 6.0).abs() < 1e-4);
        }
        let size = sphere.bounds().size();
        assert!((size.y - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_sphere_faces_point_outward() {
        let sphere = generate_sphere(1.0, 12, 8);
        for triangle in sphere.indices.chunks(3) {
            let [a, b, c] =
                [0usize, 1, 2].map(|k| Vector3::from(sphere.vertices[triangle[k] as usize]));
            let face_normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(face_normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_ring_generation() {
        let ring = generate_ring(10.0, 20.0, 32);
        assert_eq!(ring.vertex_count(), 2 * 33);
        assert_eq!(ring.triangle_count(), 64);
        for vertex in &ring.vertices {
            let r = (vertex[0].powi(2) + vertex[1].powi(2)).sqrt();
            assert!((r - 10.0).abs() < 1e-4 || (r - 20.0).abs() < 1e-4);
            assert_eq!(vertex[2], 0.0);
        }
        for uv in &ring.tex_coords {
            assert!((0.0..=1.0).contains(&uv[0]) && (0.0..=1.0).contains(&uv[1]));
        }
    }
}
