//! # Object Picking System
//!
//! This module provides 3D object picking using pointer ray-casting.
//!
//! ## How it works
//!
//! 1. **Pointer to Ray**: Convert pixel coordinates to a 3D ray in world space
//! 2. **Ray-Object Intersection**: Test the ray against object bounding spheres
//! 3. **Selection**: Return the closest intersected object
//!
//! ## Usage
//!
//! ```no_run
//! use orrery::gfx::picking::{screen_to_ray, BoundingSphere, ObjectPicker};
//! # let camera = orrery::gfx::camera::OrbitCamera::new(10.0, 0.0, 0.0, cgmath::Vector3::new(0.0, 0.0, 0.0), 1.0);
//! # let candidates: Vec<(usize, BoundingSphere)> = Vec::new();
//!
//! let ray = screen_to_ray((400.0, 300.0), (800.0, 600.0), &camera);
//! if let Some(hit) = ObjectPicker::new().pick(&ray, candidates) {
//!     println!("Hovered object: {}", hit.object_index);
//! }
//! ```

use crate::gfx::camera::orbit_camera::OrbitCamera;
use cgmath::{InnerSpace, Vector3, Vector4, Zero};

/// A 3D ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point in world space
    pub origin: Vector3<f32>,
    /// Ray direction (normalized)
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box for intersection testing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vector3<f32>,
    /// Maximum corner of the bounding box
    pub max: Vector3<f32>,
}

impl AABB {
    /// Create a new AABB
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Cube of half-extent `radius` around `center`
    pub fn around(center: Vector3<f32>, radius: f32) -> Self {
        let extent = Vector3::new(radius, radius, radius);
        Self::new(center - extent, center + extent)
    }

    /// Create AABB from a set of vertices
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        if vertices.is_empty() {
            return Self::new(Vector3::zero(), Vector3::zero());
        }

        let mut min = Vector3::new(vertices[0][0], vertices[0][1], vertices[0][2]);
        let mut max = min;

        for vertex in vertices.iter().skip(1) {
            min.x = min.x.min(vertex[0]);
            min.y = min.y.min(vertex[1]);
            min.z = min.z.min(vertex[2]);
            max.x = max.x.max(vertex[0]);
            max.y = max.y.max(vertex[1]);
            max.z = max.z.max(vertex[2]);
        }

        Self::new(min, max)
    }

    /// Extent along each axis
    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Length of the box diagonal
    pub fn diagonal(&self) -> f32 {
        self.size().magnitude()
    }

    pub fn center(&self) -> Vector3<f32> {
        (self.min + self.max) * 0.5
    }
}

/// World-space bounding sphere, exact for the sphere meshes in the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vector3<f32>,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vector3<f32>, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Distance along the ray to the first intersection in front of the origin
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let to_center = self.center - ray.origin;
        let projection = to_center.dot(ray.direction);
        let closest_sq = to_center.magnitude2() - projection * projection;
        let radius_sq = self.radius * self.radius;
        if closest_sq > radius_sq {
            return None;
        }

        let half_chord = (radius_sq - closest_sq).sqrt();
        let t_near = projection - half_chord;
        let t_far = projection + half_chord;
        if t_far < 0.0 {
            None
        } else if t_near >= 0.0 {
            Some(t_near)
        } else {
            Some(t_far)
        }
    }
}

/// Result of an object picking operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickResult {
    /// Index of the picked candidate
    pub object_index: usize,
    /// Distance from camera to intersection point
    pub distance: f32,
    /// World space intersection point
    pub intersection_point: Vector3<f32>,
}

/// Convert screen coordinates to normalized device coordinates (-1 to 1, Y up)
pub fn screen_to_ndc(screen_pos: (f32, f32), screen_size: (f32, f32)) -> (f32, f32) {
    let (mouse_x, mouse_y) = screen_pos;
    let (screen_width, screen_height) = screen_size;

    let ndc_x = (2.0 * mouse_x) / screen_width - 1.0;
    let ndc_y = 1.0 - (2.0 * mouse_y) / screen_height; // Flip Y axis
    (ndc_x, ndc_y)
}

/// Convert screen coordinates to a world-space ray starting at the camera eye
///
/// The direction comes from the camera basis and lens rather than an inverted
/// view-projection, which loses precision with a small near plane.
pub fn screen_to_ray(
    screen_pos: (f32, f32),
    screen_size: (f32, f32),
    camera: &OrbitCamera,
) -> Ray {
    let (ndc_x, ndc_y) = screen_to_ndc(screen_pos, screen_size);

    let forward = (camera.target - camera.eye).normalize();
    let right = forward.cross(camera.up).normalize();
    let up = right.cross(forward);

    let half_height = (camera.fovy.0 * 0.5).tan();
    let half_width = half_height * camera.aspect;

    Ray::new(
        camera.eye,
        forward + right * (ndc_x * half_width) + up * (ndc_y * half_height),
    )
}

/// Project a world-space point to screen pixels. None when the point is behind the camera.
pub fn world_to_screen(
    point: Vector3<f32>,
    screen_size: (f32, f32),
    camera: &OrbitCamera,
) -> Option<(f32, f32)> {
    let clip =
        camera.projection_matrix() * camera.view_matrix() * Vector4::new(point.x, point.y, point.z, 1.0);
    if clip.w <= 0.0 {
        return None;
    }

    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;
    let (screen_width, screen_height) = screen_size;
    Some((
        (ndc_x + 1.0) * 0.5 * screen_width,
        (1.0 - ndc_y) * 0.5 * screen_height,
    ))
}

/// Closest-hit picker over a set of bounding spheres
#[derive(Debug, Default)]
pub struct ObjectPicker;

impl ObjectPicker {
    /// Create a new object picker
    pub fn new() -> Self {
        Self
    }

    /// Returns the closest candidate hit by the ray.
    ///
    /// Candidates are `(index, bounds)` pairs. On an exact distance tie the
    /// earlier candidate wins.
    pub fn pick(
        &self,
        ray: &Ray,
        candidates: impl IntoIterator<Item = (usize, BoundingSphere)>,
    ) -> Option<PickResult> {
        let mut closest_result: Option<PickResult> = None;

        for (index, bounds) in candidates {
            if let Some(distance) = bounds.intersect_ray(ray) {
                if closest_result
                    .as_ref()
                    .map_or(true, |result| distance < result.distance)
                {
                    closest_result = Some(PickResult {
                        object_index: index,
                        distance,
                        intersection_point: ray.point_at(distance),
                    });
                }
            }
        }

        closest_result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_creation() {
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -1.0, -1.0]];
        let aabb = AABB::from_vertices(&vertices);

        assert_eq!(aabb.min, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, Vector3::new(1.0, 1.0, 1.0));
        assert!((aabb.diagonal() - 2.0 * 3f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_cube_around_center() {
        let aabb = AABB::around(Vector3::new(1.0, 2.0, 3.0), 0.5);

        assert_eq!(aabb.min, Vector3::new(0.5, 1.5, 2.5));
        assert_eq!(aabb.max, Vector3::new(1.5, 2.5, 3.5));
        assert_eq!(aabb.center(), Vector3::new(1.0, 2.0, 3.0));
        assert!((aabb.diagonal() - 3f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_ray_sphere_intersection() {
        let sphere = BoundingSphere::new(Vector3::new(0.0, 0.0, 0.0), 2.0);
        let ray = Ray::new(Vector3::new(0.0, 0.0, -10.0), Vector3::new(0.0, 0.0, 1.0));
        let distance = sphere.intersect_ray(&ray).unwrap();
        assert!((distance - 8.0).abs() < 1e-5);

        let behind = Ray::new(Vector3::new(0.0, 0.0, 10.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(sphere.intersect_ray(&behind).is_none());

        let grazing_miss = Ray::new(Vector3::new(2.1, 0.0, -10.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(sphere.intersect_ray(&grazing_miss).is_none());
    }

    #[test]
    fn test_picker_keeps_closest() {
        let ray = Ray::new(Vector3::new(0.0, 0.0, -10.0), Vector3::new(0.0, 0.0, 1.0));
        let candidates = vec![
            (0, BoundingSphere::new(Vector3::new(0.0, 0.0, 5.0), 1.0)),
            (1, BoundingSphere::new(Vector3::new(0.0, 0.0, 0.0), 1.0)),
            (2, BoundingSphere::new(Vector3::new(5.0, 0.0, 0.0), 1.0)),
        ];
        let hit = ObjectPicker::new().pick(&ray, candidates).unwrap();
        assert_eq!(hit.object_index, 1);
        assert!((hit.intersection_point.z - -1.0).abs() < 1e-5);
    }

    #[test]
    fn test_screen_to_ray_round_trip() {
        let camera = OrbitCamera::looking_at(
            Vector3::new(-90.0, 140.0, 140.0),
            Vector3::zero(),
            1200.0 / 800.0,
        );
        let point = Vector3::new(62.0, 0.0, 0.0);
        let pixel = world_to_screen(point, (1200.0, 800.0), &camera).unwrap();
        let ray = screen_to_ray(pixel, (1200.0, 800.0), &camera);

        let to_point = point - ray.origin;
        let off_axis = (to_point - ray.direction * to_point.dot(ray.direction)).magnitude();
        assert!(off_axis < 1e-2, "ray misses projected point by {}", off_axis);
    }

    #[test]
    fn test_ray_starts_at_eye_and_reaches_far_planets() {
        let camera = OrbitCamera::looking_at(
            Vector3::new(-90.0, 140.0, 140.0),
            Vector3::zero(),
            1200.0 / 800.0,
        );
        for point in [Vector3::new(62.0, 0.0, 0.0), Vector3::new(216.0, 0.0, 0.0)] {
            let pixel = world_to_screen(point, (1200.0, 800.0), &camera).unwrap();
            let ray = screen_to_ray(pixel, (1200.0, 800.0), &camera);
            assert_eq!(ray.origin, camera.eye);

            let to_point = point - ray.origin;
            let off_axis = (to_point - ray.direction * to_point.dot(ray.direction)).magnitude();
            assert!(off_axis < 1e-3, "ray misses {:?} by {}", point, off_axis);
        }
    }

    #[test]
    fn test_screen_center_maps_to_ndc_origin() {
        let (x, y) = screen_to_ndc((600.0, 400.0), (1200.0, 800.0));
        assert!(x.abs() < 1e-6 && y.abs() < 1e-6);
        let (x, y) = screen_to_ndc((0.0, 0.0), (1200.0, 800.0));
        assert_eq!((x, y), (-1.0, 1.0));
    }
}
