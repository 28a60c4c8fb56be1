//! # Procedural Geometry Generation
//!
//! Generates the meshes the orrery draws, so no model files are needed.
//!
//! ## Supported Primitives
//!
//! - **Sphere**: UV sphere with configurable radius and resolution
//! - **Ring**: Flat annulus with planar texture coordinates
//!
//! ## Usage
//!
//! ```rust
//! use orrery::gfx::geometry::{generate_ring, generate_sphere};
//!
//! // A planet with the default 30x30 resolution
//! let sphere_data = generate_sphere(6.0, 30, 30);
//!
//! // A ring around it
//! let ring_data = generate_ring(10.0, 20.0, 32);
//! assert!(ring_data.triangle_count() > 0);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::picking::AABB;
use crate::gfx::scene::vertex::Vertex3D;

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
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Local-space bounds of the mesh
    pub fn bounds(&self) -> AABB {
        AABB::from_vertices(&self.vertices)
    }

    /// Interleaves the attribute streams into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                tex_coords: self.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect()
    }
}
