//! # Graphics Module
//!
//! Everything that touches the GPU or the screen: the orbit camera, procedural
//! geometry, ray picking, GPU resources, the GPU mirror of the scene graph and
//! the render engine.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Orbit camera with drag, pan and zoom
//! - **Geometry** ([`geometry`]) - Sphere and ring tessellation
//! - **Picking** ([`picking`]) - Screen rays and bounding-volume hit tests
//! - **Resources** ([`resources`]) - Global uniforms and textures
//! - **Scene** ([`scene`]) - One GPU object per drawable node
//! - **Rendering** ([`rendering`]) - Pipelines and the frame pass
//!
//! Geometry, picking and the camera are pure math and usable without a device.
//!
//! ```no_run
//! use orrery::gfx::picking::screen_to_ray;
//! use orrery::gfx::OrbitCamera;
//! use cgmath::{Vector3, Zero};
//!
//! let camera = OrbitCamera::looking_at(Vector3::new(0.0, 300.0, 300.0), Vector3::zero(), 1.5);
//! let ray = screen_to_ray((600.0, 400.0), (1200.0, 800.0), &camera);
//! ```

pub mod camera;
pub mod geometry;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
