//! # Scene Module
//!
//! GPU-side scene: one [`Object`] per drawable scene-graph node, each with its
//! mesh buffers and per-object uniform, plus the vertex format they share.
//!
//! ```no_run
//! use orrery::gfx::scene::Scene;
//! use orrery::simulation::builder::build_scene;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let built = build_scene(&mut StdRng::seed_from_u64(0));
//! let scene = Scene::from_graph(&built.graph);
//! // scene.init_gpu_resources(&device, &layout) once a device exists
//! ```

pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::{DrawObject, Object, ObjectKind, ObjectUniform};
pub use scene::Scene;
pub use vertex::Vertex3D;
