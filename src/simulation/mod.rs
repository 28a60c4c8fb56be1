//! Simulation system
//!
//! The orrery's CPU-side model: static registry tables, the scene graph they
//! are instantiated into, per-frame animation, pointer interaction and the
//! [`SolarSystem`] context that ties them together. Nothing here needs a GPU.

pub mod animation;
pub mod builder;
pub mod clock;
pub mod context;
pub mod entities;
pub mod interaction;
pub mod registry;
pub mod scene_graph;
pub mod traits;
pub mod viewport;

pub use clock::{Clock, ManualClock, SystemClock};
pub use context::SolarSystem;
pub use entities::{Body, DescriptionOverlay, FreeMovingObject, HoverTarget, InteractionState};
pub use interaction::PointerOutcome;
pub use scene_graph::{Drawable, NodeId, SceneGraph, Shading};
pub use traits::{FrameTarget, FrameView, Simulation};
pub use viewport::Viewport;
